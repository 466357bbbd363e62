//! A plan: the list of committed sections plus the in-progress selection.
//!
//! The plan is the single mutable context every core operation works on.
//! Items have set semantics keyed by uid (`"<code>-<section id>"`), and
//! courses are removed as a unit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{Section, SectionKind};
use crate::selection::{PendingLecture, SelectionState};

/// A section committed to a plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddedItem {
    pub uid: String,
    pub code: String,
    pub credits: u32,
    pub sec: Section,
}

impl AddedItem {
    pub fn new(code: impl Into<String>, credits: u32, sec: Section) -> Self {
        let code = code.into();
        Self {
            uid: Self::uid_for(&code, &sec.id),
            code,
            credits,
            sec,
        }
    }

    pub fn uid_for(code: &str, section_id: &str) -> String {
        format!("{code}-{section_id}")
    }

    /// Display label used in conflict reports, e.g. `"COMP 2011 L1"`.
    pub fn label(&self) -> String {
        format!("{} {}", self.code, self.sec.id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    #[serde(default)]
    items: Vec<AddedItem>,
    #[serde(default)]
    pub(crate) selection: SelectionState,
    pub updated_at: DateTime<Utc>,
}

impl Default for Plan {
    fn default() -> Self {
        Self::new()
    }
}

impl Plan {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            selection: SelectionState::Idle,
            updated_at: Utc::now(),
        }
    }

    pub fn items(&self) -> &[AddedItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, uid: &str) -> bool {
        self.items.iter().any(|i| i.uid == uid)
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn pending(&self) -> Option<&PendingLecture> {
        match &self.selection {
            SelectionState::AwaitingMatch(p) => Some(p),
            SelectionState::Idle => None,
        }
    }

    /// Add an item unless its uid is already present. Returns whether it
    /// was added.
    pub(crate) fn insert(&mut self, item: AddedItem) -> bool {
        if self.contains(&item.uid) {
            return false;
        }
        self.items.push(item);
        true
    }

    pub(crate) fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Committed items of one course, in commit order.
    pub fn course_items<'a>(&'a self, code: &'a str) -> impl Iterator<Item = &'a AddedItem> {
        self.items.iter().filter(move |i| i.code == code)
    }

    /// The committed lecture of a course, if any.
    pub fn committed_lecture(&self, code: &str) -> Option<&AddedItem> {
        self.items
            .iter()
            .find(|i| i.code == code && i.sec.kind == SectionKind::Lecture)
    }

    /// Distinct course codes in first-commit order.
    pub fn courses(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for item in &self.items {
            if !seen.contains(&item.code.as_str()) {
                seen.push(&item.code);
            }
        }
        seen
    }

    /// Credits summed once per distinct course.
    pub fn total_credits(&self) -> u32 {
        self.courses()
            .into_iter()
            .filter_map(|code| self.course_items(code).next())
            .map(|i| i.credits)
            .sum()
    }

    /// Remove every committed section of a course. Returns the removed uids.
    pub fn remove_course(&mut self, code: &str) -> Vec<String> {
        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.items)
            .into_iter()
            .partition(|i| i.code == code);
        self.items = kept;

        let uids: Vec<String> = removed.into_iter().map(|i| i.uid).collect();
        if !uids.is_empty() {
            tracing::info!("removed {} section(s) of {}", uids.len(), code);
            self.touch();
        }
        uids
    }

    /// Remove the course that owns `uid`, all of it. Unknown uids remove
    /// nothing.
    pub fn remove_section(&mut self, uid: &str) -> Vec<String> {
        match self.items.iter().find(|i| i.uid == uid) {
            Some(target) => {
                let code = target.code.clone();
                self.remove_course(&code)
            }
            None => Vec::new(),
        }
    }

    /// Drop the pending lecture, if any, and return it.
    pub fn cancel_pending(&mut self) -> Option<PendingLecture> {
        match std::mem::take(&mut self.selection) {
            SelectionState::AwaitingMatch(pending) => {
                tracing::info!(
                    "cancelled pending lecture {} {}",
                    pending.course_code,
                    pending.lecture_id
                );
                Some(pending)
            }
            SelectionState::Idle => None,
        }
    }

    /// Remove everything, including any pending selection.
    pub fn clear(&mut self) {
        self.items.clear();
        self.selection = SelectionState::Idle;
        self.touch();
    }
}
