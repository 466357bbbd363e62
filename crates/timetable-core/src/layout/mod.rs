//! Calendar layout: side-by-side columns for overlapping classes.
//!
//! [`compute_layout`] is recomputed from scratch after every plan change.
//! The renderer divides a day cell's width by `column_count` and offsets each
//! event by `column`.

mod columns;
mod partition;

pub use columns::assign_columns;
pub use partition::{partition_by_day, DayEvent};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::plan::AddedItem;

/// Identity of one (slot, day) occurrence.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EventKey {
    pub uid: String,
    pub slot_index: usize,
    pub day: u8,
}

impl std::fmt::Display for EventKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}|{}|{}", self.uid, self.slot_index, self.day)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutEntry {
    pub column: usize,
    pub column_count: usize,
}

/// Layout of a whole plan.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    entries: BTreeMap<EventKey, LayoutEntry>,
}

impl Layout {
    pub fn get(&self, key: &EventKey) -> Option<&LayoutEntry> {
        self.entries.get(key)
    }

    /// Look up by parts, as a renderer walking slots would.
    pub fn entry(&self, uid: &str, slot_index: usize, day: u8) -> Option<&LayoutEntry> {
        self.entries.get(&EventKey {
            uid: uid.to_string(),
            slot_index,
            day,
        })
    }

    pub fn for_day(&self, day: u8) -> impl Iterator<Item = (&EventKey, &LayoutEntry)> {
        self.entries.iter().filter(move |(k, _)| k.day == day)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Lay out every committed slot, day by day.
pub fn compute_layout(items: &[AddedItem]) -> Layout {
    let mut entries = BTreeMap::new();
    for (day, events) in partition_by_day(items) {
        let placed = assign_columns(events);
        let widest = placed.iter().map(|(_, e)| e.column_count).max().unwrap_or(0);
        tracing::debug!("day {}: {} event(s), widest cluster {}", day, placed.len(), widest);
        entries.extend(placed);
    }
    Layout { entries }
}
