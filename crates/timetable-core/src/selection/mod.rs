//! Section selection state machine.
//!
//! Courses flagged `matching_required` pair a lecture with the tutorials and
//! labs that share its numeric suffix (`L1` goes with `T1`, `T1A`, `LA1`).
//! Choosing such a lecture does not commit anything yet; the plan waits for a
//! matching subsection and then commits the whole group in one batch.
//!
//! ## State Transitions
//!
//! ```text
//! Idle --lecture (matching course)--> AwaitingMatch
//! Idle --any other section--> commit --> Idle
//! AwaitingMatch --matching subsection--> commit batch --> Idle
//! AwaitingMatch --mismatched subsection--> Rejected (stays AwaitingMatch)
//! AwaitingMatch --cancel--> Idle
//! AwaitingMatch --any other section--> commit it alone --> Idle
//! ```
//!
//! Overlaps with already-committed sections are reported with every commit.
//! Under [`ConflictPolicy::Strict`] a commit that would stack more than the
//! configured number of slots is rejected instead.

mod availability;
mod matching;

pub use availability::{section_availability, BlockReason, SectionAvailability, SectionStatus};
pub use matching::SuffixMatch;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{Catalog, Course, Section, SectionKind};
use crate::conflict::{check_overlap_limit, detect_conflicts, ConflictPolicy};
use crate::error::{CatalogError, Result};
use crate::plan::{AddedItem, Plan};

/// A lecture chosen while its matching subsection is still outstanding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingLecture {
    pub course_code: String,
    pub lecture_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SelectionState {
    #[default]
    Idle,
    AwaitingMatch(PendingLecture),
}

/// Why a selection was refused. The plan is left untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Rejection {
    #[error("Please select the Tutorial/Lab that matches {lecture_id} (got {section_id})")]
    InvalidMatch {
        lecture_id: String,
        section_id: String,
    },

    #[error("Adding this would put {peak} classes at the same time on day {day} (limit {limit})")]
    TooManyOverlaps { day: u8, peak: usize, limit: usize },
}

/// Result of [`Selector::try_select`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SelectOutcome {
    /// Sections were committed. `added` is empty when every uid was already
    /// present. `conflicts` lists overlapping committed sections.
    Committed {
        added: Vec<String>,
        conflicts: BTreeSet<String>,
    },
    /// A lecture is waiting for its matching tutorial or lab.
    Pending { lecture_id: String },
    Rejected(Rejection),
}

/// Policy knobs for selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionRules {
    pub suffix_match: SuffixMatch,
    pub conflict_policy: ConflictPolicy,
}

/// Runs selections against a catalog.
pub struct Selector<'a> {
    catalog: &'a Catalog,
    rules: SelectionRules,
}

impl<'a> Selector<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            rules: SelectionRules::default(),
        }
    }

    pub fn with_rules(mut self, rules: SelectionRules) -> Self {
        self.rules = rules;
        self
    }

    /// Select a section of a course.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when the course or section does not exist,
    /// including a pending lecture that vanished from the catalog.
    pub fn try_select(
        &self,
        plan: &mut Plan,
        code: &str,
        section_id: &str,
    ) -> Result<SelectOutcome> {
        let course = self.catalog.require_course(code)?;
        let section = find_section(course, section_id)?;

        if section.kind == SectionKind::Lecture
            && course.matching_required
            && course.has_subsections()
        {
            plan.selection = SelectionState::AwaitingMatch(PendingLecture {
                course_code: course.code.clone(),
                lecture_id: section.id.clone(),
            });
            plan.touch();
            tracing::info!(
                "{} {} selected, waiting for matching tutorial/lab",
                course.code,
                section.id
            );
            return Ok(SelectOutcome::Pending {
                lecture_id: section.id.clone(),
            });
        }

        if let SelectionState::AwaitingMatch(pending) = &plan.selection {
            if pending.course_code == course.code
                && course.matching_required
                && section.kind.is_subsection()
            {
                let lecture = find_section(course, &pending.lecture_id)?;
                let suffix = lecture.suffix();
                if !self.rules.suffix_match.matches(&suffix, &section.suffix()) {
                    tracing::debug!(
                        "{} does not match pending lecture {}",
                        section.id,
                        lecture.id
                    );
                    return Ok(SelectOutcome::Rejected(Rejection::InvalidMatch {
                        lecture_id: lecture.id.clone(),
                        section_id: section.id.clone(),
                    }));
                }

                let mut batch = vec![lecture];
                batch.extend(course.sections.iter().filter(|s| {
                    s.kind.is_subsection() && self.rules.suffix_match.matches(&suffix, &s.suffix())
                }));
                return Ok(self.commit(plan, course, batch));
            }
        }

        Ok(self.commit(plan, course, vec![section]))
    }

    fn commit(&self, plan: &mut Plan, course: &Course, batch: Vec<&Section>) -> SelectOutcome {
        let mut fresh: Vec<&Section> = Vec::with_capacity(batch.len());
        for section in batch {
            let uid = AddedItem::uid_for(&course.code, &section.id);
            if !plan.contains(&uid) && !fresh.iter().any(|s| s.id == section.id) {
                fresh.push(section);
            }
        }

        let candidate_slots = || fresh.iter().flat_map(|s| s.slots.iter());

        if let ConflictPolicy::Strict { max_concurrent } = self.rules.conflict_policy {
            if let Some(v) = check_overlap_limit(candidate_slots(), plan.items(), max_concurrent) {
                tracing::info!(
                    "{}: rejected, day {} would reach {} concurrent classes",
                    course.code,
                    v.day,
                    v.peak
                );
                return SelectOutcome::Rejected(Rejection::TooManyOverlaps {
                    day: v.day,
                    peak: v.peak,
                    limit: v.limit,
                });
            }
        }

        let conflicts = detect_conflicts(candidate_slots(), plan.items());
        if !conflicts.is_empty() {
            tracing::debug!(
                "Time Conflict with {}",
                conflicts.iter().cloned().collect::<Vec<_>>().join(", ")
            );
        }

        let mut added = Vec::with_capacity(fresh.len());
        for section in fresh {
            let item = AddedItem::new(course.code.clone(), course.credits, section.clone());
            let uid = item.uid.clone();
            if plan.insert(item) {
                added.push(uid);
            }
        }

        plan.selection = SelectionState::Idle;
        plan.touch();
        if !added.is_empty() {
            tracing::info!("committed {}", added.join(", "));
        }

        SelectOutcome::Committed { added, conflicts }
    }
}

fn find_section<'c>(course: &'c Course, section_id: &str) -> Result<&'c Section> {
    course.section(section_id).ok_or_else(|| {
        CatalogError::UnknownSection {
            code: course.code.clone(),
            section: section_id.to_string(),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TimeSlot;

    fn sec(id: &str, day: u8, start: f64, end: f64) -> Section {
        Section::new(id, vec![TimeSlot::new([day], start, end)])
    }

    fn catalog() -> Catalog {
        Catalog::from_courses(vec![
            Course {
                code: "COMP 2011".into(),
                title: "Programming".into(),
                credits: 4,
                matching_required: true,
                exclusions: vec![],
                sections: vec![
                    sec("L1", 1, 9.0, 10.5),
                    sec("L2", 2, 9.0, 10.5),
                    sec("T1", 3, 9.0, 10.0),
                    sec("T1A", 3, 11.0, 12.0),
                    sec("T2", 4, 9.0, 10.0),
                    sec("LA1", 5, 14.0, 16.0),
                    sec("R1", 6, 9.0, 10.0),
                ],
            },
            Course {
                code: "HUMA 1000".into(),
                title: "Cultures".into(),
                credits: 3,
                matching_required: false,
                exclusions: vec![],
                sections: vec![sec("L1", 1, 10.0, 11.5), sec("T1", 2, 16.0, 17.0)],
            },
            Course {
                code: "MATH 1012".into(),
                title: "Calculus".into(),
                credits: 4,
                matching_required: true,
                exclusions: vec![],
                sections: vec![sec("L01", 1, 13.0, 14.0), sec("T1", 2, 13.0, 14.0)],
            },
        ])
        .unwrap()
    }

    #[test]
    fn matching_lecture_goes_pending_without_commit() {
        let catalog = catalog();
        let mut plan = Plan::new();
        let outcome = Selector::new(&catalog)
            .try_select(&mut plan, "COMP 2011", "L1")
            .unwrap();

        assert_eq!(outcome, SelectOutcome::Pending { lecture_id: "L1".into() });
        assert!(plan.is_empty());
        assert_eq!(plan.pending().unwrap().lecture_id, "L1");
    }

    #[test]
    fn matching_subsection_commits_whole_group() {
        let catalog = catalog();
        let selector = Selector::new(&catalog);
        let mut plan = Plan::new();
        selector.try_select(&mut plan, "COMP 2011", "L1").unwrap();
        let outcome = selector.try_select(&mut plan, "COMP 2011", "T1A").unwrap();

        match outcome {
            SelectOutcome::Committed { added, conflicts } => {
                assert_eq!(
                    added,
                    vec!["COMP 2011-L1", "COMP 2011-T1", "COMP 2011-T1A", "COMP 2011-LA1"]
                );
                assert!(conflicts.is_empty());
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert_eq!(plan.selection(), &SelectionState::Idle);
    }

    #[test]
    fn mismatched_subsection_is_rejected_and_stays_pending() {
        let catalog = catalog();
        let selector = Selector::new(&catalog);
        let mut plan = Plan::new();
        selector.try_select(&mut plan, "COMP 2011", "L1").unwrap();
        let outcome = selector.try_select(&mut plan, "COMP 2011", "T2").unwrap();

        assert_eq!(
            outcome,
            SelectOutcome::Rejected(Rejection::InvalidMatch {
                lecture_id: "L1".into(),
                section_id: "T2".into(),
            })
        );
        assert!(plan.is_empty());
        assert!(plan.pending().is_some());
    }

    #[test]
    fn second_lecture_replaces_pending_one() {
        let catalog = catalog();
        let selector = Selector::new(&catalog);
        let mut plan = Plan::new();
        selector.try_select(&mut plan, "COMP 2011", "L1").unwrap();
        selector.try_select(&mut plan, "COMP 2011", "L2").unwrap();
        assert_eq!(plan.pending().unwrap().lecture_id, "L2");
    }

    #[test]
    fn non_matching_course_commits_immediately() {
        let catalog = catalog();
        let mut plan = Plan::new();
        let outcome = Selector::new(&catalog)
            .try_select(&mut plan, "HUMA 1000", "L1")
            .unwrap();
        assert!(matches!(outcome, SelectOutcome::Committed { ref added, .. } if added.len() == 1));
        assert!(plan.contains("HUMA 1000-L1"));
    }

    #[test]
    fn other_course_while_pending_commits_and_clears_pending() {
        let catalog = catalog();
        let selector = Selector::new(&catalog);
        let mut plan = Plan::new();
        selector.try_select(&mut plan, "COMP 2011", "L1").unwrap();
        selector.try_select(&mut plan, "HUMA 1000", "T1").unwrap();
        assert!(plan.contains("HUMA 1000-T1"));
        assert!(plan.pending().is_none());
    }

    #[test]
    fn other_kind_section_of_pending_course_commits_alone() {
        let catalog = catalog();
        let selector = Selector::new(&catalog);
        let mut plan = Plan::new();
        selector.try_select(&mut plan, "COMP 2011", "L1").unwrap();
        let outcome = selector.try_select(&mut plan, "COMP 2011", "R1").unwrap();

        assert_eq!(
            outcome,
            SelectOutcome::Committed {
                added: vec!["COMP 2011-R1".to_string()],
                conflicts: BTreeSet::new(),
            }
        );
        assert!(!plan.contains("COMP 2011-L1"));
        assert!(plan.pending().is_none());
    }

    #[test]
    fn duplicate_commit_is_a_silent_no_op() {
        let catalog = catalog();
        let selector = Selector::new(&catalog);
        let mut plan = Plan::new();
        selector.try_select(&mut plan, "HUMA 1000", "L1").unwrap();
        let before = plan.items().to_vec();
        let outcome = selector.try_select(&mut plan, "HUMA 1000", "L1").unwrap();

        assert_eq!(
            outcome,
            SelectOutcome::Committed { added: vec![], conflicts: BTreeSet::new() }
        );
        assert_eq!(plan.items(), before.as_slice());
    }

    #[test]
    fn conflicts_are_reported_but_commit_proceeds() {
        let catalog = catalog();
        let selector = Selector::new(&catalog);
        let mut plan = Plan::new();
        selector.try_select(&mut plan, "HUMA 1000", "L1").unwrap();
        selector.try_select(&mut plan, "COMP 2011", "L1").unwrap();
        let outcome = selector.try_select(&mut plan, "COMP 2011", "T1").unwrap();

        match outcome {
            SelectOutcome::Committed { conflicts, .. } => {
                assert_eq!(conflicts, BTreeSet::from(["HUMA 1000 L1".to_string()]));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert!(plan.contains("COMP 2011-L1"));
    }

    #[test]
    fn strict_policy_blocks_third_concurrent_slot() {
        let catalog = Catalog::from_courses(vec![
            Course {
                code: "A 1000".into(),
                title: String::new(),
                credits: 3,
                matching_required: false,
                exclusions: vec![],
                sections: vec![sec("L1", 1, 9.0, 11.0)],
            },
            Course {
                code: "B 1000".into(),
                title: String::new(),
                credits: 3,
                matching_required: false,
                exclusions: vec![],
                sections: vec![sec("L1", 1, 9.5, 10.5)],
            },
            Course {
                code: "C 1000".into(),
                title: String::new(),
                credits: 3,
                matching_required: false,
                exclusions: vec![],
                sections: vec![sec("L1", 1, 10.0, 12.0)],
            },
        ])
        .unwrap();
        let selector = Selector::new(&catalog).with_rules(SelectionRules {
            conflict_policy: ConflictPolicy::Strict { max_concurrent: 2 },
            ..SelectionRules::default()
        });
        let mut plan = Plan::new();
        selector.try_select(&mut plan, "A 1000", "L1").unwrap();
        selector.try_select(&mut plan, "B 1000", "L1").unwrap();
        let outcome = selector.try_select(&mut plan, "C 1000", "L1").unwrap();

        assert_eq!(
            outcome,
            SelectOutcome::Rejected(Rejection::TooManyOverlaps { day: 1, peak: 3, limit: 2 })
        );
        assert!(!plan.contains("C 1000-L1"));
    }

    #[test]
    fn strict_policy_ignores_stack_the_candidate_does_not_touch() {
        let stacked = |code: &str, start: f64, end: f64| Course {
            code: code.into(),
            title: String::new(),
            credits: 3,
            matching_required: false,
            exclusions: vec![],
            sections: vec![sec("L1", 1, start, end)],
        };
        let catalog = Catalog::from_courses(vec![
            stacked("A 1000", 9.0, 10.0),
            stacked("B 1000", 9.0, 10.0),
            stacked("C 1000", 9.0, 10.0),
            stacked("D 1000", 15.0, 16.0),
        ])
        .unwrap();

        let mut plan = Plan::new();
        let advisory = Selector::new(&catalog);
        for code in ["A 1000", "B 1000", "C 1000"] {
            advisory.try_select(&mut plan, code, "L1").unwrap();
        }

        let strict = Selector::new(&catalog).with_rules(SelectionRules {
            conflict_policy: ConflictPolicy::Strict { max_concurrent: 2 },
            ..SelectionRules::default()
        });
        let outcome = strict.try_select(&mut plan, "D 1000", "L1").unwrap();

        assert_eq!(
            outcome,
            SelectOutcome::Committed {
                added: vec!["D 1000-L1".to_string()],
                conflicts: BTreeSet::new(),
            }
        );
        assert!(plan.contains("D 1000-L1"));
    }

    #[test]
    fn exact_suffix_rejects_leading_zero_mismatch() {
        let catalog = catalog();
        let selector = Selector::new(&catalog);
        let mut plan = Plan::new();
        selector.try_select(&mut plan, "MATH 1012", "L01").unwrap();
        let outcome = selector.try_select(&mut plan, "MATH 1012", "T1").unwrap();
        assert!(matches!(outcome, SelectOutcome::Rejected(Rejection::InvalidMatch { .. })));
    }

    #[test]
    fn numeric_suffix_accepts_leading_zero() {
        let catalog = catalog();
        let selector = Selector::new(&catalog).with_rules(SelectionRules {
            suffix_match: SuffixMatch::Numeric,
            ..SelectionRules::default()
        });
        let mut plan = Plan::new();
        selector.try_select(&mut plan, "MATH 1012", "L01").unwrap();
        let outcome = selector.try_select(&mut plan, "MATH 1012", "T1").unwrap();
        assert!(matches!(outcome, SelectOutcome::Committed { ref added, .. } if added.len() == 2));
    }

    #[test]
    fn unknown_section_is_an_error() {
        let catalog = catalog();
        let mut plan = Plan::new();
        assert!(Selector::new(&catalog)
            .try_select(&mut plan, "COMP 2011", "L9")
            .is_err());
        assert!(Selector::new(&catalog)
            .try_select(&mut plan, "NOPE 1000", "L1")
            .is_err());
    }
}
