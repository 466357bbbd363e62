//! Per-section availability for a course, as front-ends should present it.
//!
//! This is a read-only projection of the plan. It never changes what
//! [`super::Selector::try_select`] accepts.

use serde::Serialize;

use super::SuffixMatch;
use crate::catalog::{Course, Section, SectionKind};
use crate::plan::{AddedItem, Plan};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum BlockReason {
    /// A lecture of this course is already committed or pending.
    LectureAlreadyChosen,
    /// Matching course, but no lecture has been chosen yet.
    LectureRequired,
    /// Subsection belongs to a different lecture group.
    SuffixMismatch { lecture_suffix: String },
}

impl std::fmt::Display for BlockReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LectureAlreadyChosen => write!(f, "You can only select one Lecture per course"),
            Self::LectureRequired => write!(f, "Please select a Lecture first"),
            Self::SuffixMismatch { lecture_suffix } => {
                write!(f, "This section matches Lecture {lecture_suffix} only")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SectionStatus {
    Added,
    Pending,
    Available,
    Blocked(BlockReason),
}

#[derive(Debug, Clone, Serialize)]
pub struct SectionAvailability<'a> {
    pub section: &'a Section,
    pub status: SectionStatus,
}

/// Status of every section of `course` given the current plan.
pub fn section_availability<'a>(
    course: &'a Course,
    plan: &Plan,
    suffix_match: SuffixMatch,
) -> Vec<SectionAvailability<'a>> {
    let pending_id = plan
        .pending()
        .filter(|p| p.course_code == course.code)
        .map(|p| p.lecture_id.as_str());

    let active_lecture = plan
        .committed_lecture(&course.code)
        .map(|i| i.sec.id.as_str())
        .or(pending_id)
        .and_then(|id| course.section(id));

    course
        .sections
        .iter()
        .map(|section| {
            let uid = AddedItem::uid_for(&course.code, &section.id);
            let status = if plan.contains(&uid) {
                SectionStatus::Added
            } else if pending_id == Some(section.id.as_str()) {
                SectionStatus::Pending
            } else if section.kind == SectionKind::Lecture && active_lecture.is_some() {
                SectionStatus::Blocked(BlockReason::LectureAlreadyChosen)
            } else if course.matching_required && section.kind.is_subsection() {
                match active_lecture {
                    None => SectionStatus::Blocked(BlockReason::LectureRequired),
                    Some(lecture) if !suffix_match.matches(&lecture.suffix(), &section.suffix()) => {
                        SectionStatus::Blocked(BlockReason::SuffixMismatch {
                            lecture_suffix: lecture.suffix(),
                        })
                    }
                    Some(_) => SectionStatus::Available,
                }
            } else {
                SectionStatus::Available
            };
            SectionAvailability { section, status }
        })
        .collect()
}
