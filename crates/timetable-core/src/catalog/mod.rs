//! Course catalog and the interval model.
//!
//! The catalog is static data produced by the registry scraper: a list of
//! courses, each with sections, each with recurring meeting slots. Sections
//! are tagged with a [`SectionKind`] once, when the catalog is loaded.
//!
//! Catalog files are JSON arrays. The generator historically wrapped the
//! array in `const courseData = [...];` for direct browser inclusion; that
//! wrapper is accepted and stripped.

mod meeting;

pub use meeting::{parse_meeting_time, MeetingTime};

use std::collections::{BTreeSet, HashMap};
use std::path::Path;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, Result, ValidationError};

/// Days the weekly grid displays (Monday through Saturday).
pub const GRID_DAYS: std::ops::RangeInclusive<u8> = 1..=6;

/// Map a weekday integer (1=Mon .. 6=Sat, 0 or 7=Sun) to a chrono weekday.
pub fn weekday(day: u8) -> Option<Weekday> {
    match day {
        0 | 7 => Some(Weekday::Sun),
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        _ => None,
    }
}

/// One recurring meeting of a section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Raw meeting string, kept for display.
    #[serde(default)]
    pub time: String,
    pub days: BTreeSet<u8>,
    /// Decimal hours, e.g. 9.5 for 09:30.
    pub start: f64,
    pub end: f64,
    #[serde(default)]
    pub venue: String,
    #[serde(default)]
    pub instructor: String,
}

impl TimeSlot {
    pub fn new(days: impl IntoIterator<Item = u8>, start: f64, end: f64) -> Self {
        Self {
            time: String::new(),
            days: days.into_iter().collect(),
            start,
            end,
            venue: String::new(),
            instructor: String::new(),
        }
    }

    /// True when both slots meet on at least one common day.
    pub fn shares_day(&self, other: &TimeSlot) -> bool {
        self.days.intersection(&other.days).next().is_some()
    }

    /// Half-open time overlap, ignoring days.
    pub fn overlaps_time(&self, other: &TimeSlot) -> bool {
        crate::conflict::overlaps(self.start, self.end, other.start, other.end)
    }

    /// Same-day time overlap.
    pub fn conflicts_with(&self, other: &TimeSlot) -> bool {
        self.shares_day(other) && self.overlaps_time(other)
    }
}

/// Kind of section, derived from its id prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Lecture,
    Tutorial,
    Lab,
    Other,
}

impl SectionKind {
    /// `LA1` is a lab, `L1` a lecture, `T1A` a tutorial.
    pub fn from_id(id: &str) -> Self {
        if id.starts_with("LA") {
            Self::Lab
        } else if id.starts_with('L') {
            Self::Lecture
        } else if id.starts_with('T') {
            Self::Tutorial
        } else {
            Self::Other
        }
    }

    /// Tutorials and labs are matched against a lecture.
    pub fn is_subsection(&self) -> bool {
        matches!(self, Self::Tutorial | Self::Lab)
    }
}

/// One offering of a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub kind: SectionKind,
    pub slots: Vec<TimeSlot>,
}

impl Section {
    pub fn new(id: impl Into<String>, slots: Vec<TimeSlot>) -> Self {
        let id = id.into();
        Self {
            kind: SectionKind::from_id(&id),
            id,
            slots,
        }
    }

    /// Digits of the id, in order: `"L01"` -> `"01"`, `"LA1"` -> `"1"`.
    pub fn suffix(&self) -> String {
        self.id.chars().filter(|c| c.is_ascii_digit()).collect()
    }
}

/// A course as listed in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub code: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub credits: u32,
    #[serde(default)]
    pub matching_required: bool,
    #[serde(default)]
    pub exclusions: Vec<String>,
    pub sections: Vec<Section>,
}

impl Course {
    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Subject prefix of the code: `"COMP 1021"` -> `"COMP"`.
    pub fn subject(&self) -> &str {
        self.code.split(' ').next().unwrap_or(&self.code)
    }

    pub fn has_subsections(&self) -> bool {
        self.sections.iter().any(|s| s.kind.is_subsection())
    }
}

// On-disk shapes. Slots may carry only the raw meeting string, in which case
// days and hours are parsed from it.

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCourse {
    code: String,
    #[serde(default)]
    title: String,
    #[serde(default, alias = "credit")]
    credits: u32,
    #[serde(default)]
    matching_required: bool,
    #[serde(default)]
    exclusions: Vec<String>,
    #[serde(default)]
    sections: Vec<RawSection>,
}

#[derive(Deserialize)]
struct RawSection {
    id: String,
    #[serde(default)]
    slots: Vec<RawSlot>,
}

#[derive(Deserialize)]
struct RawSlot {
    #[serde(default)]
    time: String,
    #[serde(default)]
    venue: String,
    #[serde(default)]
    instructor: String,
    days: Option<BTreeSet<u8>>,
    start: Option<f64>,
    end: Option<f64>,
}

impl RawSlot {
    fn into_slot(self) -> Option<TimeSlot> {
        let (days, start, end) = match (self.days, self.start, self.end) {
            (Some(days), Some(start), Some(end)) => (days, start, end),
            _ => {
                let parsed = parse_meeting_time(&self.time)?;
                (parsed.days, parsed.start, parsed.end)
            }
        };
        Some(TimeSlot {
            time: self.time,
            days,
            start,
            end,
            venue: self.venue,
            instructor: self.instructor,
        })
    }
}

/// The full course catalog with a code index.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    courses: Vec<Course>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog, validating every slot's time range.
    ///
    /// When two courses share a code, the later one wins the index.
    pub fn from_courses(courses: Vec<Course>) -> Result<Self> {
        for course in &courses {
            for section in &course.sections {
                for slot in &section.slots {
                    if !(slot.start < slot.end) {
                        return Err(ValidationError::InvalidTimeRange {
                            section: format!("{} {}", course.code, section.id),
                            start: slot.start,
                            end: slot.end,
                        }
                        .into());
                    }
                }
            }
        }

        let index = courses
            .iter()
            .enumerate()
            .map(|(i, c)| (c.code.clone(), i))
            .collect();
        Ok(Self { courses, index })
    }

    /// Parse catalog JSON, optionally wrapped in `const courseData = ...;`.
    ///
    /// Slots whose meeting time cannot be determined or whose end does not
    /// come after their start are skipped, as are sections left without slots.
    pub fn from_json_str(content: &str, origin: &Path) -> Result<Self> {
        let body = strip_js_wrapper(content);
        let raw: Vec<RawCourse> =
            serde_json::from_str(body).map_err(|e| CatalogError::Parse {
                path: origin.to_path_buf(),
                message: e.to_string(),
            })?;

        let mut courses = Vec::with_capacity(raw.len());
        for rc in raw {
            let mut sections = Vec::new();
            for rs in rc.sections {
                let total = rs.slots.len();
                let slots: Vec<TimeSlot> = rs
                    .slots
                    .into_iter()
                    .filter_map(RawSlot::into_slot)
                    .filter(|s| s.start < s.end)
                    .collect();
                if slots.len() < total {
                    tracing::warn!(
                        "{} {}: dropped {} slot(s) without a usable meeting time",
                        rc.code,
                        rs.id,
                        total - slots.len()
                    );
                }
                if !slots.is_empty() {
                    sections.push(Section::new(rs.id, slots));
                }
            }
            if sections.is_empty() {
                tracing::warn!("{}: no schedulable sections, skipped", rc.code);
                continue;
            }
            courses.push(Course {
                code: rc.code,
                title: rc.title,
                credits: rc.credits,
                matching_required: rc.matching_required,
                exclusions: rc.exclusions,
                sections,
            });
        }

        tracing::debug!("loaded {} courses from {}", courses.len(), origin.display());
        Self::from_courses(courses)
    }

    /// Read and parse a catalog file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content, path)
    }

    pub fn course(&self, code: &str) -> Option<&Course> {
        self.index.get(code).map(|&i| &self.courses[i])
    }

    /// Like [`Catalog::course`] but an unknown code is an error.
    pub fn require_course(&self, code: &str) -> Result<&Course> {
        self.course(code)
            .ok_or_else(|| CatalogError::UnknownCourse(code.to_string()).into())
    }

    /// Sorted, de-duplicated subject prefixes.
    pub fn subjects(&self) -> Vec<&str> {
        let set: BTreeSet<&str> = self.courses.iter().map(Course::subject).collect();
        set.into_iter().collect()
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}

fn strip_js_wrapper(content: &str) -> &str {
    let trimmed = content.trim();
    match trimmed.find('[') {
        Some(open) if trimmed.starts_with("const ") || trimmed.starts_with("var ") => {
            trimmed[open..].trim_end().trim_end_matches(';')
        }
        _ => trimmed,
    }
}
