//! Lecture/subsection suffix matching.

use serde::{Deserialize, Serialize};

/// How section suffixes are compared.
///
/// `Exact` compares the digit strings, so `"01"` and `"1"` differ.
/// `Numeric` compares their integer values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuffixMatch {
    #[default]
    Exact,
    Numeric,
}

impl SuffixMatch {
    pub fn matches(&self, lecture_suffix: &str, section_suffix: &str) -> bool {
        match self {
            Self::Exact => lecture_suffix == section_suffix,
            Self::Numeric => {
                match (lecture_suffix.parse::<u64>(), section_suffix.parse::<u64>()) {
                    (Ok(a), Ok(b)) => a == b,
                    // Empty or overlong suffixes fall back to string equality.
                    _ => lecture_suffix == section_suffix,
                }
            }
        }
    }
}
