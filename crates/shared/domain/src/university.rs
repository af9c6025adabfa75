//! University enumeration and the selection options built from it.

use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::constants::ALL_UNIVERSITIES_LABEL;

/// Institutions a user can register with.
///
/// The set is closed and fixed for the lifetime of the process. Label and
/// value are the same string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum University {
    #[serde(rename = "Harvard University")]
    Harvard,
    #[serde(rename = "Stanford University")]
    Stanford,
    #[serde(rename = "MIT")]
    Mit,
    #[serde(rename = "Oxford University")]
    Oxford,
    #[serde(rename = "Cambridge University")]
    Cambridge,
    #[serde(rename = "Yale University")]
    Yale,
    #[serde(rename = "Princeton University")]
    Princeton,
}

impl University {
    /// Every university in display order
    pub const ALL: [University; 7] = [
        University::Harvard,
        University::Stanford,
        University::Mit,
        University::Oxford,
        University::Cambridge,
        University::Yale,
        University::Princeton,
    ];

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            University::Harvard => "Harvard University",
            University::Stanford => "Stanford University",
            University::Mit => "MIT",
            University::Oxford => "Oxford University",
            University::Cambridge => "Cambridge University",
            University::Yale => "Yale University",
            University::Princeton => "Princeton University",
        }
    }

    /// Value submitted by the selection widget
    pub fn value(&self) -> &'static str {
        self.label()
    }

    /// Lower-case, dash separated form of the label (`harvard-university`)
    pub fn slug(&self) -> String {
        self.label().to_lowercase().replace(' ', "-")
    }
}

impl std::fmt::Display for University {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Returned when a string names no known university.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown university: {0}")]
pub struct UnknownUniversity(pub String);

impl FromStr for University {
    type Err = UnknownUniversity;

    /// Accepts the exact value, the label in any case, or the slug.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        University::ALL
            .iter()
            .copied()
            .find(|u| {
                u.value() == needle
                    || u.label().eq_ignore_ascii_case(needle)
                    || u.slug() == needle.to_lowercase()
            })
            .ok_or_else(|| UnknownUniversity(s.to_string()))
    }
}

/// Entry of the university selection widget.
///
/// `value` is `None` for the "All Universities" sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UniversityOption {
    pub label: &'static str,
    pub value: Option<University>,
}

static UNIVERSITY_OPTIONS: Lazy<Vec<UniversityOption>> = Lazy::new(|| {
    std::iter::once(UniversityOption {
        label: ALL_UNIVERSITIES_LABEL,
        value: None,
    })
    .chain(University::ALL.iter().map(|u| UniversityOption {
        label: u.label(),
        value: Some(*u),
    }))
    .collect()
});

/// Selection options: the "All Universities" sentinel followed by every
/// university in display order.
pub fn university_options() -> &'static [UniversityOption] {
    &UNIVERSITY_OPTIONS
}
