//! Consultation-mode classification
//!
//! Imported mode labels are inconsistent and sometimes truncated
//! ("Virtual telepho", "-perso", "I", "ic"). The directory exposes exactly
//! two coarse buckets, so two artifacts cover them:
//!
//! - `classify_mode` buckets any raw label heuristically; it is authoritative
//!   for facet counting.
//! - `IN_PERSON_VARIANTS` / `ONLINE_VARIANTS` are the fixed label lists used
//!   at match time when a filter selects a bucket.
//!
//! The in-person predicate is evaluated before the online one; a label
//! matching both classifies as in-person.

use crate::models::FacetCount;

/// Canonical consultation-channel bucket for a raw mode label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanonicalMode {
    InPerson,
    Online,
    Other,
}

/// Wire/UI labels for the two canonical buckets.
pub const IN_PERSON_LABEL: &str = "In-person";
pub const ONLINE_LABEL: &str = "Online";

/// Raw labels matched when an "In-person" filter is selected.
pub const IN_PERSON_VARIANTS: &[&str] = &[
    "In-person",
    "I",
    "-perso",
    "In person",
    "in-person",
    "in person",
];

/// Raw labels matched when an "Online" filter is selected.
pub const ONLINE_VARIANTS: &[&str] = &[
    "Virtual telephonic",
    "Virtual video-based",
    "Virtual telepho",
    "ic",
    "Online",
    "online",
    "Virtual",
    "virtual",
];

/// Classify a raw mode label into a canonical bucket.
pub fn classify_mode(raw: &str) -> CanonicalMode {
    let lower = raw.to_lowercase();

    if lower.contains("person") || lower.contains("perso") || raw == "I" || raw == "-perso" {
        return CanonicalMode::InPerson;
    }

    if lower.contains("virtual")
        || lower.contains("telepho")
        || lower.contains("video")
        || lower.contains("ic")
    {
        return CanonicalMode::Online;
    }

    CanonicalMode::Other
}

/// A consultation-mode filter selection from the request.
///
/// The two canonical buckets match their fixed variant lists; anything else
/// falls back to exact raw-string matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModeSelection {
    InPerson,
    Online,
    Exact(String),
}

impl ModeSelection {
    pub fn parse(value: &str) -> Self {
        match value {
            IN_PERSON_LABEL => Self::InPerson,
            ONLINE_LABEL => Self::Online,
            other => Self::Exact(other.to_string()),
        }
    }

    /// Raw labels this selection matches against the record's `modes` list.
    pub fn match_values(&self) -> Vec<String> {
        match self {
            Self::InPerson => IN_PERSON_VARIANTS.iter().map(|s| s.to_string()).collect(),
            Self::Online => ONLINE_VARIANTS.iter().map(|s| s.to_string()).collect(),
            Self::Exact(raw) => vec![raw.clone()],
        }
    }
}

/// Consolidate raw per-label occurrence counts into the two canonical
/// buckets. Labels classifying as `Other` are excluded from both.
pub fn consolidate_mode_counts(raw_counts: &[(String, i64)]) -> Vec<FacetCount> {
    let mut in_person = 0;
    let mut online = 0;

    for (label, count) in raw_counts {
        match classify_mode(label) {
            CanonicalMode::InPerson => in_person += count,
            CanonicalMode::Online => online += count,
            CanonicalMode::Other => {}
        }
    }

    vec![
        FacetCount::new(IN_PERSON_LABEL, in_person),
        FacetCount::new(ONLINE_LABEL, online),
    ]
}
