//! Filter criteria parsing and normalization
//!
//! The single normalization boundary between raw query parameters and the
//! rest of the search path: everything downstream consumes the typed
//! `FilterCriteria` only. Malformed pagination and filter values never
//! error; they normalize to safe defaults.

use crate::models::FacetCount;

use super::modes::ModeSelection;

/// Experience-years range filter.
///
/// Buckets are half-open except at zero: `[0,5]`, `(5,10]`, `(10,15]`,
/// `(15,∞)`. Every non-negative value falls into exactly one bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExperienceBucket {
    UpToFive,
    FiveToTen,
    TenToFifteen,
    FifteenPlus,
}

impl ExperienceBucket {
    pub const ALL: [ExperienceBucket; 4] = [
        Self::UpToFive,
        Self::FiveToTen,
        Self::TenToFifteen,
        Self::FifteenPlus,
    ];

    /// Parse the query-parameter form; any other value means "no filter".
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "0-5" => Some(Self::UpToFive),
            "5-10" => Some(Self::FiveToTen),
            "10-15" => Some(Self::TenToFifteen),
            "15+" => Some(Self::FifteenPlus),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::UpToFive => "0-5",
            Self::FiveToTen => "5-10",
            Self::TenToFifteen => "10-15",
            Self::FifteenPlus => "15+",
        }
    }

    pub fn contains(self, years: f64) -> bool {
        match self {
            Self::UpToFive => (0.0..=5.0).contains(&years),
            Self::FiveToTen => years > 5.0 && years <= 10.0,
            Self::TenToFifteen => years > 10.0 && years <= 15.0,
            Self::FifteenPlus => years > 15.0,
        }
    }

    /// SQL predicate over the given column, with the same boundaries as
    /// `contains`.
    pub fn sql_predicate(self, col: &str) -> String {
        match self {
            Self::UpToFive => format!("{col} >= 0 AND {col} <= 5"),
            Self::FiveToTen => format!("{col} > 5 AND {col} <= 10"),
            Self::TenToFifteen => format!("{col} > 10 AND {col} <= 15"),
            Self::FifteenPlus => format!("{col} > 15"),
        }
    }
}

/// Fee-amount range filter. Same half-open pattern as experience.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeeBucket {
    Under2000,
    From2000To4000,
    From4000To6000,
    Above6000,
}

impl FeeBucket {
    pub const ALL: [FeeBucket; 4] = [
        Self::Under2000,
        Self::From2000To4000,
        Self::From4000To6000,
        Self::Above6000,
    ];

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "under-2000" => Some(Self::Under2000),
            "2000-4000" => Some(Self::From2000To4000),
            "4000-6000" => Some(Self::From4000To6000),
            "above-6000" => Some(Self::Above6000),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Under2000 => "under-2000",
            Self::From2000To4000 => "2000-4000",
            Self::From4000To6000 => "4000-6000",
            Self::Above6000 => "above-6000",
        }
    }

    pub fn contains(self, amount: f64) -> bool {
        match self {
            Self::Under2000 => amount < 2000.0,
            Self::From2000To4000 => (2000.0..=4000.0).contains(&amount),
            Self::From4000To6000 => amount > 4000.0 && amount <= 6000.0,
            Self::Above6000 => amount > 6000.0,
        }
    }

    pub fn sql_predicate(self, col: &str) -> String {
        match self {
            Self::Under2000 => format!("{col} < 2000"),
            Self::From2000To4000 => format!("{col} >= 2000 AND {col} <= 4000"),
            Self::From4000To6000 => format!("{col} > 4000 AND {col} <= 6000"),
            Self::Above6000 => format!("{col} > 6000"),
        }
    }
}

/// Build a SQL `CASE` expression assigning each row its experience bucket
/// label, using the same boundaries as the filter predicates.
pub fn experience_case_expr(col: &str) -> String {
    bucket_case_expr(ExperienceBucket::ALL.map(|b| (b.sql_predicate(col), b.as_str())))
}

/// Build a SQL `CASE` expression assigning each row its fee bucket label.
pub fn fee_case_expr(col: &str) -> String {
    bucket_case_expr(FeeBucket::ALL.map(|b| (b.sql_predicate(col), b.as_str())))
}

fn bucket_case_expr(arms: [(String, &'static str); 4]) -> String {
    let mut expr = String::from("CASE");
    for (predicate, label) in arms {
        expr.push_str(&format!(" WHEN {predicate} THEN '{label}'"));
    }
    expr.push_str(" END");
    expr
}

/// Zero-fill experience facet counts so every bucket appears, in declaration
/// order.
pub fn experience_facet_counts(raw: &[(String, i64)]) -> Vec<FacetCount> {
    ExperienceBucket::ALL
        .iter()
        .map(|b| FacetCount::new(b.as_str(), lookup_count(raw, b.as_str())))
        .collect()
}

/// Zero-fill fee facet counts so every bucket appears, in declaration order.
pub fn fee_facet_counts(raw: &[(String, i64)]) -> Vec<FacetCount> {
    FeeBucket::ALL
        .iter()
        .map(|b| FacetCount::new(b.as_str(), lookup_count(raw, b.as_str())))
        .collect()
}

fn lookup_count(raw: &[(String, i64)], key: &str) -> i64 {
    raw.iter()
        .find(|(k, _)| k == key)
        .map(|(_, c)| *c)
        .unwrap_or(0)
}

/// Normalized, typed filter criteria for one search request.
#[derive(Debug, Clone)]
pub struct FilterCriteria {
    pub cities: Vec<String>,
    pub genders: Vec<String>,
    pub modes: Vec<ModeSelection>,
    pub experience: Option<ExperienceBucket>,
    pub fee_range: Option<FeeBucket>,
    /// Trimmed free-text query; empty means no text filter.
    pub search: String,
    /// 1-based page number.
    pub page: u32,
    /// Page size, clamped to `[1, max_limit]`.
    pub limit: u32,
}

impl FilterCriteria {
    /// Parse criteria from ordered (key, value) query items.
    ///
    /// List-valued parameters (`cities`, `genders`, `modes`) accumulate
    /// across repeated occurrences and split comma-joined values; scalar
    /// parameters take the last occurrence.
    pub fn from_items(items: &[(String, String)], default_limit: u32, max_limit: u32) -> Self {
        let mut cities = Vec::new();
        let mut genders = Vec::new();
        let mut mode_values = Vec::new();
        let mut experience = None;
        let mut fee_range = None;
        let mut search = String::new();
        let mut page = 1;
        let mut limit = default_limit;

        for (key, value) in items {
            match key.as_str() {
                "page" => {
                    page = value
                        .trim()
                        .parse::<i64>()
                        .ok()
                        .filter(|p| *p >= 1)
                        .map(|p| p.min(u32::MAX as i64) as u32)
                        .unwrap_or(1);
                }
                "limit" => {
                    limit = match value.trim().parse::<i64>() {
                        Err(_) | Ok(0) => default_limit,
                        Ok(n) => n.clamp(1, max_limit as i64) as u32,
                    };
                }
                "search" => search = value.trim().to_string(),
                "cities" => extend_list(&mut cities, value),
                "genders" => extend_list(&mut genders, value),
                "modes" => extend_list(&mut mode_values, value),
                "experience" => experience = ExperienceBucket::parse(value.trim()),
                "feeRange" => fee_range = FeeBucket::parse(value.trim()),
                _ => {}
            }
        }

        let modes = mode_values
            .iter()
            .map(|v| ModeSelection::parse(v))
            .collect();

        Self {
            cities,
            genders,
            modes,
            experience,
            fee_range,
            search,
            page,
            limit,
        }
    }

    /// Number of records skipped before the current page window.
    pub fn offset(&self) -> i64 {
        (self.page as i64 - 1) * self.limit as i64
    }

    /// Short queries fall back to substring matching; the indexed text
    /// search produces false negatives below its minimum term length.
    pub fn uses_substring_search(&self) -> bool {
        !self.search.is_empty() && self.search.chars().count() < 3
    }
}

/// Split a possibly comma-joined value, trim elements, drop empties, and
/// append new elements set-wise.
fn extend_list(target: &mut Vec<String>, value: &str) {
    for element in value.split(',') {
        let element = element.trim();
        if element.is_empty() {
            continue;
        }
        if !target.iter().any(|existing| existing == element) {
            target.push(element.to_string());
        }
    }
}
