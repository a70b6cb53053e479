//! Provider record and response types
//!
//! `ProviderRecord` is the directory entity as stored and as returned on the
//! wire (camelCase JSON). Sequence-typed fields are always present; a record
//! never serializes with a missing list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A provider directory entry.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ProviderRecord {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub profile_url: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub experience_years: f64,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    /// Raw consultation-mode labels as imported. No canonicalization is
    /// applied at write time; the search layer buckets these heuristically.
    #[serde(default)]
    pub modes: Vec<String>,
    #[serde(default)]
    pub education: Vec<String>,
    #[serde(default)]
    pub prior_roles: Vec<String>,
    #[serde(default)]
    pub specialties: Vec<String>,
    #[serde(default)]
    pub about: String,
    #[serde(default)]
    pub fees_raw: String,
    #[serde(default)]
    pub fee_amount: f64,
    #[serde(default = "default_currency")]
    pub fee_currency: String,
    pub created_at: DateTime<Utc>,
}

fn default_currency() -> String {
    "PKR".to_string()
}

/// A provider row as produced by the bulk importer, before the store assigns
/// an id and creation timestamp.
#[derive(Debug, Clone, Default)]
pub struct NewProvider {
    pub name: String,
    pub profile_url: String,
    pub gender: String,
    pub city: String,
    pub experience_years: f64,
    pub email: String,
    pub phone: String,
    pub modes: Vec<String>,
    pub education: Vec<String>,
    pub prior_roles: Vec<String>,
    pub specialties: Vec<String>,
    pub about: String,
    pub fees_raw: String,
    pub fee_amount: f64,
    pub fee_currency: String,
}

/// One page of search results plus the page-independent total.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderPage {
    pub page: u32,
    pub limit: u32,
    pub total: i64,
    pub data: Vec<ProviderRecord>,
}

/// One facet bucket: a dimension value and how many records fall into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetCount {
    pub key: String,
    pub count: i64,
}

impl FacetCount {
    pub fn new(key: impl Into<String>, count: i64) -> Self {
        Self {
            key: key.into(),
            count,
        }
    }
}

/// Per-dimension option counts over the entire record set, independent of any
/// currently-applied filters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    pub city_counts: Vec<FacetCount>,
    pub gender_counts: Vec<FacetCount>,
    pub mode_counts: Vec<FacetCount>,
    pub experience_counts: Vec<FacetCount>,
    pub fee_range_counts: Vec<FacetCount>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_serializes_camel_case() {
        let record = ProviderRecord {
            id: Uuid::nil(),
            name: "Dr. Sarah Ahmed".to_string(),
            profile_url: String::new(),
            gender: "Female".to_string(),
            city: "Karachi".to_string(),
            experience_years: 3.0,
            email: String::new(),
            phone: String::new(),
            modes: vec!["In-person".to_string()],
            education: vec![],
            prior_roles: vec![],
            specialties: vec!["Anxiety".to_string()],
            about: String::new(),
            fees_raw: String::new(),
            fee_amount: 2500.0,
            fee_currency: "PKR".to_string(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["experienceYears"], 3.0);
        assert_eq!(json["feeAmount"], 2500.0);
        assert_eq!(json["priorRoles"], serde_json::json!([]));
        assert!(json.get("experience_years").is_none());
    }

    #[test]
    fn page_serializes_with_total_and_data() {
        let page = ProviderPage {
            page: 1,
            limit: 12,
            total: 0,
            data: vec![],
        };
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["page"], 1);
        assert_eq!(json["limit"], 12);
        assert_eq!(json["total"], 0);
        assert_eq!(json["data"], serde_json::json!([]));
    }
}
