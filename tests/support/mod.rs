#![allow(dead_code)]

pub mod fixtures;

use anyhow::Context as _;
use async_trait::async_trait;
use axum::{
    body::{Body, Bytes},
    http::{HeaderMap, Method, Request, StatusCode},
    Router,
};
use shifa::{
    api::create_router,
    db::search::{
        criteria::{experience_facet_counts, fee_facet_counts, ExperienceBucket, FeeBucket},
        modes::consolidate_mode_counts,
        FilterCriteria,
    },
    db::ProviderStore,
    models::{FacetCount, FilterOptions, NewProvider, ProviderPage, ProviderRecord},
    AppState, Config,
};
use std::sync::Arc;
use tower::ServiceExt as _;
use uuid::Uuid;

/// In-memory `ProviderStore` used by the API tests.
///
/// Matching is built from the crate's bucket/mode predicate helpers so this
/// backend tracks the SQL semantics instead of restating them.
pub struct InMemoryProviderStore {
    records: Vec<ProviderRecord>,
}

impl InMemoryProviderStore {
    pub fn new(mut records: Vec<ProviderRecord>) -> Self {
        records.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Self { records }
    }

    fn matches(&self, record: &ProviderRecord, criteria: &FilterCriteria) -> bool {
        if !criteria.cities.is_empty() && !criteria.cities.contains(&record.city) {
            return false;
        }
        if !criteria.genders.is_empty() && !criteria.genders.contains(&record.gender) {
            return false;
        }
        if !criteria.modes.is_empty() {
            let any_mode = criteria.modes.iter().any(|selection| {
                selection
                    .match_values()
                    .iter()
                    .any(|v| record.modes.contains(v))
            });
            if !any_mode {
                return false;
            }
        }
        if let Some(bucket) = criteria.experience {
            if !bucket.contains(record.experience_years) {
                return false;
            }
        }
        if let Some(bucket) = criteria.fee_range {
            if !bucket.contains(record.fee_amount) {
                return false;
            }
        }
        if !criteria.search.is_empty() && !self.search_matches(record, criteria) {
            return false;
        }
        true
    }

    fn search_matches(&self, record: &ProviderRecord, criteria: &FilterCriteria) -> bool {
        let haystacks = searchable_fields(record);
        if criteria.uses_substring_search() {
            let needle = criteria.search.to_lowercase();
            return haystacks.iter().any(|h| h.contains(&needle));
        }
        // Term-wise OR, the text-search contract of the list endpoint.
        criteria
            .search
            .split_whitespace()
            .map(str::to_lowercase)
            .any(|term| haystacks.iter().any(|h| h.contains(&term)))
    }
}

fn searchable_fields(record: &ProviderRecord) -> Vec<String> {
    let mut fields = vec![record.name.to_lowercase(), record.about.to_lowercase()];
    fields.extend(record.specialties.iter().map(|s| s.to_lowercase()));
    fields.extend(record.education.iter().map(|s| s.to_lowercase()));
    fields
}

#[async_trait]
impl ProviderStore for InMemoryProviderStore {
    async fn search(&self, criteria: &FilterCriteria) -> shifa::Result<ProviderPage> {
        let matched: Vec<&ProviderRecord> = self
            .records
            .iter()
            .filter(|r| self.matches(r, criteria))
            .collect();

        let total = matched.len() as i64;
        let data = matched
            .into_iter()
            .skip(criteria.offset() as usize)
            .take(criteria.limit as usize)
            .cloned()
            .collect();

        Ok(ProviderPage {
            page: criteria.page,
            limit: criteria.limit,
            total,
            data,
        })
    }

    async fn get(&self, id: Uuid) -> shifa::Result<Option<ProviderRecord>> {
        Ok(self.records.iter().find(|r| r.id == id).cloned())
    }

    async fn filter_options(&self) -> shifa::Result<FilterOptions> {
        let city_counts = grouped_desc(self.records.iter().map(|r| r.city.clone()));
        let gender_counts = grouped_desc(self.records.iter().map(|r| r.gender.clone()));

        let raw_mode_counts =
            grouped(self.records.iter().flat_map(|r| r.modes.iter().cloned()));
        let mode_counts = consolidate_mode_counts(&raw_mode_counts);

        let experience_raw = grouped(self.records.iter().map(|r| {
            ExperienceBucket::ALL
                .iter()
                .find(|b| b.contains(r.experience_years))
                .map(|b| b.as_str().to_string())
                .unwrap_or_default()
        }));
        let experience_counts = experience_facet_counts(&experience_raw);

        let fee_raw = grouped(self.records.iter().map(|r| {
            FeeBucket::ALL
                .iter()
                .find(|b| b.contains(r.fee_amount))
                .map(|b| b.as_str().to_string())
                .unwrap_or_default()
        }));
        let fee_range_counts = fee_facet_counts(&fee_raw);

        Ok(FilterOptions {
            city_counts,
            gender_counts,
            mode_counts,
            experience_counts,
            fee_range_counts,
        })
    }

    async fn replace_all(&self, _records: Vec<NewProvider>) -> shifa::Result<u64> {
        unimplemented!("the API tests never import")
    }
}

fn grouped(values: impl Iterator<Item = String>) -> Vec<(String, i64)> {
    let mut counts: Vec<(String, i64)> = Vec::new();
    for value in values {
        match counts.iter_mut().find(|(k, _)| *k == value) {
            Some((_, c)) => *c += 1,
            None => counts.push((value, 1)),
        }
    }
    counts
}

fn grouped_desc(values: impl Iterator<Item = String>) -> Vec<FacetCount> {
    let mut counts = grouped(values);
    counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    counts
        .into_iter()
        .map(|(key, count)| FacetCount::new(key, count))
        .collect()
}

pub struct TestApp {
    pub router: Router,
}

impl TestApp {
    pub fn new(records: Vec<ProviderRecord>) -> Self {
        let store = Arc::new(InMemoryProviderStore::new(records));
        let state = AppState::with_store(Config::default(), store);
        Self {
            router: create_router(state),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub async fn request(
        &self,
        method: Method,
        path_and_query: &str,
    ) -> anyhow::Result<(StatusCode, HeaderMap, Bytes)> {
        let request = Request::builder()
            .method(method)
            .uri(path_and_query)
            .header("host", "example.org")
            .body(Body::empty())
            .context("build request")?;

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .context("dispatch request")?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .context("read response body")?;

        Ok((status, headers, body))
    }

    pub async fn get_json(
        &self,
        path_and_query: &str,
    ) -> anyhow::Result<(StatusCode, serde_json::Value)> {
        let (status, _headers, body) = self.request(Method::GET, path_and_query).await?;
        let json = serde_json::from_slice(&body)
            .with_context(|| format!("parse JSON body for {path_and_query}"))?;
        Ok((status, json))
    }
}

/// Names of the `data` entries in a list response, in order.
pub fn result_names(body: &serde_json::Value) -> Vec<String> {
    body["data"]
        .as_array()
        .map(|entries| {
            entries
                .iter()
                .filter_map(|e| e["name"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

/// Find one facet entry by key.
pub fn facet_count(body: &serde_json::Value, facet: &str, key: &str) -> Option<i64> {
    body[facet].as_array().and_then(|entries| {
        entries
            .iter()
            .find(|e| e["key"] == key)
            .and_then(|e| e["count"].as_i64())
    })
}
