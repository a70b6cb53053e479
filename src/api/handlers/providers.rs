//! Provider endpoints
//!
//! - `GET /providers` - filtered, paginated list
//! - `GET /providers/{id}` - detail view
//! - `GET /providers/_filters/options` - per-dimension option counts

use crate::{
    db::search::FilterCriteria,
    models::{FilterOptions, ProviderPage, ProviderRecord},
    state::AppState,
    Error, Result,
};
use axum::{
    extract::{Path, RawQuery, State},
    Json,
};
use uuid::Uuid;

/// List providers matching the given filter, search, and page parameters.
///
/// The raw query string is parsed directly so repeated list parameters
/// (`cities=Karachi&cities=Lahore`) survive alongside the comma-joined form.
pub async fn list_providers(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Json<ProviderPage>> {
    let items = query_items(query.as_deref());
    let criteria = FilterCriteria::from_items(
        &items,
        state.config.search.default_page_size,
        state.config.search.max_page_size,
    );

    tracing::debug!(
        page = criteria.page,
        limit = criteria.limit,
        search = %criteria.search,
        cities = criteria.cities.len(),
        "Provider search"
    );

    let page = state.store.search(&criteria).await?;
    Ok(Json(page))
}

/// Fetch a single provider by id.
pub async fn get_provider(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProviderRecord>> {
    let id = Uuid::parse_str(id.trim()).map_err(|_| Error::InvalidId(id.clone()))?;

    match state.store.get(id).await? {
        Some(record) => Ok(Json(record)),
        None => Err(Error::NotFound),
    }
}

/// Option counts for every filter dimension, computed over the full record
/// set regardless of any active filters.
pub async fn filter_options(State(state): State<AppState>) -> Result<Json<FilterOptions>> {
    let options = state.store.filter_options().await?;
    Ok(Json(options))
}

fn query_items(raw: Option<&str>) -> Vec<(String, String)> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    url::form_urlencoded::parse(raw.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_items_preserves_repeats_and_decodes() {
        let items = query_items(Some("cities=Karachi&cities=Lahore&search=Dr.%20Sarah"));
        assert_eq!(
            items,
            vec![
                ("cities".to_string(), "Karachi".to_string()),
                ("cities".to_string(), "Lahore".to_string()),
                ("search".to_string(), "Dr. Sarah".to_string()),
            ]
        );
    }

    #[test]
    fn query_items_handles_missing_query() {
        assert!(query_items(None).is_empty());
    }
}
