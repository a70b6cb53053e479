//! Storage trait for the provider directory

use crate::{
    db::search::FilterCriteria,
    models::{FilterOptions, NewProvider, ProviderPage, ProviderRecord},
    Result,
};
use async_trait::async_trait;
use uuid::Uuid;

/// Read-mostly storage operations backing the directory API.
///
/// The production backend is PostgreSQL; tests supply an in-memory
/// implementation. Handlers receive the store as an explicitly constructed
/// handle on `AppState` rather than through any ambient global.
#[async_trait]
pub trait ProviderStore: Send + Sync {
    /// Run the filtered, paginated search and report the page-independent
    /// total.
    async fn search(&self, criteria: &FilterCriteria) -> Result<ProviderPage>;

    /// Fetch a single record by id.
    async fn get(&self, id: Uuid) -> Result<Option<ProviderRecord>>;

    /// Per-dimension option counts over the entire record set, independent
    /// of any filters.
    async fn filter_options(&self) -> Result<FilterOptions>;

    /// Replace the whole collection with freshly imported records, returning
    /// the number inserted. Used by the bulk importer only.
    async fn replace_all(&self, records: Vec<NewProvider>) -> Result<u64>;
}
