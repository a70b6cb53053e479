//! Domain models - provider records and API response shapes

pub mod provider;

pub use provider::{FacetCount, FilterOptions, NewProvider, ProviderPage, ProviderRecord};
