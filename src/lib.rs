//! Provider directory search service
//!
//! A read-mostly directory of service providers, searchable and filterable
//! by city, gender, consultation mode, experience range, fee range, and
//! free-text query, with pagination and a detail view. Backed by PostgreSQL
//! with an indexed full-text search over the descriptive fields.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod request_context;
pub mod state;

pub use config::Config;
pub use error::{Error, Result};
pub use state::AppState;
