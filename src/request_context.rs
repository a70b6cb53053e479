//! Per-request context shared through request extensions

/// Context attached to each request by the request-id middleware.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: String,
}
