use thiserror::Error;

/// Failure taxonomy for catalog operations.
///
/// The remote client surfaces these verbatim; the loader and detail fetcher
/// propagate them unchanged. There are no retries anywhere in the core.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Transport-level failure (connection, TLS, timeout, non-404 status).
    #[error("network error: {0}")]
    Network(String),

    /// The response arrived but did not have the expected shape.
    #[error("malformed response: {0}")]
    Decode(String),

    /// The upstream API has no entry for the requested id or name.
    #[error("no such entry: {0}")]
    NotFound(String),
}
