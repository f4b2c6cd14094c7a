use thiserror::Error;

/// Errors that can occur when talking to the region store
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The store could not be opened from its connection string
    #[error("Failed to open region store at {url}: {message}")]
    Open { url: String, message: String },

    /// A query failed to prepare, execute, or decode
    #[error("Query error: {0}")]
    Query(String),

    /// The connection mutex was poisoned by a panicking query
    #[error("Region store connection is poisoned")]
    Poisoned,

    /// The blocking task running the query did not complete
    #[error("Store task failed: {0}")]
    Task(String),
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::Query(err.to_string())
    }
}

/// Errors returned by the gallery API.
///
/// Each variant maps to exactly one HTTP status in the server layer.
#[derive(Debug, Clone, Error)]
pub enum GalleryError {
    /// No region segment in the request path (400)
    #[error("Missing region")]
    MissingRegion,

    /// Path has fewer segments than the route requires (400)
    #[error("Invalid path")]
    InvalidPath,

    /// Region not allow-listed, traversal marker present, or the
    /// allow-list lookup failed (403)
    #[error("Forbidden")]
    Forbidden,

    /// Region is allow-listed but its directory is missing or unreadable (404)
    #[error("Region not found: {region}")]
    RegionNotFound { region: String },

    /// Store failure while listing regions (500)
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}
