//! Error types

use thiserror::Error;

/// A weather mode key that is not part of the catalog
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown weather mode: {0:?}")]
pub struct UnknownModeError(pub String);

/// Failure to decode a `/{path}/data` payload
#[derive(Error, Debug)]
pub enum PayloadError {
    #[error("malformed map payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("map payload has an empty bounding box")]
    EmptyBbox,
}
