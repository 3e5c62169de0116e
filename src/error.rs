//! Crate-level error type
//!
//! The estimation engine itself cannot fail; these errors come from the
//! collaborators around it.

use crate::storage::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Unknown hardware profile: {0}")]
    UnknownProfile(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
