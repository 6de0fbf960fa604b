//! Error types for lpgx.

use std::path::PathBuf;
use thiserror::Error;

/// All errors the library surfaces to callers.
#[derive(Debug, Error)]
pub enum Error {
    /// Decoding this shape of the wire format is not supported in this version.
    #[error("decoding {0} from the element format is not implemented")]
    NotImplemented(&'static str),

    /// A wire-format element is missing a required field or has the wrong shape.
    #[error("malformed element: {0}")]
    MalformedElement(String),

    /// Extraction failed as a whole; there is no partial-graph return.
    #[error("extraction failed: {0}")]
    Extraction(String),

    /// A model snapshot could not be loaded from disk.
    #[error("failed to load model from {path}: {reason}")]
    ModelLoad { path: PathBuf, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
