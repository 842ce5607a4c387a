//! Error types for hotspot

use thiserror::Error;

/// Result type alias for hotspot operations
pub type Result<T> = std::result::Result<T, HotspotError>;

/// Hotspot error types
#[derive(Error, Debug)]
pub enum HotspotError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No such binding: {0}")]
    NoSuchBinding(String),

    #[error("No registry for document {0}")]
    NoSuchDocument(usize),

    #[error("{0}")]
    Message(String),
}
