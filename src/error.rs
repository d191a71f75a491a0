//! Error types for the library

use thiserror::Error;

/// Errors raised while constructing a filter.
///
/// Probe positions are always reduced modulo a non-zero capacity, so once a
/// filter exists none of its operations can fail.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BloomError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl BloomError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        BloomError::InvalidParameter(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, BloomError>;
