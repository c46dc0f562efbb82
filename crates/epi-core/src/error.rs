//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`.

use thiserror::Error;

/// Errors raised by `epi-core` validation and parsing.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("color map `{map}` has no entry for `{value}`")]
    UnmappedDomainValue {
        map:   &'static str,
        value: String,
    },

    #[error("parse error: {0}")]
    Parse(String),
}

/// Shorthand result type for `epi-core`.
pub type CoreResult<T> = Result<T, CoreError>;
