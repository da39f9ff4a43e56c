//! Tag codec error types.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagError {
    #[error("tag `{key}` holds {found} ({got}) where a {expected} was expected")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        got: &'static str,
        /// The stored value, rendered in SNBT-like notation.
        found: String,
    },
}
