//! Error types for algoscope.

use thiserror::Error;

use crate::algorithm::Category;

/// Result type for algoscope operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised at the boundary of the engine.
///
/// Trace generation itself never fails: empty arrays, unreachable goals and
/// exhausted searches all end in a terminal step. Only name lookup, category
/// dispatch and custom input parsing can be rejected.
#[derive(Debug, Error)]
pub enum Error {
    /// The name does not match any canonical algorithm name.
    #[error("unknown algorithm: {0:?}")]
    UnknownAlgorithm(String),

    /// An algorithm was handed to a builder for a different category.
    #[error("{algorithm} is not one of the {expected}")]
    CategoryMismatch {
        algorithm: String,
        expected: Category,
    },

    /// User supplied input failed validation.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// User supplied JSON could not be parsed.
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}
