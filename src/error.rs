//! Typed errors for search criteria handling.
//!
//! Transport failures stay as `anyhow::Error` (they are only ever rendered into
//! a user message), while criteria problems get a dedicated enum so callers can
//! react to them before any request is made.

use crate::search::types::CriteriaField;
use thiserror::Error;

/// Rejection of user-supplied search criteria.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The text typed into a field cannot be parsed into that field's type.
    #[error("Invalid value {value:?} for {field}")]
    InvalidValue { field: CriteriaField, value: String },

    /// A min/max pair where the lower bound exceeds the upper bound.
    #[error("Minimum {field} is greater than the maximum")]
    InvertedRange { field: &'static str },
}

/// A specialized `Result` type for criteria validation.
pub type Result<T> = std::result::Result<T, ValidationError>;
