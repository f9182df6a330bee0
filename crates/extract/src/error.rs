// ABOUTME: Error types for page extraction.
// ABOUTME: Provides ExtractError with InvalidSelector and InvalidPlan variants.

use std::fmt;
use thiserror::Error;

/// Errors raised while preparing a selection plan.
///
/// Selection itself never fails: a missing element is an empty selection.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// A selector in the plan could not be compiled.
    #[error("invalid selector for {field} ({selector:?}): {reason}")]
    InvalidSelector {
        field: &'static str,
        selector: String,
        reason: String,
    },

    /// A plan file could not be read or deserialized.
    #[error("invalid selection plan: {0}")]
    InvalidPlan(String),
}

impl ExtractError {
    /// Creates an InvalidSelector error from a selector compile failure.
    pub fn invalid_selector(
        field: &'static str,
        selector: impl Into<String>,
        reason: impl fmt::Display,
    ) -> Self {
        ExtractError::InvalidSelector {
            field,
            selector: selector.into(),
            reason: reason.to_string(),
        }
    }

    /// Creates an InvalidPlan error.
    pub fn invalid_plan(reason: impl fmt::Display) -> Self {
        ExtractError::InvalidPlan(reason.to_string())
    }
}
