//! Unified error types for the domain layer
//!
//! Every failure of the derivation engine is reported through [`DomainError`].
//! None of these are defaulted or retried: the derivation is deterministic, so
//! the same inputs always fail the same way.

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required input (ability score, level) is absent
    #[error("Missing input: {0}")]
    MissingInput(String),

    /// A required reference row (race, class, progression row) is absent
    #[error("Missing reference data: {entity_type} ({detail})")]
    MissingReferenceData {
        entity_type: &'static str,
        detail: String,
    },

    /// A value fell outside the ruleset's bounds
    #[error("{field} out of range: {value} (allowed {min}..={max})")]
    InvalidRange {
        field: String,
        value: i64,
        min: i64,
        max: i64,
    },

    /// A modifier names a stat the composer does not recognize
    #[error("Unknown modifier target: {0}")]
    UnknownModifierTarget(String),

    /// Validation failed (e.g., invalid field values)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Parse error (for value objects)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl DomainError {
    pub fn missing_input(input: impl Into<String>) -> Self {
        Self::MissingInput(input.into())
    }

    /// Create a missing reference data error
    pub fn missing_reference(entity_type: &'static str, detail: impl Into<String>) -> Self {
        Self::MissingReferenceData {
            entity_type,
            detail: detail.into(),
        }
    }

    /// A reference row looked up by id that does not exist.
    pub fn missing_row(entity_type: &'static str, id: impl std::fmt::Display) -> Self {
        Self::missing_reference(entity_type, format!("{entity_type} {id} not found"))
    }

    /// Create a range error for `value` against the inclusive bounds `min..=max`.
    pub fn invalid_range(
        field: impl Into<String>,
        value: impl Into<i64>,
        min: impl Into<i64>,
        max: impl Into<i64>,
    ) -> Self {
        Self::InvalidRange {
            field: field.into(),
            value: value.into(),
            min: min.into(),
            max: max.into(),
        }
    }

    pub fn unknown_modifier_target(stat: impl Into<String>) -> Self {
        Self::UnknownModifierTarget(stat.into())
    }

    /// Creates a validation error for business rule violations.
    ///
    /// # Example
    /// ```ignore
    /// if name.trim().is_empty() {
    ///     return Err(DomainError::validation("Character name cannot be empty"));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Creates a parse error for string-to-type conversion failures.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}

/// Checks that `value` lies within `min..=max`.
pub(crate) fn ensure_range(field: &str, value: i32, min: i32, max: i32) -> Result<i32, DomainError> {
    ensure_wide_range(field, i64::from(value), min, max)
}

/// Checks a sum computed in `i64` lies within `min..=max` and narrows it.
pub(crate) fn ensure_wide_range(field: &str, value: i64, min: i32, max: i32) -> Result<i32, DomainError> {
    match i32::try_from(value) {
        Ok(narrow) if (min..=max).contains(&narrow) => Ok(narrow),
        _ => Err(DomainError::invalid_range(field, value, min, max)),
    }
}

/// Narrows a derived stat back to `i32`, failing instead of wrapping.
pub(crate) fn fit_stat(field: &str, value: i64) -> Result<i32, DomainError> {
    ensure_wide_range(field, value, i32::MIN, i32::MAX)
}
