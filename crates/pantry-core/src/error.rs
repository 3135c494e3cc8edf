//! # Error Types
//!
//! Domain-specific error types for pantry-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  pantry-core errors (this file)                                        │
//! │  ├── ValidationError  - One rule failure on one field                  │
//! │  ├── FieldErrors      - Field-keyed set of ValidationErrors            │
//! │  └── CoreError        - Domain outcomes (not found, nothing pending)   │
//! │                                                                         │
//! │  pantry-db errors (separate crate)                                     │
//! │  └── DbError          - Store failures                                 │
//! │                                                                         │
//! │  API errors (apps/api)                                                 │
//! │  └── ApiError         - What HTTP callers see (serialized)             │
//! │                                                                         │
//! │  Flow: ValidationError → FieldErrors → CoreError → ApiError → Client   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Validators never panic on bad input, they return `FieldErrors`
//! 3. Every failing field is reported, one message per field
//! 4. Field keys are the JSON input names, plus `general`

use std::collections::BTreeMap;
use std::fmt;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use thiserror::Error;

/// Field key used for errors that are not tied to a single input field.
pub const GENERAL_FIELD: &str = "general";

// =============================================================================
// Validation Error
// =============================================================================

/// A single rule failure on a single input field.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: f64, max: f64 },

    /// Value must be positive.
    #[error("{field} must be greater than 0")]
    MustBePositive { field: String },

    /// Invalid format (e.g., not a number, bad date, illegal characters).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// A rule that relates this field to another field or to the clock.
    #[error("{field} {reason}")]
    RuleViolated { field: String, reason: String },

    /// Failure not attributable to one field (e.g. malformed request body).
    #[error("{0}")]
    General(String),
}

impl ValidationError {
    /// Returns the input field this error belongs to.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooShort { field, .. }
            | ValidationError::TooLong { field, .. }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::MustBePositive { field }
            | ValidationError::InvalidFormat { field, .. }
            | ValidationError::NotAllowed { field, .. }
            | ValidationError::RuleViolated { field, .. } => field,
            ValidationError::General(_) => GENERAL_FIELD,
        }
    }

    pub(crate) fn required(field: &str) -> Self {
        ValidationError::Required {
            field: field.to_string(),
        }
    }

    pub(crate) fn invalid_format(field: &str, reason: &str) -> Self {
        ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn rule(field: &str, reason: &str) -> Self {
        ValidationError::RuleViolated {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn not_allowed(field: &str, allowed: &[&str]) -> Self {
        ValidationError::NotAllowed {
            field: field.to_string(),
            allowed: allowed.iter().map(|s| s.to_string()).collect(),
        }
    }
}

// =============================================================================
// Field Errors
// =============================================================================

/// Field-keyed collection of validation failures.
///
/// Holds at most one error per field: the first rule that fails on a field
/// is the one reported, matching how a form shows one message per input.
///
/// ## Serialization
/// ```json
/// { "name": "name is required", "quantity": "quantity must be greater than 0" }
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors {
    errors: BTreeMap<String, ValidationError>,
}

impl FieldErrors {
    /// Creates an empty error set.
    pub fn new() -> Self {
        FieldErrors::default()
    }

    /// Creates an error set holding a single `general` error.
    pub fn general(message: impl Into<String>) -> Self {
        let mut errors = FieldErrors::new();
        errors.add(ValidationError::General(message.into()));
        errors
    }

    /// Records an error. Keeps the earlier error if the field already failed.
    pub fn add(&mut self, err: ValidationError) {
        self.errors.entry(err.field().to_string()).or_insert(err);
    }

    /// Records the error of a failed check, if any.
    pub fn check<T>(&mut self, result: Result<T, ValidationError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.add(err);
                None
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns the error recorded for `field`.
    pub fn get(&self, field: &str) -> Option<&ValidationError> {
        self.errors.get(field)
    }

    /// Returns true if `field` failed validation.
    pub fn contains(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    /// Iterates over failing field names in sorted order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.errors.keys().map(String::as_str)
    }

    /// Iterates over all recorded errors.
    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.errors.values()
    }

    /// Converts to `Err(self)` when any error was recorded.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl From<ValidationError> for FieldErrors {
    fn from(err: ValidationError) -> Self {
        let mut errors = FieldErrors::new();
        errors.add(err);
        errors
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.errors.values().map(|e| e.to_string()).collect();
        write!(f, "{}", messages.join(", "))
    }
}

impl std::error::Error for FieldErrors {}

impl Serialize for FieldErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.errors.len()))?;
        for (field, err) in &self.errors {
            map.serialize_entry(field, &err.to_string())?;
        }
        map.end()
    }
}

// =============================================================================
// Core Error
// =============================================================================

/// Domain outcomes that stop a lifecycle operation.
///
/// Everything here is an expected, recoverable result. Store failures are
/// not domain errors and live in `pantry-db`.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Candidate record failed validation.
    #[error("Validation failed: {0}")]
    Validation(#[from] FieldErrors),

    /// No record with this id exists in the catalog.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Bulk purchase found nothing pending.
    #[error("No pending items to purchase")]
    NoPendingItems,

    /// Record changed since the caller read it.
    ///
    /// Reserved for version-checked writes; no operation raises it yet.
    #[error("{entity} {id} was modified concurrently (expected version {expected}, found {actual})")]
    Conflict {
        entity: &'static str,
        id: String,
        expected: i64,
        actual: i64,
    },
}

impl CoreError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        CoreError::NotFound {
            entity,
            id: id.into(),
        }
    }
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
