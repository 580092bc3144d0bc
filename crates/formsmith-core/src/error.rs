//! Core error types for formsmith.
//!
//! This module provides the [`FormsmithError`] enum covering HTTP errors,
//! store errors, validation errors, and configuration errors, along with
//! the structured [`ValidationError`] type used by the field registry and
//! the form-creation schema.

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

/// Represents a validation error with optional field-level errors.
///
/// Validation errors can be either simple (a single message) or compound
/// (containing per-field error lists). The field registry uses the compound
/// form when a properties patch violates more than one constraint.
///
/// # Examples
///
/// ```
/// use formsmith_core::error::ValidationError;
///
/// // Simple validation error
/// let err = ValidationError::new("This field is required.", "required");
///
/// // Field-level validation errors
/// let mut field_errors = std::collections::HashMap::new();
/// field_errors.insert(
///     "label".to_string(),
///     vec![ValidationError::new("Label is too short.", "min_length")],
/// );
/// let err = ValidationError::with_field_errors(field_errors);
/// ```
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// The primary error message.
    pub message: String,
    /// A short code identifying the type of validation failure (e.g. "required", "min_length").
    pub code: String,
    /// Additional parameters providing context for the error message.
    pub params: HashMap<String, String>,
    /// Per-field validation errors, keyed by field name.
    pub field_errors: HashMap<String, Vec<Self>>,
}

impl ValidationError {
    /// Creates a new `ValidationError` with a message and code.
    pub fn new(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: code.into(),
            params: HashMap::new(),
            field_errors: HashMap::new(),
        }
    }

    /// Creates a `ValidationError` containing per-field errors.
    pub fn with_field_errors(field_errors: HashMap<String, Vec<Self>>) -> Self {
        Self {
            message: String::new(),
            code: String::new(),
            params: HashMap::new(),
            field_errors,
        }
    }

    /// Adds a parameter to this validation error.
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.message.is_empty() {
            write!(f, "{}", self.message)?;
        } else if !self.field_errors.is_empty() {
            let mut first = true;
            for (field, errors) in &self.field_errors {
                for error in errors {
                    if !first {
                        write!(f, "; ")?;
                    }
                    write!(f, "{field}: {error}")?;
                    first = false;
                }
            }
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// The primary error type for formsmith.
///
/// Each variant maps to an appropriate HTTP status code via
/// [`FormsmithError::status_code`]. The two failure kinds that dominate the
/// public surface are [`ActorNotResolved`](Self::ActorNotResolved)
/// (unauthenticated access to an owner-only operation) and
/// [`NotFound`](Self::NotFound) (missing form, element, or share token).
#[derive(Error, Debug)]
pub enum FormsmithError {
    // ── HTTP errors ──────────────────────────────────────────────────

    /// HTTP 400 Bad Request.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// No actor could be resolved for an owner-only operation. HTTP 401.
    #[error("Actor not resolved: {0}")]
    ActorNotResolved(String),

    /// The referenced entity does not exist. HTTP 404.
    ///
    /// Also covers ownership misses: queries filter on the actor's id, so a
    /// form belonging to someone else is indistinguishable from no form.
    #[error("Not found: {0}")]
    NotFound(String),

    /// HTTP 500 Internal Server Error.
    #[error("Internal server error: {0}")]
    InternalServerError(String),

    // ── Store errors ─────────────────────────────────────────────────

    /// A generic database error.
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// An operational store error (open failure, pragma failure, etc.).
    #[error("Operational error: {0}")]
    OperationalError(String),

    // ── Validation ───────────────────────────────────────────────────

    /// One or more fields failed validation.
    #[error("Validation error: {0}")]
    ValidationError(ValidationError),

    // ── Configuration ────────────────────────────────────────────────

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    // ── Serialization ────────────────────────────────────────────────

    /// An error occurred during serialization or deserialization.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // ── IO ───────────────────────────────────────────────────────────

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl FormsmithError {
    /// Returns the HTTP status code associated with this error.
    ///
    /// - `BadRequest`, `ValidationError` -> 400
    /// - `ActorNotResolved` -> 401
    /// - `NotFound` -> 404
    /// - Everything else -> 500
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::BadRequest(_) | Self::ValidationError(_) => 400,
            Self::ActorNotResolved(_) => 401,
            Self::NotFound(_) => 404,
            Self::InternalServerError(_)
            | Self::DatabaseError(_)
            | Self::OperationalError(_)
            | Self::ConfigurationError(_)
            | Self::SerializationError(_)
            | Self::IoError(_) => 500,
        }
    }
}

impl From<ValidationError> for FormsmithError {
    fn from(err: ValidationError) -> Self {
        Self::ValidationError(err)
    }
}

impl From<serde_json::Error> for FormsmithError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

/// A convenience type alias for `Result<T, FormsmithError>`.
pub type FormsmithResult<T> = Result<T, FormsmithError>;
