//! Stored records: forms, submissions, and the form-creation input.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use formsmith_core::error::ValidationError;

/// Form name length bounds.
const NAME_MIN: usize = 4;
const NAME_MAX: usize = 60;
/// Form description maximum length.
const DESCRIPTION_MAX: usize = 500;

/// A stored form.
///
/// `content` is the serialized element list; it defaults to `"[]"` for a
/// freshly created form. `share_url` is the unique public token granting
/// access to the fill-in view once the form is published. Once published,
/// content is not expected to change, though this is not enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormRecord {
    /// The form's id.
    pub id: i64,
    /// The id of the owning actor. Every owner-scoped query filters on it.
    pub owner_id: String,
    /// The form's name.
    pub name: String,
    /// The form's description.
    pub description: String,
    /// The serialized element list.
    pub content: String,
    /// Whether the form accepts public submissions.
    pub published: bool,
    /// The unique public share token.
    pub share_url: String,
    /// How many times the fill-in view was fetched.
    pub visits: i64,
    /// How many submissions were collected.
    pub submissions: i64,
    /// When the form was created.
    pub created_at: DateTime<Utc>,
}

/// A stored submission: a flat element-id to raw-value map serialized as
/// JSON, collected against a published form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    /// The submission's id.
    pub id: i64,
    /// The id of the form this submission belongs to.
    pub form_id: i64,
    /// The serialized element-id to raw-value map.
    pub content: String,
    /// When the submission was collected.
    pub created_at: DateTime<Utc>,
}

/// Input for creating a form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewForm {
    /// The form's name.
    pub name: String,
    /// The form's description.
    #[serde(default)]
    pub description: String,
}

impl NewForm {
    /// Creates a new-form input.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    /// Validates the input: name 4 to 60 characters, description at most
    /// 500.
    ///
    /// # Errors
    ///
    /// Returns a compound validation error listing every violated bound.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut field_errors = std::collections::HashMap::new();
        let name_len = self.name.chars().count();
        if name_len < NAME_MIN {
            field_errors.insert(
                "name".to_string(),
                vec![ValidationError::new(
                    format!("Ensure this value has at least {NAME_MIN} characters."),
                    "min_length",
                )],
            );
        } else if name_len > NAME_MAX {
            field_errors.insert(
                "name".to_string(),
                vec![ValidationError::new(
                    format!("Ensure this value has at most {NAME_MAX} characters."),
                    "max_length",
                )],
            );
        }
        if self.description.chars().count() > DESCRIPTION_MAX {
            field_errors.insert(
                "description".to_string(),
                vec![ValidationError::new(
                    format!("Ensure this value has at most {DESCRIPTION_MAX} characters."),
                    "max_length",
                )],
            );
        }
        if field_errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::with_field_errors(field_errors))
        }
    }
}
