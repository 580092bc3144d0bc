//! The submissions table model.
//!
//! Builds the column and row shape the owner's submissions view renders:
//! one column per input element of the form, in canvas order, and one
//! row per submission with its collection timestamp.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use formsmith_core::error::FormsmithResult;
use formsmith_fields::element::{parse_content, ElementType};
use formsmith_store::records::{FormRecord, SubmissionRecord};

/// One column of the submissions table: an input element of the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionColumn {
    /// The element id; row values are keyed on it.
    pub id: String,
    /// The element's label, shown as the column header.
    pub label: String,
    /// Whether the element was required.
    pub required: bool,
    /// The element's type.
    pub element_type: ElementType,
}

/// One row of the submissions table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRow {
    /// The submitted values, keyed by element id.
    pub values: HashMap<String, String>,
    /// When the submission was collected.
    pub submitted_at: DateTime<Utc>,
}

/// The full table: columns from the form's content, rows from its
/// submissions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionTable {
    /// Input-element columns in canvas order.
    pub columns: Vec<SubmissionColumn>,
    /// Submission rows, in the order the submissions were passed.
    pub rows: Vec<SubmissionRow>,
}

/// Builds the submissions table for a form.
///
/// Layout elements contribute no column. Row values a column does not
/// cover are kept in the row map untouched.
///
/// # Errors
///
/// Returns a serialization error if the form content or a submission's
/// content cannot be parsed.
pub fn submission_table(
    form: &FormRecord,
    submissions: &[SubmissionRecord],
) -> FormsmithResult<SubmissionTable> {
    let elements = parse_content(&form.content)?;
    let columns = elements
        .iter()
        .filter(|element| element.element_type().is_input())
        .map(|element| SubmissionColumn {
            id: element.id.clone(),
            label: element.kind.label().unwrap_or_default().to_string(),
            required: element.kind.required(),
            element_type: element.element_type(),
        })
        .collect();

    let rows = submissions
        .iter()
        .map(|submission| {
            let values: HashMap<String, String> = serde_json::from_str(&submission.content)?;
            Ok(SubmissionRow {
                values,
                submitted_at: submission.created_at,
            })
        })
        .collect::<FormsmithResult<Vec<_>>>()?;

    Ok(SubmissionTable { columns, rows })
}
