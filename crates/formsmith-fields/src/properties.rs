//! Properties editing for element instances.
//!
//! A [`PropertiesPatch`] carries the complete new attribute set for an
//! element, the way the property panel submits it. [`apply_properties`]
//! validates the patch against the per-type constraints and replaces the
//! element's attributes in place. Separators have no properties and
//! reject every patch.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use formsmith_core::error::ValidationError;

use crate::element::{
    DateAttributes, ElementKind, ElementType, FormElementInstance, InputAttributes,
    ParagraphAttributes, TitleAttributes,
};

/// Label length bounds, shared by all labelled inputs.
const LABEL_MIN: usize = 2;
const LABEL_MAX: usize = 40;
/// Helper text maximum length.
const HELPER_TEXT_MAX: usize = 200;
/// Placeholder maximum length for single-line inputs.
const PLACEHOLDER_MAX: usize = 40;
/// Placeholder maximum length for textareas.
const TEXTAREA_PLACEHOLDER_MAX: usize = 500;
/// Title length bounds.
const TITLE_MIN: usize = 2;
const TITLE_MAX: usize = 40;
/// Paragraph text length bounds.
const TEXT_MIN: usize = 2;
const TEXT_MAX: usize = 500;

/// A complete replacement attribute set for one element.
///
/// The variant must match the target element's kind: `Input` applies to
/// text, number, and textarea fields; `Date`, `Title`, and `Paragraph`
/// to their respective types. Separators accept no patch at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PropertiesPatch {
    /// New attributes for a text, number, or textarea field.
    Input {
        /// The new label.
        label: String,
        /// The new helper text.
        helper_text: String,
        /// Whether the field is required.
        required: bool,
        /// The new placeholder.
        placeholder: String,
    },
    /// New attributes for a date field.
    Date {
        /// The new label.
        label: String,
        /// The new helper text.
        helper_text: String,
        /// Whether the field is required.
        required: bool,
    },
    /// New attributes for a title element.
    Title {
        /// The new heading text.
        title: String,
    },
    /// New attributes for a paragraph element.
    Paragraph {
        /// The new paragraph text.
        text: String,
    },
}

/// Accumulates per-field length-constraint errors.
struct ConstraintCheck {
    field_errors: HashMap<String, Vec<ValidationError>>,
}

impl ConstraintCheck {
    fn new() -> Self {
        Self {
            field_errors: HashMap::new(),
        }
    }

    fn check_min(&mut self, field: &str, value: &str, min: usize) {
        if value.chars().count() < min {
            self.field_errors.entry(field.to_string()).or_default().push(
                ValidationError::new(
                    format!("Ensure this value has at least {min} characters."),
                    "min_length",
                )
                .with_param("min", min.to_string()),
            );
        }
    }

    fn check_max(&mut self, field: &str, value: &str, max: usize) {
        if value.chars().count() > max {
            self.field_errors.entry(field.to_string()).or_default().push(
                ValidationError::new(
                    format!("Ensure this value has at most {max} characters."),
                    "max_length",
                )
                .with_param("max", max.to_string()),
            );
        }
    }

    fn finish(self) -> Result<(), ValidationError> {
        if self.field_errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::with_field_errors(self.field_errors))
        }
    }
}

/// Validates an input patch. `placeholder_max` differs between
/// single-line inputs and textareas.
fn check_input(
    label: &str,
    helper_text: &str,
    placeholder: &str,
    placeholder_max: usize,
) -> Result<(), ValidationError> {
    let mut check = ConstraintCheck::new();
    check.check_min("label", label, LABEL_MIN);
    check.check_max("label", label, LABEL_MAX);
    check.check_max("helper_text", helper_text, HELPER_TEXT_MAX);
    check.check_max("placeholder", placeholder, placeholder_max);
    check.finish()
}

/// Applies a properties patch to an element instance.
///
/// The patch variant must match the element's kind, and every constrained
/// value must satisfy its length bounds. On success the element's
/// attributes are replaced wholesale; on failure the element is left
/// unchanged.
///
/// # Errors
///
/// Returns a `no_properties` error for separators, a `type_mismatch`
/// error when the patch variant does not fit the element, or a compound
/// validation error listing every violated constraint.
pub fn apply_properties(
    instance: &mut FormElementInstance,
    patch: PropertiesPatch,
) -> Result<(), ValidationError> {
    if matches!(instance.kind, ElementKind::SeparatorField) {
        return Err(ValidationError::new(
            "This element has no properties.",
            "no_properties",
        ));
    }

    let element_type = instance.kind.element_type();
    match (element_type, patch) {
        (
            ElementType::TextField | ElementType::NumberField,
            PropertiesPatch::Input {
                label,
                helper_text,
                required,
                placeholder,
            },
        ) => {
            check_input(&label, &helper_text, &placeholder, PLACEHOLDER_MAX)?;
            let attrs = InputAttributes {
                label,
                helper_text,
                required,
                placeholder,
            };
            instance.kind = if element_type == ElementType::TextField {
                ElementKind::TextField(attrs)
            } else {
                ElementKind::NumberField(attrs)
            };
            Ok(())
        }
        (
            ElementType::TextareaField,
            PropertiesPatch::Input {
                label,
                helper_text,
                required,
                placeholder,
            },
        ) => {
            check_input(&label, &helper_text, &placeholder, TEXTAREA_PLACEHOLDER_MAX)?;
            instance.kind = ElementKind::TextareaField(InputAttributes {
                label,
                helper_text,
                required,
                placeholder,
            });
            Ok(())
        }
        (
            ElementType::DateField,
            PropertiesPatch::Date {
                label,
                helper_text,
                required,
            },
        ) => {
            let mut check = ConstraintCheck::new();
            check.check_min("label", &label, LABEL_MIN);
            check.check_max("label", &label, LABEL_MAX);
            check.check_max("helper_text", &helper_text, HELPER_TEXT_MAX);
            check.finish()?;
            instance.kind = ElementKind::DateField(DateAttributes {
                label,
                helper_text,
                required,
            });
            Ok(())
        }
        (ElementType::TitleField, PropertiesPatch::Title { title }) => {
            let mut check = ConstraintCheck::new();
            check.check_min("title", &title, TITLE_MIN);
            check.check_max("title", &title, TITLE_MAX);
            check.finish()?;
            instance.kind = ElementKind::TitleField(TitleAttributes { title });
            Ok(())
        }
        (ElementType::ParagraphField, PropertiesPatch::Paragraph { text }) => {
            let mut check = ConstraintCheck::new();
            check.check_min("text", &text, TEXT_MIN);
            check.check_max("text", &text, TEXT_MAX);
            check.finish()?;
            instance.kind = ElementKind::ParagraphField(ParagraphAttributes { text });
            Ok(())
        }
        _ => Err(ValidationError::new(
            "Patch does not match the element type.",
            "type_mismatch",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementType;
    use crate::registry::construct;

    fn input_patch(label: &str, placeholder: &str) -> PropertiesPatch {
        PropertiesPatch::Input {
            label: label.to_string(),
            helper_text: "Helper".to_string(),
            required: true,
            placeholder: placeholder.to_string(),
        }
    }

    #[test]
    fn test_apply_input_patch() {
        let mut instance = construct(ElementType::TextField, "t1");
        apply_properties(&mut instance, input_patch("Your name", "Jane Doe")).unwrap();
        match &instance.kind {
            ElementKind::TextField(attrs) => {
                assert_eq!(attrs.label, "Your name");
                assert_eq!(attrs.placeholder, "Jane Doe");
                assert!(attrs.required);
            }
            other => panic!("expected TextField, got {other:?}"),
        }
    }

    #[test]
    fn test_label_too_short_rejected() {
        let mut instance = construct(ElementType::TextField, "t1");
        let err = apply_properties(&mut instance, input_patch("x", "ok")).unwrap_err();
        let errors = err.field_errors.get("label").unwrap();
        assert_eq!(errors[0].code, "min_length");
        // The element keeps its defaults
        assert_eq!(instance.kind.label(), Some("Text Field"));
    }

    #[test]
    fn test_label_too_long_rejected() {
        let mut instance = construct(ElementType::NumberField, "n1");
        let long_label = "x".repeat(41);
        let err = apply_properties(&mut instance, input_patch(&long_label, "0")).unwrap_err();
        assert!(err.field_errors.contains_key("label"));
    }

    #[test]
    fn test_textarea_placeholder_allows_500() {
        let mut instance = construct(ElementType::TextareaField, "t1");
        let placeholder = "x".repeat(500);
        assert!(apply_properties(&mut instance, input_patch("Story", &placeholder)).is_ok());
    }

    #[test]
    fn test_text_placeholder_rejects_over_40() {
        let mut instance = construct(ElementType::TextField, "t1");
        let placeholder = "x".repeat(41);
        let err = apply_properties(&mut instance, input_patch("Name", &placeholder)).unwrap_err();
        assert!(err.field_errors.contains_key("placeholder"));
    }

    #[test]
    fn test_multiple_violations_collected() {
        let mut instance = construct(ElementType::TextField, "t1");
        let patch = PropertiesPatch::Input {
            label: "x".to_string(),
            helper_text: "h".repeat(201),
            required: false,
            placeholder: "p".repeat(41),
        };
        let err = apply_properties(&mut instance, patch).unwrap_err();
        assert_eq!(err.field_errors.len(), 3);
    }

    #[test]
    fn test_title_patch() {
        let mut instance = construct(ElementType::TitleField, "h1");
        apply_properties(
            &mut instance,
            PropertiesPatch::Title {
                title: "Customer survey".to_string(),
            },
        )
        .unwrap();
        match &instance.kind {
            ElementKind::TitleField(attrs) => assert_eq!(attrs.title, "Customer survey"),
            other => panic!("expected TitleField, got {other:?}"),
        }
    }

    #[test]
    fn test_paragraph_text_bounds() {
        let mut instance = construct(ElementType::ParagraphField, "p1");
        let err = apply_properties(
            &mut instance,
            PropertiesPatch::Paragraph {
                text: "x".to_string(),
            },
        )
        .unwrap_err();
        assert!(err.field_errors.contains_key("text"));

        assert!(apply_properties(
            &mut instance,
            PropertiesPatch::Paragraph {
                text: "Please answer honestly.".to_string(),
            },
        )
        .is_ok());
    }

    #[test]
    fn test_separator_rejects_patch() {
        let mut instance = construct(ElementType::SeparatorField, "s1");
        let err = apply_properties(
            &mut instance,
            PropertiesPatch::Title {
                title: "anything".to_string(),
            },
        )
        .unwrap_err();
        assert_eq!(err.code, "no_properties");
    }

    #[test]
    fn test_mismatched_patch_rejected() {
        let mut instance = construct(ElementType::TitleField, "h1");
        let err = apply_properties(&mut instance, input_patch("Label", "ph")).unwrap_err();
        assert_eq!(err.code, "type_mismatch");
    }

    #[test]
    fn test_date_patch_has_no_placeholder() {
        let mut instance = construct(ElementType::DateField, "d1");
        apply_properties(
            &mut instance,
            PropertiesPatch::Date {
                label: "Birthday".to_string(),
                helper_text: String::new(),
                required: true,
            },
        )
        .unwrap();
        assert!(instance.kind.required());
        assert_eq!(instance.kind.label(), Some("Birthday"));
    }
}
