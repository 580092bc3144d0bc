//! Element types and instances.
//!
//! A form is an ordered list of [`FormElementInstance`]s. Each instance
//! carries an opaque id (unique within the form) and an [`ElementKind`]
//! holding the type-specific attribute bag. The enumeration of element
//! types is closed: unknown tags fail deserialization.
//!
//! The serialized shape matches the stored content format:
//! `{"id": ..., "type": ..., "extraAttributes": {...}}` with camelCase
//! attribute keys. A separator carries no attribute bag at all.

use serde::{Deserialize, Serialize};

use formsmith_core::error::FormsmithError;

/// The closed set of element types a form can contain.
///
/// Input types (`TextField`, `NumberField`, `TextareaField`, `DateField`)
/// collect a value at submit time; layout types (`TitleField`,
/// `ParagraphField`, `SeparatorField`) are presentational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementType {
    /// A single-line text input.
    TextField,
    /// A heading displayed above other elements.
    TitleField,
    /// A block of static text.
    ParagraphField,
    /// A horizontal rule between elements.
    SeparatorField,
    /// A numeric input.
    NumberField,
    /// A multi-line text input.
    TextareaField,
    /// A date picker input.
    DateField,
}

impl ElementType {
    /// All element types, in palette order.
    pub const ALL: [Self; 7] = [
        Self::TextField,
        Self::TitleField,
        Self::ParagraphField,
        Self::SeparatorField,
        Self::NumberField,
        Self::TextareaField,
        Self::DateField,
    ];

    /// Returns `true` if this type collects a value at submit time.
    pub const fn is_input(self) -> bool {
        matches!(
            self,
            Self::TextField | Self::NumberField | Self::TextareaField | Self::DateField
        )
    }
}

impl std::fmt::Display for ElementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::TextField => "TextField",
            Self::TitleField => "TitleField",
            Self::ParagraphField => "ParagraphField",
            Self::SeparatorField => "SeparatorField",
            Self::NumberField => "NumberField",
            Self::TextareaField => "TextareaField",
            Self::DateField => "DateField",
        };
        write!(f, "{name}")
    }
}

/// Attributes shared by the text-like inputs (text, number, textarea).
///
/// The serialized keys are camelCase to match the stored content format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputAttributes {
    /// The label displayed above the input.
    pub label: String,
    /// Helper text displayed below the input.
    #[serde(rename = "helperText")]
    pub helper_text: String,
    /// Whether a non-empty value is required at submit time.
    pub required: bool,
    /// Placeholder text shown in the empty input.
    #[serde(rename = "placeHolder")]
    pub placeholder: String,
}

/// Attributes for a date input. Dates have no placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateAttributes {
    /// The label displayed above the input.
    pub label: String,
    /// Helper text displayed below the input.
    #[serde(rename = "helperText")]
    pub helper_text: String,
    /// Whether a non-empty value is required at submit time.
    pub required: bool,
}

/// Attributes for a title element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleAttributes {
    /// The heading text.
    pub title: String,
}

/// Attributes for a paragraph element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParagraphAttributes {
    /// The paragraph text.
    pub text: String,
}

/// The type tag plus the type-specific attribute bag of an element.
///
/// Serialized adjacently tagged as `"type"` / `"extraAttributes"`, so a
/// text field becomes
/// `{"type": "TextField", "extraAttributes": {"label": ..., ...}}` and a
/// separator becomes just `{"type": "SeparatorField"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "extraAttributes")]
pub enum ElementKind {
    /// A single-line text input.
    TextField(InputAttributes),
    /// A heading.
    TitleField(TitleAttributes),
    /// Static text.
    ParagraphField(ParagraphAttributes),
    /// A horizontal rule. Carries no attributes.
    SeparatorField,
    /// A numeric input.
    NumberField(InputAttributes),
    /// A multi-line text input.
    TextareaField(InputAttributes),
    /// A date picker.
    DateField(DateAttributes),
}

impl ElementKind {
    /// Returns the element type tag for this kind.
    pub const fn element_type(&self) -> ElementType {
        match self {
            Self::TextField(_) => ElementType::TextField,
            Self::TitleField(_) => ElementType::TitleField,
            Self::ParagraphField(_) => ElementType::ParagraphField,
            Self::SeparatorField => ElementType::SeparatorField,
            Self::NumberField(_) => ElementType::NumberField,
            Self::TextareaField(_) => ElementType::TextareaField,
            Self::DateField(_) => ElementType::DateField,
        }
    }

    /// Returns the label of an input element, or `None` for layout elements.
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::TextField(attrs) | Self::NumberField(attrs) | Self::TextareaField(attrs) => {
                Some(&attrs.label)
            }
            Self::DateField(attrs) => Some(&attrs.label),
            Self::TitleField(_) | Self::ParagraphField(_) | Self::SeparatorField => None,
        }
    }

    /// Returns `true` if this element requires a non-empty value at submit
    /// time. Layout elements are never required.
    pub const fn required(&self) -> bool {
        match self {
            Self::TextField(attrs) | Self::NumberField(attrs) | Self::TextareaField(attrs) => {
                attrs.required
            }
            Self::DateField(attrs) => attrs.required,
            Self::TitleField(_) | Self::ParagraphField(_) | Self::SeparatorField => false,
        }
    }
}

/// A single placed element in a form.
///
/// Identity is `id`, unique within the form; order is carried by the
/// element's position in the content list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormElementInstance {
    /// Opaque id, unique within the form.
    pub id: String,
    /// The type tag and attribute bag.
    #[serde(flatten)]
    pub kind: ElementKind,
}

impl FormElementInstance {
    /// Returns the element type tag.
    pub const fn element_type(&self) -> ElementType {
        self.kind.element_type()
    }
}

/// Parses stored form content into an element list.
///
/// # Errors
///
/// Returns a serialization error if the content is not a valid element
/// list (malformed JSON or an unknown type tag).
pub fn parse_content(content: &str) -> Result<Vec<FormElementInstance>, FormsmithError> {
    Ok(serde_json::from_str(content)?)
}

/// Serializes an element list into the stored content format.
///
/// # Errors
///
/// Returns a serialization error if the list cannot be encoded.
pub fn serialize_content(elements: &[FormElementInstance]) -> Result<String, FormsmithError> {
    Ok(serde_json::to_string(elements)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::construct;

    #[test]
    fn test_element_type_display() {
        assert_eq!(ElementType::TextField.to_string(), "TextField");
        assert_eq!(ElementType::SeparatorField.to_string(), "SeparatorField");
    }

    #[test]
    fn test_element_type_is_input() {
        assert!(ElementType::TextField.is_input());
        assert!(ElementType::NumberField.is_input());
        assert!(ElementType::TextareaField.is_input());
        assert!(ElementType::DateField.is_input());
        assert!(!ElementType::TitleField.is_input());
        assert!(!ElementType::ParagraphField.is_input());
        assert!(!ElementType::SeparatorField.is_input());
    }

    #[test]
    fn test_serialize_text_field_wire_format() {
        let instance = construct(ElementType::TextField, "a1b2c3d4");
        let json = serde_json::to_value(&instance).unwrap();
        assert_eq!(json["id"], "a1b2c3d4");
        assert_eq!(json["type"], "TextField");
        assert_eq!(json["extraAttributes"]["label"], "Text Field");
        assert_eq!(json["extraAttributes"]["helperText"], "Helper Text");
        assert_eq!(json["extraAttributes"]["placeHolder"], "Value here...");
        assert_eq!(json["extraAttributes"]["required"], false);
    }

    #[test]
    fn test_serialize_separator_has_no_attributes() {
        let instance = construct(ElementType::SeparatorField, "s1");
        let json = serde_json::to_value(&instance).unwrap();
        assert_eq!(json["type"], "SeparatorField");
        assert!(json.get("extraAttributes").is_none());
    }

    #[test]
    fn test_deserialize_stored_content() {
        let content = r#"[
            {"id":"4021","type":"TitleField","extraAttributes":{"title":"Survey"}},
            {"id":"817","type":"SeparatorField"},
            {"id":"5530","type":"NumberField","extraAttributes":{
                "label":"Age","helperText":"In years","required":true,"placeHolder":"0"}}
        ]"#;
        let elements = parse_content(content).unwrap();
        assert_eq!(elements.len(), 3);
        assert_eq!(elements[0].element_type(), ElementType::TitleField);
        assert_eq!(elements[1].element_type(), ElementType::SeparatorField);
        match &elements[2].kind {
            ElementKind::NumberField(attrs) => {
                assert_eq!(attrs.label, "Age");
                assert!(attrs.required);
            }
            other => panic!("expected NumberField, got {other:?}"),
        }
    }

    #[test]
    fn test_deserialize_unknown_type_fails() {
        let content = r#"[{"id":"1","type":"CheckboxField","extraAttributes":{}}]"#;
        assert!(parse_content(content).is_err());
    }

    #[test]
    fn test_content_roundtrip_preserves_order() {
        let elements = vec![
            construct(ElementType::TitleField, "t1"),
            construct(ElementType::TextField, "t2"),
            construct(ElementType::DateField, "t3"),
        ];
        let content = serialize_content(&elements).unwrap();
        let parsed = parse_content(&content).unwrap();
        assert_eq!(parsed, elements);
    }

    #[test]
    fn test_kind_label_and_required() {
        let text = construct(ElementType::TextField, "a");
        assert_eq!(text.kind.label(), Some("Text Field"));
        assert!(!text.kind.required());

        let separator = construct(ElementType::SeparatorField, "b");
        assert_eq!(separator.kind.label(), None);
        assert!(!separator.kind.required());
    }
}
