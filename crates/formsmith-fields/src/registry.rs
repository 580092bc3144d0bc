//! The field registry: closed-set dispatch over element types.
//!
//! Each element type has a constructor producing an instance with its
//! default attributes, a validator, and a palette descriptor for the
//! designer sidebar. Dispatch is a `match` on the closed
//! [`ElementType`](crate::element::ElementType) enumeration, not
//! open-ended polymorphism.

use crate::element::{
    DateAttributes, ElementKind, ElementType, FormElementInstance, InputAttributes,
    ParagraphAttributes, TitleAttributes,
};

/// Palette metadata for an element type, used by the designer sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementDescriptor {
    /// The element type this descriptor belongs to.
    pub element_type: ElementType,
    /// The sidebar button label.
    pub label: &'static str,
    /// The icon name for the sidebar button.
    pub icon: &'static str,
}

/// Palette descriptors for all element types, in sidebar order.
static DESCRIPTORS: [ElementDescriptor; 7] = [
    ElementDescriptor {
        element_type: ElementType::TextField,
        label: "Text Field",
        icon: "text-fields",
    },
    ElementDescriptor {
        element_type: ElementType::TitleField,
        label: "Title Field",
        icon: "heading-1",
    },
    ElementDescriptor {
        element_type: ElementType::ParagraphField,
        label: "Paragraph Field",
        icon: "text-paragraph",
    },
    ElementDescriptor {
        element_type: ElementType::SeparatorField,
        label: "Separator Field",
        icon: "separator",
    },
    ElementDescriptor {
        element_type: ElementType::NumberField,
        label: "Number Field",
        icon: "number-123",
    },
    ElementDescriptor {
        element_type: ElementType::TextareaField,
        label: "Textarea Field",
        icon: "textarea-resize",
    },
    ElementDescriptor {
        element_type: ElementType::DateField,
        label: "Date Field",
        icon: "calendar-date",
    },
];

/// Returns the palette descriptor for an element type.
pub fn descriptor(element_type: ElementType) -> &'static ElementDescriptor {
    match element_type {
        ElementType::TextField => &DESCRIPTORS[0],
        ElementType::TitleField => &DESCRIPTORS[1],
        ElementType::ParagraphField => &DESCRIPTORS[2],
        ElementType::SeparatorField => &DESCRIPTORS[3],
        ElementType::NumberField => &DESCRIPTORS[4],
        ElementType::TextareaField => &DESCRIPTORS[5],
        ElementType::DateField => &DESCRIPTORS[6],
    }
}

/// Returns all palette descriptors in sidebar order.
pub fn palette() -> &'static [ElementDescriptor] {
    &DESCRIPTORS
}

/// Constructs a new element instance with the default attributes for its
/// type.
pub fn construct(element_type: ElementType, id: impl Into<String>) -> FormElementInstance {
    let kind = match element_type {
        ElementType::TextField => ElementKind::TextField(InputAttributes {
            label: "Text Field".to_string(),
            helper_text: "Helper Text".to_string(),
            required: false,
            placeholder: "Value here...".to_string(),
        }),
        ElementType::TitleField => ElementKind::TitleField(TitleAttributes {
            title: "Title field".to_string(),
        }),
        ElementType::ParagraphField => ElementKind::ParagraphField(ParagraphAttributes {
            text: "Paragraph Text".to_string(),
        }),
        ElementType::SeparatorField => ElementKind::SeparatorField,
        ElementType::NumberField => ElementKind::NumberField(InputAttributes {
            label: "Number Field".to_string(),
            helper_text: "Helper Text".to_string(),
            required: false,
            placeholder: "0".to_string(),
        }),
        ElementType::TextareaField => ElementKind::TextareaField(InputAttributes {
            label: "Textarea Field".to_string(),
            helper_text: "Helper Text".to_string(),
            required: false,
            placeholder: "Placeholder...".to_string(),
        }),
        ElementType::DateField => ElementKind::DateField(DateAttributes {
            label: "Date Field".to_string(),
            helper_text: "Helper Text".to_string(),
            required: false,
        }),
    };
    FormElementInstance {
        id: id.into(),
        kind,
    }
}

/// Validates a raw submitted value against an element instance.
///
/// Required inputs reject an empty value; everything else validates true.
/// The check inspects only the instance and the raw value.
pub fn validate(instance: &FormElementInstance, raw_value: &str) -> bool {
    if instance.kind.required() {
        return !raw_value.is_empty();
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construct_defaults_per_type() {
        let number = construct(ElementType::NumberField, "n1");
        match &number.kind {
            ElementKind::NumberField(attrs) => {
                assert_eq!(attrs.label, "Number Field");
                assert_eq!(attrs.placeholder, "0");
                assert!(!attrs.required);
            }
            other => panic!("expected NumberField, got {other:?}"),
        }

        let textarea = construct(ElementType::TextareaField, "t1");
        match &textarea.kind {
            ElementKind::TextareaField(attrs) => {
                assert_eq!(attrs.placeholder, "Placeholder...");
            }
            other => panic!("expected TextareaField, got {other:?}"),
        }

        let title = construct(ElementType::TitleField, "h1");
        match &title.kind {
            ElementKind::TitleField(attrs) => assert_eq!(attrs.title, "Title field"),
            other => panic!("expected TitleField, got {other:?}"),
        }
    }

    #[test]
    fn test_construct_sets_id() {
        let instance = construct(ElementType::TextField, "abcd1234");
        assert_eq!(instance.id, "abcd1234");
    }

    #[test]
    fn test_validate_required_rejects_empty() {
        let mut instance = construct(ElementType::TextField, "a");
        if let ElementKind::TextField(attrs) = &mut instance.kind {
            attrs.required = true;
        }
        assert!(!validate(&instance, ""));
        assert!(validate(&instance, "hello"));
    }

    #[test]
    fn test_validate_optional_accepts_empty() {
        let instance = construct(ElementType::TextField, "a");
        assert!(validate(&instance, ""));
        assert!(validate(&instance, "anything"));
    }

    #[test]
    fn test_validate_layout_elements_always_true() {
        for element_type in [
            ElementType::TitleField,
            ElementType::ParagraphField,
            ElementType::SeparatorField,
        ] {
            let instance = construct(element_type, "a");
            assert!(validate(&instance, ""));
        }
    }

    #[test]
    fn test_descriptor_labels() {
        assert_eq!(descriptor(ElementType::TextField).label, "Text Field");
        assert_eq!(
            descriptor(ElementType::SeparatorField).label,
            "Separator Field"
        );
    }

    #[test]
    fn test_palette_covers_all_types_once() {
        let palette = palette();
        assert_eq!(palette.len(), ElementType::ALL.len());
        for element_type in ElementType::ALL {
            assert_eq!(
                palette
                    .iter()
                    .filter(|d| d.element_type == element_type)
                    .count(),
                1
            );
        }
    }
}
