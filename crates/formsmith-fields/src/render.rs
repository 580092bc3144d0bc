//! HTML rendering for element instances.
//!
//! Two renderers per element: a designer preview (read-only, shown on the
//! builder canvas) and a runtime form renderer (the fill-in view reached
//! through the share link). Both produce plain HTML strings with all
//! attribute and text content escaped.

use std::fmt::Write as _;

use crate::element::{ElementKind, FormElementInstance};

/// Escapes a string for safe use in HTML text and attribute values.
fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Renders the label line of an input element. Required inputs get a `*`.
fn render_label(for_id: Option<&str>, label: &str, required: bool) -> String {
    let marker = if required { "*" } else { "" };
    match for_id {
        Some(id) => format!(
            r#"<label for="{}">{}{marker}</label>"#,
            escape_html(id),
            escape_html(label)
        ),
        None => format!("<label>{}{marker}</label>", escape_html(label)),
    }
}

/// Renders the helper-text line, or nothing when the helper text is empty.
fn render_helper_text(helper_text: &str) -> String {
    if helper_text.is_empty() {
        String::new()
    } else {
        format!(
            r#"<p class="helper-text">{}</p>"#,
            escape_html(helper_text)
        )
    }
}

/// Renders the designer preview for an element.
///
/// Inputs are rendered read-only and disabled; the preview never collects
/// a value.
pub fn render_designer(instance: &FormElementInstance) -> String {
    match &instance.kind {
        ElementKind::TextField(attrs)
        | ElementKind::NumberField(attrs)
        | ElementKind::TextareaField(attrs) => {
            let input = match &instance.kind {
                ElementKind::TextareaField(_) => format!(
                    r#"<textarea placeholder="{}" readonly disabled></textarea>"#,
                    escape_html(&attrs.placeholder)
                ),
                ElementKind::NumberField(_) => format!(
                    r#"<input type="number" placeholder="{}" readonly disabled />"#,
                    escape_html(&attrs.placeholder)
                ),
                _ => format!(
                    r#"<input type="text" placeholder="{}" readonly disabled />"#,
                    escape_html(&attrs.placeholder)
                ),
            };
            let mut html = String::from(r#"<div class="designer-element">"#);
            let _ = write!(
                html,
                "{}{input}{}",
                render_label(None, &attrs.label, attrs.required),
                render_helper_text(&attrs.helper_text)
            );
            html.push_str("</div>");
            html
        }
        ElementKind::DateField(attrs) => format!(
            r#"<div class="designer-element">{}<input type="date" readonly disabled />{}</div>"#,
            render_label(None, &attrs.label, attrs.required),
            render_helper_text(&attrs.helper_text)
        ),
        ElementKind::TitleField(attrs) => format!(
            r#"<div class="designer-element"><label>Title field</label><h1>{}</h1></div>"#,
            escape_html(&attrs.title)
        ),
        ElementKind::ParagraphField(attrs) => format!(
            r#"<div class="designer-element"><label>Paragraph field</label><p>{}</p></div>"#,
            escape_html(&attrs.text)
        ),
        ElementKind::SeparatorField => {
            r#"<div class="designer-element"><label>Separator field</label><hr /></div>"#
                .to_string()
        }
    }
}

/// Renders the runtime (fill-in) view of an element.
///
/// `value` is the previously submitted value to echo back, if any;
/// `invalid` marks the element after a failed validation so the fill-in
/// view can highlight it.
pub fn render_form(instance: &FormElementInstance, value: Option<&str>, invalid: bool) -> String {
    let wrapper_class = if invalid {
        "form-element invalid"
    } else {
        "form-element"
    };
    let id = escape_html(&instance.id);
    let value = escape_html(value.unwrap_or(""));

    match &instance.kind {
        ElementKind::TextField(attrs) | ElementKind::NumberField(attrs) => {
            let input_type = match &instance.kind {
                ElementKind::NumberField(_) => "number",
                _ => "text",
            };
            let required = if attrs.required { " required" } else { "" };
            format!(
                r#"<div class="{wrapper_class}">{}<input type="{input_type}" id="{id}" name="{id}" value="{value}" placeholder="{}"{required} />{}</div>"#,
                render_label(Some(&instance.id), &attrs.label, attrs.required),
                escape_html(&attrs.placeholder),
                render_helper_text(&attrs.helper_text)
            )
        }
        ElementKind::TextareaField(attrs) => {
            let required = if attrs.required { " required" } else { "" };
            format!(
                r#"<div class="{wrapper_class}">{}<textarea id="{id}" name="{id}" placeholder="{}"{required}>{value}</textarea>{}</div>"#,
                render_label(Some(&instance.id), &attrs.label, attrs.required),
                escape_html(&attrs.placeholder),
                render_helper_text(&attrs.helper_text)
            )
        }
        ElementKind::DateField(attrs) => {
            let required = if attrs.required { " required" } else { "" };
            format!(
                r#"<div class="{wrapper_class}">{}<input type="date" id="{id}" name="{id}" value="{value}"{required} />{}</div>"#,
                render_label(Some(&instance.id), &attrs.label, attrs.required),
                render_helper_text(&attrs.helper_text)
            )
        }
        ElementKind::TitleField(attrs) => format!(
            r#"<div class="{wrapper_class}"><h1>{}</h1></div>"#,
            escape_html(&attrs.title)
        ),
        ElementKind::ParagraphField(attrs) => format!(
            r#"<div class="{wrapper_class}"><p>{}</p></div>"#,
            escape_html(&attrs.text)
        ),
        ElementKind::SeparatorField => format!(r#"<div class="{wrapper_class}"><hr /></div>"#),
    }
}

/// Renders the full fill-in view of a form: every element in order,
/// with no submitted values and no validation highlighting.
pub fn render_form_page(elements: &[FormElementInstance]) -> String {
    let mut html = String::from(r#"<form class="formsmith-form">"#);
    for element in elements {
        html.push_str(&render_form(element, None, false));
    }
    html.push_str("</form>");
    html
}
