use super::domain::{EchoedValues, ValidationError};
use super::schema::{FieldSpec, FieldShape, RecordKind};
use crate::views::{escape, layout};

pub fn form_path(kind: RecordKind) -> &'static str {
    match kind {
        RecordKind::Application => "/apply",
        RecordKind::Contact => "/contact",
    }
}

fn title(kind: RecordKind) -> &'static str {
    match kind {
        RecordKind::Application => "Apply for a loan",
        RecordKind::Contact => "Contact us",
    }
}

fn intro(kind: RecordKind) -> &'static str {
    match kind {
        RecordKind::Application => {
            "Complete the form below. Fields marked * are required. A loan officer \
             will reach out once your application has been reviewed."
        }
        RecordKind::Contact => "Send us a message and we will reply by email.",
    }
}

fn render_field(field: &FieldSpec, value: &str, invalid: bool) -> String {
    let marker = if field.required { " *" } else { "" };
    let required = if field.required { " required" } else { "" };
    let class = if invalid { " class=\"error\"" } else { "" };
    let name = field.name;
    let label = escape(field.label);

    let control = match (field.shape, name) {
        (_, "consent") => {
            let checked = if value.is_empty() { "" } else { " checked" };
            format!("<input type=\"checkbox\" id=\"{name}\" name=\"{name}\" value=\"yes\"{checked}>")
        }
        (_, "message") | (_, "service_documents") => format!(
            "<textarea id=\"{name}\" name=\"{name}\"{required}>{}</textarea>",
            escape(value)
        ),
        (FieldShape::Email, _) => format!(
            "<input type=\"email\" id=\"{name}\" name=\"{name}\" value=\"{}\"{required}>",
            escape(value)
        ),
        (_, "dob") => format!(
            "<input type=\"date\" id=\"{name}\" name=\"{name}\" value=\"{}\"{required}>",
            escape(value)
        ),
        _ => format!(
            "<input type=\"text\" id=\"{name}\" name=\"{name}\" value=\"{}\"{required}>",
            escape(value)
        ),
    };

    format!("<p{class}><label for=\"{name}\">{label}{marker}</label>\n{control}</p>\n")
}

/// Renders a form, pre-filled with `values` and flagged with `error` when given.
pub fn render_form(
    kind: RecordKind,
    values: &EchoedValues,
    error: Option<&ValidationError>,
) -> String {
    let invalid = error.map(ValidationError::fields).unwrap_or_default();

    let mut body = format!("<h1>{}</h1>\n<p>{}</p>\n", title(kind), intro(kind));
    if let Some(error) = error {
        body.push_str(&format!(
            "<div class=\"flash error\" role=\"alert\">{}</div>\n",
            escape(error.user_message())
        ));
    }

    body.push_str(&format!(
        "<form method=\"post\" action=\"{}\">\n",
        form_path(kind)
    ));
    for field in kind.schema().fields {
        body.push_str(&render_field(
            field,
            values.get(field.name),
            invalid.contains(&field.name),
        ));
    }
    body.push_str("<button type=\"submit\">Submit</button>\n</form>");

    layout(title(kind), &body)
}
