use serde::{Deserialize, Serialize};

/// The two submission forms the site accepts, each backed by its own file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Application,
    Contact,
}

impl RecordKind {
    pub const ALL: [RecordKind; 2] = [RecordKind::Application, RecordKind::Contact];

    pub fn label(&self) -> &'static str {
        match self {
            RecordKind::Application => "application",
            RecordKind::Contact => "contact",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            RecordKind::Application => "applications.csv",
            RecordKind::Contact => "contacts.csv",
        }
    }

    pub fn schema(&self) -> &'static FormSchema {
        match self {
            RecordKind::Application => &APPLICATION_SCHEMA,
            RecordKind::Contact => &CONTACT_SCHEMA,
        }
    }

    /// Header row: `timestamp` followed by every schema column.
    pub fn header(&self) -> Vec<&'static str> {
        std::iter::once(TIMESTAMP_COLUMN)
            .chain(self.schema().fields.iter().map(|field| field.column))
            .collect()
    }
}

pub const TIMESTAMP_COLUMN: &str = "timestamp";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldShape {
    Text,
    Email,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Form input name.
    pub name: &'static str,
    /// Column header in the backing file.
    pub column: &'static str,
    pub label: &'static str,
    pub required: bool,
    pub shape: FieldShape,
}

impl FieldSpec {
    const fn required(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            column: name,
            label,
            required: true,
            shape: FieldShape::Text,
        }
    }

    const fn optional(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            column: name,
            label,
            required: false,
            shape: FieldShape::Text,
        }
    }

    const fn email(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            column: name,
            label,
            required: true,
            shape: FieldShape::Email,
        }
    }
}

/// Fields of one form in column order.
#[derive(Debug)]
pub struct FormSchema {
    pub kind: RecordKind,
    pub fields: &'static [FieldSpec],
}

impl FormSchema {
    pub fn required_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|field| field.required)
    }

    pub fn optional_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|field| !field.required)
    }

    pub fn email_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields
            .iter()
            .filter(|field| field.shape == FieldShape::Email)
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.name == name)
    }
}

pub static APPLICATION_SCHEMA: FormSchema = FormSchema {
    kind: RecordKind::Application,
    fields: &[
        FieldSpec::required("first_name", "First name"),
        FieldSpec::required("last_name", "Last name"),
        FieldSpec::required("dob", "Date of birth"),
        FieldSpec::email("email", "Email address"),
        FieldSpec::required("phone", "Phone number"),
        FieldSpec::optional("academic_qualification", "Academic qualification"),
        FieldSpec::optional("service_documents", "Service documents"),
        FieldSpec::optional("guarantor_name", "Guarantor name"),
        FieldSpec::optional("guarantor_occupation", "Guarantor occupation"),
        FieldSpec::optional("consent", "I consent to a background and credit check"),
    ],
};

pub static CONTACT_SCHEMA: FormSchema = FormSchema {
    kind: RecordKind::Contact,
    fields: &[
        FieldSpec::required("name", "Your name"),
        FieldSpec::email("email", "Email address"),
        FieldSpec::required("message", "Message"),
    ],
};
