use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::schema::{FormSchema, RecordKind};

/// Untrusted field values exactly as posted by the browser.
pub type RawFields = HashMap<String, String>;

/// Collects posted pairs, keeping the first value of a repeated key.
pub fn first_values(pairs: Vec<(String, String)>) -> RawFields {
    let mut fields = RawFields::with_capacity(pairs.len());
    for (name, value) in pairs {
        fields.entry(name).or_insert(value);
    }
    fields
}

/// Trimmed values for every field of a schema, keyed by form input name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EchoedValues(BTreeMap<String, String>);

impl EchoedValues {
    /// Trims every schema field. Missing inputs become empty strings and inputs
    /// the schema does not declare are dropped.
    pub fn normalize(schema: &FormSchema, raw: &RawFields) -> Self {
        let values = schema
            .fields
            .iter()
            .map(|field| {
                let value = raw
                    .get(field.name)
                    .map(|value| value.trim().to_string())
                    .unwrap_or_default();
                (field.name.to_string(), value)
            })
            .collect();
        Self(values)
    }

    pub fn get(&self, name: &str) -> &str {
        self.0.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(String::is_empty)
    }
}

/// Loan application row, serialized in column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub timestamp: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(rename = "dob")]
    pub date_of_birth: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub academic_qualification: String,
    #[serde(default)]
    pub service_documents: String,
    #[serde(default)]
    pub guarantor_name: String,
    #[serde(default)]
    pub guarantor_occupation: String,
    #[serde(default)]
    pub consent: String,
}

impl ApplicationRecord {
    fn from_values(timestamp: String, values: &EchoedValues) -> Self {
        Self {
            timestamp,
            first_name: values.get("first_name").to_string(),
            last_name: values.get("last_name").to_string(),
            date_of_birth: values.get("dob").to_string(),
            email: values.get("email").to_string(),
            phone: values.get("phone").to_string(),
            academic_qualification: values.get("academic_qualification").to_string(),
            service_documents: values.get("service_documents").to_string(),
            guarantor_name: values.get("guarantor_name").to_string(),
            guarantor_occupation: values.get("guarantor_occupation").to_string(),
            consent: values.get("consent").to_string(),
        }
    }
}

/// Contact message row, serialized in column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    pub timestamp: String,
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactRecord {
    fn from_values(timestamp: String, values: &EchoedValues) -> Self {
        Self {
            timestamp,
            name: values.get("name").to_string(),
            email: values.get("email").to_string(),
            message: values.get("message").to_string(),
        }
    }
}

/// A validated record ready for the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionRecord {
    Application(ApplicationRecord),
    Contact(ContactRecord),
}

impl SubmissionRecord {
    pub fn build(kind: RecordKind, timestamp: String, values: &EchoedValues) -> Self {
        match kind {
            RecordKind::Application => {
                Self::Application(ApplicationRecord::from_values(timestamp, values))
            }
            RecordKind::Contact => Self::Contact(ContactRecord::from_values(timestamp, values)),
        }
    }

    pub fn kind(&self) -> RecordKind {
        match self {
            SubmissionRecord::Application(_) => RecordKind::Application,
            SubmissionRecord::Contact(_) => RecordKind::Contact,
        }
    }

    pub fn timestamp(&self) -> &str {
        match self {
            SubmissionRecord::Application(record) => &record.timestamp,
            SubmissionRecord::Contact(record) => &record.timestamp,
        }
    }
}

/// User-correctable problems with a submitted form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("missing required fields: {}", fields.join(", "))]
    MissingRequiredField { fields: Vec<&'static str> },
    #[error("field '{field}' is not a valid email address")]
    InvalidEmailFormat { field: &'static str },
}

impl ValidationError {
    /// Message shown above the re-rendered form.
    pub fn user_message(&self) -> &'static str {
        match self {
            ValidationError::MissingRequiredField { .. } => "Please fill in all required fields.",
            ValidationError::InvalidEmailFormat { .. } => "Please enter a valid email address.",
        }
    }

    pub fn fields(&self) -> Vec<&'static str> {
        match self {
            ValidationError::MissingRequiredField { fields } => fields.clone(),
            ValidationError::InvalidEmailFormat { field } => vec![*field],
        }
    }
}

/// Deliberately weak: an `@` and a `.` anywhere in the value.
pub fn looks_like_email(value: &str) -> bool {
    value.contains('@') && value.contains('.')
}

/// Checks required fields first, then the shape of email fields.
pub fn validate(schema: &FormSchema, values: &EchoedValues) -> Result<(), ValidationError> {
    let missing: Vec<&'static str> = schema
        .required_fields()
        .filter(|field| values.get(field.name).is_empty())
        .map(|field| field.name)
        .collect();
    if !missing.is_empty() {
        return Err(ValidationError::MissingRequiredField { fields: missing });
    }

    if let Some(field) = schema
        .email_fields()
        .find(|field| !looks_like_email(values.get(field.name)))
    {
        return Err(ValidationError::InvalidEmailFormat { field: field.name });
    }

    Ok(())
}
