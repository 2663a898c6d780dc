//! Loan application and contact form intake.
//!
//! Posted fields are trimmed and validated against a per-form schema, stamped,
//! and appended to one CSV file per form. Nothing is ever read back.

pub mod domain;
pub mod router;
pub mod schema;
pub mod service;
pub mod store;
pub mod views;

#[cfg(test)]
mod tests;

pub use domain::{
    first_values, looks_like_email, ApplicationRecord, ContactRecord, EchoedValues, RawFields,
    SubmissionRecord, ValidationError,
};
pub use router::{intake_router, CONFIRMATION_PATH};
pub use schema::{FieldShape, FieldSpec, FormSchema, RecordKind, APPLICATION_SCHEMA, CONTACT_SCHEMA};
pub use service::{Clock, LocalClock, SubmissionOutcome, SubmissionService, TIMESTAMP_FORMAT};
pub use store::{CsvRecordStore, RecordStore, StoreError};
