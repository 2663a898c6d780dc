use std::path::Path;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{NaiveDate, NaiveDateTime};
use tempfile::TempDir;

use crate::config::StorageConfig;
use crate::intake::domain::{RawFields, SubmissionRecord};
use crate::intake::schema::RecordKind;
use crate::intake::service::{Clock, SubmissionService};
use crate::intake::store::{CsvRecordStore, RecordStore, StoreError};

pub(super) const FIXED_TIMESTAMP: &str = "2025-03-14 09:26:53";

#[derive(Debug, Clone, Copy)]
pub(super) struct FixedClock;

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 14)
            .and_then(|date| date.and_hms_opt(9, 26, 53))
            .expect("valid timestamp")
    }
}

#[derive(Default)]
pub(super) struct MemoryStore {
    rows: Mutex<Vec<SubmissionRecord>>,
}

impl MemoryStore {
    pub(super) fn rows(&self) -> Vec<SubmissionRecord> {
        self.rows.lock().expect("store mutex poisoned").clone()
    }
}

impl RecordStore for MemoryStore {
    fn ensure_initialized(&self) -> Result<(), StoreError> {
        Ok(())
    }

    fn append(&self, record: &SubmissionRecord) -> Result<(), StoreError> {
        self.rows
            .lock()
            .expect("store mutex poisoned")
            .push(record.clone());
        Ok(())
    }
}

pub(super) struct UnavailableStore;

impl RecordStore for UnavailableStore {
    fn ensure_initialized(&self) -> Result<(), StoreError> {
        Ok(())
    }

    fn append(&self, record: &SubmissionRecord) -> Result<(), StoreError> {
        Err(StoreError::Io {
            path: record.kind().file_name().into(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only volume"),
        })
    }
}

pub(super) fn fields(pairs: &[(&str, &str)]) -> RawFields {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

pub(super) fn application_fields() -> RawFields {
    fields(&[
        ("first_name", "Ada"),
        ("last_name", "Lovelace"),
        ("dob", "1990-01-01"),
        ("phone", "5551234"),
        ("email", "ada@example.com"),
    ])
}

pub(super) fn contact_fields() -> RawFields {
    fields(&[
        ("name", "Bob"),
        ("email", "bob@example.com"),
        ("message", "hi"),
    ])
}

pub(super) fn temp_store() -> (TempDir, Arc<CsvRecordStore>) {
    let dir = TempDir::new().expect("tempdir");
    let store = CsvRecordStore::new(StorageConfig::new(dir.path().join("data")));
    store.ensure_initialized().expect("store initializes");
    (dir, Arc::new(store))
}

pub(super) fn memory_service() -> (SubmissionService<MemoryStore>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    let service = SubmissionService::with_clock(store.clone(), Arc::new(FixedClock));
    (service, store)
}

pub(super) fn csv_service() -> (TempDir, SubmissionService<CsvRecordStore>, Arc<CsvRecordStore>) {
    let (dir, store) = temp_store();
    let service = SubmissionService::with_clock(store.clone(), Arc::new(FixedClock));
    (dir, service, store)
}

/// Parses a data file, header included.
pub(super) fn read_rows(path: &Path) -> Vec<csv::StringRecord> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .expect("file opens");
    reader
        .records()
        .collect::<Result<Vec<_>, _>>()
        .expect("rows parse")
}

pub(super) fn data_rows(store: &CsvRecordStore, kind: RecordKind) -> Vec<csv::StringRecord> {
    read_rows(&store.path_for(kind)).into_iter().skip(1).collect()
}

pub(super) async fn read_text_body(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    String::from_utf8(body.to_vec()).expect("utf8 body")
}
