use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{debug, info, warn};

use super::domain::SubmissionRecord;
use super::schema::RecordKind;
use crate::config::StorageConfig;

/// Append-only sink for validated submissions.
pub trait RecordStore: Send + Sync {
    /// Creates the data directory and any missing file with its header row.
    fn ensure_initialized(&self) -> Result<(), StoreError>;
    /// Appends one row to the record kind's file.
    fn append(&self, record: &SubmissionRecord) -> Result<(), StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage io failure at {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("failed to encode {kind:?} row: {source}")]
    Encode {
        kind: RecordKind,
        source: csv::Error,
    },
    #[error("{kind:?} file lock poisoned by a panicked writer")]
    Poisoned { kind: RecordKind },
}

/// Stores each record kind in its own CSV file under the configured directory.
///
/// Appends to the same file are serialized through a per-kind mutex and each
/// row reaches the file through a single `write_all` on an append-mode handle.
#[derive(Debug)]
pub struct CsvRecordStore {
    config: StorageConfig,
    applications: Mutex<()>,
    contacts: Mutex<()>,
}

impl CsvRecordStore {
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            applications: Mutex::new(()),
            contacts: Mutex::new(()),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.config.data_dir
    }

    pub fn path_for(&self, kind: RecordKind) -> PathBuf {
        self.config.data_dir.join(kind.file_name())
    }

    fn lock_for(&self, kind: RecordKind) -> &Mutex<()> {
        match kind {
            RecordKind::Application => &self.applications,
            RecordKind::Contact => &self.contacts,
        }
    }

    /// Writes the header only when this call created the file.
    fn create_with_header(&self, kind: RecordKind) -> Result<bool, StoreError> {
        let path = self.path_for(kind);
        let header = encode_header(kind)?;
        create_new_with(&path, &header, write_row)
            .map_err(|source| StoreError::Io { path, source })
    }
}

impl RecordStore for CsvRecordStore {
    fn ensure_initialized(&self) -> Result<(), StoreError> {
        let dir = self.data_dir();
        fs::create_dir_all(dir).map_err(|source| StoreError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        for kind in RecordKind::ALL {
            let _guard = self
                .lock_for(kind)
                .lock()
                .map_err(|_| StoreError::Poisoned { kind })?;
            if self.create_with_header(kind)? {
                info!(kind = kind.label(), path = %self.path_for(kind).display(), "created submission file");
            } else {
                debug!(kind = kind.label(), "submission file already present");
            }
        }

        Ok(())
    }

    fn append(&self, record: &SubmissionRecord) -> Result<(), StoreError> {
        let kind = record.kind();
        let row = encode_record(record)?;

        let _guard = self
            .lock_for(kind)
            .lock()
            .map_err(|_| StoreError::Poisoned { kind })?;

        // Recreate the header if the file vanished after start-up.
        self.create_with_header(kind)?;

        let path = self.path_for(kind);
        let mut file = OpenOptions::new()
            .append(true)
            .open(&path)
            .map_err(|source| StoreError::Io {
                path: path.clone(),
                source,
            })?;
        write_row(&mut file, &row).map_err(|source| StoreError::Io { path, source })?;

        debug!(kind = kind.label(), bytes = row.len(), "appended submission row");
        Ok(())
    }
}

/// Creates `path` holding exactly `header`. A failed write removes the file again.
pub(super) fn create_new_with<W>(path: &Path, header: &[u8], write: W) -> io::Result<bool>
where
    W: FnOnce(&mut File, &[u8]) -> io::Result<()>,
{
    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists => return Ok(false),
        Err(err) => return Err(err),
    };

    if let Err(err) = write(&mut file, header) {
        drop(file);
        if let Err(cleanup) = fs::remove_file(path) {
            warn!(path = %path.display(), error = %cleanup, "failed to remove partial submission file");
        }
        return Err(err);
    }

    Ok(true)
}

fn write_row(file: &mut File, bytes: &[u8]) -> io::Result<()> {
    file.write_all(bytes)?;
    file.flush()?;
    file.sync_data()
}

fn encode_header(kind: RecordKind) -> Result<Vec<u8>, StoreError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer
        .write_record(kind.header())
        .map_err(|source| StoreError::Encode { kind, source })?;
    finish(kind, writer)
}

fn encode_record(record: &SubmissionRecord) -> Result<Vec<u8>, StoreError> {
    let kind = record.kind();
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    let result = match record {
        SubmissionRecord::Application(row) => writer.serialize(row),
        SubmissionRecord::Contact(row) => writer.serialize(row),
    };
    result.map_err(|source| StoreError::Encode { kind, source })?;
    finish(kind, writer)
}

fn finish(kind: RecordKind, writer: csv::Writer<Vec<u8>>) -> Result<Vec<u8>, StoreError> {
    writer.into_inner().map_err(|err| StoreError::Encode {
        kind,
        source: csv::Error::from(err.into_error()),
    })
}
