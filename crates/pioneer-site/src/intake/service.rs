use std::sync::Arc;

use chrono::{Local, NaiveDateTime};
use tracing::{error, info};

use super::domain::{validate, EchoedValues, RawFields, SubmissionRecord, ValidationError};
use super::schema::RecordKind;
use super::store::{RecordStore, StoreError};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Wall-clock source used to stamp accepted submissions.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Terminal state of a single submission.
#[derive(Debug)]
pub enum SubmissionOutcome {
    Rejected {
        error: ValidationError,
        echoed: EchoedValues,
    },
    Persisted,
    StorageFailed(StoreError),
}

impl SubmissionOutcome {
    pub fn is_persisted(&self) -> bool {
        matches!(self, SubmissionOutcome::Persisted)
    }
}

/// Turns raw form posts into stored records or validation failures.
pub struct SubmissionService<S> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<S> SubmissionService<S>
where
    S: RecordStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self::with_clock(store, Arc::new(LocalClock))
    }

    pub fn with_clock(store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn submit(&self, kind: RecordKind, raw: &RawFields) -> SubmissionOutcome {
        let schema = kind.schema();
        let values = EchoedValues::normalize(schema, raw);

        if let Err(error) = validate(schema, &values) {
            info!(kind = kind.label(), fields = ?error.fields(), "submission rejected");
            return SubmissionOutcome::Rejected {
                error,
                echoed: values,
            };
        }

        let timestamp = self.clock.now().format(TIMESTAMP_FORMAT).to_string();
        let record = SubmissionRecord::build(kind, timestamp, &values);

        match self.store.append(&record) {
            Ok(()) => {
                info!(kind = kind.label(), timestamp = record.timestamp(), "submission stored");
                SubmissionOutcome::Persisted
            }
            Err(err) => {
                error!(kind = kind.label(), error = %err, "failed to store submission");
                SubmissionOutcome::StorageFailed(err)
            }
        }
    }
}

impl<S> Clone for SubmissionService<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            clock: self.clock.clone(),
        }
    }
}
