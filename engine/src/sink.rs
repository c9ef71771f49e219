//! Hand-off of recorded entries to an external store.
//!
//! The engine appends an entry to its in-memory state first and only then
//! offers it to the sink. A sink failure is logged by the engine and never
//! undoes the append.

use std::sync::{Mutex, PoisonError};

use tandem_types::Entry;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("entry sink failed: {message}")]
pub struct SinkError {
    message: String,
}

impl SinkError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Receives every entry the engine records.
pub trait EntrySink: Send + Sync {
    fn persist(&self, entry: &Entry) -> Result<(), SinkError>;
}

/// Keeps persisted entries in memory, in the order they arrived.
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Mutex<Vec<Entry>>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn entries(&self) -> Vec<Entry> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EntrySink for MemorySink {
    fn persist(&self, entry: &Entry) -> Result<(), SinkError> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry.clone());
        Ok(())
    }
}
