//! Persistence and notification seams used by the executor.

use super::record::RepairRecord;
use crate::core::RepairState;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// Errors that can occur in a repair store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Repair '{0}' not found")]
    NotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Backend error: {0}")]
    Backend(String),
}

/// Result of a conditional write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    /// The stored state no longer matched; nothing was written.
    Conflict { found: String },
}

/// Storage for repair records.
pub trait RepairStore: Send + Sync {
    fn load(&self, id: &str) -> Result<RepairRecord, StoreError>;

    /// Unconditional write.
    fn save(&self, record: &RepairRecord) -> Result<(), StoreError>;

    /// Write only if the stored `EstadoRep` equals `expected_state`.
    fn save_if_state(
        &self,
        record: &RepairRecord,
        expected_state: &str,
    ) -> Result<SaveOutcome, StoreError>;
}

#[derive(Debug, Error)]
#[error("Notification failed: {0}")]
pub struct NotifyError(pub String);

/// Tells the customer about a state change.
pub trait Notifier: Send + Sync {
    fn notify(&self, record: &RepairRecord, from: &str, to: RepairState) -> Result<(), NotifyError>;
}

/// In-memory store keeping each record as serialized JSON.
///
/// No persistence across restarts; meant for tests and demos.
#[derive(Clone, Default)]
pub struct InMemoryRepairStore {
    rows: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl InMemoryRepairStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.read().map(|rows| rows.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn encode(record: &RepairRecord) -> Result<Vec<u8>, StoreError> {
        serde_json::to_vec(record).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    fn decode(bytes: &[u8]) -> Result<RepairRecord, StoreError> {
        serde_json::from_slice(bytes).map_err(|e| StoreError::Serialization(e.to_string()))
    }
}

impl RepairStore for InMemoryRepairStore {
    fn load(&self, id: &str) -> Result<RepairRecord, StoreError> {
        let rows = self
            .rows
            .read()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        let bytes = rows
            .get(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        Self::decode(bytes)
    }

    fn save(&self, record: &RepairRecord) -> Result<(), StoreError> {
        let bytes = Self::encode(record)?;
        let mut rows = self
            .rows
            .write()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        rows.insert(record.id.clone(), bytes);
        Ok(())
    }

    fn save_if_state(
        &self,
        record: &RepairRecord,
        expected_state: &str,
    ) -> Result<SaveOutcome, StoreError> {
        let bytes = Self::encode(record)?;
        // Held across read and write so the comparison and the write are atomic.
        let mut rows = self
            .rows
            .write()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        let stored = rows
            .get(&record.id)
            .ok_or_else(|| StoreError::NotFound(record.id.clone()))?;
        let stored = Self::decode(stored)?;

        if stored.estado_rep != expected_state {
            return Ok(SaveOutcome::Conflict {
                found: stored.estado_rep,
            });
        }

        rows.insert(record.id.clone(), bytes);
        Ok(SaveOutcome::Saved)
    }
}
