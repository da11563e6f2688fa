//! Executor errors.

use super::store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExecutorError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Repair '{id}' changed concurrently: expected state '{expected}', found '{found}'")]
    Conflict {
        id: String,
        expected: String,
        found: String,
    },
}
