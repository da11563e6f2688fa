//! Committing state changes: the imperative shell around the pure core.
//!
//! `TransitionExecutor` writes a target state to a repair record, stamps the
//! milestone dates it reaches, persists the record and optionally notifies
//! the customer. It returns a Stillwater effect run against a
//! [`WorkflowEnv`] that supplies the store and notifier.
//!
//! The executor does **not** re-validate. Callers check
//! `is_transition_valid` first; committing a transition that check rejected
//! is a caller bug.
//!
//! With the default [`WriteMode::LastWriteWins`] two callers changing the
//! same record race and the last write wins without any conflict being
//! detected. [`WriteMode::CompareAndSwap`] closes that gap at the store.

mod error;
mod record;
mod store;

pub use error::ExecutorError;
pub use record::RepairRecord;
pub use store::{InMemoryRepairStore, Notifier, NotifyError, RepairStore, SaveOutcome, StoreError};

use crate::config::{WorkflowConfig, WriteMode};
use crate::core::RepairState;
use crate::milestones::Milestone;
use chrono::Utc;
use std::sync::Arc;
use stillwater::effect::Effect;
use stillwater::prelude::*;
use tracing::{debug, warn};

/// Services the executor runs against.
pub trait WorkflowEnv: Clone + Send + Sync + 'static {
    fn store(&self) -> &dyn RepairStore;

    fn notifier(&self) -> Option<&dyn Notifier> {
        None
    }
}

/// A ready-made environment over shared trait objects.
#[derive(Clone)]
pub struct ShopEnv {
    pub store: Arc<dyn RepairStore>,
    pub notifier: Option<Arc<dyn Notifier>>,
}

impl ShopEnv {
    pub fn new(store: Arc<dyn RepairStore>) -> Self {
        Self {
            store,
            notifier: None,
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }
}

impl WorkflowEnv for ShopEnv {
    fn store(&self) -> &dyn RepairStore {
        self.store.as_ref()
    }

    fn notifier(&self) -> Option<&dyn Notifier> {
        self.notifier.as_deref()
    }
}

/// A state change to commit.
#[derive(Clone, Debug)]
pub struct TransitionCommand {
    pub target: RepairState,
    pub observations: Option<String>,
    /// `None` defers to the executor's `notify_by_default`.
    pub notify: Option<bool>,
}

impl TransitionCommand {
    pub fn to(target: RepairState) -> Self {
        Self {
            target,
            observations: None,
            notify: None,
        }
    }

    pub fn observations(mut self, text: impl Into<String>) -> Self {
        self.observations = Some(text.into());
        self
    }

    pub fn notify(mut self, notify: bool) -> Self {
        self.notify = Some(notify);
        self
    }
}

/// What a successful commit did.
#[derive(Clone, Debug)]
pub struct CommittedTransition {
    pub record: RepairRecord,
    /// Raw state the record was in before the change
    pub from: String,
    pub to: RepairState,
    pub stamped: Vec<Milestone>,
    pub notified: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TransitionExecutor {
    write_mode: WriteMode,
    notify_by_default: bool,
}

impl TransitionExecutor {
    pub fn new(write_mode: WriteMode) -> Self {
        Self {
            write_mode,
            notify_by_default: false,
        }
    }

    pub fn from_config(config: &WorkflowConfig) -> Self {
        Self {
            write_mode: config.write_mode,
            notify_by_default: config.notify_by_default,
        }
    }

    pub fn write_mode(&self) -> WriteMode {
        self.write_mode
    }

    /// Commit `command` against a record the caller already holds.
    ///
    /// Under compare-and-swap the record's current `EstadoRep` is the
    /// expected stored state.
    pub fn commit<Env: WorkflowEnv>(
        &self,
        record: &RepairRecord,
        command: TransitionCommand,
    ) -> impl Effect<Output = CommittedTransition, Error = ExecutorError, Env = Env> {
        let executor = *self;
        let record = record.clone();
        from_fn(
            move |env: &Env| -> Result<CommittedTransition, ExecutorError> {
                executor.apply_and_persist(env, record.clone(), command.clone())
            },
        )
    }

    /// Load the record by id, then commit `command` against it.
    pub fn commit_by_id<Env: WorkflowEnv>(
        &self,
        id: impl Into<String>,
        command: TransitionCommand,
    ) -> impl Effect<Output = CommittedTransition, Error = ExecutorError, Env = Env> {
        let executor = *self;
        let id = id.into();
        from_fn(
            move |env: &Env| -> Result<CommittedTransition, ExecutorError> {
                let record = env.store().load(&id)?;
                executor.apply_and_persist(env, record, command.clone())
            },
        )
    }

    fn apply_and_persist<Env: WorkflowEnv>(
        &self,
        env: &Env,
        mut record: RepairRecord,
        command: TransitionCommand,
    ) -> Result<CommittedTransition, ExecutorError> {
        let from = record.estado_rep.clone();
        let stamped = record.apply(command.target, command.observations, Utc::now());

        match self.write_mode {
            WriteMode::LastWriteWins => env.store().save(&record)?,
            WriteMode::CompareAndSwap => match env.store().save_if_state(&record, &from)? {
                SaveOutcome::Saved => {}
                SaveOutcome::Conflict { found } => {
                    return Err(ExecutorError::Conflict {
                        id: record.id,
                        expected: from,
                        found,
                    });
                }
            },
        }

        debug!(
            id = %record.id,
            from = %from,
            to = %command.target,
            stamped = ?stamped,
            "Committed repair state change"
        );

        let notified = command.notify.unwrap_or(self.notify_by_default)
            && notify_customer(env, &record, &from, command.target);

        Ok(CommittedTransition {
            record,
            from,
            to: command.target,
            stamped,
            notified,
        })
    }
}

/// A failed notification never undoes a committed state change.
fn notify_customer<Env: WorkflowEnv>(
    env: &Env,
    record: &RepairRecord,
    from: &str,
    to: RepairState,
) -> bool {
    let Some(notifier) = env.notifier() else {
        debug!(id = %record.id, "No notifier configured, skipping notification");
        return false;
    };
    match notifier.notify(record, from, to) {
        Ok(()) => true,
        Err(err) => {
            warn!(id = %record.id, error = %err, "Repair state notification failed");
            false
        }
    }
}
