//! Audit trail of committed state changes.
//!
//! History is immutable: recording a transition returns a new history and
//! leaves the original untouched.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single committed state change.
///
/// # Example
///
/// ```rust
/// use repair_workflow::core::{RepairState, StateTransition};
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     from: RepairState::Aceptado,
///     to: RepairState::Repuestos,
///     timestamp: Utc::now(),
///     observations: Some("Esperando motor trasero".to_string()),
/// };
/// assert_eq!(transition.to, RepairState::Repuestos);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<S: State> {
    /// The state being left
    pub from: S,
    /// The state being entered
    pub to: S,
    /// When the change was committed
    pub timestamp: DateTime<Utc>,
    /// Free-text justification captured with the change
    #[serde(default)]
    pub observations: Option<String>,
}

/// Ordered history of committed transitions.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: State> {
    transitions: Vec<StateTransition<S>>,
}

impl<S: State> Default for StateHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateHistory<S> {
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    ///
    /// ```rust
    /// use repair_workflow::core::{RepairState, StateHistory, StateTransition};
    /// use chrono::Utc;
    ///
    /// let history = StateHistory::new();
    /// let updated = history.record(StateTransition {
    ///     from: RepairState::Consulta,
    ///     to: RepairState::Respondido,
    ///     timestamp: Utc::now(),
    ///     observations: None,
    /// });
    ///
    /// assert_eq!(updated.transitions().len(), 1);
    /// assert_eq!(history.transitions().len(), 0);
    /// ```
    pub fn record(&self, transition: StateTransition<S>) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// States traversed: the first `from`, then every `to` in order.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Time between the first and last recorded transition.
    ///
    /// `None` when nothing has been recorded.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.first(), self.transitions.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// When `state` was most recently entered, if ever.
    pub fn last_entered(&self, state: &S) -> Option<DateTime<Utc>> {
        self.transitions
            .iter()
            .rev()
            .find(|t| &t.to == state)
            .map(|t| t.timestamp)
    }

    pub fn transitions(&self) -> &[StateTransition<S>] {
        &self.transitions
    }
}
