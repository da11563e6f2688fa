//! The fields of a repair record the workflow reads and writes.

use crate::core::{RepairState, StateHistory, StateTransition};
use crate::milestones::{Milestone, Milestones};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

/// Workflow view of a repair ticket.
///
/// The hosting application owns the full record (customer, drone, quote,
/// photos...). Only the state, its milestone dates and the audit trail
/// live here.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RepairRecord {
    pub id: String,
    /// Raw stored state. May be legacy or even unknown on old records.
    #[serde(rename = "EstadoRep")]
    pub estado_rep: String,
    #[serde(flatten)]
    pub milestones: Milestones,
    #[serde(default)]
    pub historial: StateHistory<RepairState>,
    #[serde(default)]
    pub observaciones: Option<String>,
}

impl Default for RepairRecord {
    fn default() -> Self {
        Self::new()
    }
}

impl RepairRecord {
    /// A fresh ticket in Consulta with its consultation date stamped.
    pub fn new() -> Self {
        let mut milestones = Milestones::default();
        milestones.stamp(RepairState::Consulta, Utc::now());
        Self {
            id: Uuid::new_v4().to_string(),
            estado_rep: RepairState::Consulta.as_str().to_string(),
            milestones,
            historial: StateHistory::new(),
            observaciones: None,
        }
    }

    /// A record with an arbitrary stored state, as loaded from old data.
    pub fn with_state(id: impl Into<String>, estado_rep: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            estado_rep: estado_rep.into(),
            milestones: Milestones::default(),
            historial: StateHistory::new(),
            observaciones: None,
        }
    }

    /// The stored state, if it names a known state.
    pub fn state(&self) -> Option<RepairState> {
        self.estado_rep.parse().ok()
    }

    /// Move the record to `target` and stamp the milestones it reaches.
    ///
    /// Does not check the transition is allowed.
    pub(crate) fn apply(
        &mut self,
        target: RepairState,
        observations: Option<String>,
        at: DateTime<Utc>,
    ) -> Vec<Milestone> {
        match self.state() {
            Some(from) => {
                self.historial = self.historial.record(StateTransition {
                    from,
                    to: target,
                    timestamp: at,
                    observations: observations.clone(),
                });
            }
            None => warn!(
                id = %self.id,
                state = %self.estado_rep,
                "Leaving unknown repair state, transition not recorded in history"
            ),
        }

        self.estado_rep = target.as_str().to_string();
        if observations.is_some() {
            self.observaciones = observations;
        }
        self.milestones.stamp(target, at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_record_starts_in_consulta() {
        let record = RepairRecord::new();
        assert_eq!(record.estado_rep, "Consulta");
        assert_eq!(record.state(), Some(RepairState::Consulta));
        assert!(record.milestones.fecha_consulta.is_some());
        assert!(record.historial.transitions().is_empty());
        assert!(Uuid::parse_str(&record.id).is_ok());
    }

    #[test]
    fn apply_updates_state_history_and_milestones() {
        let mut record = RepairRecord::with_state("rep-1", "Revisado");
        let at = Utc::now();

        let stamped = record.apply(RepairState::Presupuestado, None, at);

        assert_eq!(record.estado_rep, "Presupuestado");
        assert_eq!(stamped, vec![Milestone::Presupuestado]);
        assert_eq!(record.milestones.fecha_presupuestado, Some(at));
        assert_eq!(
            record.historial.get_path(),
            vec![&RepairState::Revisado, &RepairState::Presupuestado]
        );
    }

    #[test]
    fn apply_keeps_previous_observations_when_none_given() {
        let mut record = RepairRecord::with_state("rep-2", "Aceptado");
        record.apply(
            RepairState::Repuestos,
            Some("Esperando hélices".to_string()),
            Utc::now(),
        );
        record.apply(RepairState::Aceptado, None, Utc::now());

        assert_eq!(record.observaciones.as_deref(), Some("Esperando hélices"));
    }

    #[test]
    fn apply_from_unknown_state_skips_history() {
        let mut record = RepairRecord::with_state("rep-3", "Perdido");
        record.apply(RepairState::Cancelado, None, Utc::now());

        assert_eq!(record.estado_rep, "Cancelado");
        assert!(record.historial.transitions().is_empty());
        assert!(record.milestones.fecha_cerrado.is_some());
    }

    #[test]
    fn serializes_with_estado_rep_field() {
        let record = RepairRecord::with_state("rep-4", "Liquidación");
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["EstadoRep"], "Liquidación");
        assert!(json.get("fecha_consulta").is_some());

        let back: RepairRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back.state(), Some(RepairState::Liquidacion));
    }
}
