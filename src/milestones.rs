//! Milestone timestamps stamped when a record first reaches a state.

use crate::core::RepairState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A dated point in the life of a repair.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Milestone {
    Consulta,
    Recibido,
    Presupuestado,
    Aceptado,
    /// Bench work finished, repaired or diagnosed only.
    Reparado,
    Cobrado,
    /// Drone back with the customer, shipped or picked up.
    Entregado,
    /// Ticket closed for any reason.
    Cerrado,
}

impl Milestone {
    pub const ALL: [Milestone; 8] = [
        Self::Consulta,
        Self::Recibido,
        Self::Presupuestado,
        Self::Aceptado,
        Self::Reparado,
        Self::Cobrado,
        Self::Entregado,
        Self::Cerrado,
    ];

    /// Milestones reached by entering `state`.
    ///
    /// Finalizado implies delivery: a repair closed without passing through
    /// Enviado was picked up at the shop.
    pub fn for_state(state: RepairState) -> &'static [Milestone] {
        match state {
            RepairState::Consulta => &[Self::Consulta],
            RepairState::Recibido => &[Self::Recibido],
            RepairState::Presupuestado => &[Self::Presupuestado],
            RepairState::Aceptado => &[Self::Aceptado],
            RepairState::Reparado | RepairState::Diagnosticado => &[Self::Reparado],
            RepairState::Cobrado => &[Self::Cobrado],
            RepairState::Enviado => &[Self::Entregado],
            RepairState::Finalizado => &[Self::Entregado, Self::Cerrado],
            RepairState::Abandonado | RepairState::Cancelado => &[Self::Cerrado],
            RepairState::Respondido
            | RepairState::Transito
            | RepairState::Revisado
            | RepairState::Repuestos
            | RepairState::Rechazado
            | RepairState::Reparar
            | RepairState::Entregado
            | RepairState::Venta
            | RepairState::Liquidacion
            | RepairState::Indefinido => &[],
        }
    }
}

/// The milestone timestamp fields of a repair record.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Milestones {
    #[serde(default)]
    pub fecha_consulta: Option<DateTime<Utc>>,
    #[serde(default)]
    pub fecha_recibido: Option<DateTime<Utc>>,
    #[serde(default)]
    pub fecha_presupuestado: Option<DateTime<Utc>>,
    #[serde(default)]
    pub fecha_aceptado: Option<DateTime<Utc>>,
    #[serde(default)]
    pub fecha_reparado: Option<DateTime<Utc>>,
    #[serde(default)]
    pub fecha_cobrado: Option<DateTime<Utc>>,
    #[serde(default)]
    pub fecha_entregado: Option<DateTime<Utc>>,
    #[serde(default)]
    pub fecha_cerrado: Option<DateTime<Utc>>,
}

impl Milestones {
    pub fn get(&self, milestone: Milestone) -> Option<DateTime<Utc>> {
        *self.slot(milestone)
    }

    /// Stamp every milestone `state` reaches that is still unset.
    ///
    /// Existing dates are never overwritten, so re-entering Aceptado after
    /// waiting for parts keeps the original acceptance date. Returns the
    /// milestones that were set by this call.
    pub fn stamp(&mut self, state: RepairState, at: DateTime<Utc>) -> Vec<Milestone> {
        let mut stamped = Vec::new();
        for &milestone in Milestone::for_state(state) {
            let slot = self.slot_mut(milestone);
            if slot.is_none() {
                *slot = Some(at);
                stamped.push(milestone);
            }
        }
        stamped
    }

    fn slot(&self, milestone: Milestone) -> &Option<DateTime<Utc>> {
        match milestone {
            Milestone::Consulta => &self.fecha_consulta,
            Milestone::Recibido => &self.fecha_recibido,
            Milestone::Presupuestado => &self.fecha_presupuestado,
            Milestone::Aceptado => &self.fecha_aceptado,
            Milestone::Reparado => &self.fecha_reparado,
            Milestone::Cobrado => &self.fecha_cobrado,
            Milestone::Entregado => &self.fecha_entregado,
            Milestone::Cerrado => &self.fecha_cerrado,
        }
    }

    fn slot_mut(&mut self, milestone: Milestone) -> &mut Option<DateTime<Utc>> {
        match milestone {
            Milestone::Consulta => &mut self.fecha_consulta,
            Milestone::Recibido => &mut self.fecha_recibido,
            Milestone::Presupuestado => &mut self.fecha_presupuestado,
            Milestone::Aceptado => &mut self.fecha_aceptado,
            Milestone::Reparado => &mut self.fecha_reparado,
            Milestone::Cobrado => &mut self.fecha_cobrado,
            Milestone::Entregado => &mut self.fecha_entregado,
            Milestone::Cerrado => &mut self.fecha_cerrado,
        }
    }
}
