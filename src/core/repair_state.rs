//! The repair ticket lifecycle states.

use super::state::State;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Returned when a stored state string names no known state.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown repair state '{0}'")]
pub struct UnknownState(pub String);

/// A point in the lifecycle of a repair ticket (`EstadoRep`).
///
/// The first sixteen variants are the current workflow. `Reparar`,
/// `Entregado`, `Venta`, `Liquidacion` and `Indefinido` are legacy states:
/// they only appear on records written by the previous workflow and act as
/// migration sources into the current graph.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum RepairState {
    Consulta,
    Respondido,
    Transito,
    Recibido,
    Revisado,
    Presupuestado,
    Aceptado,
    Repuestos,
    Rechazado,
    Reparado,
    Diagnosticado,
    Cobrado,
    Enviado,
    Finalizado,
    Abandonado,
    Cancelado,
    // legacy
    Reparar,
    Entregado,
    Venta,
    #[serde(rename = "Liquidación")]
    Liquidacion,
    Indefinido,
}

impl RepairState {
    /// Every state, current first, in declaration order.
    pub const ALL: [RepairState; 21] = [
        Self::Consulta,
        Self::Respondido,
        Self::Transito,
        Self::Recibido,
        Self::Revisado,
        Self::Presupuestado,
        Self::Aceptado,
        Self::Repuestos,
        Self::Rechazado,
        Self::Reparado,
        Self::Diagnosticado,
        Self::Cobrado,
        Self::Enviado,
        Self::Finalizado,
        Self::Abandonado,
        Self::Cancelado,
        Self::Reparar,
        Self::Entregado,
        Self::Venta,
        Self::Liquidacion,
        Self::Indefinido,
    ];

    pub const CURRENT: [RepairState; 16] = [
        Self::Consulta,
        Self::Respondido,
        Self::Transito,
        Self::Recibido,
        Self::Revisado,
        Self::Presupuestado,
        Self::Aceptado,
        Self::Repuestos,
        Self::Rechazado,
        Self::Reparado,
        Self::Diagnosticado,
        Self::Cobrado,
        Self::Enviado,
        Self::Finalizado,
        Self::Abandonado,
        Self::Cancelado,
    ];

    pub const LEGACY: [RepairState; 5] = [
        Self::Reparar,
        Self::Entregado,
        Self::Venta,
        Self::Liquidacion,
        Self::Indefinido,
    ];

    /// The only states allowed to have no outgoing transitions.
    pub const TERMINAL: [RepairState; 3] = [Self::Finalizado, Self::Abandonado, Self::Cancelado];

    /// Entering any of these states needs a free-text justification.
    pub const OBSERVATION_REQUIRED: [RepairState; 4] = [
        Self::Rechazado,
        Self::Cancelado,
        Self::Abandonado,
        Self::Repuestos,
    ];

    /// The wire name stored in `EstadoRep`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Consulta => "Consulta",
            Self::Respondido => "Respondido",
            Self::Transito => "Transito",
            Self::Recibido => "Recibido",
            Self::Revisado => "Revisado",
            Self::Presupuestado => "Presupuestado",
            Self::Aceptado => "Aceptado",
            Self::Repuestos => "Repuestos",
            Self::Rechazado => "Rechazado",
            Self::Reparado => "Reparado",
            Self::Diagnosticado => "Diagnosticado",
            Self::Cobrado => "Cobrado",
            Self::Enviado => "Enviado",
            Self::Finalizado => "Finalizado",
            Self::Abandonado => "Abandonado",
            Self::Cancelado => "Cancelado",
            Self::Reparar => "Reparar",
            Self::Entregado => "Entregado",
            Self::Venta => "Venta",
            Self::Liquidacion => "Liquidación",
            Self::Indefinido => "Indefinido",
        }
    }

    pub fn is_terminal(self) -> bool {
        Self::TERMINAL.contains(&self)
    }

    pub fn requires_observations(self) -> bool {
        Self::OBSERVATION_REQUIRED.contains(&self)
    }
}

impl State for RepairState {
    fn name(&self) -> &str {
        self.as_str()
    }

    fn is_final(&self) -> bool {
        self.is_terminal()
    }

    fn is_legacy(&self) -> bool {
        Self::LEGACY.contains(self)
    }
}

impl fmt::Display for RepairState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RepairState {
    type Err = UnknownState;

    /// Parses the exact wire name. No case folding or accent stripping:
    /// `"liquidacion"` is as unknown as `"NoSuchState"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| UnknownState(s.to_string()))
    }
}
