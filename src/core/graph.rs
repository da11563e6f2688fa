//! The authoritative transition graph.
//!
//! `REPAIR_GRAPH` is declared once as static data. Changing a business rule
//! means editing this table; there is no runtime mutation API.

use super::repair_state::RepairState;
use super::state::State;
use thiserror::Error;

use RepairState::*;

/// Authoring errors detected by [`StateGraph::validate`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("State '{0}' has no entry in the graph")]
    MissingState(RepairState),

    #[error("State '{0}' is declared more than once")]
    DuplicateState(RepairState),

    #[error("State '{0}' lists itself as a next state")]
    SelfLoop(RepairState),

    #[error("State '{0}' has no transitions but is not a terminal state")]
    UnexpectedDeadEnd(RepairState),

    #[error("Terminal state '{0}' has outgoing transitions")]
    TerminalWithEdges(RepairState),

    #[error("Legacy state '{to}' is reachable from '{from}'")]
    LegacyTarget { from: RepairState, to: RepairState },

    #[error("States '{0}' and '{1}' form an unexpected two-way cycle")]
    UnexpectedCycle(RepairState, RepairState),
}

/// Immutable map from a state to the ordered list of states it may move to.
///
/// Edge order is the order offered to users; it carries no other meaning.
#[derive(Debug)]
pub struct StateGraph {
    edges: &'static [(RepairState, &'static [RepairState])],
}

/// The repair workflow, current states first, then legacy migration edges.
pub static REPAIR_GRAPH: StateGraph = StateGraph {
    edges: &[
        (Consulta, &[Respondido, Cancelado]),
        (Respondido, &[Transito, Rechazado, Cancelado]),
        (Transito, &[Recibido, Cancelado]),
        (Recibido, &[Revisado]),
        (Revisado, &[Presupuestado]),
        (Presupuestado, &[Aceptado, Rechazado, Cancelado]),
        (
            Aceptado,
            &[Repuestos, Reparado, Rechazado, Cancelado, Abandonado],
        ),
        (Repuestos, &[Aceptado, Cancelado, Abandonado]),
        (Rechazado, &[Diagnosticado, Cancelado, Abandonado]),
        (Reparado, &[Cobrado, Finalizado]),
        (Diagnosticado, &[Cobrado, Finalizado]),
        (Cobrado, &[Enviado, Finalizado]),
        (Enviado, &[Finalizado]),
        (Finalizado, &[]),
        (Abandonado, &[]),
        (Cancelado, &[]),
        (
            Reparar,
            &[Aceptado, Repuestos, Reparado, Cancelado, Abandonado],
        ),
        (Entregado, &[Finalizado]),
        (Venta, &[Cobrado, Finalizado]),
        (Liquidacion, &[Cancelado, Finalizado]),
        (Indefinido, &[Consulta, Recibido, Cancelado]),
    ],
};

/// The two edges allowed to point back at each other.
const PARTS_CYCLE: (RepairState, RepairState) = (Aceptado, Repuestos);

impl StateGraph {
    /// Next states reachable from `state`, in declaration order.
    ///
    /// Returns an empty slice for terminal states.
    pub fn successors(&self, state: RepairState) -> &'static [RepairState] {
        self.edges
            .iter()
            .find(|(from, _)| *from == state)
            .map(|(_, to)| *to)
            .unwrap_or(&[])
    }

    pub fn contains(&self, state: RepairState) -> bool {
        self.edges.iter().any(|(from, _)| *from == state)
    }

    pub fn has_edge(&self, from: RepairState, to: RepairState) -> bool {
        self.successors(from).contains(&to)
    }

    /// Every declared state, in declaration order.
    pub fn states(&self) -> impl Iterator<Item = RepairState> + '_ {
        self.edges.iter().map(|(from, _)| *from)
    }

    /// Every edge as a `(from, to)` pair.
    pub fn edges(&self) -> impl Iterator<Item = (RepairState, RepairState)> + '_ {
        self.edges
            .iter()
            .flat_map(|(from, to)| to.iter().map(move |to| (*from, *to)))
    }

    /// Default state to migrate a legacy record into: its first declared
    /// migration edge. `None` for current states.
    pub fn migration_target(&self, state: RepairState) -> Option<RepairState> {
        if !state.is_legacy() {
            return None;
        }
        self.successors(state).first().copied()
    }

    /// Check the structural invariants of the graph.
    ///
    /// Returns the first problem found. The static graph always passes; this
    /// exists so a bad edit to the table fails the test suite.
    pub fn validate(&self) -> Result<(), GraphError> {
        for state in RepairState::ALL {
            match self.states().filter(|s| *s == state).count() {
                0 => return Err(GraphError::MissingState(state)),
                1 => {}
                _ => return Err(GraphError::DuplicateState(state)),
            }
        }

        for (from, to) in self.edges() {
            if from == to {
                return Err(GraphError::SelfLoop(from));
            }
            if to.is_legacy() {
                return Err(GraphError::LegacyTarget { from, to });
            }
            let reverse = self.has_edge(to, from);
            if reverse && (from, to) != PARTS_CYCLE && (to, from) != PARTS_CYCLE {
                return Err(GraphError::UnexpectedCycle(from, to));
            }
        }

        for state in self.states() {
            let dead_end = self.successors(state).is_empty();
            match (dead_end, state.is_terminal()) {
                (true, false) => return Err(GraphError::UnexpectedDeadEnd(state)),
                (false, true) => return Err(GraphError::TerminalWithEdges(state)),
                _ => {}
            }
        }

        Ok(())
    }
}
