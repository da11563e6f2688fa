//! Lifecycle stage, progress and status-control visibility.
//!
//! Everything here is derived from the state graph, the state
//! classifications and the record's milestone dates; nothing is stored.
//!
//! Rechazado, Cancelado and Abandonado can be entered from early or late in
//! the lifecycle, so for those states the milestone dates decide how far the
//! repair actually got.

use crate::core::{RepairState, State};
use crate::milestones::{Milestone, Milestones};
use crate::validator::TransitionValidator;
use serde::Serialize;

/// Coarse phase of a repair, in lifecycle order.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize)]
pub enum Stage {
    Intake,
    Inspection,
    Quote,
    Repair,
    Completed,
    Billing,
    Closed,
    /// Record still carries a state from the previous workflow.
    Legacy,
}

impl Stage {
    pub fn of(state: RepairState) -> Stage {
        use RepairState::*;
        match state {
            Consulta | Respondido | Transito => Stage::Intake,
            Recibido | Revisado => Stage::Inspection,
            Presupuestado => Stage::Quote,
            Aceptado | Repuestos | Rechazado => Stage::Repair,
            Reparado | Diagnosticado => Stage::Completed,
            Cobrado | Enviado => Stage::Billing,
            Finalizado | Abandonado | Cancelado => Stage::Closed,
            Reparar | Entregado | Venta | Liquidacion | Indefinido => Stage::Legacy,
        }
    }

    /// Stage a record has passed once `milestone` is dated.
    ///
    /// Cerrado says nothing about how far the repair got.
    pub fn reached_by(milestone: Milestone) -> Option<Stage> {
        match milestone {
            Milestone::Consulta => Some(Stage::Intake),
            Milestone::Recibido => Some(Stage::Inspection),
            Milestone::Presupuestado => Some(Stage::Quote),
            Milestone::Aceptado => Some(Stage::Repair),
            Milestone::Reparado => Some(Stage::Completed),
            Milestone::Cobrado | Milestone::Entregado => Some(Stage::Billing),
            Milestone::Cerrado => None,
        }
    }

    /// Furthest stage proven by the dated milestones.
    pub fn furthest_reached(milestones: &Milestones) -> Option<Stage> {
        Milestone::ALL
            .iter()
            .filter(|m| milestones.get(**m).is_some())
            .filter_map(|m| Self::reached_by(*m))
            .max()
    }

    /// Share of the lifecycle done once this stage is reached.
    pub fn percent(self) -> Option<u8> {
        match self {
            Stage::Intake => Some(0),
            Stage::Inspection => Some(20),
            Stage::Quote => Some(40),
            Stage::Repair => Some(55),
            Stage::Completed => Some(75),
            Stage::Billing => Some(90),
            Stage::Closed => Some(100),
            Stage::Legacy => None,
        }
    }
}

/// Whether `state` can be entered from more than one point of the lifecycle.
fn stage_depends_on_history(state: RepairState) -> bool {
    matches!(
        state,
        RepairState::Rechazado | RepairState::Cancelado | RepairState::Abandonado
    )
}

/// Furthest stage a record in `state` has actually passed.
///
/// Only Finalizado counts as Closed; a cancelled or abandoned ticket stays at
/// the stage its milestones prove. `None` for legacy states and for
/// history-dependent states with no dated milestones.
pub fn reached_stage(state: RepairState, milestones: &Milestones) -> Option<Stage> {
    if state.is_legacy() {
        None
    } else if stage_depends_on_history(state) {
        Stage::furthest_reached(milestones)
    } else {
        Some(Stage::of(state))
    }
}

/// Progress bar value when the stored state alone decides it.
///
/// `None` for legacy states, unknown strings, and Rechazado, Cancelado and
/// Abandonado, whose progress depends on the milestones (see
/// [`StatusControls`]).
pub fn progress_percent(state: &str) -> Option<u8> {
    let state = state.parse::<RepairState>().ok()?;
    if stage_depends_on_history(state) {
        return None;
    }
    reached_stage(state, &Milestones::default()).and_then(Stage::percent)
}

/// One entry of the next-state selector.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StateOption {
    pub state: RepairState,
    pub requires_observations: bool,
}

/// What the status panel of a repair should show.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StatusControls {
    pub stage: Option<Stage>,
    pub progress: Option<u8>,
    pub options: Vec<StateOption>,
    /// Whether the next-state selector is shown at all.
    pub selector_visible: bool,
    pub quote_visible: bool,
    pub billing_visible: bool,
    pub legacy_badge: bool,
}

impl StatusControls {
    /// Controls for a record currently in `current` with the given
    /// milestone dates.
    ///
    /// Legacy records can only be migrated by an admin. Terminal and unknown
    /// states never show the selector.
    pub fn for_state(current: &str, milestones: &Milestones, is_admin: bool) -> Self {
        Self::with_validator(
            &TransitionValidator::default(),
            current,
            milestones,
            is_admin,
        )
    }

    pub fn with_validator(
        validator: &TransitionValidator,
        current: &str,
        milestones: &Milestones,
        is_admin: bool,
    ) -> Self {
        let parsed = current.parse::<RepairState>().ok();
        let stage = parsed.map(Stage::of);
        let reached = parsed.and_then(|s| reached_stage(s, milestones));
        let legacy = parsed.is_some_and(|s| s.is_legacy());

        let options: Vec<StateOption> = validator
            .allowed_next_states(current)
            .iter()
            .map(|&state| StateOption {
                state,
                requires_observations: state.requires_observations(),
            })
            .collect();

        let selector_visible = !options.is_empty() && (!legacy || is_admin);
        let passed = |min: Stage| reached.is_some_and(|s| s >= min);

        Self {
            stage,
            progress: reached.and_then(Stage::percent),
            options,
            selector_visible,
            quote_visible: passed(Stage::Quote),
            billing_visible: passed(Stage::Completed),
            legacy_badge: legacy,
        }
    }
}
