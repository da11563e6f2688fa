//! Pure transition queries over the state graph.
//!
//! Every query takes raw state strings as stored in `EstadoRep`. Unknown
//! strings never produce an error: they log a warning and answer
//! conservatively (`false` or an empty list), so UI code can call these
//! without any error handling.

use crate::core::{RepairState, State, StateGraph, REPAIR_GRAPH};
use tracing::warn;

/// Answers transition questions against a [`StateGraph`].
///
/// Stateless apart from a shared reference to the graph, so one instance can
/// be used from any number of threads at once.
///
/// # Example
///
/// ```rust
/// use repair_workflow::validator::TransitionValidator;
///
/// let validator = TransitionValidator::default();
///
/// assert!(validator.is_transition_valid("Aceptado", "Repuestos"));
/// assert!(!validator.is_transition_valid("Repuestos", "Reparado"));
/// assert!(validator.is_terminal_state("Cancelado"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TransitionValidator {
    graph: &'static StateGraph,
}

impl Default for TransitionValidator {
    fn default() -> Self {
        Self::new(&REPAIR_GRAPH)
    }
}

impl TransitionValidator {
    pub fn new(graph: &'static StateGraph) -> Self {
        Self { graph }
    }

    pub fn graph(&self) -> &'static StateGraph {
        self.graph
    }

    /// Whether a record in `current` may move to `target`.
    ///
    /// Fails closed: unknown `current` logs a warning and returns `false`.
    /// Re-entering the same state is never valid.
    pub fn is_transition_valid(&self, current: &str, target: &str) -> bool {
        let Some(from) = self.known(current) else {
            return false;
        };
        if current == target {
            return false;
        }
        match target.parse::<RepairState>() {
            Ok(to) => self.graph.has_edge(from, to),
            Err(_) => false,
        }
    }

    /// Legal next states for `current`, in the order they should be offered.
    ///
    /// Unknown `current` logs a warning and yields an empty list.
    pub fn allowed_next_states(&self, current: &str) -> &'static [RepairState] {
        match self.known(current) {
            Some(state) => self.graph.successors(state),
            None => &[],
        }
    }

    /// True only for Finalizado, Abandonado and Cancelado.
    pub fn is_terminal_state(&self, state: &str) -> bool {
        if !self.allowed_next_states(state).is_empty() {
            return false;
        }
        state
            .parse::<RepairState>()
            .map(RepairState::is_terminal)
            .unwrap_or(false)
    }

    /// Set membership in the legacy states; the graph is not consulted.
    pub fn is_legacy_state(&self, state: &str) -> bool {
        state
            .parse::<RepairState>()
            .map(|s| s.is_legacy())
            .unwrap_or(false)
    }

    /// Whether entering `state` needs a written justification.
    ///
    /// This only flags the requirement; nothing here checks the text exists.
    pub fn requires_observations(&self, state: &str) -> bool {
        state
            .parse::<RepairState>()
            .map(RepairState::requires_observations)
            .unwrap_or(false)
    }

    /// Human-readable summary of moving from `current` to `target`.
    ///
    /// Does not validate the pair; call [`Self::is_transition_valid`] first.
    /// An invalid pair still gets a best-effort description.
    pub fn describe_transition(&self, current: &str, target: &str) -> String {
        let from = current.parse::<RepairState>().ok();
        let to = target.parse::<RepairState>().ok();

        match (from, to) {
            (Some(RepairState::Aceptado), Some(RepairState::Repuestos)) => {
                "El estado cambiará a Repuestos: reparación pausada esperando repuestos".to_string()
            }
            (Some(RepairState::Repuestos), Some(RepairState::Aceptado)) => {
                "El estado cambiará a Aceptado: repuestos llegados, se retoma la reparación"
                    .to_string()
            }
            (_, Some(to)) if to.is_terminal() => format!(
                "Atención: el estado cambiará a {to}, un estado final. La reparación no podrá cambiar de estado después"
            ),
            _ => format!("El estado cambiará a {target}"),
        }
    }

    fn known(&self, current: &str) -> Option<RepairState> {
        match current.parse::<RepairState>() {
            Ok(state) if self.graph.contains(state) => Some(state),
            _ => {
                warn!(state = current, "Unknown repair state, no transitions available");
                None
            }
        }
    }
}

/// [`TransitionValidator::is_transition_valid`] on the canonical graph.
pub fn is_transition_valid(current: &str, target: &str) -> bool {
    TransitionValidator::default().is_transition_valid(current, target)
}

/// [`TransitionValidator::allowed_next_states`] on the canonical graph.
pub fn allowed_next_states(current: &str) -> &'static [RepairState] {
    TransitionValidator::default().allowed_next_states(current)
}

/// [`TransitionValidator::is_terminal_state`] on the canonical graph.
pub fn is_terminal_state(state: &str) -> bool {
    TransitionValidator::default().is_terminal_state(state)
}

pub fn is_legacy_state(state: &str) -> bool {
    TransitionValidator::default().is_legacy_state(state)
}

pub fn requires_observations(state: &str) -> bool {
    TransitionValidator::default().requires_observations(state)
}

pub fn describe_transition(current: &str, target: &str) -> String {
    TransitionValidator::default().describe_transition(current, target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn capture_warnings<T>(f: impl FnOnce() -> T) -> (T, String) {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .finish();

        let result = tracing::subscriber::with_default(subscriber, f);
        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        (result, output)
    }

    #[test]
    fn unknown_current_state_logs_a_warning() {
        let (valid, output) = capture_warnings(|| is_transition_valid("NoSuchState", "Recibido"));
        assert!(!valid);
        assert!(output.contains("WARN"), "{output}");
        assert!(output.contains("state=\"NoSuchState\""), "{output}");

        let (next, output) = capture_warnings(|| allowed_next_states("NoSuchState"));
        assert!(next.is_empty());
        assert!(output.contains("WARN"), "{output}");
        assert!(output.contains("state=\"NoSuchState\""), "{output}");
    }

    #[test]
    fn known_states_log_nothing() {
        let (next, output) = capture_warnings(|| allowed_next_states("Recibido"));
        assert_eq!(next, &[RepairState::Revisado]);
        assert!(output.is_empty(), "{output}");
    }

    #[test]
    fn follows_declared_edges() {
        assert!(is_transition_valid("Consulta", "Respondido"));
        assert!(is_transition_valid("Presupuestado", "Aceptado"));
        assert!(is_transition_valid("Cobrado", "Enviado"));
        assert!(!is_transition_valid("Consulta", "Reparado"));
        assert!(!is_transition_valid("Recibido", "Cancelado"));
    }

    #[test]
    fn self_transitions_are_never_valid() {
        for state in RepairState::ALL {
            assert!(!is_transition_valid(state.as_str(), state.as_str()));
        }
    }

    #[test]
    fn parts_cycle_goes_both_ways() {
        assert!(is_transition_valid("Aceptado", "Repuestos"));
        assert!(is_transition_valid("Repuestos", "Aceptado"));
        assert!(!is_transition_valid("Repuestos", "Reparado"));
        assert!(!is_transition_valid("Repuestos", "Presupuestado"));
    }

    #[test]
    fn unknown_states_degrade_gracefully() {
        assert!(!is_transition_valid("NoSuchState", "Recibido"));
        assert!(!is_transition_valid("Recibido", "NoSuchState"));
        assert!(allowed_next_states("NoSuchState").is_empty());
        assert!(!is_terminal_state("NoSuchState"));
        assert!(!is_legacy_state("NoSuchState"));
        assert!(!requires_observations("NoSuchState"));
    }

    #[test]
    fn allowed_next_states_in_declaration_order() {
        assert_eq!(
            allowed_next_states("Respondido"),
            &[
                RepairState::Transito,
                RepairState::Rechazado,
                RepairState::Cancelado
            ]
        );
        assert!(allowed_next_states("Finalizado").is_empty());
    }

    #[test]
    fn terminal_classification_is_exact() {
        for state in RepairState::ALL {
            let expected = RepairState::TERMINAL.contains(&state);
            assert_eq!(is_terminal_state(state.as_str()), expected, "{state}");
            assert_eq!(
                allowed_next_states(state.as_str()).is_empty(),
                expected,
                "{state}"
            );
        }
    }

    #[test]
    fn legacy_classification_is_exact() {
        for state in ["Reparar", "Entregado", "Venta", "Liquidación", "Indefinido"] {
            assert!(is_legacy_state(state), "{state}");
        }
        for state in RepairState::CURRENT {
            assert!(!is_legacy_state(state.as_str()), "{state}");
        }
    }

    #[test]
    fn observation_requirement_is_exact() {
        for state in RepairState::ALL {
            let expected = matches!(
                state,
                RepairState::Rechazado
                    | RepairState::Cancelado
                    | RepairState::Abandonado
                    | RepairState::Repuestos
            );
            assert_eq!(requires_observations(state.as_str()), expected, "{state}");
        }
        assert!(!requires_observations("Reparado"));
    }

    #[test]
    fn legacy_records_follow_migration_edges() {
        assert!(is_transition_valid("Reparar", "Repuestos"));
        assert!(is_transition_valid("Liquidación", "Finalizado"));
        assert!(is_transition_valid("Indefinido", "Recibido"));
        assert!(!is_transition_valid("Entregado", "Cobrado"));
        assert!(!is_transition_valid("Aceptado", "Reparar"));
    }

    #[test]
    fn describes_parts_cycle() {
        assert!(describe_transition("Aceptado", "Repuestos")
            .contains("pausada esperando repuestos"));
        assert!(describe_transition("Repuestos", "Aceptado")
            .contains("repuestos llegados, se retoma la reparación"));
    }

    #[test]
    fn describes_terminal_and_default_moves() {
        let terminal = describe_transition("Repuestos", "Cancelado");
        assert!(terminal.starts_with("Atención"));
        assert!(terminal.contains("Cancelado"));

        assert_eq!(
            describe_transition("Recibido", "Revisado"),
            "El estado cambiará a Revisado"
        );
    }

    #[test]
    fn describe_does_not_validate() {
        assert_eq!(
            describe_transition("Repuestos", "Reparado"),
            "El estado cambiará a Reparado"
        );
        assert_eq!(
            describe_transition("NoSuchState", "Otro"),
            "El estado cambiará a Otro"
        );
    }
}
