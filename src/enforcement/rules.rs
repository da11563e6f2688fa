//! Pre-commit rules evaluated with `Validation`.

use crate::core::RepairState;
use crate::enforcement::context::TransitionRequest;
use crate::enforcement::violations::TransitionViolation;
use crate::validator::TransitionValidator;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

pub type PreflightCheck =
    Box<dyn Fn(&TransitionRequest) -> Validation<(), NonEmptyVec<TransitionViolation>> + Send + Sync>;

pub struct PreflightRules {
    pub(crate) validator: TransitionValidator,
    pub(crate) check_states: bool,
    pub(crate) check_edges: bool,
    pub(crate) check_observations: bool,
    pub(crate) required_checks: Vec<PreflightCheck>,
}

impl PreflightRules {
    /// Run every enabled check and collect all violations.
    pub fn check(
        &self,
        request: &TransitionRequest,
    ) -> Validation<(), NonEmptyVec<TransitionViolation>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<TransitionViolation>>> = Vec::new();

        let current = request.current.parse::<RepairState>().ok();
        let target = request.target.parse::<RepairState>().ok();

        if self.check_states {
            if current.is_none() {
                checks.push(Validation::fail(TransitionViolation::UnknownCurrentState {
                    state: request.current.clone(),
                }));
            }
            if target.is_none() {
                checks.push(Validation::fail(TransitionViolation::UnknownTargetState {
                    state: request.target.clone(),
                }));
            }
        }

        // Edge checks only make sense once both ends are known states.
        if self.check_edges && current.is_some() && target.is_some() {
            let check = if request.current == request.target {
                Validation::fail(TransitionViolation::SelfTransition {
                    state: request.current.clone(),
                })
            } else if !self
                .validator
                .is_transition_valid(&request.current, &request.target)
            {
                Validation::fail(TransitionViolation::NotAllowed {
                    from: request.current.clone(),
                    to: request.target.clone(),
                })
            } else {
                Validation::success(())
            };
            checks.push(check);
        }

        if self.check_observations
            && self.validator.requires_observations(&request.target)
            && request.observations_text().is_none()
        {
            checks.push(Validation::fail(TransitionViolation::MissingObservations {
                state: request.target.clone(),
            }));
        }

        for check_fn in &self.required_checks {
            checks.push(check_fn(request));
        }

        Validation::all_vec(checks).map(|_| ())
    }
}
