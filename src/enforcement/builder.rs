//! Builder API for pre-commit rules.

use crate::enforcement::context::TransitionRequest;
use crate::enforcement::rules::{PreflightCheck, PreflightRules};
use crate::enforcement::violations::TransitionViolation;
use crate::validator::TransitionValidator;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

pub struct PreflightBuilder {
    validator: TransitionValidator,
    check_states: bool,
    check_edges: bool,
    check_observations: bool,
    required_checks: Vec<PreflightCheck>,
}

impl PreflightBuilder {
    /// A builder with no checks enabled.
    pub fn new() -> Self {
        Self {
            validator: TransitionValidator::default(),
            check_states: false,
            check_edges: false,
            check_observations: false,
            required_checks: Vec::new(),
        }
    }

    /// Known states, allowed edge and required observations.
    pub fn standard() -> Self {
        Self::new()
            .check_states()
            .check_edges()
            .check_observations()
    }

    pub fn validator(mut self, validator: TransitionValidator) -> Self {
        self.validator = validator;
        self
    }

    pub fn check_states(mut self) -> Self {
        self.check_states = true;
        self
    }

    pub fn check_edges(mut self) -> Self {
        self.check_edges = true;
        self
    }

    pub fn check_observations(mut self) -> Self {
        self.check_observations = true;
        self
    }

    pub fn require<F>(mut self, check: F) -> Self
    where
        F: Fn(&TransitionRequest) -> Validation<(), NonEmptyVec<TransitionViolation>>
            + Send
            + Sync
            + 'static,
    {
        self.required_checks.push(Box::new(check));
        self
    }

    pub fn require_pred<F>(mut self, predicate: F, error_msg: String) -> Self
    where
        F: Fn(&TransitionRequest) -> bool + Send + Sync + 'static,
    {
        let check = move |request: &TransitionRequest| {
            if predicate(request) {
                Validation::success(())
            } else {
                Validation::fail(TransitionViolation::CustomCheckFailed {
                    message: error_msg.clone(),
                })
            }
        };
        self.required_checks.push(Box::new(check));
        self
    }

    pub fn build(self) -> PreflightRules {
        PreflightRules {
            validator: self.validator,
            check_states: self.check_states,
            check_edges: self.check_edges,
            check_observations: self.check_observations,
            required_checks: self.required_checks,
        }
    }
}

impl Default for PreflightBuilder {
    fn default() -> Self {
        Self::new()
    }
}
