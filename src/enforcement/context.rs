//! Input to pre-commit checks.

/// A transition the user is about to commit.
#[derive(Clone, Debug)]
pub struct TransitionRequest {
    /// Stored `EstadoRep` value, possibly unknown or legacy
    pub current: String,
    pub target: String,
    pub observations: Option<String>,
}

impl TransitionRequest {
    pub fn new(current: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            current: current.into(),
            target: target.into(),
            observations: None,
        }
    }

    pub fn with_observations(mut self, observations: impl Into<String>) -> Self {
        self.observations = Some(observations.into());
        self
    }

    /// Observations with surrounding whitespace removed; blank counts as none.
    pub fn observations_text(&self) -> Option<&str> {
        self.observations
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }
}
