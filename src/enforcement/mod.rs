//! Pre-commit checks for state changes, accumulating every violation.
//!
//! The validator answers one question at a time. Before showing a
//! confirmation dialog the UI usually wants all the reasons a change is
//! blocked at once, so these checks use Stillwater's `Validation` and report
//! every failure instead of stopping at the first.
//!
//! The checks are advisory. `TransitionExecutor` never runs them.
//!
//! # Example
//!
//! ```rust
//! use repair_workflow::enforcement::{PreflightBuilder, TransitionRequest};
//!
//! let rules = PreflightBuilder::standard().build();
//!
//! let request = TransitionRequest::new("Aceptado", "Repuestos")
//!     .with_observations("Falta el gimbal");
//! assert!(rules.check(&request).is_success());
//!
//! let blank = TransitionRequest::new("Aceptado", "Repuestos");
//! assert!(rules.check(&blank).is_failure());
//! ```

pub mod builder;
pub mod context;
pub mod rules;
pub mod violations;

pub use builder::PreflightBuilder;
pub use context::TransitionRequest;
pub use rules::PreflightRules;
pub use violations::TransitionViolation;
