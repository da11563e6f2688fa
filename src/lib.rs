//! Repair workflow: the status engine behind a drone repair shop.
//!
//! A repair ticket moves through a fixed lifecycle, from first consultation
//! to a closed ticket. This crate owns that lifecycle and nothing else:
//! which states exist, which moves between them are allowed, and what the
//! UI should offer at each point.
//!
//! The crate follows a "pure core, imperative shell" split:
//!
//! - **Core**: the immutable [`core::REPAIR_GRAPH`] and pure queries over it
//!   ([`validator`], [`milestones`], [`progress`], [`enforcement`]). These
//!   never fail and never block.
//! - **Shell**: [`executor::TransitionExecutor`] writes an already validated
//!   change to a store as a Stillwater effect.
//!
//! # Example
//!
//! ```rust
//! use repair_workflow::validator::{allowed_next_states, describe_transition, is_transition_valid};
//! use repair_workflow::core::RepairState;
//!
//! assert!(is_transition_valid("Aceptado", "Repuestos"));
//! assert!(is_transition_valid("Repuestos", "Aceptado"));
//! assert!(!is_transition_valid("Repuestos", "Reparado"));
//!
//! assert_eq!(
//!     allowed_next_states("Reparado"),
//!     &[RepairState::Cobrado, RepairState::Finalizado]
//! );
//!
//! // Unknown states fail closed instead of erroring.
//! assert!(allowed_next_states("NoSuchState").is_empty());
//!
//! println!("{}", describe_transition("Aceptado", "Repuestos"));
//! ```

pub mod config;
pub mod core;
pub mod enforcement;
pub mod executor;
pub mod milestones;
pub mod progress;
pub mod validator;

// Re-export commonly used types
pub use crate::config::{WorkflowConfig, WriteMode};
pub use crate::core::{RepairState, State, StateGraph, REPAIR_GRAPH};
pub use crate::executor::{RepairRecord, TransitionCommand, TransitionExecutor};
pub use crate::validator::TransitionValidator;
