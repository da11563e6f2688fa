//! Core workflow types.
//!
//! This module holds the pure part of the engine:
//! - the `State` trait and the `RepairState` lifecycle
//! - the immutable `StateGraph` of allowed transitions
//! - immutable history of committed transitions
//!
//! Nothing in here performs I/O.

mod graph;
mod history;
mod repair_state;
mod state;

pub use graph::{GraphError, StateGraph, REPAIR_GRAPH};
pub use history::{StateHistory, StateTransition};
pub use repair_state::{RepairState, UnknownState};
pub use state::State;
