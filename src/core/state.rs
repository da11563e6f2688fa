//! Core State trait for workflow states.
//!
//! All workflow states implement this trait, which provides pure methods
//! for inspecting state properties without side effects.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Trait for workflow states.
///
/// All methods are pure. States are immutable values describing where a
/// record currently sits in its lifecycle.
///
/// # Required Traits
///
/// - `Clone`: states are copied into history entries
/// - `PartialEq`: states are compared when validating transitions
/// - `Debug`: states show up in diagnostics
/// - `Serialize` + `Deserialize`: states are persisted with the record
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Name used on the wire and in logs.
    fn name(&self) -> &str;

    /// Check if this is a final (terminal) state.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }

    /// Check if this state only exists for records written by an older
    /// workflow version.
    ///
    /// Default implementation returns `false`.
    fn is_legacy(&self) -> bool {
        false
    }
}
