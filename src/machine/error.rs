//! Runtime errors reported by the fail-fast machine operations.

use thiserror::Error;

/// Errors returned by the `try_*` operations of [`Machine`](crate::Machine).
///
/// The plain operations never fail; they report the same conditions through
/// their return value and otherwise do nothing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MachineError {
    #[error("{machine}: {operation} before an initial state was set. Call .set_initial_state::<S>() first")]
    Uninitialized {
        machine: &'static str,
        operation: &'static str,
    },
}
