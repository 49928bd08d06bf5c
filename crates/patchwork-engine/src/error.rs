//! Engine-specific error types.

use std::error::Error;
use std::fmt;

use patchwork_core::{Interval, PatchId};

/// Errors that can occur during engine operations.
///
/// Every variant is a caller contract violation; none is transient, so
/// retrying the same call always fails the same way.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EngineError {
    /// A kill-list names more elements than the engine holds.
    KillListTooLong {
        /// Number of indices in the kill-list.
        requested: usize,
        /// Number of elements in the engine.
        available: usize,
    },
    /// A kill-list or copy-list index falls outside the engine's domain.
    KillIndexOutOfRange {
        /// The offending index, as given by the caller.
        index: i64,
        /// The engine domain at the time of the call.
        domain: Interval,
    },
    /// A kill-list names the same element twice.
    DuplicateKillIndex {
        /// The repeated index, as given by the caller.
        index: i64,
    },
    /// `sync` was given a domain whose size differs from the engine's.
    SyncSizeMismatch {
        /// Current number of elements.
        current: usize,
        /// Size of the requested domain.
        requested: usize,
    },
    /// A view subset reaches outside its parent.
    ViewOutOfBounds {
        /// What went wrong.
        reason: String,
    },
    /// A detached view handle was resolved after a structural change.
    StaleView {
        /// Generation captured by the handle.
        view_generation: u32,
        /// Current generation of the engine.
        engine_generation: u32,
    },
    /// An operation named a patch other than the one the array owns.
    WrongPatch {
        /// The patch owned by the array.
        expected: PatchId,
        /// The patch named by the caller.
        got: PatchId,
    },
    /// The operation is only meaningful on a remote (multi-context) engine.
    Unsupported {
        /// Name of the unsupported operation.
        operation: &'static str,
    },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KillListTooLong {
                requested,
                available,
            } => {
                write!(
                    f,
                    "kill-list too long: {requested} indices for {available} elements"
                )
            }
            Self::KillIndexOutOfRange { index, domain } => {
                write!(f, "index {index} outside engine domain {domain}")
            }
            Self::DuplicateKillIndex { index } => {
                write!(f, "index {index} appears more than once in kill-list")
            }
            Self::SyncSizeMismatch { current, requested } => {
                write!(
                    f,
                    "sync domain size {requested} does not match engine size {current}"
                )
            }
            Self::ViewOutOfBounds { reason } => write!(f, "view out of bounds: {reason}"),
            Self::StaleView {
                view_generation,
                engine_generation,
            } => {
                write!(
                    f,
                    "stale view: captured at generation {view_generation}, engine at {engine_generation}"
                )
            }
            Self::WrongPatch { expected, got } => {
                write!(f, "array owns patch {expected}, operation named patch {got}")
            }
            Self::Unsupported { operation } => {
                write!(f, "{operation} is not supported on a single-context engine")
            }
        }
    }
}

impl Error for EngineError {}
