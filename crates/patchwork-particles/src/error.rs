//! Particle-container error types.

use std::error::Error;
use std::fmt;

use patchwork_core::{AttributeId, Interval, PatchId};
use patchwork_engine::EngineError;

/// Errors returned by [`Particles`](crate::Particles) operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParticlesError {
    /// The container configuration failed validation.
    InvalidConfig {
        /// Which setting was rejected.
        reason: String,
    },
    /// A patch ID does not name a local patch.
    UnknownPatch {
        /// The requested patch.
        patch: PatchId,
        /// Number of local patches.
        num_patches: usize,
    },
    /// A global destroy domain reaches outside the container's domain.
    OutOfDomain {
        /// Smallest index in the destroy domain.
        min: i64,
        /// Largest index in the destroy domain.
        max: i64,
        /// The container's global domain.
        domain: Interval,
    },
    /// An attribute with this name is already registered.
    DuplicateAttribute {
        /// The repeated name.
        name: String,
    },
    /// No attribute is registered under this ID.
    UnknownAttribute {
        /// The requested ID.
        id: AttributeId,
    },
    /// An attribute was accessed with the wrong element type.
    AttributeType {
        /// Name of the attribute.
        name: String,
        /// Element type requested by the caller.
        expected: &'static str,
        /// Element type the attribute stores.
        actual: &'static str,
    },
    /// An engine operation failed.
    Engine(EngineError),
}

impl fmt::Display for ParticlesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig { reason } => write!(f, "invalid particles config: {reason}"),
            Self::UnknownPatch { patch, num_patches } => {
                write!(f, "patch {patch} out of range ({num_patches} local patches)")
            }
            Self::OutOfDomain { min, max, domain } => {
                write!(
                    f,
                    "destroy domain [{min}, {max}] not contained in global domain {domain}"
                )
            }
            Self::DuplicateAttribute { name } => {
                write!(f, "attribute '{name}' already registered")
            }
            Self::UnknownAttribute { id } => write!(f, "no attribute with id {id}"),
            Self::AttributeType {
                name,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "attribute '{name}' stores {actual}, requested as {expected}"
                )
            }
            Self::Engine(e) => write!(f, "engine: {e}"),
        }
    }
}

impl Error for ParticlesError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Engine(e) => Some(e),
            _ => None,
        }
    }
}

impl From<EngineError> for ParticlesError {
    fn from(e: EngineError) -> Self {
        Self::Engine(e)
    }
}
