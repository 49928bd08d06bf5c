//! Patch nodes: one patch's share of a global index space.

use crate::id::{ContextId, PatchId};
use crate::interval::Interval;

/// Describes the slice of a global domain owned by one patch.
///
/// Produced by a layout and consumed when constructing per-patch engines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PatchNode {
    /// Local patch number.
    pub patch: PatchId,
    /// Context that owns the patch.
    pub context: ContextId,
    /// Global indices held by the patch.
    pub domain: Interval,
}

impl PatchNode {
    /// Create a node for `patch` on `context` covering `domain`.
    pub fn new(patch: PatchId, context: ContextId, domain: Interval) -> Self {
        Self {
            patch,
            context,
            domain,
        }
    }

    /// Number of elements held by the patch.
    pub fn len(&self) -> usize {
        self.domain.len()
    }

    /// Whether the patch holds no elements.
    pub fn is_empty(&self) -> bool {
        self.domain.is_empty()
    }
}
