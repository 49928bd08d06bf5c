//! Per-patch queue of offsets awaiting destruction.

use patchwork_core::{DeleteMethod, Interval, PatchId};
use patchwork_domain::{IndexSource, IndirectionList};
use patchwork_engine::{DynamicEngine, EngineError, KillIndexing};

/// Offsets queued for a deferred destroy on one patch.
///
/// Stored in a dynamic engine of its own: appending grows it with `create`
/// and clearing destroys its whole domain.
#[derive(Clone, Debug)]
pub struct KillList {
    engine: DynamicEngine<i64>,
}

impl KillList {
    /// An empty list for `patch`.
    pub fn new(patch: PatchId) -> Self {
        Self {
            engine: DynamicEngine::new(Interval::empty()).with_patch(patch),
        }
    }

    /// The patch the offsets refer to.
    pub fn patch(&self) -> PatchId {
        self.engine.patch()
    }

    /// Number of queued offsets.
    pub fn len(&self) -> usize {
        self.engine.len()
    }

    /// Whether nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.engine.is_empty()
    }

    /// Queued offsets in append order.
    pub fn as_slice(&self) -> &[i64] {
        self.engine.as_slice()
    }

    /// Queue every index of `offsets`. Returns the slots they occupy.
    pub fn append<D: IndexSource + ?Sized>(&mut self, offsets: &D) -> Interval {
        let start = self.engine.len();
        let created = self.engine.create(offsets.len());
        for (slot, value) in self.engine.as_mut_slice()[start..]
            .iter_mut()
            .zip(offsets.indices())
        {
            *slot = value;
        }
        created
    }

    /// Drop every queued offset. Returns how many were dropped.
    pub fn clear(&mut self) -> Result<usize, EngineError> {
        let all = self.engine.domain();
        self.engine
            .destroy_with(&all, DeleteMethod::BackFill, KillIndexing::Absolute)
    }

    /// Copy the queued offsets into an owning list.
    pub fn to_indirection_list(&self) -> IndirectionList {
        IndirectionList::from(self.engine.as_slice())
    }
}
