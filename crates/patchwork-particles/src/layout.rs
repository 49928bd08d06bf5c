//! Global numbering of a context's particle patches.

use std::sync::Arc;

use smallvec::SmallVec;

use patchwork_core::{ContextId, Interval, PatchId, PatchNode};

use crate::exchange::ContextExchange;

/// Maps each local patch to its contiguous run of global indices.
///
/// Local patches are numbered in patch order starting at this context's
/// offset, so patch `p + 1` begins right after patch `p` ends. Empty
/// patches occupy no indices. The numbering is only rewritten by
/// [`sync`](Self::sync).
#[derive(Clone, Debug)]
pub struct ParticleLayout {
    exchange: Arc<dyn ContextExchange>,
    nodes: SmallVec<[PatchNode; 4]>,
    local_offset: usize,
    local_size: usize,
    global_size: usize,
}

impl ParticleLayout {
    /// A layout of `num_patches` patches holding `initial_size` particles each.
    pub fn new(num_patches: u32, initial_size: usize, exchange: Arc<dyn ContextExchange>) -> Self {
        let context = exchange.context();
        let nodes = (0..num_patches)
            .map(|p| PatchNode::new(PatchId(p), context, Interval::empty()))
            .collect();
        let mut layout = Self {
            exchange,
            nodes,
            local_offset: 0,
            local_size: 0,
            global_size: 0,
        };
        let sizes: SmallVec<[usize; 4]> = (0..num_patches).map(|_| initial_size).collect();
        layout.sync(&sizes);
        layout
    }

    /// Recompute the numbering from per-patch sizes.
    ///
    /// # Panics
    ///
    /// Panics if `sizes.len()` differs from the number of patches.
    pub fn sync(&mut self, sizes: &[usize]) {
        assert_eq!(
            sizes.len(),
            self.nodes.len(),
            "layout sync needs one size per patch"
        );
        let local_size: usize = sizes.iter().sum();
        let (offset, global_size) = self.exchange.exclusive_scan(local_size);

        let mut next = offset as i64;
        for (node, &size) in self.nodes.iter_mut().zip(sizes) {
            node.domain = Interval::with_len(next, size);
            next += size as i64;
        }
        self.local_offset = offset;
        self.local_size = local_size;
        self.global_size = global_size;
    }

    /// Number of local patches.
    pub fn num_patches(&self) -> usize {
        self.nodes.len()
    }

    /// This context's rank.
    pub fn context(&self) -> ContextId {
        self.exchange.context()
    }

    /// The exchange used for renumbering.
    pub fn exchange(&self) -> &Arc<dyn ContextExchange> {
        &self.exchange
    }

    /// Global indices owned by `patch`.
    pub fn patch_domain(&self, patch: PatchId) -> Option<Interval> {
        self.nodes.get(patch.index()).map(|n| n.domain)
    }

    /// Every local patch in patch order.
    pub fn nodes(&self) -> &[PatchNode] {
        &self.nodes
    }

    /// Particles held by this context.
    pub fn local_size(&self) -> usize {
        self.local_size
    }

    /// Global indices owned by this context.
    pub fn local_domain(&self) -> Interval {
        Interval::with_len(self.local_offset as i64, self.local_size)
    }

    /// Particles held by all contexts.
    pub fn global_size(&self) -> usize {
        self.global_size
    }

    /// The whole global index space, `[0, global_size - 1]`.
    pub fn global_domain(&self) -> Interval {
        Interval::with_len(0, self.global_size)
    }

    /// The local patch owning `global_index`, if any.
    pub fn patch_of(&self, global_index: i64) -> Option<PatchId> {
        self.nodes
            .iter()
            .find(|n| n.domain.contains(global_index))
            .map(|n| n.patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exchange::SingleContext;

    fn single() -> Arc<dyn ContextExchange> {
        Arc::new(SingleContext)
    }

    /// Pretends to be one rank of a larger run with fixed neighbour counts.
    #[derive(Debug)]
    struct FixedOffset {
        below: usize,
        above: usize,
    }

    impl ContextExchange for FixedOffset {
        fn context(&self) -> ContextId {
            ContextId(1)
        }

        fn contexts(&self) -> u32 {
            3
        }

        fn exclusive_scan(&self, local_total: usize) -> (usize, usize) {
            (self.below, self.below + local_total + self.above)
        }
    }

    #[test]
    fn initial_patches_are_contiguous() {
        let layout = ParticleLayout::new(3, 4, single());
        assert_eq!(layout.num_patches(), 3);
        assert_eq!(layout.patch_domain(PatchId(0)), Some(Interval::new(0, 3).unwrap()));
        assert_eq!(layout.patch_domain(PatchId(1)), Some(Interval::new(4, 7).unwrap()));
        assert_eq!(layout.patch_domain(PatchId(2)), Some(Interval::new(8, 11).unwrap()));
        assert_eq!(layout.global_domain(), Interval::new(0, 11).unwrap());
        assert_eq!(layout.patch_domain(PatchId(3)), None);
    }

    #[test]
    fn sync_renumbers_from_sizes() {
        let mut layout = ParticleLayout::new(3, 4, single());
        layout.sync(&[2, 0, 5]);
        assert_eq!(layout.patch_domain(PatchId(0)), Some(Interval::new(0, 1).unwrap()));
        assert!(layout.patch_domain(PatchId(1)).unwrap().is_empty());
        assert_eq!(layout.patch_domain(PatchId(2)), Some(Interval::new(2, 6).unwrap()));
        assert_eq!(layout.local_size(), 7);
        assert_eq!(layout.global_size(), 7);
    }

    #[test]
    fn patch_of_skips_empty_patches() {
        let mut layout = ParticleLayout::new(3, 0, single());
        layout.sync(&[2, 0, 5]);
        assert_eq!(layout.patch_of(1), Some(PatchId(0)));
        assert_eq!(layout.patch_of(2), Some(PatchId(2)));
        assert_eq!(layout.patch_of(7), None);
    }

    #[test]
    fn offset_context_numbering() {
        let ex: Arc<dyn ContextExchange> = Arc::new(FixedOffset { below: 10, above: 5 });
        let layout = ParticleLayout::new(2, 3, ex);
        assert_eq!(layout.context(), ContextId(1));
        assert_eq!(layout.local_domain(), Interval::new(10, 15).unwrap());
        assert_eq!(layout.global_domain(), Interval::new(0, 20).unwrap());
        assert_eq!(layout.patch_domain(PatchId(1)), Some(Interval::new(13, 15).unwrap()));
        assert_eq!(layout.patch_of(3), None);
        assert!(layout.nodes().iter().all(|n| n.context == ContextId(1)));
    }

    #[test]
    #[should_panic(expected = "one size per patch")]
    fn sync_with_wrong_patch_count_panics() {
        let mut layout = ParticleLayout::new(2, 0, single());
        layout.sync(&[1]);
    }
}
