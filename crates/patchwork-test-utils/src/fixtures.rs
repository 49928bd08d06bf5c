//! Mock context exchanges.
//!
//! - [`FixedOffsetExchange`]: plays one rank of a larger run whose other
//!   ranks hold a fixed number of particles.
//! - [`CountingExchange`]: single-context exchange that records how often
//!   the collective ran.

use std::sync::atomic::{AtomicUsize, Ordering};

use patchwork_core::ContextId;
use patchwork_particles::ContextExchange;

/// One rank of a simulated multi-context run.
///
/// Lower-ranked contexts hold `below` particles in total and higher-ranked
/// ones hold `above`, regardless of what this context reports.
#[derive(Debug)]
pub struct FixedOffsetExchange {
    pub context: ContextId,
    pub contexts: u32,
    pub below: usize,
    pub above: usize,
}

impl FixedOffsetExchange {
    pub fn new(context: u32, contexts: u32, below: usize, above: usize) -> Self {
        Self {
            context: ContextId(context),
            contexts,
            below,
            above,
        }
    }
}

impl ContextExchange for FixedOffsetExchange {
    fn context(&self) -> ContextId {
        self.context
    }

    fn contexts(&self) -> u32 {
        self.contexts
    }

    fn exclusive_scan(&self, local_total: usize) -> (usize, usize) {
        (self.below, self.below + local_total + self.above)
    }
}

/// Single-context exchange that counts collective calls.
#[derive(Debug, Default)]
pub struct CountingExchange {
    scans: AtomicUsize,
}

impl CountingExchange {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `exclusive_scan` calls so far.
    pub fn scans(&self) -> usize {
        self.scans.load(Ordering::Relaxed)
    }
}

impl ContextExchange for CountingExchange {
    fn context(&self) -> ContextId {
        ContextId(0)
    }

    fn contexts(&self) -> u32 {
        1
    }

    fn exclusive_scan(&self, local_total: usize) -> (usize, usize) {
        self.scans.fetch_add(1, Ordering::Relaxed);
        (0, local_total)
    }
}
