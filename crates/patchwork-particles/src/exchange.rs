//! Cross-context size exchange used by renumbering.
//!
//! Renumbering assigns every context a contiguous run of global indices.
//! Each context knows only its own particle count, so it needs the sum of
//! the counts of all lower-ranked contexts (its offset) and the grand total.
//! [`ContextExchange`] is that one collective; [`SingleContext`] answers it
//! in-process for the single-context case.

use std::fmt;

use patchwork_core::ContextId;

/// The collective a layout needs to compute global numbering.
///
/// Implementations must be called by every context with the same sequence
/// of operations; a multi-context implementation may block until all
/// contexts have contributed.
pub trait ContextExchange: fmt::Debug + Send + Sync {
    /// This context's rank.
    fn context(&self) -> ContextId;

    /// Total number of contexts.
    fn contexts(&self) -> u32;

    /// Exclusive prefix sum of `local_total` across contexts.
    ///
    /// Returns `(offset, global_total)`: the sum over lower-ranked contexts
    /// and the sum over all contexts.
    fn exclusive_scan(&self, local_total: usize) -> (usize, usize);
}

/// The exchange for a program running in one context.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SingleContext;

impl ContextExchange for SingleContext {
    fn context(&self) -> ContextId {
        ContextId(0)
    }

    fn contexts(&self) -> u32 {
        1
    }

    fn exclusive_scan(&self, local_total: usize) -> (usize, usize) {
        (0, local_total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_context_owns_everything() {
        let ex = SingleContext;
        assert_eq!(ex.context(), ContextId(0));
        assert_eq!(ex.contexts(), 1);
        assert_eq!(ex.exclusive_scan(17), (0, 17));
    }
}
