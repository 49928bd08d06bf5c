//! Kill-list normalisation and the two compaction algorithms.
//!
//! Both algorithms take a buffer and a sorted, duplicate-free list of
//! zero-based offsets to remove, and leave the buffer shortened by exactly
//! that many elements:
//!
//! - [`back_fill`] swaps tail survivors into the holes, scanning the tail in
//!   reverse and skipping tail elements that are themselves being removed.
//! - [`shift_up`] closes every hole by sliding later survivors down,
//!   preserving their relative order.

use patchwork_core::{DeleteMethod, Interval};
use patchwork_domain::IndexSource;

use crate::error::EngineError;

/// How the values in a kill-list relate to the engine's elements.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum KillIndexing {
    /// Values are engine indices inside the current domain.
    #[default]
    Absolute,
    /// Values are zero-based offsets into the buffer.
    Offset,
}

impl KillIndexing {
    /// Translate one caller value to a buffer offset, checking bounds.
    pub(crate) fn to_offset(self, value: i64, domain: Interval) -> Result<usize, EngineError> {
        let offset = match self {
            Self::Absolute => value.checked_sub(domain.first()),
            Self::Offset => Some(value),
        };
        match offset {
            Some(offset) if offset >= 0 && (offset as usize) < domain.len() => Ok(offset as usize),
            _ => Err(EngineError::KillIndexOutOfRange {
                index: value,
                domain,
            }),
        }
    }
}

/// Convert a kill-list into sorted, unique, in-range buffer offsets.
pub(crate) fn normalize_kill_list<D: IndexSource + ?Sized>(
    kill: &D,
    domain: Interval,
    indexing: KillIndexing,
) -> Result<Vec<usize>, EngineError> {
    let requested = kill.len();
    if requested > domain.len() {
        return Err(EngineError::KillListTooLong {
            requested,
            available: domain.len(),
        });
    }

    let mut offsets = Vec::with_capacity(requested);
    for value in kill.indices() {
        offsets.push(indexing.to_offset(value, domain)?);
    }
    offsets.sort_unstable();

    if let Some(pair) = offsets.windows(2).find(|w| w[0] == w[1]) {
        let index = match indexing {
            KillIndexing::Absolute => domain.index_at(pair[0]),
            KillIndexing::Offset => pair[0] as i64,
        };
        return Err(EngineError::DuplicateKillIndex { index });
    }
    Ok(offsets)
}

/// Remove `kill` offsets from `data` with the given method.
pub(crate) fn compact<T>(method: DeleteMethod, data: &mut Vec<T>, kill: &[usize]) {
    match method {
        DeleteMethod::BackFill => back_fill(data, kill),
        DeleteMethod::ShiftUp => shift_up(data, kill),
    }
}

/// Fill holes from the tail of the buffer.
///
/// `kill` must be sorted ascending, unique, and in range.
pub(crate) fn back_fill<T>(data: &mut Vec<T>, kill: &[usize]) {
    if kill.is_empty() {
        return;
    }
    let new_len = data.len() - kill.len();

    // Candidate source for the next move, walking down from the tail.
    let mut src = data.len() as isize - 1;
    // kill[..back] are the holes not yet known to lie in the tail.
    let mut back = kill.len();

    for &hole in kill {
        while back > 0 && kill[back - 1] as isize == src {
            back -= 1;
            src -= 1;
        }
        if hole as isize >= src {
            break;
        }
        data.swap(hole, src as usize);
        src -= 1;
    }

    data.truncate(new_len);
}

/// Slide survivors down over the holes, keeping their order.
///
/// `kill` must be sorted ascending, unique, and in range.
pub(crate) fn shift_up<T>(data: &mut Vec<T>, kill: &[usize]) {
    if kill.is_empty() {
        return;
    }
    let mut pos = 0usize;
    let mut next = 0usize;
    data.retain(|_| {
        let killed = next < kill.len() && kill[next] == pos;
        if killed {
            next += 1;
        }
        pos += 1;
        !killed
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ten() -> Vec<i32> {
        (0..10).collect()
    }

    #[test]
    fn back_fill_reference_order() {
        let mut data = ten();
        back_fill(&mut data, &[2, 5, 8]);
        assert_eq!(data, vec![0, 1, 9, 3, 4, 7, 6]);
    }

    #[test]
    fn shift_up_reference_order() {
        let mut data = ten();
        shift_up(&mut data, &[2, 5, 8]);
        assert_eq!(data, vec![0, 1, 3, 4, 6, 7, 9]);
    }

    #[test]
    fn back_fill_all_tail() {
        let mut data = ten();
        back_fill(&mut data, &[7, 8, 9]);
        assert_eq!(data, (0..7).collect::<Vec<_>>());
    }

    #[test]
    fn back_fill_everything() {
        let mut data = ten();
        let all: Vec<usize> = (0..10).collect();
        back_fill(&mut data, &all);
        assert!(data.is_empty());
    }

    #[test]
    fn back_fill_head_only() {
        let mut data = ten();
        back_fill(&mut data, &[0, 1]);
        assert_eq!(data, vec![9, 8, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn normalize_sorts_and_translates() {
        let dom = Interval::new(10, 19).unwrap();
        let offsets =
            normalize_kill_list(&vec![18i64, 10, 14], dom, KillIndexing::Absolute).unwrap();
        assert_eq!(offsets, vec![0, 4, 8]);
    }

    #[test]
    fn normalize_rejects_out_of_range() {
        let dom = Interval::new(10, 19).unwrap();
        let err = normalize_kill_list(&vec![9i64], dom, KillIndexing::Absolute).unwrap_err();
        assert_eq!(
            err,
            EngineError::KillIndexOutOfRange {
                index: 9,
                domain: dom
            }
        );
        let err = normalize_kill_list(&vec![10i64], dom, KillIndexing::Offset).unwrap_err();
        assert!(matches!(err, EngineError::KillIndexOutOfRange { index: 10, .. }));
    }

    #[test]
    fn normalize_rejects_extreme_indices() {
        let dom = Interval::new(10, 19).unwrap();
        for value in [i64::MIN, i64::MAX] {
            let err =
                normalize_kill_list(&vec![value], dom, KillIndexing::Absolute).unwrap_err();
            assert!(matches!(err, EngineError::KillIndexOutOfRange { index, .. } if index == value));
        }
        let dom = Interval::new(-5, 4).unwrap();
        let err = normalize_kill_list(&vec![i64::MAX], dom, KillIndexing::Absolute).unwrap_err();
        assert!(matches!(err, EngineError::KillIndexOutOfRange { .. }));
    }

    #[test]
    fn normalize_rejects_duplicates() {
        let dom = Interval::new(10, 19).unwrap();
        let err = normalize_kill_list(&vec![12i64, 15, 12], dom, KillIndexing::Absolute)
            .unwrap_err();
        assert_eq!(err, EngineError::DuplicateKillIndex { index: 12 });
    }

    #[test]
    fn normalize_rejects_oversized_list() {
        let dom = Interval::new(0, 1).unwrap();
        let err = normalize_kill_list(&vec![0i64, 1, 1], dom, KillIndexing::Absolute)
            .unwrap_err();
        assert!(matches!(err, EngineError::KillListTooLong { requested: 3, available: 2 }));
    }

    #[cfg(not(miri))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;
        use std::collections::BTreeSet;

        fn kill_strategy() -> impl Strategy<Value = (usize, Vec<usize>)> {
            (1usize..64).prop_flat_map(|n| {
                (
                    Just(n),
                    proptest::sample::subsequence((0..n).collect::<Vec<_>>(), 0..=n),
                )
            })
        }

        proptest! {
            #[test]
            fn back_fill_keeps_survivor_set((n, kill) in kill_strategy()) {
                let mut data: Vec<usize> = (0..n).collect();
                back_fill(&mut data, &kill);
                let killed: BTreeSet<usize> = kill.iter().copied().collect();
                let mut got = data.clone();
                got.sort_unstable();
                let expected: Vec<usize> = (0..n).filter(|i| !killed.contains(i)).collect();
                prop_assert_eq!(got, expected);
            }

            #[test]
            fn back_fill_never_moves_elements_up((n, kill) in kill_strategy()) {
                let mut data: Vec<usize> = (0..n).collect();
                back_fill(&mut data, &kill);
                for (pos, &original) in data.iter().enumerate() {
                    prop_assert!(pos <= original);
                }
            }

            #[test]
            fn shift_up_keeps_survivor_order((n, kill) in kill_strategy()) {
                let mut data: Vec<usize> = (0..n).collect();
                shift_up(&mut data, &kill);
                let killed: BTreeSet<usize> = kill.iter().copied().collect();
                let expected: Vec<usize> = (0..n).filter(|i| !killed.contains(i)).collect();
                prop_assert_eq!(data, expected);
            }
        }
    }
}
