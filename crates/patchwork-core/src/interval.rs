//! Inclusive unit-stride [`Interval`] and strided [`Range`] domains.

use std::fmt;

use crate::error::DomainError;

/// An ordered, unit-stride index range `[first, last]` with inclusive ends.
///
/// An interval is empty when `last == first - 1`. An empty interval built
/// with [`Interval::new`] or [`Interval::with_len`] keeps its position, so
/// `[k, k - 1]` marks where growth starts and equality compares positions.
/// The canonical empty interval is `[0, -1]`, returned by
/// [`Interval::empty`], by [`Interval::intersect`] on disjoint intervals,
/// and by [`Interval::shrink`] whenever every element is removed.
///
/// # Examples
///
/// ```
/// use patchwork_core::Interval;
///
/// let dom = Interval::new(0, 9).unwrap();
/// assert_eq!(dom.len(), 10);
/// assert_eq!(dom.extend(3), Interval::new(0, 12).unwrap());
/// assert!(dom.shrink(10).is_empty());
/// assert_eq!(dom.shrink(10), Interval::empty());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Interval {
    first: i64,
    last: i64,
}

impl Interval {
    /// Create the interval `[first, last]`.
    ///
    /// Returns `Err(DomainError::InvalidInterval)` if `last < first - 1`,
    /// or if the interval has more than `i64::MAX` indices.
    pub fn new(first: i64, last: i64) -> Result<Self, DomainError> {
        let below_floor = first.checked_sub(1).is_some_and(|floor| last < floor);
        if below_floor || last.checked_sub(first).is_none() {
            return Err(DomainError::InvalidInterval { first, last });
        }
        Ok(Self { first, last })
    }

    /// Create an interval of `len` elements starting at `first`.
    pub fn with_len(first: i64, len: usize) -> Self {
        Self {
            first,
            last: first + len as i64 - 1,
        }
    }

    /// The canonical empty interval `[0, -1]`.
    pub const fn empty() -> Self {
        Self { first: 0, last: -1 }
    }

    /// First index (positional; meaningful only when non-empty).
    pub fn first(&self) -> i64 {
        self.first
    }

    /// Last index. Equals `first - 1` for an empty interval.
    pub fn last(&self) -> i64 {
        self.last
    }

    /// Number of indices in the interval.
    pub fn len(&self) -> usize {
        if self.last < self.first {
            0
        } else {
            (self.last - self.first + 1) as usize
        }
    }

    /// Whether the interval holds no indices.
    pub fn is_empty(&self) -> bool {
        self.last < self.first
    }

    /// Smallest index, or `None` when empty.
    pub fn min(&self) -> Option<i64> {
        (!self.is_empty()).then_some(self.first)
    }

    /// Largest index, or `None` when empty.
    pub fn max(&self) -> Option<i64> {
        (!self.is_empty()).then_some(self.last)
    }

    /// Whether `index` lies inside the interval.
    pub fn contains(&self, index: i64) -> bool {
        index >= self.first && index <= self.last
    }

    /// Zero-based position of `index`, or `None` if outside the interval.
    pub fn offset_of(&self, index: i64) -> Option<usize> {
        self.contains(index).then(|| (index - self.first) as usize)
    }

    /// Index at zero-based position `offset`. Not bounds-checked.
    pub fn index_at(&self, offset: usize) -> i64 {
        self.first + offset as i64
    }

    /// The interval grown upward by `n` indices.
    pub fn extend(&self, n: usize) -> Self {
        Self {
            first: self.first,
            last: self.last + n as i64,
        }
    }

    /// The interval with its top `n` indices removed.
    ///
    /// Removing every index yields the canonical empty interval rather
    /// than `[first, first - 1]`.
    ///
    /// # Panics
    ///
    /// Panics if `n > self.len()`.
    pub fn shrink(&self, n: usize) -> Self {
        let len = self.len();
        assert!(n <= len, "cannot shrink {self} by {n} elements");
        if n == len {
            Self::empty()
        } else {
            Self::with_len(self.first, len - n)
        }
    }

    /// An interval of the same length starting at `first`.
    pub fn relabel(&self, first: i64) -> Self {
        Self::with_len(first, self.len())
    }

    /// The indices common to both intervals (canonical empty if disjoint).
    pub fn intersect(&self, other: &Interval) -> Self {
        let first = self.first.max(other.first);
        let last = self.last.min(other.last);
        if last < first {
            Self::empty()
        } else {
            Self { first, last }
        }
    }

    /// Iterate the indices in ascending order.
    pub fn iter(&self) -> std::ops::RangeInclusive<i64> {
        self.first..=self.last
    }
}

impl Default for Interval {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}..={}]", self.first, self.last)
    }
}

/// A strided 1-D index range: `first, first + stride, ...` (`len` terms).
///
/// Used to describe strided views and regularly spaced kill-lists.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Range {
    first: i64,
    len: usize,
    stride: i64,
}

impl Range {
    /// Create a range of `len` indices starting at `first` with `stride`.
    ///
    /// Returns `Err(DomainError::ZeroStride)` if `stride == 0`.
    pub fn new(first: i64, len: usize, stride: i64) -> Result<Self, DomainError> {
        if stride == 0 {
            return Err(DomainError::ZeroStride);
        }
        Ok(Self { first, len, stride })
    }

    /// First index.
    pub fn first(&self) -> i64 {
        self.first
    }

    /// Last index, or `None` when empty.
    pub fn last(&self) -> Option<i64> {
        (self.len > 0).then(|| self.index_at(self.len - 1))
    }

    /// Number of indices.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the range holds no indices.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Distance between consecutive indices.
    pub fn stride(&self) -> i64 {
        self.stride
    }

    /// Index of the `k`-th term. Not bounds-checked.
    pub fn index_at(&self, k: usize) -> i64 {
        self.first + k as i64 * self.stride
    }

    /// Iterate the indices in sequence order.
    pub fn iter(&self) -> impl Iterator<Item = i64> + '_ {
        (0..self.len).map(move |k| self.index_at(k))
    }
}

impl From<Interval> for Range {
    fn from(dom: Interval) -> Self {
        Self {
            first: dom.first(),
            len: dom.len(),
            stride: 1,
        }
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.last() {
            Some(last) => write!(f, "[{}..={}:{}]", self.first, last, self.stride),
            None => write!(f, "[]"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_inverted_interval() {
        assert_eq!(
            Interval::new(5, 3),
            Err(DomainError::InvalidInterval { first: 5, last: 3 })
        );
    }

    #[test]
    fn empty_interval_has_last_one_below_first() {
        let dom = Interval::new(4, 3).unwrap();
        assert!(dom.is_empty());
        assert_eq!(dom.len(), 0);
        assert_eq!(dom.min(), None);
    }

    #[test]
    fn positioned_empty_differs_from_canonical() {
        let at_five = Interval::with_len(5, 0);
        assert_eq!(at_five, Interval::new(5, 4).unwrap());
        assert!(at_five.is_empty());
        assert_ne!(at_five, Interval::empty());
        assert_eq!(at_five.extend(2), Interval::new(5, 6).unwrap());
        assert_eq!(Interval::new(5, 9).unwrap().shrink(5), Interval::empty());
    }

    #[test]
    fn new_at_i64_limits() {
        let lowest = Interval::new(i64::MIN, i64::MIN).unwrap();
        assert_eq!(lowest.len(), 1);
        assert!(Interval::new(i64::MAX, i64::MAX).is_ok());
        assert_eq!(
            Interval::new(i64::MIN, i64::MAX),
            Err(DomainError::InvalidInterval {
                first: i64::MIN,
                last: i64::MAX
            })
        );
        assert!(Interval::new(i64::MAX, i64::MIN).is_err());
    }

    #[test]
    fn extend_returns_grown_interval() {
        let dom = Interval::new(0, 4).unwrap();
        assert_eq!(dom.extend(3), Interval::new(0, 7).unwrap());
        assert_eq!(Interval::empty().extend(2), Interval::new(0, 1).unwrap());
    }

    #[test]
    fn shrink_to_zero_is_canonical_empty() {
        let dom = Interval::new(40, 49).unwrap();
        assert_eq!(dom.shrink(10), Interval::empty());
        assert_eq!(dom.shrink(4), Interval::new(40, 45).unwrap());
    }

    #[test]
    #[should_panic(expected = "cannot shrink")]
    fn shrink_past_length_panics() {
        Interval::new(0, 1).unwrap().shrink(3);
    }

    #[test]
    fn offset_translation() {
        let dom = Interval::new(10, 19).unwrap();
        assert_eq!(dom.offset_of(10), Some(0));
        assert_eq!(dom.offset_of(19), Some(9));
        assert_eq!(dom.offset_of(20), None);
        assert_eq!(dom.index_at(3), 13);
    }

    #[test]
    fn relabel_preserves_length() {
        let dom = Interval::new(0, 4).unwrap();
        assert_eq!(dom.relabel(100), Interval::new(100, 104).unwrap());
    }

    #[test]
    fn intersect_disjoint_is_empty() {
        let a = Interval::new(0, 4).unwrap();
        let b = Interval::new(10, 14).unwrap();
        assert!(a.intersect(&b).is_empty());
        let c = Interval::new(3, 12).unwrap();
        assert_eq!(a.intersect(&c), Interval::new(3, 4).unwrap());
    }

    #[test]
    fn range_rejects_zero_stride() {
        assert_eq!(Range::new(0, 4, 0), Err(DomainError::ZeroStride));
    }

    #[test]
    fn range_iterates_strided_indices() {
        let r = Range::new(1, 4, 3).unwrap();
        assert_eq!(r.iter().collect::<Vec<_>>(), vec![1, 4, 7, 10]);
        assert_eq!(r.last(), Some(10));
    }

    #[test]
    fn range_negative_stride_walks_down() {
        let r = Range::new(9, 3, -2).unwrap();
        assert_eq!(r.iter().collect::<Vec<_>>(), vec![9, 7, 5]);
    }

    #[test]
    fn display_formats() {
        assert_eq!(Interval::new(2, 5).unwrap().to_string(), "[2..=5]");
        assert_eq!(Range::new(0, 3, 2).unwrap().to_string(), "[0..=4:2]");
    }

    #[cfg(not(miri))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn extend_then_shrink_restores_length(
                first in -1000i64..1000,
                len in 0usize..500,
                n in 0usize..500,
            ) {
                let dom = Interval::with_len(first, len);
                let grown = dom.extend(n);
                prop_assert_eq!(grown.len(), len + n);
                prop_assert_eq!(grown.shrink(n).len(), len);
            }

            #[test]
            fn offset_round_trips_through_index_at(
                first in -1000i64..1000,
                len in 1usize..500,
                pick in 0usize..500,
            ) {
                let dom = Interval::with_len(first, len);
                let offset = pick % len;
                prop_assert_eq!(dom.offset_of(dom.index_at(offset)), Some(offset));
            }
        }
    }
}
