//! The [`IndexSource`] trait and its implementations for core ranges.

use patchwork_core::{Interval, Range};

/// A finite, ordered enumeration of `i64` indices.
///
/// This is the kill-list contract: destroy operations need a length, random
/// access, value bounds for validation, and forward iteration. Indices may
/// be absolute engine indices or zero-based offsets depending on the call.
///
/// # Object Safety
///
/// The trait is object-safe so that type-erased containers can pass
/// `&dyn IndexSource` through to per-patch engines.
pub trait IndexSource {
    /// Number of indices.
    fn len(&self) -> usize;

    /// Whether the source holds no indices.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The `i`-th index in sequence order.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.len()`.
    fn get(&self, i: usize) -> i64;

    /// First index in sequence order, or `None` when empty.
    fn first(&self) -> Option<i64> {
        (!self.is_empty()).then(|| self.get(0))
    }

    /// Last index in sequence order, or `None` when empty.
    fn last(&self) -> Option<i64> {
        let len = self.len();
        (len > 0).then(|| self.get(len - 1))
    }

    /// Smallest index by value, or `None` when empty.
    ///
    /// The default implementation is a linear scan.
    fn min(&self) -> Option<i64> {
        self.indices().min()
    }

    /// Largest index by value, or `None` when empty.
    ///
    /// The default implementation is a linear scan.
    fn max(&self) -> Option<i64> {
        self.indices().max()
    }

    /// Iterate the indices in sequence order.
    fn indices(&self) -> Box<dyn Iterator<Item = i64> + '_>;

    /// Whether the indices are in non-decreasing order.
    fn is_ascending(&self) -> bool {
        let mut prev = i64::MIN;
        for i in self.indices() {
            if i < prev {
                return false;
            }
            prev = i;
        }
        true
    }
}

impl IndexSource for Interval {
    fn len(&self) -> usize {
        Interval::len(self)
    }

    fn get(&self, i: usize) -> i64 {
        assert!(i < Interval::len(self), "index {i} out of range for {self}");
        self.index_at(i)
    }

    fn min(&self) -> Option<i64> {
        Interval::min(self)
    }

    fn max(&self) -> Option<i64> {
        Interval::max(self)
    }

    fn indices(&self) -> Box<dyn Iterator<Item = i64> + '_> {
        Box::new(self.iter())
    }

    fn is_ascending(&self) -> bool {
        true
    }
}

impl IndexSource for Range {
    fn len(&self) -> usize {
        Range::len(self)
    }

    fn get(&self, i: usize) -> i64 {
        assert!(i < Range::len(self), "index {i} out of range for {self}");
        self.index_at(i)
    }

    fn min(&self) -> Option<i64> {
        let last = Range::last(self)?;
        Some(self.first().min(last))
    }

    fn max(&self) -> Option<i64> {
        let last = Range::last(self)?;
        Some(self.first().max(last))
    }

    fn indices(&self) -> Box<dyn Iterator<Item = i64> + '_> {
        Box::new(self.iter())
    }

    fn is_ascending(&self) -> bool {
        self.stride() > 0 || Range::len(self) <= 1
    }
}

impl IndexSource for [i64] {
    fn len(&self) -> usize {
        <[i64]>::len(self)
    }

    fn get(&self, i: usize) -> i64 {
        self[i]
    }

    fn indices(&self) -> Box<dyn Iterator<Item = i64> + '_> {
        Box::new(self.iter().copied())
    }
}

impl IndexSource for Vec<i64> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn get(&self, i: usize) -> i64 {
        self[i]
    }

    fn indices(&self) -> Box<dyn Iterator<Item = i64> + '_> {
        Box::new(self.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_source_bounds() {
        let dom = Interval::new(3, 7).unwrap();
        assert_eq!(IndexSource::len(&dom), 5);
        assert_eq!(IndexSource::min(&dom), Some(3));
        assert_eq!(IndexSource::max(&dom), Some(7));
        assert_eq!(dom.get(2), 5);
        assert!(dom.is_ascending());
    }

    #[test]
    fn empty_interval_has_no_bounds() {
        let dom = Interval::empty();
        assert!(IndexSource::is_empty(&dom));
        assert_eq!(IndexSource::first(&dom), None);
        assert_eq!(IndexSource::max(&dom), None);
    }

    #[test]
    fn descending_range_min_max() {
        let r = Range::new(10, 4, -3).unwrap();
        assert_eq!(IndexSource::min(&r), Some(1));
        assert_eq!(IndexSource::max(&r), Some(10));
        assert_eq!(IndexSource::first(&r), Some(10));
        assert_eq!(IndexSource::last(&r), Some(1));
        assert!(!r.is_ascending());
    }

    #[test]
    fn slice_source_is_positional() {
        let v = vec![5i64, 1, 9];
        assert_eq!(IndexSource::first(&v), Some(5));
        assert_eq!(IndexSource::last(&v), Some(9));
        assert_eq!(IndexSource::min(&v), Some(1));
        assert!(!v.is_ascending());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn interval_get_past_end_panics() {
        Interval::new(0, 2).unwrap().get(3);
    }

    #[test]
    fn dyn_source_dispatch() {
        let sources: Vec<Box<dyn IndexSource>> = vec![
            Box::new(Interval::new(0, 2).unwrap()),
            Box::new(Range::new(0, 3, 2).unwrap()),
            Box::new(vec![4i64, 4, 4]),
        ];
        let lens: Vec<usize> = sources.iter().map(|s| s.len()).collect();
        assert_eq!(lens, vec![3, 3, 3]);
    }
}
