//! Owning list of arbitrary indices.

use std::fmt;

use crate::source::IndexSource;

/// An owning, unordered list of `i64` indices.
///
/// This is the general-purpose kill-list and copy-list type: any
/// [`IndexSource`] can be materialised into one with
/// [`IndirectionList::from_source`]. Duplicates and arbitrary order are
/// allowed here; consumers decide whether they are acceptable.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct IndirectionList {
    indices: Vec<i64>,
}

impl IndirectionList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self {
            indices: Vec::new(),
        }
    }

    /// Create an empty list with room for `capacity` indices.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            indices: Vec::with_capacity(capacity),
        }
    }

    /// Copy the indices of any source into a new list.
    pub fn from_source<S: IndexSource + ?Sized>(source: &S) -> Self {
        let mut indices = Vec::with_capacity(source.len());
        indices.extend(source.indices());
        Self { indices }
    }

    /// Append one index.
    pub fn push(&mut self, index: i64) {
        self.indices.push(index);
    }

    /// Append every index of `source`.
    pub fn extend_from<S: IndexSource + ?Sized>(&mut self, source: &S) {
        self.indices.reserve(source.len());
        self.indices.extend(source.indices());
    }

    /// Remove all indices, keeping the allocation.
    pub fn clear(&mut self) {
        self.indices.clear();
    }

    /// The indices as a slice.
    pub fn as_slice(&self) -> &[i64] {
        &self.indices
    }

    /// Sort the indices ascending.
    pub fn sort(&mut self) {
        self.indices.sort_unstable();
    }

    /// Whether the indices are in non-decreasing order.
    pub fn is_sorted(&self) -> bool {
        self.indices.windows(2).all(|w| w[0] <= w[1])
    }

    /// Add `delta` to every index.
    pub fn shift(&mut self, delta: i64) {
        for i in &mut self.indices {
            *i += delta;
        }
    }

    /// Iterate the indices in list order.
    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, i64>> {
        self.indices.iter().copied()
    }

    /// Consume the list, returning the backing vector.
    pub fn into_vec(self) -> Vec<i64> {
        self.indices
    }
}

impl IndexSource for IndirectionList {
    fn len(&self) -> usize {
        self.indices.len()
    }

    fn get(&self, i: usize) -> i64 {
        self.indices[i]
    }

    fn indices(&self) -> Box<dyn Iterator<Item = i64> + '_> {
        Box::new(self.iter())
    }
}

impl From<Vec<i64>> for IndirectionList {
    fn from(indices: Vec<i64>) -> Self {
        Self { indices }
    }
}

impl From<&[i64]> for IndirectionList {
    fn from(indices: &[i64]) -> Self {
        Self {
            indices: indices.to_vec(),
        }
    }
}

impl FromIterator<i64> for IndirectionList {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        Self {
            indices: iter.into_iter().collect(),
        }
    }
}

impl Extend<i64> for IndirectionList {
    fn extend<I: IntoIterator<Item = i64>>(&mut self, iter: I) {
        self.indices.extend(iter);
    }
}

impl fmt::Display for IndirectionList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.indices)
    }
}
