//! Non-owning domain over a borrowed index sequence.

use std::borrow::Borrow;

use crate::source::IndexSource;

/// A lightweight 1-D domain wrapping an iterator over someone else's data.
///
/// The domain stores only a cloneable iterator (the "begin" position; its
/// exhaustion marks "end") and the sequence length, counted once at
/// construction. It never owns or extends the lifetime of the indices:
/// the iterator's own lifetime ties the domain to the borrowed sequence.
///
/// Random access clones the iterator and advances it, which is O(1) for
/// slice iterators and O(i) for general ones. `min`/`max` are linear
/// scans; `first`/`last` are positional.
///
/// # Examples
///
/// ```
/// use patchwork_domain::{IndexSource, IteratorPairDomain};
///
/// let kills = vec![7i64, 2, 5];
/// let dom = IteratorPairDomain::from_slice(&kills);
/// assert_eq!(dom.len(), 3);
/// assert_eq!(dom.first(), Some(7));
/// assert_eq!(dom.min(), Some(2));
/// ```
#[derive(Clone, Debug)]
pub struct IteratorPairDomain<I> {
    begin: I,
    len: usize,
}

impl<I> IteratorPairDomain<I>
where
    I: Iterator + Clone,
    I::Item: Borrow<i64>,
{
    /// Wrap `begin`, counting the sequence once to cache its length.
    ///
    /// Changing the length of the underlying sequence afterwards is not
    /// possible while the borrow is live.
    pub fn new(begin: I) -> Self {
        let len = begin.clone().count();
        Self { begin, len }
    }

    /// A fresh iterator positioned at the start of the sequence.
    pub fn begin(&self) -> I {
        self.begin.clone()
    }
}

impl<'a> IteratorPairDomain<std::slice::Iter<'a, i64>> {
    /// Wrap a borrowed slice of indices.
    pub fn from_slice(indices: &'a [i64]) -> Self {
        Self {
            begin: indices.iter(),
            len: indices.len(),
        }
    }
}

impl<I> IndexSource for IteratorPairDomain<I>
where
    I: Iterator + Clone,
    I::Item: Borrow<i64>,
{
    fn len(&self) -> usize {
        self.len
    }

    fn get(&self, i: usize) -> i64 {
        debug_assert!(
            i < self.len,
            "index {i} out of range for iterator-pair domain of length {}",
            self.len
        );
        match self.begin.clone().nth(i) {
            Some(v) => *Borrow::<i64>::borrow(&v),
            None => panic!(
                "index {i} out of range for iterator-pair domain of length {}",
                self.len
            ),
        }
    }

    fn last(&self) -> Option<i64> {
        self.begin.clone().last().map(|v| *Borrow::<i64>::borrow(&v))
    }

    fn indices(&self) -> Box<dyn Iterator<Item = i64> + '_> {
        Box::new(self.begin.clone().map(|v| *Borrow::<i64>::borrow(&v)))
    }
}
