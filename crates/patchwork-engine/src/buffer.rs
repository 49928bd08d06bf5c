//! Reference-counted element storage with copy-on-write detach.
//!
//! A [`SharedBuffer`] is shared by shallow copies of an engine. Reads go
//! straight to the shared allocation; any mutation first calls
//! [`SharedBuffer::make_unique`], which clones the elements into a private
//! allocation if another handle can still observe them.

use std::sync::Arc;

/// Contiguous element storage shared between engine copies.
///
/// Cloning is shallow: both handles point at the same allocation until one
/// of them mutates.
pub struct SharedBuffer<T> {
    data: Arc<Vec<T>>,
}

impl<T> SharedBuffer<T> {
    /// Wrap an existing vector as an unshared buffer.
    pub fn new(data: Vec<T>) -> Self {
        Self {
            data: Arc::new(data),
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the buffer holds no elements.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The elements as a shared slice.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Number of handles currently sharing this allocation.
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.data)
    }

    /// Whether another handle can observe this allocation.
    pub fn is_shared(&self) -> bool {
        Arc::strong_count(&self.data) > 1 || Arc::weak_count(&self.data) > 0
    }

    /// Whether two buffers share the same allocation.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.data, &b.data)
    }
}

impl<T: Clone> SharedBuffer<T> {
    /// Exclusive access to the elements, detaching first if shared.
    ///
    /// After this call no other handle observes the returned vector, so it
    /// may be resized freely.
    pub fn make_unique(&mut self) -> &mut Vec<T> {
        if self.is_shared() {
            tracing::trace!(
                len = self.data.len(),
                refs = self.ref_count(),
                "detaching shared buffer"
            );
        }
        Arc::make_mut(&mut self.data)
    }
}

impl<T> Clone for SharedBuffer<T> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
        }
    }
}

impl<T> Default for SharedBuffer<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for SharedBuffer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedBuffer")
            .field("refs", &self.ref_count())
            .field("data", &self.data)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clone_shares_allocation() {
        let a = SharedBuffer::new(vec![1, 2, 3]);
        let b = a.clone();
        assert!(SharedBuffer::ptr_eq(&a, &b));
        assert_eq!(a.ref_count(), 2);
        assert!(a.is_shared());
    }

    #[test]
    fn make_unique_detaches_shared_copy() {
        let a = SharedBuffer::new(vec![1, 2, 3]);
        let mut b = a.clone();
        b.make_unique().push(4);
        assert!(!SharedBuffer::ptr_eq(&a, &b));
        assert_eq!(a.as_slice(), &[1, 2, 3]);
        assert_eq!(b.as_slice(), &[1, 2, 3, 4]);
        assert_eq!(a.ref_count(), 1);
    }

    #[test]
    fn make_unique_on_sole_owner_keeps_allocation() {
        let mut a = SharedBuffer::new(vec![1, 2, 3]);
        let before = a.as_slice().as_ptr();
        a.make_unique()[0] = 9;
        assert_eq!(a.as_slice().as_ptr(), before);
        assert_eq!(a.as_slice(), &[9, 2, 3]);
    }
}
