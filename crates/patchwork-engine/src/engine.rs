//! The shared read/write surface of every engine variant.

use patchwork_core::Interval;

/// Which storage strategy backs an engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum EngineKind {
    /// Owns a resizable buffer; the only kind with create/destroy.
    Dynamic,
    /// Borrows a strided window of another engine's buffer.
    View,
}

/// Read access common to all engine kinds.
///
/// Structural operations (create, destroy, sync) are deliberately absent:
/// they exist only on [`DynamicEngine`](crate::DynamicEngine).
pub trait Engine<T> {
    /// The storage strategy of this engine.
    fn kind(&self) -> EngineKind;

    /// Logical index domain presented to callers.
    fn domain(&self) -> Interval;

    /// Number of elements.
    fn len(&self) -> usize {
        self.domain().len()
    }

    /// Whether the engine holds no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element at logical index `index`, or `None` outside the domain.
    fn read(&self, index: i64) -> Option<&T>;

    /// Copy every element, in domain order, into a vector.
    fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        let dom = self.domain();
        dom.iter().filter_map(|i| self.read(i).cloned()).collect()
    }
}

/// Write access to individual elements.
pub trait EngineMut<T>: Engine<T> {
    /// Mutable element at logical index `index`, or `None` outside the domain.
    fn read_mut(&mut self, index: i64) -> Option<&mut T>;
}
