//! User-facing array over a single dynamic engine.

use std::ops::{Index, IndexMut};

use patchwork_core::{DeleteMethod, Interval, PatchId, PatchNode, Range};
use patchwork_domain::IndexSource;

use crate::compact::KillIndexing;
use crate::dynamic::DynamicEngine;
use crate::error::EngineError;
use crate::view::DynamicView;

/// A 1-D array whose size can change at run time.
///
/// Element access uses the engine's logical indices. Structural calls take
/// absolute indices and forward to the wrapped [`DynamicEngine`].
#[derive(Clone, Debug)]
pub struct DynamicArray<T> {
    engine: DynamicEngine<T>,
}

impl<T: Default> DynamicArray<T> {
    /// An array over `domain` with default elements.
    pub fn new(domain: Interval) -> Self {
        Self {
            engine: DynamicEngine::new(domain),
        }
    }

    /// The array for one patch of a layout.
    pub fn from_node(node: &PatchNode) -> Self {
        Self {
            engine: DynamicEngine::from_node(node),
        }
    }
}

impl<T: Clone> DynamicArray<T> {
    /// An array over `domain` with every element set to `model`.
    pub fn with_model(domain: Interval, model: T) -> Self {
        Self {
            engine: DynamicEngine::with_model(domain, model),
        }
    }

    /// Mutable element at `index`.
    pub fn get_mut(&mut self, index: i64) -> Option<&mut T> {
        self.engine.get_mut(index)
    }

    /// Mutable iteration in offset order.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.engine.iter_mut()
    }

    /// Assign `value` to every element.
    pub fn fill(&mut self, value: T) {
        self.engine.as_mut_slice().fill(value);
    }

    /// Copy every element into a vector, in offset order.
    pub fn to_vec(&self) -> Vec<T> {
        self.engine.as_slice().to_vec()
    }

    /// Remove the elements named by `kill` (absolute indices).
    pub fn destroy<D: IndexSource + ?Sized>(
        &mut self,
        kill: &D,
        method: DeleteMethod,
    ) -> Result<usize, EngineError> {
        self.engine.destroy_with(kill, method, KillIndexing::Absolute)
    }

    /// Remove the elements named by an iterator of absolute indices.
    pub fn destroy_iter<I: IntoIterator<Item = i64>>(
        &mut self,
        kill: I,
        method: DeleteMethod,
    ) -> Result<usize, EngineError> {
        self.engine.destroy_iter(kill, method, KillIndexing::Absolute)
    }

    /// Append copies of the elements named by `list` to patch `to_patch`.
    ///
    /// A single-engine array owns exactly one patch, so any other target is
    /// rejected.
    pub fn copy<D: IndexSource + ?Sized>(
        &mut self,
        list: &D,
        to_patch: PatchId,
    ) -> Result<Interval, EngineError> {
        self.check_patch(to_patch)?;
        self.engine.copy_from(list, KillIndexing::Absolute)
    }

    /// Relabel the domain to `domain` without changing its size.
    pub fn sync_to(&mut self, domain: Interval) -> Result<(), EngineError> {
        self.engine.sync(domain)
    }
}

impl<T: Clone + Default> DynamicArray<T> {
    /// Append `n` default elements. Returns their interval.
    pub fn create(&mut self, n: usize) -> Interval {
        self.engine.create(n)
    }

    /// Append `n` default elements to patch `patch`.
    pub fn create_on(&mut self, n: usize, patch: PatchId) -> Result<Interval, EngineError> {
        self.check_patch(patch)?;
        Ok(self.engine.create(n))
    }
}

impl<T> DynamicArray<T> {
    /// Wrap existing elements, labelling them from `first` upward.
    pub fn from_vec(first: i64, data: Vec<T>) -> Self {
        Self {
            engine: DynamicEngine::from_vec(first, data),
        }
    }

    /// Current logical domain.
    pub fn domain(&self) -> Interval {
        self.engine.domain()
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.engine.len()
    }

    /// Whether the array holds no elements.
    pub fn is_empty(&self) -> bool {
        self.engine.is_empty()
    }

    /// Patch stored by this array.
    pub fn patch(&self) -> PatchId {
        self.engine.patch()
    }

    /// Element at `index`.
    pub fn get(&self, index: i64) -> Option<&T> {
        self.engine.get(index)
    }

    /// Iterate the elements in offset order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.engine.iter()
    }

    /// Elements in offset order.
    pub fn as_slice(&self) -> &[T] {
        self.engine.as_slice()
    }

    /// Bring patch boundaries up to date.
    ///
    /// A single-engine array has nothing to reconcile.
    pub fn sync(&mut self) {}

    /// Read-only view of the contiguous subset `dom`.
    pub fn view(&self, dom: Interval) -> Result<DynamicView<'_, T>, EngineError> {
        self.engine.view(dom)
    }

    /// Read-only view of the strided subset `range`.
    pub fn view_range(&self, range: Range) -> Result<DynamicView<'_, T>, EngineError> {
        self.engine.view_range(range)
    }

    /// The wrapped engine.
    pub fn engine(&self) -> &DynamicEngine<T> {
        &self.engine
    }

    /// The wrapped engine, mutably.
    pub fn engine_mut(&mut self) -> &mut DynamicEngine<T> {
        &mut self.engine
    }

    /// Unwrap into the engine.
    pub fn into_engine(self) -> DynamicEngine<T> {
        self.engine
    }

    fn check_patch(&self, patch: PatchId) -> Result<(), EngineError> {
        if patch != self.engine.patch() {
            return Err(EngineError::WrongPatch {
                expected: self.engine.patch(),
                got: patch,
            });
        }
        Ok(())
    }
}

impl<T> From<DynamicEngine<T>> for DynamicArray<T> {
    fn from(engine: DynamicEngine<T>) -> Self {
        Self { engine }
    }
}

impl<T> Index<i64> for DynamicArray<T> {
    type Output = T;

    fn index(&self, index: i64) -> &T {
        match self.engine.get(index) {
            Some(v) => v,
            None => panic!(
                "index {index} out of bounds for array domain {}",
                self.engine.domain()
            ),
        }
    }
}

impl<T: Clone> IndexMut<i64> for DynamicArray<T> {
    fn index_mut(&mut self, index: i64) -> &mut T {
        let domain = self.engine.domain();
        match self.engine.get_mut(index) {
            Some(v) => v,
            None => panic!("index {index} out of bounds for array domain {domain}"),
        }
    }
}
