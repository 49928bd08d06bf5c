//! The resizable single-patch engine.
//!
//! [`DynamicEngine`] owns a copy-on-write [`SharedBuffer`] plus the
//! [`Interval`] naming its elements. It is the only engine kind that can
//! change size: [`create`](DynamicEngine::create) appends elements at the top
//! of the domain, the `destroy*` family removes named elements with a
//! [`DeleteMethod`], and [`sync`](DynamicEngine::sync) relabels the domain
//! without touching the elements.
//!
//! # Invariants
//!
//! After every public call, `buffer length == domain().len()` and
//! `first() == domain().first()`. A structural change never resizes a
//! buffer that another engine copy can still observe.

use patchwork_core::{DeleteMethod, DeleteStrategy, Interval, PatchId, PatchNode, Range};
use patchwork_domain::IndexSource;

use crate::buffer::SharedBuffer;
use crate::compact::{compact, normalize_kill_list, KillIndexing};
use crate::engine::{Engine, EngineKind, EngineMut};
use crate::error::EngineError;
use crate::view::{locate, DynamicView, DynamicViewMut, ViewHandle};

/// A resizable, reference-counted 1-D engine for one patch.
///
/// Cloning is shallow: the clone shares the element buffer until either
/// side mutates it.
///
/// # Examples
///
/// ```
/// use patchwork_core::{DeleteMethod, Interval};
/// use patchwork_engine::{DynamicEngine, KillIndexing};
///
/// let mut engine = DynamicEngine::from_vec(0, (0..10).collect::<Vec<i32>>());
/// engine
///     .destroy_with(&vec![2i64, 5, 8], DeleteMethod::ShiftUp, KillIndexing::Absolute)
///     .unwrap();
/// assert_eq!(engine.domain(), Interval::new(0, 6).unwrap());
/// assert_eq!(engine.as_slice(), &[0, 1, 3, 4, 6, 7, 9]);
/// ```
#[derive(Debug)]
pub struct DynamicEngine<T> {
    /// Element storage, `domain.len()` elements long.
    data: SharedBuffer<T>,
    /// Logical indices of the elements.
    domain: Interval,
    /// Cached `domain.first()` for offset translation.
    first: i64,
    /// Patch this engine stores.
    patch: PatchId,
    /// Incremented on every structural change; used to detect stale views.
    generation: u32,
}

impl<T> DynamicEngine<T> {
    /// Wrap existing elements, labelling them from `first` upward.
    pub fn from_vec(first: i64, data: Vec<T>) -> Self {
        let domain = Interval::with_len(first, data.len());
        Self {
            data: SharedBuffer::new(data),
            domain,
            first,
            patch: PatchId::default(),
            generation: 0,
        }
    }

    /// Assign the patch this engine stores.
    pub fn with_patch(mut self, patch: PatchId) -> Self {
        self.patch = patch;
        self
    }

    /// Current logical domain.
    pub fn domain(&self) -> Interval {
        self.domain
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.domain.len()
    }

    /// Whether the engine holds no elements.
    pub fn is_empty(&self) -> bool {
        self.domain.is_empty()
    }

    /// First logical index.
    pub fn first(&self) -> i64 {
        self.first
    }

    /// Patch this engine stores.
    pub fn patch(&self) -> PatchId {
        self.patch
    }

    /// Structural-change counter.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Number of engine copies sharing the element buffer.
    pub fn ref_count(&self) -> usize {
        self.data.ref_count()
    }

    /// Whether another engine copy shares the element buffer.
    pub fn is_shared(&self) -> bool {
        self.data.is_shared()
    }

    /// Whether two engines share the same element buffer.
    pub fn shares_buffer_with(&self, other: &Self) -> bool {
        SharedBuffer::ptr_eq(&self.data, &other.data)
    }

    /// Elements in offset order.
    pub fn as_slice(&self) -> &[T] {
        self.data.as_slice()
    }

    /// Iterate the elements in offset order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.as_slice().iter()
    }

    /// Element at logical index `index`.
    pub fn get(&self, index: i64) -> Option<&T> {
        let offset = self.domain.offset_of(index)?;
        self.data.as_slice().get(offset)
    }

    /// Relabel the domain to `new_domain` without touching the elements.
    ///
    /// Used to adopt a renumbered global range after a layout recomputes
    /// patch boundaries. Returns `Err(EngineError::SyncSizeMismatch)` if
    /// the sizes differ: `sync` never creates or destroys.
    pub fn sync(&mut self, new_domain: Interval) -> Result<(), EngineError> {
        if new_domain.len() != self.domain.len() {
            return Err(EngineError::SyncSizeMismatch {
                current: self.domain.len(),
                requested: new_domain.len(),
            });
        }
        self.domain = new_domain;
        self.first = new_domain.first();
        Ok(())
    }

    /// A read-only view of the contiguous subset `dom`.
    pub fn view(&self, dom: Interval) -> Result<DynamicView<'_, T>, EngineError> {
        self.view_range(Range::from(dom))
    }

    /// A read-only view of the strided subset `range`.
    pub fn view_range(&self, range: Range) -> Result<DynamicView<'_, T>, EngineError> {
        let (offset, stride) = locate(self.domain, range)?;
        Ok(DynamicView::from_parts(
            self.data.as_slice(),
            offset,
            stride,
            range.len(),
        ))
    }

    /// A detached description of the strided subset `range`.
    ///
    /// Unlike a borrowed view, a handle can be held across structural
    /// changes; resolving it afterwards fails with `StaleView`.
    pub fn view_handle(&self, range: Range) -> Result<ViewHandle, EngineError> {
        let (offset, stride) = locate(self.domain, range)?;
        Ok(ViewHandle::new(
            self.patch,
            self.generation,
            offset,
            stride,
            range.len(),
        ))
    }

    /// Byte size of `domain` when packed for another context.
    ///
    /// Always `Err(EngineError::Unsupported)`: packing belongs to the
    /// remote engine layered on top of this one.
    pub fn pack_size<D: IndexSource + ?Sized>(&self, _domain: &D) -> Result<usize, EngineError> {
        Err(EngineError::Unsupported {
            operation: "pack_size",
        })
    }

    /// Serialise `domain` for another context. Always unsupported here.
    pub fn pack<D: IndexSource + ?Sized>(
        &self,
        _domain: &D,
        _buffer: &mut Vec<u8>,
    ) -> Result<usize, EngineError> {
        Err(EngineError::Unsupported { operation: "pack" })
    }

    /// Append elements received from another context. Always unsupported here.
    pub fn unpack(&mut self, _buffer: &[u8]) -> Result<Interval, EngineError> {
        Err(EngineError::Unsupported { operation: "unpack" })
    }

    fn bump_generation(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }
}

impl<T: Default> DynamicEngine<T> {
    /// Create an engine over `domain` filled with default elements.
    pub fn new(domain: Interval) -> Self {
        let data = std::iter::repeat_with(T::default)
            .take(domain.len())
            .collect();
        Self {
            data: SharedBuffer::new(data),
            domain,
            first: domain.first(),
            patch: PatchId::default(),
            generation: 0,
        }
    }

    /// Create the engine for one patch of a layout.
    pub fn from_node(node: &PatchNode) -> Self {
        Self::new(node.domain).with_patch(node.patch)
    }
}

impl<T: Clone> DynamicEngine<T> {
    /// Create an engine over `domain` with every element set to `model`.
    pub fn with_model(domain: Interval, model: T) -> Self {
        Self {
            data: SharedBuffer::new(vec![model; domain.len()]),
            domain,
            first: domain.first(),
            patch: PatchId::default(),
            generation: 0,
        }
    }

    /// Mutable element at logical index `index`, detaching a shared buffer.
    pub fn get_mut(&mut self, index: i64) -> Option<&mut T> {
        let offset = self.domain.offset_of(index)?;
        self.data.make_unique().get_mut(offset)
    }

    /// Elements in offset order, detaching a shared buffer.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.data.make_unique().as_mut_slice()
    }

    /// Mutable iteration in offset order, detaching a shared buffer.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.data.make_unique().iter_mut()
    }

    /// Force a private copy of the element buffer if it is shared.
    pub fn make_own_copy(&mut self) {
        self.data.make_unique();
    }

    /// Append `n` copies of `model` at the top of the domain.
    ///
    /// Existing elements keep their offsets. Returns the interval of the
    /// new elements, `[old_last + 1, old_last + n]`.
    pub fn create_with(&mut self, n: usize, model: T) -> Interval {
        let created = Interval::with_len(self.domain.last() + 1, n);
        if n == 0 {
            return created;
        }
        let data = self.data.make_unique();
        data.resize(data.len() + n, model);
        self.grow(n);
        created
    }

    /// Remove the elements named by `kill` (absolute indices) with BackFill.
    ///
    /// Returns the number of elements destroyed.
    pub fn destroy<D: IndexSource + ?Sized>(&mut self, kill: &D) -> Result<usize, EngineError> {
        self.destroy_with(kill, DeleteMethod::BackFill, KillIndexing::Absolute)
    }

    /// Remove the elements named by `kill`.
    ///
    /// `kill` may be in any order but must not repeat an element, must not
    /// be longer than the engine, and every value must name an element
    /// under `indexing`. An empty kill-list is a no-op. Returns the number
    /// of elements destroyed.
    pub fn destroy_with<D: IndexSource + ?Sized>(
        &mut self,
        kill: &D,
        method: DeleteMethod,
        indexing: KillIndexing,
    ) -> Result<usize, EngineError> {
        if kill.is_empty() {
            return Ok(0);
        }
        let offsets = normalize_kill_list(kill, self.domain, indexing)?;
        Ok(self.destroy_offsets(&offsets, method))
    }

    /// [`destroy_with`](Self::destroy_with) with the method fixed by a tag type.
    pub fn destroy_strategy<S: DeleteStrategy, D: IndexSource + ?Sized>(
        &mut self,
        kill: &D,
        indexing: KillIndexing,
    ) -> Result<usize, EngineError> {
        self.destroy_with(kill, S::METHOD, indexing)
    }

    /// Remove the elements named by an iterator of indices.
    pub fn destroy_iter<I: IntoIterator<Item = i64>>(
        &mut self,
        kill: I,
        method: DeleteMethod,
        indexing: KillIndexing,
    ) -> Result<usize, EngineError> {
        let kill: Vec<i64> = kill.into_iter().collect();
        self.destroy_with(&kill, method, indexing)
    }

    /// Append copies of the elements named by `list` at the top of the domain.
    ///
    /// Copies are appended in list order; repeats are allowed. Returns the
    /// interval of the new elements.
    pub fn copy_from<D: IndexSource + ?Sized>(
        &mut self,
        list: &D,
        indexing: KillIndexing,
    ) -> Result<Interval, EngineError> {
        let mut copies = Vec::with_capacity(list.len());
        for value in list.indices() {
            let offset = indexing.to_offset(value, self.domain)?;
            copies.push(self.data.as_slice()[offset].clone());
        }
        let n = copies.len();
        let created = Interval::with_len(self.domain.last() + 1, n);
        if n > 0 {
            self.data.make_unique().extend(copies);
            self.grow(n);
        }
        Ok(created)
    }

    /// A writable view of the contiguous subset `dom`.
    pub fn view_mut(&mut self, dom: Interval) -> Result<DynamicViewMut<'_, T>, EngineError> {
        self.view_range_mut(Range::from(dom))
    }

    /// A writable view of the strided subset `range`.
    pub fn view_range_mut(&mut self, range: Range) -> Result<DynamicViewMut<'_, T>, EngineError> {
        let (offset, stride) = locate(self.domain, range)?;
        Ok(DynamicViewMut::from_parts(
            self.data.make_unique().as_mut_slice(),
            offset,
            stride,
            range.len(),
        ))
    }

    fn destroy_offsets(&mut self, offsets: &[usize], method: DeleteMethod) -> usize {
        let killed = offsets.len();
        compact(method, self.data.make_unique(), offsets);
        self.domain = self.domain.shrink(killed);
        self.first = self.domain.first();
        self.bump_generation();
        debug_assert_eq!(self.data.len(), self.domain.len());
        tracing::trace!(
            patch = %self.patch,
            killed,
            %method,
            domain = %self.domain,
            "destroyed elements"
        );
        killed
    }

    fn grow(&mut self, n: usize) {
        self.domain = self.domain.extend(n);
        self.first = self.domain.first();
        self.bump_generation();
        debug_assert_eq!(self.data.len(), self.domain.len());
        tracing::trace!(patch = %self.patch, created = n, domain = %self.domain, "created elements");
    }
}

impl<T: Clone + Default> DynamicEngine<T> {
    /// Append `n` default elements at the top of the domain.
    ///
    /// Returns the interval of the new elements, `[old_last + 1, old_last + n]`.
    pub fn create(&mut self, n: usize) -> Interval {
        let created = Interval::with_len(self.domain.last() + 1, n);
        if n == 0 {
            return created;
        }
        let data = self.data.make_unique();
        data.resize_with(data.len() + n, T::default);
        self.grow(n);
        created
    }
}

impl<T> Clone for DynamicEngine<T> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            domain: self.domain,
            first: self.first,
            patch: self.patch,
            generation: self.generation,
        }
    }
}

impl<T> Engine<T> for DynamicEngine<T> {
    fn kind(&self) -> EngineKind {
        EngineKind::Dynamic
    }

    fn domain(&self) -> Interval {
        self.domain
    }

    fn read(&self, index: i64) -> Option<&T> {
        self.get(index)
    }
}

impl<T: Clone> EngineMut<T> for DynamicEngine<T> {
    fn read_mut(&mut self, index: i64) -> Option<&mut T> {
        self.get_mut(index)
    }
}
