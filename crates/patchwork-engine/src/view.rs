//! Strided, zero-based views into a dynamic engine's buffer.
//!
//! A view presents the domain `[0, len - 1]` and maps element `k` to buffer
//! offset `offset + k * stride`. Views borrow their parent, so the compiler
//! rejects any structural change to the parent while a view is alive.
//! [`ViewHandle`] is the detached alternative: it records the parent's
//! generation and refuses to resolve once the parent has been resized.

use patchwork_core::{Interval, PatchId, Range};

use crate::dynamic::DynamicEngine;
use crate::engine::{Engine, EngineKind, EngineMut};
use crate::error::EngineError;

/// Check that `range` lies inside `parent` and return its buffer placement.
pub(crate) fn locate(parent: Interval, range: Range) -> Result<(usize, isize), EngineError> {
    let stride = range.stride() as isize;
    let Some(last) = range.last() else {
        return Ok((0, stride));
    };
    if !parent.contains(range.first()) || !parent.contains(last) {
        return Err(EngineError::ViewOutOfBounds {
            reason: format!("{range} not contained in {parent}"),
        });
    }
    Ok(((range.first() - parent.first()) as usize, stride))
}

fn position(offset: usize, stride: isize, k: usize) -> usize {
    (offset as isize + k as isize * stride) as usize
}

/// A read-only strided window into a dynamic engine's elements.
#[derive(Debug)]
pub struct DynamicView<'a, T> {
    data: &'a [T],
    offset: usize,
    stride: isize,
    len: usize,
}

impl<'a, T> DynamicView<'a, T> {
    pub(crate) fn from_parts(data: &'a [T], offset: usize, stride: isize, len: usize) -> Self {
        Self {
            data,
            offset,
            stride,
            len,
        }
    }

    /// Zero-based domain `[0, len - 1]`.
    pub fn domain(&self) -> Interval {
        Interval::with_len(0, self.len)
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the view holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Buffer offset of element 0.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Buffer distance between consecutive elements.
    pub fn stride(&self) -> isize {
        self.stride
    }

    /// Element `k`, or `None` if `k` is outside the view.
    pub fn get(&self, k: i64) -> Option<&'a T> {
        if k < 0 || k as usize >= self.len {
            return None;
        }
        self.data.get(position(self.offset, self.stride, k as usize))
    }

    /// A further subset of this view, in this view's zero-based indices.
    ///
    /// Offsets and strides compose: element `j` of the result is element
    /// `range.first() + j * range.stride()` of `self`.
    pub fn subview(&self, range: Range) -> Result<DynamicView<'a, T>, EngineError> {
        let (sub_offset, sub_stride) = locate(self.domain(), range)?;
        Ok(Self {
            data: self.data,
            offset: position(self.offset, self.stride, sub_offset),
            stride: self.stride * sub_stride,
            len: range.len(),
        })
    }

    /// Iterate the elements in view order.
    pub fn iter(&self) -> impl Iterator<Item = &'a T> + '_ {
        let data = self.data;
        let (offset, stride) = (self.offset, self.stride);
        (0..self.len).map(move |k| &data[position(offset, stride, k)])
    }
}

impl<T> Clone for DynamicView<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for DynamicView<'_, T> {}

impl<T> Engine<T> for DynamicView<'_, T> {
    fn kind(&self) -> EngineKind {
        EngineKind::View
    }

    fn domain(&self) -> Interval {
        DynamicView::domain(self)
    }

    fn read(&self, index: i64) -> Option<&T> {
        self.get(index)
    }
}

/// A writable strided window into a dynamic engine's elements.
#[derive(Debug)]
pub struct DynamicViewMut<'a, T> {
    data: &'a mut [T],
    offset: usize,
    stride: isize,
    len: usize,
}

impl<'a, T> DynamicViewMut<'a, T> {
    pub(crate) fn from_parts(data: &'a mut [T], offset: usize, stride: isize, len: usize) -> Self {
        Self {
            data,
            offset,
            stride,
            len,
        }
    }

    /// Zero-based domain `[0, len - 1]`.
    pub fn domain(&self) -> Interval {
        Interval::with_len(0, self.len)
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the view holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Element `k`, or `None` if `k` is outside the view.
    pub fn get(&self, k: i64) -> Option<&T> {
        if k < 0 || k as usize >= self.len {
            return None;
        }
        self.data.get(position(self.offset, self.stride, k as usize))
    }

    /// Mutable element `k`, or `None` if `k` is outside the view.
    pub fn get_mut(&mut self, k: i64) -> Option<&mut T> {
        if k < 0 || k as usize >= self.len {
            return None;
        }
        self.data
            .get_mut(position(self.offset, self.stride, k as usize))
    }

    /// Assign `value` to every element of the view.
    pub fn fill(&mut self, value: T)
    where
        T: Clone,
    {
        for k in 0..self.len {
            self.data[position(self.offset, self.stride, k)] = value.clone();
        }
    }

    /// Reborrow a further subset of this view.
    pub fn subview_mut(&mut self, range: Range) -> Result<DynamicViewMut<'_, T>, EngineError> {
        let (sub_offset, sub_stride) = locate(self.domain(), range)?;
        Ok(DynamicViewMut {
            offset: position(self.offset, self.stride, sub_offset),
            stride: self.stride * sub_stride,
            len: range.len(),
            data: &mut *self.data,
        })
    }

    /// Downgrade to a read-only view.
    pub fn into_view(self) -> DynamicView<'a, T> {
        DynamicView::from_parts(self.data, self.offset, self.stride, self.len)
    }
}

impl<T> Engine<T> for DynamicViewMut<'_, T> {
    fn kind(&self) -> EngineKind {
        EngineKind::View
    }

    fn domain(&self) -> Interval {
        DynamicViewMut::domain(self)
    }

    fn read(&self, index: i64) -> Option<&T> {
        self.get(index)
    }
}

impl<T> EngineMut<T> for DynamicViewMut<'_, T> {
    fn read_mut(&mut self, index: i64) -> Option<&mut T> {
        self.get_mut(index)
    }
}

/// A detached view descriptor that survives borrows but not resizes.
///
/// Captures the parent's patch and generation alongside the buffer
/// placement. Resolving against an engine whose generation has advanced
/// (any create or destroy since capture) fails with
/// [`EngineError::StaleView`] instead of reading shifted elements.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub struct ViewHandle {
    patch: PatchId,
    generation: u32,
    offset: usize,
    stride: isize,
    len: usize,
}

impl ViewHandle {
    pub(crate) fn new(
        patch: PatchId,
        generation: u32,
        offset: usize,
        stride: isize,
        len: usize,
    ) -> Self {
        Self {
            patch,
            generation,
            offset,
            stride,
            len,
        }
    }

    /// Engine generation at capture time.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Number of elements described.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the handle describes no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Re-borrow the described view from `engine`.
    pub fn resolve<'a, T>(&self, engine: &'a DynamicEngine<T>) -> Result<DynamicView<'a, T>, EngineError> {
        self.check(engine)?;
        Ok(DynamicView::from_parts(
            engine.as_slice(),
            self.offset,
            self.stride,
            self.len,
        ))
    }

    /// Re-borrow the described view from `engine` for writing.
    pub fn resolve_mut<'a, T: Clone>(
        &self,
        engine: &'a mut DynamicEngine<T>,
    ) -> Result<DynamicViewMut<'a, T>, EngineError> {
        self.check(engine)?;
        Ok(DynamicViewMut::from_parts(
            engine.as_mut_slice(),
            self.offset,
            self.stride,
            self.len,
        ))
    }

    fn check<T>(&self, engine: &DynamicEngine<T>) -> Result<(), EngineError> {
        if engine.patch() != self.patch {
            return Err(EngineError::WrongPatch {
                expected: engine.patch(),
                got: self.patch,
            });
        }
        if engine.generation() != self.generation {
            return Err(EngineError::StaleView {
                view_generation: self.generation,
                engine_generation: engine.generation(),
            });
        }
        Ok(())
    }
}
