//! Per-particle attribute storage.
//!
//! An [`Attribute<T>`] holds one [`DynamicArray<T>`] per local patch. The
//! container keeps attributes of different element types side by side as
//! `Box<dyn AttributeStorage>`, which lets it apply create, destroy, and
//! renumber to every attribute without knowing `T`. Typed access goes back
//! through [`downcast_ref`](trait.AttributeStorage.html#method.downcast_ref).

use std::any::{type_name, Any};
use std::fmt;

use patchwork_core::{DeleteMethod, Interval, PatchId, PatchNode};
use patchwork_engine::{DynamicArray, KillIndexing};

use crate::error::ParticlesError;
use crate::layout::ParticleLayout;

/// Type-erased view of an attribute used by the container.
///
/// # Object Safety
///
/// This trait is designed for use as `dyn AttributeStorage`. Use
/// `downcast_ref` / `downcast_mut` to recover the concrete
/// [`Attribute<T>`].
pub trait AttributeStorage: Any {
    /// Registered name.
    fn name(&self) -> &str;

    /// Name of the element type, for diagnostics.
    fn element_type(&self) -> &'static str;

    /// Number of patches.
    fn num_patches(&self) -> usize;

    /// Elements held by `patch`, or `None` for an unknown patch.
    fn patch_len(&self, patch: PatchId) -> Option<usize>;

    /// Append `n` default elements to `patch`.
    fn create(&mut self, n: usize, patch: PatchId) -> Result<Interval, ParticlesError>;

    /// Remove the elements of `patch` at the zero-based `offsets`.
    fn destroy(
        &mut self,
        offsets: &[i64],
        patch: PatchId,
        method: DeleteMethod,
    ) -> Result<usize, ParticlesError>;

    /// Relabel every patch to its domain in `layout`.
    fn sync(&mut self, layout: &ParticleLayout) -> Result<(), ParticlesError>;
}

impl dyn AttributeStorage {
    /// Downcast to a concrete attribute type.
    pub fn downcast_ref<A: AttributeStorage>(&self) -> Option<&A> {
        (self as &dyn Any).downcast_ref::<A>()
    }

    /// Downcast to a concrete attribute type, mutably.
    pub fn downcast_mut<A: AttributeStorage>(&mut self) -> Option<&mut A> {
        (self as &mut dyn Any).downcast_mut::<A>()
    }
}

impl fmt::Debug for dyn AttributeStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttributeStorage")
            .field("name", &self.name())
            .field("element_type", &self.element_type())
            .finish()
    }
}

/// One named per-particle quantity, stored patch by patch.
#[derive(Clone, Debug)]
pub struct Attribute<T> {
    name: String,
    patches: Vec<DynamicArray<T>>,
}

impl<T: Default> Attribute<T> {
    /// An attribute with one default-filled array per node.
    pub fn new(name: impl Into<String>, nodes: &[PatchNode]) -> Self {
        Self {
            name: name.into(),
            patches: nodes.iter().map(DynamicArray::from_node).collect(),
        }
    }
}

impl<T> Attribute<T> {
    /// Registered name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of patches.
    pub fn num_patches(&self) -> usize {
        self.patches.len()
    }

    /// The array for `patch`.
    pub fn patch(&self, patch: PatchId) -> Option<&DynamicArray<T>> {
        self.patches.get(patch.index())
    }

    /// The array for `patch`, mutably.
    pub fn patch_mut(&mut self, patch: PatchId) -> Option<&mut DynamicArray<T>> {
        self.patches.get_mut(patch.index())
    }

    /// Elements across all patches.
    pub fn len(&self) -> usize {
        self.patches.iter().map(DynamicArray::len).sum()
    }

    /// Whether every patch is empty.
    pub fn is_empty(&self) -> bool {
        self.patches.iter().all(DynamicArray::is_empty)
    }

    /// Iterate every element, patch by patch.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.patches.iter().flat_map(DynamicArray::iter)
    }

    /// Element at `global_index` under the current patch numbering.
    pub fn get(&self, global_index: i64) -> Option<&T> {
        self.patches
            .iter()
            .find(|a| a.domain().contains(global_index))
            .and_then(|a| a.get(global_index))
    }

    fn patch_or_err(&mut self, patch: PatchId) -> Result<&mut DynamicArray<T>, ParticlesError> {
        let num_patches = self.patches.len();
        self.patches
            .get_mut(patch.index())
            .ok_or(ParticlesError::UnknownPatch { patch, num_patches })
    }
}

impl<T: Clone> Attribute<T> {
    /// Copy every element, patch by patch, into a vector.
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}

impl<T: Clone + Default + 'static> AttributeStorage for Attribute<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn element_type(&self) -> &'static str {
        type_name::<T>()
    }

    fn num_patches(&self) -> usize {
        self.patches.len()
    }

    fn patch_len(&self, patch: PatchId) -> Option<usize> {
        self.patches.get(patch.index()).map(DynamicArray::len)
    }

    fn create(&mut self, n: usize, patch: PatchId) -> Result<Interval, ParticlesError> {
        Ok(self.patch_or_err(patch)?.create(n))
    }

    fn destroy(
        &mut self,
        offsets: &[i64],
        patch: PatchId,
        method: DeleteMethod,
    ) -> Result<usize, ParticlesError> {
        let killed = self
            .patch_or_err(patch)?
            .engine_mut()
            .destroy_with(offsets, method, KillIndexing::Offset)?;
        Ok(killed)
    }

    fn sync(&mut self, layout: &ParticleLayout) -> Result<(), ParticlesError> {
        for (array, node) in self.patches.iter_mut().zip(layout.nodes()) {
            array.sync_to(node.domain)?;
        }
        Ok(())
    }
}
