//! The particle container and its deferred-destroy protocol.
//!
//! # Destroy protocol
//!
//! ```text
//!   Clean ──deferred_destroy──▶ Pending ──perform_destroy──▶ Clean
//!     │                           │  ▲
//!     │                           └──┘ deferred_destroy
//!     └──destroy (immediate)──▶ Clean
//! ```
//!
//! Deferred destroys collect local offsets in one [`KillList`] per patch so
//! that many small removal requests cost a single compaction pass per
//! patch. Renumbering recomputes the global numbering from the new patch
//! sizes and relabels every attribute engine to match.

use std::sync::Arc;

use indexmap::IndexMap;
use smallvec::SmallVec;

use patchwork_core::{AttributeId, DeleteMethod, Interval, PatchId, PatchNode};
use patchwork_domain::IndexSource;
use patchwork_engine::{DynamicEngine, KillIndexing};

use crate::attribute::{Attribute, AttributeStorage};
use crate::config::ParticlesConfig;
use crate::error::ParticlesError;
use crate::exchange::{ContextExchange, SingleContext};
use crate::kill_list::KillList;
use crate::layout::ParticleLayout;

/// Which patches an operation addresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PatchScope {
    /// Indices are global; every local patch may be affected.
    Global,
    /// Indices are zero-based offsets into one patch.
    Local(PatchId),
}

/// Whether deferred destroys are waiting to be applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DestroyState {
    /// No kill-list holds an offset.
    Clean,
    /// At least one kill-list holds an offset.
    Pending,
}

/// The local offsets a global destroy domain resolves to on one patch.
#[derive(Clone, Debug, PartialEq, Eq)]
struct PatchRun {
    patch: PatchId,
    offsets: Vec<i64>,
}

/// A set of particles partitioned into patches, with named attributes.
///
/// Every attribute holds one element per particle. Structural operations
/// (create, destroy) are applied to all attributes at once so that they
/// stay the same length.
///
/// # Examples
///
/// ```
/// use patchwork_core::PatchId;
/// use patchwork_particles::{Particles, ParticlesConfig, PatchScope};
///
/// let mut particles = Particles::new(ParticlesConfig::new(2)).unwrap();
/// let pos = particles.add_attribute::<f64>("pos").unwrap();
/// particles.global_create(10, true).unwrap();
///
/// particles.deferred_destroy(&vec![1i64, 7], PatchScope::Global).unwrap();
/// particles.perform_destroy(PatchScope::Global, true).unwrap();
///
/// assert_eq!(particles.size(), 8);
/// assert_eq!(particles.attribute::<f64>(pos).unwrap().len(), 8);
/// assert_eq!(particles.patch_size(PatchId(1)).unwrap(), 4);
/// ```
#[derive(Debug)]
pub struct Particles {
    destroy_method: DeleteMethod,
    layout: ParticleLayout,
    /// Element-free engines mirroring each patch's size. Structural
    /// changes are validated against these before any attribute is touched.
    shape: SmallVec<[DynamicEngine<()>; 4]>,
    kill_lists: SmallVec<[KillList; 4]>,
    attributes: IndexMap<AttributeId, Box<dyn AttributeStorage>>,
    next_attribute: u32,
}

impl Particles {
    /// A single-context container.
    pub fn new(config: ParticlesConfig) -> Result<Self, ParticlesError> {
        Self::with_exchange(config, Arc::new(SingleContext))
    }

    /// A container numbered across contexts through `exchange`.
    pub fn with_exchange(
        config: ParticlesConfig,
        exchange: Arc<dyn ContextExchange>,
    ) -> Result<Self, ParticlesError> {
        config.validate()?;
        let layout = ParticleLayout::new(config.num_patches, config.initial_patch_size, exchange);
        let shape = layout.nodes().iter().map(DynamicEngine::from_node).collect();
        let kill_lists = layout.nodes().iter().map(|n| KillList::new(n.patch)).collect();
        Ok(Self {
            destroy_method: config.destroy_method,
            layout,
            shape,
            kill_lists,
            attributes: IndexMap::new(),
            next_attribute: 0,
        })
    }

    // ── Attributes ─────────────────────────────────────────────────

    /// Register a new attribute sized to the current patches.
    ///
    /// Every existing particle gets `T::default()`.
    pub fn add_attribute<T: Clone + Default + 'static>(
        &mut self,
        name: &str,
    ) -> Result<AttributeId, ParticlesError> {
        if self.attribute_id(name).is_some() {
            return Err(ParticlesError::DuplicateAttribute { name: name.into() });
        }
        let context = self.layout.context();
        let nodes: SmallVec<[PatchNode; 4]> = self
            .shape
            .iter()
            .map(|e| PatchNode::new(e.patch(), context, e.domain()))
            .collect();
        let id = AttributeId(self.next_attribute);
        self.next_attribute += 1;
        self.attributes
            .insert(id, Box::new(Attribute::<T>::new(name, &nodes)));
        tracing::debug!(%id, name, element = std::any::type_name::<T>(), "attribute registered");
        Ok(id)
    }

    /// The ID registered for `name`.
    pub fn attribute_id(&self, name: &str) -> Option<AttributeId> {
        self.attributes
            .iter()
            .find(|(_, a)| a.name() == name)
            .map(|(&id, _)| id)
    }

    /// Number of registered attributes.
    pub fn attribute_count(&self) -> usize {
        self.attributes.len()
    }

    /// Typed access to attribute `id`.
    pub fn attribute<T: Clone + Default + 'static>(
        &self,
        id: AttributeId,
    ) -> Result<&Attribute<T>, ParticlesError> {
        let storage = self
            .attributes
            .get(&id)
            .ok_or(ParticlesError::UnknownAttribute { id })?;
        storage
            .downcast_ref::<Attribute<T>>()
            .ok_or_else(|| type_mismatch::<T>(&**storage))
    }

    /// Typed mutable access to attribute `id`.
    pub fn attribute_mut<T: Clone + Default + 'static>(
        &mut self,
        id: AttributeId,
    ) -> Result<&mut Attribute<T>, ParticlesError> {
        let storage = self
            .attributes
            .get_mut(&id)
            .ok_or(ParticlesError::UnknownAttribute { id })?;
        if storage.downcast_ref::<Attribute<T>>().is_none() {
            return Err(type_mismatch::<T>(&**storage));
        }
        storage
            .downcast_mut::<Attribute<T>>()
            .ok_or_else(|| ParticlesError::UnknownAttribute { id })
    }

    // ── Queries ────────────────────────────────────────────────────

    /// Particles across all contexts, as of the last renumber.
    pub fn size(&self) -> usize {
        self.layout.global_size()
    }

    /// Particles held by this context.
    pub fn local_size(&self) -> usize {
        self.shape.iter().map(DynamicEngine::len).sum()
    }

    /// Particles held by `patch`.
    pub fn patch_size(&self, patch: PatchId) -> Result<usize, ParticlesError> {
        Ok(self.shape[self.patch_index(patch)?].len())
    }

    /// Number of local patches.
    pub fn num_patches(&self) -> usize {
        self.shape.len()
    }

    /// The global numbering as of the last renumber.
    pub fn layout(&self) -> &ParticleLayout {
        &self.layout
    }

    /// Compaction algorithm used by destroys.
    pub fn destroy_method(&self) -> DeleteMethod {
        self.destroy_method
    }

    /// Change the compaction algorithm used by later destroys.
    pub fn set_destroy_method(&mut self, method: DeleteMethod) {
        self.destroy_method = method;
    }

    /// Whether deferred destroys are waiting.
    pub fn state(&self) -> DestroyState {
        if self.kill_lists.iter().all(KillList::is_empty) {
            DestroyState::Clean
        } else {
            DestroyState::Pending
        }
    }

    /// Offsets queued for `patch`.
    pub fn pending(&self, patch: PatchId) -> Result<usize, ParticlesError> {
        Ok(self.kill_lists[self.patch_index(patch)?].len())
    }

    /// Offsets queued across all patches.
    pub fn deferred_destroy_amount(&self) -> usize {
        self.kill_lists.iter().map(KillList::len).sum()
    }

    /// The kill-list of `patch`.
    pub fn kill_list(&self, patch: PatchId) -> Result<&KillList, ParticlesError> {
        Ok(&self.kill_lists[self.patch_index(patch)?])
    }

    // ── Create ─────────────────────────────────────────────────────

    /// Append `n` particles to `patch`.
    ///
    /// Returns the patch-local offsets of the new particles. When
    /// `renumber` is true the global numbering is recomputed afterwards.
    pub fn create(
        &mut self,
        n: usize,
        patch: PatchId,
        renumber: bool,
    ) -> Result<Interval, ParticlesError> {
        let idx = self.patch_index(patch)?;
        let created = Interval::with_len(self.shape[idx].len() as i64, n);
        self.shape[idx].create(n);
        for storage in self.attributes.values_mut() {
            storage.create(n, patch)?;
        }
        tracing::debug!(%patch, n, "particles created");
        if renumber {
            self.renumber()?;
        }
        Ok(created)
    }

    /// Create this context's share of `n` particles across its patches.
    ///
    /// `n` is split evenly over contexts and then over local patches; any
    /// remainder goes to the lowest-numbered contexts and patches. Returns
    /// the number of particles created locally.
    pub fn global_create(&mut self, n: usize, renumber: bool) -> Result<usize, ParticlesError> {
        let exchange = self.layout.exchange();
        let contexts = exchange.contexts().max(1) as usize;
        let rank = exchange.context().0 as usize;
        let share = n / contexts + usize::from(rank < n % contexts);

        let num_patches = self.num_patches();
        let (per_patch, rem) = (share / num_patches, share % num_patches);
        for p in 0..num_patches {
            let count = per_patch + usize::from(p < rem);
            if count > 0 {
                self.create(count, PatchId(p as u32), false)?;
            }
        }
        if renumber {
            self.renumber()?;
        }
        Ok(share)
    }

    // ── Destroy ────────────────────────────────────────────────────

    /// Queue `domain` for destruction by a later
    /// [`perform_destroy`](Self::perform_destroy).
    ///
    /// With [`PatchScope::Local`] the values are offsets into that patch and
    /// are queued unchanged. With [`PatchScope::Global`] they are global
    /// indices in any order: each is routed to the patch owning it and
    /// queued as a local offset, and indices owned by other contexts are
    /// skipped. Offsets are validated when the destroy is performed.
    pub fn deferred_destroy<D: IndexSource + ?Sized>(
        &mut self,
        domain: &D,
        scope: PatchScope,
    ) -> Result<(), ParticlesError> {
        match scope {
            PatchScope::Local(patch) => {
                let idx = self.patch_index(patch)?;
                self.kill_lists[idx].append(domain);
                tracing::debug!(%patch, queued = domain.len(), "deferred destroy");
            }
            PatchScope::Global => {
                for run in self.split_global(domain)? {
                    self.kill_lists[run.patch.index()].append(&run.offsets);
                    tracing::debug!(
                        patch = %run.patch,
                        queued = run.offsets.len(),
                        "deferred destroy"
                    );
                }
            }
        }
        Ok(())
    }

    /// Apply queued destroys to one patch or, with [`PatchScope::Global`],
    /// to every patch.
    ///
    /// Each patch's queue is treated as a set: an offset named by several
    /// requests is destroyed once. Every selected patch is validated before
    /// any is compacted, so on error no attribute changes and every queue
    /// is kept. Returns the number of particles destroyed.
    pub fn perform_destroy(
        &mut self,
        scope: PatchScope,
        renumber: bool,
    ) -> Result<usize, ParticlesError> {
        let mut runs: SmallVec<[PatchRun; 4]> = SmallVec::new();
        for idx in self.scope_patches(scope)? {
            if self.kill_lists[idx].is_empty() {
                continue;
            }
            let mut offsets = self.kill_lists[idx].as_slice().to_vec();
            offsets.sort_unstable();
            offsets.dedup();
            runs.push(PatchRun {
                patch: PatchId(idx as u32),
                offsets,
            });
        }

        let destroyed = self.destroy_runs(&runs)?;
        for run in &runs {
            self.kill_lists[run.patch.index()].clear()?;
        }
        tracing::debug!(destroyed, method = %self.destroy_method, "performed deferred destroy");

        if renumber {
            self.renumber()?;
        }
        Ok(destroyed)
    }

    /// Drop queued destroys without applying them. Returns the number of
    /// offsets discarded.
    pub fn discard_pending(&mut self, scope: PatchScope) -> Result<usize, ParticlesError> {
        let mut discarded = 0;
        for idx in self.scope_patches(scope)? {
            discarded += self.kill_lists[idx].clear()?;
        }
        tracing::debug!(discarded, "discarded deferred destroys");
        Ok(discarded)
    }

    /// Destroy `domain` immediately, bypassing the kill-lists.
    ///
    /// Index interpretation follows
    /// [`deferred_destroy`](Self::deferred_destroy). Returns the number of
    /// particles destroyed. Duplicate indices are rejected, and every
    /// affected patch is validated before any is compacted.
    pub fn destroy<D: IndexSource + ?Sized>(
        &mut self,
        domain: &D,
        scope: PatchScope,
        renumber: bool,
    ) -> Result<usize, ParticlesError> {
        let runs = match scope {
            PatchScope::Local(patch) => {
                self.patch_index(patch)?;
                let mut runs = SmallVec::<[PatchRun; 4]>::new();
                runs.push(PatchRun {
                    patch,
                    offsets: domain.indices().collect(),
                });
                runs
            }
            PatchScope::Global => self.split_global(domain)?,
        };
        let destroyed = self.destroy_runs(&runs)?;
        if renumber {
            self.renumber()?;
        }
        Ok(destroyed)
    }

    /// Recompute the global numbering from the current patch sizes and
    /// relabel every attribute to match.
    pub fn renumber(&mut self) -> Result<(), ParticlesError> {
        let sizes: SmallVec<[usize; 4]> = self.shape.iter().map(DynamicEngine::len).collect();
        self.layout.sync(&sizes);
        for (engine, node) in self.shape.iter_mut().zip(self.layout.nodes()) {
            engine.sync(node.domain)?;
        }
        for storage in self.attributes.values_mut() {
            storage.sync(&self.layout)?;
        }
        tracing::debug!(
            local = self.layout.local_size(),
            global = self.layout.global_size(),
            "renumbered"
        );
        Ok(())
    }

    // ── Internals ──────────────────────────────────────────────────

    fn patch_index(&self, patch: PatchId) -> Result<usize, ParticlesError> {
        let idx = patch.index();
        if idx >= self.shape.len() {
            return Err(ParticlesError::UnknownPatch {
                patch,
                num_patches: self.shape.len(),
            });
        }
        Ok(idx)
    }

    fn scope_patches(&self, scope: PatchScope) -> Result<std::ops::Range<usize>, ParticlesError> {
        Ok(match scope {
            PatchScope::Local(patch) => {
                let idx = self.patch_index(patch)?;
                idx..idx + 1
            }
            PatchScope::Global => 0..self.num_patches(),
        })
    }

    /// Remove each run's offsets from its patch of every attribute.
    ///
    /// All runs are first applied to copies of the patch shapes; attributes
    /// are touched only once every run has been accepted.
    fn destroy_runs(&mut self, runs: &[PatchRun]) -> Result<usize, ParticlesError> {
        let method = self.destroy_method;
        let mut staged: SmallVec<[DynamicEngine<()>; 4]> = SmallVec::with_capacity(runs.len());
        let mut destroyed = 0;
        for run in runs {
            let mut shape = self.shape[run.patch.index()].clone();
            destroyed += shape.destroy_with(&run.offsets, method, KillIndexing::Offset)?;
            staged.push(shape);
        }

        for (run, shape) in runs.iter().zip(staged) {
            self.shape[run.patch.index()] = shape;
            for storage in self.attributes.values_mut() {
                storage.destroy(&run.offsets, run.patch, method)?;
            }
        }
        Ok(destroyed)
    }

    /// Resolve global indices into per-patch local offsets.
    fn split_global<D: IndexSource + ?Sized>(
        &self,
        domain: &D,
    ) -> Result<SmallVec<[PatchRun; 4]>, ParticlesError> {
        let mut runs = SmallVec::new();
        let (Some(min), Some(max)) = (domain.min(), domain.max()) else {
            return Ok(runs);
        };
        let global = self.layout.global_domain();
        if !global.contains(min) || !global.contains(max) {
            return Err(ParticlesError::OutOfDomain {
                min,
                max,
                domain: global,
            });
        }

        let mut sorted: Vec<i64> = domain.indices().collect();
        sorted.sort_unstable();

        let mut rest = &sorted[..];
        for node in self.layout.nodes() {
            if rest.is_empty() {
                break;
            }
            if node.is_empty() {
                continue;
            }
            let first = node.domain.first();
            let start = rest.partition_point(|&i| i < first);
            let end = rest.partition_point(|&i| i <= node.domain.last());
            if end > start {
                runs.push(PatchRun {
                    patch: node.patch,
                    offsets: rest[start..end].iter().map(|&i| i - first).collect(),
                });
            }
            rest = &rest[end..];
        }
        Ok(runs)
    }
}

fn type_mismatch<T: 'static>(storage: &dyn AttributeStorage) -> ParticlesError {
    ParticlesError::AttributeType {
        name: storage.name().to_owned(),
        expected: std::any::type_name::<T>(),
        actual: storage.element_type(),
    }
}
