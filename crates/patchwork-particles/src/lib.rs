//! Particle containers built on Patchwork dynamic engines.
//!
//! A [`Particles`] container partitions its particles into local patches
//! and stores each named attribute as one dynamic array per patch. Particles
//! are removed either immediately with [`Particles::destroy`] or in batches:
//! [`Particles::deferred_destroy`] queues indices in a per-patch
//! [`KillList`] and [`Particles::perform_destroy`] applies each patch's
//! queue in a single compaction pass.
//!
//! Global numbering is owned by a [`ParticleLayout`]. After patch sizes
//! change, [`Particles::renumber`] asks the layout to recompute contiguous
//! per-patch ranges (through a [`ContextExchange`] when several contexts
//! share the index space) and relabels every attribute engine to match.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod attribute;
pub mod config;
pub mod error;
pub mod exchange;
pub mod kill_list;
pub mod layout;
pub mod particles;

pub use attribute::{Attribute, AttributeStorage};
pub use config::ParticlesConfig;
pub use error::ParticlesError;
pub use exchange::{ContextExchange, SingleContext};
pub use kill_list::KillList;
pub use layout::ParticleLayout;
pub use particles::{DestroyState, Particles, PatchScope};
