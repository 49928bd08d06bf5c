//! Patchwork: resizable patch-distributed arrays and particle containers.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Patchwork sub-crates. For most users, adding `patchwork` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use patchwork::prelude::*;
//!
//! // A single dynamic array over [0, 9] holding 0..9.
//! let mut array = DynamicArray::from_vec(0, (0..10).collect::<Vec<i32>>());
//! array.destroy(&vec![2i64, 5, 8], DeleteMethod::ShiftUp).unwrap();
//! assert_eq!(array.to_vec(), vec![0, 1, 3, 4, 6, 7, 9]);
//! assert_eq!(array.create(2), Interval::new(7, 8).unwrap());
//!
//! // A two-patch particle container with batched destroys.
//! let mut particles = Particles::new(ParticlesConfig::new(2)).unwrap();
//! let charge = particles.add_attribute::<f64>("charge").unwrap();
//! particles.global_create(6, true).unwrap();
//! particles.deferred_destroy(&vec![0i64, 5], PatchScope::Global).unwrap();
//! assert_eq!(particles.state(), DestroyState::Pending);
//! particles.perform_destroy(PatchScope::Global, true).unwrap();
//! assert_eq!(particles.attribute::<f64>(charge).unwrap().len(), 4);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `patchwork-core` | Intervals, ranges, IDs, delete methods |
//! | [`domain`] | `patchwork-domain` | `IndexSource` and its adapters |
//! | [`engine`] | `patchwork-engine` | Dynamic engine, views, `DynamicArray` |
//! | [`particles`] | `patchwork-particles` | Particle container, layout, attributes |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core index types and identifiers (`patchwork-core`).
pub use patchwork_core as types;

/// Index-set domains (`patchwork-domain`).
///
/// Every destroy and copy accepts any [`domain::IndexSource`], including
/// the borrowed [`domain::IteratorPairDomain`].
pub use patchwork_domain as domain;

/// Dynamic engines, views, and the array facade (`patchwork-engine`).
pub use patchwork_engine as engine;

/// Particle containers and the deferred-destroy protocol
/// (`patchwork-particles`).
pub use patchwork_particles as particles;

/// Common imports for typical Patchwork usage.
///
/// ```rust
/// use patchwork::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use patchwork_core::{
        BackFill, DeleteMethod, DeleteStrategy, Interval, PatchId, Range, ShiftUp,
    };

    // Domains
    pub use patchwork_domain::{IndexSource, IndirectionList, IteratorPairDomain};

    // Engine
    pub use patchwork_engine::{
        DynamicArray, DynamicEngine, DynamicView, Engine, EngineError, KillIndexing,
    };

    // Particles
    pub use patchwork_particles::{
        DestroyState, Particles, ParticlesConfig, ParticlesError, PatchScope,
    };
}
