//! Test utilities and mock types for Patchwork development.
//!
//! Provides engine and container builders with recognisable contents
//! (every element labelled with its own index) plus mock implementations
//! of [`ContextExchange`](patchwork_particles::ContextExchange) for
//! exercising multi-context numbering in a single process.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{CountingExchange, FixedOffsetExchange};

use patchwork_core::{AttributeId, DeleteMethod, PatchId};
use patchwork_engine::DynamicEngine;
use patchwork_particles::{Particles, ParticlesConfig};

/// Name of the attribute installed by [`labelled_particles`].
pub const LABEL: &str = "label";

/// An engine over `[first, first + len - 1]` whose elements equal their index.
pub fn sequential_engine(first: i64, len: usize) -> DynamicEngine<i64> {
    DynamicEngine::from_vec(first, (first..first + len as i64).collect())
}

/// A single-context container with one patch per entry of `sizes`.
///
/// Numbering is up to date and an `i64` attribute named [`LABEL`] holds
/// each particle's global index, so survivors of a destroy can be
/// identified afterwards.
pub fn labelled_particles(sizes: &[usize], method: DeleteMethod) -> (Particles, AttributeId) {
    let mut config = ParticlesConfig::new(sizes.len() as u32);
    config.destroy_method = method;
    let particles = Particles::new(config).expect("fixture config is valid");
    populate(particles, sizes)
}

/// Size the patches of `particles` to `sizes`, renumber, and label them.
pub fn populate(mut particles: Particles, sizes: &[usize]) -> (Particles, AttributeId) {
    for (p, &n) in sizes.iter().enumerate() {
        particles
            .create(n, PatchId(p as u32), false)
            .expect("fixture patch exists");
    }
    particles.renumber().expect("fixture renumber succeeds");

    let id = particles
        .add_attribute::<i64>(LABEL)
        .expect("fixture attribute name is unique");
    let nodes = particles.layout().nodes().to_vec();
    let label = particles
        .attribute_mut::<i64>(id)
        .expect("fixture attribute is i64");
    for node in nodes {
        let array = label.patch_mut(node.patch).expect("fixture patch exists");
        for (v, g) in array.iter_mut().zip(node.domain.iter()) {
            *v = g;
        }
    }
    (particles, id)
}

/// The labels of every particle, patch by patch.
pub fn labels(particles: &Particles, id: AttributeId) -> Vec<i64> {
    particles
        .attribute::<i64>(id)
        .expect("label attribute is i64")
        .to_vec()
}
