//! Benchmark profiles and utilities for Patchwork.
//!
//! Provides pre-built workloads for the criterion benches:
//!
//! - [`engine_profile`]: one dynamic engine of `f64` particles
//! - [`particles_profile`]: a multi-patch container with three attributes
//! - [`scattered_kill_list`]: deterministic, duplicate-free kill offsets

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use patchwork_core::{DeleteMethod, Interval};
use patchwork_engine::DynamicEngine;
use patchwork_particles::{Particles, ParticlesConfig, ParticlesError};

/// An engine over `[0, len - 1]` with element `i` equal to `i as f64`.
pub fn engine_profile(len: usize) -> DynamicEngine<f64> {
    let mut engine = DynamicEngine::new(Interval::with_len(0, len));
    for (i, v) in engine.iter_mut().enumerate() {
        *v = i as f64;
    }
    engine
}

/// A container of `num_patches` patches holding `per_patch` particles each,
/// with position, velocity, and id attributes.
pub fn particles_profile(
    num_patches: u32,
    per_patch: usize,
    method: DeleteMethod,
) -> Result<Particles, ParticlesError> {
    let mut config = ParticlesConfig::new(num_patches);
    config.initial_patch_size = per_patch;
    config.destroy_method = method;
    let mut particles = Particles::new(config)?;
    particles.add_attribute::<[f64; 3]>("position")?;
    particles.add_attribute::<[f64; 3]>("velocity")?;
    particles.add_attribute::<u64>("id")?;
    Ok(particles)
}

/// Pick `count` distinct offsets in `[0, len)`, scattered but repeatable.
///
/// Uses a multiplicative hash of the seed with linear probing, so the same
/// arguments always give the same list.
pub fn scattered_kill_list(len: usize, count: usize, seed: u64) -> Vec<i64> {
    assert!(count <= len, "cannot pick {count} offsets from {len}");
    let mut taken = vec![false; len];
    let mut kill = Vec::with_capacity(count);
    for i in 0..count as u64 {
        let mut pos = (seed
            .wrapping_mul(6364136223846793005)
            .wrapping_add(i.wrapping_mul(1442695040888963407))
            % len as u64) as usize;
        while taken[pos] {
            pos = (pos + 1) % len;
        }
        taken[pos] = true;
        kill.push(pos as i64);
    }
    kill
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_profile_is_sequential() {
        let engine = engine_profile(5);
        assert_eq!(engine.as_slice(), &[0.0, 1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn particles_profile_builds() {
        let p = particles_profile(4, 100, DeleteMethod::BackFill).unwrap();
        assert_eq!(p.size(), 400);
        assert_eq!(p.attribute_count(), 3);
    }

    #[test]
    fn scattered_kill_list_is_unique_and_in_range() {
        let kill = scattered_kill_list(100, 40, 42);
        assert_eq!(kill.len(), 40);
        let unique: std::collections::HashSet<i64> = kill.iter().copied().collect();
        assert_eq!(unique.len(), 40, "offsets should be unique");
        assert!(kill.iter().all(|&k| (0..100).contains(&k)));
    }

    #[test]
    fn scattered_kill_list_is_deterministic() {
        assert_eq!(scattered_kill_list(1000, 50, 7), scattered_kill_list(1000, 50, 7));
    }
}
