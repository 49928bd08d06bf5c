//! Particle-container configuration.

use patchwork_core::DeleteMethod;

use crate::error::ParticlesError;

/// Configuration for a [`Particles`](crate::Particles) container.
///
/// Validated when the container is built; the destroy method may be
/// changed afterwards with
/// [`Particles::set_destroy_method`](crate::Particles::set_destroy_method).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParticlesConfig {
    /// Number of local patches.
    ///
    /// Must be at least 1.
    pub num_patches: u32,

    /// Compaction algorithm applied by every destroy.
    ///
    /// Default: [`DeleteMethod::BackFill`].
    pub destroy_method: DeleteMethod,

    /// Number of particles each patch starts with.
    ///
    /// Default: 0.
    pub initial_patch_size: usize,
}

impl ParticlesConfig {
    /// Default number of local patches.
    pub const DEFAULT_NUM_PATCHES: u32 = 1;

    /// Default compaction algorithm.
    pub const DEFAULT_DESTROY_METHOD: DeleteMethod = DeleteMethod::BackFill;

    /// Default initial particle count per patch.
    pub const DEFAULT_INITIAL_PATCH_SIZE: usize = 0;

    /// Create a config with `num_patches` local patches.
    ///
    /// Uses default values for all other parameters.
    pub fn new(num_patches: u32) -> Self {
        Self {
            num_patches,
            destroy_method: Self::DEFAULT_DESTROY_METHOD,
            initial_patch_size: Self::DEFAULT_INITIAL_PATCH_SIZE,
        }
    }

    /// Check that the configuration describes a usable container.
    pub fn validate(&self) -> Result<(), ParticlesError> {
        if self.num_patches == 0 {
            return Err(ParticlesError::InvalidConfig {
                reason: "num_patches must be at least 1".into(),
            });
        }
        Ok(())
    }
}

impl Default for ParticlesConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_NUM_PATCHES)
    }
}
