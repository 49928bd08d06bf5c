//! Integration test: numbering and global destroys for one context of a
//! simulated multi-context run.

use std::sync::Arc;

use patchwork_core::{ContextId, DeleteMethod, Interval, PatchId};
use patchwork_particles::{ParticlesConfig, ParticlesError, Particles, PatchScope};
use patchwork_test_utils::{labels, populate, CountingExchange, FixedOffsetExchange};

/// Rank 1 of 3; ranks 0 and 2 hold 10 and 4 particles.
fn middle_rank(sizes: &[usize]) -> (Particles, patchwork_core::AttributeId) {
    let mut config = ParticlesConfig::new(sizes.len() as u32);
    config.destroy_method = DeleteMethod::ShiftUp;
    let exchange = Arc::new(FixedOffsetExchange::new(1, 3, 10, 4));
    let particles = Particles::with_exchange(config, exchange).unwrap();
    populate(particles, sizes)
}

#[test]
fn local_patches_start_at_context_offset() {
    let (p, id) = middle_rank(&[3, 2]);
    assert_eq!(p.layout().context(), ContextId(1));
    assert_eq!(p.size(), 19);
    assert_eq!(p.local_size(), 5);
    assert_eq!(p.layout().local_domain(), Interval::new(10, 14).unwrap());
    assert_eq!(
        p.layout().patch_domain(PatchId(1)),
        Some(Interval::new(13, 14).unwrap())
    );
    assert_eq!(labels(&p, id), vec![10, 11, 12, 13, 14]);
}

#[test]
fn global_destroy_skips_indices_owned_elsewhere() {
    let (mut p, id) = middle_rank(&[3, 2]);
    // 2 and 17 belong to other ranks; 11 and 14 are local.
    let destroyed = p
        .destroy(&vec![17i64, 11, 2, 14], PatchScope::Global, true)
        .unwrap();
    assert_eq!(destroyed, 2);
    assert_eq!(labels(&p, id), vec![10, 12, 13]);
    assert_eq!(p.size(), 17);
}

#[test]
fn global_destroy_outside_run_is_rejected() {
    let (mut p, _) = middle_rank(&[3, 2]);
    match p.deferred_destroy(&vec![12i64, 19], PatchScope::Global) {
        Err(ParticlesError::OutOfDomain { max: 19, domain, .. }) => {
            assert_eq!(domain, Interval::new(0, 18).unwrap());
        }
        other => panic!("expected OutOfDomain, got {other:?}"),
    }
}

#[test]
fn global_create_takes_this_ranks_share() {
    let mut config = ParticlesConfig::new(2);
    config.initial_patch_size = 0;
    let exchange = Arc::new(FixedOffsetExchange::new(1, 3, 0, 0));
    let mut p = Particles::with_exchange(config, exchange).unwrap();
    // 11 over 3 ranks: ranks 0 and 1 take 4, rank 2 takes 3.
    assert_eq!(p.global_create(11, true).unwrap(), 4);
    assert_eq!(p.patch_size(PatchId(0)).unwrap(), 2);
    assert_eq!(p.patch_size(PatchId(1)).unwrap(), 2);
}

#[test]
fn renumber_runs_one_collective() {
    let exchange = Arc::new(CountingExchange::new());
    let mut p = Particles::with_exchange(ParticlesConfig::new(4), exchange.clone()).unwrap();
    let after_build = exchange.scans();
    assert_eq!(after_build, 1);

    p.global_create(20, true).unwrap();
    assert_eq!(exchange.scans(), after_build + 1);

    p.create(1, PatchId(0), false).unwrap();
    p.destroy(&vec![0i64], PatchScope::Local(PatchId(1)), false)
        .unwrap();
    assert_eq!(exchange.scans(), after_build + 1);

    p.perform_destroy(PatchScope::Global, true).unwrap();
    assert_eq!(exchange.scans(), after_build + 2);
    assert_eq!(p.size(), 20);
}
