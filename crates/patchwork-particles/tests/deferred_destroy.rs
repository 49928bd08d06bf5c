//! Integration test: deferred and immediate destroys across several patches.
//!
//! Boundary conditions typically each flag a few particles for removal in
//! one step. These tests batch such requests through the kill-lists and
//! check that the result matches applying the union immediately.

use patchwork_core::{DeleteMethod, Interval, PatchId, Range};
use patchwork_domain::{IndirectionList, IteratorPairDomain};
use patchwork_particles::{DestroyState, ParticlesError, PatchScope};
use patchwork_test_utils::{labelled_particles, labels};

#[test]
fn batched_global_requests_match_single_immediate_destroy() {
    for method in [DeleteMethod::BackFill, DeleteMethod::ShiftUp] {
        let sizes = [6, 0, 5, 7];
        let (mut deferred, a) = labelled_particles(&sizes, method);
        let (mut immediate, b) = labelled_particles(&sizes, method);

        // Three independent requests, interleaved across patches.
        let first = vec![17i64, 2];
        let second = Range::new(6, 3, 2).unwrap(); // 6, 8, 10
        let third = [0i64, 13];
        deferred.deferred_destroy(&first, PatchScope::Global).unwrap();
        deferred.deferred_destroy(&second, PatchScope::Global).unwrap();
        deferred
            .deferred_destroy(&IteratorPairDomain::from_slice(&third), PatchScope::Global)
            .unwrap();
        assert_eq!(deferred.state(), DestroyState::Pending);
        assert_eq!(deferred.deferred_destroy_amount(), 7);
        assert_eq!(deferred.pending(PatchId(1)).unwrap(), 0);

        let mut union = IndirectionList::from(first.clone());
        union.extend_from(&second);
        union.extend_from(&third[..]);

        let d = deferred.perform_destroy(PatchScope::Global, true).unwrap();
        let i = immediate.destroy(&union, PatchScope::Global, true).unwrap();
        assert_eq!(d, 7);
        assert_eq!(i, 7);
        assert_eq!(labels(&deferred, a), labels(&immediate, b), "{method}");
        assert_eq!(deferred.size(), 11);
        assert_eq!(deferred.state(), DestroyState::Clean);
    }
}

#[test]
fn shift_up_keeps_survivor_order_across_patches() {
    let (mut p, id) = labelled_particles(&[4, 4, 4], DeleteMethod::ShiftUp);
    p.deferred_destroy(&Interval::new(3, 8).unwrap(), PatchScope::Global)
        .unwrap();
    p.perform_destroy(PatchScope::Global, true).unwrap();
    assert_eq!(labels(&p, id), vec![0, 1, 2, 9, 10, 11]);
    assert_eq!(p.patch_size(PatchId(1)).unwrap(), 0);
    assert_eq!(
        p.layout().patch_domain(PatchId(2)),
        Some(Interval::new(3, 5).unwrap())
    );
}

#[test]
fn perform_one_patch_leaves_others_pending() {
    let (mut p, id) = labelled_particles(&[3, 3], DeleteMethod::BackFill);
    p.deferred_destroy(&vec![0i64, 5], PatchScope::Global).unwrap();

    assert_eq!(p.perform_destroy(PatchScope::Local(PatchId(1)), false).unwrap(), 1);
    assert_eq!(p.state(), DestroyState::Pending);
    assert_eq!(p.pending(PatchId(0)).unwrap(), 1);

    assert_eq!(p.perform_destroy(PatchScope::Global, true).unwrap(), 1);
    assert_eq!(p.state(), DestroyState::Clean);
    assert_eq!(labels(&p, id), vec![2, 1, 3, 4]);
}

#[test]
fn renumber_after_deferred_batch_gives_contiguous_numbering() {
    let (mut p, id) = labelled_particles(&[5, 5], DeleteMethod::BackFill);
    p.deferred_destroy(&vec![1i64, 2], PatchScope::Local(PatchId(0)))
        .unwrap();
    p.deferred_destroy(&vec![0i64], PatchScope::Local(PatchId(1)))
        .unwrap();
    p.perform_destroy(PatchScope::Global, false).unwrap();
    assert_eq!(p.size(), 10);

    p.renumber().unwrap();
    assert_eq!(p.size(), 7);
    let attr = p.attribute::<i64>(id).unwrap();
    assert_eq!(attr.patch(PatchId(0)).unwrap().domain(), Interval::new(0, 2).unwrap());
    assert_eq!(attr.patch(PatchId(1)).unwrap().domain(), Interval::new(3, 6).unwrap());
    // Global lookup follows the fresh numbering.
    assert_eq!(attr.get(3), Some(&9));
}

#[test]
fn attributes_stay_aligned_through_create_and_destroy() {
    let (mut p, label) = labelled_particles(&[2, 2], DeleteMethod::BackFill);
    let mass = p.add_attribute::<f64>("mass").unwrap();
    {
        let m = p.attribute_mut::<f64>(mass).unwrap();
        for patch in [PatchId(0), PatchId(1)] {
            for (k, v) in m.patch_mut(patch).unwrap().iter_mut().enumerate() {
                *v = 10.0 * (patch.0 as f64) + k as f64;
            }
        }
    }
    p.create(3, PatchId(0), true).unwrap();
    p.destroy(&vec![0i64, 6], PatchScope::Global, true).unwrap();

    let labels = labels(&p, label);
    let masses = p.attribute::<f64>(mass).unwrap().to_vec();
    assert_eq!(labels.len(), 5);
    assert_eq!(masses.len(), 5);
    // Patch 0 was [l0, l1, 0, 0, 0] / [0.0, 1.0, 0.0, 0.0, 0.0]; removing
    // offset 0 back-fills from the tail.
    assert_eq!(&labels[..4], &[0, 1, 0, 0]);
    assert_eq!(&masses[..4], &[0.0, 1.0, 0.0, 0.0]);
    // Patch 1 was [l2, l3]; global 6 is its offset 1.
    assert_eq!(labels[4], 2);
    assert_eq!(masses[4], 10.0);
}

#[test]
fn overlapping_requests_destroy_each_particle_once() {
    let (mut p, id) = labelled_particles(&[5, 5], DeleteMethod::ShiftUp);
    p.deferred_destroy(&vec![7i64], PatchScope::Global).unwrap();
    p.deferred_destroy(&vec![7i64, 8], PatchScope::Global).unwrap();
    assert_eq!(p.pending(PatchId(1)).unwrap(), 3);

    assert_eq!(p.perform_destroy(PatchScope::Global, true).unwrap(), 2);
    assert_eq!(p.state(), DestroyState::Clean);
    assert_eq!(labels(&p, id), vec![0, 1, 2, 3, 4, 5, 6, 9]);
    assert_eq!(p.size(), 8);
}

#[test]
fn immediate_duplicate_leaves_every_patch_intact() {
    let (mut p, id) = labelled_particles(&[5, 5], DeleteMethod::BackFill);
    match p.destroy(&vec![1i64, 7, 7], PatchScope::Global, true) {
        Err(ParticlesError::Engine(_)) => {}
        other => panic!("expected engine error, got {other:?}"),
    }
    assert_eq!(p.local_size(), 10);
    assert_eq!(p.local_size(), p.size());
    assert_eq!(labels(&p, id), (0..10).collect::<Vec<i64>>());
}

#[test]
fn unknown_patch_is_rejected_everywhere() {
    let (mut p, _) = labelled_particles(&[1, 1], DeleteMethod::BackFill);
    let bad = PatchScope::Local(PatchId(5));
    assert!(matches!(
        p.deferred_destroy(&vec![0i64], bad),
        Err(ParticlesError::UnknownPatch { .. })
    ));
    assert!(matches!(
        p.perform_destroy(bad, true),
        Err(ParticlesError::UnknownPatch { .. })
    ));
    assert!(matches!(
        p.destroy(&vec![0i64], bad, true),
        Err(ParticlesError::UnknownPatch { .. })
    ));
}
