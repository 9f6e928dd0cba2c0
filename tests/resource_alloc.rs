use birdwalk::{AliasSampler, DiscreteSampler, QueryItem, TowerSampler, WalkConfig, WalkEngine};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use stats_alloc::{Region, StatsAlloc, INSTRUMENTED_SYSTEM};
use std::alloc::System;

#[global_allocator]
static GLOBAL: &StatsAlloc<System> = &INSTRUMENTED_SYSTEM;

#[test]
fn drawing_into_a_reserved_buffer_does_not_allocate() {
    // Counting allocations, not RSS, keeps this portable across OSes/CI.
    let weights: Vec<f64> = (1..=1_000).map(|i| i as f64).collect();
    let alias = AliasSampler::build(&weights).unwrap();
    let tower = TowerSampler::build(&weights).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(1);

    let draws = 50_000;
    let mut buf: Vec<usize> = Vec::with_capacity(2 * draws);

    let region = Region::new(&GLOBAL);
    alias.sample_into(&mut buf, draws, &mut rng);
    tower.sample_into(&mut buf, draws, &mut rng);
    let stats = region.change();

    assert_eq!(buf.len(), 2 * draws);
    assert_eq!(stats.allocations, 0, "draws allocated: {stats:?}");
    assert_eq!(stats.reallocations, 0, "draws reallocated: {stats:?}");
}

#[test]
fn query_allocations_do_not_scale_with_draws() {
    // Per-query allocations are the seed sampler and a few output buffers,
    // never one per draw.
    let users: Vec<Vec<usize>> = (0..200).map(|u| vec![u % 50, (u * 7) % 50, (u + 1) % 50]).collect();
    let config = WalkConfig::new(3, 20_000).unwrap();
    let engine = WalkEngine::new(config, vec![1.0; 50], users).unwrap();
    let query: Vec<QueryItem> = (0..10).map(|i| QueryItem::new(i, 1.0)).collect();
    let mut rng = ChaCha8Rng::seed_from_u64(2);

    let region = Region::new(&GLOBAL);
    let out = engine.process(&query, &mut rng).unwrap();
    let stats = region.change();

    assert_eq!(out.len(), 60_000);
    // Heuristic guardrail: a handful of buffers per step, far below one per draw.
    assert!(stats.allocations < 100, "allocations={}", stats.allocations);
}
