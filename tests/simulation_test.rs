//! Simulation tests.
//!
//! These exercise the replacers through the public driver and sweep APIs,
//! using literal traces where the expected outcome is exact.

use pagesim::replacer::Access;
use pagesim::{
    ClockReplacer, Error, LruReplacer, PageId, PageUniverse, Policy, Replacer, SimConfig,
    SimulationDriver, SweepRunner, TraceSource,
};

fn pages(ids: &[u32]) -> Vec<PageId> {
    ids.iter().copied().map(PageId::new).collect()
}

fn default_driver() -> SimulationDriver {
    SimulationDriver::from_config(&SimConfig::default()).unwrap()
}

// ============================================================================
// Exact outcomes on literal traces
// ============================================================================

/// Capacity 3, references A B C A D: B is the LRU victim.
#[test]
fn test_lru_reference_order() {
    let (a, b, c, d) = (PageId::new(0), PageId::new(1), PageId::new(2), PageId::new(3));
    let mut lru = LruReplacer::new(3).unwrap();

    let hits = [a, b, c, a, d]
        .into_iter()
        .filter(|&p| lru.reference(p).is_hit())
        .count();

    assert_eq!(hits, 1);
    assert_eq!(lru.resident_pages(), vec![d, a, c]);
    assert!(!lru.contains(b));
}

/// Capacity 4 fully loaded, every page referenced twice, then a fifth page.
#[test]
fn test_clock_sweep_terminates_after_full_lap() {
    let mut clock = ClockReplacer::new(4).unwrap();
    for page in pages(&[0, 1, 2, 3]) {
        assert_eq!(clock.reference(page), Access::Miss { evicted: None });
    }
    for page in pages(&[0, 0, 1, 1, 2, 2, 3, 3]) {
        assert_eq!(clock.reference(page), Access::Hit);
    }

    let access = clock.reference(PageId::new(4));
    assert_eq!(access.evicted(), Some(PageId::new(0)));
    assert!(clock.last_sweep_len() <= 2 * clock.capacity());
    assert_eq!(clock.len(), 4);

    // Every survivor lost its second chance on the lap.
    for page in pages(&[1, 2, 3]) {
        assert_eq!(clock.use_bit(page), Some(false));
    }
}

/// With a single frame both policies evict on every miss.
#[test]
fn test_single_frame_policies_agree() {
    let trace = pages(&[0, 1, 1, 0, 0, 0, 1, 0, 1, 1]);

    let lru = SimulationDriver::replay(Policy::Lru, 1, trace.clone()).unwrap();
    let clock = SimulationDriver::replay(Policy::Clock, 1, trace).unwrap();

    assert_eq!(lru.hits, clock.hits);
    assert_eq!(lru.misses, clock.misses);
    assert_eq!(lru.hits, 4);
}

/// A working set that fits: only the first touch of each page misses.
#[test]
fn test_working_set_hit_rate() {
    let working_set = pages(&[3, 9, 14, 27, 31]);
    let trace: Vec<PageId> = working_set.iter().copied().cycle().take(500).collect();

    for policy in Policy::ALL {
        for capacity in [5, 8, 40] {
            let result = SimulationDriver::replay(policy, capacity, trace.clone()).unwrap();
            assert_eq!(result.misses, 5, "{} at capacity {}", policy, capacity);
            assert_eq!(result.hits, 495);
            assert_eq!(result.hit_rate(), 495.0 / 500.0);
        }
    }
}

/// Cyclic scan one page larger than memory: LRU always misses.
#[test]
fn test_lru_cyclic_scan_thrashes() {
    let trace: Vec<PageId> = pages(&[0, 1, 2, 3, 4]).into_iter().cycle().take(100).collect();
    let result = SimulationDriver::replay(Policy::Lru, 4, trace).unwrap();
    assert_eq!(result.hits, 0);
    assert_eq!(result.evictions, 96);
}

// ============================================================================
// Random traces
// ============================================================================

#[test]
fn test_independent_runs_are_valid() {
    let driver = default_driver();

    for policy in Policy::ALL {
        let first = driver.run(policy, 10, 400).unwrap();
        let second = driver.run(policy, 10, 400).unwrap();

        for result in [first, second] {
            assert_eq!(result.hits + result.misses, 400);
            assert!(result.evictions <= result.misses);
            // Ten frames start empty: at least ten misses.
            assert!(result.misses >= 10);
            assert!((0.0..=1.0).contains(&result.hit_rate()));
        }
    }
}

#[test]
fn test_capacity_never_exceeded_on_random_trace() {
    let universe = PageUniverse::new(10, 400).unwrap();
    let mut lru = LruReplacer::new(7).unwrap();
    let mut clock = ClockReplacer::new(7).unwrap();

    for index in TraceSource::seeded(400, 17).unwrap().take(2000) {
        let page = universe.page_of(index).unwrap();
        lru.reference(page);
        clock.reference(page);
        assert!(lru.len() <= 7);
        assert!(clock.len() <= 7);
        assert!(clock.last_sweep_len() <= 8);
    }
}

#[test]
fn test_more_memory_helps_on_average() {
    // Uniform traces: hit rate roughly tracks capacity / total pages.
    let driver = default_driver();
    for policy in Policy::ALL {
        let small = driver.run_seeded(policy, 4, 20_000, 1).unwrap();
        let large = driver.run_seeded(policy, 36, 20_000, 1).unwrap();
        assert!(small.hit_rate() < 0.2, "{}", small);
        assert!(large.hit_rate() > 0.8, "{}", large);
    }
}

// ============================================================================
// Sweeps
// ============================================================================

#[test]
fn test_default_sweep_shape() {
    let config = SimConfig::default().with_seed(2024);
    let runner = SweepRunner::from_config(&config).unwrap();

    let results: Vec<_> = runner
        .run_config(&config)
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();

    // 37 capacities x 2 policies.
    assert_eq!(results.len(), 74);
    for (i, result) in results.iter().enumerate() {
        assert_eq!(result.capacity, 4 + i / 2);
        assert_eq!(result.policy, Policy::ALL[i % 2]);
        assert_eq!(result.total_accesses, 400);
    }
}

#[test]
fn test_sweep_cancel_early() {
    let runner = SweepRunner::new(default_driver());
    let taken: Vec<_> = runner
        .run(4..=40, &Policy::ALL, 400)
        .unwrap()
        .take(3)
        .collect();

    assert_eq!(taken.len(), 3);
    assert!(taken.iter().all(|r| r.is_ok()));
}

#[test]
fn test_sweep_rejects_bad_config() {
    let config = SimConfig::default().with_capacity_range(0..=4);
    assert!(matches!(
        SweepRunner::from_config(&config),
        Err(Error::InvalidConfiguration(_))
    ));
}

#[test]
fn test_parallel_sweep_seeded() {
    let runner = SweepRunner::new(default_driver()).with_seed(77);

    let sequential: Vec<_> = runner.run(4..=20, &Policy::ALL, 400).unwrap().collect();
    let parallel = runner.run_parallel(4..=20, &Policy::ALL, 400, 3).unwrap();

    assert_eq!(parallel.len(), 34);
    assert_eq!(sequential, parallel);
}
