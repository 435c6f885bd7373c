//! Sweep runner - every (capacity, policy) pair over a capacity range.

use std::ops::RangeInclusive;
use std::thread;

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::common::config::validate_sweep;
use crate::common::{Error, Result, SimConfig};
use crate::replacer::Policy;
use crate::sim::{SimulationDriver, SimulationResult};

/// One (capacity, policy) combination in a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepPoint {
    /// Position in sweep order, starting at 0.
    pub ordinal: usize,
    pub capacity: usize,
    pub policy: Policy,
}

/// Drives a [`SimulationDriver`] across a range of capacities.
///
/// Each point draws its own independent trace, so LRU and Clock at the same
/// capacity are compared statistically rather than reference by reference.
/// With a base seed, point `n` is seeded with `seed + n` and the whole sweep
/// is reproducible.
///
/// # Usage
/// ```
/// use pagesim::{PageUniverse, Policy, SimulationDriver, SweepRunner};
///
/// let driver = SimulationDriver::new(PageUniverse::new(10, 400).unwrap());
/// let runner = SweepRunner::new(driver).with_seed(1);
///
/// let results: Vec<_> = runner
///     .run(4..=6, &Policy::ALL, 400)
///     .unwrap()
///     .collect::<Result<_, _>>()
///     .unwrap();
///
/// assert_eq!(results.len(), 6);
/// assert_eq!(results[0].capacity, 4);
/// assert_eq!(results[1].policy, Policy::Clock);
/// ```
#[derive(Debug, Clone)]
pub struct SweepRunner {
    driver: SimulationDriver,
    seed: Option<u64>,
}

impl SweepRunner {
    pub fn new(driver: SimulationDriver) -> Self {
        Self { driver, seed: None }
    }

    /// Seed every sweep point deterministically from `seed`.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Build a runner from a validated config.
    ///
    /// # Errors
    /// `Error::InvalidConfiguration` if `config` fails validation.
    pub fn from_config(config: &SimConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            driver: SimulationDriver::from_config(config)?,
            seed: config.seed,
        })
    }

    pub fn driver(&self) -> &SimulationDriver {
        &self.driver
    }

    /// Lazily simulate every capacity in `capacities` under every policy.
    ///
    /// Results come in ascending capacity order, with `policies` in the given
    /// order within each capacity. A failing point yields an `Err` item and
    /// the sweep carries on with the next point.
    ///
    /// # Errors
    /// `Error::InvalidConfiguration` before anything runs if the range is
    /// empty or starts at 0, `policies` is empty, `access_count` is 0, or
    /// the number of points does not fit in a `usize`.
    pub fn run(
        &self,
        capacities: RangeInclusive<usize>,
        policies: &[Policy],
        access_count: usize,
    ) -> Result<Sweep<'_>> {
        validate_sweep(&capacities, policies, access_count)?;

        let len = (capacities.end() - capacities.start())
            .checked_add(1)
            .and_then(|n| n.checked_mul(policies.len()))
            .ok_or_else(|| Error::config("capacity range too large"))?;
        Ok(Sweep {
            runner: self,
            first_capacity: *capacities.start(),
            policies: policies.to_vec(),
            access_count,
            next: 0,
            len,
        })
    }

    /// Run the sweep described by `config`.
    pub fn run_config(&self, config: &SimConfig) -> Result<Sweep<'_>> {
        self.run(
            config.capacity_range.clone(),
            &config.policies,
            config.access_count(),
        )
    }

    /// Evaluate a sweep on `jobs` worker threads.
    ///
    /// Each worker owns its trace source and replacer for the point it is
    /// simulating. Results are returned in the same order as [`run`](Self::run)
    /// produces them; with a seed, the two are identical.
    ///
    /// # Errors
    /// Same validation as [`run`](Self::run).
    pub fn run_parallel(
        &self,
        capacities: RangeInclusive<usize>,
        policies: &[Policy],
        access_count: usize,
        jobs: usize,
    ) -> Result<Vec<Result<SimulationResult>>> {
        let sweep = self.run(capacities, policies, access_count)?;
        let points: Vec<SweepPoint> = sweep.points().collect();
        let workers = jobs.clamp(1, points.len());

        let queue = Mutex::new(points.into_iter());
        let results = Mutex::new(Vec::with_capacity(sweep.len));

        thread::scope(|scope| {
            for _ in 0..workers {
                scope.spawn(|| loop {
                    let Some(point) = queue.lock().next() else {
                        break;
                    };
                    let result = self.evaluate(point, access_count);
                    results.lock().push((point.ordinal, result));
                });
            }
        });

        let mut results = results.into_inner();
        results.sort_by_key(|(ordinal, _)| *ordinal);
        Ok(results.into_iter().map(|(_, result)| result).collect())
    }

    /// Simulate a single sweep point.
    pub fn evaluate(&self, point: SweepPoint, access_count: usize) -> Result<SimulationResult> {
        let result = match self.seed {
            Some(seed) => self.driver.run_seeded(
                point.policy,
                point.capacity,
                access_count,
                seed.wrapping_add(point.ordinal as u64),
            ),
            None => self
                .driver
                .run(point.policy, point.capacity, access_count),
        };

        match &result {
            Ok(r) => debug!(
                policy = %r.policy,
                capacity = r.capacity,
                hits = r.hits,
                total = r.total_accesses,
                "sweep point done"
            ),
            Err(e) => warn!(
                policy = %point.policy,
                capacity = point.capacity,
                error = %e,
                "sweep point failed"
            ),
        }

        result
    }
}

/// A lazy sweep; see [`SweepRunner::run`].
///
/// Dropping the iterator early cancels the remaining points. Results already
/// yielded stay valid.
#[derive(Debug)]
pub struct Sweep<'a> {
    runner: &'a SweepRunner,
    first_capacity: usize,
    policies: Vec<Policy>,
    access_count: usize,
    next: usize,
    len: usize,
}

impl Sweep<'_> {
    fn point(&self, ordinal: usize) -> SweepPoint {
        let per_capacity = self.policies.len();
        SweepPoint {
            ordinal,
            capacity: self.first_capacity + ordinal / per_capacity,
            policy: self.policies[ordinal % per_capacity],
        }
    }

    /// The points not yet simulated, without running them.
    pub fn points(&self) -> impl Iterator<Item = SweepPoint> + '_ {
        (self.next..self.len).map(|ordinal| self.point(ordinal))
    }
}

impl Iterator for Sweep<'_> {
    type Item = Result<SimulationResult>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.len {
            return None;
        }
        let point = self.point(self.next);
        self.next += 1;
        Some(self.runner.evaluate(point, self.access_count))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Sweep<'_> {}
