//! Simulation driver - one policy, one capacity, one trace.

use rand::Rng;

use crate::common::{Error, PageId, Result, SimConfig};
use crate::replacer::{Policy, Replacer};
use crate::sim::{AccessStats, SimulationResult};
use crate::trace::{PageUniverse, TraceSource};

/// Runs a single replacer over a single trace and tallies the outcome.
///
/// Every run builds a fresh replacer and a fresh trace source, so no state
/// leaks from one simulation point into the next.
///
/// # Usage
/// ```
/// use pagesim::{PageUniverse, Policy, SimulationDriver};
///
/// let driver = SimulationDriver::new(PageUniverse::new(10, 400).unwrap());
/// let result = driver.run_seeded(Policy::Clock, 8, 400, 42).unwrap();
///
/// assert_eq!(result.hits + result.misses, 400);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SimulationDriver {
    universe: PageUniverse,
}

impl SimulationDriver {
    pub fn new(universe: PageUniverse) -> Self {
        Self { universe }
    }

    /// Build a driver over the page universe described by `config`.
    ///
    /// # Errors
    /// `Error::InvalidConfiguration` if the page or memory size is 0.
    pub fn from_config(config: &SimConfig) -> Result<Self> {
        Ok(Self::new(PageUniverse::new(
            config.page_size,
            config.outer_memory_size,
        )?))
    }

    pub fn universe(&self) -> &PageUniverse {
        &self.universe
    }

    /// Simulate `access_count` random references, seeded from OS entropy.
    ///
    /// # Errors
    /// - `Error::InvalidConfiguration` for a zero capacity or access count
    pub fn run(
        &self,
        policy: Policy,
        capacity: usize,
        access_count: usize,
    ) -> Result<SimulationResult> {
        let source = TraceSource::from_entropy(self.universe.outer_memory_size())?;
        self.run_with_source(policy, capacity, access_count, source)
    }

    /// Simulate `access_count` random references from a seeded source.
    pub fn run_seeded(
        &self,
        policy: Policy,
        capacity: usize,
        access_count: usize,
        seed: u64,
    ) -> Result<SimulationResult> {
        let source = TraceSource::seeded(self.universe.outer_memory_size(), seed)?;
        self.run_with_source(policy, capacity, access_count, source)
    }

    /// Simulate `access_count` references drawn from `source`.
    ///
    /// # Errors
    /// - `Error::InvalidConfiguration` for a zero capacity or access count
    /// - `Error::OutOfRangeReference` if `source` yields an index outside
    ///   this driver's page universe
    pub fn run_with_source<R: Rng>(
        &self,
        policy: Policy,
        capacity: usize,
        access_count: usize,
        source: TraceSource<R>,
    ) -> Result<SimulationResult> {
        if access_count == 0 {
            return Err(Error::config("access count must be > 0"));
        }

        let universe = self.universe;
        let references = source
            .take(access_count)
            .map(move |index| universe.page_of(index));

        drive(policy, capacity, references)
    }

    /// Simulate a literal sequence of page references.
    ///
    /// # Errors
    /// `Error::InvalidConfiguration` for a zero capacity or an empty trace.
    pub fn replay<I>(policy: Policy, capacity: usize, pages: I) -> Result<SimulationResult>
    where
        I: IntoIterator<Item = PageId>,
    {
        drive(policy, capacity, pages.into_iter().map(Ok))
    }
}

fn drive<I>(policy: Policy, capacity: usize, references: I) -> Result<SimulationResult>
where
    I: Iterator<Item = Result<PageId>>,
{
    let mut replacer = policy.build(capacity)?;
    let mut stats = AccessStats::new();

    for page_id in references {
        stats.record(replacer.reference(page_id?));
    }

    if stats.total() == 0 {
        return Err(Error::config("access count must be > 0"));
    }
    debug_assert!(replacer.len() <= replacer.capacity());
    debug_assert_eq!(stats.evictions, replacer.evictions());

    Ok(stats.finish(capacity, policy))
}
