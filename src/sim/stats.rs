//! Hit/miss accounting for a simulation run.

use std::fmt;

use crate::replacer::{Access, Policy};

/// Counters accumulated while one replacer runs over one trace.
///
/// # Example
/// ```
/// use pagesim::{AccessStats, Policy};
/// use pagesim::replacer::Access;
///
/// let mut stats = AccessStats::new();
/// stats.record(Access::Miss { evicted: None });
/// stats.record(Access::Hit);
///
/// let result = stats.finish(4, Policy::Lru);
/// assert_eq!(result.hits, 1);
/// assert_eq!(result.total_accesses, 2);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccessStats {
    /// References that found their page resident.
    pub hits: u64,

    /// References that had to load their page.
    pub misses: u64,

    /// Misses that pushed another page out.
    pub evictions: u64,
}

impl AccessStats {
    /// Create a new stats tracker with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one reference.
    #[inline]
    pub fn record(&mut self, access: Access) {
        match access {
            Access::Hit => self.hits += 1,
            Access::Miss { evicted } => {
                self.misses += 1;
                if evicted.is_some() {
                    self.evictions += 1;
                }
            }
        }
    }

    pub fn total(&self) -> u64 {
        self.hits + self.misses
    }

    /// Calculate hit rate (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        ratio(self.hits, self.total())
    }

    /// Freeze the counters into the result for one sweep point.
    pub fn finish(self, capacity: usize, policy: Policy) -> SimulationResult {
        SimulationResult {
            capacity,
            policy,
            hits: self.hits,
            misses: self.misses,
            evictions: self.evictions,
            total_accesses: self.total(),
        }
    }
}

/// The outcome of simulating one policy at one capacity.
///
/// `hits + misses == total_accesses` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationResult {
    pub capacity: usize,
    pub policy: Policy,
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub total_accesses: u64,
}

impl SimulationResult {
    /// Calculate hit rate (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        ratio(self.hits, self.total_accesses)
    }

    /// Hit rate as a percentage, `hits * 100 / total`.
    pub fn hit_percentage(&self) -> f64 {
        self.hit_rate() * 100.0
    }
}

impl fmt::Display for SimulationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<5} capacity {:>3}: hit rate {:.2}% ({}/{} hits, {} evictions)",
            self.policy,
            self.capacity,
            self.hit_percentage(),
            self.hits,
            self.total_accesses,
            self.evictions
        )
    }
}

fn ratio(hits: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        hits as f64 / total as f64
    }
}
