//! Configuration for pagesim.
//!
//! The defaults reproduce the classic textbook experiment: a 400-instruction
//! program split into 10-instruction pages, one random access per
//! instruction, with resident memory swept from 4 to 40 frames.

use std::ops::RangeInclusive;

use crate::common::{Error, Result};
use crate::replacer::Policy;

/// Instructions per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Total instructions in the simulated program (the "outer memory").
///
/// With the default page size this gives 40 distinct pages.
pub const DEFAULT_OUTER_MEMORY_SIZE: usize = 400;

/// Smallest resident-memory capacity (in frames) in the default sweep.
pub const DEFAULT_MIN_CAPACITY: usize = 4;

/// Largest resident-memory capacity (in frames) in the default sweep.
pub const DEFAULT_MAX_CAPACITY: usize = 40;

/// Parameters for a capacity sweep.
///
/// # Example
/// ```
/// use pagesim::{Policy, SimConfig};
///
/// let config = SimConfig::default()
///     .with_capacity_range(4..=8)
///     .with_policies(vec![Policy::Clock])
///     .with_seed(7);
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.access_count(), 400);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimConfig {
    /// Instructions per page.
    pub page_size: usize,

    /// Total instructions; trace indices are drawn from `[0, outer_memory_size)`.
    pub outer_memory_size: usize,

    /// Inclusive range of resident-memory capacities to sweep.
    pub capacity_range: RangeInclusive<usize>,

    /// Policies evaluated at each capacity, in this order.
    pub policies: Vec<Policy>,

    /// References per simulation. `None` means one per instruction.
    pub access_count: Option<usize>,

    /// Base seed for reproducible runs. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl SimConfig {
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_outer_memory_size(mut self, outer_memory_size: usize) -> Self {
        self.outer_memory_size = outer_memory_size;
        self
    }

    pub fn with_capacity_range(mut self, range: RangeInclusive<usize>) -> Self {
        self.capacity_range = range;
        self
    }

    pub fn with_policies(mut self, policies: Vec<Policy>) -> Self {
        self.policies = policies;
        self
    }

    pub fn with_access_count(mut self, access_count: usize) -> Self {
        self.access_count = Some(access_count);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// References per simulation point.
    pub fn access_count(&self) -> usize {
        self.access_count.unwrap_or(self.outer_memory_size)
    }

    /// Check every parameter before any simulation starts.
    ///
    /// # Errors
    /// `Error::InvalidConfiguration` naming the first offending parameter.
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(Error::config("page size must be > 0"));
        }
        if self.outer_memory_size == 0 {
            return Err(Error::config("outer memory size must be > 0"));
        }
        validate_sweep(&self.capacity_range, &self.policies, self.access_count())
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            outer_memory_size: DEFAULT_OUTER_MEMORY_SIZE,
            capacity_range: DEFAULT_MIN_CAPACITY..=DEFAULT_MAX_CAPACITY,
            policies: Policy::ALL.to_vec(),
            access_count: None,
            seed: None,
        }
    }
}

/// Validate the sweep-specific parameters.
pub(crate) fn validate_sweep(
    capacities: &RangeInclusive<usize>,
    policies: &[Policy],
    access_count: usize,
) -> Result<()> {
    if capacities.is_empty() {
        return Err(Error::config(format!(
            "capacity range {}..={} is empty",
            capacities.start(),
            capacities.end()
        )));
    }
    if *capacities.start() == 0 {
        return Err(Error::config("capacity must be > 0"));
    }
    if policies.is_empty() {
        return Err(Error::config("at least one policy is required"));
    }
    if access_count == 0 {
        return Err(Error::config("access count must be > 0"));
    }
    Ok(())
}
