//! Trace source - uniform random instruction indices.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::common::{Error, Result};

/// An endless stream of instruction indices drawn uniformly from
/// `[0, outer_memory_size)`.
///
/// The source never ends on its own; callers cap it with
/// [`Iterator::take`]. To restart, build a fresh source.
///
/// # Example
/// ```
/// use pagesim::TraceSource;
///
/// let indices: Vec<usize> = TraceSource::seeded(400, 42).unwrap().take(5).collect();
/// assert_eq!(indices.len(), 5);
/// assert!(indices.iter().all(|&i| i < 400));
/// ```
#[derive(Debug, Clone)]
pub struct TraceSource<R = StdRng> {
    rng: R,
    outer_memory_size: usize,
}

impl<R: Rng> TraceSource<R> {
    /// Wrap a caller-supplied random source.
    ///
    /// # Errors
    /// `Error::InvalidConfiguration` if `outer_memory_size` is 0.
    pub fn new(outer_memory_size: usize, rng: R) -> Result<Self> {
        if outer_memory_size == 0 {
            return Err(Error::config("outer memory size must be > 0"));
        }
        Ok(Self {
            rng,
            outer_memory_size,
        })
    }

    /// Draw the next instruction index.
    #[inline]
    pub fn next_index(&mut self) -> usize {
        self.rng.gen_range(0..self.outer_memory_size)
    }

    pub fn outer_memory_size(&self) -> usize {
        self.outer_memory_size
    }
}

impl TraceSource<StdRng> {
    /// A reproducible source.
    pub fn seeded(outer_memory_size: usize, seed: u64) -> Result<Self> {
        Self::new(outer_memory_size, StdRng::seed_from_u64(seed))
    }

    /// A source seeded from OS entropy; differs on every run.
    pub fn from_entropy(outer_memory_size: usize) -> Result<Self> {
        Self::new(outer_memory_size, StdRng::from_entropy())
    }
}

impl<R: Rng> Iterator for TraceSource<R> {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        Some(self.next_index())
    }
}
