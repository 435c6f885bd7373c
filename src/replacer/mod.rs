//! Page replacement policies (replacers).
//!
//! Currently implements:
//! - [`LruReplacer`] - Least Recently Used, O(1) promote and evict
//! - [`ClockReplacer`] - CLOCK (second chance) over a fixed ring of frames
//!
//! Both are driven through the [`Replacer`] trait so the simulation driver
//! can swap policies at runtime via [`Policy::build`].

mod clock;
mod lru;

use std::fmt;
use std::str::FromStr;

use crate::common::{Error, PageId, Result};

pub use clock::ClockReplacer;
pub use lru::LruReplacer;

/// Outcome of referencing one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// The page was already resident.
    Hit,

    /// The page had to be loaded, evicting `evicted` if memory was full.
    Miss { evicted: Option<PageId> },
}

impl Access {
    #[inline]
    pub fn is_hit(&self) -> bool {
        matches!(self, Access::Hit)
    }

    /// The page pushed out by this access, if any.
    #[inline]
    pub fn evicted(&self) -> Option<PageId> {
        match self {
            Access::Hit => None,
            Access::Miss { evicted } => *evicted,
        }
    }
}

/// A page replacement policy over a fixed number of frames.
pub trait Replacer {
    /// Reference a page, loading it (and possibly evicting another) on a miss.
    fn reference(&mut self, page_id: PageId) -> Access;

    /// Whether `page_id` is currently resident.
    fn contains(&self, page_id: PageId) -> bool;

    /// Resident pages in the policy's natural order.
    fn resident_pages(&self) -> Vec<PageId>;

    /// Number of resident pages.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of resident pages.
    fn capacity(&self) -> usize;

    /// Pages evicted so far.
    fn evictions(&self) -> u64;
}

/// The replacement policies pagesim can simulate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Policy {
    Lru,
    Clock,
}

impl Policy {
    /// Every supported policy, in report order.
    pub const ALL: [Policy; 2] = [Policy::Lru, Policy::Clock];

    pub fn name(&self) -> &'static str {
        match self {
            Policy::Lru => "LRU",
            Policy::Clock => "Clock",
        }
    }

    /// Construct a fresh, empty replacer for this policy.
    ///
    /// # Errors
    /// `Error::InvalidConfiguration` if `capacity` is 0.
    pub fn build(&self, capacity: usize) -> Result<Box<dyn Replacer + Send>> {
        Ok(match self {
            Policy::Lru => Box::new(LruReplacer::new(capacity)?),
            Policy::Clock => Box::new(ClockReplacer::new(capacity)?),
        })
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Policy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "lru" => Ok(Policy::Lru),
            "clock" => Ok(Policy::Clock),
            other => Err(Error::config(format!(
                "unknown policy '{}' (expected 'lru' or 'clock')",
                other
            ))),
        }
    }
}
