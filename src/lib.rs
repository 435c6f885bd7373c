//! pagesim - a page replacement simulator comparing LRU and CLOCK.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                            pagesim                              │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │                Simulation Layer (sim/)                   │   │
//! │  │        SweepRunner → SimulationDriver → AccessStats      │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │       Replacement Policies (replacer/) [Swappable]       │   │
//! │  │               LruReplacer  |  ClockReplacer              │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↑                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │                   Trace Layer (trace/)                   │   │
//! │  │            TraceSource → PageUniverse → PageId           │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (PageId, FrameId, Error, config)
//! - [`trace`] - Instruction-to-page mapping and random traces
//! - [`replacer`] - Replacement policy implementations
//! - [`sim`] - Single simulations and capacity sweeps
//!
//! # Quick Start
//! ```
//! use pagesim::{SimConfig, SweepRunner};
//!
//! let config = SimConfig::default().with_capacity_range(4..=8).with_seed(42);
//! let runner = SweepRunner::from_config(&config).unwrap();
//!
//! for result in runner.run_config(&config).unwrap() {
//!     let result = result.unwrap();
//!     assert_eq!(result.hits + result.misses, 400);
//! }
//! ```

pub mod common;
pub mod replacer;
pub mod sim;
pub mod trace;

// Re-export commonly used items at crate root for convenience
pub use common::config::{DEFAULT_OUTER_MEMORY_SIZE, DEFAULT_PAGE_SIZE};
pub use common::{Error, FrameId, PageId, Result, SimConfig};

pub use replacer::{Access, ClockReplacer, LruReplacer, Policy, Replacer};
pub use sim::{AccessStats, SimulationDriver, SimulationResult, SweepRunner};
pub use trace::{PageUniverse, TraceSource};
