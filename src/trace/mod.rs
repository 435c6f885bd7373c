//! Trace layer - where page references come from.
//!
//! - [`PageUniverse`] - Fixed mapping from instruction index to page
//! - [`TraceSource`] - Uniform random instruction indices

mod source;
mod universe;

pub use source::TraceSource;
pub use universe::PageUniverse;
