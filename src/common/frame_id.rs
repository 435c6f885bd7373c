//! Frame identifier type.

use std::fmt;

/// Identifies a frame of simulated resident memory.
///
/// Using `usize` because:
/// 1. Replacers store their frames in a `Vec`
/// 2. Direct indexing without casting: `slots[frame_id.0]`
///
/// # Example
/// ```
/// use pagesim::FrameId;
///
/// let frame_id = FrameId::new(5);
/// assert_eq!(frame_id.0, 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameId(pub usize);

impl FrameId {
    /// Create a new FrameId.
    #[inline]
    pub fn new(id: usize) -> Self {
        FrameId(id)
    }

    /// The next frame on a ring of `len` frames.
    #[inline]
    pub fn wrapping_next(self, len: usize) -> Self {
        FrameId((self.0 + 1) % len)
    }
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frame({})", self.0)
    }
}
