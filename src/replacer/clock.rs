//! CLOCK (second chance) replacement policy.

use tracing::trace;

use crate::common::{Error, FrameId, PageId, Result};
use crate::replacer::{Access, Replacer};

/// A resident page and its use bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Slot {
    page_id: PageId,
    use_bit: bool,
}

/// Approximates LRU with one use bit per frame and a sweeping hand.
///
/// # Layout
/// ```text
///            hand
///             │
///             ▼
/// ┌────────┬────────┬────────┬────────┐
/// │ P3 / 1 │ P7 / 0 │ P1 / 1 │ P4 / 0 │   page / use bit
/// └────────┴────────┴────────┴────────┘
///   Frame0   Frame1   Frame2   Frame3
/// ```
///
/// A hit sets the page's use bit. On a miss with memory full, the hand
/// sweeps forward clearing set bits until it reaches a clear one, evicts that
/// page, and parks one frame past the victim.
///
/// # Sweep bound
/// One lap clears every bit it passes, so after `capacity` inspections the
/// hand is back on a frame whose bit is now clear. A sweep therefore inspects
/// at most `capacity + 1` frames; see [`last_sweep_len`](Self::last_sweep_len).
#[derive(Debug)]
pub struct ClockReplacer {
    /// Fixed ring of frames; filled front to back, never emptied.
    slots: Vec<Option<Slot>>,
    occupied: usize,
    hand: FrameId,
    capacity: usize,
    evictions: u64,
    last_sweep_len: usize,
}

impl ClockReplacer {
    /// Create an empty CLOCK replacer with `capacity` frames.
    ///
    /// # Errors
    /// `Error::InvalidConfiguration` if `capacity` is 0.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::config("capacity must be > 0"));
        }

        Ok(Self {
            slots: vec![None; capacity],
            occupied: 0,
            hand: FrameId::new(0),
            capacity,
            evictions: 0,
            last_sweep_len: 0,
        })
    }

    /// Frame the next sweep starts from.
    pub fn hand(&self) -> FrameId {
        self.hand
    }

    /// Use bit of a resident page, or `None` if the page is not resident.
    pub fn use_bit(&self, page_id: PageId) -> Option<bool> {
        self.find(page_id)
            .and_then(|frame_id| self.slots[frame_id.0])
            .map(|slot| slot.use_bit)
    }

    /// Frames inspected by the most recent eviction sweep (0 before any).
    pub fn last_sweep_len(&self) -> usize {
        self.last_sweep_len
    }

    fn find(&self, page_id: PageId) -> Option<FrameId> {
        self.slots[..self.occupied]
            .iter()
            .position(|slot| matches!(slot, Some(s) if s.page_id == page_id))
            .map(FrameId::new)
    }

    /// Advance the hand to the victim frame, giving set bits a second chance.
    fn sweep(&mut self) -> FrameId {
        let mut inspected = 0;

        for _ in 0..self.capacity {
            inspected += 1;
            let hand = self.hand;
            if let Some(slot) = self.slots[hand.0].as_mut() {
                if !slot.use_bit {
                    self.last_sweep_len = inspected;
                    return hand;
                }
                slot.use_bit = false;
            }
            self.hand = hand.wrapping_next(self.capacity);
        }

        // Full lap: every bit is clear and the hand is back where it started.
        self.last_sweep_len = inspected + 1;
        self.hand
    }
}

impl Replacer for ClockReplacer {
    fn reference(&mut self, page_id: PageId) -> Access {
        if let Some(frame_id) = self.find(page_id) {
            if let Some(slot) = self.slots[frame_id.0].as_mut() {
                slot.use_bit = true;
            }
            return Access::Hit;
        }

        let loaded = Some(Slot {
            page_id,
            use_bit: true,
        });

        if self.occupied < self.capacity {
            self.slots[self.occupied] = loaded;
            self.occupied += 1;
            return Access::Miss { evicted: None };
        }

        let victim = self.sweep();
        let evicted = self.slots[victim.0].map(|slot| slot.page_id);
        self.slots[victim.0] = loaded;
        self.hand = victim.wrapping_next(self.capacity);
        self.evictions += 1;
        trace!(
            frame = %victim,
            evicted = ?evicted,
            loaded = %page_id,
            sweep_len = self.last_sweep_len,
            "clock eviction"
        );

        Access::Miss { evicted }
    }

    fn contains(&self, page_id: PageId) -> bool {
        self.find(page_id).is_some()
    }

    /// Resident pages in frame order.
    fn resident_pages(&self) -> Vec<PageId> {
        self.slots.iter().flatten().map(|slot| slot.page_id).collect()
    }

    fn len(&self) -> usize {
        self.occupied
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn evictions(&self) -> u64 {
        self.evictions
    }
}
