//! LRU (Least Recently Used) replacement policy.
//!
//! Resident pages live in an arena of nodes linked into a doubly-linked
//! recency list by [`FrameId`] indices. A page table maps each resident page
//! to its node, so a hit is one lookup plus an O(1) splice to the front, and
//! eviction unlinks the tail in O(1).

use std::collections::HashMap;

use tracing::trace;

use crate::common::{Error, FrameId, PageId, Result};
use crate::replacer::{Access, Replacer};

/// One resident page plus its recency links.
#[derive(Debug, Clone, Copy)]
struct Node {
    page_id: PageId,
    /// Towards the most recently used end.
    prev: Option<FrameId>,
    /// Towards the least recently used end.
    next: Option<FrameId>,
}

/// Evicts the page that was referenced longest ago.
///
/// # Layout
/// ```text
///  page_table: PageId -> FrameId
///
///  head                                   tail
///   │                                      │
///   ▼                                      ▼
/// [Frame2] ⇄ [Frame0] ⇄ [Frame3] ⇄ ... ⇄ [Frame1]
///   MRU                                    LRU
/// ```
///
/// The arena never grows past `capacity` nodes: once full, a miss reuses
/// the evicted tail's node for the incoming page.
#[derive(Debug)]
pub struct LruReplacer {
    nodes: Vec<Node>,
    page_table: HashMap<PageId, FrameId>,
    head: Option<FrameId>,
    tail: Option<FrameId>,
    capacity: usize,
    evictions: u64,
}

impl LruReplacer {
    /// Create an empty LRU replacer holding at most `capacity` pages.
    ///
    /// # Errors
    /// `Error::InvalidConfiguration` if `capacity` is 0.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::config("capacity must be > 0"));
        }

        Ok(Self {
            nodes: Vec::with_capacity(capacity),
            page_table: HashMap::with_capacity(capacity),
            head: None,
            tail: None,
            capacity,
            evictions: 0,
        })
    }

    // ========================================================================
    // Recency list maintenance
    // ========================================================================

    /// Detach a node from the list, leaving its links cleared.
    fn unlink(&mut self, frame_id: FrameId) {
        let Node { prev, next, .. } = self.nodes[frame_id.0];

        match prev {
            Some(p) => self.nodes[p.0].next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.nodes[n.0].prev = prev,
            None => self.tail = prev,
        }

        let node = &mut self.nodes[frame_id.0];
        node.prev = None;
        node.next = None;
    }

    /// Attach a detached node at the most recently used end.
    fn push_front(&mut self, frame_id: FrameId) {
        let old_head = self.head;
        {
            let node = &mut self.nodes[frame_id.0];
            node.prev = None;
            node.next = old_head;
        }

        match old_head {
            Some(h) => self.nodes[h.0].prev = Some(frame_id),
            None => self.tail = Some(frame_id),
        }
        self.head = Some(frame_id);
    }

    /// Move an already linked node to the front.
    fn promote(&mut self, frame_id: FrameId) {
        if self.head == Some(frame_id) {
            return;
        }
        self.unlink(frame_id);
        self.push_front(frame_id);
    }

    /// Get a detached node for `page_id`, evicting the tail if memory is full.
    fn claim_node(&mut self, page_id: PageId) -> (FrameId, Option<PageId>) {
        let victim = match self.tail {
            Some(tail) if self.nodes.len() >= self.capacity => tail,
            _ => {
                let frame_id = FrameId::new(self.nodes.len());
                self.nodes.push(Node {
                    page_id,
                    prev: None,
                    next: None,
                });
                return (frame_id, None);
            }
        };
        self.unlink(victim);

        let evicted = self.nodes[victim.0].page_id;
        self.page_table.remove(&evicted);
        self.nodes[victim.0].page_id = page_id;
        self.evictions += 1;
        trace!(evicted = %evicted, loaded = %page_id, "lru eviction");

        (victim, Some(evicted))
    }
}

impl Replacer for LruReplacer {
    fn reference(&mut self, page_id: PageId) -> Access {
        if let Some(&frame_id) = self.page_table.get(&page_id) {
            self.promote(frame_id);
            return Access::Hit;
        }

        let (frame_id, evicted) = self.claim_node(page_id);
        self.push_front(frame_id);
        self.page_table.insert(page_id, frame_id);

        Access::Miss { evicted }
    }

    fn contains(&self, page_id: PageId) -> bool {
        self.page_table.contains_key(&page_id)
    }

    /// Resident pages, most recently used first.
    fn resident_pages(&self) -> Vec<PageId> {
        let mut pages = Vec::with_capacity(self.page_table.len());
        let mut cursor = self.head;
        while let Some(frame_id) = cursor {
            let node = &self.nodes[frame_id.0];
            pages.push(node.page_id);
            cursor = node.next;
        }
        pages
    }

    fn len(&self) -> usize {
        self.page_table.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn evictions(&self) -> u64 {
        self.evictions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pages(ids: &[u32]) -> Vec<PageId> {
        ids.iter().copied().map(PageId::new).collect()
    }

    #[test]
    fn test_lru_zero_capacity() {
        assert!(matches!(
            LruReplacer::new(0),
            Err(Error::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_lru_first_touch_misses() {
        let mut lru = LruReplacer::new(3).unwrap();

        assert_eq!(lru.reference(PageId::new(1)), Access::Miss { evicted: None });
        assert_eq!(lru.reference(PageId::new(1)), Access::Hit);
        assert_eq!(lru.len(), 1);
    }

    #[test]
    fn test_lru_promote_and_evict() {
        // A=0, B=1, C=2, D=3
        let mut lru = LruReplacer::new(3).unwrap();
        let mut hits = 0;

        for page in pages(&[0, 1, 2, 0, 3]) {
            if lru.reference(page).is_hit() {
                hits += 1;
            }
        }

        assert_eq!(hits, 1);
        assert_eq!(lru.resident_pages(), pages(&[3, 0, 2]));
        assert!(!lru.contains(PageId::new(1)));
        assert_eq!(lru.evictions(), 1);
    }

    #[test]
    fn test_lru_reports_evicted_page() {
        let mut lru = LruReplacer::new(2).unwrap();
        lru.reference(PageId::new(10));
        lru.reference(PageId::new(20));

        assert_eq!(
            lru.reference(PageId::new(30)),
            Access::Miss {
                evicted: Some(PageId::new(10))
            }
        );
    }

    #[test]
    fn test_lru_hit_on_head_keeps_order() {
        let mut lru = LruReplacer::new(3).unwrap();
        for page in pages(&[0, 1, 2, 2, 2]) {
            lru.reference(page);
        }
        assert_eq!(lru.resident_pages(), pages(&[2, 1, 0]));
    }

    #[test]
    fn test_lru_hit_on_tail_moves_to_front() {
        let mut lru = LruReplacer::new(3).unwrap();
        for page in pages(&[0, 1, 2, 0]) {
            lru.reference(page);
        }
        assert_eq!(lru.resident_pages(), pages(&[0, 2, 1]));

        // Page 1 is now the LRU victim.
        assert_eq!(
            lru.reference(PageId::new(3)),
            Access::Miss {
                evicted: Some(PageId::new(1))
            }
        );
    }

    #[test]
    fn test_lru_capacity_one() {
        let mut lru = LruReplacer::new(1).unwrap();
        assert!(!lru.reference(PageId::new(0)).is_hit());
        assert!(lru.reference(PageId::new(0)).is_hit());
        assert_eq!(
            lru.reference(PageId::new(1)),
            Access::Miss {
                evicted: Some(PageId::new(0))
            }
        );
        assert_eq!(lru.resident_pages(), pages(&[1]));
    }

    #[test]
    fn test_lru_never_exceeds_capacity() {
        let mut lru = LruReplacer::new(4).unwrap();
        for i in 0..100u32 {
            lru.reference(PageId::new(i % 9));
            assert!(lru.len() <= 4);
            assert_eq!(lru.resident_pages().len(), lru.len());
        }
        assert_eq!(lru.nodes.len(), 4);
    }
}
