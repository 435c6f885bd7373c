//! Page universe - the fixed partition of instructions into pages.

use crate::common::{Error, PageId, Result};

/// Maps instruction indices to page numbers.
///
/// # Layout
/// ```text
/// instruction: 0 ........ 9 | 10 ....... 19 | ... | 390 ...... 399
/// page:        Page(0)      | Page(1)       | ... | Page(39)
/// ```
///
/// If `outer_memory_size` is not a multiple of `page_size`, the last page is
/// partial and still counts toward [`total_pages`](Self::total_pages).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageUniverse {
    page_size: usize,
    outer_memory_size: usize,
}

impl PageUniverse {
    /// Create a page universe.
    ///
    /// # Errors
    /// `Error::InvalidConfiguration` if either size is 0, or if the universe
    /// has more pages than a [`PageId`] can number.
    pub fn new(page_size: usize, outer_memory_size: usize) -> Result<Self> {
        if page_size == 0 {
            return Err(Error::config("page size must be > 0"));
        }
        if outer_memory_size == 0 {
            return Err(Error::config("outer memory size must be > 0"));
        }
        if outer_memory_size.div_ceil(page_size) > u32::MAX as usize {
            return Err(Error::config(format!(
                "{} instructions of {} per page exceed the page id space",
                outer_memory_size, page_size
            )));
        }

        Ok(Self {
            page_size,
            outer_memory_size,
        })
    }

    /// Page containing instruction `index`.
    ///
    /// # Errors
    /// `Error::OutOfRangeReference` if `index >= outer_memory_size`.
    #[inline]
    pub fn page_of(&self, index: usize) -> Result<PageId> {
        if index >= self.outer_memory_size {
            return Err(Error::OutOfRangeReference {
                index,
                limit: self.outer_memory_size,
            });
        }
        // Bounded by the page-count check in `new`.
        Ok(PageId::new((index / self.page_size) as u32))
    }

    #[inline]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    #[inline]
    pub fn outer_memory_size(&self) -> usize {
        self.outer_memory_size
    }

    /// Number of distinct pages.
    #[inline]
    pub fn total_pages(&self) -> usize {
        self.outer_memory_size.div_ceil(self.page_size)
    }
}
