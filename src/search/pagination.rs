//! Page arithmetic over the loaded result list.

use std::ops::RangeInclusive;

use crate::config::PaginationConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub results_per_page: usize,
    pub batch_size: usize,
    pub window: usize,
    pub max_offset: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::from_config(&PaginationConfig::default())
    }
}

impl Pagination {
    pub fn from_config(config: &PaginationConfig) -> Self {
        Self {
            results_per_page: config.results_per_page.max(1),
            batch_size: config.batch_size.max(1),
            window: config.window.max(1),
            max_offset: config.max_offset.max(1),
        }
    }

    /// Hits that can actually be paged to.
    pub fn reachable(&self, total_hits: usize) -> usize {
        total_hits.min(self.max_offset)
    }

    /// `ceil(reachable / results_per_page)`; 0 when there are no hits.
    pub fn max_page(&self, total_hits: usize) -> usize {
        self.reachable(total_hits).div_ceil(self.results_per_page)
    }

    /// Index range of `page` (1-based) clamped to `loaded` items.
    pub fn slice_bounds(&self, page: usize, loaded: usize) -> (usize, usize) {
        let page = page.max(1);
        let start = (page - 1).saturating_mul(self.results_per_page).min(loaded);
        let end = page.saturating_mul(self.results_per_page).min(loaded);
        (start, end)
    }

    pub fn page_slice<'a, T>(&self, items: &'a [T], page: usize) -> &'a [T] {
        let (start, end) = self.slice_bounds(page, items.len());
        &items[start..end]
    }

    /// Page numbers to show around `page`, centered where possible and
    /// clamped to `[1, max_page]`. Empty when `max_page` is 0.
    pub fn page_window(&self, page: usize, max_page: usize) -> RangeInclusive<usize> {
        if max_page == 0 {
            return RangeInclusive::new(1, 0);
        }
        let half = self.window / 2;
        let page = page.clamp(1, max_page);
        let start = page.saturating_sub(half).max(1);
        let end = start.saturating_add(self.window - 1).min(max_page);
        let start = end.saturating_sub(self.window - 1).max(1);
        start..=end
    }

    /// Whether showing `page` needs items beyond what is loaded and the server
    /// still has some within reach.
    pub fn needs_more(&self, page: usize, loaded: usize, total_hits: usize) -> bool {
        page.saturating_mul(self.results_per_page) > loaded && loaded < self.reachable(total_hits)
    }

    /// Batch size for a fetch at `offset`, shortened so it ends at `max_offset`.
    pub fn batch_limit(&self, offset: usize) -> usize {
        self.batch_size
            .min(self.max_offset.saturating_sub(offset))
            .max(1)
    }

    pub fn has_prev(&self, page: usize) -> bool {
        page > 1
    }

    pub fn has_next(&self, page: usize, max_page: usize) -> bool {
        max_page > 1 && page < max_page
    }
}
