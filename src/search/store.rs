use crate::backend::ResultItem;

/// Ordered result items loaded so far for the active query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultStore {
    items: Vec<ResultItem>,
    total_hits: usize,
}

impl ResultStore {
    /// Swaps in the first batch of a new search.
    pub fn replace(&mut self, items: Vec<ResultItem>, total_hits: usize) {
        self.total_hits = total_hits.max(items.len());
        self.items = items;
    }

    /// Appends a continuation batch, never growing past `total_hits`.
    ///
    /// Returns the number of items kept.
    pub fn append(&mut self, items: Vec<ResultItem>, total_hits: usize) -> usize {
        self.total_hits = total_hits.max(self.items.len());
        let room = self.total_hits.saturating_sub(self.items.len());
        let kept = items.len().min(room);
        self.items.extend(items.into_iter().take(kept));
        kept
    }

    /// Stops further continuation once the server runs dry early.
    pub fn mark_exhausted(&mut self) {
        self.total_hits = self.items.len();
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.total_hits = 0;
    }

    pub fn items(&self) -> &[ResultItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total_hits(&self) -> usize {
        self.total_hits
    }

    pub fn has_more(&self) -> bool {
        self.items.len() < self.total_hits
    }
}
