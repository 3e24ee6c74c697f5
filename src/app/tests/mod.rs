mod terminal_surface;

use async_trait::async_trait;

use crate::backend::{ResultItem, SearchBackend, SearchBatch};
use crate::error::AppResult;

/// Serves `total` numbered hits for any query.
pub(super) struct NumberedBackend {
    pub(super) total: usize,
}

#[async_trait]
impl SearchBackend for NumberedBackend {
    fn name(&self) -> &'static str {
        "numbered"
    }

    async fn fetch(&self, query: &str, offset: usize, limit: usize) -> AppResult<SearchBatch> {
        let end = (offset + limit).min(self.total);
        Ok(SearchBatch {
            items: (offset..end)
                .map(|i| ResultItem::titled(format!("{query} {}", i + 1)))
                .collect(),
            total_hits: Some(self.total),
        })
    }

    fn article_url(&self, item: &ResultItem) -> Option<String> {
        Some(format!("https://example.test/{}", item.title.replace(' ', "_")))
    }
}
