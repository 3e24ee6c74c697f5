use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;

/// One article returned by a search backend.
///
/// `snippet` is untrusted markup and must go through
/// [`crate::ui::sanitize_snippet`] before it is drawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultItem {
    pub title: String,
    #[serde(default)]
    pub snippet: Option<String>,
    #[serde(default)]
    pub pageid: Option<u64>,
    #[serde(default)]
    pub content: Option<String>,
}

impl ResultItem {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            snippet: None,
            pageid: None,
            content: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchBatch {
    pub items: Vec<ResultItem>,
    /// Server-side hit count. `None` when the backend does not report one.
    pub total_hits: Option<usize>,
}

impl SearchBatch {
    /// Hit count to paginate against.
    pub fn resolved_total(&self) -> usize {
        self.total_hits.unwrap_or(self.items.len())
    }
}

#[async_trait]
pub trait SearchBackend: Send + Sync {
    fn name(&self) -> &'static str;

    /// Fetches up to `limit` items starting at the zero-based `offset`.
    async fn fetch(&self, query: &str, offset: usize, limit: usize) -> AppResult<SearchBatch>;

    fn article_url(&self, item: &ResultItem) -> Option<String> {
        let _ = item;
        None
    }
}
