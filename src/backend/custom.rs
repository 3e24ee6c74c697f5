use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error, instrument};

use crate::error::{AppError, AppResult};

use super::traits::{ResultItem, SearchBackend, SearchBatch};

/// Client for a self-hosted article search service.
///
/// The service answers `GET {base_url}/search?query=…` with the complete hit
/// list, so the whole set is paginated locally and `offset`/`limit` are
/// ignored.
#[derive(Debug, Clone)]
pub struct CustomApiBackend {
    http: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CustomResponse {
    Wrapped { results: Vec<ResultItem> },
    Bare(Vec<ResultItem>),
}

impl CustomApiBackend {
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> AppResult<Self> {
        let base_url = base_url.into();
        if base_url.trim().is_empty() {
            return Err(AppError::invalid_argument(
                "custom backend requires api.base_url or WPG_API_URL",
            ));
        }
        Ok(Self {
            http: super::build_http_client(timeout)?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn search_url(&self) -> String {
        format!("{}/search", self.base_url)
    }
}

#[async_trait]
impl SearchBackend for CustomApiBackend {
    fn name(&self) -> &'static str {
        "custom"
    }

    #[instrument(skip(self, _offset, _limit), fields(base_url = %self.base_url))]
    async fn fetch(&self, query: &str, _offset: usize, _limit: usize) -> AppResult<SearchBatch> {
        debug!("sending search request");
        let response = self
            .http
            .get(self.search_url())
            .query(&[("query", query)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), "search API returned an error status");
            return Err(AppError::fetch(status.as_u16(), body));
        }

        let body = response.text().await?;
        parse_response(&body)
    }
}

fn parse_response(body: &str) -> AppResult<SearchBatch> {
    let parsed: CustomResponse = serde_json::from_str(body).map_err(|err| {
        AppError::invalid_response(format!("expected `results` array or bare array: {err}"))
    })?;
    let items = match parsed {
        CustomResponse::Wrapped { results } => results,
        CustomResponse::Bare(results) => results,
    };
    Ok(SearchBatch {
        items,
        total_hits: None,
    })
}
