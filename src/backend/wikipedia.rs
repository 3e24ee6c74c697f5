use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error, instrument, trace};
use url::Url;

use crate::error::{AppError, AppResult};
use crate::history::encode_component;

use super::traits::{ResultItem, SearchBackend, SearchBatch};

/// Client for the MediaWiki `list=search` API.
#[derive(Debug, Clone)]
pub struct WikipediaBackend {
    http: Client,
    endpoint: String,
}

#[derive(Debug, Deserialize)]
struct WikipediaResponse {
    query: Option<WikipediaQuery>,
    error: Option<WikipediaApiError>,
}

#[derive(Debug, Deserialize)]
struct WikipediaQuery {
    #[serde(default)]
    search: Vec<ResultItem>,
    searchinfo: Option<WikipediaSearchInfo>,
}

#[derive(Debug, Deserialize)]
struct WikipediaSearchInfo {
    #[serde(default)]
    totalhits: usize,
}

#[derive(Debug, Deserialize)]
struct WikipediaApiError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    info: String,
}

impl WikipediaBackend {
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> AppResult<Self> {
        Ok(Self {
            http: super::build_http_client(timeout)?,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl SearchBackend for WikipediaBackend {
    fn name(&self) -> &'static str {
        "wikipedia"
    }

    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    async fn fetch(&self, query: &str, offset: usize, limit: usize) -> AppResult<SearchBatch> {
        let offset_text = offset.to_string();
        let limit_text = limit.to_string();
        debug!("sending search request");

        let response = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("action", "query"),
                ("list", "search"),
                ("srsearch", query),
                ("sroffset", offset_text.as_str()),
                ("srlimit", limit_text.as_str()),
                ("format", "json"),
                ("origin", "*"),
            ])
            .send()
            .await
            .map_err(|err| {
                error!(error = %err, "search request failed");
                AppError::from(err)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), "search API returned an error status");
            return Err(AppError::fetch(status.as_u16(), body));
        }

        let body = response.text().await?;
        trace!(body = %body, "response body");
        parse_response(&body)
    }

    fn article_url(&self, item: &ResultItem) -> Option<String> {
        let mut url = Url::parse(&self.endpoint).ok()?;
        let title = item.title.trim().replace(' ', "_");
        if title.is_empty() {
            return None;
        }
        url.set_query(None);
        url.set_path(&format!("/wiki/{}", encode_component(&title)));
        Some(url.to_string())
    }
}

fn parse_response(body: &str) -> AppResult<SearchBatch> {
    let parsed: WikipediaResponse = serde_json::from_str(body)
        .map_err(|err| AppError::invalid_response(format!("JSON parse error: {err}")))?;

    if let Some(api_error) = parsed.error {
        return Err(AppError::invalid_response(format!(
            "{}: {}",
            api_error.code, api_error.info
        )));
    }

    let Some(query) = parsed.query else {
        return Err(AppError::invalid_response("missing `query` object"));
    };

    Ok(SearchBatch {
        total_hits: Some(query.searchinfo.map(|info| info.totalhits).unwrap_or(0)),
        items: query.search,
    })
}
