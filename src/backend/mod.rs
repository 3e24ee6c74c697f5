use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;

use crate::config::{ApiConfig, BackendKind};
use crate::error::{AppError, AppResult};

mod custom;
mod traits;
mod wikipedia;

pub use custom::CustomApiBackend;
pub use traits::{ResultItem, SearchBackend, SearchBatch};
pub use wikipedia::WikipediaBackend;

pub fn open_default_backend(api: &ApiConfig) -> AppResult<Arc<dyn SearchBackend>> {
    let timeout = (api.timeout_ms > 0).then(|| Duration::from_millis(api.timeout_ms));
    match api.backend {
        BackendKind::Wikipedia => WikipediaBackend::new(api.endpoint.clone(), timeout)
            .map(|backend| Arc::new(backend) as Arc<dyn SearchBackend>),
        BackendKind::Custom => CustomApiBackend::new(api.base_url.clone(), timeout)
            .map(|backend| Arc::new(backend) as Arc<dyn SearchBackend>),
    }
}

fn build_http_client(timeout: Option<Duration>) -> AppResult<Client> {
    let mut builder = Client::builder().user_agent(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    ));
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder
        .build()
        .map_err(|err| AppError::unsupported(format!("failed to build HTTP client: {err}")))
}

#[cfg(test)]
mod tests {
    use crate::config::{ApiConfig, BackendKind};

    use super::open_default_backend;

    #[test]
    fn open_default_backend_follows_configured_kind() {
        let backend = open_default_backend(&ApiConfig::default()).expect("wikipedia should open");
        assert_eq!(backend.name(), "wikipedia");

        let api = ApiConfig {
            backend: BackendKind::Custom,
            base_url: "http://localhost:9000".to_string(),
            timeout_ms: 2_000,
            ..ApiConfig::default()
        };
        let backend = open_default_backend(&api).expect("custom should open");
        assert_eq!(backend.name(), "custom");
    }

    #[test]
    fn open_default_backend_rejects_custom_without_url() {
        let api = ApiConfig {
            backend: BackendKind::Custom,
            ..ApiConfig::default()
        };
        assert!(open_default_backend(&api).is_err());
    }
}
