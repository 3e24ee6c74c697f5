use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{AppError, AppResult};

pub const DEFAULT_WIKIPEDIA_ENDPOINT: &str = "https://en.wikipedia.org/w/api.php";
pub const API_URL_ENV: &str = "WPG_API_URL";

/// Upper bound the public search API accepts for `srlimit`.
const MAX_BATCH_SIZE: usize = 500;

#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub pagination: PaginationConfig,
    pub keymap: KeymapConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    Wikipedia,
    Custom,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ApiConfig {
    pub backend: BackendKind,
    pub endpoint: String,
    pub base_url: String,
    pub timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::Wikipedia,
            endpoint: DEFAULT_WIKIPEDIA_ENDPOINT.to_string(),
            base_url: String::new(),
            timeout_ms: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PaginationConfig {
    pub results_per_page: usize,
    pub batch_size: usize,
    pub window: usize,
    /// Results past this offset are never requested or paged to.
    pub max_offset: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            results_per_page: 10,
            batch_size: 300,
            window: 3,
            max_offset: 10_000,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct KeymapConfig {
    pub preset: String,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            preset: "default".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct LogConfig {
    pub path: String,
}

impl Config {
    pub fn load() -> AppResult<Self> {
        let Some(path) = default_config_path() else {
            return Ok(Self::default());
        };
        Self::load_from_path(path)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        if !path.is_file() {
            return Err(AppError::invalid_argument(format!(
                "config path is not a regular file: {}",
                path.display()
            )));
        }

        let raw = fs::read_to_string(path).map_err(|source| {
            AppError::io_with_context(source, format!("failed to read config: {}", path.display()))
        })?;
        let parsed = toml::from_str::<Self>(&raw).map_err(|source| {
            AppError::invalid_argument(format!(
                "failed to parse config {}: {source}",
                path.display()
            ))
        })?;
        Ok(parsed.sanitized())
    }

    /// Points the app at a custom search backend. An empty URL is ignored.
    pub fn with_api_url(mut self, api_url: Option<&str>) -> Self {
        if let Some(url) = api_url.map(str::trim)
            && !url.is_empty()
        {
            self.api.backend = BackendKind::Custom;
            self.api.base_url = url.trim_end_matches('/').to_string();
        }
        self
    }

    pub fn log_path(&self) -> PathBuf {
        if !self.log.path.trim().is_empty() {
            return PathBuf::from(self.log.path.trim());
        }
        default_log_path()
    }

    fn sanitized(mut self) -> Self {
        self.pagination.results_per_page = self.pagination.results_per_page.max(1);
        self.pagination.batch_size = self.pagination.batch_size.clamp(1, MAX_BATCH_SIZE);
        self.pagination.window = self.pagination.window.max(1);
        self.pagination.max_offset = self.pagination.max_offset.max(1);
        if self.api.endpoint.trim().is_empty() {
            self.api.endpoint = DEFAULT_WIKIPEDIA_ENDPOINT.to_string();
        }
        self.api.base_url = self.api.base_url.trim().trim_end_matches('/').to_string();
        self
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    if let Some(explicit) = std::env::var_os("WPG_CONFIG_PATH")
        && !explicit.is_empty()
    {
        return Some(PathBuf::from(explicit));
    }

    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME")
        && !xdg.is_empty()
    {
        return Some(PathBuf::from(xdg).join("wpg").join("config.toml"));
    }
    if let Some(home) = std::env::var_os("HOME")
        && !home.is_empty()
    {
        return Some(
            PathBuf::from(home)
                .join(".config")
                .join("wpg")
                .join("config.toml"),
        );
    }
    if let Some(appdata) = std::env::var_os("APPDATA")
        && !appdata.is_empty()
    {
        return Some(PathBuf::from(appdata).join("wpg").join("config.toml"));
    }
    None
}

pub fn default_log_path() -> PathBuf {
    if let Some(state) = std::env::var_os("XDG_STATE_HOME")
        && !state.is_empty()
    {
        return PathBuf::from(state).join("wpg").join("wpg.log");
    }
    if let Some(home) = std::env::var_os("HOME")
        && !home.is_empty()
    {
        return PathBuf::from(home)
            .join(".local")
            .join("state")
            .join("wpg")
            .join("wpg.log");
    }
    std::env::temp_dir().join("wpg.log")
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::process;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::{BackendKind, Config, DEFAULT_WIKIPEDIA_ENDPOINT};

    fn unique_temp_path(suffix: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after unix epoch")
            .as_nanos();
        let mut path = std::env::temp_dir();
        path.push(format!("wpg_config_{suffix}_{}_{}", process::id(), nanos));
        path
    }

    #[test]
    fn load_from_path_returns_defaults_for_missing_file() {
        let missing = unique_temp_path("missing.toml");
        let config = Config::load_from_path(&missing).expect("missing config should fallback");
        assert_eq!(config, Config::default());
        assert_eq!(config.pagination.results_per_page, 10);
        assert_eq!(config.pagination.batch_size, 300);
        assert_eq!(config.pagination.window, 3);
        assert_eq!(config.pagination.max_offset, 10_000);
    }

    #[test]
    fn load_from_path_applies_partial_overrides_and_sanitizes() {
        let path = unique_temp_path("custom.toml");
        fs::write(
            &path,
            r#"
            [api]
            backend = "custom"
            endpoint = ""
            base_url = "http://localhost:8080/"

            [pagination]
            results_per_page = 0
            batch_size = 9000
            window = 0
            max_offset = 0
            "#,
        )
        .expect("config file should be written");

        let config = Config::load_from_path(&path).expect("config should parse");
        assert_eq!(config.api.backend, BackendKind::Custom);
        assert_eq!(config.api.endpoint, DEFAULT_WIKIPEDIA_ENDPOINT);
        assert_eq!(config.api.base_url, "http://localhost:8080");
        assert_eq!(config.pagination.results_per_page, 1);
        assert_eq!(config.pagination.batch_size, 500);
        assert_eq!(config.pagination.window, 1);
        assert_eq!(config.pagination.max_offset, 1);
        assert_eq!(config.keymap.preset, "default");

        fs::remove_file(&path).expect("config file should be removed");
    }

    #[test]
    fn load_from_path_rejects_malformed_toml() {
        let path = unique_temp_path("broken.toml");
        fs::write(&path, "[pagination\nresults_per_page = ").expect("config file should be written");

        assert!(Config::load_from_path(&path).is_err());

        fs::remove_file(&path).expect("config file should be removed");
    }

    #[test]
    fn api_url_override_selects_custom_backend() {
        let config = Config::default().with_api_url(Some("https://help.example.com/api/"));
        assert_eq!(config.api.backend, BackendKind::Custom);
        assert_eq!(config.api.base_url, "https://help.example.com/api");

        let untouched = Config::default().with_api_url(Some("   "));
        assert_eq!(untouched.api.backend, BackendKind::Wikipedia);
    }

    #[test]
    fn explicit_log_path_wins_over_default() {
        let mut config = Config::default();
        config.log.path = "/tmp/wpg-test.log".to_string();
        assert_eq!(config.log_path(), PathBuf::from("/tmp/wpg-test.log"));
    }
}
