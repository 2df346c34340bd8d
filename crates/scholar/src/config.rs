//! TOML configuration for the catalog client, the search handlers and the source fetcher.
//!
//! Every field has a default, so an empty file (or no file at all, see
//! [`Config::load_or_default`]) yields the stock arXiv settings:
//!
//! ```toml
//! [catalog]
//! base_url        = "https://export.arxiv.org/api/query"
//! source_base_url = "https://export.arxiv.org/src"
//! delay_seconds   = 5
//! page_size       = 100
//!
//! [search]
//! today_max_results  = 100
//! weekly_max_results = 200
//! search_max_results = 50
//! lookback_days      = 7
//! weekly_window_days = 7
//!
//! [source]
//! # max_bytes = 10485760
//! # temp_root = "/tmp"
//! ```

use super::*;

/// Top level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  /// Settings for the arXiv client
  pub catalog: CatalogConfig,
  /// Result caps and date windows for the search handlers
  pub search:  SearchConfig,
  /// Settings for source bundle retrieval
  pub source:  SourceConfig,
}

/// How to reach arXiv and how politely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
  /// Atom query endpoint
  pub base_url:        String,
  /// Prefix for source bundle downloads, the short paper id is appended
  pub source_base_url: String,
  /// Minimum number of seconds between two requests from the same client
  pub delay_seconds:   u64,
  /// Entries requested per page while paging through a search
  pub page_size:       usize,
  /// Optional per-request timeout; no timeout is imposed when unset
  pub timeout_seconds: Option<u64>,
}

/// Result caps and date windows for the search handlers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
  /// Records requested per day attempt by `today_arxiv`
  pub today_max_results:  usize,
  /// Records requested by `weekly_arxiv`
  pub weekly_max_results: usize,
  /// Records requested by `search_arxiv`
  pub search_max_results: usize,
  /// Day attempts made by `today_arxiv`, counting today
  pub lookback_days:      u32,
  /// Length of the inclusive window searched by `weekly_arxiv`, counting today
  pub weekly_window_days: u32,
}

/// Settings for source bundle retrieval.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
  /// Upper bound on the combined size of the extracted sources; unlimited when unset
  pub max_bytes: Option<u64>,
  /// Directory the scoped download directories are created in; the system temp dir when unset
  pub temp_root: Option<PathBuf>,
}

impl Default for CatalogConfig {
  fn default() -> Self {
    Self {
      base_url:        "https://export.arxiv.org/api/query".to_string(),
      source_base_url: "https://export.arxiv.org/src".to_string(),
      delay_seconds:   5,
      page_size:       100,
      timeout_seconds: None,
    }
  }
}

impl Default for SearchConfig {
  fn default() -> Self {
    Self {
      today_max_results:  100,
      weekly_max_results: 200,
      search_max_results: 50,
      lookback_days:      7,
      weekly_window_days: 7,
    }
  }
}

impl Config {
  /// Returns the default configuration file location.
  ///
  /// - On Unix: `~/.config/scholar/config.toml`
  /// - On macOS: `~/Library/Application Support/scholar/config.toml`
  /// - On Windows: `%APPDATA%\scholar\config.toml`
  /// - Fallback: `./scholar/config.toml`
  pub fn default_path() -> PathBuf {
    dirs::config_dir().unwrap_or_else(|| PathBuf::from(".")).join("scholar").join("config.toml")
  }

  /// Reads and validates the configuration at `path`.
  pub fn load(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    debug!("Loading configuration from {}", path.display());
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
  }

  /// Reads the configuration at `path`, or returns the defaults when no file exists there.
  pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    if path.exists() {
      Self::load(path)
    } else {
      debug!("No configuration at {}, using defaults", path.display());
      Ok(Self::default())
    }
  }

  /// Rejects values the handlers cannot work with.
  pub fn validate(&self) -> Result<()> {
    if self.catalog.page_size == 0 {
      return Err(ScholarError::Config("catalog.page_size must be at least 1".into()));
    }
    if self.search.lookback_days == 0 {
      return Err(ScholarError::Config("search.lookback_days must be at least 1".into()));
    }
    if self.search.weekly_window_days == 0 {
      return Err(ScholarError::Config("search.weekly_window_days must be at least 1".into()));
    }
    Ok(())
  }

  /// Points the client at a different Atom endpoint and source prefix.
  pub fn with_base_urls(mut self, base_url: &str, source_base_url: &str) -> Self {
    self.catalog.base_url = base_url.to_string();
    self.catalog.source_base_url = source_base_url.to_string();
    self
  }

  /// Sets the minimum delay between requests.
  pub fn with_delay_seconds(mut self, delay_seconds: u64) -> Self {
    self.catalog.delay_seconds = delay_seconds;
    self
  }

  /// Sets the page size used while paging through results.
  pub fn with_page_size(mut self, page_size: usize) -> Self {
    self.catalog.page_size = page_size;
    self
  }

  /// Caps the combined size of extracted sources.
  pub fn with_max_source_bytes(mut self, max_bytes: u64) -> Self {
    self.source.max_bytes = Some(max_bytes);
    self
  }

  /// Creates scoped download directories under `temp_root` instead of the system temp dir.
  pub fn with_temp_root(mut self, temp_root: &Path) -> Self {
    self.source.temp_root = Some(temp_root.to_path_buf());
    self
  }
}
