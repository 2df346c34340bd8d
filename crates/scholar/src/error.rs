//! Error types for the scholar library.
//!
//! Every failure is surfaced to the caller as-is; nothing in this crate catches and
//! retries a fault. An empty search is not an error and is reported as `Ok(vec![])`.
//!
//! # Examples
//!
//! ```no_run
//! use scholar::{error::ScholarError, ArxivClient, Config, Tools};
//!
//! # async fn example() -> Result<(), ScholarError> {
//! let config = Config::default();
//! let tools = Tools::new(ArxivClient::new(&config.catalog)?, config);
//! match tools.download_arxiv_paper("9999.99999").await {
//!   Err(ScholarError::NotFound(id)) => println!("nothing published as {id}"),
//!   Err(ScholarError::Archive(e)) => println!("source bundle unreadable: {e}"),
//!   Err(e) => println!("other error: {e}"),
//!   Ok(source) => println!("{source}"),
//! }
//! # Ok(())
//! # }
//! ```

use thiserror::Error;

/// Error type alias used for the [`scholar`](crate) crate.
pub type Result<T> = core::result::Result<T, ScholarError>;

/// Errors that can occur while querying arXiv or unpacking a paper's sources.
#[derive(Error, Debug)]
pub enum ScholarError {
  /// The provided paper identifier doesn't match an arXiv identifier format.
  ///
  /// Accepted shapes are `YYMM.NNNN`, `YYMM.NNNNN` and `archive/NNNNNNN` (old style,
  /// optionally with a subject class such as `math.AG/0601001`), each with an optional
  /// version suffix.
  #[error("Invalid arXiv identifier: {0}")]
  InvalidIdentifier(String),

  /// The identifier is well formed but arXiv has no paper under it.
  #[error("No arXiv paper found for identifier {0}")]
  NotFound(String),

  /// A network request failed or returned a non-success status.
  #[error(transparent)]
  Network(#[from] reqwest::Error),

  /// arXiv answered with an error entry instead of results.
  ///
  /// The string carries the explanation arXiv placed in the entry summary.
  #[error("arXiv API error: {0}")]
  Api(String),

  /// The Atom feed returned by arXiv could not be deserialized.
  #[error("Failed to parse arXiv feed: {0}")]
  Feed(#[from] quick_xml::DeError),

  /// The downloaded source bundle is missing, empty, or not a gzip-compressed tar.
  #[error("Unreadable source archive: {0}")]
  Archive(#[source] std::io::Error),

  /// The selected source files exceed the configured `source.max_bytes` cap.
  #[error("Combined source exceeds the configured limit of {0} bytes")]
  SourceTooLarge(u64),

  /// A local filesystem operation failed, typically creating or writing the
  /// temporary download directory.
  #[error(transparent)]
  Io(#[from] std::io::Error),

  /// The configuration file is not valid TOML for [`Config`](crate::Config).
  #[error(transparent)]
  TomlDe(#[from] toml::de::Error),

  /// The configuration is structurally valid but unusable.
  #[error("{0}")]
  Config(String),
}
