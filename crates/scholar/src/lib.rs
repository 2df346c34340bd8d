//! arXiv listing queries and paper source retrieval.
//!
//! `scholar` exposes a small set of tools an agent (or a person at a terminal) can use to
//! look at what is happening on arXiv:
//!
//! - Papers submitted to a category today, falling back a day at a time over the last week
//! - Papers submitted to a category over the last seven days
//! - Relevance-ranked free-text search
//! - The LaTeX and BibTeX sources of a single paper, concatenated into one string
//!
//! # Getting Started
//!
//! ```no_run
//! use scholar::{prelude::*, ArxivClient, Config, Tools};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!   let config = Config::load_or_default(Config::default_path())?;
//!   let tools = Tools::new(ArxivClient::new(&config.catalog)?, config);
//!
//!   for paper in tools.today_arxiv("cs.CR").await? {
//!     println!("{} ({})", paper.title, paper.id);
//!   }
//!
//!   let source = tools.download_arxiv_paper("2301.07041").await?;
//!   println!("{} bytes of LaTeX", source.len());
//!   Ok(())
//! }
//! ```
//!
//! # Module Organization
//!
//! - [`client`]: The [`Catalog`] seam and the arXiv Atom API client behind it
//! - [`query`]: Search parameters and the `submittedDate` window syntax
//! - [`record`]: Raw catalog records and the flattened results handed back to callers
//! - [`source`]: Source bundle member selection and extraction
//! - [`tools`]: The four request handlers
//! - [`config`]: TOML configuration
//! - [`error`]: The crate error type

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};
#[cfg(test)] use tracing_test::traced_test;

pub mod client;
pub mod config;
pub mod error;
pub mod query;
pub mod record;
pub mod source;
pub mod tools;

pub use crate::{
  client::{ArxivClient, Catalog},
  config::Config,
  tools::Tools,
};
use crate::{error::*, query::*, record::*};

/// Common traits and types for ergonomic imports.
///
/// ```no_run
/// use scholar::prelude::*;
///
/// fn describe(err: &ScholarError) -> String { err.to_string() }
/// ```
pub mod prelude {
  pub use crate::{
    client::Catalog,
    error::ScholarError,
    record::NormalizedResult,
  };
}
