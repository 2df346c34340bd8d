//! Access to the arXiv catalog.
//!
//! Handlers talk to arXiv only through the [`Catalog`] trait, so one long-lived
//! client can be shared by every handler and tests can swap in a stub. The
//! production implementation is [`ArxivClient`], which speaks the Atom API at
//! `export.arxiv.org`.
//!
//! # Examples
//!
//! ```no_run
//! use scholar::{
//!   config::CatalogConfig,
//!   query::{SearchQuery, SortCriterion},
//!   ArxivClient, Catalog,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ArxivClient::new(&CatalogConfig::default())?;
//! let query =
//!   SearchQuery::new("cat:cs.CR").with_max_results(25).sorted_by(SortCriterion::SubmittedDate);
//! for record in client.results(&query).await? {
//!   println!("{}: {}", record.short_id(), record.title);
//! }
//! # Ok(())
//! # }
//! ```

use std::{sync::Arc, time::Duration};

use tokio::{
  sync::Mutex,
  time::{sleep, Instant},
};

use super::*;
use crate::config::CatalogConfig;

mod feed;

use feed::Feed;

/// A searchable catalog of papers that can also hand out source bundles.
#[async_trait]
pub trait Catalog: Send + Sync {
  /// Runs `query` and returns up to `query.max_results` records in the catalog's order.
  async fn results(&self, query: &SearchQuery) -> Result<Vec<PaperRecord>>;

  /// Downloads the packaged source bundle of `record` to the file `dest`.
  async fn download_source(&self, record: &PaperRecord, dest: &Path) -> Result<()>;
}

#[async_trait]
impl<C: Catalog + ?Sized> Catalog for Arc<C> {
  async fn results(&self, query: &SearchQuery) -> Result<Vec<PaperRecord>> {
    (**self).results(query).await
  }

  async fn download_source(&self, record: &PaperRecord, dest: &Path) -> Result<()> {
    (**self).download_source(record, dest).await
  }
}

/// Client for the arXiv Atom API.
///
/// Requests made through one client are spaced at least `delay_seconds` apart,
/// whichever handler issues them. Searches are paged `page_size` entries at a time until
/// `max_results` records are collected, a page comes back short, or a page holds nothing
/// but placeholders.
#[derive(Debug)]
pub struct ArxivClient {
  /// Internal web client used to connect to the API.
  client:          reqwest::Client,
  /// Atom query endpoint
  base_url:        String,
  /// Prefix for source bundle downloads
  source_base_url: String,
  /// Entries requested per page
  page_size:       usize,
  /// Minimum spacing between requests
  delay:           Duration,
  /// When the previous request went out
  last_request:    Mutex<Option<Instant>>,
}

impl ArxivClient {
  /// Creates a client from the `[catalog]` section of the configuration.
  pub fn new(config: &CatalogConfig) -> Result<Self> {
    let mut builder =
      reqwest::Client::builder().user_agent(concat!("scholar/", env!("CARGO_PKG_VERSION")));
    if let Some(timeout) = config.timeout_seconds {
      builder = builder.timeout(Duration::from_secs(timeout));
    }

    Ok(Self {
      client:          builder.build()?,
      base_url:        config.base_url.clone(),
      source_base_url: config.source_base_url.trim_end_matches('/').to_string(),
      page_size:       config.page_size.max(1),
      delay:           Duration::from_secs(config.delay_seconds),
      last_request:    Mutex::new(None),
    })
  }

  /// Waits until the configured delay since the previous request has passed.
  async fn throttle(&self) {
    let mut last = self.last_request.lock().await;
    if let Some(previous) = *last {
      let elapsed = previous.elapsed();
      if elapsed < self.delay {
        trace!("Throttling arXiv request for {:?}", self.delay - elapsed);
        sleep(self.delay - elapsed).await;
      }
    }
    *last = Some(Instant::now());
  }

  /// Fetches one page of results starting at offset `start`.
  ///
  /// Returns the number of entries on the page alongside the resolved records,
  /// since placeholder entries are dropped during conversion.
  async fn fetch_page(
    &self,
    query: &SearchQuery,
    start: usize,
    max_results: usize,
  ) -> Result<(usize, Vec<PaperRecord>)> {
    let mut params = Vec::with_capacity(6);
    if !query.query.is_empty() {
      params.push(("search_query", query.query.clone()));
    }
    if !query.id_list.is_empty() {
      params.push(("id_list", query.id_list.join(",")));
    }
    params.push(("sortBy", query.sort_by.as_api_str().to_string()));
    params.push(("sortOrder", query.sort_order.as_api_str().to_string()));
    params.push(("start", start.to_string()));
    params.push(("max_results", max_results.to_string()));

    self.throttle().await;
    debug!("Fetching from arXiv via: {} {:?}", self.base_url, params);

    let response = self.client.get(&self.base_url).query(&params).send().await?;
    let body = response.error_for_status()?.text().await?;
    trace!("arXiv response: {} bytes", body.len());

    let feed = Feed::parse(&body)?;
    let fetched = feed.entries.len();
    Ok((fetched, feed.into_records()?))
  }
}

#[async_trait]
impl Catalog for ArxivClient {
  async fn results(&self, query: &SearchQuery) -> Result<Vec<PaperRecord>> {
    let mut records = Vec::new();
    let mut start = 0;

    while records.len() < query.max_results {
      let wanted = self.page_size.min(query.max_results - records.len());
      let (fetched, page) = self.fetch_page(query, start, wanted).await?;
      debug!("Page at offset {start} returned {fetched} entries, {} usable", page.len());
      // A short page ends the listing; a page of placeholders only would repeat forever.
      let exhausted = fetched < wanted || page.is_empty();
      records.extend(page);
      if exhausted {
        break;
      }
      start += fetched;
    }

    records.truncate(query.max_results);
    Ok(records)
  }

  async fn download_source(&self, record: &PaperRecord, dest: &Path) -> Result<()> {
    let url = format!("{}/{}", self.source_base_url, record.short_id());

    self.throttle().await;
    debug!("Downloading source bundle via: {url}");

    let response = self.client.get(&url).send().await?;
    let bytes = response.error_for_status()?.bytes().await?;
    trace!("Writing {} byte source bundle to {}", bytes.len(), dest.display());
    tokio::fs::write(dest, &bytes).await?;
    Ok(())
  }
}
