//! The four request handlers.
//!
//! [`Tools`] owns one long-lived [`Catalog`] and answers:
//!
//! - [`Tools::today_arxiv`]: a category's submissions for today, stepping back a day at a time
//!   through the lookback window until something turns up
//! - [`Tools::weekly_arxiv`]: a category's submissions over the last seven days
//! - [`Tools::search_arxiv`]: a relevance-ranked free-text search
//! - [`Tools::download_arxiv_paper`]: a paper's `.tex` and `.bib` sources as one string
//!
//! Each call is independent: no state is carried between calls apart from the
//! catalog client's request throttle.

use tempfile::TempDir;

use super::*;
use crate::{
  config::{SearchConfig, SourceConfig},
  source::extract_sources_from_path,
};

/// File name the source bundle is stored under inside the scoped download directory.
const BUNDLE_FILE_NAME: &str = "source.tar.gz";

/// Request handlers over a shared catalog.
///
/// # Examples
///
/// ```no_run
/// use scholar::{ArxivClient, Config, Tools};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Config::default();
/// let tools = Tools::new(ArxivClient::new(&config.catalog)?, config);
///
/// let week = tools.weekly_arxiv("cs.CR").await?;
/// let hits = tools.search_arxiv("ti:\"homomorphic encryption\"").await?;
/// println!("{} new this week, {} matches", week.len(), hits.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Tools<C = ArxivClient> {
  /// Catalog every handler queries
  catalog: C,
  /// Result caps and date windows
  search:  SearchConfig,
  /// Source fetch settings
  source:  SourceConfig,
}

impl<C: Catalog> Tools<C> {
  /// Creates handlers over `catalog` using the `[search]` and `[source]` settings of `config`.
  pub fn new(catalog: C, config: Config) -> Self {
    Self { catalog, search: config.search, source: config.source }
  }

  /// Papers submitted to `category` on the current UTC day.
  ///
  /// See [`Tools::today_arxiv_on`].
  pub async fn today_arxiv(&self, category: &str) -> Result<Vec<NormalizedResult>> {
    self.today_arxiv_on(category, Utc::now().date_naive()).await
  }

  /// Papers submitted to `category` on `today`, or on the most recent earlier day with any.
  ///
  /// Makes at most `lookback_days` attempts (`today`, the day before, and so on), each for a
  /// single calendar day and capped at `today_max_results` records sorted by submission date.
  /// The first non-empty attempt is returned. When every attempt comes back empty the result
  /// is an empty list, not an error.
  pub async fn today_arxiv_on(
    &self,
    category: &str,
    today: NaiveDate,
  ) -> Result<Vec<NormalizedResult>> {
    let mut window = DateWindow::single(today);
    let mut attempt = 0;
    let mut results = Vec::new();

    while attempt < self.search.lookback_days && results.is_empty() {
      let query = SearchQuery::new(window.category_query(category))
        .with_max_results(self.search.today_max_results)
        .sorted_by(SortCriterion::SubmittedDate);
      debug!(
        "today_arxiv attempt {}/{} for {category} on {}",
        attempt + 1,
        self.search.lookback_days,
        window.start
      );

      results = fetch_results(&self.catalog, &query).await?;
      window = window.shifted_back(1);
      attempt += 1;
    }

    info!("today_arxiv found {} papers in {category} after {attempt} attempts", results.len());
    Ok(results)
  }

  /// Papers submitted to `category` during the week ending on the current UTC day.
  ///
  /// See [`Tools::weekly_arxiv_on`].
  pub async fn weekly_arxiv(&self, category: &str) -> Result<Vec<NormalizedResult>> {
    self.weekly_arxiv_on(category, Utc::now().date_naive()).await
  }

  /// Papers submitted to `category` in the inclusive `weekly_window_days` window ending on
  /// `today`, capped at `weekly_max_results` and sorted by submission date. Single attempt.
  pub async fn weekly_arxiv_on(
    &self,
    category: &str,
    today: NaiveDate,
  ) -> Result<Vec<NormalizedResult>> {
    let window = DateWindow::ending(today, self.search.weekly_window_days);
    let query = SearchQuery::new(window.category_query(category))
      .with_max_results(self.search.weekly_max_results)
      .sorted_by(SortCriterion::SubmittedDate);

    let results = fetch_results(&self.catalog, &query).await?;
    info!(
      "weekly_arxiv found {} papers in {category} from {} to {}",
      results.len(),
      window.start,
      window.end
    );
    Ok(results)
  }

  /// Relevance-ranked search with `query` passed to arXiv verbatim, capped at
  /// `search_max_results`.
  pub async fn search_arxiv(&self, query: &str) -> Result<Vec<NormalizedResult>> {
    let search = SearchQuery::new(query)
      .with_max_results(self.search.search_max_results)
      .sorted_by(SortCriterion::Relevance);

    let results = fetch_results(&self.catalog, &search).await?;
    info!("search_arxiv found {} papers for {query:?}", results.len());
    Ok(results)
  }

  /// Downloads the source bundle of `paper_id` and returns its `.tex` and `.bib` files
  /// concatenated in archive order, each followed by a newline.
  ///
  /// The bundle lives in a temporary directory that is removed before this returns, whether
  /// it succeeds or fails.
  ///
  /// # Errors
  ///
  /// - [`ScholarError::InvalidIdentifier`] if `paper_id` is not an arXiv identifier
  /// - [`ScholarError::NotFound`] if arXiv has no paper under it
  /// - [`ScholarError::Network`] if the lookup or the download fails
  /// - [`ScholarError::Archive`] if the bundle is not a readable gzip-compressed tar
  /// - [`ScholarError::SourceTooLarge`] if a `max_bytes` cap is configured and exceeded
  pub async fn download_arxiv_paper(&self, paper_id: &str) -> Result<String> {
    let paper_id = parse_identifier(paper_id)?;

    let record = self
      .catalog
      .results(&SearchQuery::by_id(paper_id))
      .await?
      .into_iter()
      .next()
      .ok_or_else(|| ScholarError::NotFound(paper_id.to_string()))?;
    debug!("Resolved {paper_id} to {}", record.entry_id);

    let dir = self.scoped_temp_dir()?;
    let bundle = dir.path().join(BUNDLE_FILE_NAME);
    self.catalog.download_source(&record, &bundle).await?;
    let combined = extract_sources_from_path(&bundle, self.source.max_bytes)?;

    info!("Fetched {} bytes of source for {paper_id}", combined.len());
    Ok(combined)
  }

  /// A fresh temporary directory, deleted when the returned guard drops.
  fn scoped_temp_dir(&self) -> Result<TempDir> {
    let mut builder = tempfile::Builder::new();
    builder.prefix("scholar-");
    let dir = match &self.source.temp_root {
      Some(root) => builder.tempdir_in(root)?,
      None => builder.tempdir()?,
    };
    trace!("Created scoped download directory {}", dir.path().display());
    Ok(dir)
  }
}
