//! Catalog records and the flattened results handed back to callers.
//!
//! [`PaperRecord`] is what a [`Catalog`](crate::Catalog) yields for each matching
//! paper. Handlers never expose it directly; [`fetch_results`] runs a query and
//! flattens every record into a [`NormalizedResult`], keeping the catalog's order.

use super::*;

lazy_static! {
  /// New style identifiers, e.g. `2301.07041` or `0704.0001v2`
  static ref ARXIV_NEW: Regex = Regex::new(r"^\d{4}\.\d{4,5}(v\d+)?$").unwrap();
  /// Old style identifiers, e.g. `hep-th/9901001` or `math.AG/0601001v1`
  static ref ARXIV_OLD: Regex = Regex::new(r"^[a-zA-Z-]+(\.[a-zA-Z-]+)?/\d{7}(v\d+)?$").unwrap();
}

/// A paper as returned by the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaperRecord {
  /// Paper title with whitespace runs collapsed
  pub title:      String,
  /// Abstract text
  pub summary:    String,
  /// Timestamp of the first version
  pub published:  DateTime<Utc>,
  /// Canonical entry identifier, e.g. `http://arxiv.org/abs/2301.07041v2`
  pub entry_id:   String,
  /// Author display names in listed order
  pub authors:    Vec<String>,
  /// Category tags, primary category first as arXiv lists them
  pub categories: Vec<String>,
}

/// The six-field flattened view of a [`PaperRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedResult {
  /// Paper title
  pub title:      String,
  /// Abstract text
  pub summary:    String,
  /// Timestamp of the first version
  pub published:  DateTime<Utc>,
  /// Canonical entry identifier
  pub id:         String,
  /// Author display names
  pub authors:    Vec<String>,
  /// Category tags
  pub categories: Vec<String>,
}

impl PaperRecord {
  /// The identifier without the `abs` URL prefix, version suffix included.
  ///
  /// ```
  /// # use scholar::record::PaperRecord;
  /// # let mut record = PaperRecord {
  /// #   title: String::new(), summary: String::new(), published: chrono::Utc::now(),
  /// #   entry_id: String::new(), authors: vec![], categories: vec![],
  /// # };
  /// record.entry_id = "http://arxiv.org/abs/math.AG/0601001v1".into();
  /// assert_eq!(record.short_id(), "math.AG/0601001v1");
  /// ```
  pub fn short_id(&self) -> &str {
    match self.entry_id.split_once("/abs/") {
      Some((_, id)) => id,
      None => &self.entry_id,
    }
  }
}

impl From<PaperRecord> for NormalizedResult {
  fn from(record: PaperRecord) -> Self {
    Self {
      title:      record.title,
      summary:    record.summary,
      published:  record.published,
      id:         record.entry_id,
      authors:    record.authors,
      categories: record.categories,
    }
  }
}

/// Runs `query` against `catalog` and flattens every record, preserving order.
///
/// No deduplication or filtering happens here; faults from the catalog propagate unchanged.
pub async fn fetch_results<C>(catalog: &C, query: &SearchQuery) -> Result<Vec<NormalizedResult>>
where C: Catalog + ?Sized {
  let records = catalog.results(query).await?;
  trace!("Normalizing {} records", records.len());
  Ok(records.into_iter().map(NormalizedResult::from).collect())
}

/// Checks that `input` looks like an arXiv identifier and returns it trimmed.
///
/// # Examples
///
/// ```
/// use scholar::record::parse_identifier;
///
/// assert_eq!(parse_identifier(" 2301.07041 ").unwrap(), "2301.07041");
/// assert!(parse_identifier("hep-th/9901001").is_ok());
/// assert!(parse_identifier("not an id").is_err());
/// ```
pub fn parse_identifier(input: &str) -> Result<&str> {
  let id = input.trim();
  if ARXIV_NEW.is_match(id) || ARXIV_OLD.is_match(id) {
    Ok(id)
  } else {
    Err(ScholarError::InvalidIdentifier(input.to_string()))
  }
}
