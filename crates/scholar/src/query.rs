//! Search parameters understood by the arXiv Atom API.
//!
//! A [`SearchQuery`] is built fresh for every handler call and handed to a
//! [`Catalog`](crate::Catalog). Date restricted listings are expressed with a
//! [`DateWindow`], which renders arXiv's `submittedDate` range syntax:
//!
//! ```
//! use chrono::NaiveDate;
//! use scholar::query::DateWindow;
//!
//! let day = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
//! assert_eq!(
//!   DateWindow::single(day).category_query("cs.CR"),
//!   "cat:cs.CR AND submittedDate:[202403070000 TO 202403072359]"
//! );
//! ```

use super::*;

/// Ordering of search results, mapped onto arXiv's `sortBy` parameter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortCriterion {
  /// Most relevant to the query first
  #[default]
  Relevance,
  /// By date of the latest version
  LastUpdatedDate,
  /// By date of the first version
  SubmittedDate,
}

/// Direction of the sort, mapped onto arXiv's `sortOrder` parameter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
  /// Oldest or least relevant first
  Ascending,
  /// Newest or most relevant first
  #[default]
  Descending,
}

impl SortCriterion {
  /// The value arXiv expects for `sortBy`.
  pub fn as_api_str(&self) -> &'static str {
    match self {
      SortCriterion::Relevance => "relevance",
      SortCriterion::LastUpdatedDate => "lastUpdatedDate",
      SortCriterion::SubmittedDate => "submittedDate",
    }
  }
}

impl SortOrder {
  /// The value arXiv expects for `sortOrder`.
  pub fn as_api_str(&self) -> &'static str {
    match self {
      SortOrder::Ascending => "ascending",
      SortOrder::Descending => "descending",
    }
  }
}

/// One search against the catalog.
///
/// # Examples
///
/// ```
/// use scholar::query::{SearchQuery, SortCriterion};
///
/// let query = SearchQuery::new("all:transformer")
///   .with_max_results(50)
///   .sorted_by(SortCriterion::Relevance);
/// assert_eq!(query.max_results, 50);
///
/// let lookup = SearchQuery::by_id("2301.07041");
/// assert_eq!(lookup.id_list, vec!["2301.07041".to_string()]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
  /// arXiv search expression, passed through as `search_query`
  pub query:       String,
  /// Explicit identifiers to restrict the search to, passed as `id_list`
  pub id_list:     Vec<String>,
  /// Upper bound on the number of records returned
  pub max_results: usize,
  /// Result ordering
  pub sort_by:     SortCriterion,
  /// Result ordering direction
  pub sort_order:  SortOrder,
}

impl SearchQuery {
  /// Creates a query for a search expression with arXiv's default of ten results.
  pub fn new(query: impl Into<String>) -> Self {
    Self {
      query:       query.into(),
      id_list:     Vec::new(),
      max_results: 10,
      sort_by:     SortCriterion::default(),
      sort_order:  SortOrder::default(),
    }
  }

  /// Creates a query resolving exactly one paper by identifier.
  pub fn by_id(identifier: impl Into<String>) -> Self {
    Self { id_list: vec![identifier.into()], max_results: 1, ..Self::new("") }
  }

  /// Caps the number of records returned.
  pub fn with_max_results(mut self, max_results: usize) -> Self {
    self.max_results = max_results;
    self
  }

  /// Sets the sort criterion, keeping the current direction.
  pub fn sorted_by(mut self, sort_by: SortCriterion) -> Self {
    self.sort_by = sort_by;
    self
  }

  /// Sets the sort direction.
  pub fn with_sort_order(mut self, sort_order: SortOrder) -> Self {
    self.sort_order = sort_order;
    self
  }
}

/// An inclusive range of UTC calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
  /// First day, searched from 00:00
  pub start: NaiveDate,
  /// Last day, searched through 23:59
  pub end:   NaiveDate,
}

impl DateWindow {
  /// A window covering just `day`.
  pub fn single(day: NaiveDate) -> Self { Self { start: day, end: day } }

  /// A window of `days` calendar days ending on (and including) `end`.
  ///
  /// `days` is clamped to at least one.
  pub fn ending(end: NaiveDate, days: u32) -> Self {
    let span = chrono::Days::new(u64::from(days.max(1) - 1));
    Self { start: end.checked_sub_days(span).unwrap_or(NaiveDate::MIN), end }
  }

  /// The same window moved `days` days into the past.
  pub fn shifted_back(&self, days: u32) -> Self {
    let span = chrono::Days::new(u64::from(days));
    Self {
      start: self.start.checked_sub_days(span).unwrap_or(NaiveDate::MIN),
      end:   self.end.checked_sub_days(span).unwrap_or(NaiveDate::MIN),
    }
  }

  /// Whether `timestamp` falls on one of the days of this window.
  pub fn contains(&self, timestamp: &DateTime<Utc>) -> bool {
    let day = timestamp.date_naive();
    self.start <= day && day <= self.end
  }

  /// arXiv's `submittedDate:[YYYYMMDD0000 TO YYYYMMDD2359]` clause for this window.
  pub fn submitted_date_clause(&self) -> String {
    format!(
      "submittedDate:[{}0000 TO {}2359]",
      self.start.format("%Y%m%d"),
      self.end.format("%Y%m%d")
    )
  }

  /// Full search expression restricting `category` to this window.
  pub fn category_query(&self, category: &str) -> String {
    format!("cat:{} AND {}", category, self.submitted_date_clause())
  }
}
