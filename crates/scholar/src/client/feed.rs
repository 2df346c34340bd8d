//! Deserialization of arXiv's Atom feed.

use super::*;

/// Prefix arXiv uses for the id of an entry that reports a malformed request.
const ERROR_ENTRY_PREFIX: &str = "http://arxiv.org/api/errors";

/// Internal representation of the arXiv API's Atom feed response.
#[derive(Debug, Deserialize)]
pub(super) struct Feed {
  /// A page of results, absent entirely when nothing matched
  #[serde(rename = "entry", default)]
  pub entries: Vec<Entry>,
}

/// One `<entry>` of the feed.
///
/// Everything but the id is optional here: arXiv answers lookups of unknown
/// identifiers with an entry that carries little more than an id.
#[derive(Debug, Deserialize)]
pub(super) struct Entry {
  /// Entry URL, e.g. `http://arxiv.org/abs/2301.07041v2`
  id:         String,
  /// Paper title, may span several lines
  #[serde(default)]
  title:      Option<String>,
  /// Abstract
  #[serde(default)]
  summary:    Option<String>,
  /// Submission timestamp of the first version
  #[serde(default)]
  published:  Option<DateTime<Utc>>,
  /// Authors in listed order
  #[serde(rename = "author", default)]
  authors:    Vec<Author>,
  /// Category tags
  #[serde(rename = "category", default)]
  categories: Vec<Category>,
}

/// An `<author>` element.
#[derive(Debug, Deserialize)]
struct Author {
  /// Display name
  name: String,
}

/// A `<category>` element.
#[derive(Debug, Deserialize)]
struct Category {
  /// Category tag, e.g. `cs.CR`
  #[serde(rename = "@term")]
  term: String,
}

impl Feed {
  /// Parses a raw Atom document.
  pub fn parse(xml: &str) -> Result<Self> { Ok(quick_xml::de::from_str(xml)?) }

  /// Converts every resolved entry into a [`PaperRecord`].
  ///
  /// Error entries abort the conversion, placeholder entries are dropped.
  pub fn into_records(self) -> Result<Vec<PaperRecord>> {
    let mut records = Vec::with_capacity(self.entries.len());
    for entry in self.entries {
      if entry.id.starts_with(ERROR_ENTRY_PREFIX) {
        return Err(ScholarError::Api(
          entry.summary.map(|s| s.trim().to_string()).unwrap_or(entry.id),
        ));
      }
      match entry.into_record() {
        Some(record) => records.push(record),
        None => warn!("Skipping unresolved arXiv entry"),
      }
    }
    Ok(records)
  }
}

impl Entry {
  /// Builds a record, or `None` for the placeholder arXiv returns for unknown ids.
  fn into_record(self) -> Option<PaperRecord> {
    let published = self.published?;
    let title = self.title.filter(|t| !t.trim().is_empty())?;

    Some(PaperRecord {
      title: title.split_whitespace().collect::<Vec<_>>().join(" "),
      summary: self.summary.unwrap_or_default().trim().to_string(),
      published,
      entry_id: self.id.trim().to_string(),
      authors: self.authors.into_iter().map(|a| a.name.trim().to_string()).collect(),
      categories: self.categories.into_iter().map(|c| c.term).collect(),
    })
  }
}
