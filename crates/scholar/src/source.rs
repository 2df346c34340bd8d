//! Source bundle extraction.
//!
//! arXiv publishes a paper's typesetting sources as a gzip-compressed tar. Only
//! the LaTeX and BibTeX members are of interest; they are read in archive order
//! and concatenated, each followed by a newline.

use std::{fs::File, io::Read};

use flate2::read::GzDecoder;
use tar::{Archive, EntryType};

use super::*;

/// Member name suffixes that are kept.
pub const SOURCE_SUFFIXES: [&str; 2] = [".tex", ".bib"];

/// Whether an archive member with this name and type belongs in the combined source.
///
/// # Examples
///
/// ```
/// use scholar::source::is_source_member;
/// use tar::EntryType;
///
/// assert!(is_source_member("paper/intro.tex", EntryType::Regular));
/// assert!(is_source_member("refs.bib", EntryType::Regular));
/// assert!(!is_source_member("figure.png", EntryType::Regular));
/// assert!(!is_source_member("chapters.tex", EntryType::Directory));
/// ```
pub fn is_source_member(name: &str, entry_type: EntryType) -> bool {
  entry_type.is_file() && SOURCE_SUFFIXES.iter().any(|suffix| name.ends_with(suffix))
}

/// Reads a gzip-compressed tar from `reader` and concatenates its source members.
///
/// When `max_bytes` is set, no member is read past the remaining budget: extraction stops
/// with [`ScholarError::SourceTooLarge`] as soon as the combined output would exceed it.
/// Member contents that are not valid UTF-8 are decoded lossily.
pub fn extract_sources<R: Read>(reader: R, max_bytes: Option<u64>) -> Result<String> {
  let mut archive = Archive::new(GzDecoder::new(reader));
  let mut combined = String::new();
  let mut selected = 0usize;

  for entry in archive.entries().map_err(ScholarError::Archive)? {
    let mut entry = entry.map_err(ScholarError::Archive)?;
    let name = entry.path().map_err(ScholarError::Archive)?.to_string_lossy().into_owned();
    if !is_source_member(&name, entry.header().entry_type()) {
      trace!("Skipping archive member {name}");
      continue;
    }

    let mut bytes = Vec::new();
    match max_bytes {
      Some(limit) => {
        let remaining = limit.saturating_sub(combined.len() as u64);
        (&mut entry)
          .take(remaining.saturating_add(1))
          .read_to_end(&mut bytes)
          .map_err(ScholarError::Archive)?;
        if bytes.len() as u64 > remaining {
          debug!("Source member {name} overruns the {limit} byte cap");
          return Err(ScholarError::SourceTooLarge(limit));
        }
      },
      None => {
        entry.read_to_end(&mut bytes).map_err(ScholarError::Archive)?;
      },
    }
    combined.push_str(&String::from_utf8_lossy(&bytes));
    combined.push('\n');
    selected += 1;

    if let Some(limit) = max_bytes {
      if combined.len() as u64 > limit {
        return Err(ScholarError::SourceTooLarge(limit));
      }
    }
  }

  debug!("Extracted {selected} source files, {} bytes combined", combined.len());
  Ok(combined)
}

/// Opens the bundle stored at `path` and concatenates its source members.
pub fn extract_sources_from_path(path: &Path, max_bytes: Option<u64>) -> Result<String> {
  let file = File::open(path).map_err(ScholarError::Archive)?;
  if file.metadata().map_err(ScholarError::Archive)?.len() == 0 {
    return Err(ScholarError::Archive(std::io::Error::new(
      std::io::ErrorKind::UnexpectedEof,
      "source bundle is empty",
    )));
  }
  extract_sources(file, max_bytes)
}
