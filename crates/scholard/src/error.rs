//! Error type for the `scholar` command line tool.

use thiserror::Error;

use super::*;

/// Error type alias used for the CLI.
pub type Result<T> = core::result::Result<T, ScholardError>;

/// Errors that can end a CLI invocation.
#[derive(Error, Debug)]
pub enum ScholardError {
  /// A handler or the configuration failed.
  #[error(transparent)]
  Scholar(#[from] ScholarError),

  /// Writing output failed.
  #[error(transparent)]
  Io(#[from] std::io::Error),

  /// Results could not be rendered as JSON.
  #[error(transparent)]
  Json(#[from] serde_json::Error),
}
