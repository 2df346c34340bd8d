//! Subcommands of the `scholar` CLI, one per handler.

use clap::Subcommand;

use super::*;

pub mod download;
pub mod search;
pub mod today;
pub mod weekly;

pub use download::download;
pub use search::search;
pub use today::today;
pub use weekly::weekly;

/// Available commands for the CLI
#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
  /// List papers submitted to a category today, or on the most recent day that has any
  Today {
    /// arXiv category, e.g. "cs.CR" or "math.NT"
    category: String,
  },

  /// List papers submitted to a category over the last seven days
  Weekly {
    /// arXiv category, e.g. "cs.CR" or "math.NT"
    category: String,
  },

  /// Search arXiv, ranked by relevance
  Search {
    /// Query in arXiv syntax, passed through unchanged
    /// Examples: "all:lattice", "ti:\"zero knowledge\" AND cat:cs.CR"
    query: String,
  },

  /// Fetch a paper's LaTeX and BibTeX sources as one text
  Download {
    /// arXiv identifier
    /// Examples: "2301.07041", "2301.07041v2", "math.AG/0601001"
    paper_id: String,

    /// Write the sources to this file instead of stdout
    #[arg(long, short)]
    output: Option<PathBuf>,
  },
}
