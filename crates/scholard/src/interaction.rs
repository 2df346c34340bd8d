//! Rendering of command results to the terminal.

use std::io::Write;

use super::*;

/// Prefix for information messages
pub static INFO_PREFIX: &str = "ℹ ";
/// Prefix for success messages
pub static SUCCESS_PREFIX: &str = "✓ ";
/// Prefix for error messages
pub static ERROR_PREFIX: &str = "✗ ";
/// Branch for every list item but the last
pub static ITEM_PREFIX: &str = "├─";
/// Branch for the last list item
pub static LAST_ITEM_PREFIX: &str = "└─";
/// Continuation line under a list item
pub static CONTINUE_PREFIX: &str = "│  ";
/// Continuation line under the last list item
pub static LAST_CONTINUE_PREFIX: &str = "   ";

/// Something a command wants shown to the user.
#[derive(Debug)]
pub enum ResponseContent<'a> {
  /// Papers returned by a listing or search handler
  Papers(&'a [NormalizedResult]),
  /// Combined LaTeX and BibTeX text of a paper
  Source(&'a str),
  /// Completion notice
  Success(&'a str),
  /// Progress or context notice
  Info(&'a str),
}

/// Output surface of the CLI.
pub trait UserInteraction {
  /// Shows `content` to the user.
  fn reply(&self, content: ResponseContent) -> Result<()>;

  /// Reports an error that ended the command.
  fn report(&self, error: &ScholardError);
}

/// Styled or JSON output on the process's standard streams.
#[derive(Debug, Clone, Copy)]
pub struct Terminal {
  /// Emit JSON on stdout instead of styled text
  json: bool,
}

impl Terminal {
  /// Creates a terminal writer, in JSON mode when `json` is set.
  pub fn new(json: bool) -> Self { Self { json } }

  /// Writes a tree-style summary of `papers` to `out`.
  fn render_papers(out: &mut impl Write, papers: &[NormalizedResult]) -> std::io::Result<()> {
    writeln!(out, "{} Found {} papers", style(INFO_PREFIX).cyan(), papers.len())?;
    for (index, paper) in papers.iter().enumerate() {
      let last = index + 1 == papers.len();
      let (branch, cont) =
        if last { (LAST_ITEM_PREFIX, LAST_CONTINUE_PREFIX) } else { (ITEM_PREFIX, CONTINUE_PREFIX) };

      writeln!(out, "{} {}", style(branch).dim(), style(&paper.title).white().bold())?;
      writeln!(out, "{} {} {}", style(cont).dim(), style("Id:").green(), style(&paper.id).blue())?;
      writeln!(
        out,
        "{} {} {}",
        style(cont).dim(),
        style("Authors:").green(),
        paper.authors.join(", ")
      )?;
      writeln!(
        out,
        "{} {} {}  {} {}",
        style(cont).dim(),
        style("Published:").green(),
        paper.published.format("%Y-%m-%d %H:%M UTC"),
        style("Categories:").green(),
        style(paper.categories.join(", ")).yellow()
      )?;
    }
    Ok(())
  }
}

impl UserInteraction for Terminal {
  fn reply(&self, content: ResponseContent) -> Result<()> {
    let mut out = std::io::stdout().lock();
    match content {
      ResponseContent::Papers(papers) if self.json => {
        writeln!(out, "{}", serde_json::to_string_pretty(papers)?)?
      },
      ResponseContent::Papers([]) => {
        writeln!(out, "{} No papers found", style(INFO_PREFIX).cyan())?
      },
      ResponseContent::Papers(papers) => Self::render_papers(&mut out, papers)?,
      ResponseContent::Source(text) if self.json => {
        writeln!(out, "{}", serde_json::to_string(text)?)?
      },
      ResponseContent::Source(text) => write!(out, "{text}")?,
      // Notices go to stderr in JSON mode so stdout stays parseable.
      ResponseContent::Success(message) if self.json => eprintln!("{message}"),
      ResponseContent::Success(message) => {
        writeln!(out, "{} {}", style(SUCCESS_PREFIX).green(), message)?
      },
      ResponseContent::Info(message) if self.json => eprintln!("{message}"),
      ResponseContent::Info(message) => {
        writeln!(out, "{} {}", style(INFO_PREFIX).cyan(), message)?
      },
    }
    Ok(())
  }

  fn report(&self, error: &ScholardError) {
    eprintln!("{} {}", style(ERROR_PREFIX).red(), style(error).red());
  }
}
