//! The `download` command.

use std::path::Path;

use super::*;

/// Function for the [`Commands::Download`] in the CLI.
///
/// Prints the combined sources, or writes them to `output` when one is given.
pub async fn download(
  tools: &Tools,
  interaction: &impl UserInteraction,
  paper_id: &str,
  output: Option<&Path>,
) -> Result<()> {
  let source = tools.download_arxiv_paper(paper_id).await?;

  match output {
    Some(path) => {
      tokio::fs::write(path, &source).await?;
      interaction.reply(ResponseContent::Success(&format!(
        "Wrote {} bytes of source for {paper_id} to {}",
        source.len(),
        path.display()
      )))
    },
    None => interaction.reply(ResponseContent::Source(&source)),
  }
}
