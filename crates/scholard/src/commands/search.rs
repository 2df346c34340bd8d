//! The `search` command.

use super::*;

/// Function for the [`Commands::Search`] in the CLI.
pub async fn search(tools: &Tools, interaction: &impl UserInteraction, query: &str) -> Result<()> {
  interaction.reply(ResponseContent::Info(&format!("Searching arXiv for: {query}")))?;
  let papers = tools.search_arxiv(query).await?;
  interaction.reply(ResponseContent::Papers(&papers))
}
