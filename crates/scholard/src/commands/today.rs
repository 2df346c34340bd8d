//! The `today` command.

use super::*;

/// Function for the [`Commands::Today`] in the CLI.
pub async fn today(tools: &Tools, interaction: &impl UserInteraction, category: &str) -> Result<()> {
  let papers = tools.today_arxiv(category).await?;
  interaction.reply(ResponseContent::Papers(&papers))
}
