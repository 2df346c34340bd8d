//! The `weekly` command.

use super::*;

/// Function for the [`Commands::Weekly`] in the CLI.
pub async fn weekly(
  tools: &Tools,
  interaction: &impl UserInteraction,
  category: &str,
) -> Result<()> {
  let papers = tools.weekly_arxiv(category).await?;
  interaction.reply(ResponseContent::Papers(&papers))
}
