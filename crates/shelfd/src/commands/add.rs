//! Module for the default "add" command: filing one paper.

use super::*;

/// Arguments that can be used for the [`Commands::Add`]
///
/// Anything left out is asked for interactively, in the order URL, title,
/// category.
#[derive(Args, Clone, Default)]
pub struct AddArgs {
  /// URL of the PDF
  #[arg(long)]
  pub url: Option<String>,

  /// Paper title, also used to name the file
  #[arg(long)]
  pub title: Option<String>,

  /// Category card to attach the paper to; blank uses the configured default
  #[arg(long)]
  pub category: Option<String>,

  /// Download only, do not commit and push
  #[arg(long)]
  pub no_publish: bool,

  /// Do not touch the board
  #[arg(long)]
  pub no_board: bool,
}

/// Collects the paper details, asking for anything not given on the command line.
pub fn collect<I: UserInteraction>(
  interaction: &I,
  config: &Config,
  add_args: &AddArgs,
) -> Result<PaperRequest> {
  let url = match &add_args.url {
    Some(url) => url.clone(),
    None => interaction.prompt("PDF URL", None)?,
  };
  let title = match &add_args.title {
    Some(title) => title.clone(),
    None => interaction.prompt("Paper title", None)?,
  };
  let category = match &add_args.category {
    Some(category) => category.clone(),
    None => interaction.prompt("Category (optional)", None)?,
  };
  Ok(PaperRequest::new(url.trim(), title.trim(), category, &config.default_category))
}

/// Function for the [`Commands::Add`] in the CLI.
pub async fn add<I: UserInteraction>(
  interaction: &I,
  config: Config,
  add_args: AddArgs,
) -> Result<Filing> {
  let request = collect(interaction, &config, &add_args)?;
  debug!("Collected request: {request:?}");

  let mut pipeline = Pipeline::from_config(config)?;
  if add_args.no_publish {
    pipeline = pipeline.without_publisher();
  }
  if add_args.no_board {
    pipeline = pipeline.without_board();
  }

  interaction.reply(ResponseContent::Working(&format!("Downloading {}", request.url())))?;
  let path = pipeline.download(&request).await?;
  interaction.reply(ResponseContent::Success(&format!("Saved {}", path.display())))?;

  if pipeline.publishes() {
    interaction.reply(ResponseContent::Working("Committing and pushing"))?;
  }
  let published = pipeline.publish(&request).await?;

  if pipeline.pins() {
    interaction
      .reply(ResponseContent::Working(&format!("Pinning to board under {}", request.category())))?;
  }
  let pin = pipeline.pin(&request).await?;
  if let Some(pin) = &pin {
    if pin.parent.is_none() {
      interaction.reply(ResponseContent::Warning(&format!(
        "No card matches category \"{}\"; the card was placed without a connection",
        request.category()
      )))?;
    }
  }

  let filing = Filing { path, published, pin };
  interaction.reply(ResponseContent::Filing(&filing))?;
  Ok(filing)
}
