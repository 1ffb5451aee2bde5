//! Module for writing a [`shelf`] configuration file.

use std::path::Path;

use shelf::board::AuthScheme;

use super::*;

/// Arguments that can be used for the [`Commands::Init`]
#[derive(Args, Clone, Default)]
pub struct InitArgs {
  /// Git working tree to download papers into
  #[arg(long)]
  pub papers_dir: Option<PathBuf>,
}

/// Function for the [`Commands::Init`] in the CLI.
///
/// Returns the configuration that was written, or `None` if the user chose to
/// keep an existing file.
pub fn init<I: UserInteraction>(
  interaction: &I,
  config_path: &Path,
  init_args: InitArgs,
) -> Result<Option<Config>> {
  if config_path.exists()
    && !interaction.confirm(
      &format!("A configuration already exists at {}. Overwrite it?", config_path.display()),
      false,
    )?
  {
    interaction.reply(ResponseContent::Info("Keeping the existing configuration"))?;
    return Ok(None);
  }

  let papers_dir = match init_args.papers_dir {
    Some(dir) => dir,
    None => {
      let default = Config::default_papers_dir();
      PathBuf::from(interaction.prompt(
        "Papers directory (a git working tree)",
        Some(&default.display().to_string()),
      )?)
    },
  };
  let default_category =
    interaction.prompt("Default category", Some(&Config::default().default_category))?;

  let board = if interaction.confirm("Pin papers to a Kinopio board?", false)? {
    Some(board_config(interaction)?)
  } else {
    None
  };

  let config = Config::default()
    .with_papers_dir(&papers_dir)
    .with_default_category(default_category)
    .with_board(board);
  config.validate()?;
  config.save(config_path)?;

  interaction.reply(ResponseContent::Success(&format!(
    "Wrote configuration to {}",
    config_path.display()
  )))?;
  if !papers_dir.join(".git").exists() {
    interaction.reply(ResponseContent::Warning(&format!(
      "{} is not a git working tree yet; publishing will fail until it is",
      papers_dir.display()
    )))?;
  }
  Ok(Some(config))
}

/// Asks for the board settings.
fn board_config<I: UserInteraction>(interaction: &I) -> Result<BoardConfig> {
  let defaults = BoardConfig::default();
  let api_url = interaction.prompt("Kinopio API URL", Some(&defaults.api_url))?;
  let space_id = interaction.prompt("Space id", None)?;
  let token = interaction.prompt("API token", None)?;
  let auth_scheme = match interaction.prompt("Token style (raw or bearer)", Some("raw"))?.as_str() {
    "raw" => AuthScheme::Raw,
    "bearer" => AuthScheme::Bearer,
    other => return Err(ShelfdError::InvalidInput(format!("unknown token style \"{other}\""))),
  };
  let raw_base_url = interaction.prompt("Public base URL of the papers repository", None)?;
  let connect = interaction.confirm("Connect each paper to its category card?", true)?;

  Ok(BoardConfig {
    api_url,
    space_id: space_id.trim().to_string(),
    token: token.trim().to_string(),
    auth_scheme,
    raw_base_url: raw_base_url.trim().to_string(),
    connect,
    ..defaults
  })
}
