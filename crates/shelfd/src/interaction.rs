//! How the CLI talks to the person running it.
//!
//! Commands only see the [`UserInteraction`] trait. The terminal implementation
//! prompts with `dialoguer` and prints styled lines with `console`; tests use a
//! scripted implementation instead.

use std::io::Write;

use dialoguer::{Confirm, Input};
use shelf::error::ShelfError;

use super::*;

pub static INFO_PREFIX: &str = "ℹ ";
pub static WORKING_PREFIX: &str = "» ";
pub static SUCCESS_PREFIX: &str = "✓ ";
pub static ERROR_PREFIX: &str = "✗ ";
pub static WARNING_PREFIX: &str = "! ";
pub static PROMPT_PREFIX: &str = "❯ ";
pub static ITEM_PREFIX: &str = "├─";
pub static LAST_ITEM_PREFIX: &str = "└─";

/// Something to show the user.
#[derive(Debug)]
pub enum ResponseContent<'a> {
  /// A step is starting
  Working(&'a str),
  /// A step finished
  Success(&'a str),
  /// Neutral information
  Info(&'a str),
  /// Something was skipped or looks off but the run continues
  Warning(&'a str),
  /// The run failed
  Error(&'a ShelfdError),
  /// Summary of a finished run
  Filing(&'a Filing),
}

/// Prompts and replies, independent of the terminal.
pub trait UserInteraction {
  /// Asks a yes/no question.
  fn confirm(&self, message: &str, default: bool) -> Result<bool>;
  /// Asks for a line of text; an empty answer yields `default` when one is given.
  fn prompt(&self, message: &str, default: Option<&str>) -> Result<String>;
  /// Shows `content` to the user.
  fn reply(&self, content: ResponseContent) -> Result<()>;
}

/// Interaction on the controlling terminal.
pub struct TerminalInteraction {
  /// Answer every confirmation with its default instead of asking
  accept_defaults: bool,
}

impl TerminalInteraction {
  /// Creates a terminal interaction.
  pub fn new(accept_defaults: bool) -> Self { Self { accept_defaults } }
}

impl UserInteraction for TerminalInteraction {
  fn confirm(&self, message: &str, default: bool) -> Result<bool> {
    if self.accept_defaults {
      return Ok(default);
    }
    Ok(
      Confirm::new()
        .with_prompt(format!("{}{message}", style(PROMPT_PREFIX).cyan()))
        .default(default)
        .interact()?,
    )
  }

  fn prompt(&self, message: &str, default: Option<&str>) -> Result<String> {
    if self.accept_defaults {
      if let Some(default) = default {
        return Ok(default.to_string());
      }
    }
    let mut input = Input::<String>::new()
      .with_prompt(format!("{}{message}", style(PROMPT_PREFIX).cyan()))
      .allow_empty(true);
    if let Some(default) = default {
      input = input.default(default.to_string());
    }
    Ok(input.interact_text()?)
  }

  fn reply(&self, content: ResponseContent) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    match content {
      ResponseContent::Working(message) =>
        writeln!(stdout, "{} {message}", style(WORKING_PREFIX).cyan())?,
      ResponseContent::Success(message) =>
        writeln!(stdout, "{} {message}", style(SUCCESS_PREFIX).green())?,
      ResponseContent::Info(message) =>
        writeln!(stdout, "{} {message}", style(INFO_PREFIX).blue())?,
      ResponseContent::Warning(message) =>
        writeln!(stdout, "{} {}", style(WARNING_PREFIX).yellow(), style(message).yellow())?,
      ResponseContent::Error(error) => {
        eprintln!("{} {}", style(ERROR_PREFIX).red(), style(error).red());
        if let ShelfdError::Shelf(ShelfError::Config(_)) = error {
          eprintln!(
            "   {} Run {} to create a configuration",
            style("Tip:").blue(),
            style("shelf init").cyan()
          );
        }
      },
      ResponseContent::Filing(filing) => {
        writeln!(stdout, "{} Paper filed", style(SUCCESS_PREFIX).green())?;
        let lines = filing_lines(filing);
        let last = lines.len().saturating_sub(1);
        for (i, line) in lines.iter().enumerate() {
          let prefix = if i == last { LAST_ITEM_PREFIX } else { ITEM_PREFIX };
          writeln!(stdout, "   {} {line}", style(prefix).dim())?;
        }
      },
    }
    Ok(())
  }
}

/// Summary lines for a finished run.
pub fn filing_lines(filing: &Filing) -> Vec<String> {
  let mut lines = vec![format!("PDF: {}", filing.path.display())];
  lines.push(if filing.published { "Pushed to git".to_string() } else { "Not pushed".to_string() });
  match &filing.pin {
    Some(pin) => {
      lines.push(format!("Card: {}", pin.card.id));
      match (&pin.parent, &pin.connection) {
        (Some(parent), Some(_)) => lines.push(format!("Connected to: {}", parent.name)),
        (Some(parent), None) => lines.push(format!("Placed next to: {}", parent.name)),
        (None, _) => lines.push("No matching category card".to_string()),
      }
    },
    None => lines.push("Not pinned to a board".to_string()),
  }
  lines
}
