//! Errors surfaced by the `shelf` binary.

use shelf::error::ShelfError;
use thiserror::Error;

/// Error type alias used throughout the CLI.
pub type Result<T> = core::result::Result<T, ShelfdError>;

/// Errors that end a CLI run.
#[derive(Error, Debug)]
pub enum ShelfdError {
  /// Filing the paper failed.
  #[error(transparent)]
  Shelf(#[from] ShelfError),

  /// Reading an answer from the terminal failed.
  #[error(transparent)]
  Dialoguer(#[from] dialoguer::Error),

  /// Writing to the terminal failed.
  #[error(transparent)]
  Io(#[from] std::io::Error),

  /// An answer could not be used.
  #[error("Invalid input: {0}")]
  InvalidInput(String),
}
