//! Error types for the shelf library.
//!
//! Every step of filing a paper reports failures through [`ShelfError`]. Errors
//! are never retried or recovered from inside the library; they propagate to the
//! caller, which is expected to stop.
//!
//! # Examples
//!
//! ```
//! use shelf::error::ShelfError;
//!
//! fn explain(error: &ShelfError) -> &'static str {
//!   match error {
//!     ShelfError::DownloadStatus { .. } => "the PDF link is broken",
//!     ShelfError::Git { .. } => "the papers directory could not be pushed",
//!     ShelfError::Network(_) => "check your connection",
//!     _ => "something else went wrong",
//!   }
//! }
//! ```

use reqwest::StatusCode;
use thiserror::Error;

/// Error type alias used for the [`shelf`](crate) crate.
pub type Result<T> = core::result::Result<T, ShelfError>;

/// Errors that can occur while filing a paper.
#[derive(Error, Debug)]
pub enum ShelfError {
  /// A network request failed, or a response body could not be decoded.
  ///
  /// This covers unreachable hosts, TLS failures, malformed URLs handed to the
  /// HTTP client and JSON bodies that do not match the expected shape.
  #[error(transparent)]
  Network(#[from] reqwest::Error),

  /// The PDF server answered with a non-success status.
  #[error("Failed to download PDF from {url}: {status}")]
  DownloadStatus {
    /// The URL that was requested
    url:    String,
    /// The status the server returned
    status: StatusCode,
  },

  /// The board service answered with a non-success status.
  #[error("Board request {endpoint} failed: {status}")]
  BoardStatus {
    /// Path of the endpoint that was called, e.g. `/card`
    endpoint: String,
    /// The status the server returned
    status:   StatusCode,
  },

  /// A git step exited with a non-zero status.
  #[error("`git {step}` failed ({code}): {stderr}")]
  Git {
    /// The git subcommand that failed
    step:   String,
    /// Exit status description
    code:   String,
    /// Captured standard error of the failed command
    stderr: String,
  },

  /// No card on the board matches the requested category and a match is required.
  #[error("No card on the board matches category \"{0}\"")]
  CategoryNotFound(String),

  /// A file system operation failed.
  ///
  /// This occurs when:
  /// - The papers directory does not exist or is not writable
  /// - The configuration file cannot be read or written
  /// - A git process cannot be spawned
  #[error(transparent)]
  Io(#[from] std::io::Error),

  /// A JSON response body could not be decoded.
  #[error(transparent)]
  Json(#[from] serde_json::Error),

  /// A configured URL could not be parsed.
  #[error(transparent)]
  Url(#[from] url::ParseError),

  /// The configuration file is not valid TOML for [`Config`](crate::Config).
  #[error(transparent)]
  TomlDe(#[from] toml::de::Error),

  /// The configuration could not be serialized.
  #[error(transparent)]
  TomlSer(#[from] toml::ser::Error),

  /// The configuration is missing or inconsistent.
  #[error("{0}")]
  Config(String),
}
