//! Paper filing library: download, version, and pin academic papers.
//!
//! `shelf` takes a paper's PDF URL, title and category and files it in three
//! steps:
//!
//! - Download the PDF into a local papers directory
//! - Commit and push that directory with git
//! - Post a card linking to the pushed PDF onto a Kinopio board, connected to the card for the
//!   paper's category
//!
//! # Getting Started
//!
//! ```no_run
//! use shelf::{prelude::*, Config, PaperRequest, Pipeline};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), ShelfError> {
//!   let config = Config::from_path(Config::default_path()?)?;
//!   let request = PaperRequest::new(
//!     "https://arxiv.org/pdf/1706.03762",
//!     "Attention, Is All You Need",
//!     "Machine Learning",
//!     &config.default_category,
//!   );
//!
//!   let filing = Pipeline::from_config(config)?.run(&request).await?;
//!   println!("Saved to {}", filing.path.display());
//!   Ok(())
//! }
//! ```
//!
//! # Module Organization
//!
//! - [`request`]: The paper request and its derived filename
//! - [`fetch`]: PDF download
//! - [`publish`]: Committing and pushing the papers directory
//! - [`board`]: Kinopio board types and REST client
//! - [`pipeline`]: The end-to-end filing sequence
//! - [`config`]: On-disk configuration
//! - [`format`]: String normalization helpers

#![warn(missing_docs, clippy::missing_docs_in_private_items)]

use std::{
  fmt::Display,
  path::{Path, PathBuf},
};

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};
#[cfg(test)]
use {reqwest::StatusCode, tempfile::tempdir, tracing_test::traced_test};

pub mod board;
pub mod config;
pub mod error;
pub mod fetch;
pub mod format;
pub mod pipeline;
pub mod publish;
pub mod request;

pub use crate::{config::Config, pipeline::Pipeline, request::PaperRequest};
use crate::{error::*, publish::Publisher};

/// Common traits and types for ergonomic imports.
///
/// ```no_run
/// use shelf::prelude::*;
///
/// fn example() -> Result<(), ShelfError> { Ok(()) }
/// ```
pub mod prelude {
  pub use crate::{error::ShelfError, publish::Publisher};
}
