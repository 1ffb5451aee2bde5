//! The paper being filed.
//!
//! A [`PaperRequest`] is built once from user input and then only read. It
//! carries the derived filename so every later step (download, commit message,
//! board link) agrees on where the PDF lives.

use super::*;

/// Category used when the user leaves the category blank.
pub const DEFAULT_CATEGORY: &str = "Miscellaneous";

/// A paper to download, commit and pin.
///
/// # Examples
///
/// ```
/// use shelf::{request::DEFAULT_CATEGORY, PaperRequest};
///
/// let request = PaperRequest::new(
///   "https://arxiv.org/pdf/1706.03762",
///   "Attention, Is All You Need",
///   "",
///   DEFAULT_CATEGORY,
/// );
/// assert_eq!(request.category(), "Miscellaneous");
/// assert_eq!(request.filename(), "attention-is-all-you-need.pdf");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaperRequest {
  /// Where the PDF is downloaded from
  url:      String,
  /// Human-readable title, used in the commit message and the card label
  title:    String,
  /// Category the card is attached to on the board
  category: String,
  /// Name of the PDF inside the papers directory
  filename: String,
}

impl PaperRequest {
  /// Creates a request, substituting `default_category` for a blank category.
  ///
  /// The URL and title are taken as given. Nothing here validates that the URL
  /// is well formed or that the title is non-empty; a bad URL surfaces as a
  /// network error when it is fetched.
  pub fn new(
    url: impl Into<String>,
    title: impl Into<String>,
    category: impl Into<String>,
    default_category: &str,
  ) -> Self {
    let title = title.into();
    let category = category.into();
    let category = if category.trim().is_empty() {
      default_category.to_string()
    } else {
      category.trim().to_string()
    };
    let filename = format::format_filename(&title);
    Self { url: url.into(), title, category, filename }
  }

  /// The PDF source URL.
  pub fn url(&self) -> &str { &self.url }

  /// The paper title.
  pub fn title(&self) -> &str { &self.title }

  /// The effective category, never blank.
  pub fn category(&self) -> &str { &self.category }

  /// The derived PDF filename, e.g. `attention-is-all-you-need.pdf`.
  pub fn filename(&self) -> &str { &self.filename }
}

impl Display for PaperRequest {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{} [{}]", self.title, self.category)
  }
}
