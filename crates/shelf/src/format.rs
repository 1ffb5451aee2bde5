//! String normalization used for filenames and category matching.

/// Turns a paper title into the PDF filename it is stored under.
///
/// The title is lowercased, commas are dropped and every space becomes a hyphen.
/// Path separators are replaced too, so the result is always a single path
/// component.
///
/// # Examples
///
/// ```
/// use shelf::format::format_filename;
///
/// assert_eq!(format_filename("Attention, Is All You Need"), "attention-is-all-you-need.pdf");
/// ```
pub fn format_filename(title: &str) -> String {
  let stem: String = title
    .to_lowercase()
    .chars()
    .filter(|c| *c != ',')
    .map(|c| match c {
      ' ' | '/' | '\\' => '-',
      c => c,
    })
    .collect();
  format!("{stem}.pdf")
}

/// Normalizes a board label for comparison.
///
/// Lowercases and removes spaces and `#`, so `"#Machine Learning"` and
/// `"machinelearning"` compare equal.
pub fn normalize_label(label: &str) -> String {
  label.chars().filter(|c| *c != ' ' && *c != '#').flat_map(char::to_lowercase).collect()
}
