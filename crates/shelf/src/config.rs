//! On-disk configuration.
//!
//! Everything that used to be hard-coded (papers directory, board id, API
//! token) lives in a TOML file, by default at
//! `<config dir>/shelf/config.toml`:
//!
//! ```toml
//! papers_dir       = "/home/me/Documents/Papers"
//! default_category = "Miscellaneous"
//!
//! [publish]
//! enabled       = true
//! commit_prefix = "adds paper"
//!
//! [board]
//! api_url      = "https://api.kinopio.club"
//! space_id     = "4oKyeUTNlswo5j4hw1sQP"
//! token        = "..."
//! auth_scheme  = "raw"
//! raw_base_url = "https://raw.githubusercontent.com/me/papers/master"
//! ```
//!
//! Leaving out the `[board]` table disables the board step entirely.

use crate::{board::AuthScheme, publish::DEFAULT_COMMIT_PREFIX, request::DEFAULT_CATEGORY};

use super::*;

/// Default Kinopio API root.
pub const DEFAULT_API_URL: &str = "https://api.kinopio.club";

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
  /// Git working tree the PDFs are downloaded into
  pub papers_dir:       PathBuf,
  /// Category used when none is given
  #[serde(default = "default_category")]
  pub default_category: String,
  /// Git publishing settings
  #[serde(default)]
  pub publish:          PublishConfig,
  /// Board settings; `None` skips the board step
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub board:            Option<BoardConfig>,
}

/// Settings for committing and pushing the papers directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PublishConfig {
  /// Whether to commit and push at all
  pub enabled:       bool,
  /// Commit message prefix, followed by the paper title
  pub commit_prefix: String,
  /// Remote to push `HEAD` to instead of the branch's upstream
  #[serde(skip_serializing_if = "Option::is_none")]
  pub remote:        Option<String>,
}

/// Settings for the Kinopio board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
  /// API root
  pub api_url:          String,
  /// Board to add paper cards to
  pub space_id:         String,
  /// API token
  pub token:            String,
  /// How the token is sent
  pub auth_scheme:      AuthScheme,
  /// Public URL of the papers directory, used for the link on each card
  pub raw_base_url:     String,
  /// Whether to connect the category card to the new card
  pub connect:          bool,
  /// Fail before creating a card when no card matches the category
  pub require_category: bool,
}

/// Serde default for [`Config::default_category`].
fn default_category() -> String { DEFAULT_CATEGORY.to_string() }

impl Default for Config {
  fn default() -> Self {
    Self {
      papers_dir:       Self::default_papers_dir(),
      default_category: default_category(),
      publish:          PublishConfig::default(),
      board:            None,
    }
  }
}

impl Default for PublishConfig {
  fn default() -> Self {
    Self { enabled: true, commit_prefix: DEFAULT_COMMIT_PREFIX.to_string(), remote: None }
  }
}

impl Default for BoardConfig {
  fn default() -> Self {
    Self {
      api_url:          DEFAULT_API_URL.to_string(),
      space_id:         String::new(),
      token:            String::new(),
      auth_scheme:      AuthScheme::default(),
      raw_base_url:     String::new(),
      connect:          true,
      require_category: false,
    }
  }
}

impl Config {
  /// Returns the default configuration file path.
  ///
  /// - On Unix: `~/.config/shelf/config.toml`
  /// - On macOS: `~/Library/Application Support/shelf/config.toml`
  /// - On Windows: `%APPDATA%\shelf\config.toml`
  pub fn default_path() -> Result<PathBuf> {
    dirs::config_dir()
      .map(|dir| dir.join("shelf").join("config.toml"))
      .ok_or_else(|| ShelfError::Config("Could not determine a configuration directory".into()))
  }

  /// Returns the default papers directory, `~/Documents/Papers`.
  pub fn default_papers_dir() -> PathBuf {
    dirs::document_dir().unwrap_or_else(|| PathBuf::from(".")).join("Papers")
  }

  /// Reads the configuration at `path`.
  pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    if !path.exists() {
      return Err(ShelfError::Config(format!(
        "No configuration found at {}. Run `shelf init` first.",
        path.display()
      )));
    }
    debug!("Loading configuration from {}", path.display());
    let config: Self = toml::from_str(&std::fs::read_to_string(path)?)?;
    config.validate()?;
    Ok(config)
  }

  /// Writes the configuration to `path`, creating parent directories.
  pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, toml::to_string_pretty(self)?)?;
    debug!("Saved configuration to {}", path.display());
    Ok(())
  }

  /// Checks settings that would otherwise only fail halfway through a run.
  pub fn validate(&self) -> Result<()> {
    if let Some(board) = &self.board {
      if board.space_id.trim().is_empty() {
        return Err(ShelfError::Config("`board.space_id` must be set".into()));
      }
      Url::parse(&board.api_url)?;
      Url::parse(&board.raw_base_url)?;
    }
    Ok(())
  }

  /// Sets the papers directory.
  pub fn with_papers_dir(mut self, papers_dir: &Path) -> Self {
    self.papers_dir = papers_dir.to_path_buf();
    self
  }

  /// Sets the fallback category.
  pub fn with_default_category(mut self, category: impl Into<String>) -> Self {
    self.default_category = category.into();
    self
  }

  /// Sets the git publishing settings.
  pub fn with_publish(mut self, publish: PublishConfig) -> Self {
    self.publish = publish;
    self
  }

  /// Sets or clears the board settings.
  pub fn with_board(mut self, board: Option<BoardConfig>) -> Self {
    self.board = board;
    self
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_default_path() {
    let path = Config::default_path().unwrap();
    assert!(path.ends_with("shelf/config.toml") || path.ends_with("shelf\\config.toml"));
  }

  #[test]
  fn test_minimal_config_uses_defaults() {
    let config: Config = toml::from_str(r#"papers_dir = "/tmp/papers""#).unwrap();
    assert_eq!(config.papers_dir, PathBuf::from("/tmp/papers"));
    assert_eq!(config.default_category, "Miscellaneous");
    assert!(config.publish.enabled);
    assert_eq!(config.publish.commit_prefix, "adds paper");
    assert!(config.board.is_none());
  }

  #[test]
  fn test_board_table() {
    let config: Config = toml::from_str(
      r#"
      papers_dir = "/tmp/papers"

      [board]
      space_id     = "abc"
      token        = "tok"
      auth_scheme  = "bearer"
      raw_base_url = "https://raw.githubusercontent.com/me/papers/master"
      "#,
    )
    .unwrap();
    let board = config.board.unwrap();
    assert_eq!(board.api_url, DEFAULT_API_URL);
    assert_eq!(board.auth_scheme, AuthScheme::Bearer);
    assert!(board.connect);
    assert!(!board.require_category);
  }

  #[test]
  fn test_save_and_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");
    let config = Config::default()
      .with_papers_dir(dir.path())
      .with_default_category("Unsorted")
      .with_board(Some(BoardConfig {
        space_id: "abc".into(),
        raw_base_url: "https://example.com/papers".into(),
        ..BoardConfig::default()
      }));

    config.save(&path).unwrap();
    assert_eq!(Config::from_path(&path).unwrap(), config);
  }

  #[test]
  fn test_missing_file_asks_for_init() {
    let dir = tempdir().unwrap();
    let err = Config::from_path(dir.path().join("config.toml")).unwrap_err();
    assert!(err.to_string().contains("shelf init"));
  }

  #[test]
  fn test_board_requires_space_id() {
    let config = Config::default().with_board(Some(BoardConfig {
      raw_base_url: "https://example.com".into(),
      ..BoardConfig::default()
    }));
    assert!(matches!(config.validate(), Err(ShelfError::Config(_))));
  }
}
