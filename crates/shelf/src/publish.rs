//! Committing and pushing the papers directory.
//!
//! The pipeline only talks to the [`Publisher`] trait, so the git step can be
//! swapped out or faked in tests. [`GitPublisher`] is the real implementation:
//! it runs `git add .`, `git commit` and `git push` as separate processes in the
//! papers directory and stops at the first one that fails.

use tokio::process::Command;

use super::*;

/// Default prefix of the commit message, followed by the paper title.
pub const DEFAULT_COMMIT_PREFIX: &str = "adds paper";

/// Something that makes a downloaded paper durable and public.
#[async_trait]
pub trait Publisher: Send + Sync {
  /// Publishes the papers directory after `request` has been downloaded into it.
  async fn publish(&self, request: &PaperRequest) -> Result<()>;
}

/// Publishes by committing the papers directory and pushing it to its remote.
#[derive(Debug, Clone)]
pub struct GitPublisher {
  /// Working tree that holds the papers
  dir:           PathBuf,
  /// Commit message prefix, e.g. `adds paper`
  commit_prefix: String,
  /// Remote to push `HEAD` to; `None` runs a plain `git push`
  remote:        Option<String>,
}

impl GitPublisher {
  /// Creates a publisher for the working tree at `dir`.
  pub fn new(dir: impl Into<PathBuf>) -> Self {
    Self { dir: dir.into(), commit_prefix: DEFAULT_COMMIT_PREFIX.to_string(), remote: None }
  }

  /// Sets the commit message prefix.
  pub fn with_commit_prefix(mut self, prefix: impl Into<String>) -> Self {
    self.commit_prefix = prefix.into();
    self
  }

  /// Pushes `HEAD` to `remote` instead of relying on the branch's upstream.
  pub fn with_remote(mut self, remote: Option<String>) -> Self {
    self.remote = remote;
    self
  }

  /// The commit message used for `request`.
  pub fn commit_message(&self, request: &PaperRequest) -> String {
    format!("{} {}", self.commit_prefix, request.title())
  }

  /// Runs one git subcommand in the working tree.
  async fn git(&self, args: &[&str]) -> Result<()> {
    let step = args.join(" ");
    debug!("Running `git {step}` in {}", self.dir.display());

    let output = Command::new("git").args(args).current_dir(&self.dir).output().await?;
    trace!("`git {step}` stdout: {}", String::from_utf8_lossy(&output.stdout));

    if output.status.success() {
      Ok(())
    } else {
      Err(ShelfError::Git {
        step,
        code: output.status.to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
      })
    }
  }
}

#[async_trait]
impl Publisher for GitPublisher {
  async fn publish(&self, request: &PaperRequest) -> Result<()> {
    let message = self.commit_message(request);
    self.git(&["add", "."]).await?;
    self.git(&["commit", "-m", &message]).await?;
    match &self.remote {
      Some(remote) => self.git(&["push", remote.as_str(), "HEAD"]).await?,
      None => self.git(&["push"]).await?,
    }
    info!("Committed and pushed \"{message}\"");
    Ok(())
  }
}
