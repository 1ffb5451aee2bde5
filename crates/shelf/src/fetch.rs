//! PDF download.
//!
//! The status code is checked before anything touches the disk, so a failed
//! request never creates a file. The body is streamed into a `.part` file next
//! to the destination and renamed into place once complete; an interrupted
//! download removes the partial file instead of leaving a truncated PDF.

use tokio::{fs::File, io::AsyncWriteExt};

use super::*;

/// Downloads `url` into `dir/filename`, returning the full path.
///
/// An existing file with the same name is replaced. `dir` must already exist.
///
/// # Errors
///
/// - [`ShelfError::Network`] if the request or the body stream fails
/// - [`ShelfError::DownloadStatus`] if the server answers with a non-2xx status
/// - [`ShelfError::Io`] if the file cannot be created or written
///
/// # Examples
///
/// ```no_run
/// # use std::path::Path;
/// # async fn example() -> Result<(), shelf::error::ShelfError> {
/// let client = reqwest::Client::new();
/// let path = shelf::fetch::download(
///   &client,
///   "https://arxiv.org/pdf/1706.03762",
///   Path::new("papers"),
///   "attention-is-all-you-need.pdf",
/// )
/// .await?;
/// println!("PDF stored at: {}", path.display());
/// # Ok(())
/// # }
/// ```
pub async fn download(client: &Client, url: &str, dir: &Path, filename: &str) -> Result<PathBuf> {
  debug!("Requesting PDF from {url}");
  let mut response = client.get(url).send().await?;

  if !response.status().is_success() {
    trace!("PDF response: {response:?}");
    return Err(ShelfError::DownloadStatus { url: url.to_string(), status: response.status() });
  }

  let path = dir.join(filename);
  let partial = dir.join(format!("{filename}.part"));
  debug!("Writing PDF to path: {partial:?}");

  let file = File::create(&partial).await?;
  let written = async {
    let mut file = file;
    let mut total = 0usize;
    while let Some(chunk) = response.chunk().await? {
      file.write_all(&chunk).await?;
      total += chunk.len();
    }
    file.flush().await?;
    drop(file);
    tokio::fs::rename(&partial, &path).await?;
    Ok::<_, ShelfError>(total)
  }
  .await;

  match written {
    Ok(total) => {
      info!("Downloaded {total} bytes to {}", path.display());
      Ok(path)
    },
    Err(e) => {
      if let Err(cleanup) = tokio::fs::remove_file(&partial).await {
        warn!("Could not remove partial download {}: {cleanup}", partial.display());
      }
      Err(e)
    },
  }
}
