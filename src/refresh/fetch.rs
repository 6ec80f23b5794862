//! Archive fetcher: streams the remote zip into a temporary file.

use std::path::Path;
use std::time::Duration;

use tokio::io::AsyncWriteExt;

use super::RefreshError;

/// Connect timeout for the archive download.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);
/// Maximum silence between two body reads.
pub const READ_TIMEOUT: Duration = Duration::from_secs(20);

/// What: Build the HTTP client used for archive downloads.
///
/// Inputs:
/// - `connect_timeout`, `read_timeout`: Bounds on how long a stalled server can hang a refresh.
///
/// # Errors
/// - `RefreshError::Network` if the TLS backend cannot be initialised.
///
/// Details:
/// - No overall timeout: a slow but progressing download is allowed to finish.
pub fn build_client(
    connect_timeout: Duration,
    read_timeout: Duration,
) -> Result<reqwest::Client, RefreshError> {
    Ok(reqwest::Client::builder()
        .connect_timeout(connect_timeout)
        .read_timeout(read_timeout)
        .user_agent(concat!("brief/", env!("CARGO_PKG_VERSION")))
        .build()?)
}

/// What: Download `url` into `dest`, reporting progress after every chunk.
///
/// Inputs:
/// - `client`: Client from [`build_client`].
/// - `url`: Archive URL.
/// - `dest`: Temporary file path inside the cache directory.
/// - `on_progress`: Called with `(bytes_received, content_length)` after each chunk.
///
/// Output:
/// - `Ok(bytes)` once the whole body is on disk.
///
/// # Errors
/// - Network, HTTP status, truncated body or filesystem errors; the partial file is
///   removed before returning.
pub async fn fetch_archive<F>(
    client: &reqwest::Client,
    url: &str,
    dest: &Path,
    mut on_progress: F,
) -> Result<u64, RefreshError>
where
    F: FnMut(u64, Option<u64>),
{
    match download_to(client, url, dest, &mut on_progress).await {
        Ok(bytes) => Ok(bytes),
        Err(e) => {
            if let Err(rm) = tokio::fs::remove_file(dest).await
                && rm.kind() != std::io::ErrorKind::NotFound
            {
                tracing::warn!(path = %dest.display(), error = %rm, "failed to remove partial download");
            }
            Err(e)
        }
    }
}

/// Body of [`fetch_archive`] without cleanup.
async fn download_to<F>(
    client: &reqwest::Client,
    url: &str,
    dest: &Path,
    on_progress: &mut F,
) -> Result<u64, RefreshError>
where
    F: FnMut(u64, Option<u64>),
{
    tracing::info!(url, "downloading pages archive");
    let mut resp = client.get(url).send().await?;
    let status = resp.status();
    if !status.is_success() {
        tracing::warn!(url, %status, "archive request rejected");
        return Err(RefreshError::Http(status));
    }
    let total = resp.content_length().filter(|n| *n > 0);
    if let Some(parent) = dest.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    let mut file = tokio::fs::File::create(dest).await?;
    let mut received: u64 = 0;
    while let Some(chunk) = resp.chunk().await? {
        file.write_all(&chunk).await?;
        received += chunk.len() as u64;
        on_progress(received, total);
    }
    file.flush().await?;
    file.sync_all().await?;
    if let Some(expected) = total
        && received < expected
    {
        return Err(RefreshError::Incomplete { received, expected });
    }
    tracing::info!(
        path = %dest.display(),
        bytes = received,
        "pages archive downloaded"
    );
    Ok(received)
}
