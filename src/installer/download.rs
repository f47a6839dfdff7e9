//! Streamed installer download with whole-number percentage progress.

use futures::StreamExt;
use std::path::Path;
use tokio::io::AsyncWriteExt;
use tokio::sync::watch;

use super::{CancelFlag, InstallError, InstallPhase, InstallProgress};

/// Byte counts for a finished download.
#[derive(Debug, Clone, Copy)]
pub struct DownloadTotals {
    /// Bytes written to disk.
    pub bytes_downloaded: u64,
    /// Declared content length; 0 when the server sent none.
    pub total_bytes: u64,
}

/// Stream `url` to `dest_path`, emitting a progress payload per chunk.
///
/// The response headers are read before any body bytes; a non-success
/// status fails the operation before the destination file is touched.
/// When the response declares a content length, each chunk emits
/// `floor(bytes_read * 100 / total)`; without one, `percent` stays `None`
/// and only the byte counter advances. The cancel flag is checked between
/// chunks. On any failure the partially written file is left in place.
pub async fn download_installer(
    client: &reqwest::Client,
    url: &str,
    dest_path: &Path,
    progress_tx: &watch::Sender<InstallProgress>,
    cancel: &CancelFlag,
) -> Result<DownloadTotals, InstallError> {
    let response = client.get(url).send().await?;

    if !response.status().is_success() {
        return Err(InstallError::HttpStatus(response.status()));
    }

    let declared_total = response.content_length();

    let mut file = tokio::fs::File::create(dest_path).await?;
    let mut stream = response.bytes_stream();
    let mut downloaded: u64 = 0;

    while let Some(chunk_result) = stream.next().await {
        if cancel.is_cancelled() {
            return Err(InstallError::Cancelled);
        }

        let chunk = chunk_result?;
        file.write_all(&chunk).await?;
        downloaded += chunk.len() as u64;

        let _ = progress_tx.send(InstallProgress {
            phase: InstallPhase::Downloading,
            status: "Downloading".to_string(),
            percent: declared_total.map(|total| percent_of(downloaded, total)),
            bytes_downloaded: downloaded,
            total_bytes: declared_total.unwrap_or(0),
            error: None,
        });
    }

    file.sync_all().await?;
    drop(file);

    tracing::info!(
        "Downloaded {} bytes to {}",
        downloaded,
        dest_path.display()
    );

    Ok(DownloadTotals {
        bytes_downloaded: downloaded,
        total_bytes: declared_total.unwrap_or(0),
    })
}

/// Whole-number percentage, floored; a zero declared total counts as done.
fn percent_of(bytes: u64, total: u64) -> u8 {
    if total == 0 {
        return 100;
    }
    ((bytes * 100) / total).min(100) as u8
}
