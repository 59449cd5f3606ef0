use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use futures::StreamExt;
use tokio::{fs::File, io::AsyncWriteExt};
use tracing::{info, instrument, warn};
use url::Url;

use super::api::ClientError;

pub fn download_filename(at: DateTime<Utc>) -> String {
    format!("ai-video-{}.mp4", at.timestamp_millis())
}

/// Saves `video_url` into `dir` as `ai-video-<epoch-ms>.mp4`.
#[instrument(skip(http))]
pub async fn download(
    http: &reqwest::Client,
    video_url: &str,
    dir: &Path,
) -> Result<PathBuf, ClientError> {
    let url = Url::parse(video_url)?;
    let path = dir.join(download_filename(Utc::now()));

    let response = http.get(url).send().await?.error_for_status()?;
    if let Err(e) = write_body(response, &path).await {
        if let Err(cleanup) = tokio::fs::remove_file(&path).await {
            warn!(error = %cleanup, path = %path.display(), "Failed to remove partial download");
        }
        return Err(e);
    }

    info!(path = %path.display(), "Downloaded video");
    Ok(path)
}

async fn write_body(response: reqwest::Response, path: &Path) -> Result<(), ClientError> {
    let mut file = File::create(path).await?;
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        file.write_all(&chunk?).await?;
    }
    file.flush().await?;
    Ok(())
}
