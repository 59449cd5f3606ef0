use std::path::{Path, PathBuf};

use tokio::io::{AsyncBufRead, Lines};
use tracing::{error, info};

use super::{api::ClientError, download::download, view::GeneratorView};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AfterDone {
    NewVideo,
    Quit,
}

/// Saves the current result, if any, into `dir`.
pub async fn save_result(
    http: &reqwest::Client,
    view: &GeneratorView,
    dir: &Path,
) -> Result<Option<PathBuf>, ClientError> {
    let Some(video) = view.result() else {
        return Ok(None);
    };
    let path = download(http, &video.video_url, dir).await?;
    info!(path = %path.display(), "Saved video");
    Ok(Some(path))
}

/// Menu shown once a video is ready. A failed download keeps the result and
/// asks again; only stdin errors end the session.
pub async fn after_done<R>(
    lines: &mut Lines<R>,
    http: &reqwest::Client,
    view: &mut GeneratorView,
    output_dir: &Path,
) -> Result<AfterDone, ClientError>
where
    R: AsyncBufRead + Unpin,
{
    loop {
        eprintln!("[d]ownload, [n]ew video, [q]uit");
        let Some(choice) = lines.next_line().await? else {
            return Ok(AfterDone::Quit);
        };
        match choice.trim() {
            "d" | "download" => match save_result(http, view, output_dir).await {
                Ok(Some(path)) => eprintln!("Saved {}", path.display()),
                Ok(None) => {}
                Err(e) => {
                    error!(error = %e, "Failed to download video");
                    eprintln!("Download failed: {e}");
                }
            },
            "n" | "new" => {
                view.reset()?;
                return Ok(AfterDone::NewVideo);
            }
            "q" | "quit" => return Ok(AfterDone::Quit),
            other => eprintln!("Unknown choice: {other}"),
        }
    }
}
