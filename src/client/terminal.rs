use std::io::{self, Write};

use chrono::{DateTime, Local};

use super::{
    session::Render,
    view::{GeneratedVideo, GeneratorView, Phase, PROGRESS_DONE},
};

const BAR_WIDTH: usize = 40;

/// Draws the form state as a single progress line plus the result block.
pub struct TerminalRenderer<W: Write> {
    out: W,
    last: Option<(Phase, u8)>,
}

impl TerminalRenderer<io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out, last: None }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn draw(&mut self, view: &GeneratorView) -> io::Result<()> {
        match view.phase() {
            Phase::Generating => {
                write!(self.out, "\r{}", progress_line(view.progress()))?;
                if view.progress() == PROGRESS_DONE {
                    writeln!(self.out)?;
                }
            }
            Phase::Done => {
                if let Some(video) = view.result() {
                    writeln!(self.out, "{}", video_details(video))?;
                }
            }
            Phase::Idle => {
                if matches!(self.last, Some((Phase::Generating, p)) if p < PROGRESS_DONE) {
                    writeln!(self.out)?;
                }
            }
        }
        self.out.flush()
    }
}

impl<W: Write> Render for TerminalRenderer<W> {
    fn render(&mut self, view: &GeneratorView) {
        let frame = (view.phase(), view.progress());
        if self.last == Some(frame) {
            return;
        }
        if let Err(e) = self.draw(view) {
            tracing::debug!(error = %e, "Failed to draw progress");
        }
        self.last = Some(frame);
    }
}

pub fn progress_line(progress: u8) -> String {
    let progress = progress.min(PROGRESS_DONE);
    let filled = BAR_WIDTH * usize::from(progress) / usize::from(PROGRESS_DONE);
    format!(
        "Generating... {progress:>3}% [{}{}]",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled)
    )
}

pub fn video_details(video: &GeneratedVideo) -> String {
    let mut lines = vec![format!("Video: {}", video.video_url)];
    if let Some(metadata) = &video.metadata {
        let generated = DateTime::parse_from_rfc3339(&metadata.timestamp)
            .map(|at| {
                at.with_timezone(&Local)
                    .format("%Y-%m-%d %H:%M:%S")
                    .to_string()
            })
            .unwrap_or_else(|_| metadata.timestamp.clone());
        lines.push("Video Details:".to_string());
        lines.push(format!("  Duration: {}", metadata.duration));
        lines.push(format!("  Resolution: {}", metadata.resolution));
        lines.push(format!("  Format: {}", metadata.format));
        lines.push(format!("  Generated: {generated}"));
    }
    lines.join("\n")
}
