use crate::types::{GenerationRequest, GenerationResponse, VideoMetadata};

pub const MIN_DURATION: u32 = 30;
pub const MAX_DURATION: u32 = 60;
/// Highest value the simulated progress reaches before the response lands.
pub const PROGRESS_CAP: u8 = 95;
pub const PROGRESS_DONE: u8 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Generating,
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedVideo {
    pub video_url: String,
    pub metadata: Option<VideoMetadata>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error("prompt is empty")]
    EmptyPrompt,
    #[error("a video is already being generated")]
    Busy,
    #[error("no generation in progress")]
    NotGenerating,
    #[error("generation has not resolved yet")]
    Unresolved,
}

/// Form state for one generation at a time.
///
/// `Idle -> Generating -> Done`, or back to `Idle` when the request fails or
/// the server reports `success: false`.
#[derive(Debug, Clone)]
pub struct GeneratorView {
    prompt: String,
    duration: u32,
    progress: u8,
    phase: Phase,
    resolved: bool,
    result: Option<GeneratedVideo>,
}

impl Default for GeneratorView {
    fn default() -> Self {
        Self::new()
    }
}

impl GeneratorView {
    pub fn new() -> Self {
        Self {
            prompt: String::new(),
            duration: MIN_DURATION,
            progress: 0,
            phase: Phase::Idle,
            resolved: false,
            result: None,
        }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn result(&self) -> Option<&GeneratedVideo> {
        self.result.as_ref()
    }

    pub fn is_editable(&self) -> bool {
        self.phase != Phase::Generating
    }

    pub fn can_submit(&self) -> bool {
        self.is_editable() && !self.prompt.trim().is_empty()
    }

    /// Returns `false` when the edit was ignored because the form is locked.
    pub fn set_prompt(&mut self, prompt: impl Into<String>) -> bool {
        if !self.is_editable() {
            return false;
        }
        self.prompt = prompt.into();
        true
    }

    /// Clamps to the slider range.
    pub fn set_duration(&mut self, minutes: u32) -> bool {
        if !self.is_editable() {
            return false;
        }
        self.duration = minutes.clamp(MIN_DURATION, MAX_DURATION);
        true
    }

    /// Locks the form and produces the request to send.
    pub fn begin(&mut self) -> Result<GenerationRequest, TransitionError> {
        if self.phase == Phase::Generating {
            return Err(TransitionError::Busy);
        }
        if self.prompt.trim().is_empty() {
            return Err(TransitionError::EmptyPrompt);
        }
        self.phase = Phase::Generating;
        self.progress = 0;
        self.resolved = false;
        self.result = None;
        Ok(GenerationRequest {
            prompt: self.prompt.clone(),
            duration: self.duration,
        })
    }

    /// Moves progress forward to `value`, never past [`PROGRESS_CAP`] and never backwards.
    pub fn advance(&mut self, value: u8) {
        if self.phase != Phase::Generating || self.resolved {
            return;
        }
        self.progress = self.progress.max(value.min(PROGRESS_CAP));
    }

    #[cfg(test)]
    fn tick(&mut self) {
        self.advance(self.progress.saturating_add(1));
    }

    /// Records the server's answer and pins progress at 100.
    pub fn resolve(&mut self, response: GenerationResponse) -> Result<(), TransitionError> {
        if self.phase != Phase::Generating {
            return Err(TransitionError::NotGenerating);
        }
        self.progress = PROGRESS_DONE;
        self.resolved = true;
        self.result = match response {
            GenerationResponse {
                success: true,
                video_url: Some(video_url),
                metadata,
                ..
            } => Some(GeneratedVideo {
                video_url,
                metadata,
            }),
            _ => None,
        };
        Ok(())
    }

    /// Leaves `Generating` once the settle delay after [`resolve`](Self::resolve) has passed.
    pub fn settle(&mut self) -> Result<Phase, TransitionError> {
        if self.phase != Phase::Generating {
            return Err(TransitionError::NotGenerating);
        }
        if !self.resolved {
            return Err(TransitionError::Unresolved);
        }
        self.phase = if self.result.is_some() {
            Phase::Done
        } else {
            Phase::Idle
        };
        Ok(self.phase)
    }

    /// Abandons the in-flight generation.
    pub fn fail(&mut self) {
        if self.phase != Phase::Generating {
            return;
        }
        self.phase = Phase::Idle;
        self.progress = 0;
        self.resolved = false;
        self.result = None;
    }

    /// "Generate New Video": clears prompt and result, keeps the duration.
    pub fn reset(&mut self) -> Result<(), TransitionError> {
        if self.phase == Phase::Generating {
            return Err(TransitionError::Busy);
        }
        self.phase = Phase::Idle;
        self.prompt.clear();
        self.progress = 0;
        self.resolved = false;
        self.result = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn success() -> GenerationResponse {
        GenerationResponse::generated(
            "https://example.com/v.mp4",
            VideoMetadata {
                duration: "30 minutes".into(),
                resolution: "1920x1080".into(),
                format: "MP4".into(),
                timestamp: "2024-01-01T00:00:00.000Z".into(),
                prompt: "ocean".into(),
            },
        )
    }

    fn generating(prompt: &str) -> GeneratorView {
        let mut view = GeneratorView::new();
        view.set_prompt(prompt);
        view.begin().unwrap();
        view
    }

    #[test]
    fn submit_needs_a_non_blank_prompt() {
        let mut view = GeneratorView::new();
        assert!(!view.can_submit());
        view.set_prompt("   ");
        assert!(!view.can_submit());
        assert_eq!(view.begin(), Err(TransitionError::EmptyPrompt));
        view.set_prompt("a sunset");
        assert!(view.can_submit());
    }

    #[test]
    fn duration_is_clamped_to_slider_range() {
        let mut view = GeneratorView::new();
        assert_eq!(view.duration(), 30);
        view.set_duration(10);
        assert_eq!(view.duration(), 30);
        view.set_duration(90);
        assert_eq!(view.duration(), 60);
        view.set_duration(45);
        assert_eq!(view.duration(), 45);
    }

    #[test]
    fn begin_locks_the_form() {
        let mut view = GeneratorView::new();
        view.set_prompt("rockets");
        view.set_duration(45);
        let request = view.begin().unwrap();
        assert_eq!(
            request,
            GenerationRequest {
                prompt: "rockets".into(),
                duration: 45
            }
        );
        assert_eq!(view.phase(), Phase::Generating);
        assert!(!view.can_submit());
        assert!(!view.set_prompt("other"));
        assert!(!view.set_duration(60));
        assert_eq!(view.prompt(), "rockets");
        assert_eq!(view.begin(), Err(TransitionError::Busy));
    }

    #[test]
    fn ticks_stop_at_the_cap() {
        let mut view = generating("x");
        for _ in 0..200 {
            let before = view.progress();
            view.tick();
            assert!(view.progress() >= before);
            assert!(view.progress() <= PROGRESS_CAP);
        }
        assert_eq!(view.progress(), PROGRESS_CAP);
    }

    #[test]
    fn advance_never_moves_backwards() {
        let mut view = generating("x");
        view.advance(40);
        view.advance(12);
        assert_eq!(view.progress(), 40);
        view.advance(250);
        assert_eq!(view.progress(), PROGRESS_CAP);
    }

    #[test]
    fn success_goes_to_done_after_settling() {
        let mut view = generating("ocean");
        view.advance(20);
        view.resolve(success()).unwrap();
        assert_eq!(view.progress(), PROGRESS_DONE);
        assert_eq!(view.phase(), Phase::Generating);
        view.tick();
        assert_eq!(view.progress(), PROGRESS_DONE);
        assert_eq!(view.settle(), Ok(Phase::Done));
        assert_eq!(
            view.result().map(|r| r.video_url.as_str()),
            Some("https://example.com/v.mp4")
        );
    }

    #[test]
    fn unsuccessful_body_settles_back_to_idle() {
        let mut view = generating("ocean");
        view.resolve(GenerationResponse::failed("Missing required parameters"))
            .unwrap();
        assert_eq!(view.progress(), PROGRESS_DONE);
        assert_eq!(view.settle(), Ok(Phase::Idle));
        assert!(view.result().is_none());
    }

    #[test]
    fn settle_requires_resolution() {
        let mut view = generating("ocean");
        assert_eq!(view.settle(), Err(TransitionError::Unresolved));
        let mut idle = GeneratorView::new();
        assert_eq!(idle.settle(), Err(TransitionError::NotGenerating));
        assert_eq!(idle.resolve(success()), Err(TransitionError::NotGenerating));
    }

    #[test]
    fn failure_returns_to_idle() {
        let mut view = generating("ocean");
        view.advance(30);
        view.fail();
        assert_eq!(view.phase(), Phase::Idle);
        assert_eq!(view.progress(), 0);
        assert_eq!(view.prompt(), "ocean");
        assert!(view.can_submit());
    }

    #[test]
    fn reset_clears_prompt_but_keeps_duration() {
        let mut view = GeneratorView::new();
        view.set_prompt("ocean");
        view.set_duration(50);
        view.begin().unwrap();
        assert_eq!(view.reset(), Err(TransitionError::Busy));
        view.resolve(success()).unwrap();
        view.settle().unwrap();
        view.reset().unwrap();
        assert_eq!(view.phase(), Phase::Idle);
        assert_eq!(view.prompt(), "");
        assert_eq!(view.progress(), 0);
        assert_eq!(view.duration(), 50);
        assert!(view.result().is_none());
    }

    #[test]
    fn done_view_can_submit_again() {
        let mut view = generating("ocean");
        view.resolve(success()).unwrap();
        view.settle().unwrap();
        assert!(view.can_submit());
        view.begin().unwrap();
        assert!(view.result().is_none());
        assert_eq!(view.progress(), 0);
    }
}
