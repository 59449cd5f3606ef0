use std::time::Duration;

use tokio::time;
use tracing::{debug, error};

use super::{
    api::Generator,
    progress::ProgressTicker,
    view::{GeneratorView, Phase, TransitionError, PROGRESS_CAP},
};

pub const DEFAULT_TICK: Duration = Duration::from_millis(200);
pub const DEFAULT_SETTLE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy)]
pub struct SessionSettings {
    /// Interval between simulated progress steps.
    pub tick: Duration,
    /// Pause at 100% before the result is revealed.
    pub settle: Duration,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            tick: DEFAULT_TICK,
            settle: DEFAULT_SETTLE,
        }
    }
}

/// Receives the view after every visible change.
pub trait Render {
    fn render(&mut self, view: &GeneratorView);
}

impl<F: FnMut(&GeneratorView)> Render for F {
    fn render(&mut self, view: &GeneratorView) {
        self(view)
    }
}

/// Submits the form and drives it to `Done` or back to `Idle`.
///
/// The progress ticker races the request; it is cancelled as soon as the
/// request resolves, whether it succeeded or not. Transport errors are only
/// logged.
pub async fn run_generation<G, R>(
    view: &mut GeneratorView,
    backend: &G,
    settings: SessionSettings,
    renderer: &mut R,
) -> Result<Phase, TransitionError>
where
    G: Generator,
    R: Render + ?Sized,
{
    let request = view.begin()?;
    renderer.render(view);

    let ticker = ProgressTicker::start(settings.tick, PROGRESS_CAP);
    let mut progress = ticker.subscribe();
    let call = backend.generate(&request);
    tokio::pin!(call);

    let outcome = loop {
        tokio::select! {
            outcome = &mut call => break outcome,
            Ok(()) = progress.changed() => {
                let value = *progress.borrow_and_update();
                view.advance(value);
                renderer.render(view);
            }
        }
    };
    let last = ticker.cancel();
    debug!(progress = last, "Progress ticker cancelled");

    match outcome {
        Ok(response) => {
            view.resolve(response)?;
            renderer.render(view);
            time::sleep(settings.settle).await;
            view.settle()?;
        }
        Err(e) => {
            error!(error = %e, "Error generating video");
            view.fail();
        }
    }
    renderer.render(view);
    Ok(view.phase())
}
