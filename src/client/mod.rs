pub mod api;
pub mod download;
pub mod interactive;
pub mod progress;
pub mod session;
pub mod terminal;
pub mod view;

pub use api::{ClientError, GenerateClient, Generator};
pub use download::{download, download_filename};
pub use interactive::{after_done, save_result, AfterDone};
pub use progress::ProgressTicker;
pub use session::{run_generation, Render, SessionSettings};
pub use terminal::TerminalRenderer;
pub use view::{GeneratedVideo, GeneratorView, Phase, TransitionError};
