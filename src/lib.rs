//! Demo video generation service and its terminal client.
//!
//! The server exposes `POST /api/generate`, which validates a prompt and a
//! duration and answers with a fixed sample video. The [`client`] module holds
//! the form state machine, the cosmetic progress timer and the download helper.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod state;
pub mod types;
pub mod utils;
