use std::{env, process, str::FromStr, time::Duration};

use crate::utils::valid_url;

pub const DEFAULT_DEMO_VIDEO_URL: &str =
    "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/BigBuckBunny.mp4";
pub const DEFAULT_SERVER_ADDRESS: &str = "0.0.0.0:8080";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_addr: String,
    pub demo_video_url: String,
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_addr: DEFAULT_SERVER_ADDRESS.to_string(),
            demo_video_url: DEFAULT_DEMO_VIDEO_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Reads the server configuration from the environment.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `SERVER_ADDRESS`       | `0.0.0.0:8080`             |
    /// | `DEMO_VIDEO_URL`       | Big Buck Bunny sample      |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    pub fn load() -> Self {
        let server_addr = get_env_or("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS);
        let demo_video_url = get_env_or("DEMO_VIDEO_URL", DEFAULT_DEMO_VIDEO_URL);
        if !valid_url(&demo_video_url) {
            tracing::error!(url = %demo_video_url, "DEMO_VIDEO_URL is not a valid URL.");
            process::exit(1);
        }
        let request_timeout = Duration::from_secs(get_env_parsed(
            "REQUEST_TIMEOUT_SECS",
            DEFAULT_REQUEST_TIMEOUT_SECS,
        ));
        Self {
            server_addr,
            demo_video_url,
            request_timeout,
        }
    }
}

fn get_env_or(var: &str, default: &str) -> String {
    env::var(var).unwrap_or_else(|_| {
        tracing::warn!(
            "{} environment variable not set, using default: {}",
            var,
            default
        );
        default.to_string()
    })
}

fn get_env_parsed<T>(var: &str, default: T) -> T
where
    T: FromStr + std::fmt::Display,
{
    match env::var(var) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(
                "{} environment variable is invalid ({}), using default: {}",
                var,
                raw,
                default
            );
            default
        }),
        Err(_) => default,
    }
}
