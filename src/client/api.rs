use std::future::Future;

use tracing::{debug, instrument};
use url::Url;

use super::view::TransitionError;
use crate::types::{GenerationRequest, GenerationResponse};

pub const GENERATE_PATH: &str = "/api/generate";

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to write download: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    View(#[from] TransitionError),
}

/// Anything that can answer a generation request.
pub trait Generator {
    fn generate(
        &self,
        request: &GenerationRequest,
    ) -> impl Future<Output = Result<GenerationResponse, ClientError>> + Send;
}

/// HTTP client for the generation endpoint.
#[derive(Debug, Clone)]
pub struct GenerateClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl GenerateClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_http(reqwest::Client::new(), base_url)
    }

    pub fn with_http(http: reqwest::Client, base_url: &str) -> Result<Self, ClientError> {
        let endpoint = Url::parse(base_url)?.join(GENERATE_PATH)?;
        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Posts the request and decodes the JSON body whatever the status code;
    /// failures are reported inside the body via `success: false`.
    #[instrument(skip(self, request), fields(endpoint = %self.endpoint))]
    pub async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, ClientError> {
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await?;
        debug!(status = %response.status(), "Generation endpoint answered");
        Ok(response.json::<GenerationResponse>().await?)
    }
}

impl Generator for GenerateClient {
    fn generate(
        &self,
        request: &GenerationRequest,
    ) -> impl Future<Output = Result<GenerationResponse, ClientError>> + Send {
        GenerateClient::generate(self, request)
    }
}
