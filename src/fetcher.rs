use crate::config::FetchConfig;
use reqwest::{redirect::Policy, Client, StatusCode};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("remote returned HTTP {}", .0.as_u16())]
    Status(StatusCode),
}

/// A fetched HTML page
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// URL after redirects
    pub final_url: Url,
    pub body: String,
}

/// HTTP client for recipe pages, shared by all requests
#[derive(Debug, Clone)]
pub struct PageFetcher {
    http: Client,
}

impl PageFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        let http = Client::builder()
            .user_agent(config.user_agent.as_str())
            .redirect(Policy::limited(config.max_redirects))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { http })
    }

    /// GET `raw_url` and return its body. Anything but `200 OK` is an error.
    pub async fn fetch(&self, raw_url: &str) -> Result<FetchedPage, FetchError> {
        let url = Url::parse(raw_url.trim())?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(FetchError::UnsupportedScheme(url.scheme().to_string()));
        }

        info!(url = %url, "Getting URL");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status(status));
        }

        let final_url = response.url().clone();
        let body = response.text().await?;
        debug!(url = %final_url, bytes = body.len(), "Fetched page");

        Ok(FetchedPage { final_url, body })
    }
}
