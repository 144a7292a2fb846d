//! Outbound listing fetch
//!
//! The pipeline only needs "markup for this URL"; `Fetcher` keeps the
//! transport swappable so the server can be exercised without a network.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT_LANGUAGE;
use tracing::info;
use url::Url;

use crate::error::FetchError;

#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch the page body. Non-2xx responses are errors.
    async fn fetch(&self, url: &Url, language: Option<&str>) -> Result<Vec<u8>, FetchError>;
}

/// `reqwest`-backed fetcher sharing one connection pool across requests
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &Url, language: Option<&str>) -> Result<Vec<u8>, FetchError> {
        info!(%url, "fetching listing");

        let mut request = self.client.get(url.clone());
        if let Some(language) = language {
            request = request.header(ACCEPT_LANGUAGE, accept_language(language));
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        Ok(response.bytes().await?.to_vec())
    }
}

pub fn accept_language(language: &str) -> String {
    format!("{language};q=0.5")
}
