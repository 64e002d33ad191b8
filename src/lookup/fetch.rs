use std::future::Future;
use std::time::Duration;

use reqwest::{Client, Url};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FetchError {
    /// Connection, DNS, TLS or timeout failure; no usable response.
    #[error("{0}")]
    Transport(String),
    #[error("status {code}: {body}")]
    Status { code: u16, body: String },
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        // The URL can carry the geolocation API key.
        FetchError::Transport(err.without_url().to_string())
    }
}

/// Issues a single GET and yields the body of a 2xx response.
pub trait Fetch {
    fn fetch(&self, url: &Url) -> impl Future<Output = Result<String, FetchError>> + Send;
}

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        log::debug!("GET {}{}", url.origin().ascii_serialization(), url.path());

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();

        if !status.is_success() {
            log::debug!("{} answered {}", url.path(), status);
            // The status alone classifies the reply; a truncated body is still a status error.
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                code: status.as_u16(),
                body,
            });
        }

        Ok(response.text().await?)
    }
}
