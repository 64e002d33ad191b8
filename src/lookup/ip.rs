use reqwest::Url;
use serde::Deserialize;

use crate::lookup::error::{LookupError, LookupResult, Stage};
use crate::lookup::fetch::Fetch;
use crate::lookup::types::IpAddress;

#[derive(Debug, Deserialize)]
struct IpResponse {
    ip: Option<String>,
}

/// Asks an IP echo service for the caller's public address.
pub struct IpLookup {
    endpoint: Url,
}

impl IpLookup {
    pub fn new(endpoint: Url) -> Self {
        Self { endpoint }
    }

    pub async fn resolve<F: Fetch>(&self, fetcher: &F) -> LookupResult<IpAddress> {
        let body = fetcher
            .fetch(&self.endpoint)
            .await
            .map_err(|e| LookupError::fetch(Stage::Ip, e))?;
        parse_ip(&body)
    }
}

fn parse_ip(body: &str) -> LookupResult<IpAddress> {
    let response: IpResponse =
        serde_json::from_str(body).map_err(|e| LookupError::malformed(Stage::Ip, e))?;

    response
        .ip
        .as_deref()
        .and_then(IpAddress::new)
        .ok_or_else(|| LookupError::malformed(Stage::Ip, "missing 'ip'"))
}
