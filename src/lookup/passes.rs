use reqwest::Url;
use serde::Deserialize;

use crate::lookup::error::{LookupError, LookupResult, Stage};
use crate::lookup::fetch::Fetch;
use crate::lookup::types::{Coordinates, PassWindow};

#[derive(Debug, Deserialize)]
struct PassResponse {
    message: Option<String>,
    reason: Option<String>,
    response: Option<Vec<PassWindow>>,
}

/// Optional knobs the pass service understands.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PassQuery {
    /// Number of passes to request (`n`).
    pub count: Option<u8>,
    /// Observer altitude in metres (`alt`).
    pub altitude_m: Option<f64>,
}

/// Fetches upcoming ISS passes for a location.
pub struct PassLookup {
    endpoint: Url,
    query: PassQuery,
}

impl PassLookup {
    pub fn new(endpoint: Url, query: PassQuery) -> Self {
        Self { endpoint, query }
    }

    pub fn url_for(&self, coords: Coordinates) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("lat", &coords.latitude.to_string())
                .append_pair("lon", &coords.longitude.to_string());
            if let Some(n) = self.query.count {
                pairs.append_pair("n", &n.to_string());
            }
            if let Some(alt) = self.query.altitude_m {
                pairs.append_pair("alt", &alt.to_string());
            }
        }
        url
    }

    /// Out-of-range coordinates are rejected without touching the network.
    pub async fn resolve<F: Fetch>(
        &self,
        fetcher: &F,
        coords: Coordinates,
    ) -> LookupResult<Vec<PassWindow>> {
        if !coords.within_pass_service_range() {
            return Err(LookupError::InvalidCoordinates(coords));
        }

        let body = fetcher
            .fetch(&self.url_for(coords))
            .await
            .map_err(|e| LookupError::fetch(Stage::PassTimes, e))?;
        parse_passes(&body)
    }
}

fn parse_passes(body: &str) -> LookupResult<Vec<PassWindow>> {
    let response: PassResponse =
        serde_json::from_str(body).map_err(|e| LookupError::malformed(Stage::PassTimes, e))?;

    match response.response {
        Some(passes) => Ok(passes),
        None => {
            let message = match (response.message.as_deref(), response.reason) {
                (Some("failure"), Some(reason)) => format!("service reported failure: {}", reason),
                _ => "missing 'response'".to_string(),
            };
            Err(LookupError::malformed(Stage::PassTimes, message))
        }
    }
}
