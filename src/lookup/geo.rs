use reqwest::Url;
use serde::Deserialize;

use crate::lookup::error::{LookupError, LookupResult, Stage};
use crate::lookup::fetch::Fetch;
use crate::lookup::types::{Coordinates, IpAddress};

#[derive(Debug, Deserialize)]
struct GeoResponse {
    latitude: Option<f64>,
    longitude: Option<f64>,
}

/// Resolves an IP address to coordinates through a keyed geolocation service.
pub struct GeoLookup {
    endpoint: Url,
    api_key: String,
}

impl GeoLookup {
    pub fn new(endpoint: Url, api_key: impl Into<String>) -> Self {
        Self {
            endpoint,
            api_key: api_key.into(),
        }
    }

    /// `<endpoint>/<ip>?apikey=<key>`
    pub fn url_for(&self, ip: &IpAddress) -> Url {
        let mut url = self.endpoint.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(ip.as_str());
        }
        url.query_pairs_mut().append_pair("apikey", &self.api_key);
        url
    }

    pub async fn resolve<F: Fetch>(&self, fetcher: &F, ip: &IpAddress) -> LookupResult<Coordinates> {
        let body = fetcher
            .fetch(&self.url_for(ip))
            .await
            .map_err(|e| LookupError::fetch(Stage::Coordinates, e))?;
        parse_coordinates(&body)
    }
}

fn parse_coordinates(body: &str) -> LookupResult<Coordinates> {
    let response: GeoResponse =
        serde_json::from_str(body).map_err(|e| LookupError::malformed(Stage::Coordinates, e))?;

    match (response.latitude, response.longitude) {
        (Some(latitude), Some(longitude)) => Ok(Coordinates::new(latitude, longitude)),
        (None, _) => Err(LookupError::malformed(Stage::Coordinates, "missing 'latitude'")),
        (_, None) => Err(LookupError::malformed(Stage::Coordinates, "missing 'longitude'")),
    }
}
