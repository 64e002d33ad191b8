use std::path::Path;
use std::time::Duration;

use reqwest::Url;
use serde::{Deserialize, Deserializer};
use thiserror::Error;

use crate::lookup::PassQuery;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid {name} endpoint '{url}': {message}")]
    Endpoint {
        name: &'static str,
        url: String,
        message: String,
    },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Credential for the geolocation service.
    pub geo_api_key: String,
    pub endpoints: EndpointsConfig,
    /// Per-request timeout, e.g. "10s" or "1m 30s".
    #[serde(deserialize_with = "deserialize_duration")]
    pub timeout: Duration,
    pub passes: PassesConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            geo_api_key: String::new(),
            endpoints: EndpointsConfig::default(),
            timeout: Duration::from_secs(10),
            passes: PassesConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EndpointsConfig {
    pub ip: String,
    pub geolocation: String,
    pub passes: String,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            ip: "https://api.ipify.org?format=json".to_string(),
            geolocation: "https://api.freegeoip.app/json/".to_string(),
            passes: "http://api.open-notify.org/iss-pass.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PassesConfig {
    pub count: Option<u8>,
    pub altitude_m: Option<f64>,
}

/// Parsed endpoint URLs.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub ip: Url,
    pub geolocation: Url,
    pub passes: Url,
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    pub fn from_str(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes to unit, not to a mapping.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Config = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    pub fn endpoints(&self) -> Result<Endpoints, ConfigError> {
        Ok(Endpoints {
            ip: parse_endpoint("ip", &self.endpoints.ip)?,
            geolocation: parse_endpoint("geolocation", &self.endpoints.geolocation)?,
            passes: parse_endpoint("passes", &self.endpoints.passes)?,
        })
    }

    pub fn pass_query(&self) -> PassQuery {
        PassQuery {
            count: self.passes.count,
            altitude_m: self.passes.altitude_m,
        }
    }
}

fn parse_endpoint(name: &'static str, url: &str) -> Result<Url, ConfigError> {
    let err = |message: String| ConfigError::Endpoint {
        name,
        url: url.to_string(),
        message,
    };
    let parsed = Url::parse(url).map_err(|e| err(e.to_string()))?;
    // Stages append path segments and query pairs to the endpoint.
    if parsed.cannot_be_a_base() {
        return Err(err("not a hierarchical http(s) URL".to_string()));
    }
    Ok(parsed)
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    humantime::parse_duration(s.trim()).map_err(serde::de::Error::custom)
}
