use std::fmt;

use serde::Deserialize;

/// Highest absolute latitude the pass prediction service accepts.
pub const PASS_SERVICE_MAX_LATITUDE: f64 = 80.0;
pub const PASS_SERVICE_MAX_LONGITUDE: f64 = 180.0;

/// Public address of the caller as reported by the IP echo service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IpAddress(String);

impl IpAddress {
    /// Returns `None` for an empty or blank string.
    pub fn new(ip: &str) -> Option<Self> {
        let ip = ip.trim();
        if ip.is_empty() {
            None
        } else {
            Some(Self(ip.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IpAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// The pass service covers a narrower band than valid Earth coordinates.
    /// NaN never qualifies.
    pub fn within_pass_service_range(&self) -> bool {
        self.latitude.abs() <= PASS_SERVICE_MAX_LATITUDE
            && self.longitude.abs() <= PASS_SERVICE_MAX_LONGITUDE
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}

/// A predicted overhead pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PassWindow {
    /// Epoch seconds
    pub risetime: i64,
    /// Seconds
    pub duration: u64,
}
