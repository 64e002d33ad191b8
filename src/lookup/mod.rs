mod error;
mod fetch;
mod geo;
mod ip;
mod passes;
mod pipeline;
mod types;

pub use error::LookupError;
pub use fetch::HttpFetcher;
pub use geo::GeoLookup;
pub use ip::IpLookup;
pub use passes::{PassLookup, PassQuery};
pub use pipeline::Pipeline;
pub use types::{Coordinates, IpAddress, PassWindow};
