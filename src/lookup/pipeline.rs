use crate::lookup::error::LookupResult;
use crate::lookup::fetch::Fetch;
use crate::lookup::geo::GeoLookup;
use crate::lookup::ip::IpLookup;
use crate::lookup::passes::PassLookup;
use crate::lookup::types::{Coordinates, IpAddress, PassWindow};

/// IP -> coordinates -> pass windows, stopping at the first failure.
pub struct Pipeline<F> {
    fetcher: F,
    ip: IpLookup,
    geo: GeoLookup,
    passes: PassLookup,
}

impl<F: Fetch> Pipeline<F> {
    pub fn new(fetcher: F, ip: IpLookup, geo: GeoLookup, passes: PassLookup) -> Self {
        Self {
            fetcher,
            ip,
            geo,
            passes,
        }
    }

    pub async fn run(&self) -> LookupResult<Vec<PassWindow>> {
        let coords = self.locate(None).await?;
        self.passes_for(coords).await
    }

    pub async fn own_ip(&self) -> LookupResult<IpAddress> {
        let ip = self.ip.resolve(&self.fetcher).await?;
        log::info!("Public IP is {}", ip);
        Ok(ip)
    }

    /// Looks up the caller's own IP first unless one is given.
    pub async fn locate(&self, ip: Option<IpAddress>) -> LookupResult<Coordinates> {
        let ip = match ip {
            Some(ip) => ip,
            None => self.own_ip().await?,
        };
        let coords = self.geo.resolve(&self.fetcher, &ip).await?;
        log::info!("{} is located at {}", ip, coords);
        Ok(coords)
    }

    pub async fn passes_for(&self, coords: Coordinates) -> LookupResult<Vec<PassWindow>> {
        let passes = self.passes.resolve(&self.fetcher, coords).await?;
        log::info!("{} upcoming passes over {}", passes.len(), coords);
        Ok(passes)
    }

    #[cfg(test)]
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }
}
