use crate::domain::error::{FairError, LookupError};
use crate::domain::model::{Coordinates, GeocodeResult, ResolutionCache};
use async_trait::async_trait;

/// Trait for geocoding providers
///
/// A single request/response capability. Retry and pacing belong to the
/// resolver, not to implementations of this trait.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Look up a place name. `Ok(None)` means the provider found no match.
    async fn lookup(&self, place: &str) -> Result<Option<Coordinates>, LookupError>;
}

#[async_trait]
impl<G: Geocoder + ?Sized> Geocoder for &G {
    async fn lookup(&self, place: &str) -> Result<Option<Coordinates>, LookupError> {
        (**self).lookup(place).await
    }
}

/// Trait for persisting resolutions between runs
#[async_trait]
pub trait GeocodeStore: Send + Sync {
    /// Load every stored resolution
    async fn load_all(&self) -> Result<ResolutionCache, FairError>;

    /// Upsert the resolved entries of a cache, returning how many were written
    async fn save(&self, cache: &ResolutionCache) -> Result<usize, FairError>;

    async fn count(&self) -> Result<usize, FairError>;

    async fn clear(&self) -> Result<usize, FairError>;
}

/// Progress reporting for a resolution batch.
pub trait ResolveObserver: Send + Sync {
    fn on_start(&self, _total: usize) {}

    fn on_resolved(&self, _name: &str, _result: &GeocodeResult) {}

    fn on_finish(&self) {}
}

pub struct NoopObserver;

impl ResolveObserver for NoopObserver {}
