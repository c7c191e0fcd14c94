//! Place name resolution with deduplication, pacing and bounded retries.
//!
//! A batch makes at most one call sequence (first attempt plus retries) per
//! distinct name. Every distinct name ends up in the returned cache, either
//! with coordinates or with the unresolved marker, and no single name's
//! failure aborts the batch.

use crate::domain::model::{GeocodeResult, ResolutionCache};
use crate::domain::throttle::Throttle;
use crate::domain::traits::{Geocoder, NoopObserver, ResolveObserver};
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Minimum spacing between consecutive provider calls
    pub min_delay: Duration,
    /// Extra attempts after a transient failure
    pub max_retries: u32,
    /// Identifies the caller to the provider; no effect on resolution
    pub client_identifier: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            min_delay: Duration::from_secs(1),
            max_retries: 1,
            client_identifier: concat!("fairmap/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

pub struct LocationResolver<G> {
    geocoder: G,
    config: ResolverConfig,
    throttle: Throttle,
    calls: usize,
}

impl<G: Geocoder> LocationResolver<G> {
    pub fn new(geocoder: G, config: ResolverConfig) -> Self {
        let throttle = Throttle::new(config.min_delay);
        Self {
            geocoder,
            config,
            throttle,
            calls: 0,
        }
    }

    /// Provider calls issued so far, retries included.
    pub fn calls_made(&self) -> usize {
        self.calls
    }

    pub async fn resolve<I, S>(&mut self, names: I) -> ResolutionCache
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.resolve_with(names, ResolutionCache::new(), &NoopObserver)
            .await
    }

    /// Resolve on top of an externally kept cache. Seeded names are never
    /// sent to the provider again.
    pub async fn resolve_seeded<I, S>(&mut self, names: I, seed: ResolutionCache) -> ResolutionCache
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.resolve_with(names, seed, &NoopObserver).await
    }

    pub async fn resolve_with<I, S>(
        &mut self,
        names: I,
        seed: ResolutionCache,
        observer: &dyn ResolveObserver,
    ) -> ResolutionCache
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut cache = seed;
        let pending = distinct_in_order(names);
        let calls_before = self.calls;

        observer.on_start(pending.len());
        for name in &pending {
            if let Some(known) = cache.get(name) {
                observer.on_resolved(name, known);
                continue;
            }
            let result = self.resolve_one(name).await;
            observer.on_resolved(name, &result);
            cache.insert(name.clone(), result);
        }
        observer.on_finish();

        let resolved = pending
            .iter()
            .filter(|name| cache.lookup(name).is_resolved())
            .count();
        info!(
            distinct = pending.len(),
            resolved,
            unresolved = pending.len() - resolved,
            calls = self.calls - calls_before,
            "geocoding batch finished"
        );

        cache
    }

    async fn resolve_one(&mut self, name: &str) -> GeocodeResult {
        let query = name.trim();
        if query.is_empty() {
            debug!("skipping blank place name");
            return GeocodeResult::unresolved();
        }

        let mut attempt: u32 = 0;
        loop {
            self.throttle.wait().await;
            self.calls += 1;

            match self.geocoder.lookup(query).await {
                Ok(Some(coords)) => {
                    debug!(place = query, lat = coords.latitude, lon = coords.longitude, "resolved");
                    return GeocodeResult::resolved(coords.latitude, coords.longitude);
                }
                Ok(None) => {
                    debug!(place = query, "provider found no match");
                    return GeocodeResult::unresolved();
                }
                Err(e) if e.is_transient() && attempt < self.config.max_retries => {
                    attempt += 1;
                    warn!(place = query, attempt, error = %e, "lookup failed, retrying");
                }
                Err(e) => {
                    warn!(place = query, error = %e, "lookup failed, marking unresolved");
                    return GeocodeResult::unresolved();
                }
            }
        }
    }
}

/// Distinct names in first-occurrence order.
pub fn distinct_in_order<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    names
        .into_iter()
        .filter_map(|name| {
            let name = name.as_ref();
            if seen.insert(name.to_string()) {
                Some(name.to_string())
            } else {
                None
            }
        })
        .collect()
}
