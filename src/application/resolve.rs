use crate::domain::error::FairError;
use crate::domain::model::ResolutionCache;
use crate::domain::resolver::{LocationResolver, ResolverConfig};
use crate::domain::traits::{GeocodeStore, Geocoder, ResolveObserver};
use crate::infrastructure::network::client::NominatimGeocoder;
use crate::state::AppState;
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Resolve place names through the configured Nominatim instance,
/// seeding from and writing back to the persistent store.
pub async fn resolve_places(
    state: &AppState,
    names: &[String],
    no_cache: bool,
    observer: &dyn ResolveObserver,
) -> Result<ResolutionCache, FairError> {
    // Don't hold the config lock across the batch
    let (geocoder_config, persist) = {
        let config = state.config.read().await;
        (config.geocoder.clone(), config.cache.persist)
    };

    let geocoder = NominatimGeocoder::new(state.http_client.clone(), geocoder_config.endpoint.as_str());
    let store = state.store();

    resolve_with_store(
        geocoder,
        geocoder_config.resolver_config(),
        &store,
        names,
        persist && !no_cache,
        observer,
    )
    .await
}

/// Run one batch: seed the resolver with the stored entries for `names`,
/// resolve the rest, then persist what was resolved.
///
/// The returned cache holds exactly the distinct names asked for. Store
/// failures are logged and skipped.
pub async fn resolve_with_store<G, S>(
    geocoder: G,
    config: ResolverConfig,
    store: &S,
    names: &[String],
    use_store: bool,
    observer: &dyn ResolveObserver,
) -> Result<ResolutionCache, FairError>
where
    G: Geocoder,
    S: GeocodeStore + ?Sized,
{
    // A broken store only costs the seed; it never fails the batch
    let seed = if use_store {
        match store.load_all().await {
            Ok(stored) => {
                let wanted: HashSet<&str> = names.iter().map(String::as_str).collect();
                stored
                    .into_inner()
                    .into_iter()
                    .filter(|(name, _)| wanted.contains(name.as_str()))
                    .collect::<ResolutionCache>()
            }
            Err(e) => {
                warn!(error = %e, "resolution store unreadable, starting from an empty cache");
                ResolutionCache::new()
            }
        }
    } else {
        ResolutionCache::new()
    };
    let seeded = seed.len();

    let mut resolver = LocationResolver::new(geocoder, config);
    let cache = resolver.resolve_with(names, seed, observer).await;

    if use_store {
        match store.save(&cache).await {
            Ok(written) => debug!(written, "resolution store updated"),
            Err(e) => warn!(error = %e, "failed to persist resolutions"),
        }
    }

    info!(
        names = cache.len(),
        seeded,
        calls = resolver.calls_made(),
        resolved = cache.resolved_count(),
        "places resolved"
    );

    Ok(cache)
}
