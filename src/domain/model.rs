use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
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
}

/// Outcome of resolving one place name.
///
/// Both fields empty is the unresolved marker: the provider found nothing
/// or every attempt failed. It is a terminal, cacheable result.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct GeocodeResult {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl GeocodeResult {
    pub fn resolved(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: Some(latitude),
            longitude: Some(longitude),
        }
    }

    pub fn unresolved() -> Self {
        Self::default()
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some(Coordinates::new(lat, lon)),
            _ => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.coordinates().is_some()
    }
}

/// Place name -> resolution, owned by a single batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResolutionCache {
    entries: HashMap<String, GeocodeResult>,
}

impl ResolutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&GeocodeResult> {
        self.entries.get(name)
    }

    /// Like `get`, but names never seen map to the unresolved marker.
    pub fn lookup(&self, name: &str) -> GeocodeResult {
        self.entries.get(name).copied().unwrap_or_default()
    }

    pub fn insert(&mut self, name: String, result: GeocodeResult) {
        self.entries.insert(name, result);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn resolved_count(&self) -> usize {
        self.entries.values().filter(|r| r.is_resolved()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &GeocodeResult)> {
        self.entries.iter()
    }

    pub fn into_inner(self) -> HashMap<String, GeocodeResult> {
        self.entries
    }
}

impl FromIterator<(String, GeocodeResult)> for ResolutionCache {
    fn from_iter<T: IntoIterator<Item = (String, GeocodeResult)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Stable key of an event, independent of how its name is displayed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Derive an id from the fields that identify an edition of a fair.
    pub fn derive(name: &str, city: &str, state: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(name.trim());
        hasher.update("\u{1f}");
        hasher.update(city.trim());
        hasher.update("\u{1f}");
        hasher.update(state.trim());
        let digest = hex::encode(hasher.finalize());
        Self(digest[..16].to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// 展会记录
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventRecord {
    pub id: EventId,
    pub name: String,
    pub month: String,
    pub segment: String,
    pub dates: String,
    pub city: String,
    pub state: String,
}

impl EventRecord {
    /// `"{city}, {state}"`, or empty when either part is missing.
    pub fn place_query(&self) -> String {
        let city = self.city.trim();
        let state = self.state.trim();
        if city.is_empty() || state.is_empty() {
            return String::new();
        }
        format!("{}, {}", city, state)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Exhibitor {
    pub name: String,
    #[serde(default)]
    pub booth: Option<String>,
    #[serde(default)]
    pub segment: Option<String>,
}

/// Exhibitor lists keyed by event.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExhibitorDirectory {
    entries: HashMap<EventId, Vec<Exhibitor>>,
}

impl ExhibitorDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exhibitors(&self, id: &EventId) -> &[Exhibitor] {
        self.entries.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn insert(&mut self, id: EventId, exhibitors: Vec<Exhibitor>) {
        self.entries.insert(id, exhibitors);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(city: &str, state: &str) -> EventRecord {
        EventRecord {
            id: EventId::derive("Agrishow", city, state),
            name: "Agrishow".to_string(),
            month: "Abril".to_string(),
            segment: "Máquinas".to_string(),
            dates: "28/04 - 02/05".to_string(),
            city: city.to_string(),
            state: state.to_string(),
        }
    }

    #[test]
    fn place_query_joins_city_and_state() {
        assert_eq!(
            record(" Ribeirão Preto ", "SP").place_query(),
            "Ribeirão Preto, SP"
        );
    }

    #[test]
    fn place_query_is_empty_without_state() {
        assert_eq!(record("Ribeirão Preto", "  ").place_query(), "");
        assert_eq!(record("", "SP").place_query(), "");
    }

    #[test]
    fn derived_event_id_is_stable_and_short() {
        let a = EventId::derive("Agrishow", "Ribeirão Preto", "SP");
        let b = EventId::derive(" Agrishow ", "Ribeirão Preto", "SP");
        let c = EventId::derive("Agrishow", "Ribeirão Preto", "MG");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.as_str().len(), 16);
    }

    #[test]
    fn unresolved_marker_has_no_coordinates() {
        let marker = GeocodeResult::unresolved();
        assert!(!marker.is_resolved());
        assert_eq!(marker.coordinates(), None);
        assert_eq!(
            serde_json::to_string(&marker).unwrap(),
            r#"{"latitude":null,"longitude":null}"#
        );
    }

    #[test]
    fn cache_lookup_defaults_to_unresolved() {
        let mut cache = ResolutionCache::new();
        cache.insert(
            "São Paulo, SP".to_string(),
            GeocodeResult::resolved(-23.55, -46.63),
        );
        assert!(cache.lookup("São Paulo, SP").is_resolved());
        assert_eq!(cache.lookup("Nowhere, ZZ"), GeocodeResult::unresolved());
        assert_eq!(cache.resolved_count(), 1);
    }

    #[test]
    fn missing_exhibitor_list_is_empty() {
        let directory = ExhibitorDirectory::new();
        assert!(directory.exhibitors(&EventId::new("abc")).is_empty());
    }
}
