use crate::domain::error::LookupError;
use crate::domain::model::Coordinates;
use crate::domain::traits::Geocoder;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::trace;

// Nominatim search response item
#[derive(Deserialize, Debug)]
struct NominatimPlace {
    lat: String,
    lon: String,
    #[serde(default)]
    display_name: Option<String>,
}

/// Forward geocoding against a Nominatim instance
pub struct NominatimGeocoder {
    client: Client,
    endpoint: String,
}

impl NominatimGeocoder {
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn search_url(&self) -> String {
        format!("{}/search", self.endpoint)
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn lookup(&self, place: &str) -> Result<Option<Coordinates>, LookupError> {
        query_nominatim(&self.client, &self.search_url(), place).await
    }
}

async fn query_nominatim(
    client: &Client,
    url: &str,
    place: &str,
) -> Result<Option<Coordinates>, LookupError> {
    let params = [("q", place), ("format", "json"), ("limit", "1")];

    let response = client.get(url).query(&params).send().await?;
    classify_status(response.status())?;

    // the status line arrived, so a broken body is a dropped connection
    let body = response
        .text()
        .await
        .map_err(|e| LookupError::Transient(format!("reading response body: {}", e)))?;
    parse_search_response(&body)
}

fn classify_status(status: StatusCode) -> Result<(), LookupError> {
    if status.is_success() {
        return Ok(());
    }
    if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
        return Err(LookupError::Transient(format!("HTTP {}", status)));
    }
    Err(LookupError::Rejected(format!("HTTP {}", status)))
}

fn parse_search_response(body: &str) -> Result<Option<Coordinates>, LookupError> {
    let places: Vec<NominatimPlace> =
        serde_json::from_str(body).map_err(|e| LookupError::Malformed(e.to_string()))?;

    let Some(place) = places.into_iter().next() else {
        return Ok(None);
    };

    let latitude = place
        .lat
        .trim()
        .parse::<f64>()
        .map_err(|_| LookupError::Malformed(format!("latitude '{}'", place.lat)))?;
    let longitude = place
        .lon
        .trim()
        .parse::<f64>()
        .map_err(|_| LookupError::Malformed(format!("longitude '{}'", place.lon)))?;

    if let Some(name) = &place.display_name {
        trace!(matched = %name, "nominatim match");
    }

    Ok(Some(Coordinates::new(latitude, longitude)))
}
