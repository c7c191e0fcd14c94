//! Shared test doubles.

#![allow(dead_code)]

use async_trait::async_trait;
use fairmap::domain::error::LookupError;
use fairmap::domain::model::Coordinates;
use fairmap::domain::traits::Geocoder;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

pub type Reply = Result<Option<Coordinates>, LookupError>;

/// Geocoder that replays scripted replies per place and records calls.
/// Places without a script (or with an exhausted one) get "no match".
#[derive(Default)]
pub struct MockGeocoder {
    replies: Mutex<HashMap<String, VecDeque<Reply>>>,
    calls: Mutex<Vec<String>>,
}

impl MockGeocoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn found(self, place: &str, latitude: f64, longitude: f64) -> Self {
        self.reply(place, Ok(Some(Coordinates::new(latitude, longitude))))
    }

    pub fn transient(self, place: &str) -> Self {
        self.reply(
            place,
            Err(LookupError::Transient("operation timed out".to_string())),
        )
    }

    pub fn reply(self, place: &str, reply: Reply) -> Self {
        self.replies
            .lock()
            .unwrap()
            .entry(place.to_string())
            .or_default()
            .push_back(reply);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_for(&self, place: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| *c == place)
            .count()
    }
}

#[async_trait]
impl Geocoder for MockGeocoder {
    async fn lookup(&self, place: &str) -> Reply {
        self.calls.lock().unwrap().push(place.to_string());
        self.replies
            .lock()
            .unwrap()
            .get_mut(place)
            .and_then(VecDeque::pop_front)
            .unwrap_or(Ok(None))
    }
}

/// Geocoder whose every call fails transiently.
pub struct DownGeocoder;

#[async_trait]
impl Geocoder for DownGeocoder {
    async fn lookup(&self, _place: &str) -> Reply {
        Err(LookupError::Transient("connection refused".to_string()))
    }
}
