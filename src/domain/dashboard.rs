//! Session-scoped view state for the event dashboard.
//!
//! Every interaction is a [`DashboardEvent`] applied to an explicit
//! [`SessionState`]; the visible view is then recomputed from scratch by
//! [`derive_view`] over the immutable [`Dataset`].

use crate::domain::model::{
    Coordinates, EventId, EventRecord, Exhibitor, ExhibitorDirectory, GeocodeResult,
    ResolutionCache,
};
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};

/// Centre of Brazil, the default map viewport.
pub const MAP_CENTER: Coordinates = Coordinates {
    latitude: -14.2350,
    longitude: -51.9253,
};
pub const MAP_ZOOM: u8 = 4;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GeocodedEvent {
    #[serde(flatten)]
    pub record: EventRecord,
    pub location: GeocodeResult,
}

/// Base dataset: event records joined to their resolved locations.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    events: Vec<GeocodedEvent>,
}

impl Dataset {
    pub fn attach(records: Vec<EventRecord>, cache: &ResolutionCache) -> Self {
        let events = records
            .into_iter()
            .map(|record| {
                let location = cache.lookup(&record.place_query());
                GeocodedEvent { record, location }
            })
            .collect();
        Self { events }
    }

    pub fn events(&self) -> &[GeocodedEvent] {
        &self.events
    }

    pub fn get(&self, id: &EventId) -> Option<&GeocodedEvent> {
        self.events.iter().find(|e| &e.record.id == id)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Multi-select filters. An empty set places no constraint.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Filters {
    pub months: BTreeSet<String>,
    pub segments: BTreeSet<String>,
    pub states: BTreeSet<String>,
}

impl Filters {
    pub fn matches(&self, record: &EventRecord) -> bool {
        fn allows(set: &BTreeSet<String>, value: &str) -> bool {
            set.is_empty() || set.contains(value)
        }
        allows(&self.months, &record.month)
            && allows(&self.segments, &record.segment)
            && allows(&self.states, &record.state)
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty() && self.segments.is_empty() && self.states.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardEvent {
    SetMonths(Vec<String>),
    SetSegments(Vec<String>),
    SetStates(Vec<String>),
    Select(EventId),
    ClearSelection,
    ClearFilters,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub filters: Filters,
    pub selected: Option<EventId>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dispatch(&mut self, event: DashboardEvent) {
        match event {
            DashboardEvent::SetMonths(values) => self.filters.months = values.into_iter().collect(),
            DashboardEvent::SetSegments(values) => {
                self.filters.segments = values.into_iter().collect()
            }
            DashboardEvent::SetStates(values) => self.filters.states = values.into_iter().collect(),
            DashboardEvent::Select(id) => self.selected = Some(id),
            DashboardEvent::ClearSelection => self.selected = None,
            DashboardEvent::ClearFilters => self.filters = Filters::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TableRow {
    pub id: EventId,
    pub name: String,
    pub dates: String,
    pub segment: String,
    pub city: String,
    pub state: String,
    pub mapped: bool,
    pub selected: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Marker {
    pub id: EventId,
    pub tooltip: String,
    pub popup: String,
    pub position: Coordinates,
    pub highlighted: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MapView {
    pub center: Coordinates,
    pub zoom: u8,
    pub markers: Vec<Marker>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EventDetail {
    pub event: GeocodedEvent,
    pub exhibitors: Vec<Exhibitor>,
}

/// Choices offered by the filter widgets, in first-occurrence order.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct FilterOptions {
    pub months: Vec<String>,
    pub segments: Vec<String>,
    pub states: Vec<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DashboardView {
    pub total: usize,
    pub table: Vec<TableRow>,
    pub map: MapView,
    pub unmapped: usize,
    pub detail: Option<EventDetail>,
    pub options: FilterOptions,
}

pub fn derive_view(
    dataset: &Dataset,
    session: &SessionState,
    exhibitors: &ExhibitorDirectory,
) -> DashboardView {
    let visible: Vec<&GeocodedEvent> = dataset
        .events()
        .iter()
        .filter(|e| session.filters.matches(&e.record))
        .collect();

    let is_selected = |id: &EventId| session.selected.as_ref() == Some(id);

    let table = visible
        .iter()
        .map(|e| TableRow {
            id: e.record.id.clone(),
            name: e.record.name.clone(),
            dates: e.record.dates.clone(),
            segment: e.record.segment.clone(),
            city: e.record.city.clone(),
            state: e.record.state.clone(),
            mapped: e.location.is_resolved(),
            selected: is_selected(&e.record.id),
        })
        .collect();

    let markers: Vec<Marker> = visible
        .iter()
        .filter_map(|e| {
            let position = e.location.coordinates()?;
            Some(Marker {
                id: e.record.id.clone(),
                tooltip: e.record.name.clone(),
                popup: format!(
                    "Evento: {}\nData: {}\nSegmento: {}",
                    e.record.name, e.record.dates, e.record.segment
                ),
                position,
                highlighted: is_selected(&e.record.id),
            })
        })
        .collect();

    let detail = session.selected.as_ref().and_then(|id| {
        visible
            .iter()
            .find(|e| &e.record.id == id)
            .map(|e| EventDetail {
                event: (*e).clone(),
                exhibitors: exhibitors.exhibitors(id).to_vec(),
            })
    });

    DashboardView {
        total: dataset.len(),
        unmapped: visible.len() - markers.len(),
        table,
        map: MapView {
            center: MAP_CENTER,
            zoom: MAP_ZOOM,
            markers,
        },
        detail,
        options: filter_options(dataset),
    }
}

fn filter_options(dataset: &Dataset) -> FilterOptions {
    fn collect<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
        let mut seen = HashSet::new();
        values
            .filter(|v| !v.is_empty() && seen.insert(*v))
            .map(str::to_string)
            .collect()
    }

    let records = || dataset.events().iter().map(|e| &e.record);
    FilterOptions {
        months: collect(records().map(|r| r.month.as_str())),
        segments: collect(records().map(|r| r.segment.as_str())),
        states: collect(records().map(|r| r.state.as_str())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, month: &str, segment: &str, city: &str, state: &str) -> EventRecord {
        EventRecord {
            id: EventId::derive(name, city, state),
            name: name.to_string(),
            month: month.to_string(),
            segment: segment.to_string(),
            dates: "01/01 - 03/01".to_string(),
            city: city.to_string(),
            state: state.to_string(),
        }
    }

    fn dataset() -> Dataset {
        let records = vec![
            record("Show Rural", "Fevereiro", "Grãos", "Cascavel", "PR"),
            record("Agrishow", "Abril", "Máquinas", "Ribeirão Preto", "SP"),
            record("Expointer", "Agosto", "Pecuária", "Esteio", "RS"),
            record("Feira Perdida", "Agosto", "Grãos", "Lugar Nenhum", "ZZ"),
        ];
        let cache: ResolutionCache = [
            ("Cascavel, PR".to_string(), GeocodeResult::resolved(-24.95, -53.45)),
            ("Ribeirão Preto, SP".to_string(), GeocodeResult::resolved(-21.17, -47.81)),
            ("Esteio, RS".to_string(), GeocodeResult::resolved(-29.86, -51.17)),
            ("Lugar Nenhum, ZZ".to_string(), GeocodeResult::unresolved()),
        ]
        .into_iter()
        .collect();
        Dataset::attach(records, &cache)
    }

    #[test]
    fn unfiltered_view_shows_everything() {
        let view = derive_view(&dataset(), &SessionState::new(), &ExhibitorDirectory::new());
        assert_eq!(view.total, 4);
        assert_eq!(view.table.len(), 4);
        assert_eq!(view.map.markers.len(), 3);
        assert_eq!(view.unmapped, 1);
        assert_eq!(view.map.center, MAP_CENTER);
        assert!(view.detail.is_none());
    }

    #[test]
    fn filters_combine_across_fields() {
        let mut session = SessionState::new();
        session.dispatch(DashboardEvent::SetMonths(vec!["Agosto".into()]));
        session.dispatch(DashboardEvent::SetSegments(vec!["Grãos".into(), "Pecuária".into()]));
        session.dispatch(DashboardEvent::SetStates(vec!["RS".into()]));

        let view = derive_view(&dataset(), &session, &ExhibitorDirectory::new());

        assert_eq!(view.table.len(), 1);
        assert_eq!(view.table[0].name, "Expointer");
        assert_eq!(view.unmapped, 0);
    }

    #[test]
    fn clear_filters_restores_full_table() {
        let mut session = SessionState::new();
        session.dispatch(DashboardEvent::SetStates(vec!["SP".into()]));
        assert_eq!(derive_view(&dataset(), &session, &ExhibitorDirectory::new()).table.len(), 1);

        session.dispatch(DashboardEvent::ClearFilters);
        assert!(session.filters.is_empty());
        assert_eq!(derive_view(&dataset(), &session, &ExhibitorDirectory::new()).table.len(), 4);
    }

    #[test]
    fn selection_highlights_marker_and_opens_detail() {
        let data = dataset();
        let id = data.events()[1].record.id.clone();
        let mut directory = ExhibitorDirectory::new();
        directory.insert(
            id.clone(),
            vec![Exhibitor {
                name: "Tratores Brasil".into(),
                booth: Some("B12".into()),
                segment: None,
            }],
        );
        let mut session = SessionState::new();
        session.dispatch(DashboardEvent::Select(id.clone()));

        let view = derive_view(&data, &session, &directory);

        let highlighted: Vec<_> = view.map.markers.iter().filter(|m| m.highlighted).collect();
        assert_eq!(highlighted.len(), 1);
        assert_eq!(highlighted[0].id, id);
        assert!(view.table.iter().any(|r| r.selected && r.id == id));
        let detail = view.detail.expect("detail panel");
        assert_eq!(detail.event.record.name, "Agrishow");
        assert_eq!(detail.exhibitors.len(), 1);
    }

    #[test]
    fn selection_hidden_by_filters_has_no_detail() {
        let data = dataset();
        let mut session = SessionState::new();
        session.dispatch(DashboardEvent::Select(data.events()[1].record.id.clone()));
        session.dispatch(DashboardEvent::SetStates(vec!["PR".into()]));

        let view = derive_view(&data, &session, &ExhibitorDirectory::new());
        assert!(view.detail.is_none());

        session.dispatch(DashboardEvent::ClearSelection);
        assert!(session.selected.is_none());
    }

    #[test]
    fn popup_carries_event_dates_and_segment() {
        let view = derive_view(&dataset(), &SessionState::new(), &ExhibitorDirectory::new());
        let popup = &view.map.markers[0].popup;
        assert!(popup.contains("Show Rural"));
        assert!(popup.contains("01/01 - 03/01"));
        assert!(popup.contains("Grãos"));
    }

    #[test]
    fn options_follow_first_occurrence() {
        let view = derive_view(&dataset(), &SessionState::new(), &ExhibitorDirectory::new());
        assert_eq!(view.options.months, vec!["Fevereiro", "Abril", "Agosto"]);
        assert_eq!(view.options.segments, vec!["Grãos", "Máquinas", "Pecuária"]);
        assert_eq!(view.options.states, vec!["PR", "SP", "RS", "ZZ"]);
    }
}
