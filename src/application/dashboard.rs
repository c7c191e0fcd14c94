use crate::application::resolve::resolve_places;
use crate::domain::dashboard::{DashboardEvent, Dataset, SessionState};
use crate::domain::error::FairError;
use crate::domain::model::{EventId, ExhibitorDirectory};
use crate::domain::traits::ResolveObserver;
use crate::infrastructure::dataset::{load_events, load_exhibitors};
use crate::state::AppState;
use std::path::Path;
use tracing::debug;

/// Immutable base data the view is derived from.
pub struct DashboardData {
    pub dataset: Dataset,
    pub exhibitors: ExhibitorDirectory,
}

pub async fn load_dashboard(
    state: &AppState,
    dataset_path: &Path,
    exhibitors: Option<ExhibitorSource<'_>>,
    no_cache: bool,
    observer: &dyn ResolveObserver,
) -> Result<DashboardData, FairError> {
    let records = load_events(dataset_path).await?;
    let places: Vec<String> = records.iter().map(|r| r.place_query()).collect();

    let cache = resolve_places(state, &places, no_cache, observer).await?;
    let dataset = Dataset::attach(records, &cache);

    let exhibitors = match exhibitors {
        Some(source) => load_exhibitor_directory(source).await?,
        None => ExhibitorDirectory::new(),
    };

    Ok(DashboardData {
        dataset,
        exhibitors,
    })
}

/// Where the exhibitor directory comes from. A configured default may be
/// absent; a path given on the command line must exist.
#[derive(Debug, Clone, Copy)]
pub enum ExhibitorSource<'a> {
    Requested(&'a Path),
    Configured(&'a Path),
}

pub async fn load_exhibitor_directory(
    source: ExhibitorSource<'_>,
) -> Result<ExhibitorDirectory, FairError> {
    match source {
        ExhibitorSource::Requested(path) => load_exhibitors(path).await,
        ExhibitorSource::Configured(path) => {
            if !path.exists() {
                debug!(path = %path.display(), "no exhibitor directory");
                return Ok(ExhibitorDirectory::new());
            }
            load_exhibitors(path).await
        }
    }
}

/// Build the session from command-line choices, one event per choice.
pub fn build_session(
    dataset: &Dataset,
    months: Vec<String>,
    segments: Vec<String>,
    states: Vec<String>,
    select: Option<String>,
) -> Result<SessionState, FairError> {
    let mut session = SessionState::new();
    session.dispatch(DashboardEvent::SetMonths(months));
    session.dispatch(DashboardEvent::SetSegments(segments));
    session.dispatch(DashboardEvent::SetStates(states));

    if let Some(id) = select {
        let id = EventId::new(id);
        if dataset.get(&id).is_none() {
            return Err(FairError::NotFound(format!("event '{}'", id)));
        }
        session.dispatch(DashboardEvent::Select(id));
    }

    Ok(session)
}
