//! JSON dataset loading and cleaning.
//!
//! Rows come from the exported fair spreadsheet, so the source column
//! names (`Evento`, `Mês`, `Foco`, `Data`, `Cidade`, `UF`) are accepted
//! alongside the English field names. Unknown columns are ignored.

use crate::domain::error::FairError;
use crate::domain::model::{EventId, EventRecord, ExhibitorDirectory};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Deserialize, Default)]
pub struct RawEventRow {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, alias = "Evento", alias = "Nome")]
    pub name: Option<String>,
    #[serde(default, alias = "Mês", alias = "Mes")]
    pub month: Option<String>,
    #[serde(default, alias = "Foco", alias = "Segmento")]
    pub segment: Option<String>,
    #[serde(default, alias = "Data", alias = "Datas")]
    pub dates: Option<String>,
    #[serde(default, alias = "Cidade")]
    pub city: Option<String>,
    #[serde(default, alias = "UF")]
    pub state: Option<String>,
}

fn cleaned(value: Option<String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}

/// Drop rows without an event name, forward-fill the month and trim
/// every field.
pub fn clean_rows(rows: Vec<RawEventRow>) -> Vec<EventRecord> {
    let mut last_month = String::new();
    let mut records = Vec::with_capacity(rows.len());

    for row in rows {
        let name = cleaned(row.name);
        if name.is_empty() {
            continue;
        }

        let month = cleaned(row.month);
        if !month.is_empty() {
            last_month = month;
        }

        let city = cleaned(row.city);
        let state = cleaned(row.state);
        let id = match row.id.map(|id| id.trim().to_string()) {
            Some(id) if !id.is_empty() => EventId::new(id),
            _ => EventId::derive(&name, &city, &state),
        };

        records.push(EventRecord {
            id,
            name,
            month: last_month.clone(),
            segment: cleaned(row.segment),
            dates: cleaned(row.dates),
            city,
            state,
        });
    }

    records
}

pub fn parse_events(content: &str) -> Result<Vec<EventRecord>, FairError> {
    let rows: Vec<RawEventRow> = serde_json::from_str(content)?;
    let total = rows.len();
    let records = clean_rows(rows);
    debug!(rows = total, kept = records.len(), "dataset cleaned");

    if records.is_empty() {
        return Err(FairError::Dataset(
            "no events left after cleaning".to_string(),
        ));
    }
    Ok(records)
}

pub async fn load_events(path: &Path) -> Result<Vec<EventRecord>, FairError> {
    let content = tokio::fs::read_to_string(path).await?;
    parse_events(&content)
}

pub async fn load_exhibitors(path: &Path) -> Result<ExhibitorDirectory, FairError> {
    let content = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&content)?)
}
