use crate::domain::error::FairError;
use crate::domain::model::{GeocodeResult, ResolutionCache};
use crate::domain::traits::GeocodeStore;
use async_trait::async_trait;
use rusqlite::params;
use std::path::Path;
use std::sync::Arc;
use tokio_rusqlite::Connection;

pub async fn init_database(db_path: &Path) -> Result<Connection, FairError> {
    let db = Connection::open(db_path.to_path_buf()).await?;
    init_schema(&db).await?;
    Ok(db)
}

pub async fn init_memory_database() -> Result<Connection, FairError> {
    let db = Connection::open_in_memory().await?;
    init_schema(&db).await?;
    Ok(db)
}

async fn init_schema(db: &Connection) -> Result<(), FairError> {
    db.call(|conn| {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS geocode_cache (
                query TEXT PRIMARY KEY,
                latitude REAL,
                longitude REAL,
                created_at INTEGER NOT NULL,
                updated_at INTEGER NOT NULL
            )",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_geocode_updated ON geocode_cache(updated_at)",
            [],
        )?;

        Ok::<_, rusqlite::Error>(())
    })
    .await?;

    Ok(())
}

/// SQLite-backed resolution store.
///
/// Holds resolved coordinates between runs. Unresolved markers are not
/// written, so a later run gets another chance at them.
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Connection>,
}

impl SqliteStore {
    pub fn new(conn: Arc<Connection>) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl GeocodeStore for SqliteStore {
    async fn load_all(&self) -> Result<ResolutionCache, FairError> {
        let cache = self
            .conn
            .call(|conn| {
                let mut stmt =
                    conn.prepare("SELECT query, latitude, longitude FROM geocode_cache")?;
                let rows = stmt.query_map([], |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        GeocodeResult {
                            latitude: row.get(1)?,
                            longitude: row.get(2)?,
                        },
                    ))
                })?;
                let cache = rows.collect::<Result<ResolutionCache, _>>()?;
                Ok::<_, rusqlite::Error>(cache)
            })
            .await?;

        Ok(cache)
    }

    async fn save(&self, cache: &ResolutionCache) -> Result<usize, FairError> {
        let now = chrono::Utc::now().timestamp();

        let items: Vec<(String, f64, f64)> = cache
            .iter()
            .filter_map(|(query, result)| {
                let coords = result.coordinates()?;
                Some((query.clone(), coords.latitude, coords.longitude))
            })
            .collect();

        if items.is_empty() {
            return Ok(0);
        }

        let written = self
            .conn
            .call(move |conn| {
                let tx = conn.transaction()?;
                let mut count = 0;
                {
                    let mut stmt = tx.prepare(
                        "INSERT INTO geocode_cache (query, latitude, longitude, created_at, updated_at)
                         VALUES (?1, ?2, ?3, ?4, ?4)
                         ON CONFLICT(query) DO UPDATE SET
                             latitude = excluded.latitude,
                             longitude = excluded.longitude,
                             updated_at = excluded.updated_at",
                    )?;
                    for (query, latitude, longitude) in items {
                        count += stmt.execute(params![query, latitude, longitude, now])?;
                    }
                }
                tx.commit()?;
                Ok::<_, rusqlite::Error>(count)
            })
            .await?;

        Ok(written)
    }

    async fn count(&self) -> Result<usize, FairError> {
        let count: i64 = self
            .conn
            .call(|conn| conn.query_row("SELECT COUNT(*) FROM geocode_cache", [], |row| row.get(0)))
            .await?;

        Ok(count as usize)
    }

    async fn clear(&self) -> Result<usize, FairError> {
        let removed = self
            .conn
            .call(|conn| conn.execute("DELETE FROM geocode_cache", []))
            .await?;

        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn store() -> SqliteStore {
        SqliteStore::new(Arc::new(init_memory_database().await.unwrap()))
    }

    fn cache() -> ResolutionCache {
        [
            (
                "São Paulo, SP".to_string(),
                GeocodeResult::resolved(-23.55, -46.63),
            ),
            ("Unknown Place, ZZ".to_string(), GeocodeResult::unresolved()),
        ]
        .into_iter()
        .collect()
    }

    #[tokio::test]
    async fn only_resolved_entries_are_saved() {
        let store = store().await;
        assert_eq!(store.save(&cache()).await.unwrap(), 1);
        assert_eq!(store.count().await.unwrap(), 1);

        let loaded = store.load_all().await.unwrap();
        assert_eq!(
            loaded.get("São Paulo, SP"),
            Some(&GeocodeResult::resolved(-23.55, -46.63))
        );
        assert!(!loaded.contains("Unknown Place, ZZ"));
    }

    #[tokio::test]
    async fn save_overwrites_existing_rows() {
        let store = store().await;
        store.save(&cache()).await.unwrap();

        let mut updated = ResolutionCache::new();
        updated.insert(
            "São Paulo, SP".to_string(),
            GeocodeResult::resolved(-23.5, -46.6),
        );
        store.save(&updated).await.unwrap();

        assert_eq!(store.count().await.unwrap(), 1);
        assert_eq!(
            store.load_all().await.unwrap().lookup("São Paulo, SP"),
            GeocodeResult::resolved(-23.5, -46.6)
        );
    }

    #[tokio::test]
    async fn clear_empties_the_table() {
        let store = store().await;
        store.save(&cache()).await.unwrap();
        assert_eq!(store.clear().await.unwrap(), 1);
        assert_eq!(store.count().await.unwrap(), 0);
        assert!(store.load_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn saving_nothing_skips_the_database() {
        let store = store().await;
        assert_eq!(store.save(&ResolutionCache::new()).await.unwrap(), 0);
    }
}
