use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, info, warn};

use crate::app::ports::CatalogPort;
use crate::error::{MatcherError, Result};
use crate::types::CatalogRecord;

const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS games (
        id           TEXT PRIMARY KEY,
        provider_id  TEXT NOT NULL,
        name         TEXT NOT NULL,
        image_path   TEXT
    );
    CREATE INDEX IF NOT EXISTS games_provider_idx ON games (provider_id);
"#;

/// Game catalog stored in a local SQLite database.
pub struct SqliteCatalog {
    conn: Mutex<Connection>,
}

impl SqliteCatalog {
    pub fn open<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let db_path = db_path.as_ref();
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        info!("Opening catalog database at {}", db_path.display());
        Self::from_connection(Connection::open(db_path)?)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| MatcherError::Catalog {
            message: "catalog connection lock poisoned".to_string(),
        })
    }

    pub fn insert_record(&self, provider_id: &str, id: &str, name: &str) -> Result<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO games (id, provider_id, name) VALUES (?1, ?2, ?3)",
            params![id, provider_id, name],
        )?;
        Ok(())
    }

    pub fn get_record(&self, id: &str) -> Result<Option<CatalogRecord>> {
        let conn = self.lock()?;
        let record = conn
            .query_row(
                "SELECT id, name, image_path FROM games WHERE id = ?1",
                params![id],
                |row| {
                    Ok(CatalogRecord {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        image_path: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(record)
    }
}

#[async_trait]
impl CatalogPort for SqliteCatalog {
    async fn list_records(&self, source_id: &str) -> Result<Vec<CatalogRecord>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT id, name, image_path FROM games WHERE provider_id = ?1 ORDER BY rowid",
        )?;
        let rows = stmt.query_map(params![source_id], |row| {
            Ok(CatalogRecord {
                id: row.get(0)?,
                name: row.get(1)?,
                image_path: row.get(2)?,
            })
        })?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    async fn set_asset_path(&self, record_id: &str, path: &str) -> Result<()> {
        let conn = self.lock()?;
        let updated = conn.execute(
            "UPDATE games SET image_path = ?1 WHERE id = ?2",
            params![path, record_id],
        )?;

        if updated == 0 {
            warn!("No catalog row with id {} to update", record_id);
        } else {
            debug!("Set image path for game {} to {}", record_id, path);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> SqliteCatalog {
        let catalog = SqliteCatalog::open_in_memory().unwrap();
        catalog.insert_record("hacksaw", "h2", "Wanted Dead or a Wild").unwrap();
        catalog.insert_record("pragmatic", "p1", "Sweet Bonanza").unwrap();
        catalog.insert_record("hacksaw", "h1", "Chaos Crew").unwrap();
        catalog
    }

    #[tokio::test]
    async fn test_list_records_scoped_in_insert_order() {
        let catalog = seeded();
        let records = catalog.list_records("hacksaw").await.unwrap();
        let ids: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["h2", "h1"]);
        assert!(records.iter().all(|r| r.image_path.is_none()));

        assert!(catalog.list_records("unknown").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_set_asset_path_overwrites() {
        let catalog = seeded();
        catalog.set_asset_path("p1", "/images/slots/pragmatic/a.png").await.unwrap();
        catalog.set_asset_path("p1", "/images/slots/pragmatic/b.png").await.unwrap();

        let record = catalog.get_record("p1").unwrap().unwrap();
        assert_eq!(record.image_path.as_deref(), Some("/images/slots/pragmatic/b.png"));
    }

    #[tokio::test]
    async fn test_set_asset_path_unknown_id_is_not_fatal() {
        let catalog = seeded();
        assert!(catalog.set_asset_path("missing", "/x.png").await.is_ok());
    }

    #[test]
    fn test_duplicate_id_is_rejected() {
        let catalog = seeded();
        let err = catalog.insert_record("hacksaw", "h1", "Again").unwrap_err();
        assert!(matches!(err, MatcherError::Database(_)));
    }
}
