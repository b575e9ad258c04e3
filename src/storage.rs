use crate::app::ports::CatalogPort;
use crate::error::{MatcherError, Result};
use crate::types::CatalogRecord;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use tracing::debug;
use uuid::Uuid;

/// A single image path write as seen by the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetWrite {
    pub record_id: String,
    pub path: String,
}

/// In-memory catalog implementation for development/testing
pub struct InMemoryCatalog {
    records: Arc<Mutex<HashMap<String, Vec<CatalogRecord>>>>,
    writes: Arc<Mutex<Vec<AssetWrite>>>,
    fail_on_write: Mutex<Option<usize>>,
    failing_sources: Mutex<HashSet<String>>,
}

impl Default for InMemoryCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(HashMap::new())),
            writes: Arc::new(Mutex::new(Vec::new())),
            fail_on_write: Mutex::new(None),
            failing_sources: Mutex::new(HashSet::new()),
        }
    }

    /// Adds a record under `source_id` with a fresh id and returns the id.
    pub fn insert(&self, source_id: &str, name: &str) -> String {
        let id = Uuid::new_v4().to_string();
        self.insert_with_id(source_id, &id, name);
        id
    }

    pub fn insert_with_id(&self, source_id: &str, id: &str, name: &str) {
        let mut records = self.records.lock().unwrap();
        records
            .entry(source_id.to_string())
            .or_default()
            .push(CatalogRecord {
                id: id.to_string(),
                name: name.to_string(),
                image_path: None,
            });
        debug!("Created catalog record: {} with id {}", name, id);
    }

    /// Makes the `nth` write (1-based) fail and every write after it too.
    pub fn fail_from_write(&self, nth: usize) {
        *self.fail_on_write.lock().unwrap() = Some(nth);
    }

    /// Makes every `list_records` call for `source_id` fail.
    pub fn fail_reads_for(&self, source_id: &str) {
        self.failing_sources.lock().unwrap().insert(source_id.to_string());
    }

    /// Successful writes, in the order they happened.
    pub fn writes(&self) -> Vec<AssetWrite> {
        self.writes.lock().unwrap().clone()
    }

    pub fn get(&self, record_id: &str) -> Option<CatalogRecord> {
        let records = self.records.lock().unwrap();
        records
            .values()
            .flatten()
            .find(|r| r.id == record_id)
            .cloned()
    }
}

#[async_trait]
impl CatalogPort for InMemoryCatalog {
    async fn list_records(&self, source_id: &str) -> Result<Vec<CatalogRecord>> {
        if self.failing_sources.lock().unwrap().contains(source_id) {
            return Err(MatcherError::Catalog {
                message: format!("Read rejected for provider {}", source_id),
            });
        }

        let records = self.records.lock().unwrap();
        Ok(records.get(source_id).cloned().unwrap_or_default())
    }

    async fn set_asset_path(&self, record_id: &str, path: &str) -> Result<()> {
        let mut writes = self.writes.lock().unwrap();
        if let Some(nth) = *self.fail_on_write.lock().unwrap() {
            if writes.len() + 1 >= nth {
                return Err(MatcherError::Catalog {
                    message: format!("Write rejected for record {}", record_id),
                });
            }
        }

        let mut records = self.records.lock().unwrap();
        if let Some(record) = records.values_mut().flatten().find(|r| r.id == record_id) {
            record.image_path = Some(path.to_string());
        }

        writes.push(AssetWrite {
            record_id: record_id.to_string(),
            path: path.to_string(),
        });

        debug!("Set image path for record {} to {}", record_id, path);
        Ok(())
    }
}
