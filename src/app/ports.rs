use async_trait::async_trait;
use std::path::Path;

use crate::error::Result;
use crate::types::CatalogRecord;

/// Read/write access to the game catalog.
#[async_trait]
pub trait CatalogPort: Send + Sync {
    /// Records scoped to one provider, in a stable load order.
    async fn list_records(&self, source_id: &str) -> Result<Vec<CatalogRecord>>;
    /// Overwrites the record's image path.
    async fn set_asset_path(&self, record_id: &str, path: &str) -> Result<()>;
}

/// Lists candidate file names in a directory.
#[async_trait]
pub trait DirectoryPort: Send + Sync {
    async fn list_files(&self, directory: &Path) -> std::io::Result<Vec<String>>;
}
