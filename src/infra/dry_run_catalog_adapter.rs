use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::info;

use crate::app::ports::CatalogPort;
use crate::error::Result;
use crate::types::CatalogRecord;

/// Reads through to the wrapped catalog but only logs writes.
pub struct DryRunCatalog {
    inner: Arc<dyn CatalogPort>,
    skipped_writes: AtomicUsize,
}

impl DryRunCatalog {
    pub fn new(inner: Arc<dyn CatalogPort>) -> Self {
        Self {
            inner,
            skipped_writes: AtomicUsize::new(0),
        }
    }

    pub fn skipped_writes(&self) -> usize {
        self.skipped_writes.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl CatalogPort for DryRunCatalog {
    async fn list_records(&self, source_id: &str) -> Result<Vec<CatalogRecord>> {
        self.inner.list_records(source_id).await
    }

    async fn set_asset_path(&self, record_id: &str, path: &str) -> Result<()> {
        self.skipped_writes.fetch_add(1, Ordering::Relaxed);
        info!("[dry run] would set image path for {} to {}", record_id, path);
        Ok(())
    }
}
