use async_trait::async_trait;
use std::path::Path;
use tracing::debug;

use crate::app::ports::DirectoryPort;

/// Lists file names on the local filesystem, sorted by name. Directories are
/// skipped; symlinks are followed, and dangling ones are still listed.
pub struct FsDirectory;

#[async_trait]
impl DirectoryPort for FsDirectory {
    async fn list_files(&self, directory: &Path) -> std::io::Result<Vec<String>> {
        let mut entries = tokio::fs::read_dir(directory).await?;
        let mut names = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let is_dir = match tokio::fs::metadata(entry.path()).await {
                Ok(meta) => meta.is_dir(),
                Err(_) => false,
            };
            if is_dir {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(raw) => debug!("Skipping non UTF-8 file name {:?}", raw),
            }
        }

        names.sort();
        Ok(names)
    }
}
