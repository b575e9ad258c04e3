pub mod dry_run_catalog_adapter;
pub mod fs_directory_adapter;
pub mod sqlite_catalog_adapter;

pub use dry_run_catalog_adapter::DryRunCatalog;
pub use fs_directory_adapter::FsDirectory;
pub use sqlite_catalog_adapter::SqliteCatalog;
