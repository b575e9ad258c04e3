//! Matching policy and default layout constants.
//!
//! The threshold and the partial-overlap cap have no derivation behind them.
//! They are kept at the values the catalog has always been reconciled with
//! and should be treated as tunable policy.

// Scores
pub const EXACT_MATCH_SCORE: f64 = 100.0;
pub const CANDIDATE_CONTAINS_CATALOG_SCORE: f64 = 80.0;
pub const CATALOG_CONTAINS_CANDIDATE_SCORE: f64 = 70.0;
pub const PARTIAL_OVERLAP_CAP: f64 = 50.0;

/// Words of this many characters or fewer are ignored by partial overlap.
pub const MIN_WORD_LEN: usize = 2;

/// Minimum score required before a file is linked to a record.
pub const ACCEPTANCE_THRESHOLD: f64 = 30.0;

/// Vendor tag that prefixes one provider's artwork file names.
pub const VENDOR_TAG: &str = "pragmatic";

// Default partitions
pub const HACKSAW_KEY: &str = "hacksaw";
pub const HACKSAW_SOURCE_ID: &str = "6631fd1c-fe09-4e08-a6ec-adda328b6fed";
pub const PRAGMATIC_KEY: &str = "pragmatic";
pub const PRAGMATIC_SOURCE_ID: &str = "6fb29c67-915f-47cd-8c67-22e8b6c949b4";

pub const DEFAULT_IMAGE_ROOT: &str = "public/images/slots";
pub const DEFAULT_ASSET_URL_ROOT: &str = "/images/slots";

// Files
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";
pub const DEFAULT_DATABASE_PATH: &str = "catalog.db";
pub const DEFAULT_MATCHED_LOG: &str = "matched_images.log";
pub const DEFAULT_UNMATCHED_LOG: &str = "unmatched_images.log";
pub const DEFAULT_LOG_DIR: &str = "logs";

/// Environment variable that overrides the configured database path.
pub const DATABASE_ENV_VAR: &str = "MATCHER_DATABASE";
