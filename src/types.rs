use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A game record in the catalog. Only `id` and `name` are read by the matcher;
/// `image_path` is the field it writes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub id: String,
    pub name: String,
    pub image_path: Option<String>,
}

/// One provider's artwork directory together with the slice of the catalog
/// its files may be matched against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Partition {
    /// Short key, e.g. `pragmatic`
    pub key: String,
    /// Heading used in the review logs
    pub label: String,
    /// Catalog scope (provider id)
    pub source_id: String,
    pub directory: PathBuf,
    /// URL prefix stored in front of the file name on a match
    pub asset_prefix: String,
    /// Accepted extensions, compared case-insensitively against the file name end
    pub extensions: Vec<String>,
}

impl Partition {
    pub fn accepts(&self, file_name: &str) -> bool {
        let lower = file_name.to_lowercase();
        self.extensions
            .iter()
            .any(|ext| lower.ends_with(&ext.to_lowercase()))
    }

    pub fn asset_path(&self, file_name: &str) -> String {
        format!("{}/{}", self.asset_prefix.trim_end_matches('/'), file_name)
    }
}

/// Catalog record paired with its normalized name for one partition pass.
#[derive(Debug, Clone)]
pub struct NormalizedRecord {
    pub record: CatalogRecord,
    pub normalized: String,
}

/// Best-effort match for one file while its partition is being processed.
#[derive(Debug, Clone)]
pub struct MatchCandidate<'a> {
    pub file_name: String,
    pub cleaned_name: String,
    pub best: Option<&'a NormalizedRecord>,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcceptedMatch {
    pub record_id: String,
    pub record_name: String,
    pub normalized_record_name: String,
    pub file_name: String,
    pub cleaned_name: String,
    pub score: f64,
    pub asset_path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RejectedCandidate {
    pub file_name: String,
    pub cleaned_name: String,
    /// Closest record that was found, if any scored above zero
    pub best_record_name: Option<String>,
    pub best_record_normalized: Option<String>,
    pub best_score: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub partition_key: String,
    pub partition_label: String,
    pub records_loaded: usize,
    pub files_found: usize,
    pub accepted: Vec<AcceptedMatch>,
    pub rejected: Vec<RejectedCandidate>,
}

/// Everything a run produced, as written to the optional JSON summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub generated_at: DateTime<Utc>,
    pub dry_run: bool,
    pub partitions: Vec<MatchResult>,
}
