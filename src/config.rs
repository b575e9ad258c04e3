use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::constants::{
    ACCEPTANCE_THRESHOLD, DATABASE_ENV_VAR, DEFAULT_ASSET_URL_ROOT, DEFAULT_DATABASE_PATH,
    DEFAULT_IMAGE_ROOT, DEFAULT_MATCHED_LOG, DEFAULT_UNMATCHED_LOG, HACKSAW_KEY,
    HACKSAW_SOURCE_ID, PRAGMATIC_KEY, PRAGMATIC_SOURCE_ID,
};
use crate::error::{MatcherError, Result};
use crate::types::Partition;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    #[serde(default = "default_matched_log")]
    pub matched_log: PathBuf,
    #[serde(default = "default_unmatched_log")]
    pub unmatched_log: PathBuf,
    /// Optional JSON dump of the whole run
    #[serde(default)]
    pub summary_json: Option<PathBuf>,
    #[serde(default, rename = "partition")]
    pub partitions: Vec<PartitionConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PartitionConfig {
    pub key: String,
    #[serde(default)]
    pub label: Option<String>,
    pub source_id: String,
    pub directory: PathBuf,
    #[serde(default)]
    pub asset_prefix: Option<String>,
    pub extensions: Vec<String>,
}

fn default_database_path() -> PathBuf {
    PathBuf::from(DEFAULT_DATABASE_PATH)
}

fn default_threshold() -> f64 {
    ACCEPTANCE_THRESHOLD
}

fn default_matched_log() -> PathBuf {
    PathBuf::from(DEFAULT_MATCHED_LOG)
}

fn default_unmatched_log() -> PathBuf {
    PathBuf::from(DEFAULT_UNMATCHED_LOG)
}

fn title_case(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl PartitionConfig {
    fn default_for(key: &str, source_id: &str, extensions: &[&str]) -> Self {
        Self {
            key: key.to_string(),
            label: None,
            source_id: source_id.to_string(),
            directory: Path::new(DEFAULT_IMAGE_ROOT).join(key),
            asset_prefix: None,
            extensions: extensions.iter().map(|e| e.to_string()).collect(),
        }
    }

    pub fn to_partition(&self) -> Partition {
        Partition {
            key: self.key.clone(),
            label: self.label.clone().unwrap_or_else(|| title_case(&self.key)),
            source_id: self.source_id.clone(),
            directory: self.directory.clone(),
            asset_prefix: self
                .asset_prefix
                .clone()
                .unwrap_or_else(|| format!("{}/{}", DEFAULT_ASSET_URL_ROOT, self.key)),
            extensions: self.extensions.clone(),
        }
    }
}

impl Default for Config {
    /// The two providers the artwork folders were originally laid out for.
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            threshold: default_threshold(),
            matched_log: default_matched_log(),
            unmatched_log: default_unmatched_log(),
            summary_json: None,
            partitions: vec![
                PartitionConfig::default_for(HACKSAW_KEY, HACKSAW_SOURCE_ID, &[".jpg"]),
                PartitionConfig::default_for(PRAGMATIC_KEY, PRAGMATIC_SOURCE_ID, &[".jpg", ".png"]),
            ],
        }
    }
}

impl Config {
    /// Loads `config_path`, falling back to the built-in defaults when the file
    /// does not exist. `MATCHER_DATABASE` overrides the database path.
    pub fn load(config_path: &Path) -> Result<Self> {
        let mut config = if config_path.exists() {
            let config_content = fs::read_to_string(config_path).map_err(|e| {
                MatcherError::Config(format!(
                    "Failed to read config file '{}': {}",
                    config_path.display(),
                    e
                ))
            })?;
            Self::from_toml(&config_content)?
        } else {
            info!(
                "No config file at {}, using built-in partitions",
                config_path.display()
            );
            Self::default()
        };

        if let Ok(db) = std::env::var(DATABASE_ENV_VAR) {
            config.database_path = PathBuf::from(db);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.partitions.is_empty() {
            return Err(MatcherError::Config(
                "at least one [[partition]] is required".to_string(),
            ));
        }
        if !(0.0..=100.0).contains(&self.threshold) {
            return Err(MatcherError::Config(format!(
                "threshold must be within 0..=100, got {}",
                self.threshold
            )));
        }

        let mut seen = HashSet::new();
        for partition in &self.partitions {
            if !seen.insert(partition.key.as_str()) {
                return Err(MatcherError::Config(format!(
                    "duplicate partition key '{}'",
                    partition.key
                )));
            }
            if partition.extensions.is_empty() {
                return Err(MatcherError::Config(format!(
                    "partition '{}' has no extensions",
                    partition.key
                )));
            }
        }
        Ok(())
    }

    /// Partitions in config order, optionally restricted to `only` keys.
    pub fn partitions(&self, only: Option<&[String]>) -> Result<Vec<Partition>> {
        if let Some(keys) = only {
            for key in keys {
                if !self.partitions.iter().any(|p| &p.key == key) {
                    return Err(MatcherError::Config(format!("unknown partition '{}'", key)));
                }
            }
        }

        Ok(self
            .partitions
            .iter()
            .filter(|p| only.map_or(true, |keys| keys.contains(&p.key)))
            .map(PartitionConfig::to_partition)
            .collect())
    }
}
