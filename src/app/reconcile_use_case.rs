use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::app::ports::{CatalogPort, DirectoryPort};
use crate::constants::ACCEPTANCE_THRESHOLD;
use crate::error::Result;
use crate::matching::{clean_file_name, has_lossy_characters, normalize, score};
use crate::types::{
    AcceptedMatch, MatchCandidate, MatchResult, NormalizedRecord, Partition, RejectedCandidate,
};

/// Links artwork files to catalog records, one partition at a time.
pub struct ReconcileUseCase {
    catalog: Arc<dyn CatalogPort>,
    directory: Arc<dyn DirectoryPort>,
    threshold: f64,
}

impl std::fmt::Debug for ReconcileUseCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReconcileUseCase")
            .field("catalog", &"<Arc<dyn CatalogPort>>")
            .field("directory", &"<Arc<dyn DirectoryPort>>")
            .field("threshold", &self.threshold)
            .finish()
    }
}

impl ReconcileUseCase {
    pub fn new(catalog: Arc<dyn CatalogPort>, directory: Arc<dyn DirectoryPort>) -> Self {
        Self {
            catalog,
            directory,
            threshold: ACCEPTANCE_THRESHOLD,
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Processes every partition in order and returns one result per partition.
    ///
    /// A catalog read or write error stops the run immediately. Writes already
    /// made for earlier files stay in place.
    pub async fn reconcile(&self, partitions: &[Partition]) -> Result<Vec<MatchResult>> {
        let mut results = Vec::with_capacity(partitions.len());
        for partition in partitions {
            info!("Processing {} images...", partition.label);
            results.push(self.reconcile_partition(partition).await?);
        }
        Ok(results)
    }

    #[instrument(skip(self, partition), fields(partition_key = %partition.key))]
    pub async fn reconcile_partition(&self, partition: &Partition) -> Result<MatchResult> {
        let records = self.load_records(partition).await?;

        let files = match self.directory.list_files(&partition.directory).await {
            Ok(files) => {
                info!(
                    "Found {} image files in {}",
                    files.len(),
                    partition.directory.display()
                );
                files
            }
            Err(e) => {
                warn!(
                    "Error reading directory {}: {}",
                    partition.directory.display(),
                    e
                );
                Vec::new()
            }
        };

        let mut result = MatchResult {
            partition_key: partition.key.clone(),
            partition_label: partition.label.clone(),
            records_loaded: records.len(),
            files_found: files.len(),
            ..Default::default()
        };

        for file_name in files.iter().filter(|f| partition.accepts(f)) {
            let candidate = best_match(file_name, &records);

            match candidate.best {
                Some(best) if candidate.score >= self.threshold => {
                    let asset_path = partition.asset_path(file_name);
                    self.catalog
                        .set_asset_path(&best.record.id, &asset_path)
                        .await?;

                    debug!(
                        "Matched {} => {:?} (score {})",
                        file_name, best.record.name, candidate.score
                    );
                    result.accepted.push(AcceptedMatch {
                        record_id: best.record.id.clone(),
                        record_name: best.record.name.clone(),
                        normalized_record_name: best.normalized.clone(),
                        file_name: candidate.file_name,
                        cleaned_name: candidate.cleaned_name,
                        score: candidate.score,
                        asset_path,
                    });
                }
                best => {
                    result.rejected.push(RejectedCandidate {
                        file_name: candidate.file_name,
                        cleaned_name: candidate.cleaned_name,
                        best_record_name: best.map(|b| b.record.name.clone()),
                        best_record_normalized: best.map(|b| b.normalized.clone()),
                        best_score: candidate.score,
                    });
                }
            }
        }

        info!("Processed {} images for provider {}", files.len(), partition.source_id);
        info!("Successfully matched: {}", result.accepted.len());
        info!("Unmatched images: {}", result.rejected.len());

        Ok(result)
    }

    async fn load_records(&self, partition: &Partition) -> Result<Vec<NormalizedRecord>> {
        let records = self.catalog.list_records(&partition.source_id).await?;
        info!(
            "Found {} games for provider ID {}",
            records.len(),
            partition.source_id
        );

        Ok(records
            .into_iter()
            .map(|record| {
                let normalized = normalize(&record.name);
                if has_lossy_characters(&record.name) {
                    debug!("Original: {:?} => Normalized: {:?}", record.name, normalized);
                }
                NormalizedRecord { record, normalized }
            })
            .collect())
    }
}

/// Scores `file_name` against every record and keeps the first strictly
/// highest scorer. A record that scores 0 is never selected.
pub fn best_match<'a>(file_name: &str, records: &'a [NormalizedRecord]) -> MatchCandidate<'a> {
    let cleaned_name = clean_file_name(file_name);
    debug!("Original: {:?} => Normalized: {:?}", file_name, cleaned_name);

    let mut best = None;
    let mut highest = 0.0;
    for record in records {
        let s = score(&cleaned_name, &record.normalized);
        if s > highest {
            highest = s;
            best = Some(record);
        }
    }

    MatchCandidate {
        file_name: file_name.to_string(),
        cleaned_name,
        best,
        score: highest,
    }
}
