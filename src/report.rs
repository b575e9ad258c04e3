//! Plain-text review logs for a finished run, plus the optional JSON summary.

use std::path::Path;
use tracing::info;

use crate::error::Result;
use crate::types::{AcceptedMatch, MatchResult, RejectedCandidate, RunSummary};

fn matched_line(m: &AcceptedMatch) -> String {
    format!("{} => \"{}\" | score: {}", m.file_name, m.record_name, m.score)
}

fn unmatched_line(r: &RejectedCandidate) -> String {
    format!(
        "{} | cleaned: \"{}\" | best match: \"{}\" (normalized: \"{}\") | score: {}",
        r.file_name,
        r.cleaned_name,
        r.best_record_name.as_deref().unwrap_or("No match"),
        r.best_record_normalized.as_deref().unwrap_or(""),
        r.best_score
    )
}

fn render<F>(results: &[MatchResult], heading: &str, lines: F) -> String
where
    F: Fn(&MatchResult) -> Vec<String>,
{
    results
        .iter()
        .map(|result| {
            let mut section = vec![format!("# {} {} Images", heading, result.partition_label)];
            section.extend(lines(result));
            section.join("\n")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// `# Matched <Label> Images` sections, one line per linked file.
pub fn render_matched(results: &[MatchResult]) -> String {
    render(results, "Matched", |r| r.accepted.iter().map(matched_line).collect())
}

/// `# Unmatched <Label> Images` sections, one line per rejected file with the
/// closest record that was found.
pub fn render_unmatched(results: &[MatchResult]) -> String {
    render(results, "Unmatched", |r| {
        r.rejected.iter().map(unmatched_line).collect()
    })
}

pub async fn write_review_logs(
    results: &[MatchResult],
    matched_log: &Path,
    unmatched_log: &Path,
) -> Result<()> {
    tokio::fs::write(unmatched_log, render_unmatched(results)).await?;
    info!("Unmatched images logged to {}", unmatched_log.display());

    tokio::fs::write(matched_log, render_matched(results)).await?;
    info!("Matched images logged to {}", matched_log.display());
    Ok(())
}

pub async fn write_summary(summary: &RunSummary, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(summary)?;
    tokio::fs::write(path, json).await?;
    info!("Run summary written to {}", path.display());
    Ok(())
}
