use crate::constants::{
    CANDIDATE_CONTAINS_CATALOG_SCORE, CATALOG_CONTAINS_CANDIDATE_SCORE, EXACT_MATCH_SCORE,
    MIN_WORD_LEN, PARTIAL_OVERLAP_CAP,
};

/// Confidence in [0, 100] that a normalized file name and a normalized catalog
/// name refer to the same game.
///
/// Rules are checked in order and the first that applies decides the score:
/// exact equality, catalog name inside the file name, file name inside the
/// catalog name, then proportional word overlap capped at 50. An empty side
/// always scores 0.
pub fn score(candidate: &str, catalog_name: &str) -> f64 {
    if candidate.is_empty() || catalog_name.is_empty() {
        return 0.0;
    }

    if candidate == catalog_name {
        EXACT_MATCH_SCORE
    } else if candidate.contains(catalog_name) {
        CANDIDATE_CONTAINS_CATALOG_SCORE
    } else if catalog_name.contains(candidate) {
        CATALOG_CONTAINS_CANDIDATE_SCORE
    } else {
        word_overlap(candidate, catalog_name)
    }
}

fn significant_words(text: &str) -> Vec<&str> {
    text.split_whitespace()
        .filter(|w| w.chars().count() > MIN_WORD_LEN)
        .collect()
}

fn word_overlap(candidate: &str, catalog_name: &str) -> f64 {
    let candidate_words = significant_words(candidate);
    let catalog_words = significant_words(catalog_name);

    let denominator = candidate_words.len().max(catalog_words.len());
    if denominator == 0 {
        return 0.0;
    }

    let matching = candidate_words
        .iter()
        .filter(|word| {
            catalog_words
                .iter()
                .any(|catalog_word| catalog_word.contains(**word) || word.contains(*catalog_word))
        })
        .count();

    if matching == 0 {
        return 0.0;
    }

    PARTIAL_OVERLAP_CAP * (matching as f64 / denominator as f64)
}
