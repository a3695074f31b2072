/*
    Conservation of one peptide across the alignment
        locate the peptide (exact, then with growing tolerance)
        for every row
            positional homolog over the matched columns (gaps resolved)
            score against the peptide (raw window or resolved homolog)
        statistics of the row scores
        average normalized Shannon entropy of the matched columns
*/

use log::{debug, warn};
use super::alignment::Alignment;
use super::entropy::{avg_normalized_shannon_entropy, ResidueClasses};
use super::gap_resolver::{resolve, GapFill};
use super::peptide_locator::{locate, Located, LocatorConfig};
use super::score::{dissimilarity, similarity, DescriptiveStatistics, ScorePolicy, Summary};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AnalysisOptions {
    pub locator: LocatorConfig,
    pub gap_fill: GapFill,
    pub score_policy: ScorePolicy,
    pub classes: ResidueClasses,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RowResult {
    pub homolog: String,
    /// `None` when the row could not be scored.
    pub score: Option<f64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PeptideReport {
    pub located: Located,
    pub rows: Vec<RowResult>,
    pub summary: Option<Summary>,
    pub entropy: f64,
}

/// `None` when the peptide cannot be located within the tolerance ceiling.
pub fn analyse_peptide(
    alignment: &Alignment,
    peptide: &str,
    expected_start: Option<i64>,
    options: &AnalysisOptions,
) -> Option<PeptideReport> {
    let located = match locate(alignment, peptide, &options.locator) {
        Some(located) => located,
        None => {
            warn!("NOT FOUND: {}", peptide);
            return None;
        }
    };
    debug!(
        "{} located in {} at {}-{} (tolerance {})",
        peptide,
        alignment.identifier(located.row),
        located.span.first,
        located.span.last,
        located.tolerance
    );
    if let Some(expected) = expected_start.filter(|&start| starts_suspiciously_early(&located, start)) {
        warn!(
            "PROBLEM WITH: {} (matched at {} before expected start {}, extra tolerance likely too high)",
            peptide, located.span.first, expected
        );
    }

    let mut stats = DescriptiveStatistics::new();
    let rows: Vec<RowResult> = alignment
        .rows()
        .map(|row| {
            let raw = &row.residues[located.span.first..=located.span.last];
            let homolog = resolve(&row.residues, located.span, options.gap_fill);
            let scored = match options.score_policy {
                ScorePolicy::RawDissimilarity => Ok(dissimilarity(peptide, raw)),
                ScorePolicy::RawSimilarity => similarity(peptide, raw),
                ScorePolicy::ResolvedSimilarity => similarity(peptide, &homolog),
            };
            let score = match scored {
                Ok(score) => Some(score),
                Err(e) => {
                    warn!("{}: row {} not scored: {}", peptide, row.id, e);
                    None
                }
            };
            if let Some(score) = score {
                stats.add_value(score);
            }
            RowResult { homolog, score }
        })
        .collect();

    Some(PeptideReport {
        located,
        rows,
        summary: stats.summary(),
        entropy: avg_normalized_shannon_entropy(alignment, located.span, options.classes),
    })
}

// approximate hits left of the supplied start usually mean the tolerance is too loose
fn starts_suspiciously_early(located: &Located, expected_start: i64) -> bool {
    !located.is_exact() && located.starts_before(expected_start)
}
