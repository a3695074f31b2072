/*
    Per-row scores of a peptide against its positional homolog
        similarity: strict, equal lengths required, matches / length
        dissimilarity: lenient, mismatches over the shared prefix / longer length
    Per-peptide descriptive statistics of those scores
*/

use super::error::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ScorePolicy {
    /// Strict similarity against the gap-resolved homolog.
    #[default]
    ResolvedSimilarity,
    /// Strict similarity against the unresolved window, so every row is scored.
    RawSimilarity,
    /// Dissimilarity against the unresolved window.
    RawDissimilarity,
}

impl ScorePolicy {
    pub fn label(&self) -> &'static str {
        match self {
            ScorePolicy::ResolvedSimilarity | ScorePolicy::RawSimilarity => "CNSV",
            ScorePolicy::RawDissimilarity => "DISS",
        }
    }
}

/// Fraction of identical positions. Fails unless both strings have the same
/// non-zero length.
pub fn similarity(peptide: &str, homolog: &str) -> Result<f64> {
    if peptide.len() != homolog.len() {
        return Err(Error::LengthMismatch {
            peptide: peptide.to_string(),
            homolog: homolog.to_string(),
        });
    }
    if peptide.is_empty() {
        return Err(Error::EmptySequence);
    }
    let matches = peptide
        .bytes()
        .zip(homolog.bytes())
        .filter(|(a, b)| a == b)
        .count();
    Ok(matches as f64 / peptide.len() as f64)
}

/// Mismatches over the shorter length divided by the longer length.
pub fn dissimilarity(a: &str, b: &str) -> f64 {
    let longer = a.len().max(b.len());
    if longer == 0 {
        return 0.0;
    }
    let mismatches = a.bytes().zip(b.bytes()).filter(|(x, y)| x != y).count();
    mismatches as f64 / longer as f64
}

/// Round half away from zero, the way the report prints every value.
/// Ties are decided on the scaled `f64`, not on the exact decimal expansion.
pub fn round_half_up(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[derive(Clone, Debug, Default)]
pub struct DescriptiveStatistics {
    data: Vec<f64>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Summary {
    pub n: usize,
    pub mean: f64,
    pub sample_sd: f64,
    pub median: f64,
    pub iqr: f64,
    pub min: f64,
    pub max: f64,
}

impl DescriptiveStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_value(&mut self, value: f64) {
        self.data.push(value);
    }

    pub fn n(&self) -> usize {
        self.data.len()
    }

    /// `None` without data.
    pub fn summary(&self) -> Option<Summary> {
        if self.data.is_empty() {
            return None;
        }
        let mut sorted = self.data.clone();
        sorted.sort_by(f64::total_cmp);
        let n = sorted.len();
        let mean = sorted.iter().sum::<f64>() / n as f64;
        let sample_sd = if n < 2 {
            0.0
        } else {
            let sum_deviations: f64 = sorted.iter().map(|x| (x - mean).powi(2)).sum();
            (sum_deviations / (n - 1) as f64).sqrt()
        };
        let iqr = if n < 2 {
            0.0
        } else {
            // Tukey hinges, the median itself belongs to neither half
            let half = n / 2;
            median_of_sorted(&sorted[n - half..]) - median_of_sorted(&sorted[..half])
        };
        Some(Summary {
            n,
            mean,
            sample_sd,
            median: median_of_sorted(&sorted),
            iqr,
            min: sorted[0],
            max: sorted[n - 1],
        })
    }
}

fn median_of_sorted(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn strict_similarity() {
        assert_eq!(similarity("ACDG", "ACDG").unwrap(), 1.0);
        assert_eq!(similarity("ACDG", "ACDX").unwrap(), 0.75);
        assert_eq!(similarity("ACDG", "----").unwrap(), 0.0);
    }

    #[test]
    fn strict_similarity_rejects_unequal_lengths() {
        let err = similarity("ACDG", "ACD").unwrap_err();
        assert!(matches!(err, Error::LengthMismatch { .. }));
        assert!(matches!(similarity("", ""), Err(Error::EmptySequence)));
    }

    #[test]
    fn lenient_dissimilarity() {
        assert_eq!(dissimilarity("ACDG", "ACDG"), 0.0);
        assert_eq!(dissimilarity("ACDG", "ACDX"), 0.25);
        // only the shared prefix is compared
        assert_eq!(dissimilarity("ACDG", "AXD"), 0.25);
        assert_eq!(dissimilarity("", ""), 0.0);
    }

    #[test]
    fn dissimilarity_is_symmetric_and_bounded() {
        let words = ["ACDG", "XCDG", "----", "AC-G", "WWWW", "ACDX"];
        for a in words {
            for b in words {
                let d = dissimilarity(a, b);
                assert_eq!(d, dissimilarity(b, a));
                assert!((0.0..=1.0).contains(&d));
            }
        }
    }

    #[test]
    fn rounding() {
        assert_eq!(round_half_up(0.123_46, 4), 0.1235);
        assert_eq!(round_half_up(0.123_44, 4), 0.1234);
        assert_eq!(round_half_up(0.666_666, 4), 0.6667);
        assert_eq!(round_half_up(1.0, 4), 1.0);
    }

    #[test]
    fn summary_of_odd_sample() {
        let mut stats = DescriptiveStatistics::new();
        for v in [0.5, 1.0, 0.25, 0.75, 1.0] {
            stats.add_value(v);
        }
        let summary = stats.summary().unwrap();
        assert_eq!(summary.n, 5);
        assert!(close(summary.mean, 0.7));
        assert!(close(summary.median, 0.75));
        assert!(close(summary.min, 0.25));
        assert!(close(summary.max, 1.0));
        // lower half [0.25, 0.5], upper half [1.0, 1.0]
        assert!(close(summary.iqr, 0.625));
        assert!(close(summary.sample_sd, (0.425f64 / 4.0).sqrt()));
    }

    #[test]
    fn summary_of_even_sample() {
        let mut stats = DescriptiveStatistics::new();
        for v in [4.0, 1.0, 3.0, 2.0] {
            stats.add_value(v);
        }
        let summary = stats.summary().unwrap();
        assert!(close(summary.median, 2.5));
        assert!(close(summary.iqr, 2.0));
    }

    #[test]
    fn summary_of_single_value_and_empty() {
        let mut stats = DescriptiveStatistics::new();
        assert!(stats.summary().is_none());
        stats.add_value(0.8);
        let summary = stats.summary().unwrap();
        assert_eq!(summary.median, 0.8);
        assert_eq!(summary.iqr, 0.0);
        assert_eq!(summary.sample_sd, 0.0);
    }
}
