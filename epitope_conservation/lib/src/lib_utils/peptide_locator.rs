/*
    Locate a peptide in the alignment
        Exact pass: first row (in alignment order) containing the peptide
        Approximate pass: raise the mismatch tolerance one step at a time,
            scanning all rows at each level
            lowest tolerance wins, row order breaks ties
        Columns are alignment columns, gaps included
*/

use std::ops::RangeInclusive;
use log::debug;
use super::alignment::Alignment;
use super::approximate_match::find;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LocatorConfig {
    /// Added to `len / 2` to obtain the tolerance ceiling. May be negative.
    pub extra_tolerance: i32,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self { extra_tolerance: -1 }
    }
}

impl LocatorConfig {
    /// Exclusive upper bound of the tolerances tried for a peptide.
    pub fn tolerance_ceiling(&self, peptide_len: usize) -> usize {
        let ceiling = (peptide_len / 2) as i64 + i64::from(self.extra_tolerance);
        ceiling.max(0) as usize
    }
}

/// Inclusive 0-based column span.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnSpan {
    pub first: usize,
    pub last: usize,
}

impl ColumnSpan {
    pub fn new(first: usize, last: usize) -> Self {
        debug_assert!(first <= last);
        Self { first, last }
    }

    fn from_window(start: usize, len: usize) -> Self {
        Self::new(start, start + len - 1)
    }

    pub fn width(&self) -> usize {
        self.last - self.first + 1
    }

    pub fn columns(&self) -> RangeInclusive<usize> {
        self.first..=self.last
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Located {
    /// Row the peptide was found in.
    pub row: usize,
    pub span: ColumnSpan,
    /// Mismatches allowed when the match was found, 0 for exact hits.
    pub tolerance: usize,
}

impl Located {
    pub fn is_exact(&self) -> bool {
        self.tolerance == 0
    }

    pub fn starts_before(&self, expected_start: i64) -> bool {
        (self.span.first as i64) < expected_start
    }
}

pub fn locate(alignment: &Alignment, peptide: &str, config: &LocatorConfig) -> Option<Located> {
    if peptide.is_empty() {
        return None;
    }
    exact_hit(alignment, peptide).or_else(|| approximate_hit(alignment, peptide, config))
}

fn exact_hit(alignment: &Alignment, peptide: &str) -> Option<Located> {
    alignment.rows().enumerate().find_map(|(row, seq)| {
        seq.residues.find(peptide).map(|start| Located {
            row,
            span: ColumnSpan::from_window(start, peptide.len()),
            tolerance: 0,
        })
    })
}

fn approximate_hit(alignment: &Alignment, peptide: &str, config: &LocatorConfig) -> Option<Located> {
    let ceiling = config.tolerance_ceiling(peptide.len());
    // tolerance 0 is the exact pass
    (1..ceiling).find_map(|tolerance| {
        debug!("Trying {} with tolerance {}", peptide, tolerance);
        alignment.rows().enumerate().find_map(|(row, seq)| {
            find(peptide, &seq.residues, tolerance).map(|m| {
                debug!("{} -> {} ({})", peptide, &seq.residues[m.start..m.end], seq.id);
                Located {
                    row,
                    span: ColumnSpan::from_window(m.start, peptide.len()),
                    tolerance,
                }
            })
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lib_utils::alignment::Row;

    fn msa(rows: &[(&str, &str)]) -> Alignment {
        Alignment::new(rows.iter().map(|(id, seq)| Row::new(*id, *seq)).collect()).unwrap()
    }

    #[test]
    fn tolerance_ceiling() {
        let strict = LocatorConfig { extra_tolerance: -1 };
        assert_eq!(strict.tolerance_ceiling(9), 3);
        assert_eq!(strict.tolerance_ceiling(1), 0);
        let loose = LocatorConfig { extra_tolerance: 2 };
        assert_eq!(loose.tolerance_ceiling(9), 6);
        let negative = LocatorConfig { extra_tolerance: -10 };
        assert_eq!(negative.tolerance_ceiling(9), 0);
    }

    #[test]
    fn exact_hit_in_first_matching_row() {
        let alignment = msa(&[("a", "MKV-LLAGQ"), ("b", "MKVALLAGQ"), ("c", "MKVALLAGQ")]);
        let located = locate(&alignment, "VALL", &LocatorConfig::default()).unwrap();
        assert_eq!(located, Located { row: 1, span: ColumnSpan::new(2, 5), tolerance: 0 });
        assert!(located.is_exact());
    }

    #[test]
    fn lower_tolerance_beats_row_order() {
        // row a needs two mismatches, row b only one
        let alignment = msa(&[("a", "QQQQCDEFGH"), ("b", "AXXXCDEFGW")]);
        let config = LocatorConfig { extra_tolerance: 2 };
        let located = locate(&alignment, "CDEFGH", &config).unwrap();
        assert_eq!(located.row, 0);
        assert!(located.is_exact());

        let located = locate(&alignment, "CDEFXY", &config).unwrap();
        assert_eq!(located.tolerance, 2);
        assert_eq!(located.row, 0);

        let located = locate(&alignment, "XXXCDY", &config).unwrap();
        assert_eq!(located, Located { row: 1, span: ColumnSpan::new(1, 6), tolerance: 1 });
    }

    #[test]
    fn not_found_beyond_ceiling() {
        let alignment = msa(&[("a", "ACDEFGHIKL")]);
        let config = LocatorConfig { extra_tolerance: -1 };
        // six residues allow a tolerance of 1 only, two are needed
        assert_eq!(locate(&alignment, "ACXXFG", &config), None);
        let config = LocatorConfig { extra_tolerance: 0 };
        let located = locate(&alignment, "ACXXFG", &config).unwrap();
        assert_eq!(located.tolerance, 2);
        assert_eq!(located.span, ColumnSpan::new(0, 5));
    }

    #[test]
    fn empty_or_too_long_peptide() {
        let alignment = msa(&[("a", "ACD")]);
        assert_eq!(locate(&alignment, "", &LocatorConfig::default()), None);
        assert_eq!(locate(&alignment, "ACDEFGH", &LocatorConfig { extra_tolerance: 5 }), None);
    }

    #[test]
    fn span_helpers() {
        let span = ColumnSpan::new(3, 7);
        assert_eq!(span.width(), 5);
        assert_eq!(span.columns().collect::<Vec<_>>(), vec![3, 4, 5, 6, 7]);
        let located = Located { row: 0, span, tolerance: 1 };
        assert!(located.starts_before(4));
        assert!(!located.starts_before(3));
    }
}
