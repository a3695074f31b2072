/*
    Positional homolog of a matched peptide in one alignment row
        Take the row's residues over the matched columns
        No gaps -> done
        Classify where the gaps sit in the window
            gaps only at the N-terminal end -> pull residues from upstream
            gaps only at the C-terminal end -> pull residues from downstream
            interleaved (or one-sided widening ran out of sequence)
                -> widen left and right alternately
        One-sided widening stops short of the row's first and last column,
        widening both sides may take them
        Stop once the window holds as many residues as it has columns,
        or when the sequence ends on both sides
        The homolog is the window with its gaps removed
*/

use log::debug;
use super::alignment::GAP;
use super::peptide_locator::ColumnSpan;

/// How windows consisting only of gaps are reported.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum GapFill {
    /// Report the gap-only window as is.
    Keep,
    /// Replace it with the nearest residues, like any other gapped window.
    #[default]
    Fill,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GapShape {
    NoGap,
    /// `-+[^-]+`
    Leading,
    /// `[^-]+-+`
    Trailing,
    /// `-+`
    GapOnly,
    Interleaved,
}

impl GapShape {
    pub fn classify(window: &[u8]) -> Self {
        let gaps = window.iter().filter(|&&c| c == GAP).count();
        if gaps == 0 {
            return GapShape::NoGap;
        }
        if gaps == window.len() {
            return GapShape::GapOnly;
        }
        let leading = window.iter().take_while(|&&c| c == GAP).count();
        let trailing = window.iter().rev().take_while(|&&c| c == GAP).count();
        if leading == gaps {
            GapShape::Leading
        } else if trailing == gaps {
            GapShape::Trailing
        } else {
            GapShape::Interleaved
        }
    }
}

// inclusive window over a row with a running count of non-gap residues
struct Widening<'a> {
    seq: &'a [u8],
    lo: usize,
    hi: usize,
    residues: usize,
}

impl<'a> Widening<'a> {
    fn new(seq: &'a [u8], lo: usize, hi: usize) -> Self {
        let residues = seq[lo..=hi].iter().filter(|&&c| c != GAP).count();
        Self { seq, lo, hi, residues }
    }

    // widen by one column as long as `lo` stays at or right of `leftmost`
    fn grow_left(&mut self, leftmost: usize) -> bool {
        if self.lo <= leftmost {
            return false;
        }
        self.lo -= 1;
        if self.seq[self.lo] != GAP {
            self.residues += 1;
        }
        true
    }

    // widen by one column as long as `hi` stays at or left of `rightmost`
    fn grow_right(&mut self, rightmost: usize) -> bool {
        if self.hi >= rightmost {
            return false;
        }
        self.hi += 1;
        if self.seq[self.hi] != GAP {
            self.residues += 1;
        }
        true
    }

    fn stripped(&self) -> String {
        self.seq[self.lo..=self.hi]
            .iter()
            .filter(|&&c| c != GAP)
            .map(|&c| c as char)
            .collect()
    }
}

/// Gap-resolved residues of `row` over `span`.
///
/// The result can be shorter than the span when the row runs out of
/// residues on both sides.
pub fn resolve(row: &str, span: ColumnSpan, fill: GapFill) -> String {
    let seq = row.as_bytes();
    if seq.is_empty() || span.first >= seq.len() || span.first > span.last {
        return String::new();
    }
    let (first, last) = (span.first, span.last.min(seq.len() - 1));
    let width = last - first + 1;
    let shape = GapShape::classify(&seq[first..=last]);
    debug!("{} -> {:?}", &row[first..=last], shape);

    // one-sided widening never takes the first or the last column of the row
    let end = seq.len() - 1;
    match shape {
        GapShape::NoGap => return row[first..=last].to_string(),
        GapShape::GapOnly if fill == GapFill::Keep => return row[first..=last].to_string(),
        GapShape::Leading => {
            let mut window = Widening::new(seq, first, last);
            while window.residues < width && window.grow_left(1) {}
            if window.residues >= width {
                return window.stripped();
            }
        }
        GapShape::Trailing => {
            let mut window = Widening::new(seq, first, last);
            while window.residues < width && window.grow_right(end.saturating_sub(1)) {}
            if window.residues >= width {
                return window.stripped();
            }
        }
        GapShape::GapOnly | GapShape::Interleaved => {}
    }

    let mut window = Widening::new(seq, first, last);
    loop {
        if window.residues >= width {
            break;
        }
        let grew_left = window.grow_left(0);
        if window.residues >= width {
            break;
        }
        let grew_right = window.grow_right(end);
        if !grew_left && !grew_right {
            break;
        }
    }
    window.stripped()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(first: usize, last: usize) -> ColumnSpan {
        ColumnSpan::new(first, last)
    }

    #[test]
    fn classify_shapes() {
        assert_eq!(GapShape::classify(b"ACDE"), GapShape::NoGap);
        assert_eq!(GapShape::classify(b"--DE"), GapShape::Leading);
        assert_eq!(GapShape::classify(b"AC--"), GapShape::Trailing);
        assert_eq!(GapShape::classify(b"----"), GapShape::GapOnly);
        assert_eq!(GapShape::classify(b"C--G"), GapShape::Interleaved);
        assert_eq!(GapShape::classify(b"-CG-"), GapShape::Interleaved);
    }

    #[test]
    fn gap_free_window_is_unchanged() {
        assert_eq!(resolve("MKVALLAGQ", span(2, 5), GapFill::Fill), "VALL");
        assert_eq!(resolve("MKVALLAGQ", span(2, 5), GapFill::Keep), "VALL");
    }

    #[test]
    fn interleaved_gap_pulls_residues_from_both_sides() {
        assert_eq!(resolve("AC--GT", span(1, 4), GapFill::Fill), "ACGT");
    }

    #[test]
    fn leading_gaps_pull_upstream_residues() {
        assert_eq!(resolve("MPQ--CDE", span(3, 6), GapFill::Fill), "PQCD");
    }

    #[test]
    fn trailing_gaps_pull_downstream_residues() {
        assert_eq!(resolve("ABCD--EFG", span(2, 5), GapFill::Fill), "CDEF");
    }

    #[test]
    fn upstream_widening_stops_before_first_column() {
        // 'A' is out of reach on the left, 'D' is taken from the right instead
        assert_eq!(resolve("AB--CD", span(2, 4), GapFill::Fill), "BCD");
        assert_eq!(resolve("PQ--CDE", span(2, 5), GapFill::Fill), "QCDE");
    }

    #[test]
    fn downstream_widening_stops_before_last_column() {
        // 'Y' is out of reach on the right, 'X' is taken from the left instead
        assert_eq!(resolve("XAB--Y", span(1, 3), GapFill::Fill), "XAB");
        assert_eq!(resolve("ABCD--EF", span(2, 5), GapFill::Fill), "BCDE");
    }

    #[test]
    fn leading_gaps_at_sequence_start_fall_back_to_both_sides() {
        assert_eq!(resolve("--ABCDE", span(0, 3), GapFill::Fill), "ABCD");
    }

    #[test]
    fn trailing_gaps_at_sequence_end_fall_back_to_both_sides() {
        assert_eq!(resolve("ABCDE--", span(3, 6), GapFill::Fill), "BCDE");
    }

    #[test]
    fn gap_only_window() {
        assert_eq!(resolve("AB----CD", span(2, 5), GapFill::Keep), "----");
        assert_eq!(resolve("AB----CD", span(2, 5), GapFill::Fill), "ABCD");
    }

    #[test]
    fn unresolvable_windows_come_back_short() {
        assert_eq!(resolve("A---", span(1, 3), GapFill::Fill), "A");
        assert_eq!(resolve("----", span(0, 3), GapFill::Fill), "");
    }

    #[test]
    fn degenerate_inputs() {
        assert_eq!(resolve("", span(0, 0), GapFill::Fill), "");
        assert_eq!(resolve("ACD", span(5, 6), GapFill::Fill), "");
        // span clipped at the end of the row
        assert_eq!(resolve("ACD", span(1, 8), GapFill::Fill), "CD");
        assert_eq!(resolve("A", span(0, 0), GapFill::Fill), "A");
    }

    #[test]
    fn resolvable_windows_are_gap_free_and_long_enough() {
        let row = "AB-C--DEF-G";
        let residues = row.bytes().filter(|&c| c != GAP).count();
        for first in 0..row.len() {
            for last in first..row.len() {
                let width = last - first + 1;
                if width > residues {
                    continue;
                }
                let homolog = resolve(row, span(first, last), GapFill::Fill);
                assert!(!homolog.contains('-'), "{first}..={last}: {homolog}");
                assert!(homolog.len() >= width, "{first}..={last}: {homolog}");
            }
        }
    }
}
