/*
    Normalized Shannon entropy of alignment columns
        n: number of sequences
        k: number of residue types
        na: number of residues of type a, pa = na/n
        S = -sum pa ln pa / ln(min(n, k))
    A column with a single residue type has S = 0
    Residue types depend on the chosen classes:
        21: every symbol, gaps included
        20: every symbol except gaps
        7: aliphatic, aromatic, polar, positive, negative, special, gap/other
        6: the six classes above, everything else ignored
*/

use std::collections::HashMap;
use super::alignment::{Alignment, GAP};
use super::peptide_locator::ColumnSpan;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ResidueClasses {
    Six,
    Seven,
    Twenty,
    #[default]
    TwentyOne,
}

impl ResidueClasses {
    pub fn from_k(k: usize) -> Option<Self> {
        match k {
            6 => Some(ResidueClasses::Six),
            7 => Some(ResidueClasses::Seven),
            20 => Some(ResidueClasses::Twenty),
            21 => Some(ResidueClasses::TwentyOne),
            _ => None,
        }
    }

    pub fn k(&self) -> usize {
        match self {
            ResidueClasses::Six => 6,
            ResidueClasses::Seven => 7,
            ResidueClasses::Twenty => 20,
            ResidueClasses::TwentyOne => 21,
        }
    }

    // symbol counted for a residue, None if it is not counted at all
    fn symbol(&self, residue: u8) -> Option<u8> {
        match self {
            ResidueClasses::TwentyOne => Some(residue),
            ResidueClasses::Twenty => (residue != GAP).then_some(residue),
            ResidueClasses::Six => physico_chemical_class(residue),
            ResidueClasses::Seven => Some(physico_chemical_class(residue).unwrap_or(GAP)),
        }
    }
}

// Mirny & Shakhnovich (1999) classes
fn physico_chemical_class(residue: u8) -> Option<u8> {
    match residue {
        b'A' | b'V' | b'L' | b'I' | b'M' | b'C' => Some(b'a'),
        b'F' | b'W' | b'Y' | b'H' => Some(b'r'),
        b'S' | b'T' | b'N' | b'Q' => Some(b'p'),
        b'K' | b'R' => Some(b'o'),
        b'D' | b'E' => Some(b'e'),
        b'G' | b'P' => Some(b's'),
        _ => None,
    }
}

fn residue_distribution(alignment: &Alignment, col: usize, classes: ResidueClasses) -> HashMap<u8, usize> {
    let mut counts: HashMap<u8, usize> = HashMap::new();
    for symbol in alignment.column(col).filter_map(|r| classes.symbol(r)) {
        *counts.entry(symbol).or_insert(0) += 1;
    }
    counts
}

pub fn normalized_shannon_entropy(alignment: &Alignment, col: usize, classes: ResidueClasses) -> f64 {
    let dist = residue_distribution(alignment, col, classes);
    if dist.len() <= 1 {
        return 0.0;
    }
    let n = alignment.number_of_sequences() as f64;
    let s: f64 = dist
        .values()
        .map(|&na| {
            let pa = na as f64 / n;
            pa * pa.ln()
        })
        .sum();
    // two or more symbols imply n >= 2, so the denominator is positive
    let k = classes.k() as f64;
    -s / n.min(k).ln()
}

/// Mean normalized entropy over the columns of `span`.
pub fn avg_normalized_shannon_entropy(alignment: &Alignment, span: ColumnSpan, classes: ResidueClasses) -> f64 {
    let total: f64 = span
        .columns()
        .map(|col| normalized_shannon_entropy(alignment, col, classes))
        .sum();
    total / span.width() as f64
}

/// Fraction of non-gap residues in the columns of `span`.
pub fn residue_fraction(alignment: &Alignment, span: ColumnSpan) -> f64 {
    let residues: usize = span
        .columns()
        .map(|col| alignment.column(col).filter(|&r| r != GAP).count())
        .sum();
    residues as f64 / (span.width() * alignment.number_of_sequences()) as f64
}
