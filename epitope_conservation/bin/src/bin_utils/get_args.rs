use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use msa_epitope::lib_utils::entropy::ResidueClasses;
use msa_epitope::lib_utils::gap_resolver::GapFill;
use msa_epitope::lib_utils::peptide_locator::LocatorConfig;
use msa_epitope::lib_utils::peptide_table::TableLayout;
use msa_epitope::lib_utils::score::ScorePolicy;
use msa_epitope::AnalysisOptions;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the alignment, fasta or general msa format
    #[arg(short='a', long="alignment", required = true)]
    pub alignment: PathBuf,
    /// Path to the tab-delimited peptide list
    #[arg(short='p', long="peptides", required = true)]
    pub peptides: PathBuf,
    /// Write the report here instead of stdout
    #[arg(short='o', long="output")]
    pub output: Option<PathBuf>,
    /// 'heatmap' reports scores only, 'sequences' adds the positional homolog of every row
    #[arg(short='m', long="mode", value_enum, default_value_t=Mode::Sequences)]
    pub mode: Mode,
    /// 'keep' completely gapped matches or 'fill' them in with non-gap residues
    #[arg(short='g', long="gaps", value_enum, default_value_t=Gaps::Fill)]
    pub gaps: Gaps,
    /// Added to half the peptide length to give the mismatch tolerance ceiling
    #[arg(short='e', long="extra-tolerance", allow_hyphen_values = true, default_value_t=-1)]
    pub extra_tolerance: i32,
    /// Columns of the peptide list: 'coordinates' (start, stop, length, peptide) or 'annotated'
    #[arg(short='l', long="layout", value_enum, default_value_t=Layout::Coordinates)]
    pub layout: Layout,
    /// Per-row score: similarity to the resolved homolog or to the matched window, or dissimilarity to the window
    #[arg(short='s', long="score", value_enum, default_value_t=Score::ResolvedSimilarity)]
    pub score: Score,
    /// Residue classes for Shannon entropy: 6, 7, 20 or 21 (gap included)
    #[arg(short='k', long="classes", value_parser=validate_classes, default_value="21")]
    pub classes: ResidueClasses,
    /// Number of peptides analysed in parallel
    #[arg(short='n', long="threads", value_parser=clap::value_parser!(u16).range(1..), default_value_t=4)]
    pub nproc: u16,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    Heatmap,
    Sequences
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Gaps {
    Keep,
    Fill
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Layout {
    Coordinates,
    Annotated
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Score {
    ResolvedSimilarity,
    RawSimilarity,
    RawDissimilarity
}

fn validate_classes(input_str: &str) -> Result<ResidueClasses, String> {
    input_str
        .parse::<usize>()
        .ok()
        .and_then(ResidueClasses::from_k)
        .ok_or_else(|| format!("Residue classes must be one of 6, 7, 20, 21, got {}", input_str))
}

impl Cli {
    pub fn layout(&self) -> TableLayout {
        match self.layout {
            Layout::Coordinates => TableLayout::Coordinates,
            Layout::Annotated => TableLayout::Annotated,
        }
    }

    pub fn analysis_options(&self) -> AnalysisOptions {
        AnalysisOptions {
            locator: LocatorConfig { extra_tolerance: self.extra_tolerance },
            gap_fill: match self.gaps {
                Gaps::Keep => GapFill::Keep,
                Gaps::Fill => GapFill::Fill,
            },
            score_policy: match self.score {
                Score::ResolvedSimilarity => ScorePolicy::ResolvedSimilarity,
                Score::RawSimilarity => ScorePolicy::RawSimilarity,
                Score::RawDissimilarity => ScorePolicy::RawDissimilarity,
            },
            classes: self.classes,
        }
    }
}
