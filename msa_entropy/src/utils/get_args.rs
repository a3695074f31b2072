use clap::Parser;
use std::path::PathBuf;
use msa_epitope::lib_utils::entropy::ResidueClasses;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the alignment file(s), fasta or general msa format
    #[arg(short='i', long="infile", required = true)]
    pub input_alignment: Vec<PathBuf>,
    /// Residue classes for Shannon entropy: 6, 7, 20 or 21 (gap included)
    #[arg(short='k', long="classes", value_parser=validate_classes, default_value="21")]
    pub classes: ResidueClasses,
    /// Number of columns averaged at every position
    #[arg(short='w', long="window", value_parser=clap::value_parser!(u32).range(1..), default_value_t=10)]
    pub window: u32,
    /// Fraction of residues (not gaps) needed for a window to be valid
    #[arg(short='t', long="threshold", value_parser=validate_percent, default_value_t=0.8)]
    pub threshold: f64,
    /// Suffix appended to the input file name for the output file
    #[arg(short='s', long="output-suffix", default_value="entropy.tsv")]
    pub output_suffix: String,
    /// Delimiter of the output file
    #[arg(short='d', long="delimiter", default_value="\t")]
    pub delimiter: String,
}

fn validate_percent(input_str: &str) -> Result<f64, String> {
    match input_str.parse::<f64>() {
        Ok(value) if (0.0..=1.0).contains(&value) => Ok(value),
        Ok(value) => Err(format!("Threshold must be a fraction between 0 and 1, got {}", value)),
        Err(e) => Err(format!("Threshold is not a number: {}", e)),
    }
}

fn validate_classes(input_str: &str) -> Result<ResidueClasses, String> {
    input_str
        .parse::<usize>()
        .ok()
        .and_then(ResidueClasses::from_k)
        .ok_or_else(|| format!("Residue classes must be one of 6, 7, 20, 21, got {}", input_str))
}
