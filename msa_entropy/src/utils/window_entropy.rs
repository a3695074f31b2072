/*
    Sliding window entropy of an alignment
        For every start column c with a full window [c, c+w-1]
            average normalized Shannon entropy of the window
            fraction of residues (not gaps) in the window
            Valid if the fraction reaches the threshold
    Alignments shorter than the window report the header only
*/

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use msa_epitope::lib_utils::alignment::Alignment;
use msa_epitope::lib_utils::entropy::{avg_normalized_shannon_entropy, residue_fraction};
use msa_epitope::lib_utils::peptide_locator::ColumnSpan;
use crate::utils::get_args::Cli;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WindowEntropy {
    /// 1-based start column.
    pub position: usize,
    pub entropy: f64,
    pub residue_fraction: f64,
}

pub fn window_entropies(alignment: &Alignment, cli: &Cli) -> Vec<WindowEntropy> {
    let window = cli.window as usize;
    if alignment.length() < window {
        warn!("Alignment of length {} is shorter than the window {}", alignment.length(), window);
        return Vec::new();
    }
    (0..=alignment.length() - window)
        .map(|start| {
            let span = ColumnSpan::new(start, start + window - 1);
            WindowEntropy {
                position: start + 1,
                entropy: avg_normalized_shannon_entropy(alignment, span, cli.classes),
                residue_fraction: residue_fraction(alignment, span),
            }
        })
        .collect()
}

pub fn report_entropy(alignment: &Alignment, infile: &Path, cli: &Cli) -> Result<()> {
    let out_file_name = format!("{}_{}", infile.display(), cli.output_suffix);
    info!("Output file: {}", out_file_name);
    let out_file = File::create(&out_file_name)
        .with_context(|| format!("Unable to create {}", out_file_name))?;
    let mut entropy_writer = BufWriter::new(out_file);
    write_report(&mut entropy_writer, &window_entropies(alignment, cli), cli)
        .with_context(|| format!("Unable to write {}", out_file_name))
}

fn write_report<W: Write>(writer: &mut W, windows: &[WindowEntropy], cli: &Cli) -> std::io::Result<()> {
    writeln!(
        writer,
        "Position{delim}Shannon_entropy{delim}Fraction_residues{delim}Validity",
        delim = cli.delimiter
    )?;
    for window in windows {
        let validity = if window.residue_fraction >= cli.threshold {
            "Valid"
        } else {
            "Invalid"
        };
        writeln!(
            writer,
            "{pos}{delim}{shannon}{delim}{fraction}{delim}{validity}",
            pos = window.position,
            shannon = window.entropy,
            fraction = window.residue_fraction,
            delim = cli.delimiter
        )?;
    }
    debug!("{} windows written", windows.len());
    writer.flush()
}
