/*
Report how well every peptide of a list is conserved across a multiple sequence alignment
    + load the alignment (fasta or general msa format) and check its rows are of equal length
    + load the tab-delimited peptide list
    + for every peptide
        + locate it in the alignment, exactly first, then with growing mismatch tolerance
        + extract the positional homolog of every row, resolving gaps
        + score every homolog against the peptide
        + summarise the scores and the Shannon entropy of the matched columns
    + write one row per located peptide

Implement clap to parse cli

Libs
    get arguments
    calculate_conservation: analyse the peptides in parallel and write the report

Arguments
    path to alignment file
    path to peptide list
    output mode, gap handling, tolerance budget, score, entropy classes
*/

mod bin_utils;
use anyhow::{Context, Result};
use clap::Parser;
use env_logger;
use log::{debug, error, info};
use bin_utils::get_args::Cli;
use bin_utils::calculate_conservation::report_conservation;
use msa_epitope::load_alignment;
use msa_epitope::lib_utils::peptide_table::read_peptide_table;

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    debug!("Parsing commandline arguments");
    info!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    info!(
        "Mismatch tolerance: peptide length / 2 {:+}",
        cli.extra_tolerance
    );
    // both inputs are read in full before any peptide is analysed
    let alignment = load_alignment(&cli.alignment)
        .with_context(|| format!("Unable to load alignment {:?}", cli.alignment))
        .inspect_err(|e| error!("{:#}", e))?;
    let peptides = read_peptide_table(&cli.peptides, cli.layout())
        .with_context(|| format!("Unable to read peptides {:?}", cli.peptides))
        .inspect_err(|e| error!("{:#}", e))?;
    info!("Analysing {} peptides on {} threads", peptides.len(), cli.nproc);
    report_conservation(alignment, &peptides, &cli)
        .inspect_err(|e| error!("{:#}", e))
}
