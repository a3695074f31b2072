/*
Average normalized Shannon entropy of an alignment over a sliding window
    + load every alignment (fasta or general msa format) and check its rows are of equal length
    + for every window of w columns
        + average the normalized entropy of its columns
        + report the fraction of residues, valid only above the threshold

Arguments
    path(s) to alignment file
    residue classes, window, threshold, output suffix and delimiter
*/

mod utils;
use anyhow::{Context, Result};
use clap::Parser;
use env_logger;
use log::{debug, error, info};
use utils::get_args::Cli;
use utils::window_entropy::report_entropy;
use msa_epitope::load_alignment;

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    debug!("Parsing commandline arguments");
    info!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    for file in &cli.input_alignment {
        debug!("Processing file: {:?}", file);
        let alignment = load_alignment(file)
            .with_context(|| format!("Unable to load alignment {:?}", file))
            .inspect_err(|e| error!("{:#}", e))?;
        info!("Alignment complies requirements {:?}", file);
        report_entropy(&alignment, file, &cli).inspect_err(|e| error!("{:#}", e))?;
    }
    Ok(())
}
