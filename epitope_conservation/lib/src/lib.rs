/*
    Open the alignment file
    Check if file is in fasta format
        Look for ">" on the first line that is not blank or numbers only
        Else parse as a general name/sequence block alignment
    Check that every sequence has the same length
        Else report which sequence breaks the alignment
*/


use std::path::Path;
use log::{error, info};
pub mod lib_utils;
use lib_utils::alignment::Alignment;
use lib_utils::error::Result;
use lib_utils::msa_parser::{is_likely_fasta, parse_fasta, parse_general};
use lib_utils::struct_helper::FileBufferHelper;

pub use lib_utils::conservation::{analyse_peptide, AnalysisOptions, PeptideReport, RowResult};
pub use lib_utils::error::Error;

pub fn load_alignment(infile: &Path) -> Result<Alignment> {
    let mut alignment_file = FileBufferHelper::new(infile)?;
    info!("File opened successfully - {:?}", infile);
    let fasta = is_likely_fasta(&mut alignment_file)?;
    alignment_file.buffer_reset()?;
    let rows = if fasta {
        info!("Reading {:?} as fasta", infile);
        parse_fasta(&mut alignment_file)?
    } else {
        info!("Reading {:?} as general msa format", infile);
        parse_general(&mut alignment_file)?
    };
    Alignment::new(rows).inspect_err(|e| error!("{:?} is not a valid alignment: {}", infile, e))
}
