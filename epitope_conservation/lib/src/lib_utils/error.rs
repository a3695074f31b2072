use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Unable to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Illegal msa format (line {line}): {reason}")]
    MsaFormat { line: usize, reason: String },

    #[error("Alignment contains no sequences")]
    EmptyAlignment,

    #[error("Sequence {id} has length {found}, expected alignment length {expected}")]
    RaggedAlignment {
        id: String,
        expected: usize,
        found: usize,
    },

    #[error("Sequence {id} contains non-ASCII residues")]
    NonAsciiResidue { id: String },

    #[error("Unexpected format in peptide table (line {line}): expected {expected} columns, found {found}")]
    ColumnCount {
        line: usize,
        expected: String,
        found: usize,
    },

    #[error("Unexpected format in peptide table (line {line}): {field} is not an integer: {value:?}")]
    NotAnInteger {
        line: usize,
        field: &'static str,
        value: String,
    },

    #[error("Unequal length: {peptide}, {homolog}")]
    LengthMismatch { peptide: String, homolog: String },

    #[error("Cannot calculate similarity of empty sequences")]
    EmptySequence,
}

impl Error {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Error::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
