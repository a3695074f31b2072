/*
    In-memory multiple sequence alignment
        Ordered rows of identifier + residues
        Every row has the same number of columns
        Residues are stored upper case, '-' is the gap
*/

use log::{debug, info};
use super::error::{Error, Result};

pub const GAP: u8 = b'-';

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row {
    pub id: String,
    pub residues: String,
}

impl Row {
    pub fn new(id: impl Into<String>, residues: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            residues: residues.into(),
        }
    }
}

/// Read-only alignment shared by every step of the epitope analysis.
#[derive(Clone, Debug)]
pub struct Alignment {
    rows: Vec<Row>,
    length: usize,
}

impl Alignment {
    pub fn new(mut rows: Vec<Row>) -> Result<Self> {
        let length = match rows.first() {
            Some(row) => row.residues.len(),
            None => return Err(Error::EmptyAlignment),
        };
        for row in rows.iter_mut() {
            if !row.residues.is_ascii() {
                return Err(Error::NonAsciiResidue { id: row.id.clone() });
            }
            if row.residues.len() != length {
                return Err(Error::RaggedAlignment {
                    id: row.id.clone(),
                    expected: length,
                    found: row.residues.len(),
                });
            }
            row.residues.make_ascii_uppercase();
            debug!("{} matches alignment length of {}", row.id, length);
        }
        info!("Alignment of {} sequences, length {}", rows.len(), length);
        Ok(Self { rows, length })
    }

    pub fn number_of_sequences(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn length(&self) -> usize {
        self.length
    }

    pub fn identifier(&self, row: usize) -> &str {
        &self.rows[row].id
    }

    pub fn residues(&self, row: usize) -> &str {
        &self.rows[row].residues
    }

    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }

    pub fn residue_at(&self, row: usize, col: usize) -> u8 {
        self.rows[row].residues.as_bytes()[col]
    }

    pub fn column(&self, col: usize) -> impl Iterator<Item = u8> + '_ {
        self.rows.iter().map(move |row| row.residues.as_bytes()[col])
    }
}
