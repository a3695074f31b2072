/*
    Read the tab-delimited peptide list
        coordinates: start, stop, length, peptide
        annotated: taxonomy, source, population, peptide, _, _, name, accession (8 or more)
    Empty lines are skipped, any other malformed line ends the run
*/

use std::path::Path;
use log::{debug, info};
use super::error::{Error, Result};
use super::struct_helper::FileBufferHelper;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TableLayout {
    #[default]
    Coordinates,
    Annotated,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PeptideMetadata {
    Coordinates {
        start: i64,
        stop: i64,
        length: i64,
    },
    Annotated {
        taxonomy: String,
        source: String,
        population: String,
        name: String,
        accession: String,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PeptideEntry {
    pub peptide: String,
    pub metadata: PeptideMetadata,
}

impl PeptideEntry {
    /// Start position supplied with the peptide, if the layout has one.
    pub fn expected_start(&self) -> Option<i64> {
        match self.metadata {
            PeptideMetadata::Coordinates { start, .. } => Some(start),
            PeptideMetadata::Annotated { .. } => None,
        }
    }
}

pub fn read_peptide_table(path: &Path, layout: TableLayout) -> Result<Vec<PeptideEntry>> {
    let mut file = FileBufferHelper::new(path)?;
    let mut entries = Vec::new();
    while file.next_line()? {
        if file.line.is_empty() {
            continue;
        }
        let entry = parse_line(&file.line, file.line_number, layout)?;
        debug!("Read peptide {}", entry.peptide);
        entries.push(entry);
    }
    info!("Read {} peptides from {:?}", entries.len(), path);
    Ok(entries)
}

fn parse_line(line: &str, line_number: usize, layout: TableLayout) -> Result<PeptideEntry> {
    let fields: Vec<&str> = line.split('\t').collect();
    match layout {
        TableLayout::Coordinates => {
            if fields.len() != 4 {
                return Err(Error::ColumnCount {
                    line: line_number,
                    expected: "4".to_string(),
                    found: fields.len(),
                });
            }
            Ok(PeptideEntry {
                peptide: normalize_peptide(fields[3]),
                metadata: PeptideMetadata::Coordinates {
                    start: parse_integer(fields[0], "start", line_number)?,
                    stop: parse_integer(fields[1], "stop", line_number)?,
                    length: parse_integer(fields[2], "length", line_number)?,
                },
            })
        }
        TableLayout::Annotated => {
            if fields.len() < 8 {
                return Err(Error::ColumnCount {
                    line: line_number,
                    expected: "at least 8".to_string(),
                    found: fields.len(),
                });
            }
            let taxonomy = if fields[0].is_empty() { "NA" } else { fields[0] };
            Ok(PeptideEntry {
                peptide: normalize_peptide(fields[3]),
                metadata: PeptideMetadata::Annotated {
                    taxonomy: taxonomy.to_string(),
                    source: fields[1].to_string(),
                    population: fields[2].to_string(),
                    name: fields[6].to_string(),
                    accession: fields[7].to_string(),
                },
            })
        }
    }
}

fn normalize_peptide(field: &str) -> String {
    field.trim().to_ascii_uppercase()
}

fn parse_integer(value: &str, field: &'static str, line: usize) -> Result<i64> {
    value.trim().parse().map_err(|_| Error::NotAnInteger {
        line,
        field,
        value: value.to_string(),
    })
}
