/*
    Read an alignment file into rows
        FASTA
            ">" starts a new sequence, the rest of the line is the identifier
            sequence lines are concatenated, whitespace removed
        General (interleaved name/sequence blocks)
            "name seq" appends to name
            "   seq" appends to the last named sequence
            "seq" appends to the sequence at the same position in the first block
            conservation, comment and numbering lines are skipped
*/

use std::collections::HashMap;
use log::{debug, trace};
use super::alignment::Row;
use super::error::{Error, Result};
use super::struct_helper::FileBufferHelper;

const PROGRAM_NAME_PREFIXES: [&str; 3] = ["CLUSTAL", "MUSCLE (", "PROBCONS "];
const COMMENT_PREFIXES: [&str; 4] = ["#", "%", "//", "!!"];

// empty lines and lines made of numbers only (e.g. position rulers)
fn is_blank_or_numeric(line: &str) -> bool {
    line.chars().all(|c| c.is_ascii_digit() || c.is_whitespace())
}

// clustal/selex conservation lines: indented, only '*', '.', ':'
fn is_conservation_line(line: &str) -> bool {
    line.starts_with(char::is_whitespace)
        && line.chars().all(|c| c == '*' || c == '.' || c == ':' || c.is_whitespace())
}

fn is_comment_line(line: &str) -> bool {
    let trimmed = line.trim_start();
    COMMENT_PREFIXES.iter().any(|prefix| trimmed.starts_with(prefix))
}

fn is_program_name_line(line: &str) -> bool {
    PROGRAM_NAME_PREFIXES.iter().any(|prefix| line.starts_with(prefix))
}

pub fn is_likely_fasta(file: &mut FileBufferHelper) -> Result<bool> {
    while file.next_line()? {
        if is_blank_or_numeric(&file.line) {
            continue;
        }
        return Ok(file.line.trim_start().starts_with('>'));
    }
    Ok(false)
}

pub fn parse_fasta(file: &mut FileBufferHelper) -> Result<Vec<Row>> {
    let mut rows: Vec<Row> = Vec::new();
    let mut current: Option<Row> = None;
    while file.next_line()? {
        if let Some(header) = file.line.trim_start().strip_prefix('>') {
            if let Some(row) = current.take() {
                rows.push(row);
            }
            trace!("Processing {}", header.trim());
            current = Some(Row::new(header.trim(), String::new()));
        } else if is_blank_or_numeric(&file.line) {
            continue;
        } else if let Some(row) = current.as_mut() {
            row.residues.extend(file.line.chars().filter(|c| !c.is_whitespace()));
        } else {
            // text before the first header
            debug!("Ignoring line {} before first header", file.line_number);
        }
    }
    if let Some(row) = current.take() {
        rows.push(row);
    }
    Ok(rows)
}

pub fn parse_general(file: &mut FileBufferHelper) -> Result<Vec<Row>> {
    let mut rows: Vec<Row> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut block = 0usize;
    let mut position_in_block = 0usize;
    let mut current_name: Option<usize> = None;
    let mut saw_ignorable = true;
    let mut is_first = true;

    while file.next_line()? {
        let line = file.line.as_str();
        if is_blank_or_numeric(line) || is_conservation_line(line) || is_comment_line(line) {
            saw_ignorable = true;
            continue;
        }
        if is_first && is_program_name_line(line) {
            continue;
        }
        is_first = false;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let indented = line.starts_with(char::is_whitespace);
        if !indented && tokens.len() > 2 {
            return Err(Error::MsaFormat {
                line: file.line_number,
                reason: format!("unrecognized msa format: {:?}", truncate(line)),
            });
        }
        if saw_ignorable {
            block += 1;
            position_in_block = 0;
            saw_ignorable = false;
        }
        let position = position_in_block;
        position_in_block += 1;

        match (indented, tokens.as_slice()) {
            (false, [name, seq]) => {
                let idx = *index.entry(name.to_string()).or_insert_with(|| {
                    rows.push(Row::new(*name, String::new()));
                    rows.len() - 1
                });
                rows[idx].residues.push_str(seq);
                current_name = Some(idx);
            }
            (true, [seq]) => match current_name {
                Some(idx) => rows[idx].residues.push_str(seq),
                None => {
                    return Err(Error::MsaFormat {
                        line: file.line_number,
                        reason: format!("sequence without name: {:?}", truncate(line)),
                    })
                }
            },
            (false, [seq]) => {
                if block == 1 {
                    return Err(Error::MsaFormat {
                        line: file.line_number,
                        reason: "first block cannot contain un-named sequence".to_string(),
                    });
                }
                match rows.get_mut(position) {
                    Some(row) => row.residues.push_str(seq),
                    None => {
                        return Err(Error::MsaFormat {
                            line: file.line_number,
                            reason: format!("more sequences in block than names: {:?}", truncate(line)),
                        })
                    }
                }
                current_name = None;
            }
            _ => {
                return Err(Error::MsaFormat {
                    line: file.line_number,
                    reason: format!("illegal msa format: {:?}", truncate(line)),
                })
            }
        }
    }
    Ok(rows)
}

fn truncate(line: &str) -> String {
    if line.chars().count() > 100 {
        format!("{} ...", line.chars().take(100).collect::<String>())
    } else {
        line.to_string()
    }
}
