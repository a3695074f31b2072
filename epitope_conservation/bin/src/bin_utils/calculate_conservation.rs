/*
    Report the conservation of every peptide across the alignment
        Share the alignment read-only between the workers
        Analyse one peptide per job
            locate, resolve homologs, score, summarise, entropy
        Collect the results and write them in input order
    Unmatched peptides produce no row

    If Mode::Sequences
        every alignment row contributes its homolog and its score
    Else if Mode::Heatmap
        every alignment row contributes its score only
*/

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::sync::{mpsc, Arc};
use anyhow::{bail, Context, Result};
use log::{debug, error, info};
use threadpool::ThreadPool;
use msa_epitope::lib_utils::alignment::Alignment;
use msa_epitope::lib_utils::peptide_table::{PeptideEntry, PeptideMetadata, TableLayout};
use msa_epitope::lib_utils::score::{round_half_up, ScorePolicy};
use msa_epitope::{analyse_peptide, PeptideReport};
use super::get_args::{Cli, Mode};

const DELIMITER: &str = "\t";
const NOT_AVAILABLE: &str = "NA";
const DECIMALS: i32 = 4;

pub fn report_conservation(alignment: Alignment, peptides: &[PeptideEntry], cli: &Cli) -> Result<()> {
    let options = cli.analysis_options();
    let out: Box<dyn Write> = match &cli.output {
        Some(path) => {
            info!("Output file: {:?}", path);
            Box::new(File::create(path).with_context(|| format!("Unable to create {:?}", path))?)
        }
        None => Box::new(io::stdout().lock()),
    };
    let mut report_writer = BufWriter::new(out);
    let headers = header_line(&alignment, cli.layout(), cli.mode, options.score_policy);
    writeln!(report_writer, "{}", headers).context("Unable to write the report header")?;

    let shared_alignment = Arc::new(alignment);
    let pool = ThreadPool::new(usize::from(cli.nproc));
    let (tx, rx) = mpsc::channel();
    for (idx, entry) in peptides.iter().enumerate() {
        let alignment = Arc::clone(&shared_alignment);
        let tx = tx.clone();
        let peptide = entry.peptide.clone();
        let expected_start = entry.expected_start();
        pool.execute(move || {
            let report = analyse_peptide(&alignment, &peptide, expected_start, &options);
            if tx.send((idx, report)).is_err() {
                error!("Result of {} could not be collected", peptide);
            }
        });
    }
    drop(tx);

    // workers finish in any order, rows are written in input order
    let mut pending: BTreeMap<usize, Option<PeptideReport>> = BTreeMap::new();
    let mut next = 0usize;
    let mut written = 0usize;
    for (idx, report) in rx {
        pending.insert(idx, report);
        while let Some(report) = pending.remove(&next) {
            if let Some(report) = report {
                let row = data_line(&peptides[next], &report, cli.mode);
                writeln!(report_writer, "{}", row)
                    .with_context(|| format!("Unable to write the row of {}", peptides[next].peptide))?;
                written += 1;
            }
            debug!("Peptide {} of {} done", next + 1, peptides.len());
            next += 1;
        }
    }
    pool.join();
    if next < peptides.len() {
        bail!("Analysis of {} did not complete", peptides[next].peptide);
    }
    report_writer.flush().context("Unable to flush the report")?;
    info!("{} of {} peptides reported", written, peptides.len());
    Ok(())
}

fn header_line(alignment: &Alignment, layout: TableLayout, mode: Mode, policy: ScorePolicy) -> String {
    let mut columns: Vec<String> = match layout {
        TableLayout::Coordinates => vec!["START", "STOP", "LENGTH", "EPITOPE"],
        TableLayout::Annotated => vec!["TAXO", "SOURCE", "POP", "EPITOPE", "NAME", "ACC"],
    }
    .into_iter()
    .map(String::from)
    .collect();
    let label = policy.label();
    columns.push("FIRST (MSA)".to_string());
    columns.push("LAST (MSA)".to_string());
    for stat in ["MEDIAN", "IQR", "MIN", "MAX"] {
        columns.push(format!("{} {}", stat, label));
    }
    columns.push("SHANNON ENT".to_string());
    for row in alignment.rows() {
        columns.push(row.id.clone());
        if mode == Mode::Sequences {
            // homolog and score share the identifier
            columns.push(String::new());
        }
    }
    columns.join(DELIMITER)
}

fn data_line(entry: &PeptideEntry, report: &PeptideReport, mode: Mode) -> String {
    let mut columns: Vec<String> = match &entry.metadata {
        PeptideMetadata::Coordinates { start, stop, length } => vec![
            start.to_string(),
            stop.to_string(),
            length.to_string(),
            entry.peptide.clone(),
        ],
        PeptideMetadata::Annotated { taxonomy, source, population, name, accession } => vec![
            taxonomy.clone(),
            source.clone(),
            population.clone(),
            entry.peptide.clone(),
            name.clone(),
            accession.clone(),
        ],
    };
    columns.push(report.located.span.first.to_string());
    columns.push(report.located.span.last.to_string());
    match &report.summary {
        Some(summary) => {
            for value in [summary.median, summary.iqr, summary.min, summary.max] {
                columns.push(format_value(value));
            }
        }
        None => columns.extend(std::iter::repeat(NOT_AVAILABLE.to_string()).take(4)),
    }
    columns.push(format_value(report.entropy));
    for row in &report.rows {
        if mode == Mode::Sequences {
            columns.push(row.homolog.clone());
        }
        columns.push(row.score.map_or_else(|| NOT_AVAILABLE.to_string(), format_value));
    }
    columns.join(DELIMITER)
}

fn format_value(value: f64) -> String {
    round_half_up(value, DECIMALS).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use msa_epitope::lib_utils::alignment::Row;
    use msa_epitope::AnalysisOptions;

    fn alignment() -> Alignment {
        Alignment::new(vec![
            Row::new("ref", "MKVALLAGQT"),
            Row::new("var", "MKVSLLAGQT"),
            Row::new("del", "MKV--LLGQT"),
        ])
        .unwrap()
    }

    fn coordinates_entry(peptide: &str) -> PeptideEntry {
        PeptideEntry {
            peptide: peptide.to_string(),
            metadata: PeptideMetadata::Coordinates { start: 3, stop: 6, length: 4 },
        }
    }

    #[test]
    fn sequences_header() {
        let header = header_line(&alignment(), TableLayout::Coordinates, Mode::Sequences, ScorePolicy::ResolvedSimilarity);
        assert_eq!(
            header,
            "START\tSTOP\tLENGTH\tEPITOPE\tFIRST (MSA)\tLAST (MSA)\tMEDIAN CNSV\tIQR CNSV\tMIN CNSV\tMAX CNSV\t\
             SHANNON ENT\tref\t\tvar\t\tdel\t"
        );
    }

    #[test]
    fn heatmap_header_with_annotations() {
        let header = header_line(&alignment(), TableLayout::Annotated, Mode::Heatmap, ScorePolicy::RawDissimilarity);
        assert!(header.starts_with("TAXO\tSOURCE\tPOP\tEPITOPE\tNAME\tACC\tFIRST (MSA)"));
        assert!(header.contains("MEDIAN DISS"));
        assert!(header.ends_with("SHANNON ENT\tref\tvar\tdel"));
    }

    #[test]
    fn sequences_row() {
        let alignment = alignment();
        let entry = coordinates_entry("VALL");
        let report = analyse_peptide(&alignment, &entry.peptide, entry.expected_start(), &AnalysisOptions::default()).unwrap();
        let line = data_line(&entry, &report, Mode::Sequences);
        let columns: Vec<&str> = line.split('\t').collect();
        assert_eq!(&columns[..6], &["3", "6", "4", "VALL", "2", "5"]);
        // median, iqr, min, max
        assert_eq!(&columns[6..10], &["0.75", "0.5", "0.5", "1"]);
        assert_eq!(&columns[11..], &["VALL", "1", "VSLL", "0.75", "KVLL", "0.5"]);
    }

    #[test]
    fn heatmap_row_marks_unscored_rows() {
        let alignment = Alignment::new(vec![Row::new("ref", "ACDE"), Row::new("gappy", "A---")]).unwrap();
        let entry = coordinates_entry("CDE");
        let report = analyse_peptide(&alignment, &entry.peptide, None, &AnalysisOptions::default()).unwrap();
        let line = data_line(&entry, &report, Mode::Heatmap);
        assert!(line.ends_with("\t1\tNA"));
    }

    #[test]
    fn values_are_rounded() {
        assert_eq!(format_value(2.0 / 3.0), "0.6667");
        assert_eq!(format_value(0.25), "0.25");
    }
}
