//! Table readers for fusion-caller outputs
//!
//! Reads tab-delimited tables [plain or gzipped] produced by the
//! upstream fusion-calling pipeline: the curated putative oncogenic
//! table and the raw per-caller tables. Required columns are resolved
//! by header name; a missing column aborts the read.

use std::fmt::Debug;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use config::{get_progress_bar, SAMPLE, TSV_DELIMITER, TUMOR_ID};
use csv::{ReaderBuilder, StringRecord};
use flate2::read::MultiGzDecoder;
use log::info;
use thiserror::Error;

pub mod record;
pub use record::{ColumnIndex, FusionRecord};

#[macro_export]
macro_rules! dispatch {
    ($file:expr, { $($suffix:literal => $action:expr),* $(,)? }) => {{
        let f = $file.file_name().and_then(|f| f.to_str()).unwrap_or_default();
        $(
            if f.ends_with($suffix) {
                $action
            } else
        )* {
            return Err($crate::TableError::UnknownFormat(format!("{}", $file.display())));
        }
    }};
}

#[derive(Debug, Error)]
pub enum TableError {
    #[error("IO error in {file}: {source}")]
    Io {
        file: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed table {file}: {source}")]
    Csv {
        file: String,
        #[source]
        source: csv::Error,
    },
    #[error("table {file} lacks required column '{column}'")]
    MissingColumn { column: String, file: String },
    #[error("table {file} has an empty '{column}' at line {line}")]
    EmptyField {
        column: String,
        file: String,
        line: usize,
    },
    #[error("unrecognized table format: {0}")]
    UnknownFormat(String),
}

/// reads a whole table into memory, decompressing .gz inputs
pub fn reader<P: AsRef<Path> + Debug>(file: P) -> Result<String, TableError> {
    let path = file.as_ref();
    let source = path.display().to_string();
    let io_err = |e: std::io::Error| TableError::Io {
        file: source.clone(),
        source: e,
    };

    let handle = File::open(path).map_err(io_err)?;
    let mut stream: Box<dyn Read> = dispatch!(path, {
        ".gz" => Box::new(MultiGzDecoder::new(handle)),
        ".tsv" => Box::new(handle),
        ".txt" => Box::new(handle),
    });

    let mut contents = String::new();
    stream.read_to_string(&mut contents).map_err(io_err)?;

    Ok(contents)
}

/// header row plus a column index over it
fn index_table<'a>(
    contents: &'a str,
    required: &[&'static str],
    source: &str,
) -> Result<(csv::Reader<&'a [u8]>, ColumnIndex), TableError> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(TSV_DELIMITER)
        .has_headers(true)
        .flexible(true)
        .from_reader(contents.as_bytes());

    let headers: StringRecord = rdr
        .headers()
        .map_err(|e| TableError::Csv {
            file: source.to_string(),
            source: e,
        })?
        .clone();
    let index = ColumnIndex::from_headers(&headers, required, source)?;

    Ok((rdr, index))
}

/// parses the curated fusion table into records
pub fn parse_curated(contents: &str, source: &str) -> Result<Vec<FusionRecord>, TableError> {
    let (mut rdr, index) = index_table(contents, &FusionRecord::COLUMNS, source)?;
    let pb = get_progress_bar(
        contents.lines().count().saturating_sub(1) as u64,
        "Parsing curated fusions...",
    );

    let mut records = Vec::new();
    for (i, row) in rdr.records().enumerate() {
        let row = row.map_err(|e| TableError::Csv {
            file: source.to_string(),
            source: e,
        })?;
        records.push(FusionRecord::parse(&row, &index, source, i + 2)?);
        pb.inc(1);
    }

    pb.finish_and_clear();
    info!("Fusion events parsed from {}: {}", source, records.len());

    Ok(records)
}

/// parses a single id column [one value per row, duplicates kept]
pub fn parse_ids(
    contents: &str,
    column: &'static str,
    source: &str,
) -> Result<Vec<String>, TableError> {
    let (mut rdr, index) = index_table(contents, &[column], source)?;
    let pb = get_progress_bar(
        contents.lines().count().saturating_sub(1) as u64,
        "Parsing specimen ids...",
    );

    let mut ids = Vec::new();
    for (i, row) in rdr.records().enumerate() {
        let row = row.map_err(|e| TableError::Csv {
            file: source.to_string(),
            source: e,
        })?;
        ids.push(record::required_field(&row, &index, column, source, i + 2)?);
        pb.inc(1);
    }

    pb.finish_and_clear();
    info!("Specimen ids parsed from {}: {}", source, ids.len());

    Ok(ids)
}

pub fn read_curated<P: AsRef<Path> + Debug>(file: P) -> Result<Vec<FusionRecord>, TableError> {
    let contents = reader(&file)?;
    parse_curated(&contents, &file.as_ref().display().to_string())
}

/// specimen ids [`tumor_id`] of a raw caller table
pub fn read_caller_ids<P: AsRef<Path> + Debug>(file: P) -> Result<Vec<String>, TableError> {
    let contents = reader(&file)?;
    parse_ids(&contents, TUMOR_ID, &file.as_ref().display().to_string())
}

/// newline-delimited specimen list; blank lines and '#' comments are skipped.
/// A leading `Sample`/`tumor_id` header line is tolerated.
pub fn read_specimen_list<P: AsRef<Path> + Debug>(file: P) -> Result<Vec<String>, TableError> {
    let contents = reader(&file)?;

    let ids = contents
        .lines()
        .map(str::trim)
        .filter(|x| !x.is_empty() && !x.starts_with('#'))
        .filter(|x| *x != SAMPLE && *x != TUMOR_ID)
        .map(|x| x.to_string())
        .collect::<Vec<_>>();

    info!("Specimens in subset list: {}", ids.len());
    Ok(ids)
}
