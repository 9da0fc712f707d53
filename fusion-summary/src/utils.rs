use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{Subtype, BIOSPECIMEN_ID, TSV_DELIMITER};
use csv::WriterBuilder;
use fusionpack::{read_caller_ids, read_curated, FusionRecord};
use log::info;
use serde::Serialize;

use crate::core::matrix::{Reconciliation, SummaryMatrix};
use crate::core::universe::SpecimenUniverse;

/// curated records and the specimen universe of a run
#[derive(Debug)]
pub struct Inputs {
    pub records: Vec<FusionRecord>,
    pub universe: SpecimenUniverse,
}

/// reads the curated table and both caller tables concurrently
pub fn load_inputs(curated: &PathBuf, arriba: &PathBuf, starfusion: &PathBuf) -> Result<Inputs> {
    info!("Reading curated and caller fusion tables...");

    let (records, (arriba_ids, starfusion_ids)) = rayon::join(
        || read_curated(curated),
        || rayon::join(|| read_caller_ids(arriba), || read_caller_ids(starfusion)),
    );

    let records = records?;
    let universe = SpecimenUniverse::union(arriba_ids?, starfusion_ids?);
    info!("Specimens assayed by the callers: {}", universe.len());

    Ok(Inputs { records, universe })
}

/// writes a summary matrix as a TSV with the biospecimen id column first
pub fn write_matrix<P: AsRef<Path>>(matrix: &SummaryMatrix, path: P) -> Result<()> {
    let path = path.as_ref();
    let mut writer = WriterBuilder::new()
        .delimiter(TSV_DELIMITER)
        .from_path(path)
        .with_context(|| format!("ERROR: Failed to create {}", path.display()))?;

    let mut header = Vec::with_capacity(matrix.columns().len() + 1);
    header.push(BIOSPECIMEN_ID);
    header.extend(matrix.columns().iter().map(String::as_str));
    writer.write_record(&header)?;

    for (specimen, counts) in matrix.rows() {
        let mut row = Vec::with_capacity(counts.len() + 1);
        row.push(specimen.to_string());
        row.extend(counts.iter().map(|c| c.to_string()));
        writer.write_record(&row)?;
    }

    writer.flush()?;
    info!(
        "Wrote {} specimens x {} fusions to {}",
        matrix.n_rows(),
        matrix.columns().len(),
        path.display()
    );

    Ok(())
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    version: &'static str,
    subtypes: &'a BTreeMap<Subtype, Reconciliation>,
}

/// writes the per-subtype reconciliation as pretty JSON
pub fn write_report<P: AsRef<Path>>(
    reconciliations: &BTreeMap<Subtype, Reconciliation>,
    path: P,
) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)
        .with_context(|| format!("ERROR: Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    let report = Report {
        version: config::VERSION,
        subtypes: reconciliations,
    };
    serde_json::to_writer_pretty(&mut writer, &report)?;
    writeln!(writer)?;
    writer.flush()?;

    info!("Reconciliation report written to {}", path.display());
    Ok(())
}
