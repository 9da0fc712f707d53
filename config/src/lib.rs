pub mod fns;
pub mod mods;

pub use fns::*;
pub use mods::*;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// numeric values
pub const MIN_THREADS: usize = 1;
pub const TSV_DELIMITER: u8 = b'\t';

// curated [putative oncogenic] table columns
pub const SAMPLE: &str = "Sample";
pub const FUSION_NAME: &str = "FusionName";
pub const GENE1A: &str = "Gene1A";
pub const GENE2A: &str = "Gene2A";
pub const GENE1B: &str = "Gene1B";
pub const GENE2B: &str = "Gene2B";
pub const GENE_FIELDS: [&str; 4] = [GENE1A, GENE2A, GENE1B, GENE2B];

// raw caller table columns
pub const TUMOR_ID: &str = "tumor_id";

// output schema
pub const BIOSPECIMEN_ID: &str = "Kids_First_Biospecimen_ID";

// cells treated as missing gene names
pub const MISSING_VALUES: [&str; 3] = ["", "NA", "."];

// file names
pub const EPENDYMOMA_SUMMARY: &str = "fusion_summary_ependymoma_foi.tsv";
pub const EMBRYONAL_SUMMARY: &str = "fusion_summary_embryonal_foi.tsv";
pub const RECONCILIATION_REPORT: &str = "fusion_summary_report.json";
pub const DEFAULT_OUTDIR: &str = "results";

// accepted input suffixes
pub const TABLE_SUFFIXES: [&str; 4] = [".tsv", ".txt", ".tsv.gz", ".txt.gz"];
