use csv::StringRecord;
use hashbrown::{HashMap, HashSet};

use config::{FUSION_NAME, GENE_FIELDS, MISSING_VALUES, SAMPLE};

use crate::TableError;

/// maps required column names to their position in a header row
#[derive(Debug, Clone)]
pub struct ColumnIndex {
    positions: HashMap<&'static str, usize>,
}

impl ColumnIndex {
    /// resolves every required column or fails with the first one missing
    pub fn from_headers(
        headers: &StringRecord,
        required: &[&'static str],
        source: &str,
    ) -> Result<Self, TableError> {
        let mut positions = HashMap::with_capacity(required.len());

        for column in required {
            match headers.iter().position(|h| h.trim() == *column) {
                Some(idx) => {
                    positions.insert(*column, idx);
                }
                None => {
                    return Err(TableError::MissingColumn {
                        column: column.to_string(),
                        file: source.to_string(),
                    })
                }
            }
        }

        Ok(Self { positions })
    }

    #[inline(always)]
    pub fn get<'a>(&self, row: &'a StringRecord, column: &str) -> Option<&'a str> {
        self.positions
            .get(column)
            .and_then(|idx| row.get(*idx))
            .map(str::trim)
    }
}

/// one fusion event from the curated [putative oncogenic] table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FusionRecord {
    pub sample: String,
    pub fusion_name: String,
    pub genes: [Option<String>; 4],
}

impl FusionRecord {
    pub const COLUMNS: [&'static str; 6] = [
        SAMPLE,
        FUSION_NAME,
        GENE_FIELDS[0],
        GENE_FIELDS[1],
        GENE_FIELDS[2],
        GENE_FIELDS[3],
    ];

    pub fn new(sample: &str, fusion_name: &str, genes: [Option<&str>; 4]) -> Self {
        Self {
            sample: sample.to_string(),
            fusion_name: fusion_name.to_string(),
            genes: genes.map(|g| g.and_then(gene_or_none)),
        }
    }

    /// builds a record from a row; `line` is 1-based and counts the header
    pub fn parse(
        row: &StringRecord,
        index: &ColumnIndex,
        source: &str,
        line: usize,
    ) -> Result<Self, TableError> {
        let sample = required_field(row, index, SAMPLE, source, line)?;
        let fusion_name = required_field(row, index, FUSION_NAME, source, line)?;

        let genes = GENE_FIELDS.map(|field| index.get(row, field).and_then(gene_or_none));

        Ok(Self {
            sample,
            fusion_name,
            genes,
        })
    }

    pub fn genes(&self) -> impl Iterator<Item = &str> {
        self.genes.iter().filter_map(|g| g.as_deref())
    }

    /// true if any of the four gene fields is in `genes`
    pub fn has_any_gene(&self, genes: &HashSet<String>) -> bool {
        self.genes().any(|g| genes.contains(g))
    }
}

fn gene_or_none(value: &str) -> Option<String> {
    let value = value.trim();
    if MISSING_VALUES.contains(&value) {
        None
    } else {
        Some(value.to_string())
    }
}

pub(crate) fn required_field(
    row: &StringRecord,
    index: &ColumnIndex,
    column: &str,
    source: &str,
    line: usize,
) -> Result<String, TableError> {
    match index.get(row, column) {
        Some(value) if !MISSING_VALUES.contains(&value) => Ok(value.to_string()),
        _ => Err(TableError::EmptyField {
            column: column.to_string(),
            file: source.to_string(),
            line,
        }),
    }
}
