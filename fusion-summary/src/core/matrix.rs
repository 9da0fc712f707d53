//! Long-to-wide pivot of filtered fusion events
//!
//! Counts (specimen, fusion) pairs, right-joins the counts against the
//! specimen universe and zero-fills every expected fusion column that
//! was never observed. The expected column list is closed: it comes
//! from the caller and is never inferred from the data.

use log::{error, info, warn};
use serde::Serialize;

use std::collections::{BTreeMap, BTreeSet};

use super::filter::FusionPair;
use super::universe::SpecimenUniverse;
use crate::SummaryError;

// orphan ids shown in error messages
const ORPHAN_PREVIEW: usize = 5;

/// what to do with filtered events whose specimen is not in the universe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrphanPolicy {
    #[default]
    Fail,
    Drop,
}

impl From<bool> for OrphanPolicy {
    fn from(drop: bool) -> Self {
        if drop {
            OrphanPolicy::Drop
        } else {
            OrphanPolicy::Fail
        }
    }
}

/// specimen x fusion-name count matrix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryMatrix {
    columns: Vec<String>,
    rows: BTreeMap<String, Vec<u32>>,
}

impl SummaryMatrix {
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// rows in ascending specimen order, counts aligned with `columns`
    pub fn rows(&self) -> impl Iterator<Item = (&str, &[u32])> {
        self.rows.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn get(&self, specimen: &str, fusion_name: &str) -> Option<u32> {
        let idx = self.columns.iter().position(|c| c == fusion_name)?;
        self.rows.get(specimen).map(|counts| counts[idx])
    }

    pub fn column(&self, fusion_name: &str) -> Option<Vec<u32>> {
        let idx = self.columns.iter().position(|c| c == fusion_name)?;
        Some(self.rows.values().map(|counts| counts[idx]).collect())
    }

    pub fn is_all_zero(&self) -> bool {
        self.rows.values().flatten().all(|count| *count == 0)
    }
}

/// bookkeeping of a single build, used to tell genuine zero hits
/// apart from a miswired run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Reconciliation {
    pub events: usize,
    pub specimens: usize,
    pub specimens_with_hits: usize,
    pub observed: Vec<String>,
    pub zero_filled: Vec<String>,
    pub orphans: Vec<String>,
}

impl Reconciliation {
    /// logs every condition that makes a matrix suspicious
    pub fn audit(&self, label: &str) {
        for name in &self.zero_filled {
            warn!(
                "[{}] expected fusion {} was not observed; filled with zeros",
                label, name
            );
        }

        if !self.orphans.is_empty() {
            warn!(
                "[{}] dropped {} specimen(s) absent from the caller tables",
                label,
                self.orphans.len()
            );
        }

        if self.events > 0 && self.specimens_with_hits == 0 {
            error!(
                "[{}] {} filtered events but none belongs to the {} assayed specimens; check the caller tables and the specimen id columns",
                label, self.events, self.specimens
            );
        } else if self.specimens_with_hits == 0 {
            warn!("[{}] summary matrix is all zeros", label);
        }

        info!(
            "[{}] {} specimens, {} with hits, {} observed fusions",
            label,
            self.specimens,
            self.specimens_with_hits,
            self.observed.len()
        );
    }
}

/// builds the summary matrix of `pairs` over `universe`, with at least
/// the `expected` fusion names as columns
pub fn build<S: AsRef<str>>(
    pairs: &[FusionPair],
    universe: &SpecimenUniverse,
    expected: &[S],
    policy: OrphanPolicy,
) -> Result<(SummaryMatrix, Reconciliation), SummaryError> {
    // pivot: specimen -> fusion -> count
    let mut pivot: BTreeMap<&str, BTreeMap<&str, u32>> = BTreeMap::new();
    let mut observed: BTreeSet<&str> = BTreeSet::new();

    for pair in pairs {
        *pivot
            .entry(pair.specimen.as_str())
            .or_default()
            .entry(pair.fusion_name.as_str())
            .or_insert(0) += 1;
        observed.insert(pair.fusion_name.as_str());
    }

    let orphans = pivot
        .keys()
        .filter(|specimen| !universe.contains(specimen))
        .map(|specimen| specimen.to_string())
        .collect::<Vec<_>>();

    if !orphans.is_empty() && policy == OrphanPolicy::Fail {
        return Err(SummaryError::OrphanSpecimens {
            count: orphans.len(),
            preview: orphans
                .iter()
                .take(ORPHAN_PREVIEW)
                .cloned()
                .collect::<Vec<_>>()
                .join(", "),
        });
    }

    let zero_filled = expected
        .iter()
        .map(AsRef::as_ref)
        .filter(|name| !observed.contains(name))
        .map(str::to_string)
        .collect::<BTreeSet<_>>();

    let columns = observed
        .iter()
        .map(|name| name.to_string())
        .chain(zero_filled.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect::<Vec<_>>();

    // right join on the universe; absent cells are zero
    let mut specimens_with_hits = 0;
    let rows = universe
        .iter()
        .map(|specimen| {
            let counts = match pivot.get(specimen) {
                Some(hits) => {
                    specimens_with_hits += 1;
                    columns
                        .iter()
                        .map(|c| hits.get(c.as_str()).copied().unwrap_or(0))
                        .collect()
                }
                None => vec![0; columns.len()],
            };
            (specimen.to_string(), counts)
        })
        .collect::<BTreeMap<_, _>>();

    let reconciliation = Reconciliation {
        events: pairs.len(),
        specimens: rows.len(),
        specimens_with_hits,
        observed: observed.iter().map(|name| name.to_string()).collect(),
        zero_filled: zero_filled.into_iter().collect(),
        orphans,
    };

    Ok((SummaryMatrix { columns, rows }, reconciliation))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<FusionPair> {
        raw.iter().map(|(s, f)| FusionPair::new(s, f)).collect()
    }

    #[test]
    fn test_right_join_and_zero_fill() {
        let universe = SpecimenUniverse::union(vec!["A", "B"], vec!["C"]);
        let (matrix, rec) = build(
            &pairs(&[("A", "X")]),
            &universe,
            &["X", "Y"],
            OrphanPolicy::Fail,
        )
        .unwrap();

        assert_eq!(matrix.n_rows(), 3);
        assert_eq!(matrix.columns(), &["X".to_string(), "Y".to_string()]);
        assert_eq!(matrix.get("A", "X"), Some(1));
        assert_eq!(matrix.get("B", "X"), Some(0));
        assert_eq!(matrix.get("C", "X"), Some(0));
        assert_eq!(matrix.column("Y"), Some(vec![0, 0, 0]));
        assert_eq!(rec.zero_filled, vec!["Y".to_string()]);
        assert_eq!(rec.specimens_with_hits, 1);
    }

    #[test]
    fn test_cells_are_exact_counts() {
        let universe = SpecimenUniverse::union(vec!["A", "B"], Vec::<&str>::new());
        let (matrix, _) = build(
            &pairs(&[("A", "X"), ("A", "X"), ("B", "Z"), ("A", "Z")]),
            &universe,
            &["X"],
            OrphanPolicy::Fail,
        )
        .unwrap();

        assert_eq!(matrix.columns(), &["X".to_string(), "Z".to_string()]);
        assert_eq!(matrix.get("A", "X"), Some(2));
        assert_eq!(matrix.get("A", "Z"), Some(1));
        assert_eq!(matrix.get("B", "Z"), Some(1));
        assert_eq!(matrix.get("B", "X"), Some(0));
        assert_eq!(matrix.get("Q", "X"), None);
    }

    #[test]
    fn test_rows_follow_universe_order() {
        let universe = SpecimenUniverse::union(vec!["S3", "S1"], vec!["S2"]);
        let (matrix, _) =
            build(&pairs(&[("S2", "X")]), &universe, &["X"], OrphanPolicy::Fail).unwrap();

        let ids = matrix.rows().map(|(id, _)| id).collect::<Vec<_>>();
        assert_eq!(ids, vec!["S1", "S2", "S3"]);
    }

    #[test]
    fn test_orphans_fail_by_default() {
        let universe = SpecimenUniverse::union(vec!["A"], vec!["B"]);
        let res = build(
            &pairs(&[("A", "X"), ("Z", "X")]),
            &universe,
            &["X"],
            OrphanPolicy::default(),
        );

        match res {
            Err(SummaryError::OrphanSpecimens { count, preview }) => {
                assert_eq!(count, 1);
                assert_eq!(preview, "Z");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_orphans_dropped_on_request() {
        let universe = SpecimenUniverse::union(vec!["A"], vec!["B"]);
        let (matrix, rec) = build(
            &pairs(&[("A", "X"), ("Z", "X"), ("Z", "W")]),
            &universe,
            &["X"],
            OrphanPolicy::Drop,
        )
        .unwrap();

        assert_eq!(matrix.n_rows(), 2);
        assert_eq!(matrix.get("Z", "X"), None);
        assert_eq!(matrix.column("W"), Some(vec![0, 0]));
        assert_eq!(rec.orphans, vec!["Z".to_string()]);
    }

    #[test]
    fn test_disjoint_inputs_build_all_zero_matrix() {
        let universe = SpecimenUniverse::union(vec!["A"], vec!["B"]);
        let (matrix, rec) = build(
            &pairs(&[("Z", "X")]),
            &universe,
            &["X", "Y"],
            OrphanPolicy::Drop,
        )
        .unwrap();

        assert!(matrix.is_all_zero());
        assert_eq!(rec.events, 1);
        assert_eq!(rec.specimens_with_hits, 0);
        assert_eq!(rec.zero_filled, vec!["Y".to_string()]);
    }

    #[test]
    fn test_no_events_keeps_every_specimen_and_column() {
        let universe = SpecimenUniverse::union(vec!["A", "B"], vec!["C", "D"]);
        let (matrix, rec) =
            build(&[], &universe, &["CIC--NUTM1", "MN1--BEND2"], OrphanPolicy::Fail).unwrap();

        assert_eq!(matrix.n_rows(), universe.len());
        assert_eq!(matrix.columns().len(), 2);
        assert!(matrix.is_all_zero());
        assert!(rec.observed.is_empty());
        assert_eq!(rec.zero_filled.len(), 2);
    }
}
