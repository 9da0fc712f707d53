//! Pipeline driver: filter -> pivot -> reconcile, once per subtype
//!
//! Both subtype matrices share the same specimen universe and are
//! built before anything is written, so a failure in either leaves
//! no partial output behind.

pub mod filter;
pub mod matrix;
pub mod universe;

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use config::{get_progress_bar, Subtype, RECONCILIATION_REPORT};
use fusionpack::{read_specimen_list, FusionRecord};
use hashbrown::HashSet;
use log::{info, warn};
use rayon::prelude::*;

use crate::cli::Args;
use crate::utils::{load_inputs, write_matrix, write_report};
use crate::SummaryError;

use self::filter::{filter, FusionSelector};
use self::matrix::{build, OrphanPolicy, Reconciliation, SummaryMatrix};
use self::universe::SpecimenUniverse;

/// filtered, pivoted and reconciled matrix of one subtype
pub fn summarize_subtype(
    subtype: Subtype,
    records: &[FusionRecord],
    universe: &SpecimenUniverse,
    specimens: Option<&HashSet<String>>,
    policy: OrphanPolicy,
) -> Result<(SummaryMatrix, Reconciliation), SummaryError> {
    let mut selector = FusionSelector::for_subtype(subtype);
    if let Some(specimens) = specimens {
        selector = selector.with_specimens(specimens.iter().cloned());
    }

    let pairs = filter(records, &selector);
    info!("[{}] fusion events of interest: {}", subtype, pairs.len());

    let (matrix, reconciliation) = build(&pairs, universe, subtype.expected_columns(), policy)?;
    reconciliation.audit(&subtype.to_string());

    Ok((matrix, reconciliation))
}

pub fn summarize_fusions(args: Args) -> Result<()> {
    info!("Preparing fusion tables for summary...");

    let inputs = load_inputs(&args.putative_oncogenic, &args.arriba, &args.starfusion)?;

    let subset = match &args.specimens {
        Some(path) => Some(
            read_specimen_list(path)?
                .into_iter()
                .collect::<HashSet<String>>(),
        ),
        None => None,
    };

    let universe = match &subset {
        Some(subset) => {
            let restricted = inputs.universe.restrict(subset);
            let missing = subset
                .iter()
                .filter(|id| !inputs.universe.contains(id))
                .count();
            if missing > 0 {
                warn!(
                    "{} specimen(s) in the subset list were not assayed by any caller",
                    missing
                );
            }
            restricted
        }
        None => inputs.universe,
    };

    if universe.is_empty() {
        warn!("No assayed specimens left; summaries will only carry headers");
    }

    let subtypes = Subtype::ALL
        .iter()
        .copied()
        .filter(|s| !(args.skip_ependymoma && *s == Subtype::Ependymoma))
        .collect::<Vec<_>>();

    if args.skip_ependymoma {
        warn!("Skipping ependymoma summary...");
    }

    let policy = OrphanPolicy::from(args.drop_orphans);
    let pb = get_progress_bar(subtypes.len() as u64, "Summarizing fusions...");

    let summaries = subtypes
        .par_iter()
        .map(|subtype| {
            let res = summarize_subtype(
                *subtype,
                &inputs.records,
                &universe,
                subset.as_ref(),
                policy,
            )
            .map(|(matrix, rec)| (*subtype, matrix, rec))
            .with_context(|| format!("ERROR: Failed to summarize {} fusions", subtype));
            pb.inc(1);
            res
        })
        .collect::<Result<Vec<_>>>()?;

    pb.finish_and_clear();

    std::fs::create_dir_all(&args.outdir).with_context(|| {
        format!(
            "ERROR: Failed to create output directory -> {}",
            args.outdir.display()
        )
    })?;

    let mut reconciliations = BTreeMap::new();
    for (subtype, matrix, rec) in summaries {
        write_matrix(&matrix, args.outdir.join(subtype.output_name()))?;
        reconciliations.insert(subtype, rec);
    }

    if args.report {
        write_report(&reconciliations, args.outdir.join(RECONCILIATION_REPORT))?;
    }

    Ok(())
}
