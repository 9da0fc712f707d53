//! Core module for summarizing fusions of interest per biospecimen
//! Alejandro Gonzales-Irribarren, 2025
//!
//! This binary reads the curated [putative oncogenic] fusion table and
//! the raw Arriba and STAR-Fusion tables, and writes one specimen x
//! fusion count matrix per tumor subtype [ependymoma, embryonal].
//! Specimens assayed by either caller but without any fusion of
//! interest are reported with zero counts.

use clap::{self, Parser};
use config::ArgCheck;
use log::{error, info, Level};
use simple_logger::init_with_level;

use fusion_summary::{cli::Args, core::summarize_fusions};

fn main() {
    let start = std::time::Instant::now();
    init_with_level(Level::Info).unwrap();

    let args: Args = Args::parse();
    args.check().unwrap_or_else(|e| {
        error!("{}", e);
        std::process::exit(1);
    });

    rayon::ThreadPoolBuilder::new()
        .num_threads(args.threads)
        .build_global()
        .unwrap_or_else(|e| {
            error!("{}", e);
            std::process::exit(1);
        });

    info!("Summarizing fusions of interest...");
    summarize_fusions(args).unwrap_or_else(|e| {
        error!("{:#}", e);
        std::process::exit(1);
    });

    let elapsed = start.elapsed();
    info!("Elapsed time: {:?}", elapsed);
}
