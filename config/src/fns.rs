use indicatif::{ProgressBar, ProgressStyle};
use thiserror::Error;

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::TABLE_SUFFIXES;

// os
#[cfg(not(windows))]
const TICK_SETTINGS: (&str, u64) = ("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ", 80);
#[cfg(windows)]
const TICK_SETTINGS: (&str, u64) = (r"+-x| ", 200);

/// return a pre-configured progress bar
pub fn get_progress_bar(length: u64, msg: &str) -> ProgressBar {
    let progressbar_style = ProgressStyle::default_spinner()
        .tick_chars(TICK_SETTINGS.0)
        .template(" {spinner} {msg:<30} {wide_bar} ETA {eta_precise} ")
        .expect("no template error");

    let progress_bar = ProgressBar::new(length);

    progress_bar.set_style(progressbar_style);
    progress_bar.enable_steady_tick(Duration::from_millis(TICK_SETTINGS.1));
    progress_bar.set_message(msg.to_owned());

    progress_bar
}

/// argument checker for all fusion-summary entry points
pub trait ArgCheck {
    fn check(&self) -> Result<(), CliError> {
        self.validate_args()
    }

    fn validate_args(&self) -> Result<(), CliError> {
        self.check_tables()?;

        if let Some(specimens) = self.get_specimens() {
            self.check_specimens(specimens)?;
        } else {
            log::warn!("No specimen subset provided. Using every assayed specimen...");
        };

        Ok(())
    }

    fn check_tables(&self) -> Result<(), CliError> {
        validate(self.get_curated())?;

        let callers = self.get_callers();
        if callers.is_empty() {
            let err = "No caller tables provided".to_string();
            return Err(CliError::InvalidInput(err));
        }
        for caller in callers {
            validate(caller)?;
        }

        Ok(())
    }

    fn check_specimens(&self, specimens: &PathBuf) -> Result<(), CliError> {
        if !specimens.is_file() {
            return Err(CliError::InvalidInput(format!(
                "specimen list {:?} is not a file",
                specimens
            )));
        }
        Ok(())
    }

    fn get_curated(&self) -> &PathBuf;
    fn get_callers(&self) -> Vec<&PathBuf>;
    fn get_specimens(&self) -> Option<&PathBuf>;
}

/// error handling for CLI
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// returns true if the file name ends with one of the accepted table suffixes
pub fn is_table<P: AsRef<Path>>(path: P) -> bool {
    let name = path
        .as_ref()
        .file_name()
        .and_then(|f| f.to_str())
        .unwrap_or_default();

    TABLE_SUFFIXES.iter().any(|suffix| name.ends_with(suffix))
}

/// argument validation
pub fn validate(arg: &PathBuf) -> Result<(), CliError> {
    if !arg.exists() {
        return Err(CliError::InvalidInput(format!("{:?} does not exist", arg)));
    }

    if !arg.is_file() {
        return Err(CliError::InvalidInput(format!("{:?} is not a file", arg)));
    }

    if !is_table(arg) {
        return Err(CliError::InvalidInput(format!(
            "file {:?} is not a TSV table [expected one of {:?}]",
            arg, TABLE_SUFFIXES
        )));
    }

    match std::fs::metadata(arg) {
        Ok(metadata) if metadata.len() == 0 => {
            Err(CliError::InvalidInput(format!("file {:?} is empty", arg)))
        }
        Ok(_) => Ok(()),
        Err(e) => Err(CliError::IoError(e)),
    }
}
