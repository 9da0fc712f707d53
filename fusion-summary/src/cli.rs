use clap::{ArgAction, Parser};
use config::{ArgCheck, CliError, DEFAULT_OUTDIR, MIN_THREADS};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    version,
    about = "Summarize ependymoma and embryonal fusions of interest per biospecimen"
)]
pub struct Args {
    #[arg(
        short = 'p',
        long = "putative-oncogenic",
        required = true,
        value_name = "PATH",
        help = "Path to the curated [putative oncogenic] fusion table"
    )]
    pub putative_oncogenic: PathBuf,

    #[arg(
        short = 'a',
        long = "arriba",
        required = true,
        value_name = "PATH",
        help = "Path to the raw Arriba fusion table [.tsv or .tsv.gz]"
    )]
    pub arriba: PathBuf,

    #[arg(
        short = 's',
        long = "starfusion",
        required = true,
        value_name = "PATH",
        help = "Path to the raw STAR-Fusion fusion table [.tsv or .tsv.gz]"
    )]
    pub starfusion: PathBuf,

    #[arg(
        short = 'o',
        long = "outdir",
        required = false,
        value_name = "PATH",
        help = "Output directory for the summary tables",
        default_value(DEFAULT_OUTDIR)
    )]
    pub outdir: PathBuf,

    #[arg(
        long = "specimens",
        required = false,
        value_name = "PATH",
        help = "Path to a newline-delimited list of specimens to restrict the summaries to"
    )]
    pub specimens: Option<PathBuf>,

    #[arg(
        long = "skip-ependymoma",
        help = "Flag to skip the ependymoma summary",
        value_name = "FLAG",
        default_missing_value("true"),
        default_value("false"),
        num_args(0..=1),
        require_equals(true),
        action = ArgAction::Set,
    )]
    pub skip_ependymoma: bool,

    #[arg(
        long = "drop-orphans",
        help = "Flag to drop fusions from specimens missing in the caller tables instead of failing",
        value_name = "FLAG",
        default_missing_value("true"),
        default_value("false"),
        num_args(0..=1),
        require_equals(true),
        action = ArgAction::Set,
    )]
    pub drop_orphans: bool,

    #[arg(
        long = "report",
        help = "Flag to write a JSON reconciliation report next to the summaries",
        value_name = "FLAG",
        default_missing_value("true"),
        default_value("false"),
        num_args(0..=1),
        require_equals(true),
        action = ArgAction::Set,
    )]
    pub report: bool,

    #[arg(
        short = 't',
        long = "threads",
        help = "Number of threads",
        value_name = "THREADS",
        default_value_t = num_cpus::get()
    )]
    pub threads: usize,
}

impl ArgCheck for Args {
    fn validate_args(&self) -> Result<(), CliError> {
        self.check_tables()?;

        if let Some(specimens) = self.get_specimens() {
            self.check_specimens(specimens)?;
        }

        if self.threads < MIN_THREADS {
            return Err(CliError::InvalidInput(format!(
                "--threads must be at least {}",
                MIN_THREADS
            )));
        }

        Ok(())
    }

    fn get_curated(&self) -> &PathBuf {
        &self.putative_oncogenic
    }

    fn get_callers(&self) -> Vec<&PathBuf> {
        vec![&self.arriba, &self.starfusion]
    }

    fn get_specimens(&self) -> Option<&PathBuf> {
        self.specimens.as_ref()
    }
}

impl Args {
    pub fn from(args: Vec<String>) -> Self {
        let mut full_args = vec![env!("CARGO_PKG_NAME").to_string()];
        full_args.extend(args);

        Args::parse_from(full_args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Vec<String> {
        ["-p", "curated.tsv", "-a", "arriba.tsv.gz", "-s", "starfusion.tsv.gz"]
            .iter()
            .map(|x| x.to_string())
            .collect()
    }

    #[test]
    fn test_defaults() {
        let args = Args::from(base());

        assert_eq!(args.outdir, PathBuf::from(DEFAULT_OUTDIR));
        assert!(!args.skip_ependymoma);
        assert!(!args.drop_orphans);
        assert!(!args.report);
        assert!(args.specimens.is_none());
    }

    #[test]
    fn test_flags() {
        let mut raw = base();
        raw.extend(
            ["--skip-ependymoma", "--drop-orphans=true", "--report=false", "-t", "2"]
                .iter()
                .map(|x| x.to_string()),
        );
        let args = Args::from(raw);

        assert!(args.skip_ependymoma);
        assert!(args.drop_orphans);
        assert!(!args.report);
        assert_eq!(args.threads, 2);
    }

    #[test]
    fn test_check_rejects_missing_tables() {
        let args = Args::from(base());
        assert!(args.check().is_err());
    }
}
