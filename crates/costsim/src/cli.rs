//! Command-line arguments and trial-count validation

use std::fmt;
use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "costsim")]
#[command(about = "Monte Carlo estimate of a project's total cost from cost categories and risks")]
pub struct Args {
    /// Number of simulation trials to run
    #[arg(allow_negative_numbers = true)]
    pub trials: Option<String>,

    /// YAML file with `costs` and `risks` lists (default: <config dir>/costsim/items.yaml)
    #[arg(short, long)]
    pub items: Option<PathBuf>,

    /// Directory for reports, histograms and the log file
    #[arg(short, long, default_value = "reports")]
    pub output_dir: PathBuf,

    /// Seed for a reproducible run
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Number of histogram bins
    #[arg(short, long, default_value_t = 50)]
    pub bins: usize,

    /// Also write summary.json
    #[arg(long)]
    pub json: bool,

    /// Do not open each report after writing it
    #[arg(long)]
    pub no_open: bool,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    pub log_level: String,
}

/// Problems with the trial count given on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UsageError {
    MissingTrials,
    InvalidTrials(String),
}

impl fmt::Display for UsageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UsageError::MissingTrials => write!(f, "argument missing"),
            UsageError::InvalidTrials(raw) => {
                write!(f, "'{raw}' is not a positive whole number of simulations")
            }
        }
    }
}

impl std::error::Error for UsageError {}

/// Parse the trial count: a positive integer
pub fn parse_trials(raw: Option<&str>) -> Result<usize, UsageError> {
    let raw = raw.ok_or(UsageError::MissingTrials)?;
    match raw.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(UsageError::InvalidTrials(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trials() {
        assert_eq!(parse_trials(Some("1000")), Ok(1000));
        assert_eq!(parse_trials(Some(" 42 ")), Ok(42));
        assert_eq!(parse_trials(None), Err(UsageError::MissingTrials));
        assert_eq!(
            parse_trials(Some("abc")),
            Err(UsageError::InvalidTrials("abc".to_string()))
        );
        assert!(parse_trials(Some("0")).is_err());
        assert!(parse_trials(Some("-5")).is_err());
        assert!(parse_trials(Some("2.5")).is_err());
    }

    #[test]
    fn test_args_parse() {
        let args = Args::parse_from(["costsim", "5000", "--seed", "7", "--json"]);
        assert_eq!(args.trials.as_deref(), Some("5000"));
        assert_eq!(args.seed, Some(7));
        assert!(args.json);
        assert!(!args.no_open);
        assert_eq!(args.bins, 50);
        assert_eq!(args.output_dir, PathBuf::from("reports"));

        let args = Args::parse_from(["costsim"]);
        assert!(args.trials.is_none());

        let args = Args::parse_from(["costsim", "100", "--no-open"]);
        assert!(args.no_open);
    }

    #[test]
    fn test_negative_trials_reach_usage_error() {
        let args = Args::try_parse_from(["costsim", "-5"]).unwrap();
        assert_eq!(args.trials.as_deref(), Some("-5"));
        assert_eq!(
            parse_trials(args.trials.as_deref()),
            Err(UsageError::InvalidTrials("-5".to_string()))
        );

        let args = Args::try_parse_from(["costsim", "-2.5", "--json"]).unwrap();
        assert!(args.json);
        assert!(parse_trials(args.trials.as_deref()).is_err());
    }
}
