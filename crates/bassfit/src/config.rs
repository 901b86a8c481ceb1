//! Command-line arguments and configuration layering
//!
//! Settings are resolved in three layers: built-in defaults, then an
//! optional YAML file, then command-line flags.

use std::fs;
use std::path::PathBuf;

use bassfit_core::optimization::AlgorithmKind;
use bassfit_core::{FailurePolicy, FitConfig};
use clap::{Parser, ValueEnum};
use color_eyre::eyre::WrapErr;

#[derive(Parser, Debug)]
#[command(name = "bassfit")]
#[command(about = "Fit Bass diffusion parameters for every zone of an adoption table")]
pub struct Args {
    /// Label used in the output file name (best_parameter_<LABEL>.csv)
    pub label: String,

    /// Input CSV with zone, elapsed-period and adoption columns
    pub input: PathBuf,

    /// YAML file with fit settings
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory the result table is written to
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Number of islands per zone
    #[arg(long)]
    pub islands: Option<usize>,

    /// Particles per island
    #[arg(long)]
    pub population: Option<usize>,

    /// Generations per island
    #[arg(long)]
    pub generations: Option<usize>,

    /// Maximum number of islands evolving at once
    #[arg(long)]
    pub workers: Option<usize>,

    /// Base seed for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,

    /// Algorithm run on every island
    #[arg(long, value_enum)]
    pub algorithm: Option<AlgorithmArg>,

    /// Record failing zones and continue instead of aborting
    #[arg(long)]
    pub keep_going: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    pub log_level: String,

    /// Also append logs to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AlgorithmArg {
    ParticleSwarm,
    NelderMead,
}

impl From<AlgorithmArg> for AlgorithmKind {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::ParticleSwarm => AlgorithmKind::ParticleSwarm,
            AlgorithmArg::NelderMead => AlgorithmKind::NelderMead,
        }
    }
}

/// Parse a YAML settings document; an empty document yields the defaults
pub fn parse_config(yaml: &str) -> Result<FitConfig, serde_saphyr::Error> {
    if yaml.trim().is_empty() {
        return Ok(FitConfig::default());
    }
    serde_saphyr::from_str(yaml)
}

impl Args {
    /// Overwrite `config` with every flag given on the command line
    pub fn apply_overrides(&self, config: &mut FitConfig) {
        let archipelago = &mut config.archipelago;
        if let Some(islands) = self.islands {
            archipelago.islands = islands;
        }
        if let Some(population) = self.population {
            archipelago.population_size = population;
        }
        if let Some(generations) = self.generations {
            archipelago.generations = generations;
        }
        if let Some(workers) = self.workers {
            archipelago.max_workers = workers;
        }
        if let Some(seed) = self.seed {
            archipelago.seed = Some(seed);
        }
        if let Some(algorithm) = self.algorithm {
            archipelago.algorithm = algorithm.into();
        }
        if self.keep_going {
            config.failure_policy = FailurePolicy::SkipZone;
        }
    }

    /// Resolve the effective fit settings
    pub fn load_config(&self) -> color_eyre::Result<FitConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .wrap_err_with(|| format!("failed to read config {}", path.display()))?;
                parse_config(&text)
                    .wrap_err_with(|| format!("invalid config {}", path.display()))?
            }
            None => FitConfig::default(),
        };

        self.apply_overrides(&mut config);
        config
            .archipelago
            .validate()
            .wrap_err("invalid optimizer settings")?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("bassfit").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_two_positionals_required() {
        assert!(Args::try_parse_from(["bassfit"]).is_err());
        assert!(Args::try_parse_from(["bassfit", "label"]).is_err());
        assert!(Args::try_parse_from(["bassfit", "a", "b.csv", "extra"]).is_err());

        let args = parse(&["run1", "data.csv"]);
        assert_eq!(args.label, "run1");
        assert_eq!(args.input, PathBuf::from("data.csv"));
        assert_eq!(args.output_dir, PathBuf::from("."));
    }

    #[test]
    fn test_defaults_without_flags() {
        let config = parse(&["run1", "data.csv"]).load_config().unwrap();
        assert_eq!(config.archipelago.islands, 64);
        assert_eq!(config.archipelago.population_size, 2000);
        assert_eq!(config.archipelago.generations, 5000);
        assert_eq!(config.archipelago.max_workers, 60);
        assert_eq!(config.failure_policy, FailurePolicy::Abort);
    }

    #[test]
    fn test_flags_override_defaults() {
        let args = parse(&[
            "run1",
            "data.csv",
            "--islands",
            "4",
            "--population",
            "30",
            "--generations",
            "12",
            "--workers",
            "2",
            "--seed",
            "99",
            "--algorithm",
            "nelder-mead",
            "--keep-going",
        ]);
        let config = args.load_config().unwrap();

        assert_eq!(config.archipelago.islands, 4);
        assert_eq!(config.archipelago.population_size, 30);
        assert_eq!(config.archipelago.generations, 12);
        assert_eq!(config.archipelago.max_workers, 2);
        assert_eq!(config.archipelago.seed, Some(99));
        assert_eq!(config.archipelago.algorithm, AlgorithmKind::NelderMead);
        assert_eq!(config.failure_policy, FailurePolicy::SkipZone);
    }

    #[test]
    fn test_yaml_then_flags() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("fit.yaml");
        fs::write(
            &path,
            "archipelago:\n  islands: 8\n  population_size: 100\n  seed: 5\n\
             columns:\n  zone: region\n\
             failure_policy: SkipZone\n",
        )
        .unwrap();

        let args = parse(&[
            "run1",
            "data.csv",
            "--config",
            path.to_str().unwrap(),
            "--islands",
            "3",
        ]);
        let config = args.load_config().unwrap();

        assert_eq!(config.archipelago.islands, 3);
        assert_eq!(config.archipelago.population_size, 100);
        assert_eq!(config.archipelago.seed, Some(5));
        assert_eq!(config.archipelago.generations, 5000);
        assert_eq!(config.columns.zone, "region");
        assert_eq!(config.columns.offset, "months_passed_01_2021");
        assert_eq!(config.failure_policy, FailurePolicy::SkipZone);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        let config = parse_config("  \n").unwrap();
        assert_eq!(config.archipelago.islands, 64);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let args = parse(&["run1", "data.csv", "--islands", "0"]);
        assert!(args.load_config().is_err());
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.yaml");
        let args = parse(&["run1", "data.csv", "--config", missing.to_str().unwrap()]);
        assert!(args.load_config().is_err());
    }
}
