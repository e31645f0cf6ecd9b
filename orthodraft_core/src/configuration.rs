//! Global defaults and per-run pipeline configuration
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{LazyLock, RwLock};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::orthology::filter::Thresholds;

pub static CONFIGURATION: LazyLock<RwLock<Configuration>> =
    LazyLock::new(|| RwLock::new(Configuration::default()));

pub struct Configuration {
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub thresholds: Thresholds,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            lower_bound: -1000.,
            upper_bound: 1000.,
            thresholds: Thresholds::default(),
        }
    }
}

/// Configuration of a single reconstruction run, read from a JSON file
///
/// Paths are resolved by the caller, either absolute or relative to the
/// process working directory.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PipelineConfig {
    /// Directory where intermediate and output files are written
    pub work_dir: PathBuf,
    /// Path to the reference model (JSON)
    pub reference_model: PathBuf,
    /// FASTA of the reference model's protein sequences (blast queries)
    pub query_fasta: PathBuf,
    /// FASTA of the target organism's proteins (blast subject)
    pub subject_fasta: PathBuf,
    /// Id given to the draft model, also used for the output file name
    pub draft_name: String,
    /// Where raw blast output is cached; reused on the next run if present
    #[serde(default)]
    pub blast_cache: Option<PathBuf>,
    /// Hit selection thresholds
    #[serde(default)]
    pub thresholds: Thresholds,
}

impl PipelineConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<PipelineConfig, ConfigError> {
        let data = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(err) => return Err(ConfigError::UnableToRead(format!("{:?}", err))),
        };
        match serde_json::from_str(&data) {
            Ok(config) => Ok(config),
            Err(err) => Err(ConfigError::UnableToParse(format!("{:?}", err))),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unable to read configuration file due to {0}")]
    UnableToRead(String),
    #[error("Unable to parse configuration due to {0}")]
    UnableToParse(String),
}
