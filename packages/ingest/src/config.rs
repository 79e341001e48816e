//! Batch run configuration, loaded from `sitrep.toml`.
//!
//! ```toml
//! input_dir = "pdfs"
//! output = "sitrep_cases.csv"
//! extensions = ["pdf", "txt"]
//! concurrency = 4
//!
//! [expected]
//! start_year = 2017
//! end_year = 2024
//! weeks_per_year = 52
//! ```
//!
//! Every key is optional. A file that leaves out `[expected]` disables
//! missing-period bookkeeping; running with no file at all keeps it on with
//! the default range.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::IngestError;

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "sitrep.toml";

/// The reporting periods a complete corpus should cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpectedRange {
    /// First year, inclusive.
    #[serde(default = "default_start_year")]
    pub start_year: u16,
    /// Last year, inclusive.
    #[serde(default = "default_end_year")]
    pub end_year: u16,
    /// Weeks `1..=weeks_per_year` are expected in every year.
    #[serde(default = "default_weeks_per_year")]
    pub weeks_per_year: u32,
}

impl Default for ExpectedRange {
    fn default() -> Self {
        Self {
            start_year: default_start_year(),
            end_year: default_end_year(),
            weeks_per_year: default_weeks_per_year(),
        }
    }
}

const fn default_start_year() -> u16 {
    2017
}

const fn default_end_year() -> u16 {
    2024
}

const fn default_weeks_per_year() -> u32 {
    52
}

/// Settings for one batch run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Directory scanned for report files.
    #[serde(default = "default_input_dir")]
    pub input_dir: PathBuf,
    /// Consolidated CSV written at the end of the run.
    #[serde(default = "default_output")]
    pub output: PathBuf,
    /// File extensions (without the dot) treated as reports.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    /// Documents converted in parallel.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    /// Expected periods; `None` skips missing-period rows.
    #[serde(default)]
    pub expected: Option<ExpectedRange>,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            input_dir: default_input_dir(),
            output: default_output(),
            extensions: default_extensions(),
            concurrency: default_concurrency(),
            expected: Some(ExpectedRange::default()),
        }
    }
}

fn default_input_dir() -> PathBuf {
    PathBuf::from("pdfs")
}

fn default_output() -> PathBuf {
    PathBuf::from("sitrep_cases.csv")
}

fn default_extensions() -> Vec<String> {
    vec!["pdf".to_owned(), "txt".to_owned()]
}

const fn default_concurrency() -> usize {
    4
}

impl IngestConfig {
    /// Parses a config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::Config`] if the TOML is malformed or has
    /// values of the wrong type.
    pub fn from_toml(toml_str: &str) -> Result<Self, IngestError> {
        Ok(toml::de::from_str(toml_str)?)
    }

    /// Loads the config at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::Io`] if the file cannot be read, or
    /// [`IngestError::Config`] if it does not parse.
    pub fn load(path: &Path) -> Result<Self, IngestError> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&contents)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Loads `path` if given, else [`DEFAULT_CONFIG_FILE`] if it exists,
    /// else the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly given or discovered file cannot be
    /// read or parsed.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, IngestError> {
        if let Some(path) = path {
            return Self::load(path);
        }

        let default_path = Path::new(DEFAULT_CONFIG_FILE);
        if default_path.is_file() {
            Self::load(default_path)
        } else {
            log::debug!("No {DEFAULT_CONFIG_FILE} found, using defaults");
            Ok(Self::default())
        }
    }

    /// Concurrency, never below 1.
    #[must_use]
    pub fn effective_concurrency(&self) -> usize {
        self.concurrency.max(1)
    }
}
