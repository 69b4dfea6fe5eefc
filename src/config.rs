//! Run configuration.
//!
//! Values come from an optional JSON file, then command line flags are applied on top.
use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    time::Duration,
};

use log::debug;
use serde::Deserialize;

use crate::error::Error;
use crate::sparql::{DEFAULT_ENDPOINT, DEFAULT_USER_AGENT};

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Root of the `<Language>/<category>/<category>[_N].sparql` tree.
    pub extraction_root: PathBuf,
    pub output_dir: PathBuf,
    pub endpoint: String,
    pub user_agent: String,
    /// Total attempts allowed for a query part, first one included.
    pub max_attempts: usize,
    pub timeout_secs: u64,
    /// Interpreter used to run the `format_<category>.py` scripts.
    pub formatter_program: String,
    pub run_formatters: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            extraction_root: PathBuf::from("language_data_extraction"),
            output_dir: PathBuf::from("scribe_data_json_export"),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_attempts: 3,
            timeout_secs: 300,
            formatter_program: "python3".to_string(),
            run_formatters: true,
        }
    }
}

impl Config {
    /// Load a configuration from a JSON file. Missing fields keep their default value.
    pub fn from_file(path: &Path) -> Result<Self, Error> {
        debug!("loading config from {:?}", path);
        let f = File::open(path).map_err(|e| {
            Error::Configuration(format!("could not open config file {:?}: {}", path, e))
        })?;
        let mut config: Config = serde_json::from_reader(BufReader::new(f))?;
        let output_dir = config.output_dir.clone();
        config.set_output_dir(&output_dir);
        Ok(config)
    }

    /// Set the output dir, dropping a leading `./`.
    pub fn set_output_dir(&mut self, output_dir: &Path) {
        self.output_dir = output_dir
            .strip_prefix("./")
            .unwrap_or(output_dir)
            .to_path_buf();
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if !self.extraction_root.is_dir() {
            return Err(Error::Configuration(format!(
                "extraction root {:?} does not exist",
                self.extraction_root
            )));
        }
        if self.max_attempts == 0 {
            return Err(Error::Configuration(
                "max_attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
