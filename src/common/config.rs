//! Runtime configuration: environment defaults plus the per-run settings
//! assembled at the entry point.

use std::env;
use std::path::PathBuf;

use log::LevelFilter;

use crate::assessment::domain::Provenance;
use crate::data::domain::{Delimiter, Workflow};

/// Snapshot of environment-provided defaults.
#[derive(Clone, Debug)]
pub struct AppCfg {
    pub log_level: LevelFilter,
    pub max_unmatched: Option<usize>,
}

impl Default for AppCfg {
    fn default() -> Self {
        Self {
            log_level: LevelFilter::Info,
            max_unmatched: None,
        }
    }
}

impl AppCfg {
    /// Create a configuration snapshot from the process environment.
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a snapshot from an arbitrary key lookup. Unparseable values fall
    /// back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let log_level = lookup("FAIRBENCH_LOG_LEVEL")
            .and_then(|raw| raw.trim().parse::<LevelFilter>().ok())
            .unwrap_or(defaults.log_level);
        let max_unmatched = lookup("FAIRBENCH_MAX_UNMATCHED")
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .or(defaults.max_unmatched);

        Self {
            log_level,
            max_unmatched,
        }
    }
}

/// Everything a single invocation needs, passed explicitly to the pipeline.
#[derive(Clone, Debug)]
pub struct RunConfig {
    pub workflow: Workflow,
    pub input: PathBuf,
    pub reference: Option<PathBuf>,
    pub output: PathBuf,
    pub provenance: Provenance,
    /// Overrides the workflow's default delimiter.
    pub delimiter: Option<Delimiter>,
    /// Fail when more ids than this go unmatched; `None` only warns.
    pub max_unmatched: Option<usize>,
}

impl RunConfig {
    /// Delimiter in effect for this run.
    pub fn delimiter(&self) -> Delimiter {
        self.delimiter.unwrap_or_else(|| self.workflow.delimiter())
    }
}
