//! Decoration options.
//!
//! Options come from either the typed builder or a TOML fragment. The TOML
//! path rejects unrecognized keys so a misspelled option fails at decoration
//! time instead of being silently ignored.

use crate::errors::{Error, Result};
use crate::patterns::PatternThresholds;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Recognized decoration options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct AnnotateOptions {
    /// Emit a log line on every call through the wrapper
    pub verbose: bool,

    /// Append verbose call lines to this file in addition to the log facade
    pub log_file: Option<PathBuf>,

    /// Anti-pattern detection thresholds
    pub patterns: PatternThresholds,
}

impl AnnotateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }

    pub fn max_line_length(mut self, length: usize) -> Self {
        self.patterns.max_line_length = length;
        self
    }

    pub fn max_nesting_depth(mut self, depth: u32) -> Self {
        self.patterns.max_nesting_depth = depth;
        self
    }

    /// Parse options from a TOML fragment.
    ///
    /// Unknown keys are a configuration error.
    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| Error::configuration(e.to_string()))
    }
}
