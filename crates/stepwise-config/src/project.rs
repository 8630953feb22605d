//! Project Configuration (stepwise.toml)
//!
//! Handles project-level settings stored in `stepwise.toml`. The file is
//! looked up from the working directory upward, so every program under a
//! project directory shares it.

use crate::{read_toml, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File name searched for when locating a project
pub const PROJECT_CONFIG_FILE: &str = "stepwise.toml";

/// Project configuration from stepwise.toml
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Run settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run: Option<RunConfig>,
}

/// `[run]` table, shared by project and global configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    /// Log every tick at trace level
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<bool>,

    /// Print run statistics to stderr after completion
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<bool>,
}

impl RunConfig {
    /// Overlay `other` on top of `self`; settings present in `other` win.
    pub fn merge(&mut self, other: &RunConfig) {
        if other.trace.is_some() {
            self.trace = other.trace;
        }
        if other.stats.is_some() {
            self.stats = other.stats;
        }
    }
}

impl ProjectConfig {
    /// Load project configuration from a file
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        read_toml(path)
    }

    /// Parse project configuration from a TOML string
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn trace(&self) -> Option<bool> {
        self.run.as_ref().and_then(|r| r.trace)
    }

    pub fn stats(&self) -> Option<bool> {
        self.run.as_ref().and_then(|r| r.stats)
    }

    /// Mutable `[run]` table, created if absent
    pub fn run_mut(&mut self) -> &mut RunConfig {
        self.run.get_or_insert_with(RunConfig::default)
    }
}
