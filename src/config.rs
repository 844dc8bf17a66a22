//! Session tuning, loadable from a TOML file.
//!
//! Every field has a default, so an empty file (or no file at all) yields the
//! reference behaviour: tiles spawn after every move and undo costs 10 points.
//!
//! ```toml
//! seed = 42
//! spawn_policy = "on-change"
//! undo_penalty = 10
//! ```

use std::fmt;
use std::io;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::engine::Score;

/// When a new tile appears after a move.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpawnPolicy {
    /// Spawn after every accepted move, even one that moved nothing.
    #[default]
    Always,
    /// Spawn only when the move changed the board. Moves that change nothing
    /// are ignored entirely and leave the undo snapshot untouched.
    OnChange,
}

impl FromStr for SpawnPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "always" => Ok(SpawnPolicy::Always),
            "on-change" | "on_change" | "onchange" => Ok(SpawnPolicy::OnChange),
            _ => Err(ConfigError::UnknownSpawnPolicy(s.to_string())),
        }
    }
}

impl fmt::Display for SpawnPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpawnPolicy::Always => f.write_str("always"),
            SpawnPolicy::OnChange => f.write_str("on-change"),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("unknown spawn policy {0:?} (expected \"always\" or \"on-change\")")]
    UnknownSpawnPolicy(String),
}

mod defaults {
    use crate::engine::Score;

    pub fn undo_penalty() -> Score { 10 }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    /// Seed for the tile spawner. `None` seeds from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub spawn_policy: SpawnPolicy,
    /// Points subtracted from the restored score on undo (floored at 0).
    #[serde(default = "defaults::undo_penalty")]
    pub undo_penalty: Score,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: None,
            spawn_policy: SpawnPolicy::default(),
            undo_penalty: defaults::undo_penalty(),
        }
    }
}

impl SessionConfig {
    pub fn from_toml<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_spawn_policy(mut self, policy: SpawnPolicy) -> Self {
        self.spawn_policy = policy;
        self
    }
}
