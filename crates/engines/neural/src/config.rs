//! Selector configuration, read from TOML

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Move selector settings. Every key is optional in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Evaluator model file
    pub model_path: PathBuf,
    /// Ranked candidates examined before falling back to a random move
    pub candidate_limit: usize,
    /// Factor applied to the evaluator's scalar evaluation
    pub eval_scale: f32,
    /// Pause before the automated side's auto-queen promotion
    pub promotion_delay_ms: u64,
    /// Seed for the random fallback
    pub seed: Option<u64>,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("assets/models/chess_model.onnx"),
            candidate_limit: 500,
            eval_scale: 100.0,
            promotion_delay_ms: 800,
            seed: None,
        }
    }
}

impl SelectorConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
