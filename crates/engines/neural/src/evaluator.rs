//! Evaluator contract
//!
//! The evaluator is a black box: it takes an encoded board and returns one
//! logit per from/to square pair plus a scalar position evaluation. It knows
//! nothing about legality, so its output is only ever used as a ranking prior.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use chess_core::Move;
use thiserror::Error;

/// Raw inference output.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluatorOutput {
    /// One score per `from * 64 + to` pair, [`Move::INDEX_SPACE`] entries.
    pub move_logits: Vec<f32>,
    /// Position evaluation in model units.
    pub eval: f32,
}

impl EvaluatorOutput {
    /// Rejects outputs whose logit vector does not cover the move index space.
    pub fn validate(&self) -> Result<(), EvaluatorError> {
        if self.move_logits.len() != Move::INDEX_SPACE {
            return Err(EvaluatorError::MalformedOutput(format!(
                "expected {} move logits, got {}",
                Move::INDEX_SPACE,
                self.move_logits.len()
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum EvaluatorError {
    #[error("model file not found: {0}")]
    ModelNotFound(PathBuf),

    #[error("failed to load model: {0}")]
    Load(String),

    #[error("inference failed: {0}")]
    Inference(String),

    #[error("malformed evaluator output: {0}")]
    MalformedOutput(String),

    #[error("no inference backend compiled in (enable the `onnx` feature)")]
    BackendUnavailable,
}

/// A loaded model that can score encoded boards.
#[async_trait]
pub trait MoveEvaluator: Send + Sync {
    async fn evaluate(&self, features: &[f32]) -> Result<EvaluatorOutput, EvaluatorError>;
}

/// Produces an evaluator. Loading may be slow (file IO, graph optimisation).
#[async_trait]
pub trait EvaluatorLoader: Send + Sync {
    async fn load(&self) -> Result<Arc<dyn MoveEvaluator>, EvaluatorError>;
}

/// Loads the model at a path with the compiled-in backend.
#[derive(Debug, Clone)]
pub struct ModelLoader {
    path: PathBuf,
}

impl ModelLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[async_trait]
impl EvaluatorLoader for ModelLoader {
    #[cfg(feature = "onnx")]
    async fn load(&self) -> Result<Arc<dyn MoveEvaluator>, EvaluatorError> {
        if !self.path.exists() {
            return Err(EvaluatorError::ModelNotFound(self.path.clone()));
        }
        let path = self.path.clone();
        let model = tokio::task::spawn_blocking(move || crate::onnx_engine::OnnxModel::load(&path))
            .await
            .map_err(|e| EvaluatorError::Load(e.to_string()))??;
        Ok(Arc::new(model))
    }

    #[cfg(not(feature = "onnx"))]
    async fn load(&self) -> Result<Arc<dyn MoveEvaluator>, EvaluatorError> {
        if !self.path.exists() {
            return Err(EvaluatorError::ModelNotFound(self.path.clone()));
        }
        Err(EvaluatorError::BackendUnavailable)
    }
}

#[cfg(test)]
#[path = "evaluator_tests.rs"]
mod evaluator_tests;
