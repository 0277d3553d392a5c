//! ONNX model loading and inference
//!
//! This module handles loading ONNX models and running inference.
//! Requires the `onnx` feature to be enabled.
//!
//! The model takes one `[1, 791]` input and yields two outputs, in order:
//! `move_logits` `[1, 4096]` and `eval_score` `[1, 1]`.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chess_core::Move;
use tract_onnx::prelude::*;

use crate::evaluator::{EvaluatorError, EvaluatorOutput, MoveEvaluator};
use crate::features::FEATURE_LEN;

type Plan = SimplePlan<TypedFact, Box<dyn TypedOp>, Graph<TypedFact, Box<dyn TypedOp>>>;

/// Wrapper around an ONNX move-prediction model.
pub struct OnnxModel {
    model: Arc<Plan>,
}

impl OnnxModel {
    /// Load and optimise an ONNX model. Blocking; run it off the async runtime.
    pub fn load(path: &Path) -> Result<Self, EvaluatorError> {
        let model = tract_onnx::onnx()
            .model_for_path(path)
            .and_then(|m| m.with_input_fact(0, f32::fact([1, FEATURE_LEN]).into()))
            .and_then(|m| m.into_optimized())
            .and_then(|m| m.into_runnable())
            .map_err(|e| EvaluatorError::Load(format!("{}: {}", path.display(), e)))?;

        tracing::info!(path = %path.display(), "ONNX model loaded");
        Ok(Self {
            model: Arc::new(model),
        })
    }

    fn run_inference(model: &Plan, features: Vec<f32>) -> Result<EvaluatorOutput, EvaluatorError> {
        let input: Tensor = tract_ndarray::Array::from_shape_vec((1, FEATURE_LEN), features)
            .map_err(|e| EvaluatorError::Inference(e.to_string()))?
            .into();

        let result = model
            .run(tvec!(input.into()))
            .map_err(|e| EvaluatorError::Inference(e.to_string()))?;

        if result.len() < 2 {
            return Err(EvaluatorError::MalformedOutput(format!(
                "expected 2 outputs, got {}",
                result.len()
            )));
        }

        let move_logits: Vec<f32> = result[0]
            .to_array_view::<f32>()
            .map_err(|e| EvaluatorError::MalformedOutput(e.to_string()))?
            .iter()
            .copied()
            .collect();
        let eval = result[1]
            .to_array_view::<f32>()
            .map_err(|e| EvaluatorError::MalformedOutput(e.to_string()))?
            .iter()
            .next()
            .copied()
            .ok_or_else(|| EvaluatorError::MalformedOutput("empty eval_score".into()))?;

        let output = EvaluatorOutput { move_logits, eval };
        output.validate()?;
        debug_assert_eq!(output.move_logits.len(), Move::INDEX_SPACE);
        Ok(output)
    }
}

#[async_trait]
impl MoveEvaluator for OnnxModel {
    async fn evaluate(&self, features: &[f32]) -> Result<EvaluatorOutput, EvaluatorError> {
        if features.len() != FEATURE_LEN {
            return Err(EvaluatorError::Inference(format!(
                "expected {} features, got {}",
                FEATURE_LEN,
                features.len()
            )));
        }
        let model = Arc::clone(&self.model);
        let features = features.to_vec();
        tokio::task::spawn_blocking(move || Self::run_inference(&model, features))
            .await
            .map_err(|e| EvaluatorError::Inference(e.to_string()))?
    }
}
