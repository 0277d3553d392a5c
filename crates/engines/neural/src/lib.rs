//! Neural Network Move Selector
//!
//! This crate picks moves for the automated side of a game using an external
//! evaluator model, and falls back to random legal moves whenever the model
//! cannot help.
//!
//! # Architecture
//!
//! 1. **Encoding** ([`features`]): the board becomes a fixed 791-float vector.
//! 2. **Evaluation** ([`evaluator`]): a [`MoveEvaluator`] returns 4096 move
//!    logits (one per from/to pair) and a scalar evaluation.
//! 3. **Selection** ([`selector`]): logits are ranked and the first candidate
//!    the rules engine accepts is played; otherwise a random legal move.
//!
//! # Model Loading
//!
//! With the `onnx` feature the [`ModelLoader`] runs the model through tract.
//! Without it, loading reports [`EvaluatorError::BackendUnavailable`] and the
//! selector plays random moves:
//! ```text
//! assets/models/
//!   chess_model.onnx     input [1, 791] -> move_logits [1, 4096], eval_score [1, 1]
//! ```

pub mod config;
pub mod evaluator;
pub mod features;
pub mod selector;

#[cfg(feature = "onnx")]
mod onnx_engine;

pub use config::{ConfigError, SelectorConfig};
pub use evaluator::{EvaluatorError, EvaluatorLoader, EvaluatorOutput, ModelLoader, MoveEvaluator};
pub use features::{encode_board, FEATURE_LEN};
pub use selector::{rank_candidates, ChosenMove, MoveSelector, SelectorError, SelectorState};
