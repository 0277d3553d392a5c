//! Move selection
//!
//! [`MoveSelector`] turns the evaluator's flat logit vector into a move. The
//! logits are only a ranking prior: candidates are walked in descending order
//! and the first one the rules engine accepts wins. When no evaluator is
//! ready, when it fails, or when no ranked candidate is legal, a uniformly
//! random legal move is played instead.
//!
//! Loading the evaluator is asynchronous. The selector moves through
//! `Uninitialized → Loading → Ready | Failed`, and `select_move` may be called
//! in any state; only `Ready` consults the evaluator. The state lock is never
//! held across an await.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use chess_core::{Board, Move, PieceKind, Square};
use random_engine::RandomEngine;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::config::SelectorConfig;
use crate::evaluator::{EvaluatorError, EvaluatorLoader, ModelLoader, MoveEvaluator};
use crate::features::encode_board;

/// Observable lifecycle of the evaluator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorState {
    Uninitialized,
    Loading,
    Ready,
    /// Last load attempt failed; holds the reason. `initialize` may be retried.
    Failed(String),
}

enum Slot {
    Uninitialized,
    Loading,
    Ready(Arc<dyn MoveEvaluator>),
    Failed(String),
}

/// Resets an abandoned `Loading` slot when `initialize` is dropped mid-load.
struct LoadGuard<'a> {
    slot: &'a RwLock<Slot>,
    finished: bool,
}

impl Drop for LoadGuard<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        if matches!(*slot, Slot::Loading) {
            *slot = Slot::Uninitialized;
            warn!("evaluator load cancelled");
        }
    }
}

impl Slot {
    fn state(&self) -> SelectorState {
        match self {
            Slot::Uninitialized => SelectorState::Uninitialized,
            Slot::Loading => SelectorState::Loading,
            Slot::Ready(_) => SelectorState::Ready,
            Slot::Failed(reason) => SelectorState::Failed(reason.clone()),
        }
    }
}

#[derive(Debug, Error)]
pub enum SelectorError {
    /// Another `initialize` call is in flight; this one did nothing.
    #[error("evaluator is already loading")]
    AlreadyLoading,

    #[error(transparent)]
    Evaluator(#[from] EvaluatorError),
}

/// A move picked by the selector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChosenMove {
    pub from: Square,
    pub to: Square,
    /// Scaled evaluator score for ranked picks, `None` for random ones.
    pub evaluation: Option<f32>,
}

impl ChosenMove {
    pub fn as_move(&self) -> Move {
        Move::new(self.from, self.to)
    }
}

/// Picks moves for the automated side of a game.
pub struct MoveSelector {
    config: SelectorConfig,
    loader: Box<dyn EvaluatorLoader>,
    slot: RwLock<Slot>,
    fallback: Mutex<RandomEngine>,
}

impl MoveSelector {
    /// Selector that loads `config.model_path` with the compiled-in backend.
    pub fn new(config: SelectorConfig) -> Self {
        let loader = ModelLoader::new(config.model_path.clone());
        Self::with_loader(config, loader)
    }

    pub fn with_loader(config: SelectorConfig, loader: impl EvaluatorLoader + 'static) -> Self {
        let fallback = match config.seed {
            Some(seed) => RandomEngine::with_seed(seed),
            None => RandomEngine::new(),
        };
        Self {
            config,
            loader: Box::new(loader),
            slot: RwLock::new(Slot::Uninitialized),
            fallback: Mutex::new(fallback),
        }
    }

    fn slot(&self) -> RwLockReadGuard<'_, Slot> {
        self.slot.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn slot_mut(&self) -> RwLockWriteGuard<'_, Slot> {
        self.slot.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn state(&self) -> SelectorState {
        self.slot().state()
    }

    pub fn is_ready(&self) -> bool {
        matches!(*self.slot(), Slot::Ready(_))
    }

    /// Loads the evaluator.
    ///
    /// Returns `Ok` immediately if already ready. A failure leaves the
    /// selector in `Failed` (random play) and is returned to the caller.
    /// Dropping the future before the load finishes returns the selector to
    /// `Uninitialized`.
    pub async fn initialize(&self) -> Result<(), SelectorError> {
        {
            let mut slot = self.slot_mut();
            match *slot {
                Slot::Ready(_) => return Ok(()),
                Slot::Loading => return Err(SelectorError::AlreadyLoading),
                Slot::Uninitialized | Slot::Failed(_) => *slot = Slot::Loading,
            }
        }
        let mut guard = LoadGuard {
            slot: &self.slot,
            finished: false,
        };
        info!("loading move evaluator");

        let loaded = self.loader.load().await;
        guard.finished = true;
        match loaded {
            Ok(evaluator) => {
                *self.slot_mut() = Slot::Ready(evaluator);
                info!("move evaluator ready");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "move evaluator unavailable, playing random moves");
                *self.slot_mut() = Slot::Failed(e.to_string());
                Err(e.into())
            }
        }
    }

    /// Chooses a move for the side to move, or `None` if it has no legal move.
    pub async fn select_move(&self, board: &Board) -> Option<ChosenMove> {
        let evaluator = match &*self.slot() {
            Slot::Ready(evaluator) => Some(Arc::clone(evaluator)),
            _ => None,
        };

        if let Some(evaluator) = evaluator {
            match self.ranked_move(evaluator.as_ref(), board).await {
                Ok(Some(chosen)) => return Some(chosen),
                Ok(None) => debug!(
                    limit = self.config.candidate_limit,
                    "no ranked candidate is legal, picking at random"
                ),
                Err(e) => warn!(error = %e, "evaluator failed, picking at random"),
            }
        }

        self.random_move(board).await
    }

    async fn ranked_move(
        &self,
        evaluator: &dyn MoveEvaluator,
        board: &Board,
    ) -> Result<Option<ChosenMove>, EvaluatorError> {
        let features = encode_board(board);
        let output = evaluator.evaluate(&features).await?;
        output.validate()?;

        let evaluation = output.eval * self.config.eval_scale;
        let side = board.side_to_move();
        let chosen = rank_candidates(&output.move_logits, self.config.candidate_limit)
            .into_iter()
            .find(|mv| {
                board.piece_at(mv.from).is_some_and(|p| p.color == side)
                    && board.is_valid_move(mv.from, mv.to)
            })
            .map(|mv| ChosenMove {
                from: mv.from,
                to: mv.to,
                evaluation: Some(evaluation),
            });

        if let Some(chosen) = &chosen {
            debug!(mv = %chosen.as_move(), evaluation, "ranked move");
        }
        Ok(chosen)
    }

    async fn random_move(&self, board: &Board) -> Option<ChosenMove> {
        let mv = self.fallback.lock().await.pick(board)?;
        debug!(%mv, "random move");
        Some(ChosenMove {
            from: mv.from,
            to: mv.to,
            evaluation: None,
        })
    }

    /// Promotion kind for the automated side: always a queen, after a short
    /// pause so the promotion is visible.
    pub async fn promotion_choice(&self) -> PieceKind {
        tokio::time::sleep(Duration::from_millis(self.config.promotion_delay_ms)).await;
        PieceKind::Queen
    }
}

/// Moves of the `limit` highest logits, best first.
///
/// Ties keep index order. NaN logits rank last.
pub fn rank_candidates(logits: &[f32], limit: usize) -> Vec<Move> {
    let key = |v: f32| if v.is_nan() { f32::NEG_INFINITY } else { v };

    let mut indexed: Vec<(usize, f32)> = logits
        .iter()
        .copied()
        .enumerate()
        .take(Move::INDEX_SPACE)
        .collect();
    indexed.sort_by(|a, b| key(b.1).total_cmp(&key(a.1)));

    indexed
        .into_iter()
        .take(limit)
        .filter_map(|(idx, _)| Move::from_index(idx))
        .collect()
}

#[cfg(test)]
#[path = "selector_tests.rs"]
mod selector_tests;
