//! Line commands accepted at the prompt.

use chess_core::{ChessError, Move, PieceKind, Square};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `e2e4`, or `e7e8q` with a promotion letter.
    Play {
        mv: Move,
        promotion: Option<PieceKind>,
    },
    /// `moves e2`: legal destinations of the piece on a square.
    Moves(Square),
    Board,
    Reset,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  e2e4 | e7e8q   play a move (promotion letter q/r/b/n optional)
  moves <sq>     list legal destinations from a square
  board          show the board
  reset          start a new game
  quit           leave";

pub fn parse_command(line: &str) -> Result<Command, ChessError> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    match parts.as_slice() {
        ["quit"] | ["exit"] => Ok(Command::Quit),
        ["board"] => Ok(Command::Board),
        ["reset"] | ["new"] => Ok(Command::Reset),
        ["help"] | ["?"] => Ok(Command::Help),
        ["moves", sq] => Ok(Command::Moves(sq.parse()?)),
        [text] if text.len() == 4 => Ok(Command::Play {
            mv: text.parse()?,
            promotion: None,
        }),
        [text] if text.len() == 5 && text.is_ascii() => {
            let mv = text[..4].parse()?;
            let promotion = parse_promotion(&text[4..])?;
            Ok(Command::Play {
                mv,
                promotion: Some(promotion),
            })
        }
        _ => Err(ChessError::InvalidMove(line.trim().to_string())),
    }
}

/// Parses a promotion answer such as `q` or `queen`.
pub fn parse_promotion(text: &str) -> Result<PieceKind, ChessError> {
    let text = text.trim().to_ascii_lowercase();
    let kind = match text.as_str() {
        "knight" => Some(PieceKind::Knight),
        "bishop" => Some(PieceKind::Bishop),
        "rook" => Some(PieceKind::Rook),
        "queen" => Some(PieceKind::Queen),
        _ if text.chars().count() == 1 => text.chars().next().and_then(PieceKind::from_letter),
        _ => None,
    };
    match kind {
        Some(kind) if kind.is_promotion_target() => Ok(kind),
        Some(kind) => Err(ChessError::InvalidPromotion(kind)),
        None => Err(ChessError::InvalidMove(text)),
    }
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod command_tests;
