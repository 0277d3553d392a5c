//! Terminal chess against the neural move selector.
//!
//! The human types moves on stdin; the selector answers for the other side.
//! With `--autoplay` the selector plays both sides. Logs go to stderr
//! (`RUST_LOG`, default `info`), the board to stdout.

mod command;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chess_core::{Board, ChessError, Color, Game, GameStatus, MoveResult};
use clap::{Parser, ValueEnum};
use neural_engine::{MoveSelector, SelectorConfig};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use command::{parse_command, parse_promotion, Command, HELP};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Side {
    White,
    Black,
}

impl From<Side> for Color {
    fn from(side: Side) -> Self {
        match side {
            Side::White => Color::White,
            Side::Black => Color::Black,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "chess_play", about = "Play chess against the neural move selector")]
struct Args {
    /// Selector config file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Evaluator model, overrides the config
    #[arg(long)]
    model: Option<PathBuf>,

    /// Start from this position instead of the standard layout
    #[arg(long)]
    fen: Option<String>,

    /// Seed for the random fallback
    #[arg(long)]
    seed: Option<u64>,

    /// Side played by the human
    #[arg(long, value_enum, default_value = "white")]
    human: Side,

    /// Let the selector play both sides
    #[arg(long)]
    autoplay: bool,

    /// Ply cap for --autoplay
    #[arg(long, default_value_t = 200)]
    max_moves: usize,
}

type Input = Lines<BufReader<Stdin>>;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SelectorConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SelectorConfig::default(),
    };
    if let Some(model) = &args.model {
        config.model_path = model.clone();
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let board = match &args.fen {
        Some(fen) => Board::from_fen(fen).context("parsing --fen")?,
        None => Board::startpos(),
    };
    let mut game = Game::from_board(board);

    let selector = MoveSelector::new(config);
    if selector.initialize().await.is_err() {
        warn!("no evaluator loaded, the computer plays random legal moves");
    }

    if args.autoplay {
        autoplay(&mut game, &selector, args.max_moves).await
    } else {
        interactive(&mut game, &selector, args.human.into()).await
    }
}

async fn autoplay(game: &mut Game, selector: &MoveSelector, max_moves: usize) -> Result<()> {
    println!("{}\n", game.board());
    for _ in 0..max_moves {
        if game.status().is_over() {
            break;
        }
        computer_turn(game, selector).await?;
        print_status(game.board());
    }
    println!("\n{}", game.board());
    if !game.status().is_over() {
        info!(plies = game.history().len(), "move cap reached");
    }
    Ok(())
}

async fn interactive(game: &mut Game, selector: &MoveSelector, human: Color) -> Result<()> {
    let mut input: Input = BufReader::new(tokio::io::stdin()).lines();
    println!("You play {human}. Type `help` for commands.\n");
    println!("{}", game.board());
    print_status(game.board());

    loop {
        let over = game.status().is_over();
        if !over && game.board().side_to_move() != human {
            computer_turn(game, selector).await?;
            println!("{}", game.board());
            print_status(game.board());
            continue;
        }
        if over {
            println!("Type `reset` to play again or `quit`.");
        }

        let Some(line) = prompt(&mut input, "> ").await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        match parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => println!("{HELP}"),
            Ok(Command::Board) => println!("{}", game.board()),
            Ok(Command::Reset) => {
                game.reset();
                println!("{}", game.board());
            }
            Ok(Command::Moves(from)) => {
                let targets: Vec<String> = game
                    .board()
                    .legal_moves(from)
                    .iter()
                    .map(|sq| sq.to_string())
                    .collect();
                if targets.is_empty() {
                    println!("no legal moves from {from}");
                } else {
                    println!("{from}: {}", targets.join(" "));
                }
            }
            Ok(Command::Play { mv, promotion }) => {
                match game.play(mv.from, mv.to, promotion) {
                    Ok(result) => {
                        if result.needs_promotion && !ask_promotion(game, &mut input).await? {
                            break;
                        }
                        describe(&result);
                        println!("{}", game.board());
                        print_status(game.board());
                    }
                    Err(e) => println!("{e}"),
                }
            }
            Err(e) => println!("{e} (type `help`)"),
        }
    }
    Ok(())
}

/// Plays one move for the side to move using the selector.
async fn computer_turn(game: &mut Game, selector: &MoveSelector) -> Result<()> {
    let side = game.board().side_to_move();
    let Some(chosen) = selector.select_move(game.board()).await else {
        bail!("no move available for {side}");
    };

    let result = game
        .play(chosen.from, chosen.to, None)
        .with_context(|| format!("selector chose a rejected move {}", chosen.as_move()))?;
    match chosen.evaluation {
        Some(eval) => println!("{side} plays {} (eval {eval:+.1})", chosen.as_move()),
        None => println!("{side} plays {}", chosen.as_move()),
    }

    if result.needs_promotion {
        let kind = selector.promotion_choice().await;
        game.promote(kind)?;
        println!("{side} promotes to {kind}");
    }
    describe(&result);
    Ok(())
}

/// Asks until a valid promotion kind is given. `false` if input ended.
async fn ask_promotion(game: &mut Game, input: &mut Input) -> Result<bool> {
    loop {
        let Some(answer) = prompt(input, "Promote to (q/r/b/n): ").await? else {
            return Ok(false);
        };
        match parse_promotion(&answer).and_then(|kind| game.promote(kind)) {
            Ok(promotion) => {
                println!("promoted to {}", promotion.kind);
                return Ok(true);
            }
            Err(ChessError::NoPromotionPending) => return Ok(true),
            Err(e) => println!("{e}"),
        }
    }
}

async fn prompt(input: &mut Input, text: &str) -> Result<Option<String>> {
    use std::io::Write;

    print!("{text}");
    std::io::stdout().flush().ok();
    input.next_line().await.context("reading stdin")
}

fn describe(result: &MoveResult) {
    if let Some(capture) = &result.captured {
        let how = if result.en_passant { " en passant" } else { "" };
        println!("  captures {} on {}{how}", capture.piece.kind, capture.square);
    }
    if let Some(rook) = &result.rook_move {
        println!("  castles, rook {} -> {}", rook.from, rook.to);
    }
}

fn print_status(board: &Board) {
    match board.status() {
        GameStatus::InProgress => {}
        GameStatus::Check => println!("Check! {} to move.", board.side_to_move()),
        GameStatus::Checkmate { winner } => println!("Checkmate! {winner} wins."),
        GameStatus::Stalemate => println!("Stalemate! The game is a draw."),
    }
}
