use anyhow::Result;
use clap::{builder::RangedU64ValueParser, Parser, Subcommand, ValueEnum};
use tracing::Level;

use std::io::{stdin, stdout, Write};

use connect4_minimax::{
    board::{Board, Side},
    game::{Game, GameState},
    search::{SearchConfig, SearchEngine, WIN_SCORE},
    DEFAULT_COLUMNS, DEFAULT_ROWS,
};

mod bench;

mod display;
use display::*;

// keeps terminal coordinates well inside u16
const MAX_BOARD_DIMENSION: u64 = 32;

/// Play Connect 4 against a minimax AI
#[derive(Parser)]
#[command(name = "connect4", about = "Play Connect 4 against a minimax AI")]
struct Cli {
    /// Plies the AI searches ahead
    #[arg(long, default_value_t = 4, value_parser = clap::value_parser!(u32).range(1..))]
    depth: u32,

    /// Board height in tiles
    #[arg(
        long,
        default_value_t = DEFAULT_ROWS,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..=MAX_BOARD_DIMENSION)
    )]
    rows: usize,

    /// Board width in tiles
    #[arg(
        long,
        default_value_t = DEFAULT_COLUMNS,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..=MAX_BOARD_DIMENSION)
    )]
    columns: usize,

    /// Who drops the first chip
    #[arg(long, value_enum, default_value_t = First::Random)]
    first: First,

    /// Seed for the AI's fallback move choice
    #[arg(long)]
    seed: Option<u64>,

    /// Search the AI's candidate moves in parallel
    #[arg(long)]
    parallel: bool,

    /// Log search diagnostics to stderr
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum First {
    Player,
    Ai,
    Random,
}

#[derive(Subcommand)]
enum Command {
    /// Play the AI against a random mover and report the results
    Bench {
        /// Number of games to play
        #[arg(long, default_value_t = 100)]
        games: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .init();

    let config = SearchConfig {
        depth: cli.depth,
        parallel_root: cli.parallel,
        seed: cli.seed,
    };
    let board = Board::new(cli.rows, cli.columns)?;

    if let Some(Command::Bench { games }) = cli.command {
        return bench::run(&board, &config, games);
    }

    let first = match cli.first {
        First::Player => Side::Player,
        First::Ai => Side::Ai,
        First::Random => {
            if rand::random() {
                Side::Player
            } else {
                Side::Ai
            }
        }
    };

    play(Game::new(board, first), SearchEngine::new(config))
}

fn play(mut game: Game, mut engine: SearchEngine) -> Result<()> {
    let stdin = stdin();

    println!("Welcome to Connect 4\n");

    // game loop
    loop {
        display(game.board())?;

        match game.state() {
            GameState::Playing => match game.turn() {
                Side::Ai => {
                    println!("AI is thinking...");
                    stdout().flush()?;

                    let (column, score) = game.play_ai(&mut engine)?;
                    if score >= WIN_SCORE {
                        println!("AI can force a win.");
                    } else if score <= -WIN_SCORE {
                        println!("AI cannot stop you from winning.");
                    }
                    println!("AI plays column {}", column + 1);
                }
                Side::Player => {
                    print!("Move input > ");
                    stdout().flush()?;
                    let mut input_str = String::new();
                    if stdin.read_line(&mut input_str)? == 0 {
                        // stdin closed
                        return Ok(());
                    }

                    let column = match input_str.trim().parse::<usize>() {
                        Ok(column) if column >= 1 => column - 1,
                        _ => {
                            println!("Invalid number: {}", input_str.trim());
                            continue;
                        }
                    };
                    if let Err(err) = game.play(column) {
                        println!("{}", err);
                        // try the move again
                        continue;
                    }
                }
            },

            // end states
            GameState::PlayerWin => {
                println!("You win!");
                break;
            }
            GameState::AiWin => {
                println!("AI wins!");
                break;
            }
            GameState::Draw => {
                println!("Draw!");
                break;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["connect4"]).expect("defaults should parse");
        assert_eq!((cli.depth, cli.rows, cli.columns), (4, 6, 7));
        assert_eq!(cli.first, First::Random);
    }

    #[test]
    fn rejects_zero_depth() {
        assert!(Cli::try_parse_from(["connect4", "--depth", "0"]).is_err());
        assert!(Cli::try_parse_from(["connect4", "--depth", "1"]).is_ok());
    }

    #[test]
    fn bounds_board_dimensions() {
        for args in [
            ["connect4", "--rows", "0"],
            ["connect4", "--columns", "0"],
            ["connect4", "--rows", "33"],
            ["connect4", "--columns", "100000"],
        ]
        .iter()
        {
            assert!(Cli::try_parse_from(args.iter()).is_err(), "{:?}", args);
        }
        let cli = Cli::try_parse_from(["connect4", "--rows", "32", "--columns", "4"])
            .expect("dimensions in range should parse");
        assert_eq!((cli.rows, cli.columns), (32, 4));
    }
}
