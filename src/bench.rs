//! Automated matches between the AI and a uniformly random opponent

use anyhow::{anyhow, Result};
use indicatif::*;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use rayon::prelude::*;

use std::time::Instant;

use connect4_minimax::{
    board::{Board, Side},
    game::{Game, GameState},
    search::{SearchConfig, SearchEngine},
};

#[derive(Copy, Clone, Debug, Default)]
struct Tally {
    ai_wins: usize,
    random_wins: usize,
    draws: usize,
    nodes: usize,
}

/// Plays `games` games on copies of `board`, alternating who opens
pub fn run(board: &Board, config: &SearchConfig, games: usize) -> Result<()> {
    let start = Instant::now();

    let progress = ProgressBar::new(games as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("Playing games: {bar:40.cyan/blue} {pos}/{len} ~{eta} remaining")
            .progress_chars("█▓▒░  "),
    );

    let base_seed = config.seed.unwrap_or_else(rand::random);
    let outcomes = (0..games)
        .into_par_iter()
        .map(|i| -> Result<(GameState, usize)> {
            let seed = base_seed.wrapping_add(i as u64);
            let mut engine = SearchEngine::new(SearchConfig {
                seed: Some(seed),
                ..config.clone()
            });
            let mut rng = StdRng::seed_from_u64(!seed);

            let first = if i % 2 == 0 { Side::Ai } else { Side::Player };
            let mut game = Game::new(board.clone(), first);
            while game.state() == GameState::Playing {
                match game.turn() {
                    Side::Ai => {
                        game.play_ai(&mut engine)?;
                    }
                    Side::Player => {
                        let column = *game
                            .board()
                            .valid_columns()
                            .choose(&mut rng)
                            .ok_or_else(|| anyhow!("no valid moves in a game still in play"))?;
                        game.play(column)?;
                    }
                }
            }

            progress.inc(1);
            Ok((game.state(), engine.node_count))
        })
        .collect::<Result<Vec<_>>>()?;
    progress.finish();

    let tally = outcomes
        .iter()
        .fold(Tally::default(), |mut tally, &(state, nodes)| {
            match state {
                GameState::AiWin => tally.ai_wins += 1,
                GameState::PlayerWin => tally.random_wins += 1,
                GameState::Draw => tally.draws += 1,
                GameState::Playing => {}
            }
            tally.nodes += nodes;
            tally
        });

    tracing::info!(?tally, "bench finished");
    println!(
        "{} games at depth {} in {}: AI won {}, random mover won {}, {} draws, {} nodes searched",
        games,
        config.depth,
        HumanDuration(start.elapsed()),
        tally.ai_wins,
        tally.random_wins,
        tally.draws,
        tally.nodes
    );
    Ok(())
}
