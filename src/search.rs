//! Depth-limited alpha-beta search over Connect 4 positions

use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use rayon::prelude::*;

use crate::board::{Board, Side};
use crate::error::SearchError;
use crate::evaluator::{Evaluator, WindowEvaluator};

/// Score of a position the AI has won
pub const WIN_SCORE: i32 = 50_000;
/// Score of a full board with no winner
pub const DRAW_SCORE: i32 = 0;
/// Starting bound for a maximizing node
pub const NEG_INFINITY: i32 = i32::MIN;
/// Starting bound for a minimizing node
pub const INFINITY: i32 = i32::MAX;

/// Tuning for a [`SearchEngine`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// Plies searched by [`SearchEngine::choose_move`]
    pub depth: u32,
    /// Search the children of the root on the rayon thread pool
    pub parallel_root: bool,
    /// Seed for the fallback move choice, drawn from entropy when `None`
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: 4,
            parallel_root: false,
            seed: None,
        }
    }
}

/// The outcome of a search: the chosen column and its minimax score
///
/// `column` is `None` when the searched node was a leaf, i.e. the depth was
/// exhausted or the game was already over.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SearchResult {
    pub column: Option<usize>,
    pub score: i32,
}

/// An agent choosing Connect 4 moves with alpha-beta minimax
///
/// # Position Scoring
/// Scores are always from the AI's point of view. The AI is the maximizing
/// side and the player the minimizing side. A position where the AI holds four
/// in a row scores [`WIN_SCORE`], one where the player does scores
/// `-WIN_SCORE`, a full board with no winner scores [`DRAW_SCORE`], and any
/// other position at the search horizon is scored by the evaluator.
///
/// # Move Choice
/// Every node starts from a uniformly random valid column and only replaces it
/// when a child scores strictly better, so among equally scored columns the
/// lowest one found first is kept.
#[derive(Clone)]
pub struct SearchEngine<E = WindowEvaluator> {
    evaluator: E,
    config: SearchConfig,
    rng: StdRng,

    /// The number of nodes searched by this `SearchEngine` so far (for diagnostics only)
    pub node_count: usize,
}

impl SearchEngine<WindowEvaluator> {
    /// Creates a new `SearchEngine` using the window heuristic
    pub fn new(config: SearchConfig) -> Self {
        Self::with_evaluator(config, WindowEvaluator)
    }
}

impl<E: Evaluator + Clone + Send + Sync> SearchEngine<E> {
    /// Creates a new `SearchEngine` with a custom evaluator
    pub fn with_evaluator(config: SearchConfig, evaluator: E) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            evaluator,
            config,
            rng,
            node_count: 0,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Searches `depth` plies below `board` with a full window
    ///
    /// `maximizing` is true when the AI is to move. The given board is not
    /// modified.
    pub fn best_move(
        &mut self,
        board: &Board,
        depth: u32,
        maximizing: bool,
    ) -> Result<SearchResult, SearchError> {
        let start_nodes = self.node_count;

        let result = if self.config.parallel_root {
            self.root_parallel(board, depth, maximizing)?
        } else {
            let mut scratch = board.clone();
            self.alpha_beta(&mut scratch, depth, NEG_INFINITY, INFINITY, maximizing)?
        };

        tracing::debug!(
            column = ?result.column,
            score = result.score,
            depth,
            nodes = self.node_count - start_nodes,
            "search complete"
        );
        Ok(result)
    }

    /// Picks the AI's move at the configured depth, returning column and score
    pub fn choose_move(&mut self, board: &Board) -> Result<(usize, i32), SearchError> {
        if board.winner().is_some() {
            return Err(SearchError::GameOver);
        }
        if board.is_full() {
            return Err(SearchError::NoValidMoves);
        }
        if self.config.depth == 0 {
            return Err(SearchError::InvalidDepth);
        }

        let result = self.best_move(board, self.config.depth, true)?;
        let column = result.column.ok_or(SearchError::NoValidMoves)?;
        Ok((column, result.score))
    }

    // score for leaves of the tree, or None if the node must be expanded
    fn leaf_score(&self, board: &Board, valid_columns: &[usize], depth: u32) -> Option<i32> {
        if board.has_connect_four(Side::Ai) {
            Some(WIN_SCORE)
        } else if board.has_connect_four(Side::Player) {
            Some(-WIN_SCORE)
        } else if valid_columns.is_empty() {
            Some(DRAW_SCORE)
        } else if depth == 0 {
            Some(self.evaluator.score_position(board, Side::Ai))
        } else {
            None
        }
    }

    /// Performs alpha-beta game tree search
    ///
    /// Moves are applied to `board` before recursing and lifted again
    /// afterwards, so it is back in its original state when this returns.
    pub fn alpha_beta(
        &mut self,
        board: &mut Board,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> Result<SearchResult, SearchError> {
        self.node_count += 1;

        let valid_columns = board.valid_columns();
        if let Some(score) = self.leaf_score(board, &valid_columns, depth) {
            return Ok(SearchResult {
                column: None,
                score,
            });
        }

        let side = if maximizing { Side::Ai } else { Side::Player };
        let mut best_column = *valid_columns
            .choose(&mut self.rng)
            .ok_or(SearchError::NoValidMoves)?;
        let mut value = if maximizing { NEG_INFINITY } else { INFINITY };

        for &column in valid_columns.iter() {
            let row = board.lowest_empty_row(column)?;
            board.drop_chip(row, column, side)?;
            let child = self.alpha_beta(board, depth - 1, alpha, beta, !maximizing);
            board.lift_chip(column)?;
            let score = child?.score;

            if maximizing {
                if score > value {
                    value = score;
                    best_column = column;
                }
                alpha = alpha.max(value);
            } else {
                if score < value {
                    value = score;
                    best_column = column;
                }
                beta = beta.min(value);
            }

            // the opponent will never allow this line, stop looking
            if alpha >= beta {
                break;
            }
        }

        Ok(SearchResult {
            column: Some(best_column),
            score: value,
        })
    }

    /// Plain minimax without pruning, visiting every node down to `depth`
    pub fn minimax(
        &mut self,
        board: &mut Board,
        depth: u32,
        maximizing: bool,
    ) -> Result<i32, SearchError> {
        self.node_count += 1;

        let valid_columns = board.valid_columns();
        if let Some(score) = self.leaf_score(board, &valid_columns, depth) {
            return Ok(score);
        }

        let side = if maximizing { Side::Ai } else { Side::Player };
        let mut value = if maximizing { NEG_INFINITY } else { INFINITY };
        for &column in valid_columns.iter() {
            board.drop_in_column(column, side)?;
            let child = self.minimax(board, depth - 1, !maximizing);
            board.lift_chip(column)?;

            value = if maximizing {
                value.max(child?)
            } else {
                value.min(child?)
            };
        }
        Ok(value)
    }

    /// Searches each child of the root on its own board copy in parallel
    ///
    /// Children get the full window instead of the bounds of their elder
    /// siblings, which yields the same root score and column as the
    /// sequential search.
    fn root_parallel(
        &mut self,
        board: &Board,
        depth: u32,
        maximizing: bool,
    ) -> Result<SearchResult, SearchError> {
        self.node_count += 1;

        let valid_columns = board.valid_columns();
        if let Some(score) = self.leaf_score(board, &valid_columns, depth) {
            return Ok(SearchResult {
                column: None,
                score,
            });
        }

        let side = if maximizing { Side::Ai } else { Side::Player };
        let mut best_column = *valid_columns
            .choose(&mut self.rng)
            .ok_or(SearchError::NoValidMoves)?;
        let seeds: Vec<u64> = valid_columns.iter().map(|_| self.rng.gen()).collect();

        let evaluator = &self.evaluator;
        let config = &self.config;
        let children = valid_columns
            .par_iter()
            .zip(seeds.par_iter())
            .map(
                |(&column, &seed)| -> Result<(usize, i32, usize), SearchError> {
                    let mut child = board.clone();
                    child.drop_in_column(column, side)?;

                    let mut engine = SearchEngine {
                        evaluator: evaluator.clone(),
                        config: config.clone(),
                        rng: StdRng::seed_from_u64(seed),
                        node_count: 0,
                    };
                    let result =
                        engine.alpha_beta(&mut child, depth - 1, NEG_INFINITY, INFINITY, !maximizing)?;
                    Ok((column, result.score, engine.node_count))
                },
            )
            .collect::<Result<Vec<_>, SearchError>>()?;

        // reduce in ascending column order so ties resolve as in the sequential search
        let mut value = if maximizing { NEG_INFINITY } else { INFINITY };
        for (column, score, nodes) in children {
            self.node_count += nodes;
            let improves = if maximizing { score > value } else { score < value };
            if improves {
                value = score;
                best_column = column;
            }
        }

        Ok(SearchResult {
            column: Some(best_column),
            score: value,
        })
    }
}
