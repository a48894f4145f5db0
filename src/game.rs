//! Turn-by-turn play between the player and the AI

use crate::board::{Board, Side};
use crate::error::GameError;
use crate::evaluator::Evaluator;
use crate::search::SearchEngine;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameState {
    Playing,
    PlayerWin,
    AiWin,
    Draw,
}

impl GameState {
    fn of(board: &Board) -> Self {
        match board.winner() {
            Some(Side::Player) => GameState::PlayerWin,
            Some(Side::Ai) => GameState::AiWin,
            None if board.is_full() => GameState::Draw,
            None => GameState::Playing,
        }
    }
}

/// A game in progress, alternating turns between the two sides
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    turn: Side,
    state: GameState,
}

impl Game {
    pub fn new(board: Board, first: Side) -> Self {
        let state = GameState::of(&board);
        Self {
            board,
            turn: first,
            state,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The side whose chip is dropped next
    pub fn turn(&self) -> Side {
        self.turn
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// Drops a chip for the side to move into a 0-indexed column
    pub fn play(&mut self, column: usize) -> Result<GameState, GameError> {
        if self.state != GameState::Playing {
            return Err(GameError::GameOver);
        }
        self.board.drop_in_column(column, self.turn)?;
        self.state = GameState::of(&self.board);
        self.turn = self.turn.opponent();

        if self.state != GameState::Playing {
            tracing::info!(state = ?self.state, chips = self.board.chip_count(), "game finished");
        }
        Ok(self.state)
    }

    /// Lets the engine choose and play the AI's move, returning column and score
    pub fn play_ai<E: Evaluator + Clone + Send + Sync>(
        &mut self,
        engine: &mut SearchEngine<E>,
    ) -> Result<(usize, i32), GameError> {
        if self.state != GameState::Playing {
            return Err(GameError::GameOver);
        }
        if self.turn != Side::Ai {
            return Err(GameError::NotAiTurn);
        }

        let (column, score) = engine.choose_move(&self.board)?;
        self.play(column)?;
        Ok((column, score))
    }
}
