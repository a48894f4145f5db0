//! Static evaluation of positions the search cannot play out to the end

use crate::board::{Board, Cell, Side};
use crate::WINDOW_LENGTH;

/// Bonus for each chip a side holds in the middle column
pub const CENTER_WEIGHT: i32 = 3;
/// A window completely filled by the side
pub const FOUR_WEIGHT: i32 = 100;
/// Three of the side's chips and one gap
pub const THREE_WEIGHT: i32 = 5;
/// Two of the side's chips and two gaps
pub const TWO_WEIGHT: i32 = 2;
/// Penalty for three opposing chips and one gap
pub const OPPONENT_THREE_WEIGHT: i32 = -4;

/// Scores how desirable a board is for one side
pub trait Evaluator {
    fn score_position(&self, board: &Board, side: Side) -> i32;
}

/// Sums weighted counts over every 4-cell window, plus a centre column bonus
///
/// The weights reward the side's own near-complete lines more than they
/// penalise the opponent's, and two-chip opponent lines are ignored.
#[derive(Copy, Clone, Debug, Default)]
pub struct WindowEvaluator;

impl Evaluator for WindowEvaluator {
    fn score_position(&self, board: &Board, side: Side) -> i32 {
        let centre = board.columns() / 2;
        let centre_chips = (0..board.rows())
            .filter(|&row| board.get(row, centre) == Some(side.chip()))
            .count() as i32;

        let windows: i32 = board
            .windows()
            .map(|window| evaluate_window(&window, side))
            .sum();

        centre_chips * CENTER_WEIGHT + windows
    }
}

/// Scores a single window for `side`
pub fn evaluate_window(window: &[Cell; WINDOW_LENGTH], side: Side) -> i32 {
    let count = |cell: Cell| window.iter().filter(|&&c| c == cell).count();
    let own = count(side.chip());
    let opponent = count(side.opponent().chip());
    let empty = count(Cell::Empty);

    let mut score = 0;
    if own == WINDOW_LENGTH {
        score += FOUR_WEIGHT;
    } else if own == 3 && empty == 1 {
        score += THREE_WEIGHT;
    } else if own == 2 && empty == 2 {
        score += TWO_WEIGHT;
    }

    if opponent == 3 && empty == 1 {
        score += OPPONENT_THREE_WEIGHT;
    }
    score
}
