use std::fmt;

/// Why a chip could not be placed in a given cell
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveFault {
    OutOfRange,
    Occupied,
    Floating,
}

impl fmt::Display for MoveFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveFault::OutOfRange => write!(f, "cell is off the board"),
            MoveFault::Occupied => write!(f, "cell is already occupied"),
            MoveFault::Floating => write!(f, "cell below is still empty"),
        }
    }
}

/// Errors raised by board construction and mutation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("invalid move at row {row}, column {column}: {fault}")]
    InvalidMove {
        row: usize,
        column: usize,
        fault: MoveFault,
    },

    #[error("invalid move, column {0} is off the board")]
    InvalidColumn(usize),

    #[error("column {0} is full")]
    ColumnFull(usize),

    #[error("column {0} is empty")]
    ColumnEmpty(usize),

    #[error("a board needs at least one row and one column, got {rows}x{columns}")]
    InvalidDimensions { rows: usize, columns: usize },

    #[error("could not parse board: {0}")]
    Malformed(String),
}

/// Errors raised by the game tree search.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("no valid moves remain on the board")]
    NoValidMoves,

    #[error("the game is already won")]
    GameOver,

    #[error("search depth must be at least 1 to choose a move")]
    InvalidDepth,

    #[error(transparent)]
    Board(#[from] BoardError),
}

/// Errors raised while driving a game turn by turn.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("the game is over")]
    GameOver,

    #[error("it is not the AI's turn")]
    NotAiTurn,

    #[error(transparent)]
    Board(#[from] BoardError),

    #[error(transparent)]
    Search(#[from] SearchError),
}
