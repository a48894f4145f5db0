use std::fmt;
use std::str::FromStr;

use crate::error::{BoardError, MoveFault};
use crate::{DEFAULT_COLUMNS, DEFAULT_ROWS, WINDOW_LENGTH};

/// One of the two competing parties
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Side {
    Player,
    Ai,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Player => Side::Ai,
            Side::Ai => Side::Player,
        }
    }

    pub fn chip(self) -> Cell {
        match self {
            Side::Player => Cell::Player,
            Side::Ai => Cell::Ai,
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Cell {
    Empty,
    Player,
    Ai,
}

impl Cell {
    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn side(self) -> Option<Side> {
        match self {
            Cell::Empty => None,
            Cell::Player => Some(Side::Player),
            Cell::Ai => Some(Side::Ai),
        }
    }

    fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Player => 'X',
            Cell::Ai => 'O',
        }
    }
}

/// The four line orientations a window can follow
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Direction {
    Horizontal,
    Vertical,
    /// up and to the right
    Diagonal,
    /// down and to the right
    AntiDiagonal,
}

static ORIENTATIONS: [Direction; 4] = [
    Direction::Horizontal,
    Direction::Vertical,
    Direction::Diagonal,
    Direction::AntiDiagonal,
];

impl Direction {
    // (row step, column step)
    fn step(self) -> (isize, isize) {
        match self {
            Direction::Horizontal => (0, 1),
            Direction::Vertical => (1, 0),
            Direction::Diagonal => (1, 1),
            Direction::AntiDiagonal => (-1, 1),
        }
    }
}

/// A Connect 4 grid of fixed dimensions
///
/// Cells are stored left-to-right, bottom-to-top, so row 0 is the row chips
/// fall onto first. A chip may only sit on top of another chip or on row 0.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    cells: Vec<Cell>,
    rows: usize,
    columns: usize,
}

impl Board {
    /// Creates an empty board with the given dimensions
    pub fn new(rows: usize, columns: usize) -> Result<Self, BoardError> {
        if rows == 0 || columns == 0 {
            return Err(BoardError::InvalidDimensions { rows, columns });
        }
        Ok(Self {
            cells: vec![Cell::Empty; rows * columns],
            rows,
            columns,
        })
    }

    /// Builds a position from a string of 1-indexed column digits, sides alternating
    pub fn from_moves<S: AsRef<str>>(moves: S, first: Side) -> Result<Self, BoardError> {
        let mut board = Self::default();
        let mut side = first;

        for (played, column_char) in moves.as_ref().chars().enumerate() {
            if board.winner().is_some() {
                return Err(BoardError::Malformed(format!(
                    "game is already over after {} moves",
                    played
                )));
            }
            match column_char.to_digit(10).map(|c| c as usize) {
                Some(column) if column >= 1 => {
                    board.drop_in_column(column - 1, side)?;
                }
                _ => {
                    return Err(BoardError::Malformed(format!(
                        "could not parse '{}' as a valid move",
                        column_char
                    )))
                }
            }
            side = side.opponent();
        }
        Ok(board)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    fn index(&self, row: usize, column: usize) -> usize {
        row * self.columns + column
    }

    /// Returns the cell at the given position, or `None` if it is off the board
    pub fn get(&self, row: usize, column: usize) -> Option<Cell> {
        if row < self.rows && column < self.columns {
            Some(self.cells[self.index(row, column)])
        } else {
            None
        }
    }

    pub fn chip_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    /// Places a chip for `side` in an empty cell
    ///
    /// The cell must be the lowest empty cell of its column. The board is left
    /// untouched if the move is rejected.
    pub fn drop_chip(&mut self, row: usize, column: usize, side: Side) -> Result<(), BoardError> {
        let fault = if row >= self.rows || column >= self.columns {
            Some(MoveFault::OutOfRange)
        } else if !self.cells[self.index(row, column)].is_empty() {
            Some(MoveFault::Occupied)
        } else if row > 0 && self.cells[self.index(row - 1, column)].is_empty() {
            Some(MoveFault::Floating)
        } else {
            None
        };

        if let Some(fault) = fault {
            return Err(BoardError::InvalidMove { row, column, fault });
        }
        let index = self.index(row, column);
        self.cells[index] = side.chip();
        Ok(())
    }

    /// Drops a chip into a column, returning the row it settled in
    pub fn drop_in_column(&mut self, column: usize, side: Side) -> Result<usize, BoardError> {
        let row = self.lowest_empty_row(column)?;
        self.drop_chip(row, column, side)?;
        Ok(row)
    }

    /// Removes the topmost chip of a column and returns its owner
    pub fn lift_chip(&mut self, column: usize) -> Result<Side, BoardError> {
        if column >= self.columns {
            return Err(BoardError::InvalidColumn(column));
        }
        for row in (0..self.rows).rev() {
            let index = self.index(row, column);
            if let Some(side) = self.cells[index].side() {
                self.cells[index] = Cell::Empty;
                return Ok(side);
            }
        }
        Err(BoardError::ColumnEmpty(column))
    }

    /// A column can take another chip while its top cell is empty
    pub fn is_valid_column(&self, column: usize) -> bool {
        column < self.columns && self.cells[self.index(self.rows - 1, column)].is_empty()
    }

    pub fn lowest_empty_row(&self, column: usize) -> Result<usize, BoardError> {
        if column >= self.columns {
            return Err(BoardError::InvalidColumn(column));
        }
        (0..self.rows)
            .find(|&row| self.cells[self.index(row, column)].is_empty())
            .ok_or(BoardError::ColumnFull(column))
    }

    /// Columns that can still take a chip, in ascending order
    pub fn valid_columns(&self) -> Vec<usize> {
        (0..self.columns)
            .filter(|&column| self.is_valid_column(column))
            .collect()
    }

    /// Every run of `WINDOW_LENGTH` cells on the board
    ///
    /// Windows are produced horizontal first, then vertical, then rising
    /// diagonals and finally falling diagonals.
    pub fn windows(&self) -> impl Iterator<Item = [Cell; WINDOW_LENGTH]> + '_ {
        ORIENTATIONS.iter().flat_map(move |&direction| {
            self.window_origins(direction)
                .map(move |(row, column)| self.window(row, column, direction))
        })
    }

    // starting cells of every window that fits on the board in this direction
    fn window_origins(&self, direction: Direction) -> impl Iterator<Item = (usize, usize)> {
        let span = WINDOW_LENGTH - 1;
        let fit_rows = self.rows.saturating_sub(span);
        let fit_columns = self.columns.saturating_sub(span);

        let (rows, columns) = match direction {
            Direction::Horizontal => (0..self.rows, 0..fit_columns),
            Direction::Vertical => (0..fit_rows, 0..self.columns),
            Direction::Diagonal => (0..fit_rows, 0..fit_columns),
            // needs room below the starting cell
            Direction::AntiDiagonal => (span..self.rows, 0..fit_columns),
        };
        rows.flat_map(move |row| columns.clone().map(move |column| (row, column)))
    }

    fn window(&self, row: usize, column: usize, direction: Direction) -> [Cell; WINDOW_LENGTH] {
        let (row_step, column_step) = direction.step();
        let mut window = [Cell::Empty; WINDOW_LENGTH];
        for (i, cell) in window.iter_mut().enumerate() {
            let r = (row as isize + row_step * i as isize) as usize;
            let c = (column as isize + column_step * i as isize) as usize;
            *cell = self.cells[self.index(r, c)];
        }
        window
    }

    pub fn has_connect_four(&self, side: Side) -> bool {
        let chip = side.chip();
        self.windows()
            .any(|window| window.iter().all(|&cell| cell == chip))
    }

    pub fn winner(&self) -> Option<Side> {
        if self.has_connect_four(Side::Player) {
            Some(Side::Player)
        } else if self.has_connect_four(Side::Ai) {
            Some(Side::Ai)
        } else {
            None
        }
    }

    pub fn is_full(&self) -> bool {
        !(0..self.columns).any(|column| self.is_valid_column(column))
    }

    /// The game has ended, either through a win or a full board
    pub fn is_terminal(&self) -> bool {
        self.has_connect_four(Side::Player) || self.has_connect_four(Side::Ai) || self.is_full()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self {
            cells: vec![Cell::Empty; DEFAULT_ROWS * DEFAULT_COLUMNS],
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
        }
    }
}

// printed top row first, the way the board is seen
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..self.rows).rev() {
            let line: String = (0..self.columns)
                .map(|column| self.cells[self.index(row, column)].symbol())
                .collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = BoardError;

    /// Parses the `Display` form: one line per row, top row first, with `.`
    /// for empty cells, `X` for the player and `O` for the AI
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        let columns = lines.first().map(|line| line.chars().count()).unwrap_or(0);
        if lines.iter().any(|line| line.chars().count() != columns) {
            return Err(BoardError::Malformed("rows have different lengths".into()));
        }
        let mut board = Self::new(lines.len(), columns)?;

        // fill from the bottom up so every chip has support
        for (row, line) in lines.iter().rev().enumerate() {
            for (column, symbol) in line.chars().enumerate() {
                let side = match symbol {
                    '.' => continue,
                    'X' => Side::Player,
                    'O' => Side::Ai,
                    other => {
                        return Err(BoardError::Malformed(format!(
                            "unknown cell '{}'",
                            other
                        )))
                    }
                };
                board.drop_chip(row, column, side)?;
            }
        }
        Ok(board)
    }
}
