use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::{
    convert::TryFrom,
    io::{stdout, Write},
};

use connect4_minimax::board::{Board, Cell};

/// Draws the board below a line of column numbers, top row first
pub fn display(board: &Board) -> Result<()> {
    let mut stdout = stdout();

    let labels: String = (1..=board.columns()).map(|x| (x % 10).to_string()).collect();
    stdout.queue(PrintStyledContent(style(labels + "\n")))?;
    for _ in 0..board.rows() {
        stdout.queue(PrintStyledContent(style("\n")))?;
    }
    stdout.flush()?;

    // the cursor now sits on the line below the bottom row
    let (origin_x, origin_y) = crossterm::cursor::position()?;

    for row in 0..board.rows() {
        for column in 0..board.columns() {
            let cell = board.get(row, column).unwrap_or(Cell::Empty);
            let (pos_x, pos_y) = (
                origin_x.saturating_add(u16::try_from(column)?),
                origin_y.saturating_sub(u16::try_from(row + 1)?),
            );

            stdout
                .queue(MoveTo(pos_x, pos_y))?
                .queue(PrintStyledContent(
                    style("O")
                        .attribute(Attribute::Bold)
                        .on(Color::DarkBlue)
                        .with(match cell {
                            Cell::Player => Color::Red,
                            Cell::Ai => Color::Yellow,
                            Cell::Empty => Color::DarkBlue,
                        }),
                ))?;
        }
    }
    stdout
        .queue(MoveTo(origin_x, origin_y))?
        .queue(PrintStyledContent(style("\n")))?;
    stdout.flush()?;
    Ok(())
}
