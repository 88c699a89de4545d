use anyhow::bail;

use crate::board::{Board, Cell, Position};
use crate::heading::Heading;
use crate::path::Walker;

type Result<T> = std::result::Result<T, anyhow::Error>;

/// Treats the board as a torus: leaving a row or column re-enters it from
/// the other side, skipping over void.
pub struct FlatWalker<'a> {
    board: &'a Board,
}

impl<'a> FlatWalker<'a> {
    pub fn new(board: &'a Board) -> FlatWalker<'a> {
        FlatWalker { board }
    }

    fn next_non_void(&self, position: Position, heading: Heading) -> Result<(Position, Cell)> {
        let line_length = match heading {
            Heading::East | Heading::West => self.board.number_of_columns(),
            Heading::North | Heading::South => self.board.number_of_rows(),
        };

        let mut next = position;
        for _ in 0..line_length {
            next = self.board.wrap(heading.step(next));
            match self.board.cell_at(next)? {
                Cell::Void => continue,
                cell => return Ok((next, cell)),
            }
        }

        bail!("no face cells in line through {:?} heading {:?}", position, heading)
    }
}

impl Walker for FlatWalker<'_> {
    fn step(&self, position: Position, heading: Heading) -> Result<Option<(Position, Heading)>> {
        match self.next_non_void(position, heading)? {
            (_, Cell::Wall) => Ok(None),
            (next, _) => Ok(Some((next, heading))),
        }
    }
}
