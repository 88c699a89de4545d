use anyhow::bail;
use tracing::trace;

use crate::atlas::EdgeAtlas;
use crate::board::{Board, Cell, Position};
use crate::heading::Heading;
use crate::path::Walker;

type Result<T> = std::result::Result<T, anyhow::Error>;

/// Walks the board as the surface of a folded cube.
pub struct CubeWalker<'a> {
    board: &'a Board,
    atlas: &'a EdgeAtlas,
}

impl<'a> CubeWalker<'a> {
    pub fn new(board: &'a Board, atlas: &'a EdgeAtlas) -> CubeWalker<'a> {
        CubeWalker { board, atlas }
    }
}

impl Walker for CubeWalker<'_> {
    fn step(&self, position: Position, heading: Heading) -> Result<Option<(Position, Heading)>> {
        let (next, next_heading) = match self.atlas.resolve_wrap(position, heading) {
            None => (heading.step(position), heading),
            Some((offset, dest)) => {
                let next = dest.point_at_offset(offset);
                trace!(?position, ?heading, ?next, offset, "crossing cube edge");
                (next, dest.entry_heading())
            }
        };

        match self.board.cell_at(next)? {
            Cell::Wall => Ok(None),
            Cell::Open => Ok(Some((next, next_heading))),
            Cell::Void => bail!(
                "stepping {:?} from {:?} leaves the net over an edge the atlas does not cover",
                heading,
                position
            ),
        }
    }
}
