//! Edge stitching for a cube net.
//!
//! Each face of the net is a `grid_size` square. An edge that lies on the
//! outside of the net is glued to exactly one other outside edge when the net
//! is folded. Those gluings are declared by hand per net shape and scaled to
//! board coordinates when the atlas is built.

use std::collections::HashSet;

use anyhow::{ensure, Context};

use crate::board::{Board, Cell, Position};
use crate::heading::Heading;

type Result<T> = std::result::Result<T, anyhow::Error>;

/// One side of one face, in face units.
///
/// Offsets run west to east along north/south sides and north to south along
/// east/west sides, unless `reversed` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentDecl {
    pub face: (i32, i32),
    pub side: Heading,
    pub reversed: bool,
}

pub type PairDecl = (SegmentDecl, SegmentDecl);

#[derive(Debug, Clone)]
pub struct AtlasConfig {
    pub grid_size: i32,
    pub pairs: Vec<PairDecl>,
}

/// A run of `grid_size` boundary cells on the inside of a face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeSegment {
    pub start: Position,
    pub outward: Heading,
    pub index_vector: (i32, i32),
}

#[derive(Debug)]
pub struct EdgeAtlas {
    grid_size: i32,
    pairs: Vec<(EdgeSegment, EdgeSegment)>,
}

const fn side(face: (i32, i32), side: Heading) -> SegmentDecl {
    SegmentDecl {
        face,
        side,
        reversed: false,
    }
}

impl SegmentDecl {
    pub const fn reversed(self) -> SegmentDecl {
        SegmentDecl {
            reversed: !self.reversed,
            ..self
        }
    }
}

impl AtlasConfig {
    /// The net three faces wide and four tall:
    ///
    /// ```text
    ///  .AB
    ///  .C.
    ///  DE.
    ///  F..
    /// ```
    pub fn standard(grid_size: i32) -> AtlasConfig {
        use Heading::*;

        AtlasConfig {
            grid_size,
            pairs: vec![
                (side((0, 1), North), side((3, 0), West)),
                (side((0, 1), West), side((2, 0), West).reversed()),
                (side((0, 2), North), side((3, 0), South)),
                (side((0, 2), East), side((2, 1), East).reversed()),
                (side((0, 2), South), side((1, 1), East)),
                (side((1, 1), West), side((2, 0), North)),
                (side((2, 1), South), side((3, 0), East)),
            ],
        }
    }

    /// The net four faces wide and three tall:
    ///
    /// ```text
    ///  ..A.
    ///  BCD.
    ///  ..EF
    /// ```
    pub fn sample(grid_size: i32) -> AtlasConfig {
        use Heading::*;

        AtlasConfig {
            grid_size,
            pairs: vec![
                (side((2, 3), South), side((1, 0), West).reversed()),
                (side((0, 2), East), side((2, 3), East).reversed()),
                (side((0, 2), North), side((1, 0), North).reversed()),
                (side((2, 2), South), side((1, 0), South).reversed()),
                (side((1, 2), East), side((2, 3), North).reversed()),
                (side((0, 2), West), side((1, 1), North)),
                (side((1, 1), South), side((2, 2), West).reversed()),
            ],
        }
    }
}

impl EdgeSegment {
    fn scaled(decl: &SegmentDecl, grid_size: i32) -> EdgeSegment {
        let (face_row, face_col) = decl.face;
        let top = face_row * grid_size;
        let left = face_col * grid_size;
        let bottom = top + grid_size - 1;
        let right = left + grid_size - 1;

        let (start, index_vector) = match decl.side {
            Heading::North => ((top, left), (0, 1)),
            Heading::South => ((bottom, left), (0, 1)),
            Heading::West => ((top, left), (1, 0)),
            Heading::East => ((top, right), (1, 0)),
        };

        let (start, index_vector) = if decl.reversed {
            let (drow, dcol) = index_vector;
            (
                (
                    start.0 + drow * (grid_size - 1),
                    start.1 + dcol * (grid_size - 1),
                ),
                (-drow, -dcol),
            )
        } else {
            (start, index_vector)
        };

        EdgeSegment {
            start,
            outward: decl.side,
            index_vector,
        }
    }

    pub fn point_at_offset(&self, offset: i32) -> Position {
        (
            self.start.0 + offset * self.index_vector.0,
            self.start.1 + offset * self.index_vector.1,
        )
    }

    /// Heading of a walker arriving through this segment.
    pub fn entry_heading(&self) -> Heading {
        self.outward.opposite()
    }
}

impl EdgeAtlas {
    pub fn new(config: &AtlasConfig) -> Result<EdgeAtlas> {
        ensure!(config.grid_size > 0, "grid size must be positive, got {}", config.grid_size);

        let mut seen: HashSet<((i32, i32), Heading)> = HashSet::new();
        for decl in config.pairs.iter().flat_map(|(a, b)| [a, b]) {
            ensure!(
                seen.insert((decl.face, decl.side)),
                "side {:?} of face {:?} is glued more than once",
                decl.side,
                decl.face
            );
        }

        let pairs = config
            .pairs
            .iter()
            .map(|(a, b)| {
                (
                    EdgeSegment::scaled(a, config.grid_size),
                    EdgeSegment::scaled(b, config.grid_size),
                )
            })
            .collect();

        Ok(EdgeAtlas {
            grid_size: config.grid_size,
            pairs,
        })
    }

    pub fn grid_size(&self) -> i32 {
        self.grid_size
    }

    pub fn pairs(&self) -> &[(EdgeSegment, EdgeSegment)] {
        &self.pairs
    }

    pub fn index_on_segment(
        &self,
        point: Position,
        segment: &EdgeSegment,
        heading: Heading,
    ) -> Option<i32> {
        if heading != segment.outward {
            return None;
        }
        (0..self.grid_size).find(|&offset| segment.point_at_offset(offset) == point)
    }

    /// If stepping from `point` in `heading` leaves the net over a glued
    /// edge, returns the offset along it and the segment on the other side.
    pub fn resolve_wrap(&self, point: Position, heading: Heading) -> Option<(i32, &EdgeSegment)> {
        self.pairs.iter().find_map(|(a, b)| {
            if let Some(offset) = self.index_on_segment(point, a, heading) {
                return Some((offset, b));
            }
            self.index_on_segment(point, b, heading)
                .map(|offset| (offset, a))
        })
    }

    /// Checks that every segment runs along the outside of a face of `board`.
    pub fn validate(&self, board: &Board) -> Result<()> {
        for segment in self.pairs.iter().flat_map(|(a, b)| [a, b]) {
            for offset in 0..self.grid_size {
                let point = segment.point_at_offset(offset);
                board
                    .ensure_on_face(point)
                    .with_context(|| format!("segment {:?} does not fit the board", segment))?;
                let outside = segment.outward.step(point);
                ensure!(
                    board.at(outside).unwrap_or(Cell::Void) == Cell::Void,
                    "segment {:?} is not on the outside of the net: {:?} is a face cell",
                    segment,
                    outside
                );
            }
        }
        Ok(())
    }
}
