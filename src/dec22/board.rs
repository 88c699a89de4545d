use std::fmt;

use anyhow::{anyhow, bail, ensure};
use itertools::Itertools;

type Result<T> = std::result::Result<T, anyhow::Error>;

/// Zero-based `(row, column)`.
pub type Position = (i32, i32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Open,
    Wall,
    Void,
}

impl Cell {
    fn from_char(ch: char) -> Option<Cell> {
        match ch {
            '.' => Some(Cell::Open),
            '#' => Some(Cell::Wall),
            ' ' => Some(Cell::Void),
            _ => None,
        }
    }

    fn to_char(self) -> char {
        match self {
            Cell::Open => '.',
            Cell::Wall => '#',
            Cell::Void => ' ',
        }
    }
}

#[derive(Debug)]
pub struct Board {
    number_of_rows: i32,
    number_of_columns: i32,
    row_data: Vec<Vec<Cell>>,
}

impl Board {
    /// Builds a board from raw map lines. Trailing void is dropped, then short
    /// lines are padded with void up to the widest one.
    pub fn from_lines<'a, I>(lines: I) -> Result<Board>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut rows: Vec<&str> = lines
            .into_iter()
            .map(|row| row.trim_end_matches(' '))
            .collect();
        while rows.last().map_or(false, |row| row.is_empty()) {
            rows.pop();
        }
        let width = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0);

        if rows.is_empty() || width == 0 {
            bail!("empty input: the board has no cells");
        }

        let row_data = rows
            .iter()
            .enumerate()
            .map(|(row_index, row)| {
                row.chars()
                    .pad_using(width, |_| ' ')
                    .enumerate()
                    .map(|(col_index, ch)| {
                        Cell::from_char(ch).ok_or_else(|| {
                            anyhow!(
                                "unexpected map character {:?} at line {}, column {}",
                                ch,
                                row_index + 1,
                                col_index + 1
                            )
                        })
                    })
                    .collect::<Result<Vec<Cell>>>()
            })
            .collect::<Result<Vec<Vec<Cell>>>>()?;

        Ok(Board {
            number_of_rows: rows.len().try_into()?,
            number_of_columns: width.try_into()?,
            row_data,
        })
    }

    pub fn number_of_rows(&self) -> i32 {
        self.number_of_rows
    }

    pub fn number_of_columns(&self) -> i32 {
        self.number_of_columns
    }

    pub fn in_bounds(&self, (row, col): Position) -> bool {
        !(row < 0 || row >= self.number_of_rows || col < 0 || col >= self.number_of_columns)
    }

    pub fn at(&self, (row, col): Position) -> Option<Cell> {
        if !self.in_bounds((row, col)) {
            return None;
        }
        Some(self.row_data[row as usize][col as usize])
    }

    /// Like `at`, but a lookup outside the padded rectangle is an error.
    pub fn cell_at(&self, pos: Position) -> Result<Cell> {
        self.at(pos).ok_or_else(|| {
            anyhow!(
                "{:?} is outside the {}x{} board",
                pos,
                self.number_of_rows,
                self.number_of_columns
            )
        })
    }

    /// Folds an out-of-range position back onto the board, torus style.
    pub fn wrap(&self, (row, col): Position) -> Position {
        (
            row.rem_euclid(self.number_of_rows),
            col.rem_euclid(self.number_of_columns),
        )
    }

    pub fn starting_position(&self) -> Result<Position> {
        let col = self.row_data[0]
            .iter()
            .position(|cell| *cell == Cell::Open)
            .ok_or_else(|| anyhow!("no open cell in the first row to start from"))?;
        Ok((0, col.try_into()?))
    }

    /// Number of open and wall cells.
    pub fn face_cell_count(&self) -> usize {
        self.row_data
            .iter()
            .flatten()
            .filter(|cell| **cell != Cell::Void)
            .count()
    }

    /// Checks that `pos` is a cell of some face.
    pub fn ensure_on_face(&self, pos: Position) -> Result<()> {
        ensure!(
            self.cell_at(pos)? != Cell::Void,
            "{:?} is a void cell, not part of any face",
            pos
        );
        Ok(())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.row_data {
            let line: String = row.iter().map(|cell| cell.to_char()).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_rows_are_padded_with_void() {
        let board = Board::from_lines(["  ..#", ".", "   ."]).unwrap();
        assert_eq!(board.number_of_rows(), 3);
        assert_eq!(board.number_of_columns(), 5);
        assert_eq!(board.at((1, 0)), Some(Cell::Open));
        assert_eq!(board.at((1, 4)), Some(Cell::Void));
        assert_eq!(board.at((2, 3)), Some(Cell::Open));
        assert_eq!(board.at((0, 4)), Some(Cell::Wall));
    }

    #[test]
    fn trailing_void_is_dropped() {
        let board = Board::from_lines(["  .#   ", ".  ", "", "     "]).unwrap();
        assert_eq!(board.number_of_rows(), 2);
        assert_eq!(board.number_of_columns(), 4);
        assert_eq!(board.face_cell_count(), 3);
        assert_eq!(board.to_string(), "  .#\n.   \n");
    }

    #[test]
    fn lookups_outside_the_rectangle_fail() {
        let board = Board::from_lines(["..", ".."]).unwrap();
        assert!(board.cell_at((1, 1)).is_ok());
        assert!(board.cell_at((2, 0)).is_err());
        assert!(board.cell_at((0, -1)).is_err());
        assert_eq!(board.wrap((2, -1)), (0, 1));
    }

    #[test]
    fn start_is_leftmost_open_cell_of_first_row() {
        let board = Board::from_lines(["  #..#", "......"]).unwrap();
        assert_eq!(board.starting_position().unwrap(), (0, 3));
    }

    #[test]
    fn missing_start_is_an_error() {
        let board = Board::from_lines(["  ##", "...."]).unwrap();
        let err = board.starting_position().unwrap_err();
        assert!(err.to_string().contains("no open cell"));
    }

    #[test]
    fn rejects_unknown_characters() {
        let err = Board::from_lines(["..", ".x"]).unwrap_err();
        assert!(err.to_string().contains("line 2, column 2"));
    }

    #[test]
    fn rejects_empty_board() {
        assert!(Board::from_lines(Vec::<&str>::new()).is_err());
        assert!(Board::from_lines([""]).is_err());
    }

    #[test]
    fn displays_padded_board() {
        let board = Board::from_lines(["  .#", "."]).unwrap();
        assert_eq!(board.to_string(), "  .#\n.   \n");
    }

    #[test]
    fn void_cells_are_not_on_a_face() {
        let board = Board::from_lines([" ."]).unwrap();
        assert!(board.ensure_on_face((0, 1)).is_ok());
        assert!(board.ensure_on_face((0, 0)).is_err());
        assert!(board.ensure_on_face((1, 0)).is_err());
    }
}
