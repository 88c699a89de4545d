use crate::board::Position;

/// Facing on the board. The discriminant is the facing's part of the password.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Heading {
    East = 0,
    South = 1,
    West = 2,
    North = 3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Left,
    Right,
}

const CLOCKWISE: [Heading; 4] = [Heading::East, Heading::South, Heading::West, Heading::North];

impl Heading {
    /// Quarter turns clockwise from east, any sign.
    pub fn from_quarter_turns(n: i32) -> Heading {
        CLOCKWISE[n.rem_euclid(4) as usize]
    }

    pub fn value(self) -> i32 {
        self as i32
    }

    pub fn turn(self, turn: Turn) -> Heading {
        match turn {
            Turn::Left => Heading::from_quarter_turns(self.value() - 1),
            Turn::Right => Heading::from_quarter_turns(self.value() + 1),
        }
    }

    pub fn opposite(self) -> Heading {
        match self {
            Heading::East => Heading::West,
            Heading::South => Heading::North,
            Heading::West => Heading::East,
            Heading::North => Heading::South,
        }
    }

    /// `(drow, dcol)` of one step.
    pub fn vector(self) -> (i32, i32) {
        match self {
            Heading::East => (0, 1),
            Heading::South => (1, 0),
            Heading::West => (0, -1),
            Heading::North => (-1, 0),
        }
    }

    pub fn step(self, (row, col): Position) -> Position {
        let (drow, dcol) = self.vector();
        (row + drow, col + dcol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turning_wraps_modulo_four() {
        assert_eq!(Heading::East.turn(Turn::Right), Heading::South);
        assert_eq!(Heading::East.turn(Turn::Left), Heading::North);
        assert_eq!(Heading::North.turn(Turn::Right), Heading::East);
        assert_eq!(Heading::from_quarter_turns(-5), Heading::North);
        assert_eq!(Heading::from_quarter_turns(6), Heading::West);
    }

    #[test]
    fn left_undoes_right() {
        for heading in CLOCKWISE {
            assert_eq!(heading.turn(Turn::Right).turn(Turn::Left), heading);
            assert_eq!(heading.turn(Turn::Right).turn(Turn::Right), heading.opposite());
        }
    }

    #[test]
    fn opposite_is_an_involution() {
        for heading in CLOCKWISE {
            assert_ne!(heading.opposite(), heading);
            assert_eq!(heading.opposite().opposite(), heading);
        }
    }

    #[test]
    fn vectors() {
        assert_eq!(Heading::East.step((3, 3)), (3, 4));
        assert_eq!(Heading::South.step((3, 3)), (4, 3));
        assert_eq!(Heading::West.step((3, 3)), (3, 2));
        assert_eq!(Heading::North.step((3, 3)), (2, 3));
    }
}
