use std::fmt;

use anyhow::{bail, ensure, Context};
use regex::Regex;
use tracing::debug;

use crate::board::Position;
use crate::heading::{Heading, Turn};

type Result<T> = std::result::Result<T, anyhow::Error>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Move(u32),
    Rotate(Turn),
}

/// A way of taking one step across the board.
pub trait Walker {
    /// Returns the new position and heading, or `None` when a wall blocks the step.
    fn step(&self, position: Position, heading: Heading) -> Result<Option<(Position, Heading)>>;

    /// Takes up to `amount` steps. A wall ends the move early; the rest is dropped.
    fn move_n(
        &self,
        position: Position,
        heading: Heading,
        amount: u32,
    ) -> Result<(Position, Heading)> {
        let mut state = (position, heading);
        for _ in 0..amount {
            match self.step(state.0, state.1)? {
                Some(next) => state = next,
                None => break,
            }
        }
        Ok(state)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Move(n) => write!(f, "{}", n),
            Action::Rotate(Turn::Left) => write!(f, "L"),
            Action::Rotate(Turn::Right) => write!(f, "R"),
        }
    }
}

pub fn parse_path(s: &str) -> Result<Vec<Action>> {
    let s = s.trim();
    ensure!(!s.is_empty(), "empty input: no path instructions");

    let re = Regex::new(r"(?s)(?P<steps>[0-9]+)|(?P<turn>[LR])|(?P<other>.)")?;

    re.captures_iter(s)
        .map(|captures| -> Result<Action> {
            if let Some(steps) = captures.name("steps") {
                let n: u32 = steps
                    .as_str()
                    .parse()
                    .with_context(|| format!("bad move amount {:?}", steps.as_str()))?;
                ensure!(
                    n > 0,
                    "move amount must be positive, got {:?} at column {}",
                    steps.as_str(),
                    s[..steps.start()].chars().count() + 1
                );
                return Ok(Action::Move(n));
            }
            match captures.name("turn").map(|m| m.as_str()) {
                Some("L") => Ok(Action::Rotate(Turn::Left)),
                Some(_) => Ok(Action::Rotate(Turn::Right)),
                None => {
                    let other = &captures["other"];
                    let column = s[..captures.get(0).map_or(0, |m| m.start())].chars().count() + 1;
                    bail!(
                        "unparseable instruction character {:?} at column {}",
                        other,
                        column
                    )
                }
            }
        })
        .collect()
}

/// Applies every action in order, starting from `start` facing east.
pub fn follow<W>(walker: &W, start: Position, actions: &[Action]) -> Result<(Position, Heading)>
where
    W: Walker,
{
    let mut position = start;
    let mut heading = Heading::East;

    for action in actions {
        match *action {
            Action::Rotate(turn) => heading = heading.turn(turn),
            Action::Move(n) => {
                (position, heading) = walker.move_n(position, heading, n)?;
            }
        }
        debug!(%action, row = position.0, col = position.1, ?heading, "applied");
    }

    Ok((position, heading))
}

pub fn score((row, col): Position, heading: Heading) -> i64 {
    1000 * (row as i64 + 1) + 4 * (col as i64 + 1) + heading.value() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Walks an unbounded open plane.
    struct Plane;

    impl Walker for Plane {
        fn step(&self, pos: Position, heading: Heading) -> Result<Option<(Position, Heading)>> {
            Ok(Some((heading.step(pos), heading)))
        }
    }

    /// Open plane with a wall on column 3.
    struct Fenced;

    impl Walker for Fenced {
        fn step(&self, pos: Position, heading: Heading) -> Result<Option<(Position, Heading)>> {
            let next = heading.step(pos);
            Ok(if next.1 == 3 { None } else { Some((next, heading)) })
        }
    }

    #[test]
    fn tokenizes_moves_and_turns() {
        let actions = parse_path("10R5L5R10L4R5L5\n").unwrap();
        assert_eq!(actions.len(), 13);
        assert_eq!(actions[0], Action::Move(10));
        assert_eq!(actions[1], Action::Rotate(Turn::Right));
        assert_eq!(actions[3], Action::Rotate(Turn::Left));
        assert_eq!(actions[4], Action::Move(5));
        assert_eq!(actions[12], Action::Move(5));
    }

    #[test]
    fn displays_as_the_original_path() {
        let actions = parse_path("L12RR3").unwrap();
        let text: String = actions.iter().map(|a| a.to_string()).collect();
        assert_eq!(text, "L12RR3");
    }

    #[test]
    fn rejects_unknown_instruction() {
        let err = parse_path("10R5X3").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("unparseable instruction character"));
        assert!(message.contains("\"X\""));
        assert!(message.contains("column 5"));
    }

    #[test]
    fn rejects_embedded_newline() {
        assert!(parse_path("10R\n5").is_err());
    }

    #[test]
    fn rejects_empty_path() {
        let err = parse_path("  \n").unwrap_err();
        assert!(err.to_string().contains("empty input"));
    }

    #[test]
    fn rejects_zero_move() {
        let err = parse_path("3R0L2").unwrap_err();
        assert!(err.to_string().contains("must be positive"));
        assert!(err.to_string().contains("column 3"));
        assert!(parse_path("00").is_err());
        assert_eq!(parse_path("010").unwrap(), vec![Action::Move(10)]);
    }

    #[test]
    fn rejects_oversized_amount() {
        assert!(parse_path("99999999999999999999").is_err());
    }

    #[test]
    fn follows_rotations_and_moves() {
        let actions = parse_path("2R3L1LL4").unwrap();
        let (pos, heading) = follow(&Plane, (0, 0), &actions).unwrap();
        assert_eq!(pos, (3, -1));
        assert_eq!(heading, Heading::West);
    }

    #[test]
    fn blocked_move_discards_remaining_steps() {
        let (pos, heading) = Fenced.move_n((0, 0), Heading::East, 100).unwrap();
        assert_eq!(pos, (0, 2));
        assert_eq!(heading, Heading::East);
    }

    #[test]
    fn score_is_one_based() {
        assert_eq!(score((5, 7), Heading::East), 6032);
        assert_eq!(score((4, 6), Heading::North), 5031);
        assert_eq!(score((0, 2), Heading::South), 1013);
    }
}
