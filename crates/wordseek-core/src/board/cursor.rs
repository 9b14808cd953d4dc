use crate::input::Direction;

use super::{ROW_LEN, Row};

pub const LEFT_EDGE: usize = 0;
pub const RIGHT_EDGE: usize = ROW_LEN - 1;

/// Cursor home: upper display, middle slot.
pub const HOME_ROW: Row = Row::Upper;
pub const HOME_POSITION: usize = 2;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Cursor {
    pub row: Row,
    pub position: usize,
    pub enabled: bool,
}

impl Cursor {
    pub const fn home() -> Self {
        Self {
            row: HOME_ROW,
            position: HOME_POSITION,
            enabled: false,
        }
    }

    /// Cell reached by one move in `direction`.
    pub fn step(self, direction: Direction) -> Self {
        let (row, position) = match direction {
            Direction::Up | Direction::Down => (self.row.other(), self.position),
            Direction::Left => (self.row, (self.position + ROW_LEN - 1) % ROW_LEN),
            Direction::Right => (self.row, (self.position + 1) % ROW_LEN),
        };

        Self {
            row,
            position: nudge(row, position),
            enabled: self.enabled,
        }
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::home()
    }
}

/// The lower display's edge slots hold the carousel arrows and never host the cursor.
fn nudge(row: Row, position: usize) -> usize {
    match (row, position) {
        (Row::Lower, LEFT_EDGE) => LEFT_EDGE + 1,
        (Row::Lower, RIGHT_EDGE) => RIGHT_EDGE - 1,
        _ => position,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIRECTIONS: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    fn at(row: Row, position: usize) -> Cursor {
        Cursor {
            row,
            position,
            enabled: true,
        }
    }

    #[test]
    fn vertical_moves_swap_rows_and_nudge_onto_lower() {
        assert_eq!(at(Row::Upper, 0).step(Direction::Down), at(Row::Lower, 1));
        assert_eq!(at(Row::Upper, 4).step(Direction::Up), at(Row::Lower, 3));
        assert_eq!(at(Row::Upper, 2).step(Direction::Down), at(Row::Lower, 2));
        assert_eq!(at(Row::Lower, 1).step(Direction::Up), at(Row::Upper, 1));
    }

    #[test]
    fn horizontal_moves_wrap_on_upper() {
        assert_eq!(at(Row::Upper, 0).step(Direction::Left), at(Row::Upper, 4));
        assert_eq!(at(Row::Upper, 4).step(Direction::Right), at(Row::Upper, 0));
        assert_eq!(at(Row::Upper, 2).step(Direction::Right), at(Row::Upper, 3));
    }

    #[test]
    fn horizontal_moves_on_lower_skip_arrow_slots() {
        assert_eq!(at(Row::Lower, 1).step(Direction::Left), at(Row::Lower, 1));
        assert_eq!(at(Row::Lower, 3).step(Direction::Right), at(Row::Lower, 3));
        assert_eq!(at(Row::Lower, 2).step(Direction::Left), at(Row::Lower, 1));
    }

    #[test]
    fn lower_edges_are_never_a_destination() {
        for row in [Row::Upper, Row::Lower] {
            for position in 0..ROW_LEN {
                for direction in DIRECTIONS {
                    let next = at(row, position).step(direction);
                    if next.row == Row::Lower {
                        assert!(
                            (1..=3).contains(&next.position),
                            "{row:?}/{position} {direction:?} -> {next:?}"
                        );
                    }
                }
            }
        }
    }
}
