use std::fmt;

use cubeturn_core::{CubeState, Face, QuarterTurn, Sign, SignedAxis, TurnDelta, turn_layer};
use strum::EnumIter;

/// Direction of a face turn, as seen looking at the face.
#[derive(EnumIter, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Clockwise, written in uppercase.
    Clockwise,
    /// Counterclockwise, written in lowercase.
    CounterClockwise,
}
impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn rev(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }
}

/// Quarter turn of one outer face.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    /// Face to turn.
    pub face: Face,
    /// Direction to turn it.
    pub direction: Direction,
}

/// Every move, in the order `FfBbRrLlUuDd`.
pub const ALL_MOVES: [Move; 12] = {
    use Direction::*;
    use Face::*;

    [
        Move::new(F, Clockwise),
        Move::new(F, CounterClockwise),
        Move::new(B, Clockwise),
        Move::new(B, CounterClockwise),
        Move::new(R, Clockwise),
        Move::new(R, CounterClockwise),
        Move::new(L, Clockwise),
        Move::new(L, CounterClockwise),
        Move::new(U, Clockwise),
        Move::new(U, CounterClockwise),
        Move::new(D, Clockwise),
        Move::new(D, CounterClockwise),
    ]
};

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

impl Move {
    /// Constructs a move.
    pub const fn new(face: Face, direction: Direction) -> Self {
        Self { face, direction }
    }

    /// Parses a single move symbol. Uppercase is clockwise and lowercase is
    /// counterclockwise.
    pub fn from_char(c: char) -> Option<Self> {
        let face = Face::from_symbol(c)?;
        let direction = if c.is_ascii_uppercase() {
            Direction::Clockwise
        } else {
            Direction::CounterClockwise
        };
        Some(Self::new(face, direction))
    }
    /// Returns the move symbol.
    pub fn to_char(self) -> char {
        let c = self.face.symbol();
        match self.direction {
            Direction::Clockwise => c,
            Direction::CounterClockwise => c.to_ascii_lowercase(),
        }
    }

    /// Returns the move that undoes this one.
    #[must_use]
    pub fn inverse(self) -> Self {
        Self::new(self.face, self.direction.rev())
    }

    /// Returns the rotation performed by the move.
    pub fn quarter_turn(self) -> QuarterTurn {
        // Clockwise seen from outside is negative around the outward normal.
        let sign = match self.direction {
            Direction::Clockwise => -self.face.sign(),
            Direction::CounterClockwise => self.face.sign(),
        };
        QuarterTurn::new(self.face.axis(), sign)
    }

    /// Returns the signed axis to turn around and the coordinate of the
    /// turned layer along it. Inverse of [`Move::from_layer_turn()`].
    pub fn layer_turn(self) -> (SignedAxis, i8) {
        let axis = SignedAxis::from_quarter_turn(self.quarter_turn());
        (axis, self.face.sign().int())
    }

    /// Returns the move equivalent to turning the slice at `layer` around
    /// `axis`, or `None` for a middle slice.
    pub fn from_layer_turn(axis: SignedAxis, layer: i8) -> Option<Self> {
        let face = Face::new(axis.axis, Sign::of(layer)?);
        let direction = if axis.quarter_turn().sign == face.sign() {
            Direction::CounterClockwise
        } else {
            Direction::Clockwise
        };
        Some(Self::new(face, direction))
    }

    /// Applies the move to a cube. The reference cubie is whichever cubie is
    /// at the center of the face when the move is applied.
    pub fn apply(self, state: &mut CubeState) -> cubeturn_core::Result<TurnDelta> {
        let (axis, layer) = self.layer_turn();
        turn_layer(state, axis, layer)
    }
}

#[cfg(test)]
mod tests {
    use cubeturn_core::{Axis, Position};
    use pretty_assertions::assert_eq;
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_move_axes() {
        let expected = [
            ('R', Axis::X, Sign::Neg),
            ('L', Axis::X, Sign::Pos),
            ('U', Axis::Y, Sign::Neg),
            ('D', Axis::Y, Sign::Pos),
            ('F', Axis::Z, Sign::Pos),
            ('B', Axis::Z, Sign::Neg),
        ];
        for (c, axis, sign) in expected {
            let m = Move::from_char(c).unwrap();
            let (signed_axis, layer) = m.layer_turn();
            assert_eq!(signed_axis, SignedAxis::new(axis, sign), "{m}");
            assert_eq!(Position::on_axis(axis, layer), m.face.center());
            assert_eq!(m.inverse().layer_turn(), (-signed_axis, layer));
        }
    }

    #[test]
    fn test_move_chars() {
        assert_eq!(
            ALL_MOVES.iter().map(|m| m.to_char()).collect::<String>(),
            "FfBbRrLlUuDd",
        );
        for m in ALL_MOVES {
            assert_eq!(Move::from_char(m.to_char()), Some(m));
            assert_ne!(m.inverse(), m);
            assert_eq!(m.inverse().inverse(), m);
        }
        assert_eq!(Move::from_char('x'), None);
        assert_eq!(Move::from_char(' '), None);
    }

    #[test]
    fn test_from_layer_turn() {
        for m in ALL_MOVES {
            let (axis, layer) = m.layer_turn();
            assert_eq!(Move::from_layer_turn(axis, layer), Some(m));
        }
        for axis in Axis::iter() {
            for sign in [Sign::Pos, Sign::Neg] {
                assert_eq!(Move::from_layer_turn(SignedAxis::new(axis, sign), 0), None);
            }
        }
    }

    #[test]
    fn test_clockwise_right_moves_front_up() {
        let mut state = CubeState::new_solved();
        let front = state.cubie_at_position(Position::new(1, 0, 1)).unwrap();
        Move::from_char('R').unwrap().apply(&mut state).unwrap();
        assert_eq!(state.cubie(front).unwrap().position, Position::new(1, 1, 0));

        let mut state = CubeState::new_solved();
        let top = state.cubie_at_position(Position::new(0, 1, 1)).unwrap();
        Move::from_char('F').unwrap().apply(&mut state).unwrap();
        assert_eq!(state.cubie(top).unwrap().position, Position::new(1, 0, 1));

        let mut state = CubeState::new_solved();
        let front = state.cubie_at_position(Position::new(0, 1, 1)).unwrap();
        Move::from_char('U').unwrap().apply(&mut state).unwrap();
        assert_eq!(state.cubie(front).unwrap().position, Position::new(-1, 1, 0));
    }

    #[test]
    fn test_directions() {
        for direction in Direction::iter() {
            assert_eq!(direction.rev().rev(), direction);
        }
    }
}
