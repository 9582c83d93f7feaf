//! Quarter-turn engine.
//!
//! A turn is requested as a reference cubie plus a signed axis. The sign of
//! the axis selects the direction using these conventions:
//!
//! | Axis | Clockwise when | Rotation around the signed axis |
//! |------|----------------|---------------------------------|
//! | X    | `x > 0`        | +90°                            |
//! | Y    | `y < 0`        | +90°                            |
//! | Z    | `z < 0`        | −90°                            |
//!
//! "Clockwise" refers to the direction in which the 3x3 matrix produced by
//! [`select_slice()`] is rotated. Z is mirrored relative to X and Y because of
//! the order in which [`select_slice()`] lays out each slice.

use crate::state::StagedCubie;
use crate::{
    Axis, CubeState, CubieId, LAYER_COUNT, Orientation, Position, QuarterTurn, Result,
    SLICE_LEN, SignedAxis, rotate_matrix, select_slice,
};

impl SignedAxis {
    /// Returns whether a turn around this axis rotates the slice matrix
    /// clockwise.
    pub fn is_clockwise(self) -> bool {
        use crate::Sign::{Neg, Pos};

        match self.axis {
            Axis::X => self.sign == Pos,
            Axis::Y => self.sign == Neg,
            Axis::Z => self.sign == Neg,
        }
    }

    /// Returns the rotation angle around this signed axis, in degrees.
    pub fn turn_degrees(self) -> i16 {
        match self.axis {
            Axis::X | Axis::Y => 90,
            Axis::Z => -90,
        }
    }

    /// Returns the quarter turn performed by a turn around this axis.
    pub fn quarter_turn(self) -> QuarterTurn {
        match self.axis {
            Axis::X | Axis::Y => QuarterTurn::new(self.axis, self.sign),
            Axis::Z => QuarterTurn::new(self.axis, -self.sign),
        }
    }

    /// Returns the signed axis that performs `turn`. This is the inverse of
    /// [`SignedAxis::quarter_turn()`].
    pub fn from_quarter_turn(turn: QuarterTurn) -> Self {
        match turn.axis {
            Axis::X | Axis::Y => Self::new(turn.axis, turn.sign),
            Axis::Z => Self::new(turn.axis, -turn.sign),
        }
    }
}

/// Motion of a single cubie in a committed turn.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CubieMotion {
    /// Cubie that moved.
    pub cubie: CubieId,
    /// Position before the turn.
    pub from: Position,
    /// Position after the turn.
    pub to: Position,
    /// Orientation after the turn.
    pub orientation: Orientation,
}

/// Result of a committed turn, for driving an animation or snapping the
/// rendered cubies into place.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnDelta {
    /// Requested axis.
    pub axis: SignedAxis,
    /// Rotation that was applied to every moved cubie.
    pub turn: QuarterTurn,
    /// Whether the slice matrix was rotated clockwise.
    pub clockwise: bool,
    /// Coordinate of the slice along the axis.
    pub layer: i8,
    /// Every moved cubie, in selection order.
    pub cubies: [CubieMotion; SLICE_LEN],
}
impl TurnDelta {
    /// Returns whether `cubie` was moved by the turn.
    pub fn contains(&self, cubie: CubieId) -> bool {
        self.cubies.iter().any(|m| m.cubie == cubie)
    }
}

/// Turns the slice containing `reference` by a quarter turn around `axis`.
///
/// All 9 cubies are updated together: if any check fails, the state is left
/// untouched and [`crate::CubeError::InvariantViolation`] is returned.
pub fn apply_turn(
    state: &mut CubeState,
    reference: CubieId,
    axis: SignedAxis,
) -> Result<TurnDelta> {
    let selection = select_slice(state, reference, axis.axis)?;
    let clockwise = axis.is_clockwise();
    let turn = axis.quarter_turn();

    let mut positions = [[Position::ORIGIN; LAYER_COUNT]; LAYER_COUNT];
    for (row, ids) in selection.cubies.iter().enumerate() {
        for (col, &id) in ids.iter().enumerate() {
            positions[row][col] = state.cubie(id)?.position;
        }
    }
    let new_positions = rotate_matrix(&positions, clockwise);

    let mut staged = Vec::with_capacity(SLICE_LEN);
    let mut motions = Vec::with_capacity(SLICE_LEN);
    for (row, ids) in selection.cubies.iter().enumerate() {
        for (col, &id) in ids.iter().enumerate() {
            let cubie = state.cubie(id)?;
            let to = new_positions[row][col];
            if to != turn.apply_vector(cubie.position) {
                return Err(invariant_violation!(
                    "{id} would move from {} to {to}, which is not a {turn}",
                    cubie.position,
                ));
            }
            let orientation = cubie.orientation.then(turn);
            staged.push(StagedCubie {
                id,
                position: to,
                orientation,
            });
            motions.push(CubieMotion {
                cubie: id,
                from: cubie.position,
                to,
                orientation,
            });
        }
    }

    state.commit(&staged)?;
    log::trace!("turned slice {}={} around {axis}", axis.axis, selection.layer);

    Ok(TurnDelta {
        axis,
        turn,
        clockwise,
        layer: selection.layer,
        cubies: motions
            .try_into()
            .map_err(|_| invariant_violation!("turn did not move {SLICE_LEN} cubies"))?,
    })
}

/// Turns the slice at coordinate `layer` along `axis`. This is a convenience
/// wrapper around [`apply_turn()`] that uses the cubie on the axis as the
/// reference.
pub fn turn_layer(state: &mut CubeState, axis: SignedAxis, layer: i8) -> Result<TurnDelta> {
    let pos = Position::on_axis(axis.axis, layer);
    let reference = state
        .cubie_at_position(pos)
        .ok_or_else(|| invariant_violation!("no cubie at {pos}"))?;
    apply_turn(state, reference, axis)
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;
    use pretty_assertions::assert_eq;
    use strum::IntoEnumIterator;

    use super::*;
    use crate::{GridCoord, Sign};

    fn all_signed_axes() -> impl Iterator<Item = SignedAxis> {
        Axis::iter().flat_map(|axis| [Sign::Pos, Sign::Neg].map(|sign| SignedAxis::new(axis, sign)))
    }

    #[test]
    fn test_direction_conventions() {
        use Sign::{Neg, Pos};

        let cases = [
            (Axis::X, Pos, true, 90),
            (Axis::X, Neg, false, 90),
            (Axis::Y, Pos, false, 90),
            (Axis::Y, Neg, true, 90),
            (Axis::Z, Pos, false, -90),
            (Axis::Z, Neg, true, -90),
        ];
        for (axis, sign, clockwise, degrees) in cases {
            let signed = SignedAxis::new(axis, sign);
            assert_eq!(signed.is_clockwise(), clockwise, "{signed}");
            assert_eq!(signed.turn_degrees(), degrees, "{signed}");
            assert_eq!(
                signed.quarter_turn().degrees(),
                degrees * sign.int() as i16,
                "{signed}",
            );
            assert_eq!(SignedAxis::from_quarter_turn(signed.quarter_turn()), signed);
        }
    }

    #[test]
    fn test_four_turns_are_identity() {
        for axis in all_signed_axes() {
            for coord in GridCoord::iter_all() {
                let mut state = CubeState::new_solved();
                let reference = state.cubie_at(coord).unwrap();
                for i in 0..4 {
                    let delta = apply_turn(&mut state, reference, axis).unwrap();
                    state.check_invariants().unwrap();
                    assert_eq!(state.is_initial(), i == 3, "{axis} turn #{i} at {coord}");
                    assert!(delta.contains(reference));
                }
            }
        }
    }

    #[test]
    fn test_opposite_axis_undoes_turn() {
        let mut state = CubeState::new_solved();
        let reference = state.cubie_at_position(Position::new(0, 1, 0)).unwrap();
        for axis in all_signed_axes() {
            apply_turn(&mut state, reference, axis).unwrap();
            apply_turn(&mut state, reference, -axis).unwrap();
            assert!(state.is_initial());
        }
    }

    #[test]
    fn test_turn_moves_only_slice() {
        for axis in all_signed_axes() {
            for layer in -1..=1 {
                let mut state = CubeState::new_solved();
                let before = state.snapshot();
                let delta = turn_layer(&mut state, axis, layer).unwrap();
                assert_eq!(delta.layer, layer);

                let moved = delta.cubies.iter().map(|m| m.cubie).collect_vec();
                assert_eq!(moved.len(), 9);
                for (old, new) in before.cubies.iter().zip(state.all_cubies()) {
                    if old.position[axis.axis] == layer {
                        assert!(moved.contains(&old.id));
                        assert_eq!(new.position[axis.axis], layer);
                        assert_eq!(new.orientation, old.orientation.then(delta.turn));
                    } else {
                        assert_eq!(old, new);
                    }
                }
                // Only the cubie on the axis stays put.
                let stationary = delta.cubies.iter().filter(|m| m.from == m.to).count();
                assert_eq!(stationary, 1);
            }
        }
    }

    #[test]
    fn test_turn_delta_matches_state() {
        let mut state = CubeState::new_solved();
        let delta = turn_layer(&mut state, SignedAxis::new(Axis::Z, Sign::Pos), 1).unwrap();
        for motion in delta.cubies {
            let cubie = state.cubie(motion.cubie).unwrap();
            assert_eq!(cubie.position, motion.to);
            assert_eq!(cubie.orientation, motion.orientation);
            assert_eq!(delta.turn.apply_vector(motion.from), motion.to);
        }
    }

    #[test]
    fn test_x_turn_moves_top_to_front() {
        // Positive X rotates Y+ onto Z+ (right-hand rule).
        let mut state = CubeState::new_solved();
        let top = state.cubie_at_position(Position::new(1, 1, 0)).unwrap();
        turn_layer(&mut state, SignedAxis::new(Axis::X, Sign::Pos), 1).unwrap();
        assert_eq!(state.cubie(top).unwrap().position, Position::new(1, 0, 1));
    }
}
