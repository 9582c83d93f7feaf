use std::cmp::Reverse;

use itertools::Itertools;

use crate::matrix::matrix_from_row_major;
use crate::{Axis, CubeState, CubieId, LAYER_COUNT, Position, Result, SLICE_LEN};

/// Slice of 9 cubies selected for a turn.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Axis perpendicular to the slice.
    pub axis: Axis,
    /// Coordinate of the slice along `axis` (`-1`, `0`, or `1`).
    pub layer: i8,
    /// Cubies in the slice, ordered by descending position and then laid out
    /// row-major.
    pub cubies: [[CubieId; LAYER_COUNT]; LAYER_COUNT],
}
impl Selection {
    /// Returns the selected cubies in row-major order.
    pub fn iter(&self) -> impl '_ + Iterator<Item = CubieId> {
        self.cubies.iter().flatten().copied()
    }
}

/// Selects the 9 cubies that share `reference`'s coordinate along `axis`.
///
/// Cubies are sorted by position in descending `(x, y, z)` order and then
/// laid out row-major. [`crate::apply_turn()`] depends on this layout.
///
/// Returns [`crate::CubeError::InvariantViolation`] if the slice does not
/// contain exactly 9 cubies.
pub fn select_slice(state: &CubeState, reference: CubieId, axis: Axis) -> Result<Selection> {
    let layer = state.cubie(reference)?.position[axis];

    let members: Vec<(Position, CubieId)> = state
        .all_cubies()
        .iter()
        .filter(|cubie| cubie.position[axis] == layer)
        .map(|cubie| (cubie.position, cubie.id))
        .sorted_by_key(|&(pos, _)| Reverse(pos))
        .collect();

    if members.len() != SLICE_LEN {
        return Err(invariant_violation!(
            "slice {axis}={layer} contains {} cubies instead of {SLICE_LEN}",
            members.len(),
        ));
    }

    let cubies = matrix_from_row_major(members.into_iter().map(|(_, id)| id))
        .ok_or_else(|| invariant_violation!("slice {axis}={layer} is not square"))?;

    Ok(Selection {
        axis,
        layer,
        cubies,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{CubeError, GridCoord};

    fn positions(state: &CubeState, selection: &Selection) -> Vec<Position> {
        selection
            .iter()
            .map(|id| state.cubie(id).unwrap().position)
            .collect()
    }

    #[test]
    fn test_select_x_slice_ordering() {
        let state = CubeState::new_solved();
        let reference = state.cubie_at_position(Position::new(1, 0, 0)).unwrap();
        let selection = select_slice(&state, reference, Axis::X).unwrap();
        assert_eq!(selection.layer, 1);
        assert_eq!(
            positions(&state, &selection),
            vec![
                Position::new(1, 1, 1),
                Position::new(1, 1, 0),
                Position::new(1, 1, -1),
                Position::new(1, 0, 1),
                Position::new(1, 0, 0),
                Position::new(1, 0, -1),
                Position::new(1, -1, 1),
                Position::new(1, -1, 0),
                Position::new(1, -1, -1),
            ],
        );
    }

    #[test]
    fn test_select_uses_reference_layer() {
        let state = CubeState::new_solved();
        for axis in [Axis::X, Axis::Y, Axis::Z] {
            for coord in GridCoord::iter_all() {
                let reference = state.cubie_at(coord).unwrap();
                let selection = select_slice(&state, reference, axis).unwrap();
                assert!(selection.iter().contains(&reference));
                let layer = coord.to_position()[axis];
                assert!(
                    positions(&state, &selection)
                        .iter()
                        .all(|pos| pos[axis] == layer)
                );
                assert!(selection.iter().all_unique());
            }
        }
    }

    #[test]
    fn test_select_unknown_reference() {
        let state = CubeState::new_solved();
        assert_eq!(
            select_slice(&state, CubieId(99), Axis::Y),
            Err(CubeError::NotFound(CubieId(99))),
        );
    }
}
