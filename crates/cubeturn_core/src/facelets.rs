use std::fmt;

use itertools::Itertools;
use strum::IntoEnumIterator;

use crate::{CubeState, Face, LAYER_COUNT, Position};

type FaceGrid = [[Face; LAYER_COUNT]; LAYER_COUNT];

/// Colors of the 54 visible stickers, indexed by the face they are on.
///
/// Each sticker is named by the face it was on in the solved cube. Each face
/// grid is laid out as seen from outside the cube, with the up face at the
/// top for side faces and the front face towards the bottom for the up face.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Facelets([FaceGrid; 6]);

impl Facelets {
    /// Computes the sticker colors of a cube.
    pub fn from_state(state: &CubeState) -> Self {
        let mut faces = [[[Face::default(); LAYER_COUNT]; LAYER_COUNT]; 6];
        for cubie in state.all_cubies() {
            for home_face in Face::iter() {
                if cubie.home[home_face.axis()] != home_face.sign().int() {
                    continue;
                }
                let face = cubie.orientation.transform_face(home_face);
                let (row, col) = sticker_location(face, cubie.position);
                faces[face as usize][row][col] = home_face;
            }
        }
        Self(faces)
    }

    /// Returns the stickers on one face.
    pub fn face(&self, face: Face) -> &FaceGrid {
        &self.0[face as usize]
    }

    /// Returns whether every face shows a single color.
    pub fn is_solved(&self) -> bool {
        self.0.iter().all(|grid| grid.iter().flatten().all_equal())
    }
}

/// Returns the row and column of the sticker on `face` of the cubie at `pos`.
fn sticker_location(face: Face, pos: Position) -> (usize, usize) {
    let flip = |x: i8| (1 - x) as usize;
    let straight = |x: i8| (x + 1) as usize;
    match face {
        Face::U => (straight(pos.z), straight(pos.x)),
        Face::D => (flip(pos.z), straight(pos.x)),
        Face::F => (flip(pos.y), straight(pos.x)),
        Face::B => (flip(pos.y), flip(pos.x)),
        Face::R => (flip(pos.y), flip(pos.z)),
        Face::L => (flip(pos.y), straight(pos.z)),
    }
}

/// Prints the cube as an unfolded net:
///
/// ```text
///     UUU
///     UUU
///     UUU
/// LLL FFF RRR BBB
/// LLL FFF RRR BBB
/// LLL FFF RRR BBB
///     DDD
///     DDD
///     DDD
/// ```
impl fmt::Display for Facelets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let row_str = |face: Face, row: usize| -> String {
            self.face(face)[row].iter().map(|s| s.symbol()).collect()
        };
        let pad = " ".repeat(LAYER_COUNT + 1);

        for row in 0..LAYER_COUNT {
            writeln!(f, "{pad}{}", row_str(Face::U, row))?;
        }
        for row in 0..LAYER_COUNT {
            let line = [Face::L, Face::F, Face::R, Face::B]
                .into_iter()
                .map(|face| row_str(face, row))
                .join(" ");
            writeln!(f, "{line}")?;
        }
        for row in 0..LAYER_COUNT {
            writeln!(f, "{pad}{}", row_str(Face::D, row))?;
        }
        Ok(())
    }
}

impl CubeState {
    /// Returns the sticker colors of the cube.
    pub fn facelets(&self) -> Facelets {
        Facelets::from_state(self)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{Axis, Sign, SignedAxis, turn_layer};

    #[test]
    fn test_solved_facelets() {
        let facelets = CubeState::new_solved().facelets();
        assert!(facelets.is_solved());
        for face in Face::iter() {
            assert!(facelets.face(face).iter().flatten().all(|&s| s == face));
        }
    }

    #[test]
    fn test_facelets_after_right_turn() {
        let mut state = CubeState::new_solved();
        // Clockwise as seen from the right.
        turn_layer(&mut state, SignedAxis::new(Axis::X, Sign::Neg), 1).unwrap();
        let facelets = state.facelets();
        assert!(!facelets.is_solved());
        assert!(!state.is_solved());
        for row in 0..3 {
            assert_eq!(facelets.face(Face::F)[row], [Face::F, Face::F, Face::D]);
            assert_eq!(facelets.face(Face::U)[row], [Face::U, Face::U, Face::F]);
            assert_eq!(facelets.face(Face::B)[row], [Face::U, Face::B, Face::B]);
        }
        assert!(facelets.face(Face::R).iter().flatten().all(|&s| s == Face::R));
    }

    #[test]
    fn test_whole_cube_rotation_is_solved() {
        let mut state = CubeState::new_solved();
        let axis = SignedAxis::new(Axis::Y, Sign::Pos);
        for layer in -1..=1 {
            turn_layer(&mut state, axis, layer).unwrap();
        }
        assert!(!state.is_initial());
        assert!(state.is_solved());
    }

    #[test]
    fn test_display_net() {
        let net = CubeState::new_solved().facelets().to_string();
        let lines: Vec<&str> = net.lines().collect();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "    UUU");
        assert_eq!(lines[4], "LLL FFF RRR BBB");
        assert_eq!(lines[8], "    DDD");
    }
}
