use std::fmt;

use itertools::iproduct;

use crate::{LAYER_COUNT, Orientation, Position};

/// Stable handle for one of the 27 cubies.
///
/// Cubie IDs are assigned once when the cube is assembled and never change,
/// no matter where the cubie moves.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CubieId(pub u8);
impl fmt::Display for CubieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cubie #{}", self.0)
    }
}
impl CubieId {
    /// Returns the index of the cubie in a flat list.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Location of a cell in the 3x3x3 grid.
///
/// `col`, `row`, and `layer` run along X, Y, and Z respectively, each in the
/// range `0..3`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridCoord {
    /// Index along Y.
    pub row: u8,
    /// Index along X.
    pub col: u8,
    /// Index along Z.
    pub layer: u8,
}
impl fmt::Display for GridCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.row, self.col, self.layer)
    }
}
impl GridCoord {
    /// Constructs a grid coordinate.
    pub const fn new(row: u8, col: u8, layer: u8) -> Self {
        Self { row, col, layer }
    }

    /// Returns the world position of the center of the cell.
    pub fn to_position(self) -> Position {
        Position::new(
            self.col as i8 - 1,
            self.row as i8 - 1,
            self.layer as i8 - 1,
        )
    }
    /// Returns the grid cell at a world position, or `None` if the position
    /// is outside the cube.
    pub fn from_position(pos: Position) -> Option<Self> {
        pos.is_in_cube().then(|| {
            Self::new(
                (pos.y + 1) as u8,
                (pos.x + 1) as u8,
                (pos.z + 1) as u8,
            )
        })
    }

    /// Returns an iterator over all 27 grid coordinates, in the same order as
    /// cubies are numbered in a solved cube.
    pub fn iter_all() -> impl Iterator<Item = Self> {
        let n = LAYER_COUNT as u8;
        iproduct!(0..n, 0..n, 0..n).map(|(row, col, layer)| Self::new(row, col, layer))
    }
}

/// One of the 27 unit pieces of the cube.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cubie {
    /// Stable identity.
    pub id: CubieId,
    /// Position in the solved cube.
    pub home: Position,
    /// Current position.
    pub position: Position,
    /// Accumulated rotation since assembly.
    pub orientation: Orientation,
}
impl Cubie {
    pub(crate) fn new(id: CubieId, home: Position) -> Self {
        Self {
            id,
            home,
            position: home,
            orientation: Orientation::IDENTITY,
        }
    }

    /// Returns the current grid coordinate of the cubie, or `None` if its
    /// position is outside the cube.
    pub fn coord(&self) -> Option<GridCoord> {
        GridCoord::from_position(self.position)
    }

    /// Returns whether the cubie is in its home position with its original
    /// orientation.
    pub fn is_home(&self) -> bool {
        self.position == self.home && self.orientation.is_identity()
    }

    /// Returns the number of stickers on the cubie: 3 for corners, 2 for
    /// edges, 1 for centers, and 0 for the core.
    pub fn sticker_count(&self) -> usize {
        [self.home.x, self.home.y, self.home.z]
            .iter()
            .filter(|&&c| c != 0)
            .count()
    }
}
