use itertools::Itertools;

use crate::{
    CUBIE_COUNT, CubeError, Cubie, CubieId, GridCoord, LAYER_COUNT, Orientation, Position,
    Result,
};

type Grid = [[[CubieId; LAYER_COUNT]; LAYER_COUNT]; LAYER_COUNT];

/// New location for a cubie, staged by the turn engine before being
/// committed.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct StagedCubie {
    pub id: CubieId,
    pub position: Position,
    pub orientation: Orientation,
}

/// State of a 3x3x3 cube: which cubie is in each grid cell, and where each
/// cubie is and how it is rotated.
///
/// The grid is the canonical index; cubie positions are cached alongside it
/// and are always consistent with it after a committed turn.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CubeState {
    /// Cubie in each cell, indexed by `[row][col][layer]`.
    grid: Grid,
    /// Every cubie, indexed by ID.
    cubies: Vec<Cubie>,
}

impl Default for CubeState {
    fn default() -> Self {
        Self::new_solved()
    }
}

impl CubeState {
    /// Assembles a solved cube. Cubie IDs are assigned in the order of
    /// [`GridCoord::iter_all()`].
    pub fn new_solved() -> Self {
        let mut grid = [[[CubieId(0); LAYER_COUNT]; LAYER_COUNT]; LAYER_COUNT];
        let mut cubies = Vec::with_capacity(CUBIE_COUNT);
        for (i, coord) in GridCoord::iter_all().enumerate() {
            let id = CubieId(i as u8);
            grid[coord.row as usize][coord.col as usize][coord.layer as usize] = id;
            cubies.push(Cubie::new(id, coord.to_position()));
        }
        Self { grid, cubies }
    }

    /// Returns the cubie in a grid cell, or `None` if the coordinate is out of
    /// range.
    pub fn cubie_at(&self, coord: GridCoord) -> Option<CubieId> {
        self.grid
            .get(coord.row as usize)?
            .get(coord.col as usize)?
            .get(coord.layer as usize)
            .copied()
    }
    /// Returns the cubie at a world position, or `None` if the position is
    /// outside the cube.
    pub fn cubie_at_position(&self, pos: Position) -> Option<CubieId> {
        self.cubie_at(GridCoord::from_position(pos)?)
    }

    /// Returns the grid cell containing a cubie.
    pub fn coord_of(&self, id: CubieId) -> Result<GridCoord> {
        let cubie = self.cubie(id)?;
        cubie
            .coord()
            .ok_or_else(|| invariant_violation!("{id} is outside the grid at {}", cubie.position))
    }

    /// Returns a cubie by ID.
    pub fn cubie(&self, id: CubieId) -> Result<&Cubie> {
        self.cubies.get(id.index()).ok_or(CubeError::NotFound(id))
    }

    /// Returns every cubie, ordered by ID.
    pub fn all_cubies(&self) -> &[Cubie] {
        &self.cubies
    }

    /// Returns whether every cubie is in its home position with its original
    /// orientation.
    ///
    /// This is stricter than [`CubeState::is_solved()`], which ignores
    /// rotations of the whole cube.
    pub fn is_initial(&self) -> bool {
        self.cubies.iter().all(|cubie| cubie.is_home())
    }

    /// Returns whether every face shows a single color.
    pub fn is_solved(&self) -> bool {
        self.facelets().is_solved()
    }

    /// Returns a read-only copy of every cubie's position and orientation.
    pub fn snapshot(&self) -> CubeSnapshot {
        CubeSnapshot {
            cubies: self.cubies.clone(),
        }
    }

    /// Checks that the grid and the cubie list describe the same bijection
    /// between cubies and grid cells, and that every cubie's position agrees
    /// with its orientation.
    pub fn check_invariants(&self) -> Result<()> {
        if self.cubies.len() != CUBIE_COUNT {
            return Err(invariant_violation!(
                "expected {CUBIE_COUNT} cubies, found {}",
                self.cubies.len(),
            ));
        }

        let mut seen = [false; CUBIE_COUNT];
        for coord in GridCoord::iter_all() {
            let id = self
                .cubie_at(coord)
                .ok_or_else(|| invariant_violation!("missing grid cell {coord}"))?;
            let cubie = self.cubie(id).map_err(|_| {
                invariant_violation!("grid cell {coord} refers to unknown {id}")
            })?;
            if std::mem::replace(&mut seen[id.index()], true) {
                return Err(invariant_violation!("{id} appears more than once in the grid"));
            }
            if cubie.id != id {
                return Err(invariant_violation!("{id} is stored as {}", cubie.id));
            }
            if cubie.position != coord.to_position() {
                return Err(invariant_violation!(
                    "{id} is in grid cell {coord} but has position {}",
                    cubie.position,
                ));
            }
            if cubie.orientation.transform_vector(cubie.home) != cubie.position {
                return Err(invariant_violation!(
                    "{id} at {} has orientation {:?} inconsistent with home {}",
                    cubie.position,
                    cubie.orientation,
                    cubie.home,
                ));
            }
        }

        Ok(())
    }

    /// Moves a set of cubies, all at once.
    ///
    /// The staged cubies must be distinct and must end up occupying exactly
    /// the cells they currently occupy. Nothing is modified unless every
    /// check passes.
    pub(crate) fn commit(&mut self, staged: &[StagedCubie]) -> Result<()> {
        if !staged.iter().map(|s| s.id).all_unique() {
            return Err(invariant_violation!("a cubie was staged twice"));
        }

        let mut vacated = Vec::with_capacity(staged.len());
        let mut targets = Vec::with_capacity(staged.len());
        for s in staged {
            vacated.push(self.coord_of(s.id)?);
            targets.push(GridCoord::from_position(s.position).ok_or_else(|| {
                invariant_violation!("{} would move outside the grid to {}", s.id, s.position)
            })?);
        }
        vacated.sort();
        if vacated != targets.iter().copied().sorted().collect_vec() {
            return Err(invariant_violation!(
                "turn does not map the selected cells onto themselves"
            ));
        }

        for (s, c) in staged.iter().zip(targets) {
            let cubie = &mut self.cubies[s.id.index()];
            cubie.position = s.position;
            cubie.orientation = s.orientation;
            self.grid[c.row as usize][c.col as usize][c.layer as usize] = s.id;
        }

        Ok(())
    }
}

/// Immutable copy of every cubie's position and orientation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CubeSnapshot {
    /// Every cubie, ordered by ID.
    pub cubies: Vec<Cubie>,
}
impl CubeSnapshot {
    /// Returns a cubie by ID.
    pub fn get(&self, id: CubieId) -> Option<&Cubie> {
        self.cubies.get(id.index())
    }
}
