//! Integer geometry: axes, faces, quarter turns, and orientations.
//!
//! Coordinates are right-handed: X points right, Y points up, and Z points
//! towards the viewer.

use std::fmt;
use std::ops::{Index, IndexMut, Neg};

use strum::{EnumIter, IntoEnumIterator};

/// Positive or negative.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(i8)]
pub enum Sign {
    /// Negative.
    Neg = -1,
    /// Positive.
    Pos = 1,
}
impl Neg for Sign {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self {
            Sign::Neg => Sign::Pos,
            Sign::Pos => Sign::Neg,
        }
    }
}
impl Sign {
    /// Returns the sign of `x`, or `None` if `x` is zero.
    pub fn of(x: i8) -> Option<Self> {
        match x.signum() {
            1 => Some(Sign::Pos),
            -1 => Some(Sign::Neg),
            _ => None,
        }
    }
    /// Returns `1` or `-1`.
    pub fn int(self) -> i8 {
        self as i8
    }
    /// Returns `x` multiplied by the sign.
    pub fn apply(self, x: i8) -> i8 {
        x * self.int()
    }
}

/// 3-dimensional axis.
#[derive(EnumIter, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Axis {
    /// X axis (right).
    X = 0,
    /// Y axis (up).
    Y = 1,
    /// Z axis (towards the camera).
    Z = 2,
}
impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "X"),
            Axis::Y => write!(f, "Y"),
            Axis::Z => write!(f, "Z"),
        }
    }
}
impl Axis {
    /// Returns the index of the axis (0, 1, or 2).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Returns the perpendicular axes from this one, using the right-hand
    /// rule. A positive quarter turn around `self` rotates the first returned
    /// axis onto the second.
    pub fn perpendiculars(self) -> [Axis; 2] {
        use Axis::*;
        match self {
            X => [Y, Z], // X+ => rotate from Y+ to Z+.
            Y => [Z, X], // Y+ => rotate from Z+ to X+.
            Z => [X, Y], // Z+ => rotate from X+ to Y+.
        }
    }
}

/// Integer position of a cubie center in cube space. Each coordinate is in
/// the range `-1..=1` for cubies that are part of the cube.
///
/// The derived ordering compares `x`, then `y`, then `z`.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    /// X coordinate.
    pub x: i8,
    /// Y coordinate.
    pub y: i8,
    /// Z coordinate.
    pub z: i8,
}
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}
impl Index<Axis> for Position {
    type Output = i8;

    fn index(&self, axis: Axis) -> &Self::Output {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
            Axis::Z => &self.z,
        }
    }
}
impl IndexMut<Axis> for Position {
    fn index_mut(&mut self, axis: Axis) -> &mut Self::Output {
        match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
            Axis::Z => &mut self.z,
        }
    }
}
impl Position {
    /// Center of the cube.
    pub const ORIGIN: Self = Self::new(0, 0, 0);

    /// Constructs a position.
    pub const fn new(x: i8, y: i8, z: i8) -> Self {
        Self { x, y, z }
    }
    /// Returns the position with a single nonzero coordinate.
    pub fn on_axis(axis: Axis, value: i8) -> Self {
        let mut ret = Self::ORIGIN;
        ret[axis] = value;
        ret
    }

    /// Returns whether every coordinate is in the range `-1..=1`.
    pub fn is_in_cube(self) -> bool {
        [self.x, self.y, self.z]
            .iter()
            .all(|c| (-1..=1).contains(c))
    }
}

/// Face of the cube, named after standard move notation.
#[derive(EnumIter, Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Face {
    /// Right (X+).
    #[default]
    R,
    /// Left (X-).
    L,
    /// Up (Y+).
    U,
    /// Down (Y-).
    D,
    /// Front (Z+).
    F,
    /// Back (Z-).
    B,
}
impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
impl Face {
    /// Returns the face on the given side of an axis.
    pub fn new(axis: Axis, sign: Sign) -> Self {
        use Face::*;

        match (axis, sign) {
            (Axis::X, Sign::Pos) => R,
            (Axis::X, Sign::Neg) => L,
            (Axis::Y, Sign::Pos) => U,
            (Axis::Y, Sign::Neg) => D,
            (Axis::Z, Sign::Pos) => F,
            (Axis::Z, Sign::Neg) => B,
        }
    }

    /// Returns the axis perpendicular to the face.
    pub fn axis(self) -> Axis {
        use Face::*;

        match self {
            R | L => Axis::X,
            U | D => Axis::Y,
            F | B => Axis::Z,
        }
    }
    /// Returns which side of its axis the face is on.
    pub fn sign(self) -> Sign {
        use Face::*;

        match self {
            R | U | F => Sign::Pos,
            L | D | B => Sign::Neg,
        }
    }
    /// Returns the outward normal of the face.
    pub fn normal(self) -> SignedAxis {
        SignedAxis::new(self.axis(), self.sign())
    }
    /// Returns the opposite face.
    #[must_use]
    pub fn opposite(self) -> Self {
        Self::new(self.axis(), -self.sign())
    }

    /// Returns the uppercase notation symbol for the face.
    pub fn symbol(self) -> char {
        use Face::*;

        match self {
            R => 'R',
            L => 'L',
            U => 'U',
            D => 'D',
            F => 'F',
            B => 'B',
        }
    }
    /// Returns the face with the given uppercase or lowercase symbol.
    pub fn from_symbol(c: char) -> Option<Self> {
        Self::iter().find(|face| face.symbol() == c.to_ascii_uppercase())
    }
    /// Returns the human-friendly name of the face.
    pub fn name(self) -> &'static str {
        use Face::*;

        match self {
            R => "Right",
            L => "Left",
            U => "Up",
            D => "Down",
            F => "Front",
            B => "Back",
        }
    }

    /// Returns the position of the center cubie on this face.
    pub fn center(self) -> Position {
        self.normal().vector()
    }
}

/// Unit vector along an axis, either positive or negative.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SignedAxis {
    /// Axis.
    pub axis: Axis,
    /// Direction along the axis.
    pub sign: Sign,
}
impl fmt::Display for SignedAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.sign {
            Sign::Pos => write!(f, "+{}", self.axis),
            Sign::Neg => write!(f, "-{}", self.axis),
        }
    }
}
impl Neg for SignedAxis {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::new(self.axis, -self.sign)
    }
}
impl SignedAxis {
    /// Constructs a signed axis.
    pub const fn new(axis: Axis, sign: Sign) -> Self {
        Self { axis, sign }
    }
    /// Returns the signed axis for a unit vector, or `None` if `v` is not a
    /// unit vector along a single axis.
    pub fn from_vector(v: Position) -> Option<Self> {
        let mut nonzero = Axis::iter().filter(|&axis| v[axis] != 0);
        let axis = nonzero.next()?;
        if nonzero.next().is_some() || v[axis].abs() != 1 {
            return None;
        }
        Some(Self::new(axis, Sign::of(v[axis])?))
    }
    /// Returns the unit vector.
    pub fn vector(self) -> Position {
        Position::on_axis(self.axis, self.sign.int())
    }
}

/// Rotation by 90 degrees around a world axis.
///
/// [`Sign::Pos`] is a counterclockwise rotation when looking down from the
/// positive end of the axis (right-hand rule).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuarterTurn {
    /// Axis of rotation.
    pub axis: Axis,
    /// Direction of rotation around the positive axis.
    pub sign: Sign,
}
impl fmt::Display for QuarterTurn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+} around {}", self.degrees(), self.axis)
    }
}
impl QuarterTurn {
    /// Constructs a quarter turn.
    pub const fn new(axis: Axis, sign: Sign) -> Self {
        Self { axis, sign }
    }

    /// Returns the quarter turn in the opposite direction.
    #[must_use]
    pub fn inverse(self) -> Self {
        Self::new(self.axis, -self.sign)
    }

    /// Returns the rotation angle around the positive axis, in degrees.
    pub fn degrees(self) -> i16 {
        90 * self.sign.int() as i16
    }

    /// Rotates a position.
    pub fn apply_vector(self, v: Position) -> Position {
        let [a, b] = self.axis.perpendiculars();
        let mut ret = v;
        match self.sign {
            Sign::Pos => {
                ret[b] = v[a];
                ret[a] = -v[b];
            }
            Sign::Neg => {
                ret[b] = -v[a];
                ret[a] = v[b];
            }
        }
        ret
    }

    /// Returns the face that `face` ends up pointing towards.
    pub fn apply_face(self, face: Face) -> Face {
        let [a, b] = self.axis.perpendiculars();
        let axis = face.axis();
        let sign = face.sign();
        if axis == a {
            match self.sign {
                Sign::Pos => Face::new(b, sign),
                Sign::Neg => Face::new(b, -sign),
            }
        } else if axis == b {
            match self.sign {
                Sign::Pos => Face::new(a, -sign),
                Sign::Neg => Face::new(a, sign),
            }
        } else {
            face
        }
    }
}

/// Orientation of a cubie, stored as the faces towards which its original X+,
/// Y+, and Z+ directions currently point.
///
/// This is always a composition of quarter turns, so it never accumulates
/// rounding error.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Orientation([Face; 3]);
impl Default for Orientation {
    fn default() -> Self {
        Self::IDENTITY
    }
}
impl Index<Axis> for Orientation {
    type Output = Face;

    fn index(&self, axis: Axis) -> &Self::Output {
        &self.0[axis.index()]
    }
}
impl Orientation {
    /// Orientation of a cubie that has not been turned.
    pub const IDENTITY: Self = Self([Face::R, Face::U, Face::F]);

    /// Returns whether this is the identity orientation.
    pub fn is_identity(self) -> bool {
        self == Self::IDENTITY
    }

    /// Returns the orientation after applying `turn`.
    #[must_use]
    pub fn then(self, turn: QuarterTurn) -> Self {
        Self(self.0.map(|face| turn.apply_face(face)))
    }

    /// Returns the face that a sticker originally on `face` now points
    /// towards.
    pub fn transform_face(self, face: Face) -> Face {
        let current = self[face.axis()];
        match face.sign() {
            Sign::Pos => current,
            Sign::Neg => current.opposite(),
        }
    }

    /// Rotates a vector from the cubie's original frame into world space.
    pub fn transform_vector(self, v: Position) -> Position {
        let mut ret = Position::ORIGIN;
        for axis in Axis::iter() {
            let face = self[axis];
            ret[face.axis()] += face.sign().apply(v[axis]);
        }
        ret
    }

    /// Returns the columns of the rotation matrix, one per original axis.
    pub fn columns(self) -> [Position; 3] {
        self.0.map(|face| face.normal().vector())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quarter_turn_vectors() {
        let x = Position::new(1, 0, 0);
        let y = Position::new(0, 1, 0);
        let z = Position::new(0, 0, 1);

        let turn = QuarterTurn::new(Axis::X, Sign::Pos);
        assert_eq!(turn.apply_vector(y), z);
        assert_eq!(turn.apply_vector(z), Position::new(0, -1, 0));
        assert_eq!(turn.apply_vector(x), x);

        let turn = QuarterTurn::new(Axis::Y, Sign::Pos);
        assert_eq!(turn.apply_vector(z), x);
        assert_eq!(turn.apply_vector(x), Position::new(0, 0, -1));

        let turn = QuarterTurn::new(Axis::Z, Sign::Neg);
        assert_eq!(turn.apply_vector(y), x);
        assert_eq!(turn.apply_vector(x), Position::new(0, -1, 0));
    }

    #[test]
    fn test_quarter_turn_faces_match_vectors() {
        for axis in Axis::iter() {
            for sign in [Sign::Pos, Sign::Neg] {
                let turn = QuarterTurn::new(axis, sign);
                for face in Face::iter() {
                    let expected = turn.apply_vector(face.center());
                    assert_eq!(turn.apply_face(face).center(), expected, "{face} under {turn:?}");
                }
            }
        }
    }

    #[test]
    fn test_orientation_cycles() {
        for axis in Axis::iter() {
            let turn = QuarterTurn::new(axis, Sign::Pos);
            let mut o = Orientation::IDENTITY;
            for _ in 0..3 {
                o = o.then(turn);
                assert!(!o.is_identity());
            }
            assert!(o.then(turn).is_identity());
            assert!(Orientation::IDENTITY.then(turn).then(turn.inverse()).is_identity());
        }
    }

    #[test]
    fn test_orientation_transform() {
        let v = Position::new(1, -1, 1);
        let turns = [
            QuarterTurn::new(Axis::X, Sign::Pos),
            QuarterTurn::new(Axis::Z, Sign::Neg),
            QuarterTurn::new(Axis::Y, Sign::Pos),
        ];
        let mut o = Orientation::IDENTITY;
        let mut expected = v;
        for turn in turns {
            o = o.then(turn);
            expected = turn.apply_vector(expected);
            assert_eq!(o.transform_vector(v), expected);
        }
        for face in Face::iter() {
            assert_eq!(o.transform_face(face).center(), o.transform_vector(face.center()));
        }
    }

    #[test]
    fn test_signed_axis_from_vector() {
        assert_eq!(
            SignedAxis::from_vector(Position::new(0, -1, 0)),
            Some(SignedAxis::new(Axis::Y, Sign::Neg)),
        );
        assert_eq!(SignedAxis::from_vector(Position::new(0, 0, 0)), None);
        assert_eq!(SignedAxis::from_vector(Position::new(1, 1, 0)), None);
        assert_eq!(SignedAxis::from_vector(Position::new(0, 0, 2)), None);
        assert_eq!(SignedAxis::new(Axis::Z, Sign::Pos).to_string(), "+Z");
    }

    #[test]
    fn test_face_symbols() {
        for face in Face::iter() {
            assert_eq!(Face::from_symbol(face.symbol()), Some(face));
            assert_eq!(Face::from_symbol(face.symbol().to_ascii_lowercase()), Some(face));
            assert_eq!(face.opposite().opposite(), face);
        }
        assert_eq!(Face::from_symbol('x'), None);
    }
}
