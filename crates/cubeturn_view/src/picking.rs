//! Conversion from raycast results to cube coordinates.

use cgmath::Vector3;
use cubeturn_core::{Axis, Position, Sign, SignedAxis};

/// Maximum distance from the nearest integer for a coordinate to be accepted.
const POSITION_TOLERANCE: f32 = 0.25;

/// Distance to offset a hover marker from a cubie face, so that it is drawn on
/// top of the sticker.
const MARKER_OFFSET: f32 = 0.001;

/// Rounds a cubie center reported by a picker to an integer position. Returns
/// `None` if any coordinate is not close to `-1`, `0`, or `1`.
pub fn quantize_position(v: Vector3<f32>) -> Option<Position> {
    let quantize = |x: f32| -> Option<i8> {
        let rounded = x.round();
        ((x - rounded).abs() <= POSITION_TOLERANCE && (-1.0..=1.0).contains(&rounded))
            .then_some(rounded as i8)
    };
    Some(Position::new(quantize(v.x)?, quantize(v.y)?, quantize(v.z)?))
}

/// Returns the axis-aligned direction nearest to a face normal. Returns `None`
/// if the normal is zero or not finite.
pub fn axis_from_normal(normal: Vector3<f32>) -> Option<SignedAxis> {
    let components = [(Axis::X, normal.x), (Axis::Y, normal.y), (Axis::Z, normal.z)];
    let (axis, value) = components
        .into_iter()
        .filter(|(_, value)| value.is_finite())
        .max_by(|(_, a), (_, b)| a.abs().total_cmp(&b.abs()))?;
    let sign = if value > 0.0 {
        Sign::Pos
    } else if value < 0.0 {
        Sign::Neg
    } else {
        return None;
    };
    Some(SignedAxis::new(axis, sign))
}

/// Returns where to draw a hover marker on the face of the cubie at `pos`
/// that faces `normal`.
pub fn face_marker_position(pos: Position, normal: SignedAxis) -> Vector3<f32> {
    let mut v = crate::animation::position_to_vector(pos);
    v[normal.axis.index()] += normal.sign.int() as f32 * (0.5 + MARKER_OFFSET);
    v
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_quantize_position() {
        assert_eq!(
            quantize_position(Vector3::new(0.98, -1.02, 0.01)),
            Some(Position::new(1, -1, 0)),
        );
        assert_eq!(quantize_position(Vector3::new(2.0, 0.0, 0.0)), None);
        assert_eq!(quantize_position(Vector3::new(0.5, 0.0, 0.0)), None);
        assert_eq!(quantize_position(Vector3::new(f32::NAN, 0.0, 0.0)), None);
    }

    #[test]
    fn test_axis_from_normal() {
        assert_eq!(
            axis_from_normal(Vector3::new(0.1, -0.9, 0.3)),
            Some(SignedAxis::new(Axis::Y, Sign::Neg)),
        );
        assert_eq!(
            axis_from_normal(Vector3::new(0.0, 0.0, 1.0)),
            Some(SignedAxis::new(Axis::Z, Sign::Pos)),
        );
        assert_eq!(axis_from_normal(Vector3::new(0.0, 0.0, 0.0)), None);
    }

    #[test]
    fn test_face_marker_position() {
        let v = face_marker_position(Position::new(1, 0, -1), SignedAxis::new(Axis::X, Sign::Pos));
        assert!((v.x - 1.501).abs() < 1e-6);
        assert_eq!((v.y, v.z), (0.0, -1.0));
    }
}
