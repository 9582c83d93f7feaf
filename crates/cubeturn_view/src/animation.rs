//! Turn animation helpers for renderers.

use std::f32::consts::PI;

use cgmath::{Deg, InnerSpace, Matrix3, Quaternion, Rotation, Rotation3, Vector3};
use cubeturn_core::{CubieId, Orientation, Position, TurnDelta};
use serde::{Deserialize, Serialize};
use web_time::Duration;

/// Higher number means faster exponential increase in twist speed.
const EXP_TWIST_FACTOR: f32 = 0.5;

/// Function that maps a float from the range 0.0 to 1.0 to another float
/// from 0.0 to 1.0.
#[derive(Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum InterpolateFn {
    /// Constant speed.
    Lerp,
    /// Cosine from 0 to π.
    #[default]
    Cosine,
    /// Smoothstep.
    Cubic,
}
impl InterpolateFn {
    /// Returns the interpolation value in the range [0, 1] for `t` in the
    /// range [0, 1].
    pub fn interpolate(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Lerp => t,
            Self::Cosine => (1.0 - (t * PI).cos()) / 2.0,
            Self::Cubic => (3.0 - 2.0 * t) * t * t,
        }
    }
}

/// Animation preferences.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AnimationPreferences {
    /// Whether to twist faster when many twists are queued.
    pub dynamic_twist_speed: bool,
    /// Duration of a single twist, in seconds.
    pub twist_duration: f32,
    /// Easing function for twists.
    pub twist_interpolation: InterpolateFn,
}
impl Default for AnimationPreferences {
    fn default() -> Self {
        Self {
            dynamic_twist_speed: true,
            twist_duration: 0.2,
            twist_interpolation: InterpolateFn::Cosine,
        }
    }
}
impl AnimationPreferences {
    /// Returns how long to spend animating one twist when `queue_max` twists
    /// are (or were recently) queued.
    pub fn duration_for_queue(&self, queue_max: usize) -> Duration {
        let speed_mod = match self.dynamic_twist_speed {
            true => (queue_max.saturating_sub(1) as f32 * EXP_TWIST_FACTOR).exp(),
            false => 1.0,
        };
        let secs = self.twist_duration / speed_mod;
        // Handle negative or NaN durations.
        if secs.is_finite() && secs > 0.0 {
            Duration::from_secs_f32(secs)
        } else {
            Duration::ZERO
        }
    }
}

/// In-progress animation of a single committed turn.
#[derive(Debug, Clone)]
pub struct TurnAnimation {
    /// Turn being animated.
    pub delta: TurnDelta,
    /// Easing function.
    pub interpolate: InterpolateFn,
}
impl TurnAnimation {
    /// Constructs an animation for a turn.
    pub fn new(delta: TurnDelta, interpolate: InterpolateFn) -> Self {
        Self { delta, interpolate }
    }

    /// Returns the partial rotation of the turning slice at progress `t`
    /// (from 0.0 to 1.0).
    pub fn rotation(&self, t: f32) -> Quaternion<f32> {
        let axis = position_to_vector(Position::on_axis(self.delta.turn.axis, 1));
        let angle = self.delta.turn.degrees() as f32 * self.interpolate.interpolate(t);
        Quaternion::from_axis_angle(axis.normalize(), Deg(angle))
    }

    /// Returns the rotation and center position of a cubie at progress `t`,
    /// or `None` if the cubie is not part of the turn.
    ///
    /// The rotation is relative to the cubie's orientation before the turn.
    /// At `t = 1.0` the position is the cubie's new position.
    pub fn cubie_transform(&self, cubie: CubieId, t: f32) -> Option<(Quaternion<f32>, Vector3<f32>)> {
        let motion = self.delta.cubies.iter().find(|m| m.cubie == cubie)?;
        let rot = self.rotation(t);
        let pos = rot.rotate_vector(position_to_vector(motion.from));
        Some((rot, pos))
    }
}

/// Converts an integer position to a float vector.
pub fn position_to_vector(pos: Position) -> Vector3<f32> {
    Vector3::new(pos.x as f32, pos.y as f32, pos.z as f32)
}

/// Returns the rotation of a cubie with orientation `orientation`.
pub fn orientation_quaternion(orientation: Orientation) -> Quaternion<f32> {
    let [x, y, z] = orientation.columns().map(position_to_vector);
    Quaternion::from(Matrix3::from_cols(x, y, z))
}
