use std::path::Path;

use bevy::{
    math::Quat,
    prelude::Resource,
    reflect::{Reflect, std_traits::ReflectDefault},
};
use serde::{Deserialize, Serialize};

use super::{
    classification::Side, errors::ConfigResult, mirroring::SideNamePattern,
    orientation::from_euler_xyz_degrees,
};

/// Order in which the four components of a pose-source orientation are stored.
#[derive(Reflect, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[reflect(Default)]
pub enum QuatOrder {
    #[default]
    Xyzw,
    Wxyz,
}

impl QuatOrder {
    /// Builds a quaternion from raw components. The result is not normalized.
    pub fn to_quat(self, components: [f32; 4]) -> Quat {
        let [a, b, c, d] = components;
        match self {
            QuatOrder::Xyzw => Quat::from_xyzw(a, b, c, d),
            QuatOrder::Wxyz => Quat::from_xyzw(b, c, d, a),
        }
    }

    pub fn from_quat(self, q: Quat) -> [f32; 4] {
        match self {
            QuatOrder::Xyzw => [q.x, q.y, q.z, q.w],
            QuatOrder::Wxyz => [q.w, q.x, q.y, q.z],
        }
    }
}

/// How a local delta is combined with the bind orientation.
#[derive(Reflect, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[reflect(Default)]
pub enum DeltaComposition {
    /// `delta * bind`
    #[default]
    PreMultiply,
    /// `bind * delta`
    PostMultiply,
}

impl DeltaComposition {
    pub fn compose(self, bind: Quat, delta: Quat) -> Quat {
        match self {
            DeltaComposition::PreMultiply => delta * bind,
            DeltaComposition::PostMultiply => bind * delta,
        }
    }
}

#[derive(Reflect, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[reflect(Default)]
pub enum RootRotationMode {
    #[default]
    Free,
    /// Adds a half turn about `Z` in the source basis, for captures whose up axis is flipped.
    FixedUp,
}

/// Euler angles in degrees, applied in `X`, `Y`, `Z` order.
#[derive(Reflect, Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[reflect(Default)]
pub struct EulerOffset {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl EulerOffset {
    pub const ZERO: Self = Self::new(0., 0., 0.);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
            z: self.z + (other.z - self.z) * t,
        }
    }

    pub fn to_quat(self) -> Quat {
        from_euler_xyz_degrees(self.x, self.y, self.z)
    }

    pub fn is_zero(self) -> bool {
        self == Self::ZERO
    }
}

#[derive(Reflect, Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[reflect(Default)]
pub struct SideOffsets {
    pub left: EulerOffset,
    pub right: EulerOffset,
}

impl SideOffsets {
    pub const fn new(left: EulerOffset, right: EulerOffset) -> Self {
        Self { left, right }
    }

    pub fn for_side(&self, side: Side) -> EulerOffset {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }
}

/// Clamped linear remap of a value onto `[0, 1]`.
#[derive(Reflect, Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[reflect(Default)]
pub struct PoseFactorWindow {
    pub lower: f32,
    pub upper: f32,
}

impl Default for PoseFactorWindow {
    fn default() -> Self {
        Self {
            lower: 0.40,
            upper: 0.75,
        }
    }
}

impl PoseFactorWindow {
    /// Values at or below `lower` map to 0, at or above `upper` to 1. An empty or inverted
    /// window degrades to a step at `lower`.
    pub fn remap(&self, value: f32) -> f32 {
        if !value.is_finite() {
            return 0.;
        }
        if self.upper <= self.lower {
            return if value >= self.lower { 1. } else { 0. };
        }
        ((value - self.lower) / (self.upper - self.lower)).clamp(0., 1.)
    }
}

/// Tuning constants of the retargeting engine.
///
/// The defaults are calibration data for pose estimators that emit SMPL-style local axis-angle
/// rotations, applied onto Mixamo-style rigs. They are empirical and should be changed as a set.
///
/// Stored as RON, typically in a `*.retarget.ron` file. Every field is optional.
#[derive(Resource, Reflect, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[reflect(Default)]
#[serde(default)]
pub struct RetargetConfig {
    pub input_quat_order: QuatOrder,
    /// Restore every joint to its bind orientation before applying a foreign pose.
    pub reset_to_bind_each_application: bool,
    /// Put the skeleton in its rest pose before the bind snapshot is taken.
    pub force_rest_pose_on_bind_capture: bool,
    pub delta_composition: DeltaComposition,
    pub delta_invert: bool,
    pub enable_local_swizzle: bool,
    pub enable_finger_swizzle: bool,
    pub enable_finger_animation: bool,
    /// Sign applied to the finger twist component. Flip it if fingers curl backwards.
    pub finger_curl_sign: f32,
    pub extra_global_yaw_deg: f32,
    pub root_invert: bool,
    pub root_apply_local_swizzle: bool,
    pub root_rotation_mode: RootRotationMode,
    pub arm_down_fix: SideOffsets,
    pub arm_up_fix: SideOffsets,
    pub forearm_fix: SideOffsets,
    pub hand_fix: EulerOffset,
    pub leg_fix: EulerOffset,
    pub pose_factor_window: PoseFactorWindow,
    /// When set, only the joint whose name token normalizes to this value is applied.
    pub only_joint: Option<String>,
    pub side_names: SideNamePattern,
}

impl Default for RetargetConfig {
    fn default() -> Self {
        Self {
            input_quat_order: QuatOrder::Xyzw,
            reset_to_bind_each_application: true,
            force_rest_pose_on_bind_capture: true,
            delta_composition: DeltaComposition::PreMultiply,
            delta_invert: false,
            enable_local_swizzle: true,
            enable_finger_swizzle: true,
            enable_finger_animation: true,
            finger_curl_sign: -1.,
            extra_global_yaw_deg: 180.,
            root_invert: true,
            root_apply_local_swizzle: true,
            root_rotation_mode: RootRotationMode::Free,
            arm_down_fix: SideOffsets::new(
                EulerOffset::new(-65., -30., -48.),
                EulerOffset::new(-65., 30., 48.),
            ),
            arm_up_fix: SideOffsets::new(
                EulerOffset::new(10., -60., -10.),
                EulerOffset::new(10., 60., 10.),
            ),
            forearm_fix: SideOffsets::new(
                EulerOffset::new(0., 0., -10.),
                EulerOffset::new(0., 0., 10.),
            ),
            hand_fix: EulerOffset::ZERO,
            leg_fix: EulerOffset::ZERO,
            pose_factor_window: PoseFactorWindow::default(),
            only_joint: None,
            side_names: SideNamePattern::default(),
        }
    }
}

impl RetargetConfig {
    pub fn from_ron_str(source: &str) -> ConfigResult<Self> {
        Ok(ron::de::from_str(source)?)
    }

    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_ron_str(&source)
    }

    pub fn to_ron_string(&self) -> ConfigResult<String> {
        Ok(ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default(),
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quat_order_reorders_components() {
        let xyzw = QuatOrder::Xyzw.to_quat([0.1, 0.2, 0.3, 0.9]);
        let wxyz = QuatOrder::Wxyz.to_quat([0.9, 0.1, 0.2, 0.3]);
        assert_eq!(xyzw, wxyz);
        assert_eq!(QuatOrder::Wxyz.from_quat(wxyz), [0.9, 0.1, 0.2, 0.3]);
    }

    #[test]
    fn window_remaps_and_clamps() {
        let window = PoseFactorWindow::default();
        assert_eq!(window.remap(0.0), 0.);
        assert_eq!(window.remap(0.40), 0.);
        assert!((window.remap(0.575) - 0.5).abs() < 1e-5);
        assert_eq!(window.remap(0.75), 1.);
        assert_eq!(window.remap(2.0), 1.);
        assert_eq!(window.remap(f32::NAN), 0.);
    }

    #[test]
    fn degenerate_window_is_a_step() {
        let window = PoseFactorWindow {
            lower: 0.5,
            upper: 0.5,
        };
        assert_eq!(window.remap(0.49), 0.);
        assert_eq!(window.remap(0.5), 1.);
    }

    #[test]
    fn euler_offsets_interpolate_per_axis() {
        let down = EulerOffset::new(-65., -30., -48.);
        let up = EulerOffset::new(10., -60., -10.);
        assert_eq!(down.lerp(up, 0.), down);
        assert_eq!(down.lerp(up, 1.), up);
        assert_eq!(down.lerp(up, 0.5), EulerOffset::new(-27.5, -45., -29.));
    }

    #[test]
    fn partial_ron_keeps_remaining_defaults() {
        let config = RetargetConfig::from_ron_str(
            r#"(
                input_quat_order: Wxyz,
                finger_curl_sign: 1.0,
                only_joint: Some("leftarm"),
            )"#,
        )
        .unwrap();

        assert_eq!(config.input_quat_order, QuatOrder::Wxyz);
        assert_eq!(config.finger_curl_sign, 1.);
        assert_eq!(config.only_joint.as_deref(), Some("leftarm"));
        assert_eq!(config.arm_down_fix, RetargetConfig::default().arm_down_fix);
        assert!(config.root_invert);
    }

    #[test]
    fn config_survives_ron() {
        let config = RetargetConfig {
            root_rotation_mode: RootRotationMode::FixedUp,
            ..Default::default()
        };
        let text = config.to_ron_string().unwrap();
        assert_eq!(RetargetConfig::from_ron_str(&text).unwrap(), config);
    }
}
