use bevy::math::Quat;

use super::{
    classification::{JointClass, JointRole, Side},
    config::{PoseFactorWindow, RetargetConfig},
};

/// How far an arm is raised, in `[0, 1]`: the outward axis of `side` is rotated by the arm's
/// local delta and the height of the result is remapped through `window`.
pub fn pose_factor(delta: Quat, side: Side, window: &PoseFactorWindow) -> f32 {
    let raised = delta * side.outward_axis();
    window.remap(raised.y)
}

/// Corrective rotation for an arm, blended between the "arm down" and "arm up" offsets.
pub fn arm_correction(delta: Quat, side: Side, config: &RetargetConfig) -> Quat {
    let t = pose_factor(delta, side, &config.pose_factor_window);
    config
        .arm_down_fix
        .for_side(side)
        .lerp(config.arm_up_fix.for_side(side), t)
        .to_quat()
}

/// Rotation post-multiplied onto a joint after its delta has been composed with the bind
/// orientation, if the joint's class has one. Arms and forearms without a side get none. The
/// hand offset also applies to every finger joint.
pub fn corrective_offset(role: JointRole, delta: Quat, config: &RetargetConfig) -> Option<Quat> {
    match (role.class, role.side) {
        (JointClass::Arm, Some(side)) => Some(arm_correction(delta, side, config)),
        (JointClass::Forearm, Some(side)) => Some(config.forearm_fix.for_side(side).to_quat()),
        (JointClass::Hand | JointClass::Finger, _) if !config.hand_fix.is_zero() => {
            Some(config.hand_fix.to_quat())
        }
        (JointClass::Leg, _) if !config.leg_fix.is_zero() => Some(config.leg_fix.to_quat()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{config::EulerOffset, orientation::from_euler_xyz_degrees};
    use std::f32::consts::FRAC_PI_2;

    fn role(class: JointClass, side: Option<Side>) -> JointRole {
        JointRole { class, side }
    }

    #[test]
    fn resting_arm_has_zero_pose_factor() {
        let window = PoseFactorWindow::default();
        assert_eq!(pose_factor(Quat::IDENTITY, Side::Left, &window), 0.);
        assert_eq!(pose_factor(Quat::IDENTITY, Side::Right, &window), 0.);
    }

    #[test]
    fn raised_arm_has_full_pose_factor() {
        let window = PoseFactorWindow::default();
        // Rotating +X by a quarter turn about +Z points it straight up.
        assert_eq!(
            pose_factor(Quat::from_rotation_z(FRAC_PI_2), Side::Right, &window),
            1.
        );
        assert_eq!(
            pose_factor(Quat::from_rotation_z(-FRAC_PI_2), Side::Left, &window),
            1.
        );
        assert_eq!(
            pose_factor(Quat::from_rotation_z(FRAC_PI_2), Side::Left, &window),
            0.
        );
    }

    #[test]
    fn arm_correction_blends_between_offsets() {
        let config = RetargetConfig::default();
        let down = arm_correction(Quat::IDENTITY, Side::Left, &config);
        assert!(down.abs_diff_eq(from_euler_xyz_degrees(-65., -30., -48.), 1e-6));

        let up = arm_correction(Quat::from_rotation_z(FRAC_PI_2), Side::Right, &config);
        assert!(up.abs_diff_eq(from_euler_xyz_degrees(10., 60., 10.), 1e-6));
    }

    #[test]
    fn offsets_per_class() {
        let config = RetargetConfig::default();
        let forearm = corrective_offset(
            role(JointClass::Forearm, Some(Side::Right)),
            Quat::IDENTITY,
            &config,
        );
        assert!(forearm.unwrap().abs_diff_eq(from_euler_xyz_degrees(0., 0., 10.), 1e-6));

        assert_eq!(corrective_offset(role(JointClass::Arm, None), Quat::IDENTITY, &config), None);
        assert_eq!(
            corrective_offset(role(JointClass::Hand, Some(Side::Left)), Quat::IDENTITY, &config),
            None
        );
        assert_eq!(
            corrective_offset(role(JointClass::OtherCore, None), Quat::IDENTITY, &config),
            None
        );

        let config = RetargetConfig {
            leg_fix: EulerOffset::new(0., 15., 0.),
            ..Default::default()
        };
        let leg = corrective_offset(role(JointClass::Leg, Some(Side::Left)), Quat::IDENTITY, &config);
        assert!(leg.unwrap().abs_diff_eq(from_euler_xyz_degrees(0., 15., 0.), 1e-6));
    }

    #[test]
    fn hand_offset_reaches_fingers() {
        let config = RetargetConfig {
            hand_fix: EulerOffset::new(5., 0., -5.),
            ..Default::default()
        };
        let expected = from_euler_xyz_degrees(5., 0., -5.);
        for class in [JointClass::Hand, JointClass::Finger] {
            let offset = corrective_offset(role(class, None), Quat::IDENTITY, &config);
            assert!(offset.unwrap().abs_diff_eq(expected, 1e-6));
        }
    }
}
