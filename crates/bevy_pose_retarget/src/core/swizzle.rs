//! Per-class axis remaps.
//!
//! A source orientation is reinterpreted as if it had been expressed in the target joint's local
//! frame by permuting and negating its components. The tables are calibration data matched to
//! SMPL-style sources and Mixamo-style rigs; there is no closed-form relationship behind them.

use bevy::math::Quat;

use super::{classification::JointClass, config::RetargetConfig, orientation::normalize_or_identity};

/// Remaps `q` for a joint of the given class. The result is normalized.
pub fn swizzle(class: JointClass, q: Quat, config: &RetargetConfig) -> Quat {
    if class == JointClass::Finger {
        if !config.enable_finger_swizzle {
            return normalize_or_identity(q);
        }
        return finger_twist(q, config.finger_curl_sign);
    }
    if !config.enable_local_swizzle {
        return normalize_or_identity(q);
    }

    let [x, y, z, w] = q.to_array();
    let remapped = match class {
        JointClass::HeadNeck => q,
        JointClass::Root => Quat::from_xyzw(x, -y, z, w),
        JointClass::Leg => Quat::from_xyzw(-x, -y, -z, w),
        JointClass::Arm | JointClass::Forearm | JointClass::Hand => Quat::from_xyzw(-x, -z, y, w),
        JointClass::Shoulder | JointClass::OtherCore | JointClass::Finger => {
            Quat::from_xyzw(-x, -y, z, w)
        }
    };
    normalize_or_identity(remapped)
}

/// Collapses `q` onto the finger's local curl axis. Fingers of the target rig bend about `X`,
/// while the source encodes the curl on `Z`.
fn finger_twist(q: Quat, curl_sign: f32) -> Quat {
    normalize_or_identity(Quat::from_xyzw(q.z * curl_sign, 0., 0., q.w))
}

#[cfg(test)]
mod tests {
    use super::*;

    const Q: Quat = Quat::from_xyzw(0.1, 0.2, 0.3, 0.9);

    fn remap(class: JointClass) -> Quat {
        swizzle(class, Q, &RetargetConfig::default())
    }

    fn normalized(x: f32, y: f32, z: f32, w: f32) -> Quat {
        Quat::from_xyzw(x, y, z, w).normalize()
    }

    #[test]
    fn class_tables() {
        assert!(remap(JointClass::HeadNeck).abs_diff_eq(Q.normalize(), 1e-6));
        assert!(remap(JointClass::Root).abs_diff_eq(normalized(0.1, -0.2, 0.3, 0.9), 1e-6));
        assert!(remap(JointClass::Leg).abs_diff_eq(normalized(-0.1, -0.2, -0.3, 0.9), 1e-6));
        for class in [JointClass::Arm, JointClass::Forearm, JointClass::Hand] {
            assert!(remap(class).abs_diff_eq(normalized(-0.1, -0.3, 0.2, 0.9), 1e-6));
        }
        assert!(remap(JointClass::OtherCore).abs_diff_eq(normalized(-0.1, -0.2, 0.3, 0.9), 1e-6));
    }

    #[test]
    fn fingers_keep_only_the_curl_component() {
        assert!(remap(JointClass::Finger).abs_diff_eq(normalized(-0.3, 0., 0., 0.9), 1e-6));

        let config = RetargetConfig {
            finger_curl_sign: 1.,
            ..Default::default()
        };
        assert!(
            swizzle(JointClass::Finger, Q, &config).abs_diff_eq(normalized(0.3, 0., 0., 0.9), 1e-6)
        );
    }

    #[test]
    fn disabled_swizzles_pass_through() {
        let config = RetargetConfig {
            enable_local_swizzle: false,
            enable_finger_swizzle: false,
            ..Default::default()
        };
        assert!(swizzle(JointClass::Leg, Q, &config).abs_diff_eq(Q.normalize(), 1e-6));
        assert!(swizzle(JointClass::Finger, Q, &config).abs_diff_eq(Q.normalize(), 1e-6));
    }

    #[test]
    fn zero_input_becomes_identity() {
        let zero = Quat::from_xyzw(0., 0., 0., 0.);
        let config = RetargetConfig::default();
        assert_eq!(swizzle(JointClass::Arm, zero, &config), Quat::IDENTITY);
        assert_eq!(swizzle(JointClass::Finger, zero, &config), Quat::IDENTITY);
    }
}
