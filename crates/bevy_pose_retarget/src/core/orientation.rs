use bevy::math::Quat;

/// Magnitudes at or below this are treated as "no rotation data".
pub const MIN_QUAT_LENGTH: f32 = 1e-8;

/// Normalizes `q`, falling back to identity when its magnitude is not finite or too close to
/// zero to carry a direction.
pub fn normalize_or_identity(q: Quat) -> Quat {
    let length = q.length();
    if !length.is_finite() || length < MIN_QUAT_LENGTH {
        return Quat::IDENTITY;
    }
    q / length
}

/// Rotation from Euler angles in degrees, applied intrinsically in `X`, `Y`, `Z` order.
pub fn from_euler_xyz_degrees(x: f32, y: f32, z: f32) -> Quat {
    Quat::from_rotation_x(x.to_radians())
        * Quat::from_rotation_y(y.to_radians())
        * Quat::from_rotation_z(z.to_radians())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_quaternions_become_identity() {
        assert_eq!(normalize_or_identity(Quat::from_xyzw(0., 0., 0., 0.)), Quat::IDENTITY);
        assert_eq!(
            normalize_or_identity(Quat::from_xyzw(f32::NAN, 0., 0., 1.)),
            Quat::IDENTITY
        );
        assert_eq!(
            normalize_or_identity(Quat::from_xyzw(f32::INFINITY, 0., 0., 1.)),
            Quat::IDENTITY
        );
    }

    #[test]
    fn scaled_quaternions_are_normalized() {
        let q = normalize_or_identity(Quat::from_xyzw(0., 0., 0., 4.));
        assert!(q.abs_diff_eq(Quat::IDENTITY, 1e-6));
        assert!(q.is_normalized());
    }

    #[test]
    fn euler_order_is_x_then_y_then_z() {
        let q = from_euler_xyz_degrees(90., 90., 0.);
        let expected = Quat::from_rotation_x(std::f32::consts::FRAC_PI_2)
            * Quat::from_rotation_y(std::f32::consts::FRAC_PI_2);
        assert!(q.abs_diff_eq(expected, 1e-6));
    }
}
