//! Conversion of SMPL body and MANO hand parameters, as produced by pose estimators, into
//! foreign [`PoseSource`]s.
//!
//! Both models describe each joint as a local axis-angle vector. They are converted to
//! quaternions stored in `x, y, z, w` order.

use bevy::math::{Quat, Vec3};

use crate::core::{
    classification::Side,
    config::QuatOrder,
    pose_source::{PoseKind, PoseMeta, PoseSource},
};

/// Canonical joint names of the first 22 SMPL joints. Index 0 is the global orientation, the
/// rest follow the order of the `body_pose` parameter. The remaining SMPL hand joints have no
/// counterpart and are dropped.
pub const SMPL_BODY_JOINTS: [&str; 22] = [
    "Hips",
    "LeftUpLeg",
    "RightUpLeg",
    "Spine",
    "LeftLeg",
    "RightLeg",
    "Spine1",
    "LeftFoot",
    "RightFoot",
    "Spine2",
    "LeftToeBase",
    "RightToeBase",
    "Neck",
    "LeftShoulder",
    "RightShoulder",
    "Head",
    "LeftArm",
    "RightArm",
    "LeftForeArm",
    "RightForeArm",
    "LeftHand",
    "RightHand",
];

/// MANO finger joints in parameter order, without the side prefix.
pub const MANO_FINGER_JOINTS: [&str; 15] = [
    "Index1", "Index2", "Index3", "Middle1", "Middle2", "Middle3", "Pinky1", "Pinky2", "Pinky3",
    "Ring1", "Ring2", "Ring3", "Thumb1", "Thumb2", "Thumb3",
];

pub const PELVIS_KEYPOINT: usize = 0;
pub const NECK_KEYPOINT: usize = 12;

fn axis_angle_components(axis_angle: Vec3) -> [f32; 4] {
    QuatOrder::Xyzw.from_quat(Quat::from_scaled_axis(axis_angle))
}

/// Full-body pose from SMPL `global_orient` and `body_pose` axis-angle parameters. Missing
/// trailing joints are simply absent from the result.
pub fn smpl_body_pose(global_orient: Vec3, body_pose: &[Vec3]) -> PoseSource {
    let mut pose = PoseSource::default();
    let rotations = std::iter::once(&global_orient).chain(body_pose);
    for (name, axis_angle) in SMPL_BODY_JOINTS.iter().zip(rotations) {
        pose.insert(*name, axis_angle_components(*axis_angle));
    }
    pose
}

fn hand_prefix(side: Side) -> &'static str {
    match side {
        Side::Left => "LeftHand",
        Side::Right => "RightHand",
    }
}

/// Finger joints of one hand from MANO `hand_pose` axis-angle parameters, as a partial pose
/// authored for and targeting `side`.
pub fn mano_hand_pose(hand_pose: &[Vec3], side: Side) -> PoseSource {
    let mut pose = PoseSource::new(PoseMeta {
        pose_kind: PoseKind::Partial,
        side: Some(side),
        target_side: Some(side),
        ..Default::default()
    });
    let prefix = hand_prefix(side);
    for (finger, axis_angle) in MANO_FINGER_JOINTS.iter().zip(hand_pose) {
        pose.insert(format!("{prefix}{finger}"), axis_angle_components(*axis_angle));
    }
    pose
}

/// Roll about the camera axis that makes the pelvis-to-neck direction point straight up in
/// image space (`y` pointing down). Returns identity when the two keypoints coincide.
pub fn root_roll_correction(pelvis: Vec3, neck: Vec3) -> Quat {
    let dx = neck.x - pelvis.x;
    let dy = neck.y - pelvis.y;
    if dx.abs() < 1e-6 && dy.abs() < 1e-6 {
        return Quat::IDENTITY;
    }
    let angle = (-dx).atan2(-dy);
    Quat::from_rotation_z(-angle)
}

/// [`root_roll_correction`] from a full set of SMPL 3D keypoints. Returns identity when the
/// pelvis or neck keypoint is missing.
pub fn root_roll_correction_from_keypoints(keypoints: &[Vec3]) -> Quat {
    match (keypoints.get(PELVIS_KEYPOINT), keypoints.get(NECK_KEYPOINT)) {
        (Some(pelvis), Some(neck)) => root_roll_correction(*pelvis, *neck),
        _ => Quat::IDENTITY,
    }
}
