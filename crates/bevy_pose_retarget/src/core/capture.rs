use super::{
    config::QuatOrder,
    pose_source::{PoseMeta, PoseSource, SourceKind},
    skeleton::JointHierarchy,
};

/// Records the current local orientation of every joint as a native full-body pose, keyed by
/// joint name, with components in `order`. Applying the result to the same skeleton with a
/// config reading the same order reproduces its current pose.
pub fn capture_pose<S: JointHierarchy + ?Sized>(skeleton: &S, order: QuatOrder) -> PoseSource {
    let mut pose = PoseSource::new(PoseMeta {
        source_kind: SourceKind::Native,
        ..Default::default()
    });
    for id in skeleton.joint_ids() {
        let (Some(name), Some(rotation)) = (skeleton.joint_name(id), skeleton.local_rotation(id))
        else {
            continue;
        };
        pose.insert(name, order.from_quat(rotation));
    }
    pose
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        engine::Retargeter, config::RetargetConfig, skeleton::Skeleton, state::RetargetState,
    };
    use bevy::math::Quat;

    fn posed() -> Skeleton {
        let mut skeleton = Skeleton::default();
        let hips = skeleton.add_joint("mixamorig:Hips", None, Quat::IDENTITY);
        let spine = skeleton.add_joint("mixamorig:Spine", Some(hips), Quat::IDENTITY);
        skeleton.set_local_rotation(hips, Quat::from_rotation_y(0.8));
        skeleton.set_local_rotation(spine, Quat::from_rotation_x(-0.4));
        skeleton
    }

    fn assert_restores(order: QuatOrder) {
        let source = posed();
        let pose = capture_pose(&source, order);
        assert_eq!(pose.meta.source_kind, SourceKind::Native);
        assert_eq!(pose.len(), 2);

        let mut target = source.clone();
        target.reset_to_rest();
        let retargeter = Retargeter::new(RetargetConfig {
            input_quat_order: order,
            ..Default::default()
        })
        .unwrap();
        retargeter.apply(&mut target, &mut RetargetState::new(), &pose);

        for ((_, expected), (_, actual)) in source.joints().zip(target.joints()) {
            assert!(expected.rotation.abs_diff_eq(actual.rotation, 1e-6));
        }
    }

    #[test]
    fn captured_pose_restores_skeleton() {
        assert_restores(QuatOrder::Xyzw);
    }

    #[test]
    fn captured_pose_restores_skeleton_in_wxyz_order() {
        assert_restores(QuatOrder::Wxyz);

        let pose = capture_pose(&posed(), QuatOrder::Wxyz);
        let [w, x, y, z] = *pose.get("mixamorig:Hips").unwrap();
        assert!(Quat::from_xyzw(x, y, z, w).abs_diff_eq(Quat::from_rotation_y(0.8), 1e-6));
    }

    #[test]
    fn captured_pose_survives_json_export() {
        let pose = capture_pose(&posed(), QuatOrder::Xyzw);
        let text = pose.to_json_string().unwrap();
        assert_eq!(PoseSource::from_json_str(&text).unwrap(), pose);
    }
}
