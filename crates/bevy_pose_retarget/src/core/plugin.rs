use bevy::{
    app::{App, Plugin, PostUpdate},
    ecs::schedule::{IntoScheduleConfigs, SystemSet},
    transform::TransformSystems,
};

use super::{
    classification::{JointClass, JointRole, Side},
    config::{
        DeltaComposition, EulerOffset, PoseFactorWindow, QuatOrder, RetargetConfig,
        RootRotationMode, SideOffsets,
    },
    mirroring::SideNamePattern,
    pose_source::{PoseKind, PoseMeta, SourceKind},
    skeleton::{JointId, Skeleton},
    systems::{
        ActiveRetargeter, ResetRigsToBind, apply_pending_poses, refresh_rig_joints,
        reset_rigs_to_bind, update_retargeter,
    },
};

/// Retargets [`PendingPose`]s onto [`RetargetRig`] hierarchies, using the [`RetargetConfig`]
/// resource.
///
/// [`PendingPose`]: super::systems::PendingPose
/// [`RetargetRig`]: super::systems::RetargetRig
#[derive(Default)]
pub struct PoseRetargetPlugin;

#[derive(Clone, Debug, Copy, PartialEq, Eq, Hash, SystemSet)]
pub struct PoseRetargetSet;

impl Plugin for PoseRetargetPlugin {
    fn build(&self, app: &mut App) {
        self.register_types(app);

        app.init_resource::<RetargetConfig>()
            .init_resource::<ActiveRetargeter>();

        app.configure_sets(
            PostUpdate,
            PoseRetargetSet.before(TransformSystems::Propagate),
        );
        app.add_systems(
            PostUpdate,
            (update_retargeter, refresh_rig_joints, apply_pending_poses)
                .chain()
                .in_set(PoseRetargetSet),
        );

        app.add_observer(reset_rigs_to_bind);
    }
}

impl PoseRetargetPlugin {
    fn register_types(&self, app: &mut App) {
        app //
            .register_type::<RetargetConfig>()
            .register_type::<QuatOrder>()
            .register_type::<DeltaComposition>()
            .register_type::<RootRotationMode>()
            .register_type::<EulerOffset>()
            .register_type::<SideOffsets>()
            .register_type::<PoseFactorWindow>()
            .register_type::<SideNamePattern>()
            .register_type::<JointClass>()
            .register_type::<JointRole>()
            .register_type::<Side>()
            .register_type::<SourceKind>()
            .register_type::<PoseKind>()
            .register_type::<PoseMeta>()
            .register_type::<JointId>()
            .register_type::<Skeleton>()
            .register_type::<ResetRigsToBind>();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        pose_source::PoseSource,
        systems::{PendingPose, RetargetRig},
    };
    use bevy::{
        ecs::{hierarchy::ChildOf, name::Name},
        math::Quat,
        transform::components::Transform,
    };

    fn app() -> App {
        let mut app = App::new();
        app.add_plugins(PoseRetargetPlugin);
        app
    }

    #[test]
    fn pending_pose_is_applied_and_consumed() {
        let mut app = app();
        let world = app.world_mut();
        let root = world.spawn((RetargetRig::default(), Transform::default())).id();
        let hips = world
            .spawn((Name::new("mixamorig:Hips"), Transform::default(), ChildOf(root)))
            .id();
        let spine = world
            .spawn((
                Name::new("mixamorig:Spine"),
                Transform::from_rotation(Quat::from_rotation_z(0.2)),
                ChildOf(hips),
            ))
            .id();

        let rotation = Quat::from_rotation_x(0.5);
        let pose = PoseSource::new(PoseMeta {
            source_kind: SourceKind::Native,
            ..Default::default()
        })
        .with_joint("Spine", [rotation.x, rotation.y, rotation.z, rotation.w]);
        world.entity_mut(root).insert(PendingPose(pose));

        app.update();

        let world = app.world();
        assert!(world.get::<PendingPose>(root).is_none());
        let spine_rotation = world.get::<Transform>(spine).unwrap().rotation;
        assert!(spine_rotation.abs_diff_eq(rotation, 1e-6));

        let rig = world.get::<RetargetRig>(root).unwrap();
        let skeleton = rig.skeleton().unwrap();
        assert_eq!(skeleton.len(), 2);
        let spine_id = skeleton.find_by_name("mixamorig:Spine").unwrap();
        assert_eq!(rig.entity(spine_id), Some(spine));
    }

    #[test]
    fn reset_event_restores_bind_pose() {
        let mut app = app();
        let world = app.world_mut();
        let root = world.spawn((RetargetRig::default(), Transform::default())).id();
        let spine = world
            .spawn((
                Name::new("Spine"),
                Transform::from_rotation(Quat::from_rotation_z(0.2)),
                ChildOf(root),
            ))
            .id();
        let pose = PoseSource::default().with_joint("Spine", [0., 0., 0.38941833, 0.921061]);
        world.entity_mut(root).insert(PendingPose(pose));
        app.update();
        assert!(
            !app.world()
                .get::<Transform>(spine)
                .unwrap()
                .rotation
                .abs_diff_eq(Quat::from_rotation_z(0.2), 1e-4)
        );

        app.world_mut().trigger(ResetRigsToBind);

        let rotation = app.world().get::<Transform>(spine).unwrap().rotation;
        assert!(rotation.abs_diff_eq(Quat::from_rotation_z(0.2), 1e-6));
    }

    #[test]
    fn config_inserted_after_plugin_is_used() {
        let mut app = app();
        app.insert_resource(RetargetConfig {
            only_joint: Some("spine".into()),
            ..Default::default()
        });

        app.update();

        let active = app.world().resource::<ActiveRetargeter>();
        assert_eq!(active.0.config().only_joint.as_deref(), Some("spine"));
    }

    #[test]
    fn joints_spawned_later_are_picked_up() {
        let mut app = app();
        let world = app.world_mut();
        let root = world.spawn((RetargetRig::default(), Transform::default())).id();
        let spine = world
            .spawn((Name::new("Spine"), Transform::default(), ChildOf(root)))
            .id();

        let spine_rotation = Quat::from_rotation_x(0.5);
        let head_rotation = Quat::from_rotation_y(-0.3);
        let pose = PoseSource::new(PoseMeta {
            source_kind: SourceKind::Native,
            ..Default::default()
        })
        .with_joint("Spine", QuatOrder::Xyzw.from_quat(spine_rotation))
        .with_joint("Head", QuatOrder::Xyzw.from_quat(head_rotation));

        world.entity_mut(root).insert(PendingPose(pose.clone()));
        app.update();
        let rig = app.world().get::<RetargetRig>(root).unwrap();
        assert_eq!(rig.skeleton().unwrap().len(), 1);

        let world = app.world_mut();
        let head = world
            .spawn((Name::new("Head"), Transform::default(), ChildOf(spine)))
            .id();
        world.entity_mut(root).insert(PendingPose(pose));
        app.update();

        let world = app.world();
        let rig = world.get::<RetargetRig>(root).unwrap();
        assert_eq!(rig.skeleton().unwrap().len(), 2);
        let head_id = rig.skeleton().unwrap().find_by_name("Head").unwrap();
        assert_eq!(rig.entity(head_id), Some(head));
        let rotation = world.get::<Transform>(head).unwrap().rotation;
        assert!(rotation.abs_diff_eq(head_rotation, 1e-6));
        let rotation = world.get::<Transform>(spine).unwrap().rotation;
        assert!(rotation.abs_diff_eq(spine_rotation, 1e-6));
    }
}
