use bevy::{
    ecs::{hierarchy::Children, name::Name, prelude::*},
    log::prelude::*,
    reflect::Reflect,
    transform::components::Transform,
};

use super::{
    config::RetargetConfig,
    engine::Retargeter,
    pose_source::PoseSource,
    skeleton::{JointHierarchy, JointId, Skeleton},
    state::RetargetState,
};

/// Marks the root entity of a character whose descendants are driven by retargeted poses.
///
/// The joint tree is read from the entity hierarchy (`Name` and `Transform` of every
/// descendant) the first time a pose is applied, and the rotations found at that point become
/// the rest pose.
#[derive(Component, Default)]
pub struct RetargetRig {
    joints: Option<RigJoints>,
    state: RetargetState,
}

impl RetargetRig {
    pub fn state(&self) -> &RetargetState {
        &self.state
    }

    pub fn skeleton(&self) -> Option<&Skeleton> {
        self.joints.as_ref().map(|joints| &joints.skeleton)
    }

    /// Entity that holds a joint's transform.
    pub fn entity(&self, joint: JointId) -> Option<Entity> {
        self.joints
            .as_ref()
            .and_then(|joints| joints.entities.get(joint.index()).copied())
    }
}

/// Joint tree of a rig and the entity behind each joint, indexed by [`JointId`].
struct RigJoints {
    root: Entity,
    skeleton: Skeleton,
    entities: Vec<Entity>,
}

/// A pose waiting to be applied to the [`RetargetRig`] on the same entity. Removed once it has
/// been applied.
#[derive(Component, Clone, Debug)]
pub struct PendingPose(pub PoseSource);

/// Retargeter built from the current [`RetargetConfig`].
#[derive(Resource)]
pub struct ActiveRetargeter(pub Retargeter);

impl FromWorld for ActiveRetargeter {
    fn from_world(world: &mut World) -> Self {
        let config = world.get_resource_or_init::<RetargetConfig>().clone();
        match Retargeter::new(config) {
            Ok(retargeter) => Self(retargeter),
            Err(error) => {
                warn!("Invalid retarget config ({error}), falling back to defaults");
                Self(default_retargeter())
            }
        }
    }
}

fn default_retargeter() -> Retargeter {
    // Default side name patterns always compile.
    Retargeter::new(RetargetConfig::default()).unwrap()
}

pub fn update_retargeter(config: Res<RetargetConfig>, mut active: ResMut<ActiveRetargeter>) {
    if !config.is_changed() {
        return;
    }
    match Retargeter::new(config.clone()) {
        Ok(retargeter) => active.0 = retargeter,
        Err(error) => warn!("Invalid retarget config ({error}), keeping the previous one"),
    }
}

fn child_entities(children: Option<&Children>) -> Vec<Entity> {
    children
        .map(|children| children.into_iter().copied().collect())
        .unwrap_or_default()
}

/// Walks the hierarchy below `root` depth first, so that parents are added before children.
fn build_rig_joints(
    root: Entity,
    nodes: &Query<(Option<&Children>, Option<&Name>)>,
    transforms: &Query<&mut Transform, Without<RetargetRig>>,
) -> Option<RigJoints> {
    let mut skeleton = Skeleton::default();
    let mut entities = Vec::new();

    let Ok((root_children, _)) = nodes.get(root) else {
        return None;
    };
    let mut pending: Vec<(Entity, Option<JointId>)> = child_entities(root_children)
        .into_iter()
        .rev()
        .map(|child| (child, None))
        .collect();

    while let Some((entity, parent)) = pending.pop() {
        let (Ok((children, name)), Ok(transform)) = (nodes.get(entity), transforms.get(entity))
        else {
            continue;
        };
        let name = name.map(Name::as_str).unwrap_or_default();
        let id = skeleton.add_joint(name, parent, transform.rotation);
        entities.push(entity);

        for child in child_entities(children).into_iter().rev() {
            pending.push((child, Some(id)));
        }
    }

    if skeleton.is_empty() {
        return None;
    }
    debug!("Built retarget rig for {root:?}: {skeleton:?}");
    Some(RigJoints {
        root,
        skeleton,
        entities,
    })
}

fn write_back(joints: &RigJoints, transforms: &mut Query<&mut Transform, Without<RetargetRig>>) {
    for (index, entity) in joints.entities.iter().enumerate() {
        let (Some(rotation), Ok(mut transform)) = (
            joints.skeleton.local_rotation(JointId::new(index)),
            transforms.get_mut(*entity),
        ) else {
            continue;
        };
        transform.rotation = rotation;
    }
}

/// Forgets the joint tree of rigs whose hierarchy changed since the last run, so that it is
/// rebuilt before the next pose is applied. Rigs are put back into their bind pose first, which
/// makes that pose the rest pose of the rebuilt tree.
pub fn refresh_rig_joints(
    mut rigs: Query<&mut RetargetRig>,
    changed: Query<(), Or<(Changed<Children>, Changed<Name>)>>,
    mut transforms: Query<&mut Transform, Without<RetargetRig>>,
) {
    for mut rig in &mut rigs {
        let rig = &mut *rig;
        let Some(joints) = rig.joints.as_mut() else {
            continue;
        };
        let mut entities = std::iter::once(&joints.root).chain(&joints.entities);
        if !entities.any(|entity| changed.contains(*entity)) {
            continue;
        }

        debug!("Hierarchy of rig {:?} changed, rebuilding its joints", joints.root);
        rig.state.reset_to_bind(&mut joints.skeleton);
        write_back(joints, &mut transforms);
        rig.state.release_bind();
        rig.state.invalidate_index();
        rig.joints = None;
    }
}

/// Applies every [`PendingPose`] to the rig on the same entity and writes the resulting
/// rotations back to the joint entities' transforms.
pub fn apply_pending_poses(
    mut commands: Commands,
    retargeter: Res<ActiveRetargeter>,
    mut rigs: Query<(Entity, &mut RetargetRig, &PendingPose)>,
    nodes: Query<(Option<&Children>, Option<&Name>)>,
    mut transforms: Query<&mut Transform, Without<RetargetRig>>,
) {
    for (root, mut rig, pending) in &mut rigs {
        let rig = &mut *rig;
        if rig.joints.is_none() {
            rig.joints = build_rig_joints(root, &nodes, &transforms);
        }
        let Some(joints) = rig.joints.as_mut() else {
            debug!("Rig {root:?} has no joints yet, keeping its pending pose");
            continue;
        };

        // Pick up rotations that were changed outside of retargeting.
        for (index, entity) in joints.entities.iter().enumerate() {
            if let Ok(transform) = transforms.get(*entity) {
                joints
                    .skeleton
                    .set_local_rotation(JointId::new(index), transform.rotation);
            }
        }

        let summary = retargeter
            .0
            .apply(&mut joints.skeleton, &mut rig.state, &pending.0);
        trace!(
            "Retargeted {} joints onto {root:?}, skipped {}",
            summary.applied, summary.skipped
        );

        write_back(joints, &mut transforms);
        commands.entity(root).remove::<PendingPose>();
    }
}

/// Triggered to put every rig that has been retargeted back into its bind pose.
#[derive(Event, Clone, Copy, Debug, Default, Reflect)]
pub struct ResetRigsToBind;

pub fn reset_rigs_to_bind(
    _: On<ResetRigsToBind>,
    mut rigs: Query<&mut RetargetRig>,
    mut transforms: Query<&mut Transform, Without<RetargetRig>>,
) {
    for mut rig in &mut rigs {
        let rig = &mut *rig;
        let Some(joints) = rig.joints.as_mut() else {
            continue;
        };
        rig.state.reset_to_bind(&mut joints.skeleton);
        write_back(joints, &mut transforms);
    }
}
