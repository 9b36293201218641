pub mod serial;

use bevy::{
    math::Quat,
    reflect::{Reflect, std_traits::ReflectDefault},
};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Identifies a joint within a single skeleton. Ids are only meaningful for the skeleton that
/// handed them out.
#[derive(
    Reflect, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Debug,
)]
pub struct JointId(usize);

impl JointId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

/// The view of a target skeleton the retargeting engine works against.
///
/// The skeleton is owned by whoever loaded the character. The engine never creates or destroys
/// joints, it only reads names and hierarchy and reads/writes local rotations.
pub trait JointHierarchy {
    /// All joints of the skeleton, in a stable order.
    fn joint_ids(&self) -> Vec<JointId>;

    fn joint_name(&self, id: JointId) -> Option<&str>;

    fn parent(&self, id: JointId) -> Option<JointId>;

    /// Rotation of the joint relative to its parent.
    fn local_rotation(&self, id: JointId) -> Option<Quat>;

    fn set_local_rotation(&mut self, id: JointId, rotation: Quat);

    /// Puts every joint back into the authored rest configuration.
    fn reset_to_rest(&mut self);

    /// Rotation of the joint in skeleton space, composed from the root down.
    fn world_rotation(&self, id: JointId) -> Quat {
        let mut rotation = Quat::IDENTITY;
        let mut current = Some(id);
        while let Some(joint) = current {
            rotation = self.local_rotation(joint).unwrap_or(Quat::IDENTITY) * rotation;
            current = self.parent(joint);
        }
        rotation
    }
}

#[derive(Reflect, Clone, Debug, PartialEq)]
pub struct Joint {
    pub name: String,
    pub parent: Option<JointId>,
    pub rotation: Quat,
    pub rest_rotation: Quat,
}

/// In-memory joint tree. Joints are stored in insertion order and a parent is always inserted
/// before its children, so the hierarchy can never contain cycles.
#[derive(Reflect, Clone, Default, PartialEq)]
#[reflect(Default)]
pub struct Skeleton {
    joints: Vec<Joint>,
}

impl Skeleton {
    /// Adds a joint whose rest rotation is `rotation`.
    ///
    /// ### Panics
    /// Panics if `parent` was not handed out by this skeleton.
    pub fn add_joint(
        &mut self,
        name: impl Into<String>,
        parent: Option<JointId>,
        rotation: Quat,
    ) -> JointId {
        if let Some(parent) = parent {
            if parent.0 >= self.joints.len() {
                panic!("Parent {parent:?} does not belong to this skeleton");
            }
        }

        let id = JointId(self.joints.len());
        self.joints.push(Joint {
            name: name.into(),
            parent,
            rotation,
            rest_rotation: rotation,
        });
        id
    }

    pub fn joint(&self, id: JointId) -> Option<&Joint> {
        self.joints.get(id.0)
    }

    pub fn joints(&self) -> impl Iterator<Item = (JointId, &Joint)> {
        self.joints
            .iter()
            .enumerate()
            .map(|(index, joint)| (JointId(index), joint))
    }

    pub fn len(&self) -> usize {
        self.joints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }

    /// Exact, case-sensitive name lookup. Use the joint resolver for anything fuzzier.
    pub fn find_by_name(&self, name: &str) -> Option<JointId> {
        self.joints
            .iter()
            .position(|joint| joint.name == name)
            .map(JointId)
    }

    pub fn children(&self, id: Option<JointId>) -> Vec<JointId> {
        self.joints()
            .filter(|(_, joint)| joint.parent == id)
            .map(|(child, _)| child)
            .collect()
    }

    fn indent(f: &mut std::fmt::Formatter<'_>, level: u32) -> std::fmt::Result {
        if level == 0 {
            return Ok(());
        }
        for _ in 0..(level - 1) {
            write!(f, "┃ ")?;
        }
        write!(f, "┣━")?;
        Ok(())
    }

    fn fmt_level(
        &self,
        f: &mut std::fmt::Formatter<'_>,
        level: u32,
        parent: Option<JointId>,
    ) -> std::fmt::Result {
        for child in self.children(parent) {
            let joint = &self.joints[child.0];
            Self::indent(f, level)?;
            writeln!(f, "🦴 {:?} [{:?}] {:?}", joint.name, child, joint.rotation)?;
            self.fmt_level(f, level + 1, Some(child))?;
        }
        Ok(())
    }
}

impl JointHierarchy for Skeleton {
    fn joint_ids(&self) -> Vec<JointId> {
        (0..self.joints.len()).map(JointId).collect()
    }

    fn joint_name(&self, id: JointId) -> Option<&str> {
        self.joints.get(id.0).map(|joint| joint.name.as_str())
    }

    fn parent(&self, id: JointId) -> Option<JointId> {
        self.joints.get(id.0).and_then(|joint| joint.parent)
    }

    fn local_rotation(&self, id: JointId) -> Option<Quat> {
        self.joints.get(id.0).map(|joint| joint.rotation)
    }

    fn set_local_rotation(&mut self, id: JointId, rotation: Quat) {
        if let Some(joint) = self.joints.get_mut(id.0) {
            joint.rotation = rotation;
        }
    }

    fn reset_to_rest(&mut self) {
        for joint in &mut self.joints {
            joint.rotation = joint.rest_rotation;
        }
    }
}

impl Debug for Skeleton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Skeleton hierarchy:")?;
        self.fmt_level(f, 0, None)
    }
}
