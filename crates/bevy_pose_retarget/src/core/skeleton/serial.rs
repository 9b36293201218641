use std::path::Path;

use bevy::{math::Quat, platform::collections::HashMap};
use serde::{Deserialize, Serialize};

use super::{JointId, Skeleton};
use crate::core::errors::{SkeletonLoadError, SkeletonLoadResult};

/// RON description of a joint tree, as found in `*.skn.ron` files:
///
/// ```ron
/// (
///     joints: [
///         (name: "Hips"),
///         (name: "Spine", parent: Some("Hips"), rotation: (0.0, 0.0, 0.0, 1.0)),
///     ],
/// )
/// ```
///
/// Parents must be declared before their children.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct SkeletonSerial {
    pub joints: Vec<JointSerial>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct JointSerial {
    pub name: String,
    #[serde(default)]
    pub parent: Option<String>,
    /// Rest rotation, `x, y, z, w`.
    #[serde(default = "identity_components")]
    pub rotation: (f32, f32, f32, f32),
}

fn identity_components() -> (f32, f32, f32, f32) {
    (0., 0., 0., 1.)
}

impl SkeletonSerial {
    pub fn to_value(&self) -> SkeletonLoadResult<Skeleton> {
        let mut skeleton = Skeleton::default();
        let mut ids: HashMap<&str, JointId> = HashMap::default();

        for joint in &self.joints {
            if ids.contains_key(joint.name.as_str()) {
                return Err(SkeletonLoadError::DuplicateJoint(joint.name.clone()));
            }

            let parent = match &joint.parent {
                Some(parent) => Some(*ids.get(parent.as_str()).ok_or_else(|| {
                    SkeletonLoadError::UnknownParent {
                        joint: joint.name.clone(),
                        parent: parent.clone(),
                    }
                })?),
                None => None,
            };

            let (x, y, z, w) = joint.rotation;
            let id = skeleton.add_joint(joint.name.clone(), parent, Quat::from_xyzw(x, y, z, w));
            ids.insert(joint.name.as_str(), id);
        }

        Ok(skeleton)
    }
}

impl Skeleton {
    pub fn from_ron_str(source: &str) -> SkeletonLoadResult<Self> {
        let serial: SkeletonSerial = ron::de::from_str(source)?;
        serial.to_value()
    }

    pub fn load(path: impl AsRef<Path>) -> SkeletonLoadResult<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_ron_str(&source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::skeleton::JointHierarchy;

    #[test]
    fn builds_hierarchy_from_ron() {
        let skeleton = Skeleton::from_ron_str(
            r#"(
                joints: [
                    (name: "Hips"),
                    (name: "Spine", parent: Some("Hips"), rotation: (0.0, 0.0, 0.70710677, 0.70710677)),
                ],
            )"#,
        )
        .unwrap();

        let hips = skeleton.find_by_name("Hips").unwrap();
        let spine = skeleton.find_by_name("Spine").unwrap();
        assert_eq!(skeleton.parent(spine), Some(hips));
        assert_eq!(skeleton.local_rotation(hips), Some(Quat::IDENTITY));
        assert!(
            skeleton
                .local_rotation(spine)
                .unwrap()
                .abs_diff_eq(Quat::from_rotation_z(std::f32::consts::FRAC_PI_2), 1e-6)
        );
    }

    #[test]
    fn rejects_parent_declared_after_child() {
        let result = Skeleton::from_ron_str(
            r#"(joints: [(name: "Spine", parent: Some("Hips")), (name: "Hips")])"#,
        );

        assert!(matches!(
            result,
            Err(SkeletonLoadError::UnknownParent { ref joint, ref parent })
                if joint == "Spine" && parent == "Hips"
        ));
    }

    #[test]
    fn rejects_duplicate_joint_names() {
        let result = Skeleton::from_ron_str(r#"(joints: [(name: "Hips"), (name: "Hips")])"#);

        assert!(matches!(result, Err(SkeletonLoadError::DuplicateJoint(_))));
    }
}
