//! # Bevy Pose Retarget
//!
//! **Bevy Pose Retarget** applies skeletal poses authored in one convention onto arbitrary
//! skeletons whose joint names, bind orientations and local axes are not known in advance.
//!
//! ## Introduction
//!
//! A pose is a [`PoseSource`]: a mapping from joint-name tokens to orientations, plus metadata
//! describing where it came from. Pose sources are usually read from JSON:
//!
//! ```json
//! {
//!     "meta": { "type": "Hands", "side": "Right", "targetSide": "Left" },
//!     "body": { "RightHandIndex1": { "q": [0.0, 0.0, 0.259, 0.966] } }
//! }
//! ```
//!
//! or produced from pose-estimator output with the converters in [`sources`].
//!
//! Applying a pose involves two parts:
//! - the joint resolver ([`JointIndex`]), which finds the joint a token refers to regardless of
//!   case, authoring-tool namespaces (`mixamorig:`, `Character:`) or naming convention
//!   (`LeftForeArm`, `L_Forearm`, `lowerarm_l`, ...), and
//! - the [`Retargeter`], which classifies each resolved joint by its anatomical role and
//!   computes its new local orientation relative to a bind pose captured once per skeleton.
//!
//! Tuning constants live in [`RetargetConfig`], stored as RON in `*.retarget.ron` files.
//!
//! ## Usage without Bevy's ECS
//!
//! Anything implementing [`JointHierarchy`] can be retargeted. The crate ships a plain
//! [`Skeleton`], which can be described in RON:
//!
//! ```ron
//! (
//!     joints: [
//!         (name: "mixamorig:Hips"),
//!         (name: "mixamorig:Spine", parent: Some("mixamorig:Hips")),
//!     ],
//! )
//! ```
//!
//! Each skeleton needs its own [`RetargetState`], which holds the bind snapshot and the
//! name index and must be kept for as long as the skeleton lives.
//!
//! The `retarget_pose` binary wraps this: it reads a skeleton, a pose and optionally a config,
//! and prints the resulting pose as JSON.
//!
//! ## Usage with Bevy
//!
//! Add [`PoseRetargetPlugin`], put a [`RetargetRig`] on the root entity of a character and
//! insert a [`PendingPose`] on that same entity whenever a pose should be applied. The joint
//! tree is read from the `Name` and `Transform` of the root's descendants. Triggering
//! [`ResetRigsToBind`] puts every rig back into its bind pose.
//!
//! [`PoseSource`]: core::pose_source::PoseSource
//! [`JointIndex`]: core::joint_resolver::JointIndex
//! [`Retargeter`]: core::engine::Retargeter
//! [`RetargetConfig`]: core::config::RetargetConfig
//! [`JointHierarchy`]: core::skeleton::JointHierarchy
//! [`Skeleton`]: core::skeleton::Skeleton
//! [`RetargetState`]: core::state::RetargetState
//! [`PoseRetargetPlugin`]: core::plugin::PoseRetargetPlugin
//! [`RetargetRig`]: core::systems::RetargetRig
//! [`PendingPose`]: core::systems::PendingPose
//! [`ResetRigsToBind`]: core::systems::ResetRigsToBind

pub mod core;
pub mod sources;

pub mod prelude {
    pub use super::core::prelude::*;
    pub use super::sources::smpl::{mano_hand_pose, root_roll_correction, smpl_body_pose};
}
