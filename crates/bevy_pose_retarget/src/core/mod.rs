pub mod aliases;
pub mod capture;
pub mod classification;
pub mod config;
pub mod corrective;
pub mod engine;
pub mod errors;
pub mod joint_resolver;
pub mod mirroring;
pub mod orientation;
pub mod plugin;
pub mod pose_source;
pub mod skeleton;
pub mod state;
pub mod swizzle;
pub mod systems;

pub mod prelude {
    use super::*;
    pub use capture::capture_pose;
    pub use classification::{JointClass, JointRole, Side, classify};
    pub use config::RetargetConfig;
    pub use engine::{Retargeter, RetargetSummary};
    pub use errors::*;
    pub use joint_resolver::JointIndex;
    pub use plugin::*;
    pub use pose_source::{PoseKind, PoseMeta, PoseSource, SourceKind};
    pub use skeleton::{JointHierarchy, JointId, Skeleton};
    pub use state::{BindState, RetargetState};
    pub use systems::{PendingPose, ResetRigsToBind, RetargetRig};
}
