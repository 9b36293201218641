use thiserror::Error;

/// Errors produced while loading a [`RetargetConfig`].
///
/// [`RetargetConfig`]: crate::core::config::RetargetConfig
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An [IO](std::io) Error
    #[error("Could not read retarget config: {0}")]
    Io(#[from] std::io::Error),
    /// A [RON](ron) Error
    #[error("Could not parse RON: {0}")]
    RonSpannedError(#[from] ron::error::SpannedError),
    #[error("Could not serialize RON: {0}")]
    RonError(#[from] ron::Error),
    #[error("Invalid side name pattern: {0}")]
    SideNamePattern(#[from] regex::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors produced while building a [`Skeleton`] from its RON description.
///
/// [`Skeleton`]: crate::core::skeleton::Skeleton
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum SkeletonLoadError {
    #[error("Could not read skeleton: {0}")]
    Io(#[from] std::io::Error),
    #[error("Could not parse RON: {0}")]
    RonSpannedError(#[from] ron::error::SpannedError),
    #[error("Joint {joint:?} names parent {parent:?}, which is not declared before it")]
    UnknownParent { joint: String, parent: String },
    #[error("Joint {0:?} is declared more than once")]
    DuplicateJoint(String),
}

pub type SkeletonLoadResult<T> = Result<T, SkeletonLoadError>;
