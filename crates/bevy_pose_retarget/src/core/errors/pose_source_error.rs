use thiserror::Error;

/// Errors produced while reading a pose source from its wire format.
///
/// Malformed *entries* inside an otherwise valid pose source are never errors: they are
/// skipped while parsing. Only a document that cannot be interpreted at all ends up here.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum PoseSourceError {
    #[error("Could not parse pose source JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Could not read pose source: {0}")]
    Io(#[from] std::io::Error),
    #[error("Pose source must be a mapping, found {0}")]
    NotAMapping(&'static str),
}

pub type PoseSourceResult<T> = Result<T, PoseSourceError>;
