mod load_error;
mod pose_source_error;

pub use load_error::*;
pub use pose_source_error::*;
