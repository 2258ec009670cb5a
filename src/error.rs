use std::path::PathBuf;
use thiserror::Error;

/// Terminal failure modes of a single compression run.
///
/// Every variant ends the invocation; there is no retry or partial-success
/// continuation. `exit_code` maps each kind onto the process exit status.
#[derive(Debug, Error)]
pub enum Error {
    #[error("file not found at '{}'", .0.display())]
    InputNotFound(PathBuf),

    #[error("{0} not found; install it and ensure it is in your system PATH")]
    ToolNotFound(String),

    #[error("ffmpeg exited with code {code}")]
    ProcessFailure { code: i32 },

    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl Error {
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::InputNotFound(_) => 1,
            Error::ToolNotFound(_) => 2,
            Error::ProcessFailure { .. } => 3,
            Error::Unexpected(_) => 4,
        }
    }
}
