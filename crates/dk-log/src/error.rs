use dk_core::DkError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LogError {
    #[error("no operations to undo")]
    NothingToUndo,

    #[error("no operations to redo")]
    NothingToRedo,

    #[error("replaying command failed: {0}")]
    Replay(#[from] DkError),
}

impl From<LogError> for DkError {
    fn from(err: LogError) -> Self {
        match err {
            LogError::NothingToUndo | LogError::NothingToRedo => DkError::EmptyLog,
            LogError::Replay(inner) => inner,
        }
    }
}

pub type LogResult<T> = Result<T, LogError>;
