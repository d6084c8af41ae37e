//! Framework error type.
//!
//! The first four variants are the user-facing, locally recoverable kinds:
//! the failing operation leaves every structure untouched.  `Inconsistent`
//! is different: it means the index and the scheduler/queues disagree, which
//! only a bug in the manager can cause.

use thiserror::Error;

/// The top-level error type shared by all `dk-*` crates.
#[derive(Debug, Error)]
pub enum DkError {
    #[error("no entity with key {0:?}")]
    NotFound(String),

    #[error("an entity with key {0:?} already exists; request ignored")]
    DuplicateKeyIgnored(String),

    #[error("no subrecords waiting in the queue")]
    EmptyQueue,

    #[error("no operations recorded in that direction")]
    EmptyLog,

    #[error("internal consistency fault: {0}")]
    Inconsistent(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DkError {
    /// `true` for the kinds a caller is expected to report and carry on from.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, DkError::Inconsistent(_))
    }
}

/// Shorthand result type for all `dk-*` crates.
pub type DkResult<T> = Result<T, DkError>;
