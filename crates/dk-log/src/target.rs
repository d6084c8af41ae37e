//! The seam between the log and the state it mutates.

use dk_core::DkResult;

use crate::Command;

/// State that commands can be replayed against.
///
/// # Contract
///
/// - `apply` performs the forward effect of `command`; `revert` performs its
///   inverse.  `revert(c)` after `apply(c)` must restore the state exactly.
/// - Both must check every precondition before mutating anything, so an
///   `Err` return means nothing changed.
/// - `apply` must not allocate new identities (subrecord ids, scheduler
///   tickets): everything it needs is already inside `command`.
/// - `apply` overwrites whatever `command` captures about the state it
///   removes (a deleted entity's subrecords and queue slots), so `revert`
///   always restores the state as it was just before the latest `apply`,
///   not as it was when the command was first recorded.
pub trait CommandTarget {
    fn apply(&mut self, command: &mut Command) -> DkResult<()>;

    fn revert(&mut self, command: &Command) -> DkResult<()>;
}
