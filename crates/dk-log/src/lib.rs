//! `dk-log` — command pattern undo/redo.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`command`]   | `Command` (closed enum of reversible mutations)           |
//! | [`target`]    | `CommandTarget` trait (whatever owns the mutated state)   |
//! | [`log`]       | `ActionLog` (undo + redo stacks)                          |
//! | [`error`]     | `LogError`, `LogResult<T>`                                |
//!
//! # State machine
//!
//! ```text
//! record(c)  → push c on undo, clear redo
//! undo()     → pop undo, target.revert(c), push c on redo
//! redo()     → pop redo, target.apply(c),  push c on undo
//! ```
//!
//! A failed `revert`/`apply` leaves the command where it was.

pub mod command;
pub mod error;
pub mod log;
pub mod target;

#[cfg(test)]
mod tests;

pub use command::Command;
pub use error::{LogError, LogResult};
pub use log::ActionLog;
pub use target::CommandTarget;
