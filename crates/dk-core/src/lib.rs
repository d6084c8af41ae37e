//! `dk-core` — foundational types for the `docket` record manager.
//!
//! This crate is a dependency of every other `dk-*` crate.  It has no `dk-*`
//! dependencies and only `thiserror` (plus optional `serde`) externally.
//!
//! # What lives here
//!
//! | Module        | Contents                                                 |
//! |---------------|----------------------------------------------------------|
//! | [`record`]    | `Entity`, `Subrecord`, `category_eq`                     |
//! | [`ids`]       | `ScheduleTicket`                                         |
//! | [`config`]    | `ManagerConfig`, `PriorityOrder`                         |
//! | [`error`]     | `DkError`, `DkResult`                                    |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod ids;
pub mod record;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{ManagerConfig, PriorityOrder};
pub use error::{DkError, DkResult};
pub use ids::ScheduleTicket;
pub use record::{Entity, Subrecord, category_eq};
