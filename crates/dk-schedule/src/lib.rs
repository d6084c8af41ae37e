//! `dk-schedule` — the two ordering structures that sit beside the index.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                |
//! |-----------------|---------------------------------------------------------|
//! | [`scheduler`]   | `Scheduler` (`BinaryHeap` of priority/ticket slots), `ScheduledEntry` |
//! | [`queue`]       | `SubrecordQueue` (pending + processed FIFOs), `QueuedSubrecord`, `QueuePosition` |
//!
//! Neither structure owns entity data.  Both refer to entities by key, and
//! the manager is responsible for purging those keys whenever an entity
//! leaves the index.

pub mod queue;
pub mod scheduler;


pub use queue::{Lane, QueuePosition, QueuedSubrecord, SubrecordQueue};
pub use scheduler::{ScheduledEntry, Scheduler};
