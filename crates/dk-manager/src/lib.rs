//! `dk-manager` — the `EntityManager` façade.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`manager`]   | `EntityManager`, `EntityView`                              |
//! | [`records`]   | `Records` (index + scheduler + queue, the `CommandTarget`) |
//! | [`builder`]   | `ManagerBuilder` (config + initial entities)               |
//! | [`report`]    | `Report` snapshot                                          |
//! | [`loader`]    | `load_entities_csv`, `load_entities_reader`, `EntitySeed`  |
//!
//! # Call flow
//!
//! ```text
//! caller ─► EntityManager::op
//!             ├─ check preconditions (NotFound / DuplicateKeyIgnored)
//!             ├─ build Command (reserve ticket / subrecord id)
//!             ├─ Records::apply(&mut command)  index + scheduler + queue
//!             └─ ActionLog::record(command) clears redo
//! undo/redo ─► ActionLog ─► Records::revert / Records::apply
//! ```
//!
//! # Quick-start
//!
//! ```rust
//! use dk_manager::EntityManager;
//!
//! let mut mgr = EntityManager::new();
//! mgr.create_entity("Seminar", "Academic", 5)?;
//! let id = mgr.register_subrecord("Seminar", "Alice")?;
//! assert_eq!(id, "P1");
//! mgr.undo()?;
//! # Ok::<(), dk_core::DkError>(())
//! ```

pub mod builder;
pub mod loader;
pub mod manager;
pub mod records;
pub mod report;


pub use builder::ManagerBuilder;
pub use loader::{EntitySeed, load_entities_csv, load_entities_reader};
pub use manager::{EntityManager, EntityView};
pub use records::Records;
pub use report::Report;
