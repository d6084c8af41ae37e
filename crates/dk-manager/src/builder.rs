//! Fluent builder for constructing an [`EntityManager`].

use dk_core::{DkResult, ManagerConfig, PriorityOrder};

use crate::{EntityManager, EntitySeed};

/// Fluent builder for [`EntityManager`].
///
/// # Optional inputs (have defaults)
///
/// | Method                 | Default                         |
/// |------------------------|---------------------------------|
/// | `.config(c)`           | `ManagerConfig::default()`      |
/// | `.priority_order(o)`   | `PriorityOrder::LowestFirst`    |
/// | `.seeds(v)`            | no initial entities             |
/// | `.keep_seed_history()` | seed creations are not undoable |
///
/// # Example
///
/// ```rust
/// use dk_core::PriorityOrder;
/// use dk_manager::{EntitySeed, ManagerBuilder};
///
/// let mgr = ManagerBuilder::new()
///     .priority_order(PriorityOrder::HighestFirst)
///     .seeds(vec![EntitySeed::new("Gala", "Social", 1)])
///     .build()?;
/// assert_eq!(mgr.undo_len(), 0);
/// # Ok::<(), dk_core::DkError>(())
/// ```
#[derive(Default)]
pub struct ManagerBuilder {
    config:       ManagerConfig,
    seeds:        Vec<EntitySeed>,
    keep_history: bool,
}

impl ManagerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: ManagerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn priority_order(mut self, order: PriorityOrder) -> Self {
        self.config.priority_order = order;
        self
    }

    /// Entities to create before the manager is handed out.  Duplicate keys
    /// among the seeds are skipped (first one wins).
    pub fn seeds(mut self, seeds: Vec<EntitySeed>) -> Self {
        self.seeds = seeds;
        self
    }

    /// Keep the seed creations on the undo stack.  By default the manager
    /// starts with an empty log, as if the seeds had always been there.
    pub fn keep_seed_history(mut self) -> Self {
        self.keep_history = true;
        self
    }

    /// Validate the config, create the seeds, and return the manager.
    pub fn build(self) -> DkResult<EntityManager> {
        let mut manager = EntityManager::with_config(self.config)?;
        manager.create_many(self.seeds)?;
        if !self.keep_history {
            manager.forget_history();
        }
        Ok(manager)
    }
}
