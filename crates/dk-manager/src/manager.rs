//! `EntityManager` — the only owner of mutable record state.

use tracing::{debug, error, warn};

use dk_core::{DkError, DkResult, Entity, ManagerConfig};
use dk_index::InOrder;
use dk_log::{ActionLog, Command, CommandTarget};
use dk_schedule::{QueuedSubrecord, ScheduledEntry};

use crate::{EntitySeed, Records, Report};

/// An entity together with its current scheduler priority.
#[derive(Clone, Copy, Debug)]
pub struct EntityView<'a> {
    pub entity:   &'a Entity,
    pub priority: i32,
}

/// Façade binding the index, scheduler, subrecord queue and action log.
///
/// Every mutating call either applies completely and records one
/// [`Command`], or returns an error and changes nothing.  Subrecord ids come
/// from a per-instance counter, so independent managers never interfere.
#[derive(Debug)]
pub struct EntityManager {
    config:         ManagerConfig,
    records:        Records,
    log:            ActionLog,
    next_subrecord: u64,
}

impl Default for EntityManager {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityManager {
    /// A manager with the default configuration (lowest priority first,
    /// subrecord ids `P1`, `P2`, …).
    pub fn new() -> Self {
        Self::from_valid_config(ManagerConfig::default())
    }

    /// A manager with `config`, which is validated first.
    pub fn with_config(config: ManagerConfig) -> DkResult<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: ManagerConfig) -> Self {
        Self {
            records:        Records::new(config.priority_order),
            log:            ActionLog::new(),
            next_subrecord: config.first_subrecord_number,
            config,
        }
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    // ── Mutating operations ───────────────────────────────────────────────

    /// Create and schedule a new entity.
    ///
    /// An existing `key` yields `DuplicateKeyIgnored`: the existing entity,
    /// its subrecords and the redo stack are all left untouched.
    pub fn create_entity(&mut self, key: &str, category: &str, priority: i32) -> DkResult<()> {
        if self.records.index.contains(key) {
            warn!(key = %key, "duplicate create ignored");
            return Err(DkError::DuplicateKeyIgnored(key.to_owned()));
        }
        let command = Command::CreateEntity {
            key:      key.to_owned(),
            category: category.to_owned(),
            priority,
            ticket:   self.records.scheduler.issue_ticket(),
        };
        self.execute(command)
    }

    /// Create every seed in order; each success is its own undoable command.
    ///
    /// Returns the keys that were ignored as duplicates.  Any other error
    /// stops the batch.
    pub fn create_many(&mut self, seeds: impl IntoIterator<Item = EntitySeed>) -> DkResult<Vec<String>> {
        let mut ignored = Vec::new();
        for seed in seeds {
            match self.create_entity(&seed.key, &seed.category, seed.priority) {
                Ok(()) => {}
                Err(DkError::DuplicateKeyIgnored(key)) => ignored.push(key),
                Err(err) => return Err(err),
            }
        }
        Ok(ignored)
    }

    /// Rename and/or re-categorise and reschedule an entity.
    ///
    /// `new_key` may equal `old_key`.  A `new_key` owned by a different live
    /// entity is rejected with `DuplicateKeyIgnored(new_key)` and nothing
    /// changes.
    pub fn update_entity(
        &mut self,
        old_key:  &str,
        new_key:  &str,
        category: &str,
        priority: i32,
    ) -> DkResult<()> {
        let Some(current) = self.records.index.search(old_key) else {
            return Err(DkError::NotFound(old_key.to_owned()));
        };
        if old_key != new_key && self.records.index.contains(new_key) {
            warn!(old_key = %old_key, new_key = %new_key, "rename collides with a live entity");
            return Err(DkError::DuplicateKeyIgnored(new_key.to_owned()));
        }
        let old_category = current.category.clone();
        let scheduled = self.scheduled_entry(old_key)?.clone();

        let command = Command::UpdateEntity {
            old_key:      old_key.to_owned(),
            new_key:      new_key.to_owned(),
            old_category,
            new_category: category.to_owned(),
            old_priority: scheduled.priority,
            new_priority: priority,
            old_ticket:   scheduled.ticket,
            new_ticket:   self.records.scheduler.issue_ticket(),
        };
        self.execute(command)
    }

    /// Delete an entity, unschedule it and purge its queued subrecords.
    pub fn delete_entity(&mut self, key: &str) -> DkResult<()> {
        let Some(current) = self.records.index.search(key) else {
            return Err(DkError::NotFound(key.to_owned()));
        };
        let category = current.category.clone();
        let scheduled = self.scheduled_entry(key)?;

        // Subrecords and queue slots are filled in by `apply`.
        let command = Command::DeleteEntity {
            key:        key.to_owned(),
            category,
            priority:   scheduled.priority,
            ticket:     scheduled.ticket,
            subrecords: Vec::new(),
            queued:     Vec::new(),
        };
        self.execute(command)
    }

    /// Attach a new subrecord to `entity_key` and enqueue it for processing.
    ///
    /// Returns the generated id.  The id counter only advances on success
    /// and never rewinds, even when the registration is undone.
    pub fn register_subrecord(&mut self, entity_key: &str, display_name: &str) -> DkResult<String> {
        if !self.records.index.contains(entity_key) {
            return Err(DkError::NotFound(entity_key.to_owned()));
        }
        let generated_id = self.config.subrecord_id(self.next_subrecord);
        let command = Command::RegisterSubrecord {
            entity_key:   entity_key.to_owned(),
            display_name: display_name.to_owned(),
            generated_id: generated_id.clone(),
        };
        self.execute(command)?;
        self.next_subrecord += 1;
        Ok(generated_id)
    }

    /// Move the front pending subrecord to the processed lane.
    ///
    /// Processing is not an undoable command.
    pub fn process_next(&mut self) -> DkResult<QueuedSubrecord> {
        let item = self.records.queue.dequeue_front().ok_or(DkError::EmptyQueue)?;
        debug!(entity = %item.entity_key, id = %item.subrecord.generated_id, "processed");
        Ok(item)
    }

    /// The subrecord `process_next` would return.
    pub fn peek_next(&self) -> DkResult<&QueuedSubrecord> {
        self.records.queue.peek_front().ok_or(DkError::EmptyQueue)
    }

    /// Revert the most recent command.  Returns its description.
    pub fn undo(&mut self) -> DkResult<String> {
        match self.log.undo(&mut self.records) {
            Ok(command) => {
                let description = command.to_string();
                debug!(command = %description, "undone");
                Ok(description)
            }
            Err(err) => Err(self.fault(err.into())),
        }
    }

    /// Re-apply the most recently undone command.  Returns its description.
    pub fn redo(&mut self) -> DkResult<String> {
        match self.log.redo(&mut self.records) {
            Ok(command) => {
                let description = command.to_string();
                debug!(command = %description, "redone");
                Ok(description)
            }
            Err(err) => Err(self.fault(err.into())),
        }
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Exact-key lookup with the entity's current priority.
    pub fn search(&self, key: &str) -> DkResult<EntityView<'_>> {
        let entity = self
            .records
            .index
            .search(key)
            .ok_or_else(|| DkError::NotFound(key.to_owned()))?;
        let priority = self.scheduled_entry(key)?.priority;
        Ok(EntityView { entity, priority })
    }

    /// All entities in ascending key order.
    pub fn entities(&self) -> InOrder<'_> {
        self.records.index.in_order()
    }

    /// Entities whose category matches ignoring case, ascending key order.
    pub fn by_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Entity> + 'a {
        self.records.index.by_category(category)
    }

    /// Scheduler listing, most urgent first.
    pub fn scheduled(&self) -> impl Iterator<Item = &ScheduledEntry> + '_ {
        self.records.scheduler.peek_all_ascending()
    }

    /// Snapshot of every structure, for reporting.
    pub fn report(&self) -> Report {
        Report::capture(&self.records)
    }

    pub fn records(&self) -> &Records {
        &self.records
    }

    pub fn undo_len(&self) -> usize {
        self.log.undo_len()
    }

    pub fn redo_len(&self) -> usize {
        self.log.redo_len()
    }

    /// The command `undo` would revert next.
    pub fn peek_undo(&self) -> Option<&Command> {
        self.log.peek_undo()
    }

    /// The command `redo` would re-apply next.
    pub fn peek_redo(&self) -> Option<&Command> {
        self.log.peek_redo()
    }

    /// Cross-check the index, scheduler and queue.
    pub fn verify(&self) -> DkResult<()> {
        self.records.verify().map_err(|e| self.fault(e))
    }

    // ── Internals ─────────────────────────────────────────────────────────

    /// Drop both stacks; used after seeding so seeds cannot be undone.
    pub(crate) fn forget_history(&mut self) {
        self.log.clear();
    }

    /// Apply a freshly built command and record it.
    fn execute(&mut self, mut command: Command) -> DkResult<()> {
        self.records.apply(&mut command).map_err(|e| self.fault(e))?;
        debug!(%command, "applied");
        self.log.record(command);
        Ok(())
    }

    fn scheduled_entry(&self, key: &str) -> DkResult<&ScheduledEntry> {
        self.records.scheduler.entry_for(key).ok_or_else(|| {
            self.fault(DkError::Inconsistent(format!("live entity {key:?} is not scheduled")))
        })
    }

    /// Log consistency faults; pass every error through unchanged.
    fn fault(&self, err: DkError) -> DkError {
        if !err.is_recoverable() {
            error!(error = %err, "record structures out of step");
        }
        err
    }
}
