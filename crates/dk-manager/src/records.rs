//! `Records` — the three structures that must always agree.
//!
//! Every method here checks its preconditions before touching anything, so
//! an `Err` means no structure changed.  A failed precondition inside
//! `apply`/`revert` is always `DkError::Inconsistent`: the manager validated
//! the user-facing conditions before building the command.

use dk_core::{DkError, DkResult, Entity, PriorityOrder, ScheduleTicket, Subrecord};
use dk_index::EntityIndex;
use dk_log::{Command, CommandTarget};
use dk_schedule::{QueuePosition, QueuedSubrecord, Scheduler, SubrecordQueue};

/// What [`Records::remove`] took out of the index and queue.
struct Removed {
    entity: Entity,
    queued: Vec<QueuePosition>,
}

/// Index, scheduler and subrecord queue, mutated only as a unit.
#[derive(Debug)]
pub struct Records {
    pub(crate) index:     EntityIndex,
    pub(crate) scheduler: Scheduler,
    pub(crate) queue:     SubrecordQueue,
}

impl Records {
    pub fn new(order: PriorityOrder) -> Self {
        Self {
            index:     EntityIndex::new(),
            scheduler: Scheduler::new(order),
            queue:     SubrecordQueue::new(),
        }
    }

    pub fn index(&self) -> &EntityIndex {
        &self.index
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn queue(&self) -> &SubrecordQueue {
        &self.queue
    }

    /// Insert and schedule a new entity.
    fn insert(&mut self, key: &str, category: &str, priority: i32, ticket: ScheduleTicket) -> DkResult<()> {
        if !self.index.insert(key, category) {
            return Err(inconsistent(format!("{key:?} is already live")));
        }
        self.scheduler.push_with_ticket(ticket, priority, key);
        Ok(())
    }

    /// Take an entity out of the index and purge every reference to it.
    fn remove(&mut self, key: &str) -> DkResult<Removed> {
        let entity = self
            .index
            .delete(key)
            .ok_or_else(|| inconsistent(format!("{key:?} is not live")))?;
        self.scheduler.remove_by_key(key);
        let queued = self.queue.purge_entity(key);
        Ok(Removed { entity, queued })
    }

    /// Move `from` to `to` (possibly the same key) with a new category and
    /// schedule slot.  Subrecords and queued items follow the entity.
    fn rename(
        &mut self,
        from:     &str,
        to:       &str,
        category: &str,
        priority: i32,
        ticket:   ScheduleTicket,
    ) -> DkResult<()> {
        if !self.index.contains(from) {
            return Err(inconsistent(format!("rename source {from:?} is not live")));
        }
        if from != to && self.index.contains(to) {
            return Err(inconsistent(format!("rename target {to:?} is already live")));
        }

        let mut entity = self
            .index
            .delete(from)
            .ok_or_else(|| inconsistent(format!("rename source {from:?} vanished")))?;
        self.scheduler.remove_by_key(from);

        entity.key = to.to_owned();
        entity.category = category.to_owned();
        if self.index.insert_entity(entity).is_err() {
            return Err(inconsistent(format!("rename target {to:?} appeared mid-rename")));
        }
        self.scheduler.push_with_ticket(ticket, priority, to);
        self.queue.rekey(from, to);
        Ok(())
    }

    fn attach(&mut self, entity_key: &str, subrecord: Subrecord) -> DkResult<()> {
        let entity = self
            .index
            .search_mut(entity_key)
            .ok_or_else(|| inconsistent(format!("subrecord owner {entity_key:?} is not live")))?;
        entity.subrecords.push(subrecord.clone());
        self.queue.enqueue(QueuedSubrecord::new(entity_key, subrecord));
        Ok(())
    }

    fn detach(&mut self, entity_key: &str, generated_id: &str) -> DkResult<()> {
        let entity = self
            .index
            .search_mut(entity_key)
            .ok_or_else(|| inconsistent(format!("subrecord owner {entity_key:?} is not live")))?;
        let at = entity
            .subrecord_position(generated_id)
            .ok_or_else(|| inconsistent(format!("{generated_id} is not attached to {entity_key:?}")))?;
        entity.subrecords.remove(at);
        self.queue.remove_subrecord(generated_id);
        Ok(())
    }

    /// Check that the scheduler and queue reference live entities only and
    /// that every live entity is scheduled exactly once.
    pub fn verify(&self) -> DkResult<()> {
        for entry in self.scheduler.peek_all_ascending() {
            if !self.index.contains(&entry.entity_key) {
                return Err(inconsistent(format!(
                    "scheduler references deleted key {:?}",
                    entry.entity_key
                )));
            }
        }
        if self.scheduler.len() != self.index.len() {
            return Err(inconsistent(format!(
                "{} scheduler entries for {} live entities",
                self.scheduler.len(),
                self.index.len()
            )));
        }
        for item in self.queue.pending().chain(self.queue.processed()) {
            let owner = self.index.search(&item.entity_key).ok_or_else(|| {
                inconsistent(format!("queue references deleted key {:?}", item.entity_key))
            })?;
            if owner.subrecord_position(&item.subrecord.generated_id).is_none() {
                return Err(inconsistent(format!(
                    "queued {} is not attached to {:?}",
                    item.subrecord.generated_id, item.entity_key
                )));
            }
        }
        Ok(())
    }
}

impl CommandTarget for Records {
    fn apply(&mut self, command: &mut Command) -> DkResult<()> {
        match command {
            Command::CreateEntity { key, category, priority, ticket } => {
                self.insert(key, category, *priority, *ticket)
            }
            Command::RegisterSubrecord { entity_key, display_name, generated_id } => {
                self.attach(entity_key, Subrecord::new(display_name.as_str(), generated_id.as_str()))
            }
            Command::UpdateEntity { old_key, new_key, new_category, new_priority, new_ticket, .. } => {
                self.rename(old_key, new_key, new_category, *new_priority, *new_ticket)
            }
            Command::DeleteEntity { key, category, priority, ticket, subrecords, queued } => {
                let Some(entry) = self.scheduler.entry_for(key) else {
                    return Err(inconsistent(format!("{key:?} is not scheduled")));
                };
                let (current_priority, current_ticket) = (entry.priority, entry.ticket);
                let removed = self.remove(key)?;
                // Revert restores exactly what this apply took.
                *category = removed.entity.category;
                *priority = current_priority;
                *ticket = current_ticket;
                *subrecords = removed.entity.subrecords;
                *queued = removed.queued;
                Ok(())
            }
        }
    }

    fn revert(&mut self, command: &Command) -> DkResult<()> {
        match command {
            Command::CreateEntity { key, .. } => self.remove(key).map(drop),
            Command::RegisterSubrecord { entity_key, generated_id, .. } => {
                self.detach(entity_key, generated_id)
            }
            Command::UpdateEntity { old_key, new_key, old_category, old_priority, old_ticket, .. } => {
                self.rename(new_key, old_key, old_category, *old_priority, *old_ticket)
            }
            Command::DeleteEntity { key, category, priority, ticket, subrecords, queued } => {
                let entity = Entity {
                    key:        key.clone(),
                    category:   category.clone(),
                    subrecords: subrecords.clone(),
                };
                if self.index.insert_entity(entity).is_err() {
                    return Err(inconsistent(format!("cannot restore {key:?}: key is live")));
                }
                self.scheduler.push_with_ticket(*ticket, *priority, key);
                self.queue.restore(queued.iter().cloned());
                Ok(())
            }
        }
    }
}

fn inconsistent(detail: String) -> DkError {
    DkError::Inconsistent(detail)
}
