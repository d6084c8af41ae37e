//! `Command` — one reversible mutation.
//!
//! Each variant carries everything needed both to describe the action and
//! to run it in either direction, including the scheduler tickets that fix
//! tie order and, for deletions, the subrecords and queue slots that the
//! deletion purged.

use std::fmt;

use dk_core::{ScheduleTicket, Subrecord};
use dk_schedule::QueuePosition;

#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Command {
    /// Forward: insert into the index and schedule.
    /// Inverse: delete from the index and unschedule.
    CreateEntity {
        key:      String,
        category: String,
        priority: i32,
        ticket:   ScheduleTicket,
    },

    /// Forward: append the subrecord to its entity and enqueue it.
    /// Inverse: remove it from the entity and from whichever lane holds it.
    RegisterSubrecord {
        entity_key:   String,
        display_name: String,
        generated_id: String,
    },

    /// Forward: remove `old_key`, reinsert as `new_key`, reschedule.
    /// Inverse: the same in the other direction with the old values.
    /// Subrecords and queued items follow the entity across the rename.
    UpdateEntity {
        old_key:      String,
        new_key:      String,
        old_category: String,
        new_category: String,
        old_priority: i32,
        new_priority: i32,
        old_ticket:   ScheduleTicket,
        new_ticket:   ScheduleTicket,
    },

    /// Forward: delete from the index, unschedule, purge queued subrecords.
    /// Inverse: reinsert with the saved category and subrecords, reschedule
    /// with the saved priority and ticket, restore queue slots.
    DeleteEntity {
        key:        String,
        category:   String,
        priority:   i32,
        ticket:     ScheduleTicket,
        subrecords: Vec<Subrecord>,
        queued:     Vec<QueuePosition>,
    },
}

impl Command {
    /// Short lowercase name of the variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Command::CreateEntity { .. }      => "create",
            Command::RegisterSubrecord { .. } => "register",
            Command::UpdateEntity { .. }      => "update",
            Command::DeleteEntity { .. }      => "delete",
        }
    }

    /// Key of the entity the command is about (the new key for an update).
    pub fn entity_key(&self) -> &str {
        match self {
            Command::CreateEntity { key, .. }             => key,
            Command::RegisterSubrecord { entity_key, .. } => entity_key,
            Command::UpdateEntity { new_key, .. }         => new_key,
            Command::DeleteEntity { key, .. }             => key,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::CreateEntity { key, category, priority, .. } => {
                write!(f, "create {key:?} ({category}, priority {priority})")
            }
            Command::RegisterSubrecord { entity_key, display_name, generated_id } => {
                write!(f, "register {display_name} ({generated_id}) for {entity_key:?}")
            }
            Command::UpdateEntity { old_key, new_key, new_category, new_priority, .. } => {
                write!(
                    f,
                    "update {old_key:?} to {new_key:?} ({new_category}, priority {new_priority})"
                )
            }
            Command::DeleteEntity { key, subrecords, .. } => {
                write!(f, "delete {key:?} with {} subrecord(s)", subrecords.len())
            }
        }
    }
}
