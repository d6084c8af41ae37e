//! `Report` — an owned snapshot of all record state.
//!
//! Two reports compare equal exactly when the index holds the same entities
//! (with the same subrecords), the scheduler lists the same entries in the
//! same order, and both queue lanes hold the same items in the same order.

use dk_core::Entity;
use dk_schedule::{QueuedSubrecord, ScheduledEntry};

use crate::Records;

#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Report {
    /// Ascending key order, each with its subrecords.
    pub entities:  Vec<Entity>,
    /// Most urgent first.
    pub schedule:  Vec<ScheduledEntry>,
    /// Registered but not yet processed, arrival order.
    pub pending:   Vec<QueuedSubrecord>,
    /// Already processed (checked in / delivered), processing order.
    pub processed: Vec<QueuedSubrecord>,
}

impl Report {
    pub(crate) fn capture(records: &Records) -> Self {
        Self {
            entities:  records.index().in_order().cloned().collect(),
            schedule:  records.scheduler().peek_all_ascending().cloned().collect(),
            pending:   records.queue().pending().cloned().collect(),
            processed: records.queue().processed().cloned().collect(),
        }
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn processed_count(&self) -> usize {
        self.processed.len()
    }

    /// Subrecords attached across all entities.
    pub fn subrecord_count(&self) -> usize {
        self.entities.iter().map(|e| e.subrecords.len()).sum()
    }
}
