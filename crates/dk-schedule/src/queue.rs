//! `SubrecordQueue` — strict-arrival FIFOs for subrecords.
//!
//! A registered subrecord enters the *pending* lane.  Processing (check-in,
//! delivery) moves the front of the pending lane to the back of the
//! *processed* lane.  There is no priority here; only arrival order counts.

use std::collections::VecDeque;

use dk_core::Subrecord;

/// A queued subrecord together with the key of the entity it belongs to.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueuedSubrecord {
    pub entity_key: String,
    pub subrecord:  Subrecord,
}

impl QueuedSubrecord {
    pub fn new(entity_key: impl Into<String>, subrecord: Subrecord) -> Self {
        Self { entity_key: entity_key.into(), subrecord }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Lane {
    Pending,
    Processed,
}

/// Where a removed item sat, so it can be put back in the same place.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueuePosition {
    pub lane:  Lane,
    pub index: usize,
    pub item:  QueuedSubrecord,
}

#[derive(Clone, Default, PartialEq, Eq, Debug)]
pub struct SubrecordQueue {
    pending:   VecDeque<QueuedSubrecord>,
    processed: VecDeque<QueuedSubrecord>,
}

impl SubrecordQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append to the back of the pending lane.
    pub fn enqueue(&mut self, item: QueuedSubrecord) {
        self.pending.push_back(item);
    }

    /// Move the front pending item to the processed lane and return it.
    pub fn dequeue_front(&mut self) -> Option<QueuedSubrecord> {
        let item = self.pending.pop_front()?;
        self.processed.push_back(item.clone());
        Some(item)
    }

    /// The next item `dequeue_front` would return.
    pub fn peek_front(&self) -> Option<&QueuedSubrecord> {
        self.pending.front()
    }

    pub fn pending(&self) -> impl Iterator<Item = &QueuedSubrecord> + '_ {
        self.pending.iter()
    }

    pub fn processed(&self) -> impl Iterator<Item = &QueuedSubrecord> + '_ {
        self.processed.iter()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn processed_len(&self) -> usize {
        self.processed.len()
    }

    /// Remove the item carrying `generated_id` from whichever lane holds it.
    pub fn remove_subrecord(&mut self, generated_id: &str) -> Option<QueuePosition> {
        for lane in [Lane::Pending, Lane::Processed] {
            let items = self.lane_mut(lane);
            if let Some(index) = items.iter().position(|q| q.subrecord.generated_id == generated_id) {
                let item = items.remove(index)?;
                return Some(QueuePosition { lane, index, item });
            }
        }
        None
    }

    /// Remove every item belonging to `entity_key` from both lanes.
    ///
    /// Positions are reported per lane in ascending index order, which is
    /// the order [`restore`](Self::restore) needs to re-insert them.
    pub fn purge_entity(&mut self, entity_key: &str) -> Vec<QueuePosition> {
        let mut purged = Vec::new();
        for lane in [Lane::Pending, Lane::Processed] {
            let items = self.lane_mut(lane);
            let mut index = 0;
            let mut original = 0;
            while index < items.len() {
                if items[index].entity_key == entity_key {
                    if let Some(item) = items.remove(index) {
                        purged.push(QueuePosition { lane, index: original, item });
                    }
                } else {
                    index += 1;
                }
                original += 1;
            }
        }
        purged
    }

    /// Put previously removed items back at their recorded positions.
    ///
    /// Indices past the end of a lane (the lane shrank since the removal)
    /// append instead.
    pub fn restore(&mut self, positions: impl IntoIterator<Item = QueuePosition>) {
        for QueuePosition { lane, index, item } in positions {
            let items = self.lane_mut(lane);
            let at = index.min(items.len());
            items.insert(at, item);
        }
    }

    /// Re-point every queued item of `old_key` to `new_key`.  Returns the
    /// number of items touched.
    pub fn rekey(&mut self, old_key: &str, new_key: &str) -> usize {
        let mut touched = 0;
        for item in self.pending.iter_mut().chain(self.processed.iter_mut()) {
            if item.entity_key == old_key {
                item.entity_key = new_key.to_owned();
                touched += 1;
            }
        }
        touched
    }

    /// `true` if any item in either lane refers to `entity_key`.
    pub fn references(&self, entity_key: &str) -> bool {
        self.pending
            .iter()
            .chain(self.processed.iter())
            .any(|q| q.entity_key == entity_key)
    }

    fn lane_mut(&mut self, lane: Lane) -> &mut VecDeque<QueuedSubrecord> {
        match lane {
            Lane::Pending   => &mut self.pending,
            Lane::Processed => &mut self.processed,
        }
    }
}
