//! `Scheduler` — min-priority queue of `(priority, entity key)` pairs.
//!
//! # Ordering
//!
//! Entries are ordered by `PriorityOrder::rank(priority)` and then by
//! `ScheduleTicket`, so equal priorities list in insertion order.  Tickets
//! are kept by commands: re-pushing an entry with its original ticket puts
//! it back in exactly the tie position it held before removal.
//!
//! # Removal
//!
//! `BinaryHeap` has no arbitrary-element delete.  `remove_by_key` drains the
//! heap, drops matching slots, and heapifies the rest: O(n), paid only on
//! delete / rename / undo, never on listing.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::fmt;
use std::mem;

use dk_core::{PriorityOrder, ScheduleTicket};

/// One scheduler entry as seen by callers.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScheduledEntry {
    pub priority:   i32,
    pub entity_key: String,
    pub ticket:     ScheduleTicket,
}

/// Heap slot; `rank` is precomputed from the scheduler's `PriorityOrder`.
#[derive(Clone, Debug)]
struct Slot {
    rank:  i64,
    entry: ScheduledEntry,
}

impl Slot {
    #[inline]
    fn sort_key(&self) -> (i64, ScheduleTicket) {
        (self.rank, self.entry.ticket)
    }
}

impl PartialEq for Slot {
    fn eq(&self, other: &Self) -> bool {
        self.sort_key() == other.sort_key()
    }
}

impl Eq for Slot {}

impl PartialOrd for Slot {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Slot {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

// ── Scheduler ─────────────────────────────────────────────────────────────────

/// Priority-ordered, non-owning view over live entities.
#[derive(Clone, Default)]
pub struct Scheduler {
    heap:        BinaryHeap<Reverse<Slot>>,
    order:       PriorityOrder,
    next_ticket: ScheduleTicket,
}

impl Scheduler {
    pub fn new(order: PriorityOrder) -> Self {
        Self { heap: BinaryHeap::new(), order, next_ticket: ScheduleTicket::ZERO }
    }

    pub fn order(&self) -> PriorityOrder {
        self.order
    }

    /// Reserve the next insertion ticket without pushing anything.
    ///
    /// Commands reserve their ticket up front so that the forward effect and
    /// every later redo push the entry with the same tie position.
    pub fn issue_ticket(&mut self) -> ScheduleTicket {
        let ticket = self.next_ticket;
        self.next_ticket = ticket.next();
        ticket
    }

    /// Schedule `entity_key` at `priority` with a freshly issued ticket.
    pub fn push(&mut self, priority: i32, entity_key: &str) -> ScheduleTicket {
        let ticket = self.issue_ticket();
        self.push_with_ticket(ticket, priority, entity_key);
        ticket
    }

    /// Schedule with a previously issued ticket (redo, or undo of a removal).
    pub fn push_with_ticket(&mut self, ticket: ScheduleTicket, priority: i32, entity_key: &str) {
        if ticket >= self.next_ticket {
            self.next_ticket = ticket.next();
        }
        self.heap.push(Reverse(Slot {
            rank:  self.order.rank(priority),
            entry: ScheduledEntry { priority, entity_key: entity_key.to_owned(), ticket },
        }));
    }

    /// Lazily list every entry, most urgent first, without consuming the queue.
    ///
    /// The listing works on a heap of borrowed slots built at call time, so
    /// each call is an independent snapshot.
    pub fn peek_all_ascending(&self) -> impl Iterator<Item = &ScheduledEntry> + '_ {
        let mut view: BinaryHeap<Reverse<&Slot>> =
            self.heap.iter().map(|Reverse(slot)| Reverse(slot)).collect();
        std::iter::from_fn(move || view.pop().map(|Reverse(slot)| &slot.entry))
    }

    /// The most urgent entry, if any.
    pub fn peek(&self) -> Option<&ScheduledEntry> {
        self.heap.peek().map(|Reverse(slot)| &slot.entry)
    }

    /// Remove every entry for `entity_key`, returning them in ticket order.
    pub fn remove_by_key(&mut self, entity_key: &str) -> Vec<ScheduledEntry> {
        let (removed, kept): (Vec<_>, Vec<_>) = mem::take(&mut self.heap)
            .into_vec()
            .into_iter()
            .partition(|Reverse(slot)| slot.entry.entity_key == entity_key);
        self.heap = BinaryHeap::from(kept);

        let mut removed: Vec<ScheduledEntry> =
            removed.into_iter().map(|Reverse(slot)| slot.entry).collect();
        removed.sort_by_key(|e| e.ticket);
        removed
    }

    /// The entry currently scheduled for `entity_key`.
    pub fn entry_for(&self, entity_key: &str) -> Option<&ScheduledEntry> {
        self.heap
            .iter()
            .map(|Reverse(slot)| &slot.entry)
            .find(|e| e.entity_key == entity_key)
    }

    pub fn contains_key(&self, entity_key: &str) -> bool {
        self.entry_for(entity_key).is_some()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("order", &self.order)
            .field("entries", &self.peek_all_ascending().collect::<Vec<_>>())
            .finish()
    }
}
