//! Strongly typed identifiers.

use std::fmt;

/// Insertion ticket handed out by the scheduler for every push.
///
/// Tickets increase monotonically and break ties between equal priorities
/// (earlier ticket first).  Commands keep the ticket of the entry they
/// removed so an undo can restore the entry at its original tie position.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScheduleTicket(pub u64);

impl ScheduleTicket {
    pub const ZERO: ScheduleTicket = ScheduleTicket(0);

    /// The ticket issued after `self`.
    #[inline]
    pub fn next(self) -> ScheduleTicket {
        ScheduleTicket(self.0 + 1)
    }
}

impl fmt::Display for ScheduleTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
