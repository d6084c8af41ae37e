//! Manager configuration.
//!
//! Typically built in code or loaded from a JSON/TOML file by the
//! application crate (with the `serde` feature) and handed to
//! `dk_manager::ManagerBuilder`.

use crate::{DkError, DkResult};

// ── PriorityOrder ─────────────────────────────────────────────────────────────

/// Which end of the priority scale is most urgent.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PriorityOrder {
    /// Priority 1 comes before priority 10.
    #[default]
    LowestFirst,
    /// Priority 10 comes before priority 1.
    HighestFirst,
}

impl PriorityOrder {
    /// Map a priority onto a rank where a smaller rank is always served first.
    #[inline]
    pub fn rank(self, priority: i32) -> i64 {
        match self {
            PriorityOrder::LowestFirst  => i64::from(priority),
            PriorityOrder::HighestFirst => -i64::from(priority),
        }
    }
}

// ── ManagerConfig ─────────────────────────────────────────────────────────────

/// Construction-time settings for an `EntityManager`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ManagerConfig {
    /// Ordering used by the scheduler's ascending listing.
    pub priority_order: PriorityOrder,

    /// Prefix of generated subrecord ids (`"P"` gives `P1`, `P2`, …).
    pub subrecord_prefix: String,

    /// Counter value used for the first generated subrecord id.
    pub first_subrecord_number: u64,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            priority_order:         PriorityOrder::LowestFirst,
            subrecord_prefix:       "P".to_owned(),
            first_subrecord_number: 1,
        }
    }
}

impl ManagerConfig {
    /// Reject settings that would produce ambiguous subrecord ids.
    pub fn validate(&self) -> DkResult<()> {
        if self.subrecord_prefix.is_empty() {
            return Err(DkError::Config("subrecord_prefix must not be empty".into()));
        }
        if self.subrecord_prefix.chars().any(char::is_whitespace) {
            return Err(DkError::Config(format!(
                "subrecord_prefix {:?} must not contain whitespace",
                self.subrecord_prefix
            )));
        }
        Ok(())
    }

    /// Render the subrecord id for counter value `n`.
    #[inline]
    pub fn subrecord_id(&self, n: u64) -> String {
        format!("{}{}", self.subrecord_prefix, n)
    }
}
