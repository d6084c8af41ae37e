//! Record types owned by the entity index.

use std::fmt;

/// A secondary record (participant, check-in item) attached to an entity.
///
/// `generated_id` comes from the manager's monotonically increasing counter
/// and is never reused, not even after the registering command is undone.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Subrecord {
    pub display_name: String,
    pub generated_id: String,
}

impl Subrecord {
    pub fn new(display_name: impl Into<String>, generated_id: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            generated_id: generated_id.into(),
        }
    }
}

impl fmt::Display for Subrecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (ID: {})", self.display_name, self.generated_id)
    }
}

/// A uniquely keyed record (an event or a parcel).
///
/// `key` never changes while the entity lives in the index; a rename is a
/// delete followed by an insert under the new key.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entity {
    pub key:        String,
    pub category:   String,
    pub subrecords: Vec<Subrecord>,
}

impl Entity {
    /// A fresh entity with no subrecords.
    pub fn new(key: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            key:        key.into(),
            category:   category.into(),
            subrecords: Vec::new(),
        }
    }

    /// `true` if this entity's category matches `category` ignoring case.
    #[inline]
    pub fn in_category(&self, category: &str) -> bool {
        category_eq(&self.category, category)
    }

    /// Position of the subrecord carrying `generated_id`, if attached here.
    pub fn subrecord_position(&self, generated_id: &str) -> Option<usize> {
        self.subrecords
            .iter()
            .position(|s| s.generated_id == generated_id)
    }
}

/// Case-insensitive category comparison.
///
/// Every category equality check in the workspace goes through this
/// function so the matching rule cannot drift between call sites.
pub fn category_eq(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}
