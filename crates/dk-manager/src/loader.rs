//! CSV entity loader.
//!
//! # CSV format
//!
//! One row per entity.  Surrounding whitespace in every field is trimmed.
//!
//! ```csv
//! key,category,priority
//! Seminar,Academic,5
//! Gala,Social,1
//! ```
//!
//! Rows are returned in file order; feeding them to
//! [`EntityManager::create_many`](crate::EntityManager::create_many) makes
//! each row its own undoable command.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use dk_core::{DkError, DkResult};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct EntityRecord {
    key:      String,
    category: String,
    priority: i32,
}

/// One entity to create.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct EntitySeed {
    pub key:      String,
    pub category: String,
    pub priority: i32,
}

impl EntitySeed {
    pub fn new(key: impl Into<String>, category: impl Into<String>, priority: i32) -> Self {
        Self { key: key.into(), category: category.into(), priority }
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load entity seeds from a CSV file.
pub fn load_entities_csv(path: &Path) -> DkResult<Vec<EntitySeed>> {
    let file = std::fs::File::open(path)?;
    load_entities_reader(file)
}

/// Like [`load_entities_csv`] but accepts any `Read` source.
pub fn load_entities_reader<R: Read>(reader: R) -> DkResult<Vec<EntitySeed>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut seeds = Vec::new();
    for (i, result) in csv_reader.deserialize::<EntityRecord>().enumerate() {
        // Line 1 is the header.
        let line = i + 2;
        let row = result.map_err(|e| DkError::Parse(format!("line {line}: {e}")))?;
        if row.key.is_empty() {
            return Err(DkError::Parse(format!("line {line}: key must not be empty")));
        }
        if row.category.is_empty() {
            return Err(DkError::Parse(format!("line {line}: category must not be empty")));
        }
        seeds.push(EntitySeed { key: row.key, category: row.category, priority: row.priority });
    }
    Ok(seeds)
}
