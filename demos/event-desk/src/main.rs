//! event-desk — scripted walk through the docket record manager.
//!
//! Loads a small event roster, registers participants, runs check-ins,
//! exercises update/delete with undo/redo, and prints the final report.
//!
//! ```text
//! cargo run -p event-desk                   # default config
//! cargo run -p event-desk -- config.json    # ManagerConfig as JSON
//! RUST_LOG=debug cargo run -p event-desk    # every command as it is applied
//! ```

use std::io::Cursor;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use dk_core::{DkError, ManagerConfig};
use dk_manager::{EntityManager, ManagerBuilder, Report, load_entities_reader};

// ── Roster CSV ────────────────────────────────────────────────────────────────

// The last row repeats a key on purpose: duplicates are reported, not fatal.
const ROSTER_CSV: &str = "\
key,category,priority\n\
Tech Seminar,Academic,5\n\
Spring Gala,Social,1\n\
Robotics Talk,Academic,3\n\
Charity Run,Sports,4\n\
Tech Seminar,Sports,2\n\
";

const PARTICIPANTS: &[(&str, &str)] = &[
    ("Tech Seminar", "Alice"),
    ("Tech Seminar", "Bob"),
    ("Spring Gala", "Cara"),
    ("Charity Run", "Dev"),
    ("Board Meeting", "Eve"), // no such event
];

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // 1. Config.
    let config = match std::env::args().nth(1) {
        Some(path) => load_config(Path::new(&path))?,
        None => ManagerConfig::default(),
    };
    info!(order = ?config.priority_order, prefix = %config.subrecord_prefix, "configured");

    // 2. Seed events from the embedded roster.
    let seeds = load_entities_reader(Cursor::new(ROSTER_CSV))?;
    let mut mgr = ManagerBuilder::new().config(config).build()?;
    for key in mgr.create_many(seeds)? {
        warn!(key = %key, "roster row ignored: event already exists");
    }

    // 3. Participants.
    for (event, name) in PARTICIPANTS {
        match mgr.register_subrecord(event, name) {
            Ok(id) => info!(event = %event, participant = %name, id = %id, "registered"),
            Err(err @ DkError::NotFound(_)) => warn!(participant = %name, "{err}"),
            Err(err) => return Err(err.into()),
        }
    }

    // 4. Check-ins.
    if let Ok(next) = mgr.peek_next() {
        info!(participant = %next.subrecord, event = %next.entity_key, "next in line");
    }
    for _ in 0..2 {
        let done = mgr.process_next()?;
        info!(participant = %done.subrecord, "checked in");
    }

    // 5. Update, delete, undo, redo.
    mgr.update_entity("Robotics Talk", "Robotics Keynote", "Academic", 2)?;
    mgr.delete_entity("Charity Run")?;
    let undone = mgr.undo()?;
    info!(%undone, "undo");
    let redone = mgr.redo()?;
    info!(%redone, "redo");
    if let Err(err) = mgr.update_entity("Spring Gala", "Tech Seminar", "Social", 1) {
        warn!("{err}");
    }
    mgr.verify()?;

    // 6. Report.
    print_report(&mgr.report());
    println!();
    println!("{}", serde_json::to_string_pretty(&mgr.report())?);
    Ok(())
}

fn load_config(path: &Path) -> Result<ManagerConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config: ManagerConfig = serde_json::from_str(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;
    config.validate()?;
    Ok(config)
}

fn print_report(report: &Report) {
    println!("----- Event Report -----");
    for entity in &report.entities {
        println!("Event: {} (Category: {})", entity.key, entity.category);
        for sub in &entity.subrecords {
            println!("  - {sub}");
        }
    }
    println!();
    println!("{:<6} {:<24}", "Prio", "Scheduled event");
    println!("{}", "-".repeat(31));
    for entry in &report.schedule {
        println!("{:<6} {:<24}", entry.priority, entry.entity_key);
    }
    println!();
    println!(
        "Check-ins: {} processed, {} waiting ({} registered)",
        report.processed_count(),
        report.pending_count(),
        report.subrecord_count()
    );
    for item in &report.processed {
        println!("  - {} [{}]", item.subrecord, item.entity_key);
    }
}
