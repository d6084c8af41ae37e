//! Unit tests for dk-log.

use dk_core::{DkError, DkResult, ScheduleTicket};

use crate::{ActionLog, Command, CommandTarget, LogError};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Minimal target: a sorted list of live keys.  A delete captures the
/// target's `current_priority` into the command it applies.
#[derive(Default)]
struct Keys {
    live:             Vec<String>,
    current_priority: i32,
    fail:             bool,
    calls:            Vec<String>,
}

impl CommandTarget for Keys {
    fn apply(&mut self, command: &mut Command) -> DkResult<()> {
        if self.fail {
            return Err(DkError::Inconsistent("forced".into()));
        }
        self.calls.push(format!("apply {}", command.kind()));
        match command {
            Command::CreateEntity { key, .. } => {
                self.live.push(key.clone());
                self.live.sort();
            }
            Command::DeleteEntity { key, priority, .. } => {
                self.live.retain(|k| k != key);
                *priority = self.current_priority;
            }
            _ => {}
        }
        Ok(())
    }

    fn revert(&mut self, command: &Command) -> DkResult<()> {
        if self.fail {
            return Err(DkError::Inconsistent("forced".into()));
        }
        self.calls.push(format!("revert {}", command.kind()));
        match command {
            Command::CreateEntity { key, .. } => self.live.retain(|k| k != key),
            Command::DeleteEntity { key, .. } => {
                self.live.push(key.clone());
                self.live.sort();
            }
            _ => {}
        }
        Ok(())
    }
}

fn create(key: &str) -> Command {
    Command::CreateEntity {
        key:      key.into(),
        category: "General".into(),
        priority: 1,
        ticket:   ScheduleTicket::ZERO,
    }
}

fn delete(key: &str) -> Command {
    Command::DeleteEntity {
        key:        key.into(),
        category:   "General".into(),
        priority:   0,
        ticket:     ScheduleTicket::ZERO,
        subrecords: Vec::new(),
        queued:     Vec::new(),
    }
}

/// Apply and record, the way the manager drives forward commands.
fn run(log: &mut ActionLog, target: &mut Keys, mut command: Command) {
    target.apply(&mut command).unwrap();
    log.record(command);
}

// ── Stack discipline ──────────────────────────────────────────────────────────

#[cfg(test)]
mod stacks {
    use super::*;

    #[test]
    fn fresh_log_has_nothing_to_undo_or_redo() {
        let mut log = ActionLog::new();
        let mut target = Keys::default();
        assert!(matches!(log.undo(&mut target), Err(LogError::NothingToUndo)));
        assert!(matches!(log.redo(&mut target), Err(LogError::NothingToRedo)));
        assert!(target.calls.is_empty());
    }

    #[test]
    fn sizes_after_n_commands_and_k_undos() {
        let mut log = ActionLog::new();
        let mut target = Keys::default();
        for k in ["a", "b", "c", "d", "e"] {
            run(&mut log, &mut target, create(k));
        }
        for _ in 0..3 {
            log.undo(&mut target).unwrap();
        }
        assert_eq!(log.undo_len(), 2);
        assert_eq!(log.redo_len(), 3);
        assert_eq!(target.live, vec!["a", "b"]);
    }

    #[test]
    fn new_command_clears_redo() {
        let mut log = ActionLog::new();
        let mut target = Keys::default();
        run(&mut log, &mut target, create("a"));
        run(&mut log, &mut target, create("b"));
        log.undo(&mut target).unwrap();
        assert_eq!(log.redo_len(), 1);

        run(&mut log, &mut target, create("c"));
        assert_eq!(log.redo_len(), 0);
        assert!(matches!(log.redo(&mut target), Err(LogError::NothingToRedo)));
    }

    #[test]
    fn undo_then_redo_round_trips_state() {
        let mut log = ActionLog::new();
        let mut target = Keys::default();
        run(&mut log, &mut target, create("x"));

        let undone = log.undo(&mut target).unwrap().clone();
        assert_eq!(undone, create("x"));
        assert!(target.live.is_empty());

        let redone = log.redo(&mut target).unwrap().clone();
        assert_eq!(redone, create("x"));
        assert_eq!(target.live, vec!["x"]);
        assert_eq!(log.peek_undo(), Some(&create("x")));
        assert!(log.peek_redo().is_none());
    }

    #[test]
    fn failed_replay_leaves_command_in_place() {
        let mut log = ActionLog::new();
        let mut target = Keys::default();
        run(&mut log, &mut target, create("x"));

        target.fail = true;
        assert!(matches!(log.undo(&mut target), Err(LogError::Replay(_))));
        assert_eq!(log.undo_len(), 1);
        assert_eq!(log.redo_len(), 0);
    }

    #[test]
    fn redo_keeps_state_captured_by_apply() {
        let mut log = ActionLog::new();
        let mut target = Keys { current_priority: 1, ..Keys::default() };
        run(&mut log, &mut target, create("x"));
        run(&mut log, &mut target, delete("x"));
        assert!(matches!(log.peek_undo(), Some(Command::DeleteEntity { priority: 1, .. })));

        log.undo(&mut target).unwrap();
        target.current_priority = 9;
        log.redo(&mut target).unwrap();
        assert!(matches!(log.peek_undo(), Some(Command::DeleteEntity { priority: 9, .. })));
        assert!(target.live.is_empty());
    }

    #[test]
    fn failed_redo_leaves_command_unchanged() {
        let mut log = ActionLog::new();
        let mut target = Keys { current_priority: 1, ..Keys::default() };
        run(&mut log, &mut target, create("x"));
        run(&mut log, &mut target, delete("x"));
        log.undo(&mut target).unwrap();

        target.current_priority = 9;
        target.fail = true;
        assert!(matches!(log.redo(&mut target), Err(LogError::Replay(_))));
        assert!(matches!(log.peek_redo(), Some(Command::DeleteEntity { priority: 1, .. })));
    }

    #[test]
    fn empty_log_maps_to_empty_log_error() {
        let err: DkError = LogError::NothingToUndo.into();
        assert!(matches!(err, DkError::EmptyLog));
        let err: DkError = LogError::Replay(DkError::NotFound("k".into())).into();
        assert!(matches!(err, DkError::NotFound(_)));
    }
}

// ── Command ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod command {
    use super::*;

    #[test]
    fn describes_itself() {
        assert_eq!(create("Seminar").to_string(), r#"create "Seminar" (General, priority 1)"#);
        let reg = Command::RegisterSubrecord {
            entity_key:   "Seminar".into(),
            display_name: "Alice".into(),
            generated_id: "P1".into(),
        };
        assert_eq!(reg.to_string(), r#"register Alice (P1) for "Seminar""#);
        assert_eq!(reg.kind(), "register");
        assert_eq!(reg.entity_key(), "Seminar");
    }

    #[test]
    fn update_is_keyed_by_new_key() {
        let cmd = Command::UpdateEntity {
            old_key:      "Old".into(),
            new_key:      "New".into(),
            old_category: "A".into(),
            new_category: "B".into(),
            old_priority: 1,
            new_priority: 2,
            old_ticket:   ScheduleTicket(0),
            new_ticket:   ScheduleTicket(1),
        };
        assert_eq!(cmd.entity_key(), "New");
        assert_eq!(cmd.kind(), "update");
    }
}
