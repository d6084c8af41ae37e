//! Unit tests for dk-core primitives.

#[cfg(test)]
mod record {
    use crate::{Entity, Subrecord, category_eq};

    #[test]
    fn category_match_ignores_case() {
        assert!(category_eq("Academic", "academic"));
        assert!(category_eq("SPORTS", "sports"));
        assert!(!category_eq("Academic", "Academics"));
    }

    #[test]
    fn category_match_handles_non_ascii() {
        assert!(category_eq("ÉCOLE", "école"));
    }

    #[test]
    fn new_entity_has_no_subrecords() {
        let e = Entity::new("Seminar", "Academic");
        assert!(e.subrecords.is_empty());
        assert!(e.in_category("ACADEMIC"));
    }

    #[test]
    fn subrecord_position_by_generated_id() {
        let mut e = Entity::new("Seminar", "Academic");
        e.subrecords.push(Subrecord::new("Alice", "P1"));
        e.subrecords.push(Subrecord::new("Bob", "P2"));
        assert_eq!(e.subrecord_position("P2"), Some(1));
        assert_eq!(e.subrecord_position("P9"), None);
    }

    #[test]
    fn subrecord_display() {
        assert_eq!(Subrecord::new("Alice", "P1").to_string(), "Alice (ID: P1)");
    }
}

#[cfg(test)]
mod config {
    use crate::{DkError, ManagerConfig, PriorityOrder};

    #[test]
    fn default_ids_start_at_p1() {
        let cfg = ManagerConfig::default();
        assert_eq!(cfg.subrecord_id(cfg.first_subrecord_number), "P1");
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn empty_prefix_rejected() {
        let cfg = ManagerConfig { subrecord_prefix: String::new(), ..Default::default() };
        assert!(matches!(cfg.validate(), Err(DkError::Config(_))));
    }

    #[test]
    fn rank_follows_order() {
        assert!(PriorityOrder::LowestFirst.rank(1) < PriorityOrder::LowestFirst.rank(5));
        assert!(PriorityOrder::HighestFirst.rank(5) < PriorityOrder::HighestFirst.rank(1));
    }
}

#[cfg(test)]
mod error {
    use crate::DkError;

    #[test]
    fn only_consistency_faults_are_fatal() {
        assert!(DkError::NotFound("x".into()).is_recoverable());
        assert!(DkError::EmptyLog.is_recoverable());
        assert!(!DkError::Inconsistent("x".into()).is_recoverable());
    }
}

#[cfg(test)]
mod ids {
    use crate::ScheduleTicket;

    #[test]
    fn tickets_advance() {
        assert_eq!(ScheduleTicket::ZERO.next(), ScheduleTicket(1));
        assert!(ScheduleTicket(3) < ScheduleTicket(4));
        assert_eq!(ScheduleTicket(7).to_string(), "#7");
    }
}
