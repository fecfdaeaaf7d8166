use std::collections::HashSet;

use crate::ledger::LedgerWriter;
use super::rotation::select_next;
use super::types::{PoolIndex, UsedInMeeting};

/// Selection state for one meeting: the pool being rotated, the ledger
/// receiving every pick and the names already used in this meeting.
pub struct MeetingPicker<'a> {
    pool: &'a mut PoolIndex,
    ledger: &'a mut dyn LedgerWriter,
    meeting_date: &'a str,
    used: UsedInMeeting,
}

impl<'a> MeetingPicker<'a> {
    pub fn new(pool: &'a mut PoolIndex, ledger: &'a mut dyn LedgerWriter, meeting_date: &'a str) -> Self {
        Self {
            pool,
            ledger,
            meeting_date,
            used: UsedInMeeting::new(),
        }
    }

    /// Picks for an exclusive role: skips names used in this meeting and
    /// marks the pick as used. Returns "" when the role has no candidates.
    pub fn pick(&mut self, role: &str, exclude_one: Option<&str>) -> String {
        self.select(role, exclude_one, true)
    }

    /// Picks without consulting or updating the meeting's used names.
    pub fn pick_shared(&mut self, role: &str, exclude_one: Option<&str>) -> String {
        self.select(role, exclude_one, false)
    }

    pub fn used(&self) -> &UsedInMeeting {
        &self.used
    }

    /// Records a pick in the ledger; failures are logged and swallowed
    pub fn record(&mut self, role: &str, name: &str) {
        if name.is_empty() {
            return;
        }
        if let Err(e) = self.ledger.record_assignment(role, name, self.meeting_date) {
            tracing::warn!(
                "Ledger not updated for '{}' as '{}' ({}): {}",
                name,
                role,
                self.meeting_date,
                e
            );
        }
    }

    fn select(&mut self, role: &str, exclude_one: Option<&str>, exclusive: bool) -> String {
        // Shared roles ignore who already serves in this meeting
        let no_exclusions = HashSet::new();
        let exclude = if exclusive { &self.used } else { &no_exclusions };

        let Some(queue) = self.pool.get_mut(role) else {
            tracing::warn!("Role '{}' has no candidate pool", role);
            return String::new();
        };

        // The rotated queue replaces the old one even when nobody was picked
        let selection = select_next(queue, exclude, exclude_one);
        *queue = selection.queue;

        let Some(name) = selection.name else {
            tracing::warn!("No candidate available for '{}' ({})", role, self.meeting_date);
            return String::new();
        };

        if selection.degraded {
            tracing::warn!(
                "Every candidate for '{}' is already assigned in {}; reusing '{}'",
                role,
                self.meeting_date,
                name
            );
        } else {
            tracing::debug!("Assigned '{}' to '{}' ({})", name, role, self.meeting_date);
        }

        if exclusive {
            self.used.insert(name.clone());
        }
        // Ledger write happens for every pick, degraded or not
        self.record(role, &name);
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Result, RosterError};
    use crate::ledger::RecordingLedger;
    use crate::schedule::types::{Candidate, LastServed, RoleQueue};

    fn pool(roles: &[(&str, &[&str])]) -> PoolIndex {
        let mut pool = PoolIndex::new();
        for (role, names) in roles {
            pool.insert(
                *role,
                RoleQueue::new(
                    names
                        .iter()
                        .map(|n| Candidate::new(*n, LastServed::Never))
                        .collect(),
                ),
            );
        }
        pool
    }

    struct FailingLedger;

    impl LedgerWriter for FailingLedger {
        fn record_assignment(&mut self, role: &str, _: &str, _: &str) -> Result<()> {
            Err(RosterError::RoleColumnNotFound(role.to_string()))
        }
    }

    #[test]
    fn test_exclusive_picks_avoid_used_names() {
        let mut pool = pool(&[("Presidente", &["Ana", "Bruno"]), ("Conselheiro", &["Ana", "Bruno"])]);
        let mut ledger = RecordingLedger::new();
        let mut picker = MeetingPicker::new(&mut pool, &mut ledger, "1 a 7 de junho");

        assert_eq!(picker.pick("Presidente", None), "Ana");
        assert_eq!(picker.pick("Conselheiro", None), "Bruno");
        assert!(picker.used().contains("Ana") && picker.used().contains("Bruno"));
        drop(picker);

        assert_eq!(ledger.entries.len(), 2);
        assert_eq!(pool.get("Conselheiro").unwrap().names(), vec!["Ana", "Bruno"]);
    }

    #[test]
    fn test_shared_picks_ignore_and_do_not_mark_used() {
        let mut pool = pool(&[("Presidente", &["Ana"]), ("Oração", &["Ana", "Bruno"])]);
        let mut ledger = RecordingLedger::new();
        let mut picker = MeetingPicker::new(&mut pool, &mut ledger, "1 a 7 de junho");

        assert_eq!(picker.pick("Presidente", None), "Ana");
        let opening = picker.pick_shared("Oração", None);
        assert_eq!(opening, "Ana");
        assert_eq!(picker.pick_shared("Oração", Some(&opening)), "Bruno");
        assert_eq!(picker.used().len(), 1);
    }

    #[test]
    fn test_missing_or_empty_role_yields_empty_assignee() {
        let mut pool = pool(&[("Presidente", &[])]);
        let mut ledger = RecordingLedger::new();
        let mut picker = MeetingPicker::new(&mut pool, &mut ledger, "1 a 7 de junho");

        assert_eq!(picker.pick("Presidente", None), "");
        assert_eq!(picker.pick("Leitor", None), "");
        assert!(picker.used().is_empty());
        drop(picker);
        assert!(ledger.entries.is_empty());
    }

    #[test]
    fn test_ledger_failure_does_not_abort_pick() {
        let mut pool = pool(&[("Presidente", &["Ana", "Bruno"])]);
        let mut ledger = FailingLedger;
        let mut picker = MeetingPicker::new(&mut pool, &mut ledger, "1 a 7 de junho");

        assert_eq!(picker.pick("Presidente", None), "Ana");
        drop(picker);
        assert_eq!(pool.get("Presidente").unwrap().names(), vec!["Bruno", "Ana"]);
    }

    #[test]
    fn test_degraded_pick_reuses_front_candidate() {
        let mut pool = pool(&[("Presidente", &["Ana"]), ("Conselheiro", &["Ana"])]);
        let mut ledger = RecordingLedger::new();
        let mut picker = MeetingPicker::new(&mut pool, &mut ledger, "1 a 7 de junho");

        assert_eq!(picker.pick("Presidente", None), "Ana");
        assert_eq!(picker.pick("Conselheiro", None), "Ana");
    }
}
