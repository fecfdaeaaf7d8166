use std::collections::BTreeMap;

use crate::config::RosterConfig;
use crate::error::{Result, RosterError};
use crate::ledger::LedgerWriter;
use super::christian_living::assign_christian_living;
use super::ministry::assign_ministry;
use super::picker::MeetingPicker;
use super::treasures::assign_treasures;
use super::types::{Meeting, PoolIndex};

/// Fills every role of every meeting, in input order.
///
/// The pool's queues are rotated in place, so later meetings see the
/// priority left by earlier ones. Only structural problems (no meetings,
/// no pool) fail the run; unfillable slots get an empty assignee.
pub fn plan_meetings(
    mut meetings: Vec<Meeting>,
    pool: &mut PoolIndex,
    ledger: &mut dyn LedgerWriter,
    config: &RosterConfig,
) -> Result<Vec<Meeting>> {
    if meetings.is_empty() {
        return Err(RosterError::EmptyMeetingList);
    }
    if pool.is_empty() {
        return Err(RosterError::EmptyPool);
    }

    for meeting in meetings.iter_mut() {
        plan_meeting(meeting, pool, ledger, config);
    }

    Ok(meetings)
}

/// Fills one meeting's assignments with a fresh set of used names.
///
/// Order matters: sections, then chairman and counselor, then prayers.
/// Prayers are exempt from the meeting's exclusivity, but the closing
/// prayer is never the opening one when another candidate exists.
pub fn plan_meeting(
    meeting: &mut Meeting,
    pool: &mut PoolIndex,
    ledger: &mut dyn LedgerWriter,
    config: &RosterConfig,
) {
    let roles = &config.roles;
    let mut assigned = BTreeMap::new();
    let mut picker = MeetingPicker::new(pool, ledger, &meeting.date);

    assign_treasures(&meeting.treasures, &mut picker, config, &mut assigned);
    assign_ministry(&meeting.field_ministry, &mut picker, config, &mut assigned);
    assign_christian_living(&meeting.christian_living, &mut picker, config, &mut assigned);

    assigned.insert(roles.chairman.clone(), picker.pick(&roles.chairman, None));
    assigned.insert(roles.counselor.clone(), picker.pick(&roles.counselor, None));

    let opening = picker.pick_shared(&roles.opening_prayer, None);
    let closing = picker.pick_shared(&roles.opening_prayer, Some(&opening));
    picker.record(&roles.closing_prayer, &closing);
    assigned.insert(roles.opening_prayer.clone(), opening);
    assigned.insert(roles.closing_prayer.clone(), closing);

    let unfilled = assigned.values().filter(|name| name.is_empty()).count();
    tracing::info!(
        "Planned meeting '{}': {} assignments, {} unfilled",
        meeting.date,
        assigned.len(),
        unfilled
    );

    meeting.assignments.extend(assigned);
}
