use std::collections::BTreeMap;

use crate::config::{text_matches, RosterConfig};
use super::picker::MeetingPicker;
use super::types::{pair_assignee, Section};

/// Assigns the "Nossa Vida Cristã" section.
///
/// The congregation study gets a leader and a reader stored as
/// "leader/reader"; every other part is a discourse.
pub fn assign_christian_living(
    section: &Section,
    picker: &mut MeetingPicker<'_>,
    config: &RosterConfig,
    dest: &mut BTreeMap<String, String>,
) {
    let roles = &config.roles;

    for (key, text) in section {
        if text_matches(text, &config.keywords.congregation_study) {
            let leader = picker.pick(&roles.study_leader, None);
            let reader = picker.pick(&roles.study_reader, Some(&leader));
            dest.insert(key.clone(), pair_assignee(&leader, &reader));
        } else {
            dest.insert(key.clone(), picker.pick(&roles.christian_discourse, None));
        }
    }
}
