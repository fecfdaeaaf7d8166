use std::collections::BTreeMap;

use crate::config::{text_matches, RosterConfig};
use super::picker::MeetingPicker;
use super::types::{half_key, Section};

/// Assigns the opening section ("Tesouros da Palavra de Deus").
///
/// Bible reading slots get a reader for each room (A then B, B never the
/// same person as A), the spiritual gems slot its own role, everything
/// else the section's discourse role.
pub fn assign_treasures(
    section: &Section,
    picker: &mut MeetingPicker<'_>,
    config: &RosterConfig,
    dest: &mut BTreeMap<String, String>,
) {
    let roles = &config.roles;
    let keywords = &config.keywords;

    for (key, text) in section {
        if text_matches(text, &keywords.bible_reading) {
            let reader_a = picker.pick(&roles.reader_a, None);
            let reader_b = picker.pick(&roles.reader_b, Some(&reader_a));
            dest.insert(half_key(key, 'A'), reader_a);
            dest.insert(half_key(key, 'B'), reader_b);
        } else if text_matches(text, &keywords.spiritual_gems) {
            dest.insert(key.clone(), picker.pick(&roles.spiritual_gems, None));
        } else {
            dest.insert(key.clone(), picker.pick(&roles.treasures_discourse, None));
        }
    }
}
