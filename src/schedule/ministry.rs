use std::collections::BTreeMap;

use crate::config::{text_matches, PairRoles, RosterConfig};
use super::picker::MeetingPicker;
use super::types::{half_key, pair_assignee, Section};

/// How many demonstration slots go to women and to men.
///
/// `quota` male slots are reserved, but each discourse in the section
/// takes one of them. Both counts are clamped at zero.
pub fn demonstration_split(total: usize, discourses: usize, quota: usize) -> (usize, usize) {
    let male = quota.saturating_sub(discourses);
    let female = total.saturating_sub(discourses).saturating_sub(male);
    (female, male)
}

/// Assigns the "Faça seu melhor no ministério" section.
///
/// Discourse slots get two speakers (A and B rooms). Demonstrations take
/// the female roles first, in key order, then the male ones; each
/// demonstration is filled for both rooms as "holder/helper".
pub fn assign_ministry(
    section: &Section,
    picker: &mut MeetingPicker<'_>,
    config: &RosterConfig,
    dest: &mut BTreeMap<String, String>,
) {
    let roles = &config.roles;

    // Split slots into discourses and demonstrations, keeping key order
    let mut discourse_keys = Vec::new();
    let mut demonstration_keys = Vec::new();
    for (key, text) in section {
        if text_matches(text, &config.keywords.ministry_discourse) {
            discourse_keys.push(key);
        } else {
            demonstration_keys.push(key);
        }
    }

    // Discourses first: one speaker per room, B never repeats A
    for key in &discourse_keys {
        let speaker_a = picker.pick(&roles.ministry_discourse, None);
        let speaker_b = picker.pick(&roles.ministry_discourse, Some(&speaker_a));
        dest.insert(half_key(key, 'A'), speaker_a);
        dest.insert(half_key(key, 'B'), speaker_b);
    }

    let (female_slots, _) = demonstration_split(
        section.len(),
        discourse_keys.len(),
        config.male_demonstration_quota,
    );

    // Female rooms until the female share runs out, male rooms after that
    let demos = &roles.demonstrations;
    for (i, key) in demonstration_keys.iter().enumerate() {
        let (room_a, room_b) = if i < female_slots {
            (&demos.female_a, &demos.female_b)
        } else {
            (&demos.male_a, &demos.male_b)
        };
        dest.insert(half_key(key, 'A'), assign_pair(picker, room_a));
        dest.insert(half_key(key, 'B'), assign_pair(picker, room_b));
    }
}

fn assign_pair(picker: &mut MeetingPicker<'_>, roles: &PairRoles) -> String {
    let holder = picker.pick(&roles.holder, None);
    // Helper comes from its own queue but must differ from the holder
    let helper = picker.pick(&roles.helper, Some(&holder));
    pair_assignee(&holder, &helper)
}
