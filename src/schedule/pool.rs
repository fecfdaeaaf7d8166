use std::cmp::Ordering;
use std::collections::HashSet;

use crate::config::RosterConfig;
use crate::error::{Result, RosterError};
use crate::parser::{is_eligible, PoolLayout, PoolSheet};
use super::types::{Candidate, LastServed, PoolIndex, RoleQueue};

/// Builds one priority-ordered queue per role column of the pool sheet.
///
/// A person joins a role's queue when the role's eligibility cell is "1"
/// or "true". Every role column gets an entry, even when nobody is
/// eligible for it.
pub fn build_pool_index(sheet: &PoolSheet, config: &RosterConfig) -> Result<PoolIndex> {
    config.validate()?;
    if sheet.rows().len() < 2 {
        return Err(RosterError::MalformedPoolSource(
            "sheet needs a header row and at least one data row".to_string(),
        ));
    }

    let layout = PoolLayout::detect(sheet, &config.anchor_column)?;
    let mut index = PoolIndex::new();

    for (role, col) in &layout.roles {
        let mut candidates = Vec::new();
        let mut seen = HashSet::new();

        for (row_idx, row) in sheet.rows().iter().enumerate().skip(1) {
            if row.is_empty() || layout.anchor >= row.len() {
                continue;
            }
            let name = row[layout.anchor].trim();
            if name.is_empty() || !is_eligible(sheet.cell(row_idx, *col)) {
                continue;
            }
            if !seen.insert(name.to_string()) {
                tracing::warn!("Duplicate candidate '{}' for role '{}' ignored", name, role);
                continue;
            }
            let last_served = LastServed::from_cell(sheet.cell(row_idx, col + 1), &config.date_format);
            candidates.push(Candidate::new(name, last_served));
        }

        sort_by_priority(&mut candidates);
        tracing::debug!("Role '{}' has {} eligible candidates", role, candidates.len());
        index.insert(role.clone(), RoleQueue::new(candidates));
    }

    Ok(index)
}

/// Stable sort, most overdue first
pub fn sort_by_priority(candidates: &mut [Candidate]) {
    candidates.sort_by(compare_by_priority);
}

/// Never served (by name) < served on a date (oldest first) < unparseable date (by name).
///
/// Equal dates compare equal so the stable sort keeps their input order.
pub fn compare_by_priority(a: &Candidate, b: &Candidate) -> Ordering {
    match (&a.last_served, &b.last_served) {
        (LastServed::Never, LastServed::Never) => a.name.cmp(&b.name),
        (LastServed::Never, _) => Ordering::Less,
        (_, LastServed::Never) => Ordering::Greater,
        (LastServed::On(da), LastServed::On(db)) => da.cmp(db),
        (LastServed::On(_), LastServed::Unparseable(_)) => Ordering::Less,
        (LastServed::Unparseable(_), LastServed::On(_)) => Ordering::Greater,
        (LastServed::Unparseable(_), LastServed::Unparseable(_)) => a.name.cmp(&b.name),
    }
}
