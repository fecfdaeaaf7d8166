use std::collections::HashSet;

use super::types::RoleQueue;

/// Outcome of one selection from a role queue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// None when the queue was empty
    pub name: Option<String>,
    /// Queue after rotating the selected candidate to the back
    pub queue: RoleQueue,
    /// True when no candidate passed the filters and the front was taken anyway
    pub degraded: bool,
}

/// Picks the first candidate not in `exclude` and not equal to `exclude_one`.
///
/// When every candidate is filtered out the front of the queue is taken
/// regardless, so small pools still make progress. An empty queue yields
/// no name and is returned unchanged.
pub fn select_next(
    queue: &RoleQueue,
    exclude: &HashSet<String>,
    exclude_one: Option<&str>,
) -> Selection {
    if queue.is_empty() {
        return Selection {
            name: None,
            queue: queue.clone(),
            degraded: false,
        };
    }

    let found = queue
        .candidates()
        .iter()
        .position(|c| !exclude.contains(&c.name) && exclude_one != Some(c.name.as_str()));

    let (index, degraded) = match found {
        Some(index) => (index, false),
        None => (0, true),
    };

    Selection {
        name: Some(queue.candidates()[index].name.clone()),
        queue: queue.rotated_after(index),
        degraded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::types::{Candidate, LastServed};

    fn queue(names: &[&str]) -> RoleQueue {
        RoleQueue::new(
            names
                .iter()
                .map(|n| Candidate::new(*n, LastServed::Never))
                .collect(),
        )
    }

    fn set(names: &[&str]) -> HashSet<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_selects_front_without_filters() {
        let selection = select_next(&queue(&["Ana", "Bruno", "Caio"]), &HashSet::new(), None);
        assert_eq!(selection.name.as_deref(), Some("Ana"));
        assert_eq!(selection.queue.names(), vec!["Bruno", "Caio", "Ana"]);
        assert!(!selection.degraded);
    }

    #[test]
    fn test_skipped_candidates_keep_their_priority() {
        let selection = select_next(&queue(&["Ana", "Bruno", "Caio", "Davi"]), &set(&["Ana"]), Some("Bruno"));
        assert_eq!(selection.name.as_deref(), Some("Caio"));
        assert_eq!(selection.queue.names(), vec!["Davi", "Ana", "Bruno", "Caio"]);
    }

    #[test]
    fn test_degrades_to_front_when_all_excluded() {
        let selection = select_next(&queue(&["Ana", "Bruno"]), &set(&["Ana"]), Some("Bruno"));
        assert_eq!(selection.name.as_deref(), Some("Ana"));
        assert_eq!(selection.queue.names(), vec!["Bruno", "Ana"]);
        assert!(selection.degraded);
    }

    #[test]
    fn test_empty_queue_is_not_an_error() {
        let empty = queue(&[]);
        let selection = select_next(&empty, &set(&["Ana"]), None);
        assert_eq!(selection.name, None);
        assert_eq!(selection.queue, empty);
        assert!(!selection.degraded);
    }

    #[test]
    fn test_full_cycle_returns_to_original_order() {
        let original = queue(&["Ana", "Bruno", "Caio", "Davi", "Eva"]);
        let mut current = original.clone();
        let mut picked = Vec::new();
        for _ in 0..original.len() {
            let selection = select_next(&current, &HashSet::new(), None);
            picked.push(selection.name.unwrap());
            current = selection.queue;
        }
        assert_eq!(picked, vec!["Ana", "Bruno", "Caio", "Davi", "Eva"]);
        assert_eq!(current, original);
    }

    #[test]
    fn test_selection_is_a_permutation() {
        let original = queue(&["Ana", "Bruno", "Caio"]);
        let selection = select_next(&original, &set(&["Ana"]), None);
        let mut before = original.names();
        let mut after = selection.queue.names();
        before.sort();
        after.sort();
        assert_eq!(before, after);
    }
}
