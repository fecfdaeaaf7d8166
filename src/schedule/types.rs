use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Last time a candidate served a role, as recorded in the pool sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LastServed {
    Never,
    On(NaiveDate),
    /// A non-empty cell that is not a date in the configured format
    Unparseable(String),
}

impl LastServed {
    /// Interprets a raw date cell
    pub fn from_cell(value: &str, date_format: &str) -> Self {
        let value = value.trim();
        if value.is_empty() {
            return LastServed::Never;
        }
        match NaiveDate::parse_from_str(value, date_format) {
            Ok(date) => LastServed::On(date),
            Err(_) => LastServed::Unparseable(value.to_string()),
        }
    }
}

/// One person eligible for one role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub name: String,
    pub last_served: LastServed,
}

impl Candidate {
    pub fn new(name: impl Into<String>, last_served: LastServed) -> Self {
        Self {
            name: name.into(),
            last_served,
        }
    }
}

/// Candidates for a single role, front = next to serve.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleQueue {
    candidates: Vec<Candidate>,
}

impl RoleQueue {
    /// Builds a queue, dropping any repeated name after its first occurrence.
    pub fn new(candidates: Vec<Candidate>) -> Self {
        let mut seen = HashSet::new();
        let candidates = candidates
            .into_iter()
            .filter(|c| seen.insert(c.name.clone()))
            .collect();
        Self { candidates }
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn names(&self) -> Vec<&str> {
        self.candidates.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Returns the queue with the candidate at `index` moved to the back:
    /// everyone after it, then everyone from the front through it.
    pub fn rotated_after(&self, index: usize) -> RoleQueue {
        if index >= self.candidates.len() {
            return self.clone();
        }
        let (head, tail) = self.candidates.split_at(index + 1);
        let mut candidates = Vec::with_capacity(self.candidates.len());
        candidates.extend_from_slice(tail);
        candidates.extend_from_slice(head);
        RoleQueue { candidates }
    }
}

/// Role name -> ordered candidate queue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolIndex {
    queues: BTreeMap<String, RoleQueue>,
}

impl PoolIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, role: impl Into<String>, queue: RoleQueue) {
        self.queues.insert(role.into(), queue);
    }

    pub fn get(&self, role: &str) -> Option<&RoleQueue> {
        self.queues.get(role)
    }

    pub fn get_mut(&mut self, role: &str) -> Option<&mut RoleQueue> {
        self.queues.get_mut(role)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RoleQueue)> {
        self.queues.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.queues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queues.is_empty()
    }
}

/// Slot key -> slot text for one agenda section; ordered by key.
pub type Section = BTreeMap<String, String>;

/// Names already holding an exclusive role in the meeting being planned
pub type UsedInMeeting = HashSet<String>;

/// One midweek meeting as produced by the agenda parser.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meeting {
    /// Free-text week label, e.g. "12 a 18 de março"
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opening_song: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_song: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closing_song: Option<String>,
    #[serde(default)]
    pub treasures: Section,
    #[serde(default)]
    pub field_ministry: Section,
    #[serde(default)]
    pub christian_living: Section,
    /// Slot key (or slot key + ".A"/".B", or role name) -> assignee
    #[serde(default)]
    pub assignments: BTreeMap<String, String>,
}

impl Meeting {
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            ..Default::default()
        }
    }

    pub fn assignee(&self, key: &str) -> &str {
        self.assignments.get(key).map(|s| s.as_str()).unwrap_or("")
    }
}

/// Key under which the A or B half of a paired slot is stored
pub fn half_key(slot_key: &str, half: char) -> String {
    format!("{}.{}", slot_key, half)
}

/// Joins a holder/helper (or leader/reader) pair into one assignee string
pub fn pair_assignee(first: &str, second: &str) -> String {
    format!("{}/{}", first, second)
}
