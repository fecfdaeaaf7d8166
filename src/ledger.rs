//! Durable record of who last served each role, and when.

use std::fmt::Write as _;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::config::RosterConfig;
use crate::error::{Result, RosterError};
use crate::parser::PoolSheet;

/// Capability to persist "candidate served role on meeting date".
///
/// Planning calls this once per pick. Failures are reported by the caller
/// and never undo the pick.
pub trait LedgerWriter {
    fn record_assignment(&mut self, role: &str, candidate: &str, meeting_date: &str) -> Result<()>;
}

/// Writes resolved dates into the date column of a pool sheet.
pub struct SheetLedger<'a> {
    sheet: &'a mut PoolSheet,
    anchor_column: String,
    date_format: String,
    year: i32,
}

impl<'a> SheetLedger<'a> {
    pub fn new(sheet: &'a mut PoolSheet, config: &RosterConfig) -> Self {
        Self {
            sheet,
            anchor_column: config.anchor_column.clone(),
            date_format: config.date_format.clone(),
            year: config.ledger_year,
        }
    }
}

impl LedgerWriter for SheetLedger<'_> {
    fn record_assignment(&mut self, role: &str, candidate: &str, meeting_date: &str) -> Result<()> {
        let anchor = self.sheet.find_anchor(&self.anchor_column).ok_or_else(|| {
            RosterError::MalformedPoolSource(format!("'{}' column not found", self.anchor_column))
        })?;

        let role_col = match self.sheet.find_role_column(role) {
            Some(col) if col + 1 < self.sheet.header().len() => col,
            _ => return Err(RosterError::RoleColumnNotFound(role.to_string())),
        };

        let date = resolve_meeting_date(meeting_date, self.year)?;
        // chrono reports a bad specifier as fmt::Error while formatting
        let mut value = String::new();
        write!(value, "{}", date.format(&self.date_format)).map_err(|_| {
            RosterError::InvalidConfig(format!(
                "date_format '{}' is not a valid chrono format",
                self.date_format
            ))
        })?;

        let row = self
            .sheet
            .rows()
            .iter()
            .enumerate()
            .skip(1)
            .find(|(_, row)| row.get(anchor).map(|n| n.trim() == candidate).unwrap_or(false))
            .map(|(idx, _)| idx)
            .ok_or_else(|| RosterError::CandidateNotFound(candidate.to_string()))?;

        self.sheet.set_cell(row, role_col + 1, &value);
        Ok(())
    }
}

/// One captured ledger write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    pub role: String,
    pub candidate: String,
    pub meeting_date: String,
}

/// Keeps ledger writes in memory instead of touching a pool source.
#[derive(Debug, Default)]
pub struct RecordingLedger {
    pub entries: Vec<LedgerEntry>,
}

impl RecordingLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LedgerWriter for RecordingLedger {
    fn record_assignment(&mut self, role: &str, candidate: &str, meeting_date: &str) -> Result<()> {
        self.entries.push(LedgerEntry {
            role: role.to_string(),
            candidate: candidate.to_string(),
            meeting_date: meeting_date.to_string(),
        });
        Ok(())
    }
}

fn meeting_end_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\ba\s+(\d{1,2})\s+de\s+([a-zç]+)").expect("meeting date pattern is valid")
    })
}

/// Maps a Portuguese month name to its number
fn month_number(name: &str) -> Option<u32> {
    let month = match name {
        "janeiro" => 1,
        "fevereiro" => 2,
        "março" | "marco" => 3,
        "abril" => 4,
        "maio" => 5,
        "junho" => 6,
        "julho" => 7,
        "agosto" => 8,
        "setembro" => 9,
        "outubro" => 10,
        "novembro" => 11,
        "dezembro" => 12,
        _ => return None,
    };
    Some(month)
}

/// Resolves the first "a <day> de <month>" in a meeting label.
///
/// For "12 a 18 de março" that is 18 March; for "a 12 de março a 18 de
/// março" it is 12 March. The year is fixed by configuration.
pub fn resolve_meeting_date(label: &str, year: i32) -> Result<NaiveDate> {
    let unresolvable = || RosterError::UnresolvableMeetingDate(label.to_string());

    let caps = meeting_end_regex().captures(label).ok_or_else(unresolvable)?;
    let day: u32 = caps[1].parse().map_err(|_| unresolvable())?;
    let month = month_number(&caps[2].to_lowercase()).ok_or_else(unresolvable)?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(unresolvable)
}
