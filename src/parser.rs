use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use csv::{ReaderBuilder, WriterBuilder};

use crate::error::{Result, RosterError};
use crate::schedule::Meeting;

/// Raw pool sheet: row 0 is the header, every later row one person.
///
/// Rows are kept as read (ragged rows allowed) so the ledger can write
/// dates back into the same cells and the sheet can be saved unchanged
/// otherwise.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolSheet {
    rows: Vec<Vec<String>>,
}

impl PoolSheet {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// Reads every CSV record, header included, as a row
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            rows.push(record.iter().map(|cell| cell.to_string()).collect());
        }
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn header(&self) -> &[String] {
        self.rows.first().map(|r| r.as_slice()).unwrap_or(&[])
    }

    /// Cell value, or "" when the row is shorter than `col`
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(|s| s.as_str())
            .unwrap_or("")
    }

    /// Writes a cell, padding the row with empty cells when needed
    pub fn set_cell(&mut self, row: usize, col: usize, value: &str) {
        let Some(cells) = self.rows.get_mut(row) else {
            return;
        };
        if cells.len() <= col {
            cells.resize(col + 1, String::new());
        }
        cells[col] = value.to_string();
    }

    /// Index of the first header cell equal (trimmed, ignoring case) to `anchor`
    pub fn find_anchor(&self, anchor: &str) -> Option<usize> {
        let anchor = anchor.trim().to_lowercase();
        self.header()
            .iter()
            .position(|h| h.trim().to_lowercase() == anchor)
    }

    /// Index of the header cell whose trimmed text is exactly `role`
    pub fn find_role_column(&self, role: &str) -> Option<usize> {
        self.header().iter().position(|h| h.trim() == role)
    }

    pub fn write_to<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = WriterBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_writer(writer);
        for row in &self.rows {
            wtr.write_record(row)?;
        }
        wtr.flush()?;
        Ok(())
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        self.write_to(file)
    }
}

/// Where the name column and the role column pairs sit in a pool sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolLayout {
    pub anchor: usize,
    /// (role name, eligibility column); the date column is the next one
    pub roles: Vec<(String, usize)>,
}

impl PoolLayout {
    pub fn detect(sheet: &PoolSheet, anchor_name: &str) -> Result<Self> {
        let headers = sheet.header();
        let anchor = sheet.find_anchor(anchor_name).ok_or_else(|| {
            RosterError::MalformedPoolSource(format!("'{}' column not found", anchor_name))
        })?;

        let first_role = headers
            .iter()
            .enumerate()
            .skip(anchor + 1)
            .find(|(_, h)| !h.trim().is_empty())
            .map(|(idx, _)| idx)
            .ok_or_else(|| {
                RosterError::MalformedPoolSource(format!(
                    "no role columns found after '{}'",
                    anchor_name
                ))
            })?;

        let mut roles = Vec::new();
        let mut col = first_role;
        while col + 1 < headers.len() {
            let role = headers[col].trim();
            if role.is_empty() {
                tracing::warn!("Skipping unnamed role column {}", col);
            } else {
                roles.push((role.to_string(), col));
            }
            col += 2;
        }

        if roles.is_empty() {
            return Err(RosterError::MalformedPoolSource(format!(
                "no role columns found after '{}'",
                anchor_name
            )));
        }

        Ok(Self { anchor, roles })
    }
}

/// Eligibility flag: "1" or "true", ignoring case and surrounding blanks
pub fn is_eligible(value: &str) -> bool {
    let lower = value.trim().to_lowercase();
    lower == "1" || lower == "true"
}

/// Loads the pool sheet from a CSV file
pub fn load_pool_sheet<P: AsRef<Path>>(csv_path: P) -> Result<PoolSheet> {
    let file = File::open(csv_path)?;
    PoolSheet::from_reader(file)
}

/// Loads the parsed meeting list from a JSON file
pub fn load_meetings<P: AsRef<Path>>(json_path: P) -> Result<Vec<Meeting>> {
    let file = File::open(json_path)?;
    let meetings = serde_json::from_reader(file)?;
    Ok(meetings)
}
