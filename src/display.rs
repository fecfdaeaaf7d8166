use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::config::RosterConfig;
use crate::error::Result;
use crate::schedule::types::{half_key, LastServed, Meeting, PoolIndex, Section};

/// Assignee text for output, with unfilled slots marked
pub fn format_assignee(name: &str) -> &str {
    if name.is_empty() || name == "/" {
        "[EMPTY]"
    } else {
        name
    }
}

fn format_slot(meeting: &Meeting, key: &str) -> String {
    if let Some(name) = meeting.assignments.get(key) {
        return format_assignee(name).to_string();
    }
    let a = meeting.assignee(&half_key(key, 'A'));
    let b = meeting.assignee(&half_key(key, 'B'));
    format!("A: {} | B: {}", format_assignee(a), format_assignee(b))
}

fn write_section<W: Write>(out: &mut W, title: &str, section: &Section, meeting: &Meeting) -> io::Result<()> {
    if section.is_empty() {
        return Ok(());
    }
    writeln!(out, "-- {} --", title)?;
    for (key, text) in section {
        writeln!(out, "  {} -> {}", text.trim(), format_slot(meeting, key))?;
    }
    Ok(())
}

/// Writes one meeting block: header, presiding roles, sections, prayers
pub fn write_meeting<W: Write>(out: &mut W, meeting: &Meeting, config: &RosterConfig) -> io::Result<()> {
    let roles = &config.roles;

    writeln!(out, "** {} **", meeting.date)?;
    writeln!(out, "Presidente: {}", format_assignee(meeting.assignee(&roles.chairman)))?;
    writeln!(out, "Conselheiro sala B: {}", format_assignee(meeting.assignee(&roles.counselor)))?;
    if let Some(song) = &meeting.opening_song {
        writeln!(out, "Cântico inicial: {}", song)?;
    }
    writeln!(out, "Oração: {}", format_assignee(meeting.assignee(&roles.opening_prayer)))?;

    write_section(out, "Tesouros da Palavra de Deus", &meeting.treasures, meeting)?;
    write_section(out, "Faça seu melhor no ministério", &meeting.field_ministry, meeting)?;
    if let Some(song) = &meeting.middle_song {
        writeln!(out, "Cântico: {}", song)?;
    }
    write_section(out, "Nossa vida cristã", &meeting.christian_living, meeting)?;

    if let Some(song) = &meeting.closing_song {
        writeln!(out, "Cântico final: {}", song)?;
    }
    writeln!(out, "Oração final: {}", format_assignee(meeting.assignee(&roles.closing_prayer)))?;
    Ok(())
}

/// Writes every meeting to a text file, separated by blank lines
pub fn write_roster_to_file(meetings: &[Meeting], config: &RosterConfig, filename: &Path) -> Result<()> {
    let mut file = BufWriter::new(File::create(filename)?);
    for meeting in meetings {
        write_meeting(&mut file, meeting, config)?;
        writeln!(file)?;
    }
    file.flush()?;
    Ok(())
}

/// Writes the annotated meetings as JSON for downstream renderers
pub fn write_roster_json(meetings: &[Meeting], filename: &Path) -> Result<()> {
    let file = BufWriter::new(File::create(filename)?);
    serde_json::to_writer_pretty(file, meetings)?;
    Ok(())
}

/// Prints the annotated meetings
pub fn print_meeting_roster(meetings: &[Meeting], config: &RosterConfig) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for meeting in meetings {
        writeln!(out)?;
        write_meeting(&mut out, meeting, config)?;
    }
    Ok(())
}

/// Writes every role queue in selection order, dates in the configured format
pub fn write_pool_index<W: Write>(out: &mut W, pool: &PoolIndex, config: &RosterConfig) -> io::Result<()> {
    for (role, queue) in pool.iter() {
        writeln!(out, "\n=== {} ({} candidates) ===", role, queue.len())?;
        for (position, candidate) in queue.candidates().iter().enumerate() {
            let last = match &candidate.last_served {
                LastServed::Never => "never".to_string(),
                LastServed::On(date) => {
                    let mut text = String::new();
                    if fmt::write(&mut text, format_args!("{}", date.format(&config.date_format))).is_err() {
                        text = date.to_string();
                    }
                    text
                }
                LastServed::Unparseable(raw) => format!("unreadable date '{}'", raw),
            };
            writeln!(out, "  {:>3}. {} (last: {})", position + 1, candidate.name, last)?;
        }
    }
    Ok(())
}

/// Prints every role queue in selection order
pub fn print_pool_index(pool: &PoolIndex, config: &RosterConfig) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_pool_index(&mut out, pool, config)?;
    Ok(())
}
