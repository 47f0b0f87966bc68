//! CSV snapshots of the roster and forum sources, plus the deletion-candidate
//! review file.
//!
//! Every snapshot starts with a header row that is written for humans and
//! skipped on read; columns are positional.

use std::collections::HashSet;
use std::io::Write;
use std::path::Path;

use chrono::NaiveDate;

use crate::error::ReconError;
use crate::model::{DeletionCandidate, ForumRecord, RecordId, RosterRecord};

pub const ROSTER_HEADER: [&str; 4] = ["id", "first_name", "last_name", "email"];
pub const FORUM_HEADER: [&str; 5] = ["id", "username", "display_name", "email", "last_activity"];
pub const CANDIDATE_HEADER: [&str; 6] =
    ["id", "username", "display_name", "email", "last_activity", "delete"];

pub const DATE_FORMAT: &str = "%Y-%m-%d";

// ---------------------------------------------------------------------------
// Read
// ---------------------------------------------------------------------------

/// Parse a roster snapshot. `snapshot` names the source in error messages.
pub fn load_roster_csv(snapshot: &str, csv_data: &str) -> Result<Vec<RosterRecord>, ReconError> {
    let mut rows = Vec::new();
    let mut seen = HashSet::new();

    for_each_row(snapshot, csv_data, ROSTER_HEADER.len(), |line, record| {
        let id = RecordId::new(&record[0]);
        if !seen.insert(id.clone()) {
            return Err(ReconError::DuplicateId {
                snapshot: snapshot.into(),
                line,
                id: id.0,
            });
        }

        rows.push(RosterRecord {
            id,
            first_name: record[1].to_string(),
            last_name: record[2].to_string(),
            email: record[3].to_string(),
        });
        Ok(())
    })?;

    log::info!("{snapshot}: loaded {} roster members", rows.len());
    Ok(rows)
}

/// Parse a forum snapshot. Ids must be integers and dates `YYYY-MM-DD`.
pub fn load_forum_csv(snapshot: &str, csv_data: &str) -> Result<Vec<ForumRecord>, ReconError> {
    let mut rows = Vec::new();
    let mut seen = HashSet::new();

    for_each_row(snapshot, csv_data, FORUM_HEADER.len(), |line, record| {
        let raw_id = record[0].trim();
        let id: i64 = raw_id.parse().map_err(|_| ReconError::IdParse {
            snapshot: snapshot.into(),
            line,
            value: raw_id.into(),
        })?;
        if !seen.insert(id) {
            return Err(ReconError::DuplicateId {
                snapshot: snapshot.into(),
                line,
                id: raw_id.into(),
            });
        }

        let date_str = record[4].trim();
        let last_activity = NaiveDate::parse_from_str(date_str, DATE_FORMAT).map_err(|_| {
            ReconError::DateParse {
                snapshot: snapshot.into(),
                line,
                record_id: raw_id.into(),
                value: date_str.into(),
            }
        })?;

        rows.push(ForumRecord {
            id: RecordId::new(raw_id),
            username: record[1].to_string(),
            display_name: record[2].to_string(),
            email: record[3].to_string(),
            last_activity,
        });
        Ok(())
    })?;

    log::info!("{snapshot}: loaded {} forum accounts", rows.len());
    Ok(rows)
}

pub fn read_roster_file(path: &Path) -> Result<Vec<RosterRecord>, ReconError> {
    load_roster_csv(&path.display().to_string(), &read_file(path)?)
}

pub fn read_forum_file(path: &Path) -> Result<Vec<ForumRecord>, ReconError> {
    load_forum_csv(&path.display().to_string(), &read_file(path)?)
}

fn read_file(path: &Path) -> Result<String, ReconError> {
    std::fs::read_to_string(path)
        .map_err(|e| ReconError::Io(format!("cannot read {}: {e}", path.display())))
}

/// Walk data rows (header skipped), enforcing an exact column count.
fn for_each_row<F>(snapshot: &str, csv_data: &str, columns: usize, mut f: F) -> Result<(), ReconError>
where
    F: FnMut(u64, &csv::StringRecord) -> Result<(), ReconError>,
{
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_data.as_bytes());

    for record in reader.records() {
        let record = record.map_err(|e| ReconError::Csv {
            snapshot: snapshot.into(),
            message: e.to_string(),
        })?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        if record.len() != columns {
            return Err(ReconError::ColumnCount {
                snapshot: snapshot.into(),
                line,
                expected: columns,
                found: record.len(),
            });
        }

        f(line, &record)?;
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Write
// ---------------------------------------------------------------------------

pub fn write_roster_csv<W: Write>(out: W, rows: &[RosterRecord]) -> Result<(), ReconError> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(ROSTER_HEADER).map_err(csv_write_err)?;
    for r in rows {
        writer
            .write_record([r.id.as_str(), r.first_name.as_str(), r.last_name.as_str(), r.email.as_str()])
            .map_err(csv_write_err)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_forum_csv<W: Write>(out: W, rows: &[ForumRecord]) -> Result<(), ReconError> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(FORUM_HEADER).map_err(csv_write_err)?;
    for r in rows {
        let date = r.last_activity.format(DATE_FORMAT).to_string();
        writer
            .write_record([r.id.as_str(), r.username.as_str(), r.display_name.as_str(), r.email.as_str(), date.as_str()])
            .map_err(csv_write_err)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_candidates_csv<W: Write>(out: W, rows: &[DeletionCandidate]) -> Result<(), ReconError> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(CANDIDATE_HEADER).map_err(csv_write_err)?;
    for c in rows {
        let r = &c.record;
        let date = r.last_activity.format(DATE_FORMAT).to_string();
        writer
            .write_record([
                r.id.as_str(),
                r.username.as_str(),
                r.display_name.as_str(),
                r.email.as_str(),
                date.as_str(),
                c.delete.as_str(),
            ])
            .map_err(csv_write_err)?;
    }
    writer.flush()?;
    Ok(())
}

fn csv_write_err(e: csv::Error) -> ReconError {
    ReconError::Io(e.to_string())
}
