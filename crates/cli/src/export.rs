//! `rollcall export`: dump the club roster and the forum user list to CSV
//! snapshots that `rollcall match` consumes.

use std::fs::File;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, NaiveDate};
use rusqlite::{params, Connection, OpenFlags};

use rollcall_recon::snapshot::{write_forum_csv, write_roster_csv};
use rollcall_recon::{ForumRecord, RecordId, ReconConfig, RosterRecord};

use crate::exit_codes::EXIT_EXPORT_DB;
use crate::CliError;

/// Output path that disables one side of the export.
const SKIP: &str = "-";

const ROSTER_QUERY: &str = "\
SELECT p.id, p.prenom, p.nom, p.mail
    FROM personne p
    INNER JOIN adhesion a ON (a.idPers = p.id)
    INNER JOIN saison s ON (s.id = a.idSaison)
    WHERE s.libelle = ?1
    ORDER BY p.nom, p.prenom";

const FORUM_QUERY: &str = "SELECT id, username, realname, email, last_visit FROM users ORDER BY id";

pub struct ExportArgs {
    pub roster_out: PathBuf,
    pub forum_out: PathBuf,
    pub roster_db: Option<PathBuf>,
    pub forum_db: Option<PathBuf>,
    pub season: Option<String>,
}

pub fn cmd_export(config: &ReconConfig, args: ExportArgs) -> Result<(), CliError> {
    if !is_skip(&args.roster_out) {
        let db = args.roster_db.as_deref().ok_or_else(|| {
            CliError::args("--roster-db is required to export the roster")
                .with_hint("pass '-' as the roster output to skip it")
        })?;
        let season = args.season.as_deref().unwrap_or(&config.export.season);
        let conn = open_read_only(db)?;
        let members = list_roster(&conn, season)?;
        let file = create(&args.roster_out)?;
        write_roster_csv(file, &members)?;
        eprintln!(
            "wrote {} members of season {season} to {}",
            members.len(),
            args.roster_out.display()
        );
    }

    if !is_skip(&args.forum_out) {
        let db = args.forum_db.as_deref().ok_or_else(|| {
            CliError::args("--forum-db is required to export forum users")
                .with_hint("pass '-' as the forum output to skip it")
        })?;
        let conn = open_read_only(db)?;
        let users = list_forum_users(&conn)?;
        let file = create(&args.forum_out)?;
        write_forum_csv(file, &users)?;
        eprintln!("wrote {} forum users to {}", users.len(), args.forum_out.display());
    }

    Ok(())
}

/// Members holding a membership for `season`, ordered by last then first name.
pub(crate) fn list_roster(conn: &Connection, season: &str) -> Result<Vec<RosterRecord>, CliError> {
    let mut stmt = conn.prepare(ROSTER_QUERY).map_err(db_err)?;
    let rows = stmt
        .query_map(params![season], |row| {
            let id: i64 = row.get(0)?;
            let first_name: Option<String> = row.get(1)?;
            let last_name: Option<String> = row.get(2)?;
            let email: Option<String> = row.get(3)?;
            Ok(RosterRecord {
                id: RecordId::from(id),
                first_name: first_name.unwrap_or_default(),
                last_name: last_name.unwrap_or_default(),
                email: email.unwrap_or_default(),
            })
        })
        .map_err(db_err)?;

    let members = rows.collect::<Result<Vec<_>, _>>().map_err(db_err)?;
    log::info!("season {season}: {} members", members.len());
    Ok(members)
}

/// Every forum account; `last_visit` is a Unix timestamp.
pub(crate) fn list_forum_users(conn: &Connection) -> Result<Vec<ForumRecord>, CliError> {
    let mut stmt = conn.prepare(FORUM_QUERY).map_err(db_err)?;
    let rows = stmt
        .query_map([], |row| {
            let id: i64 = row.get(0)?;
            let username: Option<String> = row.get(1)?;
            let realname: Option<String> = row.get(2)?;
            let email: Option<String> = row.get(3)?;
            let last_visit: i64 = row.get(4)?;
            Ok((id, username, realname, email, last_visit))
        })
        .map_err(db_err)?;

    let mut users = Vec::new();
    for row in rows {
        let (id, username, realname, email, last_visit) = row.map_err(db_err)?;
        let last_activity = visit_date(last_visit).ok_or_else(|| {
            CliError {
                code: EXIT_EXPORT_DB,
                message: format!("forum user {id}: last_visit {last_visit} is out of range"),
                hint: None,
            }
        })?;
        users.push(ForumRecord {
            id: RecordId::from(id),
            username: username.unwrap_or_default(),
            display_name: realname.unwrap_or_default(),
            email: email.unwrap_or_default(),
            last_activity,
        });
    }

    log::info!("forum: {} users", users.len());
    Ok(users)
}

/// Local calendar date of a Unix timestamp.
fn visit_date(timestamp: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp(timestamp, 0).map(|utc| utc.with_timezone(&Local).date_naive())
}

fn open_read_only(path: &Path) -> Result<Connection, CliError> {
    Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY).map_err(|e| CliError {
        code: EXIT_EXPORT_DB,
        message: format!("cannot open database {}: {e}", path.display()),
        hint: None,
    })
}

fn create(path: &Path) -> Result<File, CliError> {
    File::create(path).map_err(|e| CliError::io(format!("cannot create {}: {e}", path.display())))
}

fn is_skip(path: &Path) -> bool {
    path.as_os_str() == SKIP
}

fn db_err(e: rusqlite::Error) -> CliError {
    CliError {
        code: EXIT_EXPORT_DB,
        message: format!("database error: {e}"),
        hint: None,
    }
}
