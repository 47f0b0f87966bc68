//! `rollcall match`: classify forum accounts against the club roster.

use std::io::{self, Write};
use std::path::PathBuf;

use chrono::NaiveDate;

use rollcall_recon::classify::format_reasons;
use rollcall_recon::snapshot::{read_forum_file, read_roster_file, write_candidates_csv, DATE_FORMAT};
use rollcall_recon::{ClassifiedRecord, ReconConfig, ReconInput};

use crate::exit_codes::EXIT_RECON_UNKNOWN;
use crate::util::tabulate;
use crate::CliError;

pub struct MatchArgs {
    pub roster: PathBuf,
    pub forum: PathBuf,
    pub unknown_path: Option<PathBuf>,
    pub today: Option<NaiveDate>,
    pub json: bool,
    pub output: Option<PathBuf>,
    pub fail_on_unknown: bool,
}

pub fn cmd_match(config: &ReconConfig, args: MatchArgs) -> Result<(), CliError> {
    let input = ReconInput {
        roster: read_roster_file(&args.roster)?,
        forum: read_forum_file(&args.forum)?,
    };

    let today = args.today.unwrap_or_else(|| chrono::Local::now().date_naive());
    let result = rollcall_recon::run(config, &input, today);

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    if args.json || args.output.is_some() {
        let json_str = result.to_json_pretty()?;

        if let Some(ref path) = args.output {
            std::fs::write(path, &json_str)
                .map_err(|e| CliError::io(format!("cannot write {}: {e}", path.display())))?;
            eprintln!("wrote {}", path.display());
        }

        if args.json {
            writeln!(handle, "{json_str}").map_err(|e| CliError::io(e.to_string()))?;
        }
    }

    if !args.json {
        let rows: Vec<Vec<String>> = result.records.iter().map(table_row).collect();
        for line in tabulate(&rows) {
            writeln!(handle, "{line}").map_err(|e| CliError::io(e.to_string()))?;
        }
    }

    if let Some(ref path) = args.unknown_path {
        let file = std::fs::File::create(path)
            .map_err(|e| CliError::io(format!("cannot create {}: {e}", path.display())))?;
        write_candidates_csv(file, &result.candidates)?;
        log::info!("wrote {} deletion candidates to {}", result.candidates.len(), path.display());
    }

    let unmatched = result.summary.unmatched;
    if args.json {
        // keep stdout parseable
        eprintln!("{unmatched} unknown entries");
    } else {
        writeln!(handle, "{unmatched} unknown entries").map_err(|e| CliError::io(e.to_string()))?;
    }

    if args.fail_on_unknown && unmatched > 0 {
        return Err(CliError {
            code: EXIT_RECON_UNKNOWN,
            message: String::new(),
            hint: None,
        });
    }

    Ok(())
}

/// Forum columns, inline reasons, status.
fn table_row(r: &ClassifiedRecord) -> Vec<String> {
    vec![
        r.record.id.to_string(),
        r.record.username.clone(),
        r.record.display_name.clone(),
        r.record.email.clone(),
        r.record.last_activity.format(DATE_FORMAT).to_string(),
        format_reasons(&r.reasons),
        r.status.to_string(),
    ]
}
