// rollcall CLI - reconcile the club roster with the forum user list

mod exit_codes;
mod export;
mod recon;
mod util;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::NaiveDate;
use clap::Parser;

use rollcall_recon::{ReconConfig, ReconError};

use exit_codes::{recon_exit_code, EXIT_IO, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "rollcall")]
#[command(about = "Match forum accounts against the club membership roster")]
#[command(long_version = long_version())]
#[command(version)]
struct Cli {
    /// Config file (default: <config dir>/rollcall/config.toml if present)
    #[arg(long, global = true, env = "ROLLCALL_CONFIG")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Export club members and forum users from their databases to CSV
    #[command(after_help = "\
Pass '-' as an output path to skip that export.

Examples:
  rollcall export roster.csv forum.csv --roster-db club.db --forum-db forum.db
  rollcall export roster.csv - --roster-db club.db --season 2019-2020")]
    Export {
        /// Roster CSV output path
        roster: PathBuf,

        /// Forum CSV output path
        forum: PathBuf,

        /// Club database (SQLite)
        #[arg(long)]
        roster_db: Option<PathBuf>,

        /// Forum database (SQLite)
        #[arg(long)]
        forum_db: Option<PathBuf>,

        /// Membership season label (default from config)
        #[arg(long)]
        season: Option<String>,
    },

    /// Match forum users against club members
    #[command(after_help = "\
Prints one line per forum account (match reasons and OK / CONFLICT / UNKNOWN),
then the number of accounts that are not OK. With --unknown-path, writes those
accounts to CSV with a delete column prefilled to 1 for accounts inactive
longer than the retention window, ? otherwise.

Examples:
  rollcall match roster.csv forum.csv
  rollcall match roster.csv forum.csv --unknown-path unknown.csv
  rollcall match roster.csv forum.csv --today 2020-01-01 --json")]
    Match {
        /// Roster CSV snapshot
        roster: PathBuf,

        /// Forum CSV snapshot
        forum: PathBuf,

        /// Write unknown entries (deletion candidates) to this CSV
        #[arg(long)]
        unknown_path: Option<PathBuf>,

        /// Reference date for the retention policy, YYYY-MM-DD (default: today)
        #[arg(long)]
        today: Option<NaiveDate>,

        /// Output JSON to stdout instead of the table
        #[arg(long)]
        json: bool,

        /// Write JSON output to file
        #[arg(long)]
        output: Option<PathBuf>,

        /// Exit with code 3 when any account is not OK
        #[arg(long)]
        fail_on_unknown: bool,
    },
}

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (", env!("ROLLCALL_GIT_HASH"), ")",
        "\nengine:  rollcall-recon ", env!("CARGO_PKG_VERSION"),
        "\ntarget:  ", env!("ROLLCALL_TARGET"),
    )
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = load_config(cli.config.as_deref()).and_then(|config| match cli.command {
        Commands::Export {
            roster,
            forum,
            roster_db,
            forum_db,
            season,
        } => export::cmd_export(
            &config,
            export::ExportArgs {
                roster_out: roster,
                forum_out: forum,
                roster_db,
                forum_db,
                season,
            },
        ),
        Commands::Match {
            roster,
            forum,
            unknown_path,
            today,
            json,
            output,
            fail_on_unknown,
        } => recon::cmd_match(
            &config,
            recon::MatchArgs {
                roster,
                forum,
                unknown_path,
                today,
                json,
                output,
                fail_on_unknown,
            },
        ),
    });

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

fn init_logging(verbose: u8) {
    let default_filter = match verbose {
        0 => "rollcall=warn",
        1 => "rollcall=info",
        _ => "rollcall=debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

/// `--config` (or ROLLCALL_CONFIG) must exist; the per-user default is optional.
fn load_config(explicit: Option<&Path>) -> Result<ReconConfig, CliError> {
    if let Some(path) = explicit {
        return ReconConfig::from_file(path).map_err(|e| {
            CliError::from(e).with_hint("check --config / ROLLCALL_CONFIG")
        });
    }

    match default_config_path() {
        Some(path) if path.is_file() => Ok(ReconConfig::from_file(&path)?),
        _ => {
            log::debug!("no config file, using defaults");
            Ok(ReconConfig::default())
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("rollcall").join("config.toml"))
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_IO, message: msg.into(), hint: None }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl From<ReconError> for CliError {
    fn from(err: ReconError) -> Self {
        Self {
            code: recon_exit_code(&err),
            message: err.to_string(),
            hint: None,
        }
    }
}
