//! CLI Exit Code Registry
//!
//! Single source of truth for `rollcall` exit codes. Scripts that wrap the
//! monthly membership review rely on them.
//!
//! | Code | Meaning                                              |
//! |------|------------------------------------------------------|
//! | 0    | Success                                              |
//! | 2    | CLI usage error (bad args, missing option)           |
//! | 3    | Unknown entries found (only with `--fail-on-unknown`) |
//! | 4    | Invalid config file                                  |
//! | 5    | Malformed snapshot (column count, date, id)          |
//! | 6    | IO error (read/write file)                           |
//! | 7    | Database export error                                |

use rollcall_recon::ReconError;

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

/// `match --fail-on-unknown` found CONFLICT or UNKNOWN forum accounts.
pub const EXIT_RECON_UNKNOWN: u8 = 3;

/// Config file failed to parse or validate.
pub const EXIT_INVALID_CONFIG: u8 = 4;

/// A snapshot row is malformed.
pub const EXIT_SNAPSHOT_PARSE: u8 = 5;

/// Reading or writing a file failed.
pub const EXIT_IO: u8 = 6;

/// Querying a source database failed.
pub const EXIT_EXPORT_DB: u8 = 7;

/// Map an engine error to its exit code.
pub fn recon_exit_code(err: &ReconError) -> u8 {
    match err {
        ReconError::ConfigParse(_) | ReconError::ConfigValidation(_) => EXIT_INVALID_CONFIG,
        ReconError::ColumnCount { .. }
        | ReconError::DateParse { .. }
        | ReconError::IdParse { .. }
        | ReconError::DuplicateId { .. }
        | ReconError::Csv { .. } => EXIT_SNAPSHOT_PARSE,
        ReconError::Io(_) => EXIT_IO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_distinct() {
        let codes = [
            EXIT_SUCCESS,
            EXIT_USAGE,
            EXIT_RECON_UNKNOWN,
            EXIT_INVALID_CONFIG,
            EXIT_SNAPSHOT_PARSE,
            EXIT_IO,
            EXIT_EXPORT_DB,
        ];
        let mut sorted = codes.to_vec();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), codes.len());
    }

    #[test]
    fn recon_errors_map_by_kind() {
        assert_eq!(recon_exit_code(&ReconError::ConfigParse("x".into())), EXIT_INVALID_CONFIG);
        assert_eq!(
            recon_exit_code(&ReconError::IdParse { snapshot: "f".into(), line: 2, value: "a".into() }),
            EXIT_SNAPSHOT_PARSE
        );
        assert_eq!(recon_exit_code(&ReconError::Io("x".into())), EXIT_IO);
    }
}
