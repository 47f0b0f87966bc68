use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReconError {
    /// TOML parse / deserialization error.
    #[error("config parse error: {0}")]
    ConfigParse(String),

    /// Config validation error (zero retention window, etc.).
    #[error("config validation error: {0}")]
    ConfigValidation(String),

    /// A snapshot row does not have the expected number of columns.
    #[error("{snapshot}, line {line}: expected {expected} columns, found {found}")]
    ColumnCount {
        snapshot: String,
        line: u64,
        expected: usize,
        found: usize,
    },

    /// Last-activity date parse error.
    #[error("{snapshot}, line {line}, record '{record_id}': cannot parse date '{value}' (expected YYYY-MM-DD)")]
    DateParse {
        snapshot: String,
        line: u64,
        record_id: String,
        value: String,
    },

    /// Forum ids must be integers.
    #[error("{snapshot}, line {line}: cannot parse id '{value}' as an integer")]
    IdParse { snapshot: String, line: u64, value: String },

    /// The same id appears twice in one snapshot.
    #[error("{snapshot}, line {line}: duplicate id '{id}'")]
    DuplicateId { snapshot: String, line: u64, id: String },

    /// Malformed CSV (bad quoting, invalid UTF-8).
    #[error("{snapshot}: {message}")]
    Csv { snapshot: String, message: String },

    /// IO error (file read, serialization).
    #[error("IO error: {0}")]
    Io(String),
}

impl From<std::io::Error> for ReconError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
