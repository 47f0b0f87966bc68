use std::fmt;

use chrono::NaiveDate;
use serde::{Serialize, Serializer};

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Opaque record identifier, compared as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RecordId(pub String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Integer view of the id, if the trimmed text parses as one.
    pub fn as_int(&self) -> Option<i64> {
        self.0.trim().parse().ok()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<i64> for RecordId {
    fn from(n: i64) -> Self {
        Self(n.to_string())
    }
}

/// One club member from the roster snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterRecord {
    pub id: RecordId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// One account from the forum snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForumRecord {
    pub id: RecordId,
    pub username: String,
    pub display_name: String,
    pub email: String,
    pub last_activity: NaiveDate,
}

/// Pre-loaded roster and forum record sets.
#[derive(Debug, Clone, Default)]
pub struct ReconInput {
    pub roster: Vec<RosterRecord>,
    pub forum: Vec<ForumRecord>,
}

// ---------------------------------------------------------------------------
// Matching
// ---------------------------------------------------------------------------

/// Which check produced a match.
///
/// Variant order follows the tag spelling (`email < full_name < guest_user`)
/// so the derived `Ord` sorts reasons the same way the tags would sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    Email,
    FullName,
    GuestUser,
}

impl MatchStrategy {
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::FullName => "full_name",
            Self::GuestUser => "guest_user",
        }
    }
}

impl fmt::Display for MatchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A single piece of evidence linking a forum account to an id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct MatchReason {
    pub strategy: MatchStrategy,
    pub matched_id: RecordId,
}

impl MatchReason {
    pub fn new(strategy: MatchStrategy, matched_id: impl Into<RecordId>) -> Self {
        Self {
            strategy,
            matched_id: matched_id.into(),
        }
    }
}

impl fmt::Display for MatchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.strategy, self.matched_id)
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    Ok,
    Conflict,
    Unknown,
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => write!(f, "OK"),
            Self::Conflict => write!(f, "CONFLICT"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassifiedRecord {
    pub record: ForumRecord,
    pub reasons: Vec<MatchReason>,
    pub status: MatchStatus,
}

// ---------------------------------------------------------------------------
// Retention
// ---------------------------------------------------------------------------

/// Deletion recommendation for an unmatched account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeleteFlag {
    /// Inactive for at least the retention window.
    Definite,
    /// Recently active; left for a human to decide.
    Undetermined,
}

impl DeleteFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Definite => "1",
            Self::Undetermined => "?",
        }
    }
}

impl fmt::Display for DeleteFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for DeleteFlag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DeletionCandidate {
    pub record: ForumRecord,
    pub delete: DeleteFlag,
}

// ---------------------------------------------------------------------------
// Summary + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconSummary {
    pub total: usize,
    pub ok: usize,
    pub conflict: usize,
    pub unknown: usize,
    /// Non-OK records (`conflict + unknown`).
    pub unmatched: usize,
    /// Unmatched records flagged definite by the retention policy.
    pub stale: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconMeta {
    pub engine_version: String,
    pub today: NaiveDate,
    pub max_inactive_days: i64,
    pub roster_size: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconResult {
    pub meta: ReconMeta,
    pub summary: ReconSummary,
    pub records: Vec<ClassifiedRecord>,
    pub candidates: Vec<DeletionCandidate>,
}
