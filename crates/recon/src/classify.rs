use std::collections::BTreeSet;

use crate::model::{ClassifiedRecord, ForumRecord, MatchReason, MatchStatus};

/// Reduce reasons to a status by counting distinct matched ids.
///
/// Two strategies pointing at the same member still count once.
pub fn classify(reasons: &[MatchReason]) -> MatchStatus {
    let ids: BTreeSet<_> = reasons.iter().map(|r| &r.matched_id).collect();
    match ids.len() {
        0 => MatchStatus::Unknown,
        1 => MatchStatus::Ok,
        _ => MatchStatus::Conflict,
    }
}

pub fn classify_record(record: &ForumRecord, reasons: Vec<MatchReason>) -> ClassifiedRecord {
    let status = classify(&reasons);
    ClassifiedRecord {
        record: record.clone(),
        reasons,
        status,
    }
}

/// Inline form: `email=5,full_name=5`.
pub fn format_reasons(reasons: &[MatchReason]) -> String {
    reasons
        .iter()
        .map(|r| r.to_string())
        .collect::<Vec<_>>()
        .join(",")
}
