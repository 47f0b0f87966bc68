use crate::model::{ClassifiedRecord, DeleteFlag, DeletionCandidate, MatchStatus, ReconSummary};

/// Compute summary statistics from classified records and their candidates.
pub fn compute_summary(records: &[ClassifiedRecord], candidates: &[DeletionCandidate]) -> ReconSummary {
    let mut summary = ReconSummary {
        total: records.len(),
        ..ReconSummary::default()
    };

    for r in records {
        match r.status {
            MatchStatus::Ok => summary.ok += 1,
            MatchStatus::Conflict => summary.conflict += 1,
            MatchStatus::Unknown => summary.unknown += 1,
        }
    }

    summary.unmatched = summary.conflict + summary.unknown;
    summary.stale = candidates
        .iter()
        .filter(|c| c.delete == DeleteFlag::Definite)
        .count();
    summary
}
