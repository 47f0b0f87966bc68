use chrono::NaiveDate;

use crate::model::{ClassifiedRecord, DeleteFlag, DeletionCandidate, MatchStatus};

/// Two years, counted as 2 * 365 days.
pub const DEFAULT_MAX_INACTIVE_DAYS: i64 = 2 * 365;

/// Flags unmatched accounts for review based on inactivity.
///
/// The flag is a recommendation only: `Definite` pre-fills the delete column,
/// `Undetermined` leaves it open for a reviewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionPolicy {
    pub max_inactive_days: i64,
    pub today: NaiveDate,
}

impl RetentionPolicy {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            max_inactive_days: DEFAULT_MAX_INACTIVE_DAYS,
            today,
        }
    }

    pub fn with_max_inactive_days(mut self, days: i64) -> Self {
        self.max_inactive_days = days;
        self
    }

    pub fn age_days(&self, last_activity: NaiveDate) -> i64 {
        (self.today - last_activity).num_days()
    }

    pub fn flag(&self, last_activity: NaiveDate) -> DeleteFlag {
        if self.age_days(last_activity) >= self.max_inactive_days {
            DeleteFlag::Definite
        } else {
            DeleteFlag::Undetermined
        }
    }

    /// Deletion candidates for every non-OK record, in input order.
    pub fn candidates(&self, records: &[ClassifiedRecord]) -> Vec<DeletionCandidate> {
        records
            .iter()
            .filter(|r| r.status != MatchStatus::Ok)
            .map(|r| DeletionCandidate {
                record: r.record.clone(),
                delete: self.flag(r.record.last_activity),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ForumRecord, MatchReason, MatchStrategy};

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn classified(id: &str, last: &str, status: MatchStatus) -> ClassifiedRecord {
        let reasons = match status {
            MatchStatus::Unknown => vec![],
            _ => vec![MatchReason::new(MatchStrategy::Email, "5")],
        };
        ClassifiedRecord {
            record: ForumRecord {
                id: id.into(),
                username: format!("user{id}"),
                display_name: String::new(),
                email: String::new(),
                last_activity: date(last),
            },
            reasons,
            status,
        }
    }

    #[test]
    fn old_activity_is_definite() {
        let policy = RetentionPolicy::new(date("2020-01-01"));
        assert_eq!(policy.flag(date("2017-06-01")), DeleteFlag::Definite);
        assert_eq!(policy.flag(date("2017-06-01")).as_str(), "1");
    }

    #[test]
    fn recent_activity_is_undetermined() {
        let policy = RetentionPolicy::new(date("2020-01-01"));
        assert_eq!(policy.flag(date("2019-06-01")), DeleteFlag::Undetermined);
        assert_eq!(policy.flag(date("2019-06-01")).as_str(), "?");
    }

    #[test]
    fn threshold_is_inclusive() {
        let today = date("2020-01-01");
        let policy = RetentionPolicy::new(today);
        let exactly = today - chrono::Duration::days(730);
        assert_eq!(policy.age_days(exactly), 730);
        assert_eq!(policy.flag(exactly), DeleteFlag::Definite);
        assert_eq!(policy.flag(exactly + chrono::Duration::days(1)), DeleteFlag::Undetermined);
    }

    #[test]
    fn future_activity_is_undetermined() {
        let policy = RetentionPolicy::new(date("2020-01-01"));
        assert_eq!(policy.flag(date("2021-01-01")), DeleteFlag::Undetermined);
    }

    #[test]
    fn custom_window() {
        let policy = RetentionPolicy::new(date("2020-01-01")).with_max_inactive_days(30);
        assert_eq!(policy.flag(date("2019-11-01")), DeleteFlag::Definite);
    }

    #[test]
    fn candidates_skip_ok_records() {
        let records = vec![
            classified("10", "2015-01-01", MatchStatus::Ok),
            classified("11", "2015-01-01", MatchStatus::Unknown),
            classified("12", "2019-12-01", MatchStatus::Conflict),
        ];
        let policy = RetentionPolicy::new(date("2020-01-01"));
        let candidates = policy.candidates(&records);
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].record.id.as_str(), "11");
        assert_eq!(candidates[0].delete, DeleteFlag::Definite);
        assert_eq!(candidates[1].record.id.as_str(), "12");
        assert_eq!(candidates[1].delete, DeleteFlag::Undetermined);
    }
}
