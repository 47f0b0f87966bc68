use chrono::NaiveDate;

use crate::classify::classify_record;
use crate::config::ReconConfig;
use crate::evidence::compute_summary;
use crate::matcher::Matcher;
use crate::model::{ClassifiedRecord, ReconInput, ReconMeta, ReconResult};
use crate::retention::RetentionPolicy;

/// Run reconciliation. Returns classified forum records, deletion
/// candidates for the non-OK ones, and a summary.
///
/// `today` anchors the retention policy so runs are reproducible.
pub fn run(config: &ReconConfig, input: &ReconInput, today: NaiveDate) -> ReconResult {
    let matcher = Matcher::with_config(&input.roster, &config.matching);

    let records: Vec<ClassifiedRecord> = input
        .forum
        .iter()
        .map(|forum| classify_record(forum, matcher.match_record(forum)))
        .collect();

    let policy =
        RetentionPolicy::new(today).with_max_inactive_days(config.retention.max_inactive_days);
    let candidates = policy.candidates(&records);

    let summary = compute_summary(&records, &candidates);
    log::info!(
        "matched {} forum accounts against {} members: {} ok, {} conflict, {} unknown ({} stale)",
        summary.total,
        input.roster.len(),
        summary.ok,
        summary.conflict,
        summary.unknown,
        summary.stale,
    );

    ReconResult {
        meta: ReconMeta {
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            today,
            max_inactive_days: config.retention.max_inactive_days,
            roster_size: input.roster.len(),
        },
        summary,
        records,
        candidates,
    }
}

impl ReconResult {
    pub fn to_json_pretty(&self) -> Result<String, crate::ReconError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| crate::ReconError::Io(format!("JSON serialization error: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DeleteFlag, MatchStatus};
    use crate::snapshot::{load_forum_csv, load_roster_csv};

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn input(roster_csv: &str, forum_csv: &str) -> ReconInput {
        ReconInput {
            roster: load_roster_csv("roster", roster_csv).unwrap(),
            forum: load_forum_csv("forum", forum_csv).unwrap(),
        }
    }

    #[test]
    fn email_match_end_to_end() {
        let input = input(
            "id,first_name,last_name,email\n1,Ann,Lee,ann@x.com\n",
            "id,username,display_name,email,last_activity\n10,ann99,Ann Lee,ann@X.com ,2019-01-01\n",
        );
        let result = run(&ReconConfig::default(), &input, date("2020-01-01"));
        assert_eq!(result.records.len(), 1);
        assert_eq!(result.records[0].status, MatchStatus::Ok);
        assert_eq!(result.records[0].reasons[0].to_string(), "email=1");
        assert!(result.candidates.is_empty());
        assert_eq!(result.summary.unmatched, 0);
    }

    #[test]
    fn guest_never_flagged() {
        let input = input(
            "id,first_name,last_name,email\n",
            "id,username,display_name,email,last_activity\n1,guest,,,2010-01-01\n",
        );
        let result = run(&ReconConfig::default(), &input, date("2020-01-01"));
        assert_eq!(result.records[0].status, MatchStatus::Ok);
        assert!(result.candidates.is_empty());
    }

    #[test]
    fn mixed_statuses_and_candidates() {
        let input = input(
            "\
id,first_name,last_name,email
5,Ann,Lee,ann@x.com
9,Bob,Ray,bob@x.com
",
            "\
id,username,display_name,email,last_activity
10,Ann Lee,,ann@x.com,2019-05-01
11,Ray Bob,,ann@x.com,2017-06-01
12,nobody,,nobody@x.com,2016-01-01
13,someone,,,2019-06-01
",
        );
        let result = run(&ReconConfig::default(), &input, date("2020-01-01"));
        let statuses: Vec<_> = result.records.iter().map(|r| r.status).collect();
        assert_eq!(
            statuses,
            vec![MatchStatus::Ok, MatchStatus::Conflict, MatchStatus::Unknown, MatchStatus::Unknown]
        );

        let flags: Vec<_> = result
            .candidates
            .iter()
            .map(|c| (c.record.id.as_str(), c.delete))
            .collect();
        assert_eq!(
            flags,
            vec![
                ("11", DeleteFlag::Definite),
                ("12", DeleteFlag::Definite),
                ("13", DeleteFlag::Undetermined),
            ]
        );
        assert_eq!(result.summary.unmatched, 3);
        assert_eq!(result.summary.stale, 2);
    }

    #[test]
    fn empty_inputs_are_valid() {
        let result = run(&ReconConfig::default(), &ReconInput::default(), date("2020-01-01"));
        assert!(result.records.is_empty());
        assert!(result.candidates.is_empty());
        assert_eq!(result.summary.unmatched, 0);
    }

    #[test]
    fn retention_window_from_config() {
        let input = input(
            "id,first_name,last_name,email\n",
            "id,username,display_name,email,last_activity\n10,x,,,2019-11-01\n",
        );
        let config = ReconConfig::from_toml("[retention]\nmax_inactive_days = 30\n").unwrap();
        let result = run(&config, &input, date("2020-01-01"));
        assert_eq!(result.candidates[0].delete, DeleteFlag::Definite);
        assert_eq!(result.meta.max_inactive_days, 30);
    }

    #[test]
    fn json_output_shape() {
        let input = input(
            "id,first_name,last_name,email\n5,Ann,Lee,ann@x.com\n",
            "\
id,username,display_name,email,last_activity
10,Lee Ann,,,2019-01-01
11,x,,,2015-01-01
",
        );
        let result = run(&ReconConfig::default(), &input, date("2020-01-01"));
        let json: serde_json::Value = serde_json::from_str(&result.to_json_pretty().unwrap()).unwrap();
        assert_eq!(json["meta"]["today"], "2020-01-01");
        assert_eq!(json["summary"]["unknown"], 1);
        assert_eq!(json["records"][0]["status"], "OK");
        assert_eq!(json["records"][0]["reasons"][0]["strategy"], "full_name");
        assert_eq!(json["records"][0]["reasons"][0]["matched_id"], "5");
        assert_eq!(json["candidates"][0]["delete"], "1");
    }
}
