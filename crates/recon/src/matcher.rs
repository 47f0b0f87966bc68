use std::collections::HashMap;

use crate::config::{MatchingConfig, NameField};
use crate::model::{ForumRecord, MatchReason, MatchStrategy, RecordId, RosterRecord};
use crate::normalize::{normalize, normalize_email};

/// Roster lookup indexes, built once and shared read-only across forum records.
#[derive(Debug, Clone)]
pub struct Matcher {
    by_email: HashMap<String, RecordId>,
    by_full_name: HashMap<String, RecordId>,
    guest_id: i64,
    name_field: NameField,
}

impl Matcher {
    /// Index the roster with the default matching settings.
    pub fn new(roster: &[RosterRecord]) -> Self {
        Self::with_config(roster, &MatchingConfig::default())
    }

    pub fn with_config(roster: &[RosterRecord], config: &MatchingConfig) -> Self {
        let mut by_email = HashMap::with_capacity(roster.len());
        let mut by_full_name = HashMap::with_capacity(roster.len() * 2);

        for member in roster {
            let email = normalize_email(&member.email);
            if email.is_empty() {
                log::debug!("roster member {} has no email, not indexed by email", member.id);
            } else {
                insert_last_wins(&mut by_email, "email", email, &member.id);
            }

            // "first last" and "last first" both resolve to the member
            let first = normalize(&member.first_name);
            let last = normalize(&member.last_name);
            insert_last_wins(&mut by_full_name, "full name", format!("{first} {last}"), &member.id);
            insert_last_wins(&mut by_full_name, "full name", format!("{last} {first}"), &member.id);
        }

        log::debug!(
            "indexed {} roster members: {} email keys, {} name keys",
            roster.len(),
            by_email.len(),
            by_full_name.len()
        );

        Self {
            by_email,
            by_full_name,
            guest_id: config.guest_id,
            name_field: config.name_field,
        }
    }

    /// Run every strategy against one forum account's fields.
    ///
    /// Returns all reasons sorted by (strategy, matched id); empty when nothing matches.
    pub fn match_fields(&self, forum_id: &RecordId, name: &str, email: &str) -> Vec<MatchReason> {
        let mut reasons = Vec::new();

        if forum_id.as_int() == Some(self.guest_id) {
            reasons.push(MatchReason::new(MatchStrategy::GuestUser, forum_id.clone()));
        }

        if let Some(id) = self.by_email.get(&normalize_email(email)) {
            reasons.push(MatchReason::new(MatchStrategy::Email, id.clone()));
        }

        if let Some(id) = self.by_full_name.get(&normalize(name)) {
            reasons.push(MatchReason::new(MatchStrategy::FullName, id.clone()));
        }

        reasons.sort();
        reasons
    }

    /// Match a forum record, reading the name from the configured column.
    pub fn match_record(&self, record: &ForumRecord) -> Vec<MatchReason> {
        let name = match self.name_field {
            NameField::Username => &record.username,
            NameField::DisplayName => &record.display_name,
        };
        self.match_fields(&record.id, name, &record.email)
    }

    pub fn email_keys(&self) -> usize {
        self.by_email.len()
    }

    pub fn name_keys(&self) -> usize {
        self.by_full_name.len()
    }
}

fn insert_last_wins(index: &mut HashMap<String, RecordId>, kind: &str, key: String, id: &RecordId) {
    if let Some(previous) = index.insert(key, id.clone()) {
        if &previous != id {
            log::warn!("roster {kind} collision: id {previous} replaced by id {id}");
        }
    }
}
