// SPDX-License-Identifier: MPL-2.0
//! Registered users.
//!
//! The JSON shape (camelCase keys, RFC 3339 `createdAt`) is shared by the
//! data file and the REST API.

pub mod id;
pub mod validation;

pub use id::generate_id;
pub use validation::{FieldError, NewUser, UserChanges};

use chrono::{DateTime, Datelike, NaiveDate, SubsecRound, TimeDelta, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Builds a user from validated input, stamped with a fresh id.
    ///
    /// The timestamp is truncated to milliseconds so it survives a round
    /// trip through JavaScript clients unchanged.
    #[must_use]
    pub fn register(new: NewUser, now: DateTime<Utc>) -> Self {
        Self {
            id: generate_id(),
            name: new.name,
            email: new.email,
            message: Some(new.message),
            created_at: now.trunc_subsecs(3),
        }
    }

    /// Applies validated changes in place.
    pub fn apply(&mut self, changes: &UserChanges) {
        if let Some(name) = &changes.name {
            self.name.clone_from(name);
        }
        if let Some(email) = &changes.email {
            self.email.clone_from(email);
        }
        if let Some(message) = &changes.message {
            self.message = Some(message.clone());
        }
    }

    /// Case-insensitive substring match on name, email or message.
    /// `needle` must already be lowercased.
    #[must_use]
    pub fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.email.to_lowercase().contains(needle)
            || self
                .message
                .as_deref()
                .is_some_and(|m| m.to_lowercase().contains(needle))
    }

    /// Part of the email after `@`, if any.
    #[must_use]
    pub fn email_domain(&self) -> Option<&str> {
        self.email.split_once('@').map(|(_, domain)| domain)
    }
}

/// Registration form payload.
///
/// Missing fields deserialize as empty strings so that they are reported
/// by validation rather than rejected by the JSON decoder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateUserInput {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Partial update payload. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateUserInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl UpdateUserInput {
    /// Names of the fields present in the payload.
    #[must_use]
    pub fn fields(&self) -> Vec<&'static str> {
        [
            ("name", self.name.is_some()),
            ("email", self.email.is_some()),
            ("message", self.message.is_some()),
        ]
        .into_iter()
        .filter_map(|(field, present)| present.then_some(field))
        .collect()
    }
}

/// A list of users with its length.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserList {
    pub list: Vec<User>,
    pub total: usize,
}

impl From<Vec<User>> for UserList {
    fn from(list: Vec<User>) -> Self {
        let total = list.len();
        Self { list, total }
    }
}

/// Registration counts over calendar windows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub total: usize,
    /// Since midnight today.
    pub today_count: usize,
    /// Since midnight seven days ago.
    pub week_count: usize,
    /// Since midnight on the first day of the month.
    pub month_count: usize,
}

impl UserStats {
    /// Counts `users` relative to `now`. Calendar boundaries are taken in
    /// `now`'s time zone.
    #[must_use]
    pub fn compute<Tz: TimeZone>(users: &[User], now: &DateTime<Tz>) -> Self {
        let tz = now.timezone();
        let midnight = |date: NaiveDate| -> Option<DateTime<Utc>> {
            let naive = date.and_hms_opt(0, 0, 0)?;
            Some(
                naive
                    .and_local_timezone(tz.clone())
                    .earliest()
                    .map_or_else(|| naive.and_utc(), |dt| dt.with_timezone(&Utc)),
            )
        };

        let today = now.date_naive();
        let today_start = midnight(today);
        let week_start = today_start.map(|start| start - TimeDelta::days(7));
        let month_start = today.with_day(1).and_then(midnight);

        let since = |start: Option<DateTime<Utc>>| {
            start.map_or(0, |start| users.iter().filter(|u| u.created_at >= start).count())
        };

        Self {
            total: users.len(),
            today_count: since(today_start),
            week_count: since(week_start),
            month_count: since(month_start),
        }
    }
}

/// Email domains ordered by user count (descending, then by name), at most
/// `limit` of them.
#[must_use]
pub fn top_email_domains(users: &[User], limit: usize) -> Vec<(String, usize)> {
    let mut counts: std::collections::BTreeMap<&str, usize> = std::collections::BTreeMap::new();
    for domain in users.iter().filter_map(User::email_domain) {
        *counts.entry(domain).or_default() += 1;
    }

    let mut ranked: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(domain, count)| (domain.to_string(), count))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(limit);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn user_at(email: &str, created_at: &str) -> User {
        User {
            id: generate_id(),
            name: "Test".into(),
            email: email.into(),
            message: None,
            created_at: created_at.parse().expect("valid timestamp"),
        }
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let user = user_at("a@b.co", "2024-03-05T10:00:00.123Z");
        let json = serde_json::to_value(&user).unwrap();

        assert!(json.get("createdAt").is_some());
        assert!(json.get("message").is_none(), "absent message is omitted");

        let back: User = serde_json::from_value(json).unwrap();
        assert_eq!(back, user);
    }

    #[test]
    fn reads_javascript_timestamps() {
        let raw = r#"{"id":"abc","name":"Ann","email":"ann@x.io","message":"hello there!","createdAt":"2024-01-02T03:04:05.678Z"}"#;
        let user: User = serde_json::from_str(raw).unwrap();
        assert_eq!(user.created_at.timestamp_subsec_millis(), 678);
    }

    #[test]
    fn stats_use_calendar_windows() {
        // Wednesday 2024-05-15 12:00 at UTC+2
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let now = tz.with_ymd_and_hms(2024, 5, 15, 12, 0, 0).unwrap();

        let users = vec![
            user_at("a@x.io", "2024-05-15T08:00:00Z"), // today
            user_at("b@x.io", "2024-05-14T21:59:00Z"), // yesterday local
            user_at("c@x.io", "2024-05-07T22:00:00Z"), // exactly 7 days before midnight
            user_at("d@x.io", "2024-05-03T00:00:00Z"), // this month
            user_at("e@x.io", "2024-04-30T21:59:59Z"), // last month local
        ];

        let stats = UserStats::compute(&users, &now);
        assert_eq!(
            stats,
            UserStats {
                total: 5,
                today_count: 1,
                week_count: 3,
                month_count: 4,
            }
        );
    }

    #[test]
    fn stats_of_empty_list_are_zero() {
        assert_eq!(UserStats::compute(&[], &Utc::now()), UserStats::default());
    }

    #[test]
    fn apply_only_touches_given_fields() {
        let mut user = user_at("old@x.io", "2024-01-01T00:00:00Z");
        user.apply(&UserChanges {
            name: None,
            email: Some("new@x.io".into()),
            message: None,
        });
        assert_eq!(user.email, "new@x.io");
        assert_eq!(user.name, "Test");
        assert!(user.message.is_none());
    }

    #[test]
    fn matches_is_case_insensitive_across_fields() {
        let mut user = user_at("Ann@Example.com", "2024-01-01T00:00:00Z");
        user.message = Some("Looking forward to the Meetup".into());

        assert!(user.matches("example"));
        assert!(user.matches("meetup"));
        assert!(user.matches("test"));
        assert!(!user.matches("bob"));
    }

    #[test]
    fn top_domains_are_ranked_and_limited() {
        let users: Vec<_> = ["a@x.io", "b@x.io", "c@y.io", "d@z.io", "e@y.io", "f@x.io"]
            .iter()
            .map(|email| user_at(email, "2024-01-01T00:00:00Z"))
            .collect();

        let top = top_email_domains(&users, 2);
        assert_eq!(top, vec![("x.io".to_string(), 3), ("y.io".to_string(), 2)]);
    }

    #[test]
    fn update_input_lists_present_fields() {
        let input = UpdateUserInput {
            name: Some("x".into()),
            message: Some("y".into()),
            ..Default::default()
        };
        assert_eq!(input.fields(), vec!["name", "message"]);
    }
}
