// ABOUTME: Idea type definitions
// ABOUTME: Records, workflow statuses and creation input for tracked ideas

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Workflow stage of an idea. Stored as its display text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT")]
pub enum IdeaStatus {
    Created,
    Valid,
    Archived,
    Evaluated,
    Budgeted,
    #[serde(rename = "In Development")]
    #[sqlx(rename = "In Development")]
    InDevelopment,
    Scheduled,
    Live,
}

impl IdeaStatus {
    pub const ALL: [IdeaStatus; 8] = [
        IdeaStatus::Created,
        IdeaStatus::Valid,
        IdeaStatus::Archived,
        IdeaStatus::Evaluated,
        IdeaStatus::Budgeted,
        IdeaStatus::InDevelopment,
        IdeaStatus::Scheduled,
        IdeaStatus::Live,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IdeaStatus::Created => "Created",
            IdeaStatus::Valid => "Valid",
            IdeaStatus::Archived => "Archived",
            IdeaStatus::Evaluated => "Evaluated",
            IdeaStatus::Budgeted => "Budgeted",
            IdeaStatus::InDevelopment => "In Development",
            IdeaStatus::Scheduled => "Scheduled",
            IdeaStatus::Live => "Live",
        }
    }
}

impl fmt::Display for IdeaStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted idea row.
///
/// Serialized the way the row reads in SQLite: `leadership_approval` as 0/1,
/// `created_at` as `YYYY-MM-DD HH:MM:SS` and integral numbers without a
/// fractional part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Idea {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    #[serde(serialize_with = "wire::number")]
    pub impacted_users: f64,
    pub status: IdeaStatus,
    pub evaluator_comments: Option<String>,
    #[serde(serialize_with = "wire::optional_number")]
    pub budget: Option<f64>,
    #[serde(with = "wire::flag")]
    pub leadership_approval: bool,
    pub dev_effort_estimate: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    #[serde(with = "wire::timestamp")]
    pub created_at: DateTime<Utc>,
}

/// Input for inserting a new idea.
///
/// `title` and `impacted_users` are optional here so that a missing value
/// reaches the table's NOT NULL constraint and is reported by the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdeaCreateInput {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub impacted_users: Option<f64>,
}

/// The fields echoed back after a successful insert
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedIdea {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "wire::optional_number"
    )]
    pub impacted_users: Option<f64>,
    pub status: IdeaStatus,
}

impl CreatedIdea {
    pub fn new(input: IdeaCreateInput, status: IdeaStatus) -> Self {
        Self {
            id: input.id,
            title: input.title,
            description: input.description,
            impacted_users: input.impacted_users,
            status,
        }
    }
}

/// Serde helpers for the JSON form of stored columns
pub(crate) mod wire {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    use crate::workflow::is_truthy;

    /// SQLite's `CURRENT_TIMESTAMP` layout
    pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    // Largest magnitude an f64 holds without losing integer precision
    const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

    pub fn number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.fract() == 0.0 && value.abs() <= MAX_EXACT_INTEGER {
            serializer.serialize_i64(*value as i64)
        } else {
            serializer.serialize_f64(*value)
        }
    }

    pub fn optional_number<S: Serializer>(
        value: &Option<f64>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => number(v, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub mod flag {
        use super::*;

        pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_i64(i64::from(*value))
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
            let value = Value::deserialize(deserializer)?;
            Ok(is_truthy(&value))
        }
    }

    pub mod timestamp {
        use super::*;

        pub fn serialize<S: Serializer>(
            value: &DateTime<Utc>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            serializer.collect_str(&value.format(TIMESTAMP_FORMAT))
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<DateTime<Utc>, D::Error> {
            let text = String::deserialize(deserializer)?;
            if let Ok(naive) = NaiveDateTime::parse_from_str(&text, TIMESTAMP_FORMAT) {
                return Ok(naive.and_utc());
            }
            DateTime::parse_from_rfc3339(&text)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(serde::de::Error::custom)
        }
    }
}
