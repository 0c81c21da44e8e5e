//! Interview domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ApplicationId, InterviewId, OrganizationId, UserId};
use crate::domain::transform::{FromRow, Row};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterviewStatus {
    Scheduled,
    Completed,
    Cancelled,
    NoShow,
}

impl std::fmt::Display for InterviewStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            InterviewStatus::Scheduled => "scheduled",
            InterviewStatus::Completed => "completed",
            InterviewStatus::Cancelled => "cancelled",
            InterviewStatus::NoShow => "noshow",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interview {
    pub id: InterviewId,
    pub organization_id: OrganizationId,
    pub application_id: ApplicationId,
    pub interviewer_id: Option<UserId>,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: i32,
    pub location: Option<String>,
    pub meeting_url: Option<String>,
    /// Calendar/meeting provider the event was created with, if any
    pub provider: Option<String>,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl FromRow for Interview {
    fn from_row(row: &serde_json::Value) -> Self {
        let r = Row::new(row);
        Interview {
            id: r.uuid("id"),
            organization_id: r.uuid("organization_id"),
            application_id: r.uuid("application_id"),
            interviewer_id: r.opt_uuid("interviewer_id"),
            scheduled_at: r.timestamp("scheduled_at"),
            duration_minutes: r.i32("duration_minutes"),
            location: r.opt_string("location"),
            meeting_url: r.opt_string("meeting_url"),
            provider: r.opt_string("provider"),
            status: r
                .opt_string("status")
                .unwrap_or_else(|| InterviewStatus::Scheduled.to_string()),
            notes: r.opt_string("notes"),
            created_at: r.timestamp("created_at"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInterview {
    pub application_id: Option<ApplicationId>,
    pub interviewer_id: Option<UserId>,
    pub scheduled_at: Option<DateTime<Utc>>,
    #[serde(default = "default_duration")]
    pub duration_minutes: i32,
    pub location: Option<String>,
    pub meeting_url: Option<String>,
    pub provider: Option<String>,
    pub notes: Option<String>,
}

fn default_duration() -> i32 {
    45
}

/// Validated interview ready to persist
#[derive(Debug, Clone)]
pub struct InterviewDraft {
    pub organization_id: OrganizationId,
    pub application_id: ApplicationId,
    pub interviewer_id: Option<UserId>,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: i32,
    pub location: Option<String>,
    pub meeting_url: Option<String>,
    pub provider: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewUpdate {
    pub scheduled_at: Option<DateTime<Utc>>,
    pub duration_minutes: Option<i32>,
    pub status: Option<InterviewStatus>,
    pub notes: Option<String>,
    pub meeting_url: Option<String>,
}
