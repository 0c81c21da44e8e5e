//! Job domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{JobId, OrganizationId, UserId};
use crate::domain::transform::{FromRow, Row};

/// Publication state of a job posting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Draft,
    Published,
    Closed,
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobStatus::Draft => write!(f, "draft"),
            JobStatus::Published => write!(f, "published"),
            JobStatus::Closed => write!(f, "closed"),
        }
    }
}

impl std::str::FromStr for JobStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "draft" => Ok(JobStatus::Draft),
            "published" => Ok(JobStatus::Published),
            "closed" => Ok(JobStatus::Closed),
            _ => Err(format!("Unknown job status: {}", s)),
        }
    }
}

/// A job posting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: JobId,
    pub organization_id: OrganizationId,
    pub title: String,
    pub department: Option<String>,
    pub location: Option<String>,
    pub employment_type: Option<String>,
    pub description: Option<String>,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub status: String,
    pub is_remote: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub created_by: Option<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Job {
    pub fn is_published(&self) -> bool {
        self.status.parse::<JobStatus>().ok() == Some(JobStatus::Published)
    }
}

impl FromRow for Job {
    fn from_row(row: &serde_json::Value) -> Self {
        let r = Row::new(row);
        Job {
            id: r.uuid("id"),
            organization_id: r.uuid("organization_id"),
            title: r.string("title"),
            department: r.opt_string("department"),
            location: r.opt_string("location"),
            employment_type: r.opt_string("employment_type"),
            description: r.opt_string("description"),
            salary_min: r.opt_i64("salary_min"),
            salary_max: r.opt_i64("salary_max"),
            status: r
                .opt_string("status")
                .unwrap_or_else(|| JobStatus::Draft.to_string()),
            is_remote: r.bool("is_remote"),
            published_at: r.opt_timestamp("published_at"),
            created_by: r.opt_uuid("created_by"),
            created_at: r.timestamp("created_at"),
            updated_at: r.opt_timestamp("updated_at"),
        }
    }
}

/// Data needed to create a job
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJob {
    #[serde(default)]
    pub title: String,
    pub department: Option<String>,
    pub location: Option<String>,
    pub employment_type: Option<String>,
    pub description: Option<String>,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub status: Option<JobStatus>,
    #[serde(default)]
    pub is_remote: bool,
}

/// Partial job update; `None` leaves the column unchanged
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobUpdate {
    pub title: Option<String>,
    pub department: Option<String>,
    pub location: Option<String>,
    pub employment_type: Option<String>,
    pub description: Option<String>,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub status: Option<JobStatus>,
    pub is_remote: Option<bool>,
}

/// Shared salary sanity check for create and update
pub fn validate_salary_range(min: Option<i64>, max: Option<i64>) -> Result<(), String> {
    if min.is_some_and(|v| v < 0) || max.is_some_and(|v| v < 0) {
        return Err("Salary must not be negative".to_string());
    }
    match (min, max) {
        (Some(lo), Some(hi)) if lo > hi => {
            Err("salaryMin must not exceed salaryMax".to_string())
        }
        _ => Ok(()),
    }
}
