//! Application domain entity
//!
//! A candidate's application to a job.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ApplicationId, CandidateId, JobId, OrganizationId};
use crate::domain::transform::{FromRow, Row};

/// Pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStage {
    Applied,
    Screening,
    Interview,
    Offer,
    Hired,
    Rejected,
}

impl std::fmt::Display for ApplicationStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ApplicationStage::Applied => "applied",
            ApplicationStage::Screening => "screening",
            ApplicationStage::Interview => "interview",
            ApplicationStage::Offer => "offer",
            ApplicationStage::Hired => "hired",
            ApplicationStage::Rejected => "rejected",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for ApplicationStage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "applied" => Ok(ApplicationStage::Applied),
            "screening" => Ok(ApplicationStage::Screening),
            "interview" => Ok(ApplicationStage::Interview),
            "offer" => Ok(ApplicationStage::Offer),
            "hired" => Ok(ApplicationStage::Hired),
            "rejected" => Ok(ApplicationStage::Rejected),
            _ => Err(format!("Unknown application stage: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: ApplicationId,
    pub organization_id: OrganizationId,
    pub job_id: JobId,
    pub candidate_id: CandidateId,
    pub stage: String,
    pub cover_letter: Option<String>,
    pub rejected: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl FromRow for Application {
    fn from_row(row: &serde_json::Value) -> Self {
        let r = Row::new(row);
        Application {
            id: r.uuid("id"),
            organization_id: r.uuid("organization_id"),
            job_id: r.uuid("job_id"),
            candidate_id: r.uuid("candidate_id"),
            stage: r
                .opt_string("stage")
                .unwrap_or_else(|| ApplicationStage::Applied.to_string()),
            cover_letter: r.opt_string("cover_letter"),
            rejected: r.bool("rejected"),
            created_at: r.timestamp("created_at"),
            updated_at: r.opt_timestamp("updated_at"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewApplication {
    pub organization_id: OrganizationId,
    pub job_id: JobId,
    pub candidate_id: CandidateId,
    pub cover_letter: Option<String>,
}
