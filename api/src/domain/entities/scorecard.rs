//! Scorecard templates and submitted scorecards

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::{InterviewId, OrganizationId, UserId};
use crate::domain::transform::{FromRow, Row};

/// Recommendations an interviewer may submit
pub const RECOMMENDATIONS: &[&str] = &["strong_yes", "yes", "no", "strong_no"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScorecardTemplate {
    pub id: Uuid,
    pub organization_id: OrganizationId,
    pub name: String,
    /// Ordered list of criteria objects (`{ "name": ..., "description": ... }`)
    pub criteria: Vec<Value>,
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
}

impl FromRow for ScorecardTemplate {
    fn from_row(row: &Value) -> Self {
        let r = Row::new(row);
        ScorecardTemplate {
            id: r.uuid("id"),
            organization_id: r.uuid("organization_id"),
            name: r.string("name"),
            criteria: r.json_array("criteria"),
            is_default: r.bool("is_default"),
            created_at: r.timestamp("created_at"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewScorecardTemplate {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub criteria: Vec<Value>,
    #[serde(default)]
    pub is_default: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scorecard {
    pub id: Uuid,
    pub organization_id: OrganizationId,
    pub interview_id: InterviewId,
    pub template_id: Option<Uuid>,
    pub submitted_by: Option<UserId>,
    /// Criterion name → rating (1-5)
    pub ratings: Value,
    pub recommendation: Option<String>,
    pub comments: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl FromRow for Scorecard {
    fn from_row(row: &Value) -> Self {
        let r = Row::new(row);
        Scorecard {
            id: r.uuid("id"),
            organization_id: r.uuid("organization_id"),
            interview_id: r.uuid("interview_id"),
            template_id: r.opt_uuid("template_id"),
            submitted_by: r.opt_uuid("submitted_by"),
            ratings: r.json("ratings"),
            recommendation: r.opt_string("recommendation"),
            comments: r.opt_string("comments"),
            created_at: r.timestamp("created_at"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewScorecard {
    pub interview_id: Option<InterviewId>,
    pub template_id: Option<Uuid>,
    #[serde(default)]
    pub ratings: serde_json::Map<String, Value>,
    pub recommendation: Option<String>,
    pub comments: Option<String>,
}

/// Validated scorecard ready to persist
#[derive(Debug, Clone)]
pub struct ScorecardDraft {
    pub organization_id: OrganizationId,
    pub interview_id: InterviewId,
    pub template_id: Option<Uuid>,
    pub submitted_by: UserId,
    pub ratings: Value,
    pub recommendation: Option<String>,
    pub comments: Option<String>,
}

/// Ratings must be integers from 1 to 5
pub fn validate_ratings(ratings: &serde_json::Map<String, Value>) -> Result<(), String> {
    for (criterion, value) in ratings {
        match value.as_i64() {
            Some(1..=5) => {}
            _ => return Err(format!("Rating for '{}' must be between 1 and 5", criterion)),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::transform::to_row;
    use serde_json::json;

    #[test]
    fn template_criteria_default_to_empty() {
        let t = ScorecardTemplate::from_row(&json!({ "name": "Default", "criteria": "bad" }));
        assert!(t.criteria.is_empty());
        assert!(!t.is_default);
    }

    #[test]
    fn template_transform_keeps_nested_keys() {
        let once = ScorecardTemplate::from_row(&json!({
            "id": "e1e1e1e1-0000-4000-8000-000000000001",
            "name": "Engineering",
            "criteria": [{ "name": "System design", "weightPct": 40 }],
            "is_default": true,
            "created_at": "2024-01-01T00:00:00Z",
        }));
        let twice = ScorecardTemplate::from_row(&to_row(&once));
        assert_eq!(twice, once);
        assert_eq!(twice.criteria[0]["weightPct"], 40);
    }

    #[test]
    fn ratings_validation() {
        let ok = json!({ "Communication": 4, "Coding": 5 });
        assert!(validate_ratings(ok.as_object().unwrap()).is_ok());
        let bad = json!({ "Communication": 9 });
        let err = validate_ratings(bad.as_object().unwrap()).unwrap_err();
        assert!(err.contains("Communication"));
        let not_number = json!({ "Coding": "great" });
        assert!(validate_ratings(not_number.as_object().unwrap()).is_err());
    }
}
