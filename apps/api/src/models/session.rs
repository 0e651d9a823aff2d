use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

use crate::company::CompanyProfile;
use crate::interview::transcript::InterviewTurn;
use crate::resume::ats::AtsScore;

/// One persisted interview session. Rows are append-only: a save always
/// inserts, nothing ever updates a previous record.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SessionRow {
    pub id: i32,
    pub archetype: String,
    pub score: i32,
    pub transcript: Json<Vec<InterviewTurn>>,
    pub resume_summary: Option<String>,
    pub verdict: Option<String>,
    pub corporate_title: Option<String>,
    pub strengths: Option<Json<Vec<String>>>,
    pub areas_for_improvement: Option<Json<Vec<String>>>,
    pub real_advice: Option<String>,
    pub interview_tips: Option<Json<Vec<String>>>,
    pub company_name: Option<String>,
    pub company_profile: Option<Json<CompanyProfile>>,
    pub ats_score: Option<Json<AtsScore>>,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a session save.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSession {
    pub archetype: String,
    pub score: i32,
    pub transcript: Vec<InterviewTurn>,
    #[serde(default)]
    pub resume_summary: Option<String>,
    #[serde(default)]
    pub verdict: Option<String>,
    #[serde(default)]
    pub corporate_title: Option<String>,
    #[serde(default)]
    pub strengths: Option<Vec<String>>,
    #[serde(default)]
    pub areas_for_improvement: Option<Vec<String>>,
    #[serde(default)]
    pub real_advice: Option<String>,
    #[serde(default)]
    pub interview_tips: Option<Vec<String>>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub company_profile: Option<CompanyProfile>,
    #[serde(default)]
    pub ats_score: Option<AtsScore>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_session_deserializes_from_client_payload() {
        let body = json!({
            "archetype": "BTech",
            "score": 62,
            "transcript": [
                {"role": "hr", "text": "Why?"},
                {"role": "user", "text": "Rent."}
            ],
            "verdict": "Acceptable.",
            "corporateTitle": "Junior Synergy Catalyst",
            "strengths": ["Punctual"],
            "areasForImprovement": ["Buzzwords"],
            "interviewTips": ["Breathe"]
        });
        let session: NewSession = serde_json::from_value(body).unwrap();
        assert_eq!(session.archetype, "BTech");
        assert_eq!(session.score, 62);
        assert_eq!(session.transcript.len(), 2);
        assert_eq!(session.corporate_title.as_deref(), Some("Junior Synergy Catalyst"));
        assert!(session.company_profile.is_none());
    }
}
