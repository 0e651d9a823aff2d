//! Axum route handler for resume analysis.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::company::CompanyProfile;
use crate::errors::AppError;
use crate::interview::Archetype;
use crate::resume::analyzer;
use crate::resume::ats::{score_resume, AtsScore};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResumeRequest {
    pub resume_text: String,
    pub archetype: Archetype,
    #[serde(default)]
    pub company_profile: Option<CompanyProfile>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResumeResponse {
    pub feedback: String,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub buzzword_score: u32,
    pub ats_score: AtsScore,
}

/// POST /api/resume/analyze
///
/// Critique via the gateway plus the deterministic ATS breakdown. The ATS
/// part never depends on the gateway; a generation failure here is a 500.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeResumeRequest>,
) -> Result<Json<AnalyzeResumeResponse>, AppError> {
    if request.resume_text.trim().is_empty() {
        return Err(AppError::Validation(
            "resumeText cannot be empty".to_string(),
        ));
    }

    let ats_score = score_resume(&request.resume_text, request.archetype);

    let analysis = analyzer::analyze(
        state.llm.as_ref(),
        &request.resume_text,
        request.archetype,
        request.company_profile.as_ref(),
    )
    .await?;

    Ok(Json(AnalyzeResumeResponse {
        feedback: analysis.feedback,
        strengths: analysis.strengths,
        weaknesses: analysis.weaknesses,
        buzzword_score: analysis.buzzword_score,
        ats_score,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_accepts_camel_case_payload() {
        let request: AnalyzeResumeRequest = serde_json::from_value(json!({
            "resumeText": "Python developer",
            "archetype": "BTech"
        }))
        .unwrap();
        assert_eq!(request.archetype, Archetype::BTech);
        assert!(request.company_profile.is_none());
    }
}
