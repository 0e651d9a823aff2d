//! Axum route handlers for the interview API.
//!
//! The server holds no session state between requests. Everything the
//! orchestrator needs travels in the request body and the client carries the
//! updated act counters forward itself.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::company::CompanyProfile;
use crate::errors::AppError;
use crate::interview::composer::ChatPromptInputs;
use crate::interview::orchestrator::{self, HrReply};
use crate::interview::transcript::InterviewTurn;
use crate::interview::verdict::{self, VerdictReport};
use crate::interview::Archetype;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GreetingRequest {
    pub archetype: Archetype,
    #[serde(default)]
    pub resume_summary: Option<String>,
    #[serde(default)]
    pub company_profile: Option<CompanyProfile>,
}

#[derive(Debug, Serialize)]
pub struct GreetingResponse {
    pub greeting: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub archetype: Archetype,
    pub current_act: usize,
    pub conversation_history: Vec<InterviewTurn>,
    #[serde(default)]
    pub messages_in_current_act: u32,
    #[serde(default)]
    pub resume_summary: Option<String>,
    #[serde(default)]
    pub company_profile: Option<CompanyProfile>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerdictRequest {
    pub archetype: Archetype,
    pub transcript: Vec<InterviewTurn>,
    #[serde(default)]
    pub resume_summary: Option<String>,
    #[serde(default)]
    pub company_profile: Option<CompanyProfile>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/interview/greeting
///
/// Opens the interview. A gateway failure still returns 200 with the
/// templated fallback greeting.
pub async fn handle_greeting(
    State(state): State<AppState>,
    Json(request): Json<GreetingRequest>,
) -> Result<Json<GreetingResponse>, AppError> {
    let greeting = orchestrator::greeting(
        state.llm.as_ref(),
        request.archetype,
        request.resume_summary.as_deref(),
        request.company_profile.as_ref(),
    )
    .await;

    Ok(Json(GreetingResponse { greeting }))
}

/// POST /api/interview/chat
///
/// One interview turn. Bad inputs (empty history, act out of range) are 400s;
/// gateway failures degrade to the Fallback Policy and still return 200.
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<HrReply>, AppError> {
    let inputs = ChatPromptInputs {
        archetype: request.archetype,
        current_act: request.current_act,
        exchanges_in_act: request.messages_in_current_act,
        resume_summary: request.resume_summary.as_deref(),
        company: request.company_profile.as_ref(),
    };

    let reply = orchestrator::chat(
        state.llm.as_ref(),
        &inputs,
        &request.conversation_history,
    )
    .await?;

    Ok(Json(reply))
}

/// POST /api/interview/verdict
///
/// Terminal report. An empty transcript is a 400; the client shows a
/// no-data state instead of calling this.
pub async fn handle_verdict(
    State(state): State<AppState>,
    Json(request): Json<VerdictRequest>,
) -> Result<Json<VerdictReport>, AppError> {
    let report = verdict::generate(
        state.llm.as_ref(),
        request.archetype,
        &request.transcript,
        request.resume_summary.as_deref(),
        request.company_profile.as_ref(),
    )
    .await?;

    Ok(Json(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_chat_request_accepts_camel_case_payload() {
        let body = json!({
            "archetype": "BTech",
            "currentAct": 1,
            "conversationHistory": [
                {"role": "hr", "text": "Why?"},
                {"role": "user", "text": "Because."}
            ],
            "messagesInCurrentAct": 2,
            "resumeSummary": "Ships software.",
        });
        let request: ChatRequest = serde_json::from_value(body).unwrap();
        assert_eq!(request.archetype, Archetype::BTech);
        assert_eq!(request.current_act, 1);
        assert_eq!(request.messages_in_current_act, 2);
        assert_eq!(request.conversation_history.len(), 2);
        assert!(request.company_profile.is_none());
    }

    #[test]
    fn test_greeting_request_optionals_default() {
        let request: GreetingRequest =
            serde_json::from_value(json!({"archetype": "Analyst"})).unwrap();
        assert!(request.resume_summary.is_none());
        assert!(request.company_profile.is_none());
    }

    #[test]
    fn test_verdict_request_requires_transcript_field() {
        let result: Result<VerdictRequest, _> =
            serde_json::from_value(json!({"archetype": "MBA"}));
        assert!(result.is_err());
    }
}
