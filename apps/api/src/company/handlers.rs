//! Axum route handler for company research.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::company::research::{research_company, CompanyProfile};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchRequest {
    pub company_name: String,
}

/// POST /api/company/research
///
/// Past input validation this cannot fail: research degrades through its
/// fallback chain and always yields a profile.
pub async fn handle_research(
    State(state): State<AppState>,
    Json(request): Json<ResearchRequest>,
) -> Result<Json<CompanyProfile>, AppError> {
    let company_name = request.company_name.trim();
    if company_name.is_empty() {
        return Err(AppError::Validation(
            "companyName cannot be empty".to_string(),
        ));
    }

    let profile = research_company(
        &state.http,
        state.llm.as_ref(),
        state.config.perplexity_api_key.as_deref(),
        company_name,
    )
    .await;

    Ok(Json(profile))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_research_request_is_camel_case() {
        let request: ResearchRequest =
            serde_json::from_value(json!({"companyName": "Acme"})).unwrap();
        assert_eq!(request.company_name, "Acme");
    }
}
