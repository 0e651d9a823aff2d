//! Company research: one external search call with layered fallbacks.
//!
//! Order of preference: Perplexity online search (real-time, with citations),
//! then the regular generation backend's knowledge base, then a static
//! profile in the same JSON shape. The operation never errors outward.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::company::prompts::{
    KNOWLEDGE_SYSTEM_TEMPLATE, KNOWLEDGE_USER_TEMPLATE, RESEARCH_SYSTEM_TEMPLATE,
    RESEARCH_USER_TEMPLATE,
};
use crate::llm_client::{call_json, strip_json_fences, LlmBackend, LlmError, PromptBlock};

const PERPLEXITY_API_URL: &str = "https://api.perplexity.ai/chat/completions";
const PERPLEXITY_MODEL: &str = "llama-3.1-sonar-small-128k-online";
const PERPLEXITY_MAX_TOKENS: u32 = 4096;
const KNOWLEDGE_MAX_TOKENS: u32 = 2048;

/// Structured research result handed to the interview flow. Set at most once
/// before the interview starts, immutable thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyProfile {
    pub name: String,
    pub industry: String,
    pub overview: String,
    pub history: String,
    pub financial_situation: String,
    pub future_plans: String,
    pub culture: String,
    pub interview_style: String,
    pub typical_questions: Vec<String>,
    pub values: Vec<String>,
    pub recent_news: String,
    pub sources: Vec<String>,
}

/// Tolerant parse target: research backends routinely omit fields, and every
/// omission has a serviceable default.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProfile {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    industry: Option<String>,
    #[serde(default)]
    overview: Option<String>,
    #[serde(default)]
    history: Option<String>,
    #[serde(default)]
    financial_situation: Option<String>,
    #[serde(default)]
    future_plans: Option<String>,
    #[serde(default)]
    culture: Option<String>,
    #[serde(default)]
    interview_style: Option<String>,
    #[serde(default)]
    typical_questions: Option<Vec<String>>,
    #[serde(default)]
    values: Option<Vec<String>>,
    #[serde(default)]
    recent_news: Option<String>,
}

/// Researches a company. Tries Perplexity, then the generation backend's
/// knowledge base, then the static profile. Always returns a profile.
pub async fn research_company(
    http: &reqwest::Client,
    llm: &dyn LlmBackend,
    perplexity_api_key: Option<&str>,
    company_name: &str,
) -> CompanyProfile {
    if let Some(api_key) = perplexity_api_key {
        match query_perplexity(http, api_key, company_name).await {
            Ok((content, citations)) => {
                match serde_json::from_str::<RawProfile>(strip_json_fences(&content)) {
                    Ok(raw) => return finalize(raw, company_name, citations),
                    Err(e) => warn!("Perplexity research returned unparseable JSON: {e}"),
                }
            }
            Err(e) => warn!("Perplexity research failed: {e}"),
        }
    }

    match knowledge_base_profile(llm, company_name).await {
        Ok(profile) => profile,
        Err(e) => {
            warn!("Knowledge-base research failed, using static profile: {e}");
            fallback_profile(company_name)
        }
    }
}

/// Knowledge-base research through the regular generation backend.
/// Sources note the cutoff limitation instead of citing live pages.
async fn knowledge_base_profile(
    llm: &dyn LlmBackend,
    company_name: &str,
) -> Result<CompanyProfile, LlmError> {
    let blocks = vec![
        PromptBlock::system(KNOWLEDGE_SYSTEM_TEMPLATE.replace("{company_name}", company_name)),
        PromptBlock::user(KNOWLEDGE_USER_TEMPLATE.replace("{company_name}", company_name)),
    ];
    let raw: RawProfile = call_json(llm, &blocks, KNOWLEDGE_MAX_TOKENS).await?;
    Ok(finalize(
        raw,
        company_name,
        vec!["Knowledge base (may not reflect latest information)".to_string()],
    ))
}

/// Fills omitted fields with serviceable defaults.
fn finalize(raw: RawProfile, company_name: &str, sources: Vec<String>) -> CompanyProfile {
    CompanyProfile {
        name: raw.name.unwrap_or_else(|| company_name.to_string()),
        industry: raw.industry.unwrap_or_else(|| "Unknown".to_string()),
        overview: raw
            .overview
            .unwrap_or_else(|| "Company information not available".to_string()),
        history: raw
            .history
            .unwrap_or_else(|| "Historical information not available".to_string()),
        financial_situation: raw
            .financial_situation
            .unwrap_or_else(|| "Financial information not available".to_string()),
        future_plans: raw
            .future_plans
            .unwrap_or_else(|| "Future plans not available".to_string()),
        culture: raw
            .culture
            .unwrap_or_else(|| "Culture information not available".to_string()),
        interview_style: raw
            .interview_style
            .unwrap_or_else(|| "Standard multi-round interview process expected".to_string()),
        typical_questions: raw.typical_questions.unwrap_or_else(default_questions),
        values: raw.values.unwrap_or_else(default_values),
        recent_news: raw
            .recent_news
            .unwrap_or_else(|| "No recent news available".to_string()),
        sources,
    }
}

/// Static last-resort profile in the same shape the search path produces.
pub fn fallback_profile(company_name: &str) -> CompanyProfile {
    CompanyProfile {
        name: company_name.to_string(),
        industry: "Unknown".to_string(),
        overview: format!(
            "Research for {company_name} is currently unavailable. Please proceed with general interview preparation."
        ),
        history: "Historical information could not be retrieved".to_string(),
        financial_situation: "Financial information could not be retrieved".to_string(),
        future_plans: "Strategic plans information could not be retrieved".to_string(),
        culture: "Culture information could not be retrieved".to_string(),
        interview_style: "Standard multi-round interview process expected".to_string(),
        typical_questions: default_questions(),
        values: default_values(),
        recent_news: "Unable to retrieve recent news".to_string(),
        sources: vec![],
    }
}

fn default_questions() -> Vec<String> {
    [
        "Tell me about yourself and your background",
        "Why are you interested in this role?",
        "Describe a challenging project you worked on",
        "How do you handle working under pressure?",
        "What questions do you have for us?",
    ]
    .map(String::from)
    .to_vec()
}

fn default_values() -> Vec<String> {
    ["Excellence", "Innovation", "Collaboration"]
        .map(String::from)
        .to_vec()
}

// ────────────────────────────────────────────────────────────────────────────
// Perplexity wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct PerplexityRequest<'a> {
    model: &'a str,
    messages: Vec<PerplexityMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
    return_images: bool,
    return_related_questions: bool,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct PerplexityMessage<'a> {
    role: &'a str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct PerplexityResponse {
    choices: Vec<PerplexityChoice>,
    #[serde(default)]
    citations: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct PerplexityChoice {
    message: PerplexityChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct PerplexityChoiceMessage {
    content: Option<String>,
}

/// One online search call. Returns the raw content plus citation URLs.
async fn query_perplexity(
    http: &reqwest::Client,
    api_key: &str,
    company_name: &str,
) -> Result<(String, Vec<String>), LlmError> {
    let request_body = PerplexityRequest {
        model: PERPLEXITY_MODEL,
        messages: vec![
            PerplexityMessage {
                role: "system",
                content: RESEARCH_SYSTEM_TEMPLATE.replace("{company_name}", company_name),
            },
            PerplexityMessage {
                role: "user",
                content: RESEARCH_USER_TEMPLATE.replace("{company_name}", company_name),
            },
        ],
        max_tokens: PERPLEXITY_MAX_TOKENS,
        temperature: 0.2,
        top_p: 0.9,
        return_images: false,
        return_related_questions: false,
        stream: false,
    };

    let response = http
        .post(PERPLEXITY_API_URL)
        .bearer_auth(api_key)
        .json(&request_body)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(LlmError::Api {
            status: status.as_u16(),
            message,
        });
    }

    let parsed: PerplexityResponse = response.json().await?;
    let content = parsed
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .unwrap_or_default();

    if content.trim().is_empty() {
        return Err(LlmError::EmptyContent);
    }

    Ok((content, parsed.citations))
}
