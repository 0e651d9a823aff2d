//! Resume critique: one gateway call returning the HR-9000 take on a
//! resume. Unlike the interview paths, a gateway failure here surfaces as an
//! error response; the always-proceed guarantee covers the interview flow
//! only.

use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::company::CompanyProfile;
use crate::errors::AppError;
use crate::interview::Archetype;
use crate::llm_client::{call_json, LlmBackend, PromptBlock};
use crate::resume::prompts::{
    default_strengths, default_weaknesses, DEFAULT_FEEDBACK, RESUME_ANALYSIS_COMPANY_LINE,
    RESUME_ANALYSIS_SYSTEM_TEMPLATE, RESUME_ANALYSIS_USER_TEMPLATE,
};

const ANALYSIS_MAX_TOKENS: u32 = 1024;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeAnalysis {
    pub feedback: String,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub buzzword_score: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAnalysis {
    #[serde(default)]
    feedback: Option<String>,
    #[serde(default)]
    strengths: Option<Vec<String>>,
    #[serde(default)]
    weaknesses: Option<Vec<String>>,
    #[serde(default)]
    buzzword_score: Option<Value>,
}

/// Runs the critique. The caller has already validated the resume text.
pub async fn analyze(
    llm: &dyn LlmBackend,
    resume_text: &str,
    archetype: Archetype,
    company: Option<&CompanyProfile>,
) -> Result<ResumeAnalysis, AppError> {
    let system = RESUME_ANALYSIS_SYSTEM_TEMPLATE.replace("{archetype}", archetype.as_str());
    let mut user = RESUME_ANALYSIS_USER_TEMPLATE
        .replace("{archetype}", archetype.as_str())
        .replace("{resume_text}", resume_text);
    if let Some(profile) = company {
        user.push_str(&RESUME_ANALYSIS_COMPANY_LINE.replace("{company_name}", &profile.name));
    }

    let blocks = vec![PromptBlock::system(system), PromptBlock::user(user)];
    let raw: RawAnalysis = call_json(llm, &blocks, ANALYSIS_MAX_TOKENS)
        .await
        .map_err(|e| AppError::Llm(format!("Resume analysis failed: {e}")))?;

    Ok(finalize(raw))
}

fn finalize(raw: RawAnalysis) -> ResumeAnalysis {
    ResumeAnalysis {
        feedback: raw.feedback.unwrap_or_else(|| DEFAULT_FEEDBACK.to_string()),
        strengths: raw.strengths.unwrap_or_else(default_strengths),
        weaknesses: raw.weaknesses.unwrap_or_else(default_weaknesses),
        buzzword_score: coerce_buzzword_score(raw.buzzword_score.as_ref()),
    }
}

/// Coerces the buzzword score to 0..=100; a missing or non-numeric value
/// gets a random mediocre rating, which is about what it deserves.
fn coerce_buzzword_score(raw: Option<&Value>) -> u32 {
    let numeric = raw.and_then(|v| match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    });
    match numeric {
        Some(n) if n.is_finite() => n.round().clamp(0.0, 100.0) as u32,
        _ => rand::thread_rng().gen_range(30..70),
    }
}
