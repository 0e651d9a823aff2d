//! Verdict Generator: the one-shot "Corporate Fit Report" built from the
//! full transcript. Same gateway/fallback shape as the chat path but with no
//! state machine: one call, one report.
//!
//! The score is clamped to 0..=100 whatever the backend returns, and a dead
//! gateway yields a complete fallback report with a pseudo-random mediocre
//! score, so the flow always reaches a verdict.

use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::company::CompanyProfile;
use crate::errors::AppError;
use crate::interview::composer::compose_verdict_prompt;
use crate::interview::prompts::{
    default_improvement_areas, default_interview_tips, default_strengths,
    DEFAULT_CORPORATE_TITLE, DEFAULT_REAL_ADVICE, DEFAULT_VERDICT_TEXT, FALLBACK_VERDICT_TEXT,
};
use crate::interview::transcript::InterviewTurn;
use crate::interview::Archetype;
use crate::llm_client::{call_json, LlmBackend};

const VERDICT_MAX_TOKENS: u32 = 1024;

/// Fallback scores land in this mediocre band.
const FALLBACK_SCORE_MIN: u32 = 30;
const FALLBACK_SCORE_MAX: u32 = 70; // exclusive

/// The final scored report. Created once per completed session, never
/// mutated afterwards, persisted alongside the transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerdictReport {
    pub score: u32,
    pub verdict: String,
    pub corporate_title: String,
    pub strengths: Vec<String>,
    pub areas_for_improvement: Vec<String>,
    pub real_advice: String,
    pub interview_tips: Vec<String>,
}

/// Tolerant parse target for the model's reply. Every field is optional:
/// the report contract demands a usable verdict even from a sloppy model,
/// so absent fields pick up satirical defaults and the score is coerced.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawVerdict {
    #[serde(default)]
    score: Option<Value>,
    #[serde(default)]
    verdict: Option<String>,
    #[serde(default)]
    corporate_title: Option<String>,
    #[serde(default)]
    strengths: Option<Vec<String>>,
    #[serde(default)]
    areas_for_improvement: Option<Vec<String>>,
    #[serde(default)]
    real_advice: Option<String>,
    #[serde(default)]
    interview_tips: Option<Vec<String>>,
}

/// Generates the report. Callers must not invoke this with an empty
/// transcript; that is a validation error, not a generation failure.
pub async fn generate(
    llm: &dyn LlmBackend,
    archetype: Archetype,
    transcript: &[InterviewTurn],
    resume_summary: Option<&str>,
    company: Option<&CompanyProfile>,
) -> Result<VerdictReport, AppError> {
    if transcript.is_empty() {
        return Err(AppError::Validation(
            "transcript cannot be empty".to_string(),
        ));
    }

    let blocks = compose_verdict_prompt(archetype, transcript, resume_summary, company);

    match call_json::<RawVerdict>(llm, &blocks, VERDICT_MAX_TOKENS).await {
        Ok(raw) => Ok(finalize(raw)),
        Err(e) => {
            warn!("Verdict generation failed, issuing fallback report: {e}");
            Ok(fallback_report())
        }
    }
}

/// Fills absent fields with the satirical defaults and clamps the score.
fn finalize(raw: RawVerdict) -> VerdictReport {
    VerdictReport {
        score: coerce_score(raw.score.as_ref()),
        verdict: raw
            .verdict
            .unwrap_or_else(|| DEFAULT_VERDICT_TEXT.to_string()),
        corporate_title: raw
            .corporate_title
            .unwrap_or_else(|| DEFAULT_CORPORATE_TITLE.to_string()),
        strengths: raw.strengths.unwrap_or_else(default_strengths),
        areas_for_improvement: raw
            .areas_for_improvement
            .unwrap_or_else(default_improvement_areas),
        real_advice: raw
            .real_advice
            .unwrap_or_else(|| DEFAULT_REAL_ADVICE.to_string()),
        interview_tips: raw.interview_tips.unwrap_or_else(default_interview_tips),
    }
}

/// Coerces whatever the model put in `score` to 0..=100.
/// Missing or non-numeric values land on a neutral 50.
fn coerce_score(raw: Option<&Value>) -> u32 {
    let numeric = raw.and_then(|v| match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    });
    match numeric {
        Some(n) if n.is_finite() => n.round().clamp(0.0, 100.0) as u32,
        _ => 50,
    }
}

/// The complete fallback report used when the gateway fails outright.
fn fallback_report() -> VerdictReport {
    let score = rand::thread_rng().gen_range(FALLBACK_SCORE_MIN..FALLBACK_SCORE_MAX);
    VerdictReport {
        score,
        verdict: FALLBACK_VERDICT_TEXT.to_string(),
        corporate_title: DEFAULT_CORPORATE_TITLE.to_string(),
        strengths: default_strengths(),
        areas_for_improvement: default_improvement_areas(),
        real_advice: DEFAULT_REAL_ADVICE.to_string(),
        interview_tips: default_interview_tips(),
    }
}
