//! Interview Orchestrator: request-scoped glue around one generation call.
//!
//! Each operation composes a prompt, calls the gateway once, and on any
//! gateway failure recovers with scripted in-character content. The end user
//! never sees a raw generation error from these paths; the interview can
//! always proceed to completion.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::company::CompanyProfile;
use crate::errors::AppError;
use crate::interview::acts::{act_title, should_advance};
use crate::interview::composer::{compose_chat_prompt, compose_greeting_prompt, ChatPromptInputs};
use crate::interview::prompts::{
    fallback_greeting, FALLBACK_ADVANCE_TEMPLATE, FALLBACK_CHAT_POOL, FALLBACK_CLOSING,
};
use crate::interview::transcript::InterviewTurn;
use crate::interview::Archetype;
use crate::llm_client::{call_json, LlmBackend};

const GREETING_MAX_TOKENS: u32 = 300;
const CHAT_MAX_TOKENS: u32 = 512;

/// One structured interviewer reply. Also the exact JSON shape the model is
/// instructed to produce: `response` is required, the advancement flag
/// defaults to false when omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HrReply {
    pub response: String,
    #[serde(default)]
    pub should_advance_act: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub act_title: Option<String>,
}

/// Generates the opening interviewer turn from session metadata alone.
/// Never fails outward: any gateway error degrades to the templated greeting.
pub async fn greeting(
    llm: &dyn LlmBackend,
    archetype: Archetype,
    resume_summary: Option<&str>,
    company: Option<&CompanyProfile>,
) -> String {
    let blocks = compose_greeting_prompt(archetype, resume_summary, company);
    match llm.complete(&blocks, false, GREETING_MAX_TOKENS).await {
        Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
        Ok(_) => fallback_greeting(archetype, company.map(|c| c.name.as_str())),
        Err(e) => {
            warn!("Greeting generation failed, serving templated greeting: {e}");
            fallback_greeting(archetype, company.map(|c| c.name.as_str()))
        }
    }
}

/// One chat turn. On success the structured reply is returned verbatim; the
/// advancement signal is interpreted client-side through the threshold gate.
/// On gateway failure the Fallback Policy takes over. Malformed inputs are
/// rejected by the composer before any external call.
pub async fn chat(
    llm: &dyn LlmBackend,
    inputs: &ChatPromptInputs<'_>,
    transcript: &[InterviewTurn],
) -> Result<HrReply, AppError> {
    let blocks = compose_chat_prompt(inputs, transcript)?;

    match call_json::<HrReply>(llm, &blocks, CHAT_MAX_TOKENS).await {
        Ok(reply) if !reply.response.trim().is_empty() => Ok(reply),
        Ok(_) => {
            warn!("Chat generation returned an empty response field, serving fallback");
            Ok(fallback_reply(inputs.current_act, inputs.exchanges_in_act))
        }
        Err(e) => {
            warn!("Chat generation failed, serving fallback: {e}");
            Ok(fallback_reply(inputs.current_act, inputs.exchanges_in_act))
        }
    }
}

/// The Fallback Policy. The advancement decision reuses the same threshold
/// the gateway path is gated by, so a dead backend never stalls the
/// interview; only the filler text is chosen non-deterministically.
fn fallback_reply(current_act: usize, exchanges_in_act: u32) -> HrReply {
    // With the gateway down there is no model signal; the threshold alone
    // decides, as if the model had asked to advance.
    if should_advance(exchanges_in_act, true) {
        match act_title(current_act + 1) {
            Some(next_title) => HrReply {
                response: FALLBACK_ADVANCE_TEMPLATE.replace("{next_act_title}", next_title),
                should_advance_act: true,
                act_title: Some(next_title.to_string()),
            },
            // Advancing past the final act: closing language, no next title
            None => HrReply {
                response: FALLBACK_CLOSING.to_string(),
                should_advance_act: true,
                act_title: None,
            },
        }
    } else {
        let pick = rand::thread_rng().gen_range(0..FALLBACK_CHAT_POOL.len());
        HrReply {
            response: FALLBACK_CHAT_POOL[pick].to_string(),
            should_advance_act: false,
            act_title: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interview::acts::{ActProgress, ACT_TITLES, ADVANCE_THRESHOLD, LAST_ACT};
    use crate::interview::transcript::Speaker;
    use crate::llm_client::{LlmError, PromptBlock};
    use async_trait::async_trait;

    /// Gateway double that fails every call.
    struct FailingBackend;

    #[async_trait]
    impl LlmBackend for FailingBackend {
        async fn complete(
            &self,
            _blocks: &[PromptBlock],
            _json_mode: bool,
            _max_tokens: u32,
        ) -> Result<String, LlmError> {
            Err(LlmError::EmptyContent)
        }

        fn name(&self) -> &'static str {
            "failing"
        }
    }

    /// Gateway double that replies with a canned string.
    struct CannedBackend(&'static str);

    #[async_trait]
    impl LlmBackend for CannedBackend {
        async fn complete(
            &self,
            _blocks: &[PromptBlock],
            _json_mode: bool,
            _max_tokens: u32,
        ) -> Result<String, LlmError> {
            Ok(self.0.to_string())
        }

        fn name(&self) -> &'static str {
            "canned"
        }
    }

    fn transcript() -> Vec<InterviewTurn> {
        vec![
            InterviewTurn {
                role: Speaker::Hr,
                text: "Welcome. Why are you here?".to_string(),
            },
            InterviewTurn {
                role: Speaker::User,
                text: "Rent.".to_string(),
            },
        ]
    }

    fn inputs(act: usize, exchanges: u32) -> ChatPromptInputs<'static> {
        ChatPromptInputs {
            archetype: Archetype::BTech,
            current_act: act,
            exchanges_in_act: exchanges,
            resume_summary: None,
            company: None,
        }
    }

    #[tokio::test]
    async fn test_greeting_never_fails_and_always_asks_a_question() {
        // Scenario: fresh BTech session, no resume, no company, dead gateway
        let greeting = greeting(&FailingBackend, Archetype::BTech, None, None).await;
        assert!(!greeting.is_empty());
        assert!(greeting.contains('?'));
        assert!(greeting.contains("BTech"));
    }

    #[tokio::test]
    async fn test_greeting_passes_model_text_through_on_success() {
        let backend = CannedBackend("Initializing... So, why you?");
        let greeting = greeting(&backend, Archetype::MBA, None, None).await;
        assert_eq!(greeting, "Initializing... So, why you?");
    }

    #[tokio::test]
    async fn test_chat_returns_structured_reply_verbatim() {
        let backend = CannedBackend(
            r#"{"response":"Fascinating. What else?","shouldAdvanceAct":false}"#,
        );
        let reply = chat(&backend, &inputs(0, 1), &transcript()).await.unwrap();
        assert_eq!(reply.response, "Fascinating. What else?");
        assert!(!reply.should_advance_act);
        assert!(reply.act_title.is_none());
    }

    #[tokio::test]
    async fn test_chat_with_act_title_passes_through() {
        let backend = CannedBackend(
            r#"{"response":"Onward! Ready?","shouldAdvanceAct":true,"actTitle":"ACT II: BEHAVIORAL DEEP DIVE"}"#,
        );
        let reply = chat(&backend, &inputs(0, 2), &transcript()).await.unwrap();
        assert!(reply.should_advance_act);
        assert_eq!(reply.act_title.as_deref(), Some("ACT II: BEHAVIORAL DEEP DIVE"));
    }

    #[tokio::test]
    async fn test_unparseable_reply_falls_back() {
        let backend = CannedBackend("I refuse to emit JSON today.");
        let reply = chat(&backend, &inputs(0, 0), &transcript()).await.unwrap();
        assert!(!reply.response.is_empty());
        assert!(!reply.should_advance_act);
    }

    #[tokio::test]
    async fn test_missing_response_field_counts_as_failure() {
        let backend = CannedBackend(r#"{"shouldAdvanceAct":true}"#);
        let reply = chat(&backend, &inputs(0, 0), &transcript()).await.unwrap();
        // Fallback path: below threshold, so the bogus advance flag is gone
        assert!(!reply.should_advance_act);
        assert!(!reply.response.is_empty());
    }

    #[tokio::test]
    async fn test_fallback_never_advances_below_threshold() {
        for archetype in [Archetype::BTech, Archetype::MBA, Archetype::Analyst] {
            for exchanges in 0..ADVANCE_THRESHOLD {
                let mut i = inputs(0, exchanges);
                i.archetype = archetype;
                let reply = chat(&FailingBackend, &i, &transcript()).await.unwrap();
                assert!(
                    !reply.should_advance_act,
                    "fallback advanced at {exchanges} exchanges"
                );
            }
        }
    }

    #[tokio::test]
    async fn test_fallback_advances_deterministically_at_threshold() {
        for act in 0..LAST_ACT {
            let reply = chat(&FailingBackend, &inputs(act, 2), &transcript())
                .await
                .unwrap();
            assert!(reply.should_advance_act);
            assert_eq!(reply.act_title.as_deref(), Some(ACT_TITLES[act + 1]));
            assert!(reply.response.contains(ACT_TITLES[act + 1]));
        }
    }

    #[tokio::test]
    async fn test_fallback_past_final_act_closes_without_next_title() {
        let reply = chat(&FailingBackend, &inputs(LAST_ACT, 2), &transcript())
            .await
            .unwrap();
        assert!(reply.should_advance_act);
        assert!(reply.act_title.is_none());
        assert!(reply.response.contains("verdict"));
    }

    #[tokio::test]
    async fn test_chat_rejects_empty_history_without_calling_gateway() {
        let err = chat(&FailingBackend, &inputs(0, 0), &[]).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    /// Full failure scenario: the gateway is down for the whole interview.
    /// Five acts at two exchanges each must reach completion in exactly ten
    /// chat calls.
    #[tokio::test]
    async fn test_interview_completes_in_ten_calls_with_dead_gateway() {
        let mut progress = ActProgress::new();
        let mut history = vec![InterviewTurn {
            role: Speaker::Hr,
            text: greeting(&FailingBackend, Archetype::Analyst, None, None).await,
        }];

        let mut calls = 0;
        while !progress.is_complete() {
            assert!(calls < 20, "interview failed to terminate");
            history.push(InterviewTurn {
                role: Speaker::User,
                text: format!("Answer number {calls}."),
            });
            let (act, exchanges) = progress.record_candidate_message();
            let reply = chat(
                &FailingBackend,
                &inputs(act, exchanges),
                &history,
            )
            .await
            .unwrap();
            calls += 1;
            history.push(InterviewTurn {
                role: Speaker::Hr,
                text: reply.response.clone(),
            });
            progress.apply_advance_signal(reply.should_advance_act);
        }

        assert_eq!(calls, 10);
        assert!(progress.is_complete());
    }

    #[test]
    fn test_hr_reply_wire_shape_is_camel_case() {
        let reply = HrReply {
            response: "Noted. Next?".to_string(),
            should_advance_act: true,
            act_title: Some("ACT II: BEHAVIORAL DEEP DIVE".to_string()),
        };
        let json = serde_json::to_value(&reply).unwrap();
        assert_eq!(json["shouldAdvanceAct"], true);
        assert_eq!(json["actTitle"], "ACT II: BEHAVIORAL DEEP DIVE");
        assert!(json.get("should_advance_act").is_none());
    }
}
