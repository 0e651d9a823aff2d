//! Prompt Composer: deterministically builds the role-tagged blocks sent to
//! the generation gateway from the client-supplied interview state.
//!
//! Pure functions of their inputs: composing twice from identical state
//! yields identical blocks. Validation happens here, before any external
//! call is made.

use crate::company::CompanyProfile;
use crate::errors::AppError;
use crate::interview::acts::{act_title, ACT_COUNT};
use crate::interview::prompts;
use crate::interview::transcript::{render_transcript, InterviewTurn, Speaker};
use crate::interview::Archetype;
use crate::llm_client::PromptBlock;

/// Resume summaries are truncated to bound payload size.
pub const MAX_RESUME_SUMMARY_CHARS: usize = 2000;

/// Everything the composer needs besides the transcript itself.
#[derive(Debug, Clone, Copy)]
pub struct ChatPromptInputs<'a> {
    pub archetype: Archetype,
    pub current_act: usize,
    pub exchanges_in_act: u32,
    pub resume_summary: Option<&'a str>,
    pub company: Option<&'a CompanyProfile>,
}

/// Builds the chat prompt: persona contract, act context, then the transcript
/// mapped onto wire roles (interviewer turns as assistant, candidate turns as
/// user). The latest candidate message is expected to already be the last
/// transcript entry.
pub fn compose_chat_prompt(
    inputs: &ChatPromptInputs<'_>,
    transcript: &[InterviewTurn],
) -> Result<Vec<PromptBlock>, AppError> {
    let act_title = act_title(inputs.current_act).ok_or_else(|| {
        AppError::Validation(format!(
            "currentAct must be 0..{}, got {}",
            ACT_COUNT - 1,
            inputs.current_act
        ))
    })?;

    if transcript.is_empty() {
        return Err(AppError::Validation(
            "conversationHistory cannot be empty".to_string(),
        ));
    }

    let mut blocks = vec![
        PromptBlock::system(prompts::HR9000_SYSTEM_PROMPT),
        PromptBlock::system(chat_context(inputs, act_title)),
    ];

    for turn in transcript {
        blocks.push(match turn.role {
            Speaker::Hr => PromptBlock::assistant(turn.text.as_str()),
            Speaker::User => PromptBlock::user(turn.text.as_str()),
        });
    }

    Ok(blocks)
}

/// Fills the chat context template with the current state.
fn chat_context(inputs: &ChatPromptInputs<'_>, act_title: &str) -> String {
    let resume_line = match inputs.resume_summary {
        Some(summary) => format!(
            "- Resume summary: {}\n",
            truncate_to_chars(summary, MAX_RESUME_SUMMARY_CHARS)
        ),
        None => String::new(),
    };

    let company_block = inputs
        .company
        .map(prompts::company_block)
        .unwrap_or_default();

    // Dramatic announcement only on the first exchange of a later act
    let act_announcement = if inputs.exchanges_in_act == 0 && inputs.current_act > 0 {
        prompts::NEW_ACT_ANNOUNCEMENT
    } else {
        ""
    };

    let advance_ready = inputs.exchanges_in_act >= crate::interview::acts::ADVANCE_THRESHOLD;
    let advance_value = if advance_ready {
        "true (you should advance now)"
    } else {
        "false (not yet)"
    };

    prompts::CHAT_CONTEXT_TEMPLATE
        .replace("{archetype}", inputs.archetype.as_str())
        .replace("{role_context}", prompts::role_context(inputs.archetype))
        .replace("{act_title}", act_title)
        .replace("{act_number}", &(inputs.current_act + 1).to_string())
        .replace("{exchanges}", &inputs.exchanges_in_act.to_string())
        .replace("{resume_line}", &resume_line)
        .replace("{company_block}", &company_block)
        .replace("{act_announcement}", act_announcement)
        .replace("{advance_hint}", &prompts::advance_hint(inputs.exchanges_in_act))
        .replace("{advance_value}", advance_value)
}

/// Builds the greeting prompt. No transcript exists yet; the first
/// interviewer turn is generated from session metadata alone.
pub fn compose_greeting_prompt(
    archetype: Archetype,
    resume_summary: Option<&str>,
    company: Option<&CompanyProfile>,
) -> Vec<PromptBlock> {
    let system = prompts::GREETING_SYSTEM_TEMPLATE.replace("{archetype}", archetype.as_str());

    let mut user = match resume_summary {
        Some(summary) => prompts::GREETING_USER_WITH_RESUME.replace(
            "{resume_summary}",
            truncate_to_chars(summary, MAX_RESUME_SUMMARY_CHARS),
        ),
        None => prompts::GREETING_USER_NO_RESUME.to_string(),
    };
    if let Some(profile) = company {
        user.push_str(&prompts::GREETING_COMPANY_LINE.replace("{company_name}", &profile.name));
    }

    vec![PromptBlock::system(system), PromptBlock::user(user)]
}

/// Builds the verdict prompt from the full transcript serialized as
/// speaker-tagged lines.
pub fn compose_verdict_prompt(
    archetype: Archetype,
    transcript: &[InterviewTurn],
    resume_summary: Option<&str>,
    company: Option<&CompanyProfile>,
) -> Vec<PromptBlock> {
    let resume_summary = resume_summary
        .map(|s| truncate_to_chars(s, MAX_RESUME_SUMMARY_CHARS))
        .unwrap_or("No resume provided");

    let company_line = company
        .map(|profile| format!("\nTarget company: {}", profile.name))
        .unwrap_or_default();

    let user = prompts::VERDICT_USER_TEMPLATE
        .replace("{archetype}", archetype.as_str())
        .replace("{resume_summary}", resume_summary)
        .replace("{company_line}", &company_line)
        .replace("{transcript}", &render_transcript(transcript));

    vec![PromptBlock::system(prompts::VERDICT_SYSTEM), PromptBlock::user(user)]
}

/// Char-boundary-safe prefix truncation.
fn truncate_to_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::company::research::fallback_profile;

    fn turns() -> Vec<InterviewTurn> {
        vec![
            InterviewTurn {
                role: Speaker::Hr,
                text: "Welcome. Why are you here?".to_string(),
            },
            InterviewTurn {
                role: Speaker::User,
                text: "I need a job.".to_string(),
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

    fn joined(blocks: &[PromptBlock]) -> String {
        blocks
            .iter()
            .map(|b| b.content.as_str())
            .collect::<Vec<_>>()
            .join("\n---\n")
    }

    #[test]
    fn test_composition_is_idempotent() {
        let transcript = turns();
        let first = compose_chat_prompt(&inputs(1, 1), &transcript).unwrap();
        let second = compose_chat_prompt(&inputs(1, 1), &transcript).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_history_is_rejected_before_any_call() {
        let err = compose_chat_prompt(&inputs(0, 0), &[]).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_act_out_of_range_is_rejected() {
        let err = compose_chat_prompt(&inputs(5, 0), &turns()).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_transcript_maps_onto_wire_roles() {
        let blocks = compose_chat_prompt(&inputs(0, 1), &turns()).unwrap();
        // system persona + system context + two transcript turns
        assert_eq!(blocks.len(), 4);
        assert_eq!(blocks[2].role, crate::llm_client::Role::Assistant);
        assert_eq!(blocks[3].role, crate::llm_client::Role::User);
        assert_eq!(blocks[3].content, "I need a job.");
    }

    #[test]
    fn test_chat_context_names_act_and_archetype() {
        let blocks = compose_chat_prompt(&inputs(2, 1), &turns()).unwrap();
        let context = &blocks[1].content;
        assert!(context.contains("ACT III: CHAOS MODE"));
        assert!(context.contains("(Act 3 of 5)"));
        assert!(context.contains("Role: BTech"));
    }

    #[test]
    fn test_advance_hint_flips_at_threshold() {
        let below = joined(&compose_chat_prompt(&inputs(0, 1), &turns()).unwrap());
        assert!(below.contains("Ask another question before advancing"));
        assert!(below.contains("shouldAdvanceAct: false (not yet)"));

        let at = joined(&compose_chat_prompt(&inputs(0, 2), &turns()).unwrap());
        assert!(at.contains("time to advance"));
        assert!(at.contains("shouldAdvanceAct: true (you should advance now)"));
    }

    #[test]
    fn test_new_act_announcement_only_on_fresh_later_acts() {
        let fresh_later = joined(&compose_chat_prompt(&inputs(3, 0), &turns()).unwrap());
        assert!(fresh_later.contains("Announce it dramatically"));

        let first_act = joined(&compose_chat_prompt(&inputs(0, 0), &turns()).unwrap());
        assert!(!first_act.contains("Announce it dramatically"));

        let mid_act = joined(&compose_chat_prompt(&inputs(3, 1), &turns()).unwrap());
        assert!(!mid_act.contains("Announce it dramatically"));
    }

    #[test]
    fn test_company_profile_name_appears_in_prompt() {
        let profile = fallback_profile("Acme");
        let mut with_company = inputs(0, 1);
        with_company.company = Some(&profile);
        let prompt = joined(&compose_chat_prompt(&with_company, &turns()).unwrap());
        assert!(prompt.contains("Acme"));
    }

    #[test]
    fn test_resume_summary_is_truncated() {
        let long = "x".repeat(MAX_RESUME_SUMMARY_CHARS + 500);
        let mut with_resume = inputs(0, 1);
        with_resume.resume_summary = Some(&long);
        let prompt = joined(&compose_chat_prompt(&with_resume, &turns()).unwrap());
        assert!(prompt.contains(&"x".repeat(MAX_RESUME_SUMMARY_CHARS)));
        assert!(!prompt.contains(&"x".repeat(MAX_RESUME_SUMMARY_CHARS + 1)));
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        let summary = "é".repeat(MAX_RESUME_SUMMARY_CHARS + 10);
        let truncated = truncate_to_chars(&summary, MAX_RESUME_SUMMARY_CHARS);
        assert_eq!(truncated.chars().count(), MAX_RESUME_SUMMARY_CHARS);
    }

    #[test]
    fn test_greeting_prompt_mentions_resume_when_present() {
        let blocks = compose_greeting_prompt(Archetype::Analyst, Some("Spreadsheet wizard"), None);
        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].content.contains("Analyst"));
        assert!(blocks[1].content.contains("Spreadsheet wizard"));

        let without = compose_greeting_prompt(Archetype::Analyst, None, None);
        assert!(without[1].content.contains("didn't submit a resume"));
    }

    #[test]
    fn test_greeting_prompt_names_company_when_present() {
        let profile = fallback_profile("Acme");
        let blocks = compose_greeting_prompt(Archetype::MBA, None, Some(&profile));
        assert!(blocks[1].content.contains("Acme"));
    }

    #[test]
    fn test_verdict_prompt_contains_tagged_transcript() {
        let blocks = compose_verdict_prompt(Archetype::BTech, &turns(), None, None);
        let user = &blocks[1].content;
        assert!(user.contains("HR: Welcome. Why are you here?"));
        assert!(user.contains("USER: I need a job."));
        assert!(user.contains("No resume provided"));
    }
}
