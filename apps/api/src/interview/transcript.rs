//! Transcript types: the append-only conversation record the client carries
//! between requests and eventually persists.

use serde::{Deserialize, Serialize};

/// Who produced a turn. Serialized as `"hr"` / `"user"` on the wire and in
/// the `transcript` jsonb column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    Hr,
    User,
}

impl Speaker {
    /// Uppercase label used when serializing a transcript into prompt text.
    pub fn label(&self) -> &'static str {
        match self {
            Speaker::Hr => "HR",
            Speaker::User => "USER",
        }
    }
}

/// One turn of the interview. The ordered sequence of turns forms the
/// transcript; it is never reordered or rewritten, only appended to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewTurn {
    pub role: Speaker,
    pub text: String,
}

/// Serializes a transcript as alternating speaker-tagged lines for the
/// verdict prompt.
pub fn render_transcript(turns: &[InterviewTurn]) -> String {
    turns
        .iter()
        .map(|t| format!("{}: {}", t.role.label(), t.text))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speaker_wire_names() {
        assert_eq!(serde_json::to_string(&Speaker::Hr).unwrap(), "\"hr\"");
        assert_eq!(serde_json::to_string(&Speaker::User).unwrap(), "\"user\"");
    }

    #[test]
    fn test_turn_round_trips() {
        let json = r#"{"role":"hr","text":"Why are you here?"}"#;
        let turn: InterviewTurn = serde_json::from_str(json).unwrap();
        assert_eq!(turn.role, Speaker::Hr);
        assert_eq!(serde_json::to_string(&turn).unwrap(), json);
    }

    #[test]
    fn test_render_transcript_tags_speakers() {
        let turns = vec![
            InterviewTurn {
                role: Speaker::Hr,
                text: "State your purpose.".to_string(),
            },
            InterviewTurn {
                role: Speaker::User,
                text: "Gainful employment.".to_string(),
            },
        ];
        assert_eq!(
            render_transcript(&turns),
            "HR: State your purpose.\nUSER: Gainful employment."
        );
    }

    #[test]
    fn test_render_empty_transcript_is_empty() {
        assert_eq!(render_transcript(&[]), "");
    }
}
