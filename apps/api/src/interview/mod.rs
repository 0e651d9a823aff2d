// Interview core: act progression, prompt composition, orchestration,
// verdict generation. All LLM calls go through llm_client; no direct
// provider calls here.

pub mod acts;
pub mod composer;
pub mod handlers;
pub mod orchestrator;
pub mod prompts;
pub mod transcript;
pub mod verdict;

use std::fmt;

use serde::{Deserialize, Serialize};

/// The candidate's chosen interview track. Selected once at session start,
/// immutable for the session. Drives role-specific question guidance and the
/// ATS keyword list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Archetype {
    BTech,
    MBA,
    Analyst,
}

impl Archetype {
    pub fn as_str(&self) -> &'static str {
        match self {
            Archetype::BTech => "BTech",
            Archetype::MBA => "MBA",
            Archetype::Analyst => "Analyst",
        }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_archetype_serde_uses_source_names() {
        assert_eq!(serde_json::to_string(&Archetype::BTech).unwrap(), "\"BTech\"");
        assert_eq!(serde_json::to_string(&Archetype::MBA).unwrap(), "\"MBA\"");
        assert_eq!(
            serde_json::to_string(&Archetype::Analyst).unwrap(),
            "\"Analyst\""
        );
    }

    #[test]
    fn test_unknown_archetype_is_rejected() {
        let result: Result<Archetype, _> = serde_json::from_str("\"Wizard\"");
        assert!(result.is_err(), "unknown archetype must fail deserialization");
    }
}
