// Company research: Perplexity online search with a Groq knowledge-base
// fallback and a static last-resort profile. Research never fails outward;
// the interview proceeds with whatever profile quality we could get.

pub mod handlers;
pub mod prompts;
pub mod research;

pub use research::CompanyProfile;
