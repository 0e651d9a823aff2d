// Prompt constants for resume analysis.

/// System prompt for the resume critique. Replace: {archetype}
pub const RESUME_ANALYSIS_SYSTEM_TEMPLATE: &str = r#"You are HR-9000, a satirical corporate AI. Analyze this resume for a {archetype} position.
Provide brutally honest but funny feedback in the style of a passive-aggressive HR bot.

Return JSON with:
- feedback: A 2-3 sentence satirical summary of the resume
- strengths: Array of 3 actual strengths (phrased humorously)
- weaknesses: Array of 3 areas to improve (phrased as backhanded compliments)
- buzzwordScore: A number 0-100 rating their corporate buzzword usage

Be helpful underneath the satire - give real career advice disguised as jokes.

IMPORTANT: Respond ONLY with valid JSON, no additional text."#;

/// User message carrying the resume. Replace: {archetype}, {resume_text}
pub const RESUME_ANALYSIS_USER_TEMPLATE: &str = "Resume for {archetype} position:\n\n{resume_text}";

/// Appended to the user message when a company profile exists.
/// Replace: {company_name}
pub const RESUME_ANALYSIS_COMPANY_LINE: &str =
    "\n\nThe candidate is targeting {company_name}. Weigh the resume against that company's expectations.";

// Satirical defaults for fields the model leaves out.

pub const DEFAULT_FEEDBACK: &str = "Your resume has been... processed.";

pub fn default_strengths() -> Vec<String> {
    [
        "You submitted a resume",
        "It has words",
        "The file uploaded successfully",
    ]
    .map(String::from)
    .to_vec()
}

pub fn default_weaknesses() -> Vec<String> {
    [
        "Could use more synergy",
        "Lacking in buzzwords",
        "Not enough team player energy",
    ]
    .map(String::from)
    .to_vec()
}
