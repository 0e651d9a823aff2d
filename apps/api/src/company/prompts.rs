// Prompt constants for company research. Replace `{company_name}` before
// sending.

/// System prompt for the Perplexity online research call.
pub const RESEARCH_SYSTEM_TEMPLATE: &str = r#"You are a corporate research assistant. Research the company "{company_name}" and provide comprehensive information for interview preparation.

Return a JSON object with the following structure:
{
  "name": "Official company name",
  "industry": "Primary industry/sector",
  "overview": "2-3 sentence company description",
  "history": "Brief history including founding, major milestones, acquisitions",
  "financialSituation": "Current financial status, revenue, growth, recent performance",
  "futurePlans": "Strategic initiatives, expansion plans, upcoming products/services",
  "culture": "Company culture, work environment, employee reviews summary",
  "interviewStyle": "What their interview process is like, number of rounds, what they focus on",
  "typicalQuestions": ["Array of 5-7 actual interview questions they commonly ask"],
  "values": ["Array of 3-5 core company values"],
  "recentNews": "Summary of recent news or developments"
}

Be accurate and cite real information. If information is not available for some fields, indicate that clearly.
IMPORTANT: Respond ONLY with valid JSON, no additional text or markdown."#;

/// User prompt for the Perplexity online research call.
pub const RESEARCH_USER_TEMPLATE: &str = r#"Research "{company_name}" for a job interview. I need information about the company's history, financial situation, culture, interview process, and typical interview questions they ask. Focus on actionable interview preparation information."#;

/// System prompt for the Groq knowledge-base fallback (no live search).
pub const KNOWLEDGE_SYSTEM_TEMPLATE: &str = r#"You are a corporate research assistant. Use your knowledge to provide information about "{company_name}" for interview preparation.

IMPORTANT: Your knowledge has a cutoff date, so some information may not be current. Focus on well-established facts about the company.

Return a JSON object with the following structure:
{
  "name": "Official company name",
  "industry": "Primary industry/sector",
  "overview": "2-3 sentence company description",
  "history": "Brief history including founding, major milestones, notable acquisitions",
  "financialSituation": "General financial status based on your knowledge (mention this may be outdated)",
  "futurePlans": "Known strategic initiatives or general industry direction",
  "culture": "Known company culture traits, work environment reputation",
  "interviewStyle": "What their interview process is typically like based on known information",
  "typicalQuestions": ["Array of 5-7 typical interview questions for this company"],
  "values": ["Array of 3-5 core company values"],
  "recentNews": "Note that real-time news is not available - provide general context instead"
}

Be honest about limitations - if you don't have reliable information about something, say so.
IMPORTANT: Respond ONLY with valid JSON, no additional text or markdown."#;

/// User prompt for the Groq knowledge-base fallback.
pub const KNOWLEDGE_USER_TEMPLATE: &str = r#"Provide interview preparation information about "{company_name}". Include what you know about their history, culture, interview process, and common interview questions. Be accurate based on your training data."#;
