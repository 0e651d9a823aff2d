//! ATS scoring: pure-Rust, fast, deterministic, fully testable.
//!
//! A fixed keyword list per archetype, simple case-insensitive substring
//! matching, and weighted section scores. No LLM call: this runs even when
//! the gateway is down and always produces the same result for the same
//! resume.

use serde::{Deserialize, Serialize};

use crate::interview::Archetype;

// Section weights for the overall score. Must sum to 1.0.
const WEIGHT_KEYWORDS: f32 = 0.30;
const WEIGHT_EXPERIENCE: f32 = 0.25;
const WEIGHT_SKILLS: f32 = 0.20;
const WEIGHT_FORMATTING: f32 = 0.15;
const WEIGHT_EDUCATION: f32 = 0.10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtsScore {
    pub overall: u32,
    pub sections: SectionScores,
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub recommendations: Vec<String>,
    pub parsed_sections: ParsedSections,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionScores {
    pub experience: u32,
    pub skills: u32,
    pub keywords: u32,
    pub formatting: u32,
    pub education: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedSections {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub education: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// The screening keyword list for an archetype's target roles.
pub fn keyword_list(archetype: Archetype) -> &'static [&'static str] {
    match archetype {
        Archetype::BTech => &[
            "python",
            "java",
            "javascript",
            "sql",
            "git",
            "api",
            "docker",
            "kubernetes",
            "linux",
            "algorithms",
            "data structures",
            "testing",
            "cloud",
            "system design",
        ],
        Archetype::MBA => &[
            "leadership",
            "strategy",
            "stakeholder",
            "operations",
            "negotiation",
            "market",
            "roadmap",
            "cross-functional",
            "budget",
            "analytics",
            "team management",
            "go-to-market",
        ],
        Archetype::Analyst => &[
            "excel",
            "sql",
            "tableau",
            "power bi",
            "python",
            "statistics",
            "dashboard",
            "forecasting",
            "reporting",
            "visualization",
            "a/b testing",
            "pivot table",
        ],
    }
}

/// Scores a resume against the archetype's keyword list and section
/// heuristics. Deterministic: identical input yields an identical report.
pub fn score_resume(resume_text: &str, archetype: Archetype) -> AtsScore {
    let lowered = resume_text.to_lowercase();
    let keywords = keyword_list(archetype);

    let (matched, missing): (Vec<_>, Vec<_>) = keywords
        .iter()
        .partition(|kw| lowered.contains(&kw.to_lowercase()));
    let matched_keywords: Vec<String> = matched.into_iter().map(|s: &&str| s.to_string()).collect();
    let missing_keywords: Vec<String> = missing.into_iter().map(|s: &&str| s.to_string()).collect();

    let parsed_sections = parse_sections(resume_text);

    let keywords_score = if keywords.is_empty() {
        0
    } else {
        (matched_keywords.len() as f32 / keywords.len() as f32 * 100.0).round() as u32
    };
    let experience_score = experience_score(parsed_sections.experience.as_deref(), &lowered);
    let skills_score = skills_score(parsed_sections.skills.as_deref());
    let education_score = education_score(parsed_sections.education.as_deref(), &lowered);
    let formatting_score = formatting_score(resume_text);

    let overall = (keywords_score as f32 * WEIGHT_KEYWORDS
        + experience_score as f32 * WEIGHT_EXPERIENCE
        + skills_score as f32 * WEIGHT_SKILLS
        + formatting_score as f32 * WEIGHT_FORMATTING
        + education_score as f32 * WEIGHT_EDUCATION)
        .round() as u32;

    let recommendations = build_recommendations(
        &missing_keywords,
        experience_score,
        formatting_score,
        &parsed_sections,
    );

    AtsScore {
        overall: overall.min(100),
        sections: SectionScores {
            experience: experience_score,
            skills: skills_score,
            keywords: keywords_score,
            formatting: formatting_score,
            education: education_score,
        },
        matched_keywords,
        missing_keywords,
        recommendations,
        parsed_sections,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Section parsing
// ────────────────────────────────────────────────────────────────────────────

const EXPERIENCE_HEADERS: &[&str] = &["experience", "work experience", "employment"];
const SKILLS_HEADERS: &[&str] = &["skills", "technical skills", "core competencies"];
const EDUCATION_HEADERS: &[&str] = &["education", "academics"];
const SUMMARY_HEADERS: &[&str] = &["summary", "objective", "profile", "about"];

/// Naive header-based splitter. A line consisting only of a known header
/// (optionally with a trailing colon) opens a section that runs until the
/// next header line.
fn parse_sections(resume_text: &str) -> ParsedSections {
    let mut sections = ParsedSections::default();
    let mut current: Option<&str> = None;
    let mut buffer = String::new();

    let flush = |target: Option<&str>, buffer: &mut String, sections: &mut ParsedSections| {
        if let Some(name) = target {
            let content = buffer.trim().to_string();
            if !content.is_empty() {
                match name {
                    "experience" => sections.experience = Some(content),
                    "skills" => sections.skills = Some(content),
                    "education" => sections.education = Some(content),
                    "summary" => sections.summary = Some(content),
                    _ => {}
                }
            }
        }
        buffer.clear();
    };

    for line in resume_text.lines() {
        let header = line.trim().trim_end_matches(':').to_lowercase();
        let next = if EXPERIENCE_HEADERS.contains(&header.as_str()) {
            Some("experience")
        } else if SKILLS_HEADERS.contains(&header.as_str()) {
            Some("skills")
        } else if EDUCATION_HEADERS.contains(&header.as_str()) {
            Some("education")
        } else if SUMMARY_HEADERS.contains(&header.as_str()) {
            Some("summary")
        } else {
            None
        };

        if let Some(name) = next {
            flush(current, &mut buffer, &mut sections);
            current = Some(name);
        } else if current.is_some() {
            buffer.push_str(line);
            buffer.push('\n');
        }
    }
    flush(current, &mut buffer, &mut sections);

    sections
}

// ────────────────────────────────────────────────────────────────────────────
// Section heuristics
// ────────────────────────────────────────────────────────────────────────────

fn experience_score(section: Option<&str>, lowered_full_text: &str) -> u32 {
    match section {
        Some(content) => {
            let bullet_lines = content
                .lines()
                .filter(|l| {
                    let t = l.trim_start();
                    t.starts_with('-') || t.starts_with('*') || t.starts_with('•')
                })
                .count() as u32;
            let has_metrics = content.chars().any(|c| c.is_ascii_digit());
            (50 + (bullet_lines * 5).min(25) + if has_metrics { 25 } else { 0 }).min(100)
        }
        None if lowered_full_text.contains("experience") => 30,
        None => 15,
    }
}

fn skills_score(section: Option<&str>) -> u32 {
    match section {
        Some(content) => {
            // Comma- or line-separated entries both count
            let entries = content
                .split(|c| c == ',' || c == '\n')
                .filter(|s| !s.trim().is_empty())
                .count() as u32;
            (50 + (entries * 5).min(50)).min(100)
        }
        None => 20,
    }
}

const DEGREE_MARKERS: &[&str] = &["b.tech", "btech", "mba", "bachelor", "master", "phd", "degree"];

fn education_score(section: Option<&str>, lowered_full_text: &str) -> u32 {
    let has_degree = DEGREE_MARKERS.iter().any(|m| lowered_full_text.contains(m));
    match section {
        Some(_) => 80 + if has_degree { 20 } else { 0 },
        None if has_degree => 50,
        None => 25,
    }
}

fn formatting_score(resume_text: &str) -> u32 {
    let words = resume_text.split_whitespace().count();
    let length_ok = (150..=800).contains(&words);
    let has_bullets = resume_text.lines().any(|l| {
        let t = l.trim_start();
        t.starts_with('-') || t.starts_with('*') || t.starts_with('•')
    });
    (if length_ok { 80 } else { 50 }) + if has_bullets { 20 } else { 0 }
}

fn build_recommendations(
    missing_keywords: &[String],
    experience_score: u32,
    formatting_score: u32,
    sections: &ParsedSections,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    if !missing_keywords.is_empty() {
        let top: Vec<&str> = missing_keywords.iter().take(5).map(String::as_str).collect();
        recommendations.push(format!(
            "Add evidence of: {} (keyword filters screen on these first)",
            top.join(", ")
        ));
    }
    if experience_score < 75 {
        recommendations
            .push("Quantify achievements with numbers and use bullet points".to_string());
    }
    if sections.skills.is_none() {
        recommendations.push("Add a dedicated Skills section".to_string());
    }
    if sections.summary.is_none() {
        recommendations.push("Open with a short Summary section".to_string());
    }
    if formatting_score < 80 {
        recommendations
            .push("Keep the resume between roughly 150 and 800 words of plain text".to_string());
    }

    recommendations.truncate(5);
    recommendations
}
