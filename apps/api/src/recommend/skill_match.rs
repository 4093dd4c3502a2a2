//! Skill compatibility between a user's comma-separated skills and a
//! career's technology-skill text.
//!
//! `missing()` only looks at the first ten career terms (`top_terms`), so a
//! career with more than ten terms never reports the rest as missing.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// How many career terms are surfaced as "required skills".
pub const TOP_TERMS: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillMatch {
    /// First ten distinct career terms, in first-seen order.
    pub top_terms: Vec<String>,
    /// floor(100 × matched / distinct career terms); 0 when the career lists none.
    pub match_percent: u32,
    /// User skills found among the career terms, in career-term order.
    pub matched: Vec<String>,
}

impl SkillMatch {
    /// `top_terms` minus `matched`, in `top_terms` order.
    pub fn missing(&self) -> Vec<String> {
        self.top_terms
            .iter()
            .filter(|t| !self.matched.contains(*t))
            .cloned()
            .collect()
    }
}

/// Splits on commas, trims, lower-cases and drops empties. Duplicates collapse.
pub fn parse_user_skills(user_skills_csv: &str) -> HashSet<String> {
    user_skills_csv
        .split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Splits on runs of commas/whitespace, lower-cases and de-duplicates, keeping first-seen order.
pub fn career_terms(tech_skills_text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    tech_skills_text
        .to_lowercase()
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .filter(|t| seen.insert(t.to_string()))
        .map(String::from)
        .collect()
}

pub fn skill_match(user_skills_csv: &str, tech_skills_text: &str) -> SkillMatch {
    let user = parse_user_skills(user_skills_csv);
    let terms = career_terms(tech_skills_text);

    let matched: Vec<String> = terms.iter().filter(|t| user.contains(*t)).cloned().collect();

    let match_percent = if terms.is_empty() {
        0
    } else {
        (matched.len() * 100 / terms.len()) as u32
    };

    SkillMatch {
        top_terms: terms.into_iter().take(TOP_TERMS).collect(),
        match_percent,
        matched,
    }
}
