use serde::{Deserialize, Serialize};

/// One catalog row. Immutable once the catalog is loaded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CareerRecord {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Stream")]
    pub stream: String,
    #[serde(rename = "Skills")]
    pub skills: String,
    #[serde(rename = "Technology Skills")]
    pub technology_skills: String,
    /// Raw education tier as found in the source data ("6", "7.0", "n/a", ...).
    #[serde(rename = "Education")]
    pub education: String,
}

impl CareerRecord {
    /// Canonical stream used for filtering: upper-cased, trimmed.
    pub fn stream_key(&self) -> String {
        canonical_stream(&self.stream)
    }

    /// The text indexed for similarity search.
    pub fn combined_text(&self) -> String {
        format!(
            "{} {} {} {}",
            self.title, self.description, self.skills, self.technology_skills
        )
    }

    pub fn education_path(&self) -> EducationPath {
        EducationPath::from_tier(&self.education)
    }
}

pub fn canonical_stream(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Education requirement shown next to a recommended career.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EducationPath {
    Bachelors,
    Masters,
    Advanced,
    DomainStandard,
}

impl EducationPath {
    /// Tier 6 → bachelor's, 7 → master's, any other number → advanced.
    /// Anything that is not a number falls back to domain standards.
    pub fn from_tier(raw: &str) -> Self {
        match parse_tier(raw) {
            Some(6) => EducationPath::Bachelors,
            Some(7) => EducationPath::Masters,
            Some(_) => EducationPath::Advanced,
            None => EducationPath::DomainStandard,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EducationPath::Bachelors => "Bachelor's Degree Required",
            EducationPath::Masters => "Master's Degree Required",
            EducationPath::Advanced => "Advanced Degree Recommended",
            EducationPath::DomainStandard => "Refer to domain standards",
        }
    }
}

// Numeric columns with gaps come out of spreadsheets as floats ("6.0"); truncate those.
fn parse_tier(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if let Ok(tier) = trimmed.parse::<i64>() {
        return Some(tier);
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| v.trunc() as i64)
}
