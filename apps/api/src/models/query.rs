use serde::{Deserialize, Serialize};

/// Everything a user supplies for one recommendation request.
/// Lives for a single request; nothing here is stored server-side.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct QueryContext {
    /// Free-text interests, goals and passions.
    #[serde(default)]
    pub interests: String,
    #[serde(default)]
    pub stream: String,
    /// Comma-separated skill list.
    #[serde(default)]
    pub skills: String,
    #[serde(default)]
    pub profile: ProfileFields,
}

/// Demographic and background fields consumed by the classifier backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProfileFields {
    #[serde(default)]
    pub age: String,
    #[serde(default)]
    pub education: String,
    /// Undergraduate course, e.g. "btech".
    #[serde(default)]
    pub course: String,
    #[serde(default)]
    pub specialization: String,
    #[serde(default)]
    pub job: String,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub work_type: String,
    #[serde(default)]
    pub career_gap: String,
}

pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
