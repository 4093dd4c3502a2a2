//! Step-by-step intake flow as an explicit, client-held session object.
//!
//! Personal → Stream → Interests → Results. Transitions are pure: the server
//! never stores a session, it receives one, applies an action and returns the
//! next one.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::stream_filter::SELECTABLE_STREAMS;
use crate::errors::AppError;
use crate::models::career::canonical_stream;
use crate::models::query::is_blank;
use crate::models::{ProfileFields, QueryContext};

pub const AGE_GROUPS: &[&str] = &["Below 15", "15-18", "18-22", "22-30", "30+"];

pub const EDUCATION_LEVELS: &[&str] = &[
    "10th",
    "11th",
    "12th",
    "Diploma",
    "UG",
    "PG",
    "Professional",
    "Housewife",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Personal,
    Stream,
    Interests,
    Results,
}

impl WizardStep {
    pub fn number(&self) -> u8 {
        match self {
            WizardStep::Personal => 1,
            WizardStep::Stream => 2,
            WizardStep::Interests => 3,
            WizardStep::Results => 4,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WizardAnswers {
    pub age: Option<String>,
    pub education_level: Option<String>,
    pub stream: Option<String>,
    pub interests: Option<String>,
    pub skills: Option<String>,
    #[serde(default)]
    pub profile: ProfileFields,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WizardSession {
    pub session_id: Uuid,
    pub step: WizardStep,
    #[serde(default)]
    pub answers: WizardAnswers,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum WizardAction {
    SubmitPersonal {
        age: String,
        education_level: String,
    },
    SubmitStream {
        stream: String,
    },
    Predict {
        interests: String,
        #[serde(default)]
        skills: String,
        #[serde(default)]
        profile: ProfileFields,
    },
    Back,
    Restart,
}

impl Default for WizardSession {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardSession {
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4(),
            step: WizardStep::Personal,
            answers: WizardAnswers::default(),
        }
    }

    /// Applies `action` and returns the next session. On error the caller keeps the old one.
    pub fn apply(&self, action: WizardAction) -> Result<WizardSession, AppError> {
        let mut next = self.clone();

        match (self.step, action) {
            (WizardStep::Personal, WizardAction::SubmitPersonal { age, education_level }) => {
                next.answers.age = Some(pick_option("age group", &age, AGE_GROUPS)?);
                next.answers.education_level =
                    Some(pick_option("education level", &education_level, EDUCATION_LEVELS)?);
                next.step = WizardStep::Stream;
            }
            (WizardStep::Stream, WizardAction::SubmitStream { stream }) => {
                let canonical = canonical_stream(&stream);
                if !SELECTABLE_STREAMS.contains(&canonical.as_str()) {
                    return Err(AppError::Validation(format!("Unknown stream '{stream}'")));
                }
                next.answers.stream = Some(canonical);
                next.step = WizardStep::Interests;
            }
            (
                WizardStep::Interests,
                WizardAction::Predict {
                    interests,
                    skills,
                    profile,
                },
            ) => {
                if is_blank(&interests) {
                    return Err(AppError::Validation(
                        "Please describe your interests.".to_string(),
                    ));
                }
                next.answers.interests = Some(interests);
                next.answers.skills = Some(skills);
                next.answers.profile = profile;
                next.step = WizardStep::Results;
            }
            (step, WizardAction::Back) => {
                next.step = match step {
                    WizardStep::Personal => {
                        return Err(AppError::UnprocessableEntity(
                            "Already at the first step".to_string(),
                        ))
                    }
                    WizardStep::Stream => WizardStep::Personal,
                    WizardStep::Interests => WizardStep::Stream,
                    WizardStep::Results => WizardStep::Interests,
                };
            }
            (_, WizardAction::Restart) => {
                next.step = WizardStep::Personal;
            }
            (step, action) => {
                return Err(AppError::UnprocessableEntity(format!(
                    "Action {} is not valid at step {}",
                    action_name(&action),
                    step.number()
                )));
            }
        }

        Ok(next)
    }

    /// The query the answers describe. Age and education level feed the profile.
    pub fn to_query(&self) -> QueryContext {
        let answers = &self.answers;
        let mut profile = answers.profile.clone();
        if let Some(age) = &answers.age {
            profile.age = age.clone();
        }
        if let Some(level) = &answers.education_level {
            profile.education = level.clone();
        }
        QueryContext {
            interests: answers.interests.clone().unwrap_or_default(),
            stream: answers.stream.clone().unwrap_or_default(),
            skills: answers.skills.clone().unwrap_or_default(),
            profile,
        }
    }
}

fn pick_option(field: &str, value: &str, options: &[&str]) -> Result<String, AppError> {
    options
        .iter()
        .find(|o| o.eq_ignore_ascii_case(value.trim()))
        .map(|o| o.to_string())
        .ok_or_else(|| {
            AppError::Validation(format!(
                "Invalid {field} '{value}'. Expected one of: {}",
                options.join(", ")
            ))
        })
}

fn action_name(action: &WizardAction) -> &'static str {
    match action {
        WizardAction::SubmitPersonal { .. } => "submit_personal",
        WizardAction::SubmitStream { .. } => "submit_stream",
        WizardAction::Predict { .. } => "predict",
        WizardAction::Back => "back",
        WizardAction::Restart => "restart",
    }
}
