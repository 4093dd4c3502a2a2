//! Turns ranked careers into the user-facing career report.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::query::is_blank;
use crate::recommend::roadmap::{learning_resources, roadmap_for};
use crate::recommend::skill_match::skill_match;
use crate::recommend::RankedCareer;

#[derive(Debug, Clone, Serialize)]
pub struct SkillBreakdown {
    pub required_skills: Vec<String>,
    pub match_percent: u32,
    pub matched: Vec<String>,
    pub missing: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CareerCard {
    pub title: String,
    /// Score as a percentage, two decimals.
    pub match_score: f64,
    pub description: Option<String>,
    pub education_path: Option<String>,
    pub skills: Option<SkillBreakdown>,
    pub roadmap: Vec<String>,
    pub learning_resources: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CareerReport {
    pub report_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub strategy: String,
    pub results: Vec<CareerCard>,
    /// Set when nothing could be recommended.
    pub message: Option<String>,
}

pub fn percent(score: f64) -> f64 {
    (score * 100.0 * 100.0).round() / 100.0
}

/// Skill breakdown is only produced for catalog-backed results and non-blank user skills.
pub fn build_report(strategy: &str, ranked: Vec<RankedCareer>, user_skills: &str) -> CareerReport {
    let results: Vec<CareerCard> = ranked
        .into_iter()
        .map(|career| build_card(career, user_skills))
        .collect();

    let message = results
        .is_empty()
        .then(|| "No suitable career found. Try different inputs.".to_string());

    CareerReport {
        report_id: Uuid::new_v4(),
        generated_at: Utc::now(),
        strategy: strategy.to_string(),
        results,
        message,
    }
}

fn build_card(career: RankedCareer, user_skills: &str) -> CareerCard {
    let roadmap = roadmap_for(&career.title);
    let match_score = percent(career.score);

    let (description, education_path, skills) = match career.record {
        Some(record) => {
            let skills = (!is_blank(user_skills)).then(|| {
                let result = skill_match(user_skills, &record.technology_skills);
                SkillBreakdown {
                    missing: result.missing(),
                    required_skills: result.top_terms,
                    match_percent: result.match_percent,
                    matched: result.matched,
                }
            });
            (
                Some(record.description.clone()),
                Some(record.education_path().label().to_string()),
                skills,
            )
        }
        None => (None, None, None),
    };

    CareerCard {
        title: career.title,
        match_score,
        description,
        education_path,
        skills,
        roadmap,
        learning_resources: learning_resources(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_support::career;

    fn ranked(title: &str, tech: &str, education: &str, score: f64) -> RankedCareer {
        RankedCareer {
            title: title.to_string(),
            score,
            record: Some(career(title, "CSE", "does things", tech, education)),
        }
    }

    #[test]
    fn test_percent_rounds_to_two_decimals() {
        assert_eq!(percent(0.123456), 12.35);
        assert_eq!(percent(1.0), 100.0);
        assert_eq!(percent(0.0), 0.0);
    }

    #[test]
    fn test_card_includes_skill_breakdown() {
        let report = build_report(
            "similarity",
            vec![ranked("Software Engineer", "python sql java", "6", 0.5)],
            "Python, sql",
        );
        let card = &report.results[0];
        assert_eq!(card.match_score, 50.0);
        assert_eq!(card.education_path.as_deref(), Some("Bachelor's Degree Required"));
        let skills = card.skills.as_ref().unwrap();
        assert_eq!(skills.match_percent, 66);
        assert_eq!(skills.missing, vec!["java"]);
        assert_eq!(card.roadmap[0], "Learn Python / Java");
        assert_eq!(card.learning_resources.len(), 5);
    }

    #[test]
    fn test_blank_user_skills_skip_breakdown() {
        let report = build_report("similarity", vec![ranked("Analyst", "excel", "abc", 0.2)], "  ");
        let card = &report.results[0];
        assert!(card.skills.is_none());
        assert_eq!(card.education_path.as_deref(), Some("Refer to domain standards"));
        assert_eq!(card.roadmap, roadmap_for("unknown career"));
    }

    #[test]
    fn test_classifier_results_have_no_catalog_details() {
        let report = build_report(
            "classifier",
            vec![RankedCareer {
                title: "Web Developer".to_string(),
                score: 0.8,
                record: None,
            }],
            "html",
        );
        let card = &report.results[0];
        assert!(card.description.is_none());
        assert!(card.skills.is_none());
        assert_eq!(card.roadmap[0], "HTML, CSS, JavaScript");
        assert_eq!(report.strategy, "classifier");
    }

    #[test]
    fn test_empty_results_carry_message() {
        let report = build_report("similarity", vec![], "python");
        assert!(report.results.is_empty());
        assert!(report.message.unwrap().contains("No suitable career"));
    }
}
