//! Classifier ranker: tagged profile string → frozen TF-IDF space →
//! logistic-regression class probabilities → top K.
//!
//! The feature assembly here must stay in lock-step with the offline job that
//! produced the artifacts (same tags, same field order, same normalization).
//! Nothing at runtime can detect drift between the two.

use std::path::Path;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::models::query::is_blank;
use crate::models::QueryContext;
use crate::recommend::{sort_by_score_desc, CareerRanker, RankedCareer};
use crate::text::{FeatureIndex, SparseVector};

/// Upper bound on results regardless of configuration.
pub const CLASSIFIER_MAX_K: usize = 5;

/// Value the training data used for absent fields.
const UNKNOWN: &str = "unknown";

// ────────────────────────────────────────────────────────────────────────────
// Feature assembly
// ────────────────────────────────────────────────────────────────────────────

/// Builds `age_… edu_… stream_… course_… spec_… job_… exp_… interest_… skill_… work_… gap_…`.
pub fn assemble_features(query: &QueryContext) -> String {
    let p = &query.profile;
    let fields: [(&str, &str); 11] = [
        ("age_", p.age.as_str()),
        ("edu_", p.education.as_str()),
        ("stream_", query.stream.as_str()),
        ("course_", p.course.as_str()),
        ("spec_", p.specialization.as_str()),
        ("job_", p.job.as_str()),
        ("exp_", p.experience.as_str()),
        ("interest_", query.interests.as_str()),
        ("skill_", query.skills.as_str()),
        ("work_", p.work_type.as_str()),
        ("gap_", p.career_gap.as_str()),
    ];

    fields
        .iter()
        .map(|(tag, value)| format!("{tag}{}", normalize(value)))
        .collect::<Vec<_>>()
        .join(" ")
}

fn normalize(value: &str) -> String {
    let cleaned = value.trim().to_lowercase();
    if cleaned.is_empty() {
        UNKNOWN.to_string()
    } else {
        cleaned
    }
}

/// Blocks prediction when any field the model depends on is blank.
pub fn check_required(query: &QueryContext) -> Result<(), AppError> {
    let required = [
        ("UG course", &query.profile.course),
        ("specialization", &query.profile.specialization),
        ("interests", &query.interests),
        ("skills", &query.skills),
    ];
    let missing: Vec<&str> = required
        .iter()
        .filter(|(_, value)| is_blank(value))
        .map(|(name, _)| *name)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "Please fill in all required fields: {}",
            missing.join(", ")
        )))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Logistic regression model artifact
// ────────────────────────────────────────────────────────────────────────────

/// Fitted logistic-regression weights.
///
/// Multinomial: one coefficient row per class, softmax over the logits.
/// Binary: a single row scoring `classes[1]`, sigmoid for its probability.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogisticModel {
    pub classes: Vec<String>,
    pub coef: Vec<Vec<f64>>,
    pub intercept: Vec<f64>,
}

impl LogisticModel {
    fn is_binary(&self) -> bool {
        self.classes.len() == 2 && self.coef.len() == 1
    }

    /// Checks the artifact against itself and the vectorizer it was trained with.
    pub fn validate(&self, n_features: usize) -> Result<()> {
        if self.classes.len() < 2 {
            bail!("classifier must know at least two classes, found {}", self.classes.len());
        }
        let expected_rows = if self.is_binary() { 1 } else { self.classes.len() };
        if self.coef.len() != expected_rows {
            bail!(
                "classifier has {} coefficient rows for {} classes",
                self.coef.len(),
                self.classes.len()
            );
        }
        if self.intercept.len() != expected_rows {
            bail!(
                "classifier has {} intercepts for {} coefficient rows",
                self.intercept.len(),
                expected_rows
            );
        }
        if let Some(row) = self.coef.iter().find(|row| row.len() != n_features) {
            bail!(
                "classifier expects {} features but the vectorizer produces {}",
                row.len(),
                n_features
            );
        }
        Ok(())
    }

    fn logit(&self, row: usize, x: &SparseVector) -> f64 {
        let weights = &self.coef[row];
        self.intercept[row]
            + x.entries()
                .iter()
                .map(|&(column, value)| weights[column] * value)
                .sum::<f64>()
    }

    /// Probability per class, in `classes` order. Sums to 1.
    pub fn predict_proba(&self, x: &SparseVector) -> Vec<f64> {
        if self.is_binary() {
            let p = 1.0 / (1.0 + (-self.logit(0, x)).exp());
            return vec![1.0 - p, p];
        }

        let logits: Vec<f64> = (0..self.classes.len()).map(|r| self.logit(r, x)).collect();
        let max = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let exps: Vec<f64> = logits.iter().map(|l| (l - max).exp()).collect();
        let total: f64 = exps.iter().sum();
        exps.into_iter().map(|e| e / total).collect()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Ranker
// ────────────────────────────────────────────────────────────────────────────

pub struct ClassifierRanker {
    index: FeatureIndex,
    model: LogisticModel,
    top_k: usize,
}

impl ClassifierRanker {
    pub fn new(index: FeatureIndex, model: LogisticModel, top_k: usize) -> Result<Self> {
        index
            .validate()
            .map_err(|e| anyhow::anyhow!("invalid vectorizer artifact: {e}"))?;
        model.validate(index.vocabulary_size())?;
        if !(1..=CLASSIFIER_MAX_K).contains(&top_k) {
            bail!("top_k must be between 1 and {CLASSIFIER_MAX_K}, got {top_k}");
        }
        Ok(Self {
            index,
            model,
            top_k,
        })
    }

    /// Loads both JSON artifacts. Any failure here is fatal for the process.
    pub fn load(vectorizer_path: &Path, classifier_path: &Path, top_k: usize) -> Result<Self> {
        let index: FeatureIndex = read_json(vectorizer_path)?;
        let model: LogisticModel = read_json(classifier_path)?;
        info!(
            classes = model.classes.len(),
            vocabulary = index.vocabulary_size(),
            top_k,
            "classifier artifacts loaded"
        );
        Self::new(index, model, top_k)
    }

    /// Top-K `(label, probability)` for an already validated query.
    pub fn predict(&self, query: &QueryContext) -> Vec<RankedCareer> {
        let features = assemble_features(query);
        let x = self.index.transform(&features);

        let mut ranked: Vec<RankedCareer> = self
            .model
            .classes
            .iter()
            .zip(self.model.predict_proba(&x))
            .map(|(label, score)| RankedCareer {
                title: label.clone(),
                score,
                record: None,
            })
            .collect();

        sort_by_score_desc(&mut ranked, |r| r.score);
        ranked.truncate(self.top_k);
        ranked
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read model artifact {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Corrupt model artifact {}", path.display()))
}

#[async_trait]
impl CareerRanker for ClassifierRanker {
    fn strategy(&self) -> &'static str {
        "classifier"
    }

    async fn rank(&self, query: &QueryContext) -> Result<Vec<RankedCareer>, AppError> {
        check_required(query)?;
        Ok(self.predict(query))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────


#[cfg(test)]
mod tests {
    use super::test_support::{profile_query, toy_artifacts};
    use super::*;
    use std::io::Write;

    #[test]
    fn test_feature_string_order_and_tags() {
        let mut query = profile_query("Python");
        query.profile.age = "22-30".to_string();
        query.profile.education = "UG".to_string();
        query.profile.work_type = " Remote ".to_string();
        assert_eq!(
            assemble_features(&query),
            "age_22-30 edu_ug stream_cse course_btech spec_cse job_unknown exp_unknown \
             interest_coding skill_python work_remote gap_unknown"
        );
    }

    #[test]
    fn test_missing_required_fields_block_prediction() {
        let mut query = profile_query("python");
        query.profile.specialization = "  ".to_string();
        query.skills = String::new();
        match check_required(&query) {
            Err(AppError::Validation(msg)) => {
                assert!(msg.contains("specialization"));
                assert!(msg.contains("skills"));
                assert!(!msg.contains("interests"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_softmax_probabilities_sum_to_one() {
        let (index, model) = toy_artifacts();
        let x = index.transform("skill_python");
        let probs = model.predict_proba(&x);
        assert_eq!(probs.len(), 4);
        assert!((probs.iter().sum::<f64>() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_binary_model_uses_sigmoid() {
        let model = LogisticModel {
            classes: vec!["No".to_string(), "Yes".to_string()],
            coef: vec![vec![0.0]],
            intercept: vec![0.0],
        };
        let probs = model.predict_proba(&SparseVector::default());
        assert_eq!(probs, vec![0.5, 0.5]);
    }

    #[tokio::test]
    async fn test_rank_returns_top_k_descending() {
        let (index, model) = toy_artifacts();
        let ranker = ClassifierRanker::new(index, model, 3).unwrap();
        let results = ranker.rank(&profile_query("python")).await.unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].title, "Software Developer");
        assert!(results.windows(2).all(|w| w[0].score >= w[1].score));
        assert!(results.iter().all(|r| r.record.is_none()));
    }

    #[tokio::test]
    async fn test_rank_never_exceeds_class_count() {
        let (index, model) = toy_artifacts();
        let ranker = ClassifierRanker::new(index, model, 5).unwrap();
        let results = ranker.rank(&profile_query("tally")).await.unwrap();
        assert_eq!(results.len(), 4);
        assert_eq!(results[0].title, "Accountant");
    }

    #[tokio::test]
    async fn test_rank_rejects_blank_course() {
        let (index, model) = toy_artifacts();
        let ranker = ClassifierRanker::new(index, model, 5).unwrap();
        let mut query = profile_query("python");
        query.profile.course.clear();
        assert!(matches!(
            ranker.rank(&query).await,
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_shape_mismatch_rejected() {
        let (index, mut model) = toy_artifacts();
        model.coef[0].push(1.0);
        let err = ClassifierRanker::new(index, model, 5).err().unwrap();
        assert!(err.to_string().contains("features"));
    }

    #[test]
    fn test_top_k_bounds_enforced() {
        let (index, model) = toy_artifacts();
        assert!(ClassifierRanker::new(index.clone(), model.clone(), 0).is_err());
        assert!(ClassifierRanker::new(index, model, 6).is_err());
    }

    #[test]
    fn test_load_from_json_files() {
        let (index, model) = toy_artifacts();
        let mut vectorizer = tempfile::NamedTempFile::new().unwrap();
        vectorizer
            .write_all(serde_json::to_string(&index).unwrap().as_bytes())
            .unwrap();
        let mut classifier = tempfile::NamedTempFile::new().unwrap();
        classifier
            .write_all(serde_json::to_string(&model).unwrap().as_bytes())
            .unwrap();

        let ranker = ClassifierRanker::load(vectorizer.path(), classifier.path(), 5).unwrap();
        assert_eq!(ranker.predict(&profile_query("autocad"))[0].title, "Architect");
    }

    #[test]
    fn test_corrupt_artifact_is_fatal() {
        let mut vectorizer = tempfile::NamedTempFile::new().unwrap();
        vectorizer.write_all(b"not json").unwrap();
        let classifier = tempfile::NamedTempFile::new().unwrap();
        let err = ClassifierRanker::load(vectorizer.path(), classifier.path(), 5)
            .err()
            .unwrap();
        assert!(err.to_string().contains("Corrupt model artifact"));
    }
}
