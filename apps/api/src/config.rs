use std::path::PathBuf;

use anyhow::{bail, Context, Result};

/// Which recommendation backend serves requests. Fixed for the process lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankerKind {
    Similarity,
    Classifier,
}

impl RankerKind {
    fn parse(raw: &str) -> Result<Self> {
        match raw.trim().to_lowercase().as_str() {
            "similarity" | "tfidf" => Ok(RankerKind::Similarity),
            "classifier" => Ok(RankerKind::Classifier),
            other => bail!("RANKER must be 'similarity' or 'classifier', got '{other}'"),
        }
    }
}

/// Paths to the two artifacts produced by the offline training job.
#[derive(Debug, Clone)]
pub struct ClassifierArtifacts {
    pub vectorizer_path: PathBuf,
    pub classifier_path: PathBuf,
    pub top_k: usize,
}

/// Application configuration loaded from environment variables.
/// Startup fails if the classifier backend is selected without its artifacts.
#[derive(Debug, Clone)]
pub struct Config {
    pub catalog_path: PathBuf,
    pub ranker: RankerKind,
    pub classifier: Option<ClassifierArtifacts>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup (the environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let ranker = match lookup("RANKER") {
            Some(raw) => RankerKind::parse(&raw)?,
            None => RankerKind::Similarity,
        };

        let classifier = match ranker {
            RankerKind::Similarity => None,
            RankerKind::Classifier => {
                let top_k = lookup("CLASSIFIER_TOP_K")
                    .unwrap_or_else(|| "5".to_string())
                    .parse::<usize>()
                    .context("CLASSIFIER_TOP_K must be a positive integer")?;
                if !(1..=5).contains(&top_k) {
                    bail!("CLASSIFIER_TOP_K must be between 1 and 5, got {top_k}");
                }
                Some(ClassifierArtifacts {
                    vectorizer_path: require(&lookup, "VECTORIZER_PATH")?.into(),
                    classifier_path: require(&lookup, "CLASSIFIER_PATH")?.into(),
                    top_k,
                })
            }
        };

        Ok(Config {
            catalog_path: lookup("CATALOG_PATH")
                .unwrap_or_else(|| "data/career_dataset.csv".to_string())
                .into(),
            ranker,
            classifier,
            port: lookup("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn require<F>(lookup: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
