//! Career recommendation: pluggable, trait-based rankers over a user's query.
//!
//! `SimilarityRanker`: TF-IDF cosine search over the stream-filtered catalog.
//! `ClassifierRanker`: pre-trained multi-class model over a tagged profile string.
//!
//! `AppState` holds an `Arc<dyn CareerRanker>`, chosen at startup via `RANKER`.

pub mod classifier;
pub mod handlers;
pub mod report;
pub mod roadmap;
pub mod similarity;
pub mod skill_match;

use async_trait::async_trait;
use serde::Serialize;

use crate::errors::AppError;
use crate::models::{CareerRecord, QueryContext};

/// One ranked career. `record` is present when the result comes from the catalog.
#[derive(Debug, Clone, Serialize)]
pub struct RankedCareer {
    pub title: String,
    pub score: f64, // 0.0 – 1.0
    pub record: Option<CareerRecord>,
}

/// The ranker trait. Implement this to swap backends without touching
/// the endpoint, handler, or caller code.
///
/// Every implementation validates its own required inputs and returns
/// `AppError::Validation` before computing anything.
#[async_trait]
pub trait CareerRanker: Send + Sync {
    /// "similarity" | "classifier", echoed in reports.
    fn strategy(&self) -> &'static str;

    /// Results ordered by score, highest first.
    async fn rank(&self, query: &QueryContext) -> Result<Vec<RankedCareer>, AppError>;
}

/// Stable descending sort by score; equal scores keep their incoming order.
pub(crate) fn sort_by_score_desc<T>(items: &mut [T], score: impl Fn(&T) -> f64) {
    items.sort_by(|a, b| score(b).total_cmp(&score(a)));
}
