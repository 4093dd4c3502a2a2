//! Similarity ranker: stream filter → TF-IDF cosine → top 3.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::catalog::stream_filter::{filter, StreamAdjacency};
use crate::catalog::Catalog;
use crate::errors::AppError;
use crate::models::query::is_blank;
use crate::models::QueryContext;
use crate::recommend::{sort_by_score_desc, CareerRanker, RankedCareer};
use crate::text::{cosine_similarity, FeatureIndex, SparseVector};

/// Maximum results per query.
pub const SIMILARITY_TOP_K: usize = 3;

/// Index fitted once over the full catalog; record embeddings cached by position.
pub struct SimilarityRanker {
    catalog: Arc<Catalog>,
    adjacency: StreamAdjacency,
    index: FeatureIndex,
    embeddings: Vec<SparseVector>,
}

impl SimilarityRanker {
    pub fn new(catalog: Arc<Catalog>, adjacency: StreamAdjacency) -> Self {
        let documents: Vec<String> = catalog
            .records()
            .iter()
            .map(|r| r.combined_text())
            .collect();
        let index = FeatureIndex::fit(&documents);
        let embeddings = documents.iter().map(|d| index.transform(d)).collect();

        tracing::info!(
            careers = catalog.len(),
            vocabulary = index.vocabulary_size(),
            "similarity index fitted"
        );

        Self {
            catalog,
            adjacency,
            index,
            embeddings,
        }
    }

    /// Scores `candidates` (catalog positions) against `query_text`, best first, at most 3.
    /// Blank text is not rejected here; it simply scores zero everywhere.
    pub fn rank_candidates(&self, candidates: &[usize], query_text: &str) -> Vec<(usize, f64)> {
        let query = self.index.transform(query_text);

        let mut scored: Vec<(usize, f64)> = candidates
            .iter()
            .map(|&p| (p, cosine_similarity(&query, &self.embeddings[p])))
            .collect();

        sort_by_score_desc(&mut scored, |(_, s)| *s);
        scored.truncate(SIMILARITY_TOP_K);
        scored
    }

    /// Stream filter then ranking, without input validation.
    pub fn recommend(&self, stream: &str, query_text: &str) -> Vec<RankedCareer> {
        let (candidates, tier) = filter(&self.catalog, &self.adjacency, stream);
        debug!(?tier, candidates = candidates.len(), "stream filter applied");

        self.rank_candidates(&candidates, query_text)
            .into_iter()
            .filter_map(|(p, score)| {
                self.catalog.get(p).map(|record| RankedCareer {
                    title: record.title.clone(),
                    score,
                    record: Some(record.clone()),
                })
            })
            .collect()
    }
}

#[async_trait]
impl CareerRanker for SimilarityRanker {
    fn strategy(&self) -> &'static str {
        "similarity"
    }

    async fn rank(&self, query: &QueryContext) -> Result<Vec<RankedCareer>, AppError> {
        if is_blank(&query.interests) {
            return Err(AppError::Validation(
                "Please describe your interests.".to_string(),
            ));
        }
        Ok(self.recommend(&query.stream, &query.interests))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_support::{career, sample_catalog};

    fn ranker(catalog: Catalog) -> SimilarityRanker {
        SimilarityRanker::new(Arc::new(catalog), StreamAdjacency::default())
    }

    fn query(stream: &str, interests: &str) -> QueryContext {
        QueryContext {
            interests: interests.to_string(),
            stream: stream.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_single_record_end_to_end() {
        let catalog = Catalog::new(vec![career(
            "Data Analyst",
            "CSE",
            "data analysis python sql",
            "",
            "6",
        )]);
        let results = ranker(catalog)
            .rank(&query("CSE", "I love data and python"))
            .await
            .unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Data Analyst");
        assert!(results[0].score > 0.0);
    }

    #[tokio::test]
    async fn test_blank_interests_rejected() {
        let err = ranker(sample_catalog())
            .rank(&query("CSE", "   "))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_at_most_three_results_in_descending_order() {
        let ranker = ranker(sample_catalog());
        let results = ranker.recommend("Astrology", "python data design software excel");
        assert!(results.len() <= SIMILARITY_TOP_K);
        assert!(results.windows(2).all(|w| w[0].score >= w[1].score));
        assert!(results.iter().all(|r| (0.0..=1.0).contains(&r.score)));
    }

    #[test]
    fn test_fewer_candidates_than_three_returns_all() {
        let ranker = ranker(sample_catalog());
        // CSE has exactly two careers
        let results = ranker.recommend("cse", "python");
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn test_best_match_first() {
        let ranker = ranker(sample_catalog());
        let results = ranker.recommend("CSE", "dashboards with sql and tableau");
        assert_eq!(results[0].title, "Data Analyst");
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let catalog = Catalog::new(vec![
            career("First", "X", "alpha", "", ""),
            career("Second", "X", "beta", "", ""),
            career("Third", "X", "gamma", "", ""),
            career("Fourth", "X", "delta", "", ""),
        ]);
        let ranker = ranker(catalog);
        // nothing matches: all scores are zero
        let results = ranker.recommend("X", "unrelated words");
        let titles: Vec<&str> = results.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Second", "Third"]);
        assert!(results.iter().all(|r| r.score == 0.0));
    }

    #[test]
    fn test_ranking_is_deterministic() {
        let ranker = ranker(sample_catalog());
        let a = ranker.rank_candidates(&[0, 1, 2, 3, 4], "build software with python");
        let b = ranker.rank_candidates(&[0, 1, 2, 3, 4], "build software with python");
        assert_eq!(a, b);
    }

    #[test]
    fn test_subset_scored_in_full_catalog_space() {
        let ranker = ranker(sample_catalog());
        // only the accountant is a candidate even though others match better
        let results = ranker.rank_candidates(&[3], "python excel");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].0, 3);
        assert!(results[0].1 > 0.0);
    }

    #[test]
    fn test_empty_catalog_returns_nothing() {
        let ranker = ranker(Catalog::default());
        assert!(ranker.recommend("CSE", "python").is_empty());
    }
}
