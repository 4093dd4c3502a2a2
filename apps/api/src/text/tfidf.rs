//! Sparse TF-IDF feature space.
//!
//! `FeatureIndex::fit` learns a vocabulary and smoothed idf weights once;
//! `transform` embeds any text into that frozen space. Terms outside the
//! vocabulary contribute nothing. Output vectors are L2-normalized, so cosine
//! similarity between two embeddings reduces to their dot product.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::text::tokenize::tokenize;

/// Sparse vector: `(column, weight)` pairs sorted by column, no zero weights.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }

    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (ci, wi) = self.entries[i];
            let (cj, wj) = other.entries[j];
            match ci.cmp(&cj) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += wi * wj;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }
}

/// Cosine similarity; 0.0 when either side is the zero vector.
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f64 {
    let denom = a.norm() * b.norm();
    if denom == 0.0 {
        return 0.0;
    }
    (a.dot(b) / denom).clamp(-1.0, 1.0)
}

fn default_stop_words() -> bool {
    true
}

/// A fitted vocabulary plus idf weights. Serialized as JSON for the classifier backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeatureIndex {
    /// term → column; columns follow sorted term order.
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    #[serde(default = "default_stop_words")]
    english_stop_words: bool,
}

impl FeatureIndex {
    /// Learns vocabulary and idf from `documents` (English stop words removed).
    /// idf(t) = ln((1 + n) / (1 + df(t))) + 1
    pub fn fit<S: AsRef<str>>(documents: &[S]) -> Self {
        let n_docs = documents.len();
        let mut doc_freq: HashMap<String, usize> = HashMap::new();

        for doc in documents {
            let unique: BTreeSet<String> = tokenize(doc.as_ref(), true).into_iter().collect();
            for term in unique {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        let mut terms: Vec<String> = doc_freq.keys().cloned().collect();
        terms.sort();

        let idf = terms
            .iter()
            .map(|t| {
                let df = doc_freq[t] as f64;
                ((1.0 + n_docs as f64) / (1.0 + df)).ln() + 1.0
            })
            .collect();

        let vocabulary = terms.into_iter().enumerate().map(|(i, t)| (t, i)).collect();

        Self {
            vocabulary,
            idf,
            english_stop_words: true,
        }
    }

    /// Embeds `text` into the fitted space. Never grows the vocabulary.
    pub fn transform(&self, text: &str) -> SparseVector {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for token in tokenize(text, self.english_stop_words) {
            if let Some(&column) = self.vocabulary.get(&token) {
                *counts.entry(column).or_insert(0.0) += 1.0;
            }
        }

        let mut entries: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(column, tf)| (column, tf * self.idf[column]))
            .collect();
        entries.sort_by_key(|(column, _)| *column);

        let norm = entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, w) in &mut entries {
                *w /= norm;
            }
        }

        SparseVector { entries }
    }

    pub fn vocabulary_size(&self) -> usize {
        self.idf.len()
    }

    pub fn contains(&self, term: &str) -> bool {
        self.vocabulary.contains_key(term)
    }

    /// Checks that a deserialized index is internally consistent.
    pub fn validate(&self) -> Result<(), String> {
        if self.vocabulary.len() != self.idf.len() {
            return Err(format!(
                "vocabulary has {} terms but idf has {} weights",
                self.vocabulary.len(),
                self.idf.len()
            ));
        }
        if let Some((term, column)) = self
            .vocabulary
            .iter()
            .find(|(_, column)| **column >= self.idf.len())
        {
            return Err(format!("term '{term}' maps to out-of-range column {column}"));
        }
        Ok(())
    }
}
