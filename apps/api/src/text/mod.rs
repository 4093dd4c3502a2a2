//! Text featurization: tokenizer and the TF-IDF feature space.

pub mod tfidf;
pub mod tokenize;

pub use tfidf::{cosine_similarity, FeatureIndex, SparseVector};
