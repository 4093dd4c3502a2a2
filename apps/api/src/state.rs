use std::sync::Arc;

use crate::catalog::stream_filter::StreamAdjacency;
use crate::catalog::Catalog;
use crate::recommend::CareerRanker;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is read-only after startup, so handlers never lock.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub adjacency: Arc<StreamAdjacency>,
    /// Pluggable ranker. Default: SimilarityRanker. Swap via RANKER env.
    pub ranker: Arc<dyn CareerRanker>,
}
