mod catalog;
mod config;
mod errors;
mod models;
mod recommend;
mod routes;
mod state;
mod text;
mod wizard;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::catalog::stream_filter::StreamAdjacency;
use crate::catalog::Catalog;
use crate::config::{Config, RankerKind};
use crate::recommend::classifier::ClassifierRanker;
use crate::recommend::similarity::SimilarityRanker;
use crate::recommend::CareerRanker;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on an invalid ranker setup)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Disha API v{}", env!("CARGO_PKG_VERSION"));

    // Load the career catalog once; read-only from here on
    let catalog = Arc::new(Catalog::from_path(&config.catalog_path)?);
    let adjacency = StreamAdjacency::default();

    // Initialize ranker (SimilarityRanker by default; swap via RANKER)
    let ranker = build_ranker(&config, catalog.clone(), adjacency.clone())?;
    info!("Ranker initialized (strategy: {})", ranker.strategy());

    // Build app state
    let state = AppState {
        catalog,
        adjacency: Arc::new(adjacency),
        ranker,
    };

    // Build router
    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Constructs the configured ranker. Missing or corrupt classifier artifacts abort startup.
fn build_ranker(
    config: &Config,
    catalog: Arc<Catalog>,
    adjacency: StreamAdjacency,
) -> Result<Arc<dyn CareerRanker>> {
    match config.ranker {
        RankerKind::Similarity => Ok(Arc::new(SimilarityRanker::new(catalog, adjacency))),
        RankerKind::Classifier => {
            let artifacts = config
                .classifier
                .as_ref()
                .context("Classifier ranker selected without artifact paths")?;
            let ranker = ClassifierRanker::load(
                &artifacts.vectorizer_path,
                &artifacts.classifier_path,
                artifacts.top_k,
            )?;
            Ok(Arc::new(ranker))
        }
    }
}
