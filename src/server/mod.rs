//! HTTP surface over the pipeline and the business store.

mod error;
mod handlers;
mod webhooks;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use axum::routing::{get, post};

use crate::pipeline::{BuildOrchestrator, Pipeline};
use crate::store::BusinessStore;

pub use error::ApiError;

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<Pipeline>,
    pub orchestrator: Arc<BuildOrchestrator>,
    pub store: Arc<BusinessStore>,
}

impl AppState {
    /// Wires the standard five-stage build over `pipeline`.
    pub fn new(pipeline: Arc<Pipeline>, store: Arc<BusinessStore>) -> Self {
        let orchestrator = Arc::new(BuildOrchestrator::standard(pipeline.clone()));
        Self {
            pipeline,
            orchestrator,
            store,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/build", post(handlers::build))
        .route(
            "/research",
            get(handlers::get_research).post(handlers::run_research),
        )
        .route("/find-leads", post(handlers::find_leads))
        .route("/outreach-plan", get(handlers::outreach_plan))
        .route("/process-lead", post(handlers::process_lead))
        .route("/inquiry", post(handlers::inquiry))
        .route("/support", post(handlers::support))
        .route("/payhip-copy", get(handlers::product_copy))
        .route("/gumroad-copy", get(handlers::product_copy))
        .route("/email-sequence", get(handlers::email_sequence))
        .route("/social-posts", get(handlers::social_posts))
        .route("/daily-post", get(handlers::daily_post))
        .route("/webhook/payhip", post(webhooks::payhip))
        .route("/webhook/stripe", post(webhooks::stripe))
        .route("/webhook/gumroad", post(webhooks::gumroad))
        .route("/stats", get(handlers::stats))
        .route("/assets", get(handlers::assets))
        .route("/leads", get(handlers::leads))
        .route("/customers", get(handlers::customers))
        .with_state(state)
}

pub async fn serve(state: AppState, addr: &str) -> Result<()> {
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(%error, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
