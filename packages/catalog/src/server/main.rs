// Main entry point for the catalog API server

use std::sync::Arc;

use anyhow::{Context, Result};
use catalog::server::{build_router, AppState};
use catalog::{Config, EventRecommendations, MemoryEventRepository};
use chat_client::ChatClient;
use importer::OpenAiCompletion;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,catalog=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting event catalog API");

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    let mut client = ChatClient::new(config.openai_api_key.clone());
    if let Some(base_url) = &config.openai_base_url {
        client = client.with_base_url(base_url.clone());
    }
    let completion = Arc::new(OpenAiCompletion::new(client, config.model_name.clone()));
    let repository = Arc::new(MemoryEventRepository::new());
    let recommendations = Arc::new(EventRecommendations::new(
        completion,
        repository.clone(),
    ));

    let app = build_router(AppState {
        repository,
        recommendations,
    });

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
