// Import CLI: parse an event file and print or POST the results.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chat_client::ChatClient;
use clap::Parser;
use futures::StreamExt;
use importer::{ImportConfig, ImportPipeline, OpenAiCompletion};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "import")]
#[command(about = "Parse a music event file into event creation requests")]
#[command(version)]
struct Cli {
    /// Event file to import
    file: PathBuf,

    /// Maximum concurrent extraction calls
    #[arg(long, default_value_t = 4)]
    concurrency: usize,

    /// Emit results in segment order
    #[arg(long)]
    ordered: bool,

    /// POST each request to this catalog base URL instead of printing
    #[arg(long)]
    post: Option<String>,

    /// Model for the completion calls
    #[arg(long, default_value = "gpt-4o")]
    model: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,importer=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let _ = dotenvy::dotenv();

    let api_key = std::env::var("OPENAI_API_KEY").context("OPENAI_API_KEY must be set")?;
    let mut client = ChatClient::new(api_key);
    if let Ok(base_url) = std::env::var("OPENAI_BASE_URL") {
        client = client.with_base_url(base_url);
    }

    let document = tokio::fs::read_to_string(&cli.file)
        .await
        .with_context(|| format!("Failed to read {}", cli.file.display()))?;

    let mut config = ImportConfig::new().with_concurrency(cli.concurrency);
    if cli.ordered {
        config = config.ordered();
    }
    let completion = Arc::new(OpenAiCompletion::new(client, cli.model));
    let pipeline = ImportPipeline::new(completion).with_config(config);

    let http = reqwest::Client::new();
    let mut imported = 0usize;

    let mut requests = std::pin::pin!(pipeline.parse(&document));
    while let Some(request) = requests.next().await {
        match &cli.post {
            Some(base) => {
                let url = format!("{}/events", base.trim_end_matches('/'));
                let response = http
                    .post(&url)
                    .json(&request)
                    .send()
                    .await
                    .with_context(|| format!("POST {url} failed"))?;
                tracing::info!(event = %request.name, status = %response.status(), "Posted event");
            }
            None => println!("{}", serde_json::to_string(&request)?),
        }
        imported += 1;
    }

    tracing::info!(imported, "Import complete");
    Ok(())
}
