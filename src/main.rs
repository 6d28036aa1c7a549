//! feedback-sentiment - Feedback Sentiment Service binary
//!
//! Startup order matters: configuration resolves first, then the model
//! artifacts load, and only then does the listener bind. A process that
//! accepts connections therefore always holds a loaded model.

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

use feedback_sentiment::config::{Cli, Settings};
use feedback_sentiment::{build_router, AppState, SentimentAnalyzer};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!(
        "Starting Feedback Sentiment Service v{}",
        env!("CARGO_PKG_VERSION")
    );

    let cli = Cli::parse();
    let settings = Settings::resolve(cli)?;
    info!("Model directory: {}", settings.model_dir.display());

    // Fail fast: a service without its model is not meaningfully up
    let analyzer = match SentimentAnalyzer::load(&settings) {
        Ok(analyzer) => {
            info!("✓ Model artifacts loaded");
            analyzer
        }
        Err(e) => {
            error!("Failed to load model artifacts: {}", e);
            return Err(e.into());
        }
    };

    let state = AppState::new(analyzer);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(settings.bind).await?;
    info!("Listening on http://{}", settings.bind);
    info!("Health check: http://{}/health", settings.bind);

    axum::serve(listener, app).await?;

    Ok(())
}
