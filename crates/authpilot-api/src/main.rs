use std::env;

use tracing_subscriber::EnvFilter;

use authpilot_bedrock::client::build_client;
use authpilot_session::strategy::BedrockGenerator;

mod app;
mod config;
mod error;
mod middleware;
mod routes;
mod state;

use config::ApiConfig;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Structured JSON logging for CloudWatch
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    let config = ApiConfig::from_env()?;
    let guidelines = config.load_guidelines()?;

    let mut state = AppState::new(guidelines, config.session.clone());
    if config.remote_generation {
        tracing::info!(model = %config.model_id, region = %config.region, "remote generation enabled");
        let client = build_client(&config.region).await?;
        state = state.with_remote(BedrockGenerator::new(client, config.model_id.clone()));
    }

    let app = app::router(state);

    if env::var("AWS_LAMBDA_RUNTIME_API").is_ok() {
        return lambda_http::run(app).await.map_err(|e| eyre::eyre!(e));
    }

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}
