use retirement_advisor::{
    agent::AdvisorSession,
    api::start_server,
    calculations::CalculationEngine,
    config::AdvisorConfig,
    conversational::GeminiResponder,
    gemini::GeminiClient,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load environment variables
    dotenv::dotenv().ok();
    let config = AdvisorConfig::from_env()?;

    if config.gemini_api_key.is_empty() {
        eprintln!("⚠️  GEMINI_API_KEY not set in .env");
        eprintln!("📌 General questions will get an apology until it is configured");
    }

    info!("🚀 Retirement Advisor - API Server");
    info!("📍 Port: {}", config.port);

    let client = GeminiClient::new(config.gemini_api_key.clone(), &config.gemini_model)?;
    let session = AdvisorSession::new(
        CalculationEngine::default(),
        Arc::new(GeminiResponder::new(client)),
        config.responder_timeout,
    );

    info!("✅ Advisor session initialized");
    info!("📡 Starting API server...");

    start_server(session, config.port).await?;

    Ok(())
}
