use retirement_advisor::{
    agent::AdvisorSession,
    calculations::CalculationEngine,
    config::AdvisorConfig,
    conversational::GeminiResponder,
    gemini::GeminiClient,
};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so they don't interleave with the conversation
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    dotenv::dotenv().ok();
    let config = AdvisorConfig::from_env()?;

    if config.gemini_api_key.is_empty() {
        eprintln!("⚠️  GEMINI_API_KEY not set; general questions will not be answered");
    }

    let client = GeminiClient::new(config.gemini_api_key.clone(), &config.gemini_model)?;
    let mut session = AdvisorSession::new(
        CalculationEngine::default(),
        Arc::new(GeminiResponder::new(client)),
        config.responder_timeout,
    );

    info!("Retirement advisor starting");
    println!("💰 Retirement Advisor (type 'quit' to leave)\n");

    let (prompt, _) = session.current_prompt();
    println!("🤖 {}", prompt);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if matches!(input.to_lowercase().as_str(), "quit" | "exit") {
            break;
        }

        let turn = session.handle_message(input).await;
        for reply in turn.replies {
            println!("🤖 {}", reply);
        }
    }

    println!("Goodbye!");
    Ok(())
}
