//! Generic responder for questions outside the calculation intents
//!
//! The advisor hands these to a language model together with the user's
//! profile and returns the reply verbatim.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

use crate::error::AdvisorError;
use crate::formatting::{currency, percent};
use crate::gemini::GeminiClient;
use crate::models::ProfileSnapshot;
use crate::Result;

/// Free-text advice given a profile and a question
#[async_trait]
pub trait GenericResponder: Send + Sync {
    async fn respond(&self, profile: &ProfileSnapshot, message: &str) -> Result<String>;
}

/// Gemini-backed responder
pub struct GeminiResponder {
    client: GeminiClient,
}

impl GeminiResponder {
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl GenericResponder for GeminiResponder {
    async fn respond(&self, profile: &ProfileSnapshot, message: &str) -> Result<String> {
        let system_prompt = build_system_prompt(profile);
        self.client.generate(&system_prompt, message).await
    }
}

/// Call the responder, giving up after `timeout`.
///
/// The call runs on its own task so a panicking responder surfaces as
/// `AdvisorError::Responder` instead of unwinding into the session.
pub async fn respond_within(
    responder: &Arc<dyn GenericResponder>,
    profile: &ProfileSnapshot,
    message: &str,
    timeout: Duration,
) -> Result<String> {
    info!("Delegating to generic responder");

    let responder = Arc::clone(responder);
    let profile = *profile;
    let message = message.to_string();
    let mut task = tokio::spawn(async move { responder.respond(&profile, &message).await });

    match tokio::time::timeout(timeout, &mut task).await {
        Ok(Ok(result)) => result,
        Ok(Err(join_error)) => {
            error!(error = %join_error, "Generic responder failed unexpectedly");
            Err(AdvisorError::Responder(
                "the advice service failed unexpectedly".to_string(),
            ))
        }
        Err(_) => {
            task.abort();
            warn!(timeout_ms = timeout.as_millis() as u64, "Generic responder timed out");
            Err(AdvisorError::ResponderTimeout(timeout))
        }
    }
}

/// Advisor persona plus the user's profile
pub fn build_system_prompt(profile: &ProfileSnapshot) -> String {
    format!(
        r#"You are a professional financial advisor. The user has provided this profile:
Age: {age}
Income: {income}
Current Savings: {savings}
Monthly Savings: {monthly}
Retirement Age Goal: {retirement_age}
Expected Return: {expected_return}
Risk Tolerance: {risk}
Inflation Assumption: {inflation}
Retirement Income Goal: {goal}/year

Provide helpful, personalized financial advice based on this information."#,
        age = profile.age,
        income = currency(profile.income),
        savings = currency(profile.current_savings),
        monthly = currency(profile.monthly_savings),
        retirement_age = profile.retirement_age,
        expected_return = percent(profile.expected_return),
        risk = profile.risk_tolerance,
        inflation = percent(profile.inflation_rate),
        goal = currency(profile.retirement_goal),
    )
}
