//! Advisor session - one user's conversation
//!
//! INTAKE (questionnaire) → COMPLETE → ROUTE each question to a calculation
//! or to the generic responder.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::calculations::{CalculationEngine, ProfileOverview};
use crate::classifier::IntentClassifier;
use crate::conversational::{respond_within, GenericResponder};
use crate::error::AdvisorError;
use crate::models::FinancialProfile;
use crate::questionnaire::QuestionnaireEngine;

pub const INCOMPLETE_PROFILE: &str = "Please complete the questionnaire first!";

/// Example prompts a UI can offer as one-click questions
pub const SAMPLE_QUESTIONS: &[&str] = &[
    "When can I retire?",
    "How much should I save monthly?",
    "What if inflation is 4%?",
    "How long will $500k last in retirement?",
    "Should I pay off my mortgage early?",
    "What's the rule of 72?",
    "Explain the calculations you used",
];

/// Canned messages sent through the normal chat path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuickAction {
    RetirementForecast,
    SavingsAnalysis,
}

impl QuickAction {
    pub fn message(self) -> &'static str {
        match self {
            QuickAction::RetirementForecast => "Show me my retirement forecast",
            QuickAction::SavingsAnalysis => "Analyze my current savings plan",
        }
    }
}

/// Replies produced for one user turn
#[derive(Debug, Clone, Serialize)]
pub struct Turn {
    pub replies: Vec<String>,
    pub questionnaire_complete: bool,
}

pub struct AdvisorSession {
    questionnaire: QuestionnaireEngine,
    engine: CalculationEngine,
    responder: Arc<dyn GenericResponder>,
    responder_timeout: Duration,
}

impl AdvisorSession {
    pub fn new(
        engine: CalculationEngine,
        responder: Arc<dyn GenericResponder>,
        responder_timeout: Duration,
    ) -> Self {
        let questionnaire =
            QuestionnaireEngine::with_profile(FinancialProfile::with_assumptions(engine.assumptions()));

        Self {
            questionnaire,
            engine,
            responder,
            responder_timeout,
        }
    }

    pub fn profile(&self) -> &FinancialProfile {
        self.questionnaire.profile()
    }

    pub fn is_complete(&self) -> bool {
        self.profile().is_complete()
    }

    /// Start over with an empty profile
    pub fn reset(&mut self) {
        info!("Resetting advisor session");
        self.questionnaire = QuestionnaireEngine::with_profile(FinancialProfile::with_assumptions(
            self.engine.assumptions(),
        ));
    }

    /// Next question, or the plan summary once intake is done
    pub fn current_prompt(&mut self) -> (String, bool) {
        self.questionnaire.ask_next_question(&self.engine)
    }

    pub fn overview(&self) -> Option<ProfileOverview> {
        self.profile()
            .snapshot()
            .map(|snapshot| self.engine.overview(&snapshot))
    }

    /// Entry point for raw user text: answers questions during intake and
    /// routes follow-ups afterwards.
    pub async fn handle_message(&mut self, text: &str) -> Turn {
        if self.is_complete() {
            let reply = self.chat(text).await;
            return Turn {
                replies: vec![reply],
                questionnaire_complete: true,
            };
        }

        let feedback = self.questionnaire.process_answer(text);
        let (next, finished) = self.current_prompt();

        Turn {
            replies: vec![feedback, next],
            questionnaire_complete: finished,
        }
    }

    pub async fn quick_action(&self, action: QuickAction) -> String {
        self.chat(action.message()).await
    }

    /// Answer a follow-up question. Never fails: every error becomes an
    /// apology.
    pub async fn chat(&self, message: &str) -> String {
        let Some(snapshot) = self.profile().snapshot() else {
            return AdvisorError::IncompleteProfile.to_string();
        };

        let result = match IntentClassifier::classify(message) {
            Some(intent) => {
                info!(?intent, "Answering with calculation");
                self.engine.answer(intent, &snapshot)
            }
            None => {
                respond_within(&self.responder, &snapshot, message, self.responder_timeout).await
            }
        };

        result.unwrap_or_else(|e| apology(&e))
    }
}

fn apology(error: &AdvisorError) -> String {
    warn!(error = %error, "Returning apology");
    format!(
        "I'm sorry, I encountered an error: {}. Please try rephrasing your question.",
        error
    )
}
