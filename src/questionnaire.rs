//! Onboarding questionnaire
//!
//! A fixed, ordered list of questions. Each accepted answer fills exactly one
//! profile field and moves the cursor forward; a rejected answer leaves the
//! cursor where it is so the same question is asked again.

use tracing::{debug, info};

use crate::calculations::CalculationEngine;
use crate::models::{Answer, FinancialProfile};
use crate::parsing::{parse_currency, parse_risk_tolerance, parse_whole_number};
use crate::Result;

pub const ACKNOWLEDGEMENT: &str = "Got it! ✅";
pub const INVALID_NUMBER: &str = "❌ Please enter a valid number.";
pub const ALREADY_COMPLETE: &str =
    "Your profile is already complete. Ask me anything about your retirement plan!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Question {
    Age,
    Income,
    CurrentSavings,
    MonthlySavings,
    RetirementAge,
    RiskTolerance,
    RetirementGoal,
}

impl Question {
    pub const ALL: [Question; 7] = [
        Question::Age,
        Question::Income,
        Question::CurrentSavings,
        Question::MonthlySavings,
        Question::RetirementAge,
        Question::RiskTolerance,
        Question::RetirementGoal,
    ];

    pub fn prompt(self) -> &'static str {
        match self {
            Question::Age => "What's your current age?",
            Question::Income => "What's your annual income (in dollars)?",
            Question::CurrentSavings => "How much have you saved so far (in dollars)?",
            Question::MonthlySavings => "How much do you save each month (in dollars)?",
            Question::RetirementAge => "At what age would you like to retire?",
            Question::RiskTolerance => {
                "What's your risk tolerance? (conservative/moderate/aggressive)"
            }
            Question::RetirementGoal => {
                "How much annual income do you want in retirement (in dollars)?"
            }
        }
    }

    /// Parse a raw reply into the answer for this slot
    pub fn parse(self, raw: &str) -> Result<Answer> {
        Ok(match self {
            Question::Age => Answer::Age(parse_whole_number(raw)?),
            Question::Income => Answer::Income(parse_currency(raw)?),
            Question::CurrentSavings => Answer::CurrentSavings(parse_currency(raw)?),
            Question::MonthlySavings => Answer::MonthlySavings(parse_currency(raw)?),
            Question::RetirementAge => Answer::RetirementAge(parse_whole_number(raw)?),
            Question::RiskTolerance => Answer::RiskTolerance(parse_risk_tolerance(raw)),
            Question::RetirementGoal => Answer::RetirementGoal(parse_currency(raw)?),
        })
    }
}

pub struct QuestionnaireEngine {
    question_index: usize,
    profile: FinancialProfile,
}

impl QuestionnaireEngine {
    pub fn new() -> Self {
        Self::with_profile(FinancialProfile::new())
    }

    pub fn with_profile(profile: FinancialProfile) -> Self {
        Self {
            question_index: 0,
            profile,
        }
    }

    pub fn profile(&self) -> &FinancialProfile {
        &self.profile
    }

    pub fn question_index(&self) -> usize {
        self.question_index
    }

    pub fn current_question(&self) -> Option<Question> {
        Question::ALL.get(self.question_index).copied()
    }

    /// Current prompt, or the plan summary once every question is answered.
    /// Returns `(text, finished)`.
    pub fn ask_next_question(&mut self, engine: &CalculationEngine) -> (String, bool) {
        let Some(question) = self.current_question() else {
            if self.profile.mark_complete() {
                if let Some(snapshot) = self.profile.snapshot() {
                    return (engine.summary(&snapshot), true);
                }
            }
            // Unreachable while answers are only applied through `process_answer`.
            return ("Your profile could not be completed.".to_string(), true);
        };

        (
            format!(
                "📝 Question {}/{}: {}",
                self.question_index + 1,
                Question::ALL.len(),
                question.prompt()
            ),
            false,
        )
    }

    /// Apply a raw reply to the current question.
    pub fn process_answer(&mut self, raw: &str) -> String {
        let Some(question) = self.current_question() else {
            return ALREADY_COMPLETE.to_string();
        };

        match question.parse(raw) {
            Ok(answer) => {
                self.profile.apply(answer);
                self.question_index += 1;
                debug!(?question, question_index = self.question_index, "Answer accepted");

                if self.current_question().is_none() && self.profile.mark_complete() {
                    info!("Questionnaire complete");
                }
                ACKNOWLEDGEMENT.to_string()
            }
            Err(e) => {
                debug!(?question, error = %e, "Answer rejected");
                INVALID_NUMBER.to_string()
            }
        }
    }
}

impl Default for QuestionnaireEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RiskTolerance;

    const ANSWERS: [&str; 7] = ["35", "80000", "50000", "1000", "65", "moderate", "60000"];

    #[test]
    fn test_full_intake() {
        let engine = CalculationEngine::default();
        let mut questionnaire = QuestionnaireEngine::new();

        for answer in ANSWERS {
            let (_, finished) = questionnaire.ask_next_question(&engine);
            assert!(!finished);
            assert_eq!(questionnaire.process_answer(answer), ACKNOWLEDGEMENT);
        }

        let profile = questionnaire.profile();
        assert_eq!(profile.age(), Some(35));
        assert_eq!(profile.retirement_age(), Some(65));
        assert_eq!(profile.expected_return(), 0.07);
        assert_eq!(profile.retirement_goal(), Some(60_000.0));
        assert!(profile.is_complete());

        let (summary, finished) = questionnaire.ask_next_question(&engine);
        assert!(finished);
        assert!(summary.contains("Your Retirement Plan Summary"));
    }

    #[test]
    fn test_asking_is_idempotent() {
        let engine = CalculationEngine::default();
        let mut questionnaire = QuestionnaireEngine::new();

        for answer in &ANSWERS[..5] {
            questionnaire.process_answer(answer);
        }

        let first = questionnaire.ask_next_question(&engine);
        let second = questionnaire.ask_next_question(&engine);
        assert_eq!(first, second);
        assert_eq!(
            first.0,
            "📝 Question 6/7: What's your risk tolerance? (conservative/moderate/aggressive)"
        );
        assert!(!questionnaire.profile().is_complete());
    }

    #[test]
    fn test_invalid_answer_repeats_question() {
        let engine = CalculationEngine::default();
        let mut questionnaire = QuestionnaireEngine::new();

        let (before, _) = questionnaire.ask_next_question(&engine);
        assert_eq!(questionnaire.process_answer("thirty five"), INVALID_NUMBER);
        let (after, _) = questionnaire.ask_next_question(&engine);

        assert_eq!(before, after);
        assert_eq!(questionnaire.question_index(), 0);
        assert_eq!(questionnaire.profile().age(), None);
    }

    #[test]
    fn test_currency_and_risk_answers() {
        let mut questionnaire = QuestionnaireEngine::new();
        for answer in ["42", "$120,000", "$1,250.50", "-300", "60", "I'm aggressive", "$75,000"] {
            assert_eq!(questionnaire.process_answer(answer), ACKNOWLEDGEMENT);
        }

        let profile = questionnaire.profile();
        assert_eq!(profile.income(), Some(120_000.0));
        assert_eq!(profile.current_savings(), Some(1250.5));
        assert_eq!(profile.monthly_savings(), Some(-300.0));
        assert_eq!(profile.risk_tolerance(), RiskTolerance::Aggressive);
        assert_eq!(profile.expected_return(), 0.09);
    }

    #[test]
    fn test_answers_after_completion_are_ignored() {
        let engine = CalculationEngine::default();
        let mut questionnaire = QuestionnaireEngine::new();
        for answer in ANSWERS {
            questionnaire.process_answer(answer);
        }

        let (summary, _) = questionnaire.ask_next_question(&engine);
        assert_eq!(questionnaire.process_answer("99"), ALREADY_COMPLETE);
        assert_eq!(questionnaire.profile().age(), Some(35));
        assert_eq!(questionnaire.ask_next_question(&engine), (summary, true));
    }
}
