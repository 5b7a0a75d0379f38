//! Retirement Advisor
//!
//! A conversational retirement-planning calculator that:
//! - Collects a financial profile through a fixed questionnaire
//! - Answers planning questions with closed-form time-value-of-money math
//! - Falls back to a language model for anything it cannot calculate
//! - Turns every failure into a readable reply instead of an error
//!
//! FLOW:
//! INPUT → QUESTIONNAIRE → PROFILE COMPLETE → CLASSIFY → CALCULATE | DELEGATE

pub mod agent;
pub mod api;
pub mod calculations;
pub mod classifier;
pub mod config;
pub mod conversational;
pub mod error;
pub mod formatting;
pub mod formulas;
pub mod gemini;
pub mod models;
pub mod parsing;
pub mod questionnaire;

pub use error::Result;

// Re-export common types
pub use agent::{AdvisorSession, QuickAction};
pub use calculations::{CalculationEngine, PlanningAssumptions};
pub use classifier::{Intent, IntentClassifier};
pub use models::*;
