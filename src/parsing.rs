//! Free-text answer parsing
//!
//! Turns raw chat input into typed values for the questionnaire.

use crate::error::AdvisorError;
use crate::models::RiskTolerance;
use crate::Result;

/// Parse a whole number such as an age.
pub fn parse_whole_number(raw: &str) -> Result<u32> {
    let trimmed = raw.trim();
    trimmed
        .parse::<u32>()
        .map_err(|_| AdvisorError::InvalidAnswer(format!("'{}' is not a whole number", trimmed)))
}

/// Parse a dollar amount, ignoring `$` and `,` characters.
pub fn parse_currency(raw: &str) -> Result<f64> {
    let cleaned: String = raw.chars().filter(|c| !matches!(c, '$' | ',')).collect();
    let cleaned = cleaned.trim();

    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(AdvisorError::InvalidAnswer(format!(
            "'{}' is not an amount",
            raw.trim()
        ))),
    }
}

/// Keyword match on free text; anything unrecognised is moderate.
pub fn parse_risk_tolerance(raw: &str) -> RiskTolerance {
    let lowered = raw.to_lowercase();
    if lowered.contains("conservative") {
        RiskTolerance::Conservative
    } else if lowered.contains("aggressive") {
        RiskTolerance::Aggressive
    } else {
        RiskTolerance::Moderate
    }
}
