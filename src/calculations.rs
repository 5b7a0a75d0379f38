//! Calculation engine
//!
//! Answers the recognised planning questions from a completed profile.
//! Deterministic: the LLM never takes part here.

use serde::Serialize;
use tracing::debug;

use crate::classifier::Intent;
use crate::error::AdvisorError;
use crate::formatting::{currency, one_decimal, percent};
use crate::formulas::{self, Horizon};
use crate::models::ProfileSnapshot;
use crate::Result;

/// Planning constants shared by every calculation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanningAssumptions {
    /// Safe annual withdrawal rate used to size the retirement corpus
    pub withdrawal_rate: f64,
    /// Return used before a risk tolerance is given
    pub default_expected_return: f64,
    pub inflation_rate: f64,
}

impl Default for PlanningAssumptions {
    fn default() -> Self {
        Self {
            withdrawal_rate: 0.04,
            default_expected_return: 0.07,
            inflation_rate: 0.03,
        }
    }
}

/// Where the current plan lands at the target retirement age
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct RetirementProjection {
    pub years_to_retirement: i64,
    pub total_at_retirement: f64,
    pub needed_amount: f64,
    pub surplus_deficit: f64,
}

impl RetirementProjection {
    pub fn on_track(&self) -> bool {
        self.surplus_deficit >= 0.0
    }
}

/// Headline numbers for a profile panel
#[derive(Debug, Clone, Serialize)]
pub struct ProfileOverview {
    pub profile: ProfileSnapshot,
    pub years_to_retirement: i64,
    pub doubling_time_years: Option<f64>,
    pub projection: RetirementProjection,
}

pub struct CalculationEngine {
    assumptions: PlanningAssumptions,
}

impl CalculationEngine {
    pub fn new(assumptions: PlanningAssumptions) -> Self {
        Self { assumptions }
    }

    pub fn assumptions(&self) -> &PlanningAssumptions {
        &self.assumptions
    }

    /// Corpus that sustains the income goal at the withdrawal rate
    pub fn target_corpus(&self, profile: &ProfileSnapshot) -> f64 {
        profile.retirement_goal / self.assumptions.withdrawal_rate
    }

    pub fn project(&self, profile: &ProfileSnapshot) -> RetirementProjection {
        let years_to_retirement = profile.years_to_retirement();
        let months = (years_to_retirement * 12) as f64;
        let monthly_rate = profile.expected_return / 12.0;

        let future_current = formulas::future_value(profile.current_savings, monthly_rate, months);
        let future_monthly = formulas::fv_annuity(profile.monthly_savings, monthly_rate, months);
        let total_at_retirement = future_current + future_monthly;
        let needed_amount = self.target_corpus(profile);

        RetirementProjection {
            years_to_retirement,
            total_at_retirement,
            needed_amount,
            surplus_deficit: total_at_retirement - needed_amount,
        }
    }

    pub fn overview(&self, profile: &ProfileSnapshot) -> ProfileOverview {
        let years_to_retirement = profile.years_to_retirement();
        let doubling_time_years = (years_to_retirement > 0 && profile.expected_return > 0.0)
            .then(|| formulas::rule_of_72(profile.expected_return * 100.0));

        ProfileOverview {
            profile: *profile,
            years_to_retirement,
            doubling_time_years,
            projection: self.project(profile),
        }
    }

    /// Plan summary shown once the questionnaire is finished
    pub fn summary(&self, profile: &ProfileSnapshot) -> String {
        let projection = self.project(profile);
        let status = if projection.on_track() {
            "✅ On track!"
        } else {
            "⚠️ Need to save more"
        };

        format!(
            "**Your Retirement Plan Summary**\n\n\
             **Current Situation:**\n\
             - Age: {age}\n\
             - Years to retirement: {years}\n\
             - Current savings: {savings}\n\
             - Monthly savings: {monthly}\n\
             - Expected return: {rate}\n\n\
             **Projected Results:**\n\
             - Total at retirement: {total}\n\
             - Amount needed for {goal}/year: {needed}\n\
             - Surplus/Deficit: {surplus}\n\n\
             **Status:** {status}\n\n\
             You can now ask me questions like:\n\
             - \"When can I retire if I save more?\"\n\
             - \"How long will my money last in retirement?\"\n\
             - \"What if inflation is higher?\"",
            age = profile.age,
            years = projection.years_to_retirement,
            savings = currency(profile.current_savings),
            monthly = currency(profile.monthly_savings),
            rate = percent(profile.expected_return),
            total = currency(projection.total_at_retirement),
            goal = currency(profile.retirement_goal),
            needed = currency(projection.needed_amount),
            surplus = currency(projection.surplus_deficit),
            status = status,
        )
    }

    /// Answer a recognised intent
    pub fn answer(&self, intent: Intent, profile: &ProfileSnapshot) -> Result<String> {
        debug!(?intent, "Running calculation");

        match intent {
            Intent::RetirementAge => self.retirement_age(profile),
            Intent::SavingsLongevity => self.savings_longevity(profile),
            Intent::RuleOf72 => self.rule_of_72(profile),
            Intent::MonthlySavings => self.monthly_savings(profile),
        }
    }

    fn retirement_age(&self, profile: &ProfileSnapshot) -> Result<String> {
        let horizon = formulas::calculate_retirement_age(
            f64::from(profile.age),
            profile.current_savings,
            profile.monthly_savings,
            self.target_corpus(profile),
            profile.expected_return,
        )?;

        Ok(match horizon {
            Horizon::Feasible(age) => format!(
                "Based on your current savings plan, you can retire at age {}",
                one_decimal(ensure_finite(age)?)
            ),
            Horizon::NoSolution | Horizon::GrowsWithoutBound => {
                "You may need to save more or adjust your retirement goals to reach your target."
                    .to_string()
            }
        })
    }

    fn savings_longevity(&self, profile: &ProfileSnapshot) -> Result<String> {
        let horizon = formulas::calculate_savings_longevity(
            self.target_corpus(profile),
            profile.retirement_goal / 12.0,
            profile.expected_return,
        )?;

        Ok(match horizon {
            Horizon::Feasible(years) => format!(
                "Your savings would last approximately {} years in retirement.",
                one_decimal(ensure_finite(years)?)
            ),
            Horizon::GrowsWithoutBound | Horizon::NoSolution => {
                "Your savings should last indefinitely with proper management!".to_string()
            }
        })
    }

    fn rule_of_72(&self, profile: &ProfileSnapshot) -> Result<String> {
        let rate_percent = profile.expected_return * 100.0;
        if rate_percent == 0.0 {
            return Err(AdvisorError::Calculation(
                "a zero return never doubles".to_string(),
            ));
        }

        let years = formulas::rule_of_72(rate_percent);
        Ok(format!(
            "With a {}% return, your investment will double in approximately {} years.",
            one_decimal(rate_percent),
            one_decimal(years)
        ))
    }

    fn monthly_savings(&self, profile: &ProfileSnapshot) -> Result<String> {
        let needed = formulas::monthly_savings_needed(
            self.target_corpus(profile),
            profile.years_to_retirement() as f64,
            profile.expected_return,
        )?;

        Ok(format!(
            "To reach your retirement goal, you should save approximately {} per month.",
            currency(ensure_finite(needed)?)
        ))
    }
}

impl Default for CalculationEngine {
    fn default() -> Self {
        Self::new(PlanningAssumptions::default())
    }
}

fn ensure_finite(value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(AdvisorError::Calculation(format!(
            "result is not a finite number ({})",
            value
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RiskTolerance;

    fn sample_profile() -> ProfileSnapshot {
        ProfileSnapshot {
            age: 35,
            income: 80_000.0,
            current_savings: 50_000.0,
            monthly_savings: 1000.0,
            retirement_age: 65,
            expected_return: 0.07,
            inflation_rate: 0.03,
            risk_tolerance: RiskTolerance::Moderate,
            retirement_goal: 60_000.0,
        }
    }

    #[test]
    fn test_projection() {
        let engine = CalculationEngine::default();
        let projection = engine.project(&sample_profile());

        assert_eq!(projection.years_to_retirement, 30);
        assert_eq!(projection.needed_amount, 1_500_000.0);
        assert!(projection.total_at_retirement > 1_600_000.0);
        assert!(projection.on_track());
        assert!(
            (projection.surplus_deficit
                - (projection.total_at_retirement - projection.needed_amount))
                .abs()
                < 1e-9
        );
    }

    #[test]
    fn test_summary_mentions_status() {
        let engine = CalculationEngine::default();
        let summary = engine.summary(&sample_profile());
        assert!(summary.contains("Years to retirement: 30"));
        assert!(summary.contains("$1,500,000.00"));
        assert!(summary.contains("On track"));
        assert!(summary.contains("When can I retire if I save more?"));
        assert!(summary.contains("What if inflation is higher?"));

        let mut short = sample_profile();
        short.monthly_savings = 0.0;
        short.current_savings = 0.0;
        assert!(engine.summary(&short).contains("Need to save more"));
    }

    #[test]
    fn test_retirement_age_answer() {
        let engine = CalculationEngine::default();
        let answer = engine.answer(Intent::RetirementAge, &sample_profile()).unwrap();
        assert!(answer.starts_with("Based on your current savings plan, you can retire at age "));

        let age: f64 = answer
            .trim_start_matches("Based on your current savings plan, you can retire at age ")
            .parse()
            .unwrap();
        assert!(age > 35.0 && age < 65.0, "got {age}");
    }

    #[test]
    fn test_retirement_age_infeasible() {
        let engine = CalculationEngine::default();
        let mut profile = sample_profile();
        profile.current_savings = 1000.0;
        profile.monthly_savings = -100.0;

        let answer = engine.answer(Intent::RetirementAge, &profile).unwrap();
        assert!(answer.contains("save more or adjust your retirement goals"));
    }

    #[test]
    fn test_longevity_of_four_percent_corpus_is_indefinite() {
        let engine = CalculationEngine::default();
        let answer = engine.answer(Intent::SavingsLongevity, &sample_profile()).unwrap();
        assert_eq!(answer, "Your savings should last indefinitely with proper management!");
    }

    #[test]
    fn test_longevity_with_aggressive_withdrawal_rate() {
        let engine = CalculationEngine::new(PlanningAssumptions {
            withdrawal_rate: 0.10,
            ..PlanningAssumptions::default()
        });
        let answer = engine.answer(Intent::SavingsLongevity, &sample_profile()).unwrap();
        assert!(answer.starts_with("Your savings would last approximately "));
    }

    #[test]
    fn test_rule_of_72_answer() {
        let engine = CalculationEngine::default();
        let mut profile = sample_profile();
        profile.expected_return = 0.08;
        let answer = engine.answer(Intent::RuleOf72, &profile).unwrap();
        assert_eq!(
            answer,
            "With a 8.0% return, your investment will double in approximately 9.0 years."
        );

        profile.expected_return = 0.0;
        assert!(engine.answer(Intent::RuleOf72, &profile).is_err());
    }

    #[test]
    fn test_monthly_savings_answer() {
        let engine = CalculationEngine::default();
        let answer = engine.answer(Intent::MonthlySavings, &sample_profile()).unwrap();
        assert!(answer.starts_with("To reach your retirement goal, you should save approximately $"));

        let mut retired = sample_profile();
        retired.retirement_age = retired.age;
        assert!(engine.answer(Intent::MonthlySavings, &retired).is_err());
    }

    #[test]
    fn test_overview_doubling_time() {
        let engine = CalculationEngine::default();
        let overview = engine.overview(&sample_profile());
        assert_eq!(overview.years_to_retirement, 30);
        let doubling = overview.doubling_time_years.unwrap();
        assert!((doubling - 72.0 / 7.0).abs() < 1e-9);

        let mut late = sample_profile();
        late.retirement_age = 30;
        assert!(engine.overview(&late).doubling_time_years.is_none());
    }
}
