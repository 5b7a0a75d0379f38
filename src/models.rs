//! Core data models for the retirement advisor

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::calculations::PlanningAssumptions;

//
// ================= Enums =================
//

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RiskTolerance {
    Conservative,
    #[default]
    Moderate,
    Aggressive,
}

impl RiskTolerance {
    /// Annual return assumed for this risk appetite
    pub fn expected_return(self) -> f64 {
        match self {
            RiskTolerance::Conservative => 0.05,
            RiskTolerance::Moderate => 0.07,
            RiskTolerance::Aggressive => 0.09,
        }
    }
}

impl fmt::Display for RiskTolerance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RiskTolerance::Conservative => "conservative",
            RiskTolerance::Moderate => "moderate",
            RiskTolerance::Aggressive => "aggressive",
        };
        write!(f, "{}", s)
    }
}

//
// ================= Answers =================
//

/// A parsed questionnaire answer, tagged with the field it fills.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Answer {
    Age(u32),
    Income(f64),
    CurrentSavings(f64),
    MonthlySavings(f64),
    RetirementAge(u32),
    RiskTolerance(RiskTolerance),
    RetirementGoal(f64),
}

//
// ================= Profile =================
//

/// The user's financial inputs, filled one answer at a time.
#[derive(Debug, Clone, Serialize)]
pub struct FinancialProfile {
    age: Option<u32>,
    income: Option<f64>,
    current_savings: Option<f64>,
    monthly_savings: Option<f64>,
    retirement_age: Option<u32>,
    expected_return: f64,
    inflation_rate: f64,
    risk_tolerance: RiskTolerance,
    retirement_goal: Option<f64>,
    is_complete: bool,
}

impl FinancialProfile {
    pub fn new() -> Self {
        Self::with_assumptions(&PlanningAssumptions::default())
    }

    pub fn with_assumptions(assumptions: &PlanningAssumptions) -> Self {
        Self {
            age: None,
            income: None,
            current_savings: None,
            monthly_savings: None,
            retirement_age: None,
            expected_return: assumptions.default_expected_return,
            inflation_rate: assumptions.inflation_rate,
            risk_tolerance: RiskTolerance::default(),
            retirement_goal: None,
            is_complete: false,
        }
    }

    pub fn age(&self) -> Option<u32> {
        self.age
    }

    pub fn income(&self) -> Option<f64> {
        self.income
    }

    pub fn current_savings(&self) -> Option<f64> {
        self.current_savings
    }

    pub fn monthly_savings(&self) -> Option<f64> {
        self.monthly_savings
    }

    pub fn retirement_age(&self) -> Option<u32> {
        self.retirement_age
    }

    pub fn expected_return(&self) -> f64 {
        self.expected_return
    }

    pub fn inflation_rate(&self) -> f64 {
        self.inflation_rate
    }

    pub fn risk_tolerance(&self) -> RiskTolerance {
        self.risk_tolerance
    }

    pub fn retirement_goal(&self) -> Option<f64> {
        self.retirement_goal
    }

    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    /// Assign one answer. A completed profile is read-only, so this is a
    /// no-op returning `false` once `is_complete` is set.
    pub(crate) fn apply(&mut self, answer: Answer) -> bool {
        if self.is_complete {
            return false;
        }

        match answer {
            Answer::Age(v) => self.age = Some(v),
            Answer::Income(v) => self.income = Some(v),
            Answer::CurrentSavings(v) => self.current_savings = Some(v),
            Answer::MonthlySavings(v) => self.monthly_savings = Some(v),
            Answer::RetirementAge(v) => self.retirement_age = Some(v),
            Answer::RiskTolerance(risk) => {
                self.risk_tolerance = risk;
                self.expected_return = risk.expected_return();
            }
            Answer::RetirementGoal(v) => self.retirement_goal = Some(v),
        }
        true
    }

    /// Flag the profile complete if every field has been filled.
    pub(crate) fn mark_complete(&mut self) -> bool {
        if !self.is_complete && self.filled().is_some() {
            self.is_complete = true;
        }
        self.is_complete
    }

    /// Read-only view of a completed profile
    pub fn snapshot(&self) -> Option<ProfileSnapshot> {
        if !self.is_complete {
            return None;
        }
        self.filled()
    }

    fn filled(&self) -> Option<ProfileSnapshot> {
        Some(ProfileSnapshot {
            age: self.age?,
            income: self.income?,
            current_savings: self.current_savings?,
            monthly_savings: self.monthly_savings?,
            retirement_age: self.retirement_age?,
            expected_return: self.expected_return,
            inflation_rate: self.inflation_rate,
            risk_tolerance: self.risk_tolerance,
            retirement_goal: self.retirement_goal?,
        })
    }
}

impl Default for FinancialProfile {
    fn default() -> Self {
        Self::new()
    }
}

/// Every field of a completed profile
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ProfileSnapshot {
    pub age: u32,
    pub income: f64,
    pub current_savings: f64,
    pub monthly_savings: f64,
    pub retirement_age: u32,
    pub expected_return: f64,
    pub inflation_rate: f64,
    pub risk_tolerance: RiskTolerance,
    pub retirement_goal: f64,
}

impl ProfileSnapshot {
    /// May be negative when the retirement age is already behind the user.
    pub fn years_to_retirement(&self) -> i64 {
        i64::from(self.retirement_age) - i64::from(self.age)
    }
}
