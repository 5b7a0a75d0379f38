//! Time-value-of-money formulas
//!
//! Pure, deterministic functions over `f64`. Nothing here rounds; rendering
//! is left to the caller.

use crate::error::AdvisorError;
use crate::Result;

/// Outcome of a period-count solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Periods {
    Finite(f64),
    /// No real solution: the balance never reaches the target.
    Unreachable,
}

/// Outcome of a horizon calculation (retirement age, savings longevity).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Horizon {
    Feasible(f64),
    /// The target is never reached with the current plan.
    NoSolution,
    /// Withdrawals never exhaust the balance.
    GrowsWithoutBound,
}

impl Horizon {
    pub fn value(self) -> Option<f64> {
        match self {
            Horizon::Feasible(v) => Some(v),
            Horizon::NoSolution | Horizon::GrowsWithoutBound => None,
        }
    }
}

/// FV = PV × (1 + r)^n
pub fn future_value(pv: f64, rate: f64, n: f64) -> f64 {
    pv * (1.0 + rate).powf(n)
}

/// PV = FV / (1 + r)^n
pub fn present_value(fv: f64, rate: f64, n: f64) -> f64 {
    fv / (1.0 + rate).powf(n)
}

/// FV = PMT × [(1 + r)^n − 1] / r
pub fn fv_annuity(pmt: f64, rate: f64, n: f64) -> f64 {
    if rate == 0.0 {
        return pmt * n;
    }
    pmt * ((1.0 + rate).powf(n) - 1.0) / rate
}

/// PV = PMT × [1 − (1 + r)^−n] / r
pub fn pv_annuity(pmt: f64, rate: f64, n: f64) -> f64 {
    if rate == 0.0 {
        return pmt * n;
    }
    pmt * (1.0 - (1.0 + rate).powf(-n)) / rate
}

/// Number of periods to move from `pv` to `fv` under a periodic payment
/// `pmt` (spreadsheet NPER sign convention: money paid out is negative).
pub fn nper(rate: f64, pmt: f64, pv: f64, fv: f64) -> Result<Periods> {
    if rate == 0.0 {
        if pmt == 0.0 {
            return Err(AdvisorError::Calculation(
                "payment must be non-zero when the rate is zero".to_string(),
            ));
        }
        return Ok(Periods::Finite(-(fv + pv) / pmt));
    }

    let denominator = pmt + pv * rate;
    if denominator == 0.0 {
        return Err(AdvisorError::Calculation(
            "payment exactly offsets interest on the present value".to_string(),
        ));
    }

    let numerator = (pmt - fv * rate) / denominator;
    if numerator <= 0.0 {
        return Ok(Periods::Unreachable);
    }

    Ok(Periods::Finite(numerator.ln() / (1.0 + rate).ln()))
}

/// Years ≈ 72 / rate%. Callers must guard `rate_percent != 0`.
pub fn rule_of_72(rate_percent: f64) -> f64 {
    72.0 / rate_percent
}

/// Age at which `current_savings` plus `monthly_savings` contributions reach
/// `target_amount`.
pub fn calculate_retirement_age(
    current_age: f64,
    current_savings: f64,
    monthly_savings: f64,
    target_amount: f64,
    annual_return: f64,
) -> Result<Horizon> {
    let monthly_rate = annual_return / 12.0;
    let months = nper(monthly_rate, -monthly_savings, -current_savings, target_amount)?;

    Ok(match months {
        Periods::Finite(m) if m >= 0.0 => Horizon::Feasible(current_age + m / 12.0),
        _ => Horizon::NoSolution,
    })
}

/// Years until `initial_amount` is drawn down to zero by
/// `monthly_withdrawal`.
pub fn calculate_savings_longevity(
    initial_amount: f64,
    monthly_withdrawal: f64,
    annual_return: f64,
) -> Result<Horizon> {
    let monthly_rate = annual_return / 12.0;
    let months = nper(monthly_rate, monthly_withdrawal, -initial_amount, 0.0)?;

    Ok(match months {
        Periods::Finite(m) if m >= 0.0 => Horizon::Feasible(m / 12.0),
        _ => Horizon::GrowsWithoutBound,
    })
}

/// Monthly contribution that grows to `target_amount` over `years`.
pub fn monthly_savings_needed(target_amount: f64, years: f64, annual_return: f64) -> Result<f64> {
    let monthly_rate = annual_return / 12.0;
    let months = years * 12.0;

    if months == 0.0 {
        return Err(AdvisorError::Calculation(
            "cannot spread savings over zero months".to_string(),
        ));
    }

    if monthly_rate == 0.0 {
        return Ok(target_amount / months);
    }

    // PMT = FV × r / [(1 + r)^n − 1]
    Ok(target_amount * monthly_rate / ((1.0 + monthly_rate).powf(months) - 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert, prop_assert_eq, proptest};

    fn round2(v: f64) -> f64 {
        (v * 100.0).round() / 100.0
    }

    #[test]
    fn test_future_and_present_value() {
        assert_eq!(round2(future_value(1000.0, 0.06, 10.0)), 1790.85);
        assert_eq!(future_value(1000.0, 0.0, 10.0), 1000.0);
        assert_eq!(round2(present_value(1790.85, 0.06, 10.0)), 1000.0);
    }

    #[test]
    fn test_annuities() {
        assert_eq!(round2(fv_annuity(100.0, 0.005, 12.0)), 1233.56);
        assert_eq!(round2(pv_annuity(100.0, 0.005, 12.0)), 1161.89);
        assert_eq!(fv_annuity(100.0, 0.0, 12.0), 1200.0);
        assert_eq!(pv_annuity(100.0, 0.0, 12.0), 1200.0);
    }

    #[test]
    fn test_nper() {
        match nper(0.06, 0.0, -1000.0, 2000.0).unwrap() {
            Periods::Finite(n) => assert_eq!(round2(n), 11.9),
            other => panic!("expected finite periods, got {:?}", other),
        }
        assert_eq!(nper(0.0, 100.0, -1000.0, 0.0).unwrap(), Periods::Finite(10.0));
    }

    #[test]
    fn test_nper_degenerate_inputs() {
        assert!(nper(0.0, 0.0, -1000.0, 0.0).is_err());
        // pmt + pv*rate == 0
        assert!(nper(0.01, 10.0, -1000.0, 0.0).is_err());
    }

    #[test]
    fn test_rule_of_72() {
        assert_eq!(rule_of_72(6.0), 12.0);
        assert_eq!(rule_of_72(8.0), 9.0);
    }

    #[test]
    fn test_calculate_retirement_age() {
        let age = calculate_retirement_age(30.0, 10_000.0, 500.0, 500_000.0, 0.07)
            .unwrap()
            .value()
            .expect("plan should be feasible");
        assert!(age > 30.0 && age < 70.0, "got {age}");
    }

    #[test]
    fn test_negative_contribution_never_retires() {
        let result = calculate_retirement_age(30.0, 1000.0, -100.0, 1_000_000.0, 0.07).unwrap();
        assert_eq!(result, Horizon::NoSolution);
    }

    #[test]
    fn test_calculate_savings_longevity() {
        let years = calculate_savings_longevity(400_000.0, 3000.0, 0.05)
            .unwrap()
            .value()
            .unwrap();
        assert!(years > 15.0 && years < 25.0, "got {years}");

        let drained = calculate_savings_longevity(100_000.0, 10_000.0, 0.05).unwrap();
        assert!(matches!(drained, Horizon::Feasible(_)));
    }

    #[test]
    fn test_savings_longevity_with_withdrawals_below_growth() {
        // 4% rule corpus at 7% return: interest outpaces withdrawals.
        let result = calculate_savings_longevity(1_500_000.0, 5000.0, 0.07).unwrap();
        assert_eq!(result, Horizon::GrowsWithoutBound);
    }

    #[test]
    fn test_monthly_savings_needed() {
        let pmt = monthly_savings_needed(1_000_000.0, 25.0, 0.07).unwrap();
        assert!(pmt > 1000.0 && pmt < 1500.0, "got {pmt}");
        assert_eq!(monthly_savings_needed(12_000.0, 1.0, 0.0).unwrap(), 1000.0);
        assert!(monthly_savings_needed(12_000.0, 0.0, 0.07).is_err());
    }

    #[test]
    fn test_real_world_projection() {
        let months = 30.0 * 12.0;
        let monthly_rate = 0.07 / 12.0;
        let total = future_value(50_000.0, monthly_rate, months)
            + fv_annuity(1000.0, monthly_rate, months);
        assert!(total > 1_600_000.0);

        let age = calculate_retirement_age(35.0, 50_000.0, 1000.0, 1_000_000.0, 0.07)
            .unwrap()
            .value()
            .unwrap();
        assert!(age < 65.0);
    }

    proptest! {
        #[test]
        fn prop_zero_rate_future_value_is_identity(pv in -1.0e7f64..1.0e7, n in 0u32..600) {
            prop_assert_eq!(future_value(pv, 0.0, n as f64), pv);
        }

        #[test]
        fn prop_present_value_inverts_future_value(
            pv in -1.0e6f64..1.0e6,
            rate_bp in -5000i32..5000,
            n in 0u32..60,
        ) {
            let rate = rate_bp as f64 / 10_000.0;
            let back = present_value(future_value(pv, rate, n as f64), rate, n as f64);
            prop_assert!((back - pv).abs() <= 1e-6 * pv.abs().max(1.0));
        }

        #[test]
        fn prop_zero_rate_annuities_are_linear(pmt in -1.0e5f64..1.0e5, n in 0u32..600) {
            prop_assert_eq!(fv_annuity(pmt, 0.0, n as f64), pmt * n as f64);
            prop_assert_eq!(pv_annuity(pmt, 0.0, n as f64), pmt * n as f64);
        }

        #[test]
        fn prop_rule_of_72_decreases_with_rate(r in 0.01f64..50.0, step in 0.01f64..10.0) {
            prop_assert!(rule_of_72(r + step) < rule_of_72(r));
        }

        #[test]
        fn prop_nper_unreachable_when_target_outruns_payments(
            rate_bp in 10i32..2000,
            pmt in 1.0f64..1000.0,
            pv in 0.0f64..100_000.0,
            stretch in 1.01f64..10.0,
        ) {
            let rate = rate_bp as f64 / 10_000.0;
            // pmt - fv*rate < 0 while pmt + pv*rate > 0
            let fv = pmt / rate * stretch;
            prop_assert_eq!(nper(rate, pmt, pv, fv).unwrap(), Periods::Unreachable);
        }
    }
}
