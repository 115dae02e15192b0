//! Rule tables for the surplus impact heuristics.

use serde::{Deserialize, Serialize};

/// Root configuration loaded from impact_rules.toml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactRules {
    pub loan_amount: LoanAmountRule,
    pub debt_payout: DebtPayoutRule,
    pub rental_income: RentalIncomeRule,
}

/// Surplus change per fixed step of loan amount change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanAmountRule {
    /// Dollars of loan per step (e.g. 100.0)
    pub step: f64,
    /// Monthly surplus per step (e.g. 8.0)
    pub surplus_per_step: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtPayoutRule {
    /// Fraction of the debt's limit freed up each month when paid out
    pub limit_ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentalIncomeRule {
    /// Fraction of rental income counted (e.g. 0.8)
    pub shading: f64,
    /// Fraction of the shaded income left after costs (e.g. 0.6)
    pub net_ratio: f64,
}
