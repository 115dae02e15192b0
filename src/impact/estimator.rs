//! Placeholder surplus impact estimates.
//!
//! Each estimate is a fixed-ratio rule of thumb shown next to a change log
//! entry. None of them is a serviceability calculation; the calculator
//! result is the only authoritative surplus.

use super::types::ImpactRules;

/// Round half up, matching how the figures were always displayed.
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

#[derive(Debug, Clone)]
pub struct ImpactEstimator {
    rules: ImpactRules,
}

impl ImpactEstimator {
    pub fn new(rules: ImpactRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &ImpactRules {
        &self.rules
    }

    /// Monthly surplus change for a loan amount change; reductions are
    /// positive.
    pub fn loan_amount_change(&self, old_amount: f64, new_amount: f64) -> f64 {
        let rule = &self.rules.loan_amount;
        round_half_up((old_amount - new_amount) / rule.step) * rule.surplus_per_step
    }

    /// Monthly surplus freed by paying out a debt with the given limit.
    pub fn debt_payout(&self, limit_value: f64) -> f64 {
        round_half_up(limit_value * self.rules.debt_payout.limit_ratio)
    }

    pub fn rental_added(&self, amount: f64) -> f64 {
        let rule = &self.rules.rental_income;
        round_half_up(amount * rule.shading * rule.net_ratio)
    }

    pub fn rental_removed(&self, amount: f64) -> f64 {
        -self.rental_added(amount)
    }
}

impl Default for ImpactEstimator {
    fn default() -> Self {
        Self::new(super::default_rules())
    }
}
