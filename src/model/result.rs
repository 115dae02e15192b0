use serde::{Deserialize, Serialize};

/// Output of the serviceability calculation for a whole application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    /// Monthly surplus (positive) or deficit (negative).
    pub net_surplus_or_deficit: f64,
    pub debt_income_ratio: f64,
    pub debt_service_ratio: f64,
    /// Percentage points added to the assessment rate.
    pub rate_buffer: f64,
    pub ath_buffered_repayments: f64,
    pub ext_buffered_debt_repayments: f64,
    #[serde(default)]
    pub applicants: Vec<ApplicantResult>,
}

/// Per-applicant income and expense figures used by the calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantResult {
    pub party_id: String,
    pub gross_income: f64,
    pub shaded_gross_taxable_income: f64,
    pub shaded_net_income: f64,
    pub declared_fixed_expenses: f64,
    pub declared_living_expenses: f64,
    pub hem: f64,
    pub higher_of_hem_or_living_expenses: f64,
    pub buffered_total_expenses: f64,
}

impl CalculationResult {
    pub fn applicant(&self, party_id: &str) -> Option<&ApplicantResult> {
        self.applicants.iter().find(|a| a.party_id == party_id)
    }

    pub fn is_surplus(&self) -> bool {
        self.net_surplus_or_deficit >= 0.0
    }
}
