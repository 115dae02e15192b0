//! TOML rule loading for the impact estimator.
//!
//! - `default_rules()` returns the rules compiled into the binary
//! - `load_rules(path)` reads an override file

use anyhow::{Context, Result};
use std::path::Path;

use super::types::ImpactRules;

/// Loaded from `config/impact_rules.toml` at compile time.
const DEFAULT_RULES: &str = include_str!("../../config/impact_rules.toml");

/// Load rules from a TOML file at the given path.
pub fn load_rules(path: &Path) -> Result<ImpactRules> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read impact rules {:?}", path))?;
    let rules: ImpactRules = toml::from_str(&content)
        .with_context(|| format!("Invalid impact rules in {:?}", path))?;
    Ok(rules)
}

/// The embedded default rules.
///
/// # Panics
/// Panics if the embedded TOML is invalid (a build-time bug).
pub fn default_rules() -> ImpactRules {
    toml::from_str(DEFAULT_RULES).expect("embedded impact_rules.toml must be valid TOML")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_rules_values() {
        let rules = default_rules();
        assert_eq!(rules.loan_amount.step, 100.0);
        assert_eq!(rules.loan_amount.surplus_per_step, 8.0);
        assert_eq!(rules.debt_payout.limit_ratio, 0.03);
        assert_eq!(rules.rental_income.shading, 0.8);
        assert_eq!(rules.rental_income.net_ratio, 0.6);
    }

    #[test]
    fn test_load_rules_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[loan_amount]
step = 1000.0
surplus_per_step = 70.0

[debt_payout]
limit_ratio = 0.038

[rental_income]
shading = 0.75
net_ratio = 0.5
"#
        )
        .unwrap();

        let rules = load_rules(file.path()).unwrap();
        assert_eq!(rules.loan_amount.step, 1000.0);
        assert_eq!(rules.debt_payout.limit_ratio, 0.038);
        assert_eq!(rules.rental_income.shading, 0.75);
    }

    #[test]
    fn test_load_rules_rejects_incomplete_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[loan_amount]\nstep = 100.0\n").unwrap();
        assert!(load_rules(file.path()).is_err());
    }
}
