use serde::{Deserialize, Serialize};

use crate::decimal::Rate;
use crate::errors::{LedgerError, Result};
use crate::rates::RateSet;

/// ledger configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// rates applied to every record, in display order
    pub fixed_rates: Vec<Rate>,
    /// initial custom rate, if any
    #[serde(default)]
    pub custom_rate: Option<Rate>,
    /// reject additions while no custom rate is set
    #[serde(default)]
    pub require_custom_rate: bool,
}

impl LedgerConfig {
    /// 24% and 18%, custom rate optional
    pub fn standard() -> Self {
        Self {
            fixed_rates: vec![Rate::from_percentage(24), Rate::from_percentage(18)],
            custom_rate: None,
            require_custom_rate: false,
        }
    }

    /// standard rates plus a required custom rate with the given starting value
    pub fn with_custom_rate(rate: Rate) -> Self {
        Self {
            custom_rate: Some(rate),
            require_custom_rate: true,
            ..Self::standard()
        }
    }

    /// parse and validate a json configuration
    pub fn from_json(json: &str) -> Result<Self> {
        let config: LedgerConfig = serde_json::from_str(json).map_err(|e| {
            LedgerError::InvalidConfiguration {
                message: e.to_string(),
            }
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.fixed_rates.is_empty() {
            return Err(LedgerError::InvalidConfiguration {
                message: "at least one fixed rate is required".to_string(),
            });
        }
        if let Some(rate) = self.fixed_rates.iter().find(|r| !r.is_positive()) {
            return Err(LedgerError::InvalidConfiguration {
                message: format!("fixed rate must be positive: {}", rate),
            });
        }
        for (i, rate) in self.fixed_rates.iter().enumerate() {
            if self.fixed_rates[..i].contains(rate) {
                return Err(LedgerError::InvalidConfiguration {
                    message: format!("duplicate fixed rate: {}", rate),
                });
            }
        }
        if let Some(rate) = self.custom_rate {
            if !rate.is_positive() {
                return Err(LedgerError::InvalidConfiguration {
                    message: format!("custom rate must be positive: {}", rate),
                });
            }
        }
        Ok(())
    }

    /// rate set seeded from this configuration
    pub fn rate_set(&self) -> RateSet {
        let mut rates = RateSet::new(self.fixed_rates.clone());
        if let Some(rate) = self.custom_rate {
            rates.set_custom(rate);
        }
        rates
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_standard_config_is_valid() {
        let config = LedgerConfig::standard();
        assert!(config.validate().is_ok());
        assert_eq!(config.rate_set(), RateSet::standard());
    }

    #[test]
    fn test_with_custom_rate() {
        let config = LedgerConfig::with_custom_rate(Rate::from_percentage(12));
        assert!(config.require_custom_rate);
        assert_eq!(config.rate_set().custom(), Some(Rate::from_percentage(12)));
    }

    #[test]
    fn test_from_json() {
        let config = LedgerConfig::from_json(
            r#"{ "fixed_rates": ["0.24", "0.18"], "require_custom_rate": true }"#,
        )
        .unwrap();

        assert_eq!(config.fixed_rates, vec![Rate::from_decimal(dec!(0.24)), Rate::from_decimal(dec!(0.18))]);
        assert_eq!(config.custom_rate, None);
        assert!(config.require_custom_rate);
    }

    #[test]
    fn test_invalid_configs() {
        assert!(matches!(
            LedgerConfig::from_json("not json"),
            Err(LedgerError::InvalidConfiguration { .. })
        ));

        let empty = LedgerConfig { fixed_rates: vec![], ..LedgerConfig::standard() };
        assert!(empty.validate().is_err());

        let negative = LedgerConfig {
            fixed_rates: vec![Rate::from_decimal(dec!(-0.1))],
            ..LedgerConfig::standard()
        };
        assert!(negative.validate().is_err());

        let duplicate = LedgerConfig {
            fixed_rates: vec![Rate::from_percentage(18), Rate::from_percentage(18)],
            ..LedgerConfig::standard()
        };
        assert!(duplicate.validate().is_err());

        let zero_custom = LedgerConfig { custom_rate: Some(Rate::ZERO), ..LedgerConfig::standard() };
        assert!(zero_custom.validate().is_err());
    }
}
