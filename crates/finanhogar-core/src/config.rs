use serde::{Deserialize, Serialize};

use crate::acquisition::AcquisitionCostSchedule;
use crate::FinancingResult;

/// Tunable engine parameters. Every section falls back to its default when
/// absent, so an empty document is a valid configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub acquisition_costs: AcquisitionCostSchedule,
}

impl EngineConfig {
    pub fn from_json(json: &str) -> FinancingResult<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> FinancingResult<()> {
        self.acquisition_costs.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FinancingError;
    use rust_decimal_macros::dec;

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(EngineConfig::from_json("{}").unwrap(), EngineConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let cfg = EngineConfig::from_json(
            r#"{"acquisition_costs": {"transfer_tax_rate_low": "0.1", "notary_cap": 2500}}"#,
        )
        .unwrap();
        assert_eq!(cfg.acquisition_costs.transfer_tax_rate_low, dec!(0.1));
        assert_eq!(cfg.acquisition_costs.notary_cap, dec!(2500));
        assert_eq!(cfg.acquisition_costs.registry_cap, dec!(1500));
    }

    #[test]
    fn test_invalid_schedule_rejected() {
        let err = EngineConfig::from_json(r#"{"acquisition_costs": {"appraisal_fee": -5}}"#)
            .unwrap_err();
        assert_eq!(err.field(), Some("appraisal_fee"));
    }

    #[test]
    fn test_malformed_json() {
        let err = EngineConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, FinancingError::Serialization(_)));
    }
}
