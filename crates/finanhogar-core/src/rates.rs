use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::error::FinancingError;
use crate::types::Percent;
use crate::FinancingResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum LoanType {
    Fixed,
    /// Fixed for the first years, then Euribor plus spread
    Mixed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum ClientProfile {
    CivilServant,
    Foreign,
    General,
}

/// A loan type / client profile pair and the rate it resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateProfile {
    pub loan_type: LoanType,
    pub client_profile: ClientProfile,
    pub resolved_rate: Percent,
}

impl RateProfile {
    pub fn new(loan_type: LoanType, client_profile: ClientProfile) -> Self {
        RateProfile {
            loan_type,
            client_profile,
            resolved_rate: resolve_rate(loan_type, client_profile),
        }
    }
}

/// Rate range quoted in marketing copy. Display metadata only; calculations
/// always use [`resolve_rate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateBand {
    pub low: Percent,
    pub high: Percent,
}

/// Eligibility limits of the mortgage product sold under each loan type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductTerms {
    /// Smallest down payment accepted, as a percentage of the price
    pub min_down_payment_percent: Percent,
    pub max_term_years: u32,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Representative nominal annual rate for a loan type and client profile.
///
/// | loan type | civil servant | other |
/// |-----------|---------------|-------|
/// | fixed     | 1.8           | 2.2   |
/// | mixed     | 1.4           | 1.6   |
pub fn resolve_rate(loan_type: LoanType, client_profile: ClientProfile) -> Percent {
    let rate = match (loan_type, client_profile) {
        (LoanType::Fixed, ClientProfile::CivilServant) => dec!(1.8),
        (LoanType::Fixed, _) => dec!(2.2),
        (LoanType::Mixed, ClientProfile::CivilServant) => dec!(1.4),
        (LoanType::Mixed, _) => dec!(1.6),
    };
    debug!(?loan_type, ?client_profile, %rate, "rate resolved");
    rate
}

/// Text entry point for form values such as `"fixed"` / `"civilServant"`.
pub fn resolve_rate_str(loan_type: &str, client_profile: &str) -> FinancingResult<Percent> {
    Ok(resolve_rate(loan_type.parse()?, client_profile.parse()?))
}

pub fn advertised_rate_band(loan_type: LoanType) -> RateBand {
    match loan_type {
        LoanType::Fixed => RateBand {
            low: dec!(1.8),
            high: dec!(2.4),
        },
        LoanType::Mixed => RateBand {
            low: dec!(1.4),
            high: dec!(1.7),
        },
    }
}

pub fn product_terms(loan_type: LoanType) -> ProductTerms {
    match loan_type {
        LoanType::Fixed => ProductTerms {
            min_down_payment_percent: dec!(20),
            max_term_years: 30,
        },
        LoanType::Mixed => ProductTerms {
            min_down_payment_percent: dec!(10),
            max_term_years: 35,
        },
    }
}

/// True when `rate` falls inside the advertised band of any loan type.
pub fn is_advertised_rate(rate: Percent) -> bool {
    [LoanType::Fixed, LoanType::Mixed]
        .into_iter()
        .any(|lt| advertised_rate_band(lt).contains(rate))
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Lowercases and strips `_`, `-` and spaces so `civilServant`,
/// `civil_servant` and `civil-servant` all match.
fn normalise(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

impl FromStr for LoanType {
    type Err = FinancingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalise(s).as_str() {
            "fixed" | "fijo" => Ok(LoanType::Fixed),
            "mixed" | "mixto" => Ok(LoanType::Mixed),
            _ => Err(FinancingError::invalid(
                "loan_type",
                format!("Unrecognized loan type '{s}' (expected fixed or mixed)"),
            )),
        }
    }
}

impl FromStr for ClientProfile {
    type Err = FinancingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalise(s).as_str() {
            "civilservant" | "funcionario" => Ok(ClientProfile::CivilServant),
            "foreign" | "extranjero" => Ok(ClientProfile::Foreign),
            "general" => Ok(ClientProfile::General),
            _ => Err(FinancingError::invalid(
                "client_profile",
                format!(
                    "Unrecognized client profile '{s}' (expected civil_servant, foreign or general)"
                ),
            )),
        }
    }
}

impl TryFrom<String> for LoanType {
    type Error = FinancingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<String> for ClientProfile {
    type Error = FinancingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for LoanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LoanType::Fixed => "fixed",
            LoanType::Mixed => "mixed",
        };
        write!(f, "{}", s)
    }
}

impl fmt::Display for ClientProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ClientProfile::CivilServant => "civil_servant",
            ClientProfile::Foreign => "foreign",
            ClientProfile::General => "general",
        };
        write!(f, "{}", s)
    }
}

impl RateBand {
    pub fn contains(&self, rate: Percent) -> bool {
        rate >= self.low && rate <= self.high
    }

    pub fn width(&self) -> Decimal {
        self.high - self.low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_table() {
        assert_eq!(resolve_rate(LoanType::Fixed, ClientProfile::CivilServant), dec!(1.8));
        assert_eq!(resolve_rate(LoanType::Fixed, ClientProfile::General), dec!(2.2));
        assert_eq!(resolve_rate(LoanType::Fixed, ClientProfile::Foreign), dec!(2.2));
        assert_eq!(resolve_rate(LoanType::Mixed, ClientProfile::CivilServant), dec!(1.4));
        assert_eq!(resolve_rate(LoanType::Mixed, ClientProfile::Foreign), dec!(1.6));
        assert_eq!(resolve_rate(LoanType::Mixed, ClientProfile::General), dec!(1.6));
    }

    #[test]
    fn test_string_entry_point() {
        assert_eq!(resolve_rate_str("fixed", "civilServant").unwrap(), dec!(1.8));
        assert_eq!(resolve_rate_str("mixed", "foreign").unwrap(), dec!(1.6));
        assert_eq!(resolve_rate_str("Fixed", "civil_servant").unwrap(), dec!(1.8));
    }

    #[test]
    fn test_unrecognized_values_name_the_input() {
        let err = resolve_rate_str("variable", "general").unwrap_err();
        assert_eq!(err.field(), Some("loan_type"));
        assert!(err.to_string().contains("variable"));

        let err = resolve_rate_str("fixed", "student").unwrap_err();
        assert_eq!(err.field(), Some("client_profile"));
        assert!(err.to_string().contains("student"));
    }

    #[test]
    fn test_serde_rejects_unknown_profile() {
        let ok: ClientProfile = serde_json::from_str("\"civilServant\"").unwrap();
        assert_eq!(ok, ClientProfile::CivilServant);
        assert!(serde_json::from_str::<ClientProfile>("\"retired\"").is_err());
    }

    #[test]
    fn test_resolved_rate_sits_at_band_floor_or_inside() {
        for lt in [LoanType::Fixed, LoanType::Mixed] {
            let band = advertised_rate_band(lt);
            let profiles = [
                ClientProfile::CivilServant,
                ClientProfile::Foreign,
                ClientProfile::General,
            ];
            for cp in profiles {
                assert!(band.contains(resolve_rate(lt, cp)));
            }
        }
        assert_eq!(advertised_rate_band(LoanType::Fixed).width(), dec!(0.6));
    }

    #[test]
    fn test_advertised_rate_check() {
        assert!(is_advertised_rate(dec!(1.5)));
        assert!(is_advertised_rate(dec!(2.4)));
        assert!(!is_advertised_rate(dec!(1.75)));
        assert!(!is_advertised_rate(dec!(3.45)));
    }

    #[test]
    fn test_fixed_product_is_stricter_than_mixed() {
        let fixed = product_terms(LoanType::Fixed);
        let mixed = product_terms(LoanType::Mixed);
        assert!(fixed.min_down_payment_percent > mixed.min_down_payment_percent);
        assert_eq!((fixed.max_term_years, mixed.max_term_years), (30, 35));
    }

    #[test]
    fn test_rate_profile_new() {
        let p = RateProfile::new(LoanType::Fixed, ClientProfile::General);
        assert_eq!(p.resolved_rate, dec!(2.2));
    }
}
