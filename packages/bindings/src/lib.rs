use napi::Result as NapiResult;
use napi_derive::napi;

use finanhogar_core::rates::{self, ClientProfile, LoanType, RateProfile};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Mortgage & closing costs
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_mortgage(input_json: String) -> NapiResult<String> {
    let input: finanhogar_core::mortgage::MortgageInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        finanhogar_core::mortgage::calculate_mortgage(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn estimate_acquisition_costs(input_json: String) -> NapiResult<String> {
    let input: finanhogar_core::acquisition::AcquisitionCostInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = finanhogar_core::acquisition::estimate_acquisition_costs(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Affordability
// ---------------------------------------------------------------------------

#[napi]
pub fn assess_affordability(input_json: String) -> NapiResult<String> {
    let input: finanhogar_core::affordability::AffordabilityInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = finanhogar_core::affordability::assess_affordability(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Rates
// ---------------------------------------------------------------------------

/// Takes the raw form values, e.g. `("fixed", "civilServant")`.
#[napi]
pub fn resolve_rate(loan_type: String, client_profile: String) -> NapiResult<String> {
    let loan_type: LoanType = loan_type.parse().map_err(to_napi_error)?;
    let client_profile: ClientProfile = client_profile.parse().map_err(to_napi_error)?;
    serde_json::to_string(&RateProfile::new(loan_type, client_profile)).map_err(to_napi_error)
}

#[napi]
pub fn advertised_rate_band(loan_type: String) -> NapiResult<String> {
    let loan_type: LoanType = loan_type.parse().map_err(to_napi_error)?;
    serde_json::to_string(&rates::advertised_rate_band(loan_type)).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Simulator & investors
// ---------------------------------------------------------------------------

#[napi]
pub fn simulate_financing(input_json: String) -> NapiResult<String> {
    let input: finanhogar_core::simulation::FinancingScenario =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        finanhogar_core::simulation::simulate_financing(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn rental_yield(input_json: String) -> NapiResult<String> {
    let input: finanhogar_core::investment::RentalYieldInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let annual_yield_pct = finanhogar_core::investment::rental_yield(
        input.purchase_price,
        input.monthly_rent,
        input.monthly_expenses,
    )
    .map_err(to_napi_error)?;
    serde_json::to_string(&serde_json::json!({ "annual_yield_pct": annual_yield_pct }))
        .map_err(to_napi_error)
}
