//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use bill_calc::bill::calculator::BillCalculator;
use bill_calc::bill::types::RawInput;
use bill_calc::config::TariffConfig;

/// Calculator bound to the baseline tariff.
pub fn baseline_calculator() -> BillCalculator {
    BillCalculator::new(TariffConfig::baseline())
}

/// Household form input with the given readings and default period.
pub fn household_input(previous: &str, current: &str) -> RawInput {
    RawInput {
        previous: previous.to_string(),
        current: current.to_string(),
        ..RawInput::default()
    }
}

/// Institution form input with the given readings and category.
pub fn institution_input(previous: &str, current: &str, category: &str) -> RawInput {
    RawInput {
        institution_mode: true,
        category: category.to_string(),
        ..household_input(previous, current)
    }
}
