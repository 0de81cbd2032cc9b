use crate::config::TariffConfig;

use super::scheme::TariffScheme;
use super::types::{BillCategory, BillResult, RawInput, Readings};
use super::validate::{self, ValidationError};

/// Validates raw input and prices it against an injected tariff.
///
/// The calculator holds no state besides the tariff, so every call with the
/// same arguments returns the same result.
///
/// # Examples
///
/// ```
/// use bill_calc::bill::calculator::BillCalculator;
/// use bill_calc::bill::scheme::TariffScheme;
/// use bill_calc::config::TariffConfig;
///
/// let calc = BillCalculator::new(TariffConfig::baseline());
/// let readings = calc.validate("1000", "1700", "2").unwrap();
/// let bill = calc.compute(&readings, TariffScheme::Household, None);
/// assert_eq!(bill.total_local, 740_000.0);
/// assert_eq!(bill.total_foreign, None);
/// ```
#[derive(Debug, Clone)]
pub struct BillCalculator {
    tariff: TariffConfig,
}

impl Default for BillCalculator {
    fn default() -> Self {
        Self::new(TariffConfig::baseline())
    }
}

impl BillCalculator {
    pub fn new(tariff: TariffConfig) -> Self {
        Self { tariff }
    }

    /// Active tariff.
    pub fn tariff(&self) -> &TariffConfig {
        &self.tariff
    }

    /// Validates readings and billing period, defaulting a blank period to
    /// the tariff's default months.
    ///
    /// # Errors
    ///
    /// Returns the first violated [`ValidationError`].
    pub fn validate(
        &self,
        previous: &str,
        current: &str,
        months: &str,
    ) -> Result<Readings, ValidationError> {
        validate::validate(
            previous,
            current,
            months,
            self.tariff.household.default_months,
        )
    }

    /// Prices validated readings under `scheme`.
    ///
    /// `exchange_rate` converts the local total when it is a finite number
    /// `> 0`; any other value leaves `total_foreign` unset.
    pub fn compute(
        &self,
        readings: &Readings,
        scheme: TariffScheme,
        exchange_rate: Option<f64>,
    ) -> BillResult {
        let consumption = readings.consumption_kwh();

        let (tier1_kwh, tier2_kwh, total_local, category) = match scheme {
            TariffScheme::Household => {
                let h = &self.tariff.household;
                let tier1 = consumption.min(h.threshold_kwh);
                let tier2 = (consumption - h.threshold_kwh).max(0.0);
                let total = tier1 * h.tier1_rate + tier2 * h.tier2_rate;
                let category = BillCategory::Household {
                    threshold_kwh: h.threshold_kwh,
                    above_threshold: consumption > h.threshold_kwh,
                };
                (tier1, tier2, total, category)
            }
            TariffScheme::Institution(cat) => {
                let rate = self.tariff.institution.rate(cat);
                let category = BillCategory::Institution {
                    category: cat,
                    rate,
                };
                (consumption, 0.0, consumption * rate, category)
            }
        };

        let total_foreign = exchange_rate
            .filter(|rate| rate.is_finite() && *rate > 0.0)
            .map(|rate| total_local / rate);

        log::debug!(
            "priced {consumption} kWh under {scheme:?} (tariff {}): total={total_local}",
            self.tariff.version
        );

        BillResult {
            consumption_kwh: consumption,
            months: readings.months,
            avg_kwh_per_month: consumption / readings.months,
            tier1_kwh,
            tier2_kwh,
            total_local,
            total_foreign,
            category,
        }
    }

    /// Validates `input` and, if it passes, computes the bill.
    ///
    /// # Errors
    ///
    /// Returns the first violated [`ValidationError`]; nothing is computed in
    /// that case.
    pub fn calculate(&self, input: &RawInput) -> Result<BillResult, ValidationError> {
        let readings = self.validate(&input.previous, &input.current, &input.months)?;
        let scheme = TariffScheme::select(input.institution_mode, &input.category);
        let rate = validate::parse_exchange_rate(&input.exchange_rate);
        Ok(self.compute(&readings, scheme, rate))
    }
}
