use crate::config::TariffConfig;

use super::calculator::BillCalculator;
use super::types::{BillResult, RawInput};
use super::validate::ValidationError;

/// Outcome currently attached to a form.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FormState {
    /// Fresh or edited since the last submission: no result, no error.
    #[default]
    Idle,
    /// Last submission failed validation; any earlier result is gone.
    Error(ValidationError),
    /// Last submission produced a bill.
    Computed(BillResult),
}

/// Raw input snapshot plus the outcome of the last submission.
///
/// # Examples
///
/// ```
/// use bill_calc::bill::calculator::BillCalculator;
/// use bill_calc::bill::form::BillForm;
/// use bill_calc::config::TariffConfig;
///
/// let calc = BillCalculator::new(TariffConfig::baseline());
/// let mut form = BillForm::new(calc.tariff());
/// form.edit(|input| {
///     input.previous = "0".into();
///     input.current = "300".into();
/// });
/// form.submit(&calc);
/// assert_eq!(form.result().map(|b| b.total_local), Some(180_000.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BillForm {
    input: RawInput,
    state: FormState,
}

impl BillForm {
    /// Empty form with the tariff's default billing period.
    pub fn new(tariff: &TariffConfig) -> Self {
        Self {
            input: RawInput::with_default_months(tariff.household.default_months),
            state: FormState::Idle,
        }
    }

    pub fn input(&self) -> &RawInput {
        &self.input
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn result(&self) -> Option<&BillResult> {
        match &self.state {
            FormState::Computed(bill) => Some(bill),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<ValidationError> {
        match self.state {
            FormState::Error(e) => Some(e),
            _ => None,
        }
    }

    /// Applies an edit to the input fields and drops any previous outcome.
    pub fn edit(&mut self, f: impl FnOnce(&mut RawInput)) {
        f(&mut self.input);
        self.state = FormState::Idle;
    }

    /// Validates the current input and, on success, computes the bill.
    ///
    /// A failed validation replaces any earlier result with the error.
    pub fn submit(&mut self, calculator: &BillCalculator) -> &FormState {
        self.state = match calculator.calculate(&self.input) {
            Ok(bill) => FormState::Computed(bill),
            Err(e) => FormState::Error(e),
        };
        &self.state
    }

    /// Restores every field to its default and clears the outcome.
    pub fn reset(&mut self, tariff: &TariffConfig) {
        *self = Self::new(tariff);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill(form: &mut BillForm, previous: &str, current: &str) {
        form.edit(|input| {
            input.previous = previous.into();
            input.current = current.into();
        });
    }

    #[test]
    fn new_form_is_idle() {
        let form = BillForm::new(&TariffConfig::baseline());
        assert_eq!(form.state(), &FormState::Idle);
        assert_eq!(form.input(), &RawInput::default());
    }

    #[test]
    fn failed_submit_clears_prior_result() {
        let calc = BillCalculator::default();
        let mut form = BillForm::new(calc.tariff());
        fill(&mut form, "1000", "1700");
        form.submit(&calc);
        assert!(form.result().is_some());

        fill(&mut form, "500", "100");
        form.submit(&calc);
        assert_eq!(form.error(), Some(ValidationError::ReadingOrder));
        assert!(form.result().is_none());
    }

    #[test]
    fn successful_submit_clears_prior_error() {
        let calc = BillCalculator::default();
        let mut form = BillForm::new(calc.tariff());
        fill(&mut form, "x", "1");
        form.submit(&calc);
        assert_eq!(form.error(), Some(ValidationError::InvalidNumber));

        fill(&mut form, "0", "1");
        form.submit(&calc);
        assert!(form.error().is_none());
        assert!(form.result().is_some());
    }

    #[test]
    fn submitting_fresh_form_gives_zero_bill() {
        let calc = BillCalculator::default();
        let mut form = BillForm::new(calc.tariff());
        form.submit(&calc);
        let bill = form.result().expect("blank readings count as zero");
        assert_eq!(bill.total_local, 0.0);
        assert_eq!(bill.months, 2.0);
    }

    #[test]
    fn edit_returns_to_idle() {
        let calc = BillCalculator::default();
        let mut form = BillForm::new(calc.tariff());
        fill(&mut form, "0", "10");
        form.submit(&calc);
        form.edit(|input| input.exchange_rate = "14500".into());
        assert_eq!(form.state(), &FormState::Idle);
    }

    #[test]
    fn reset_restores_defaults() {
        let calc = BillCalculator::default();
        let mut form = BillForm::new(calc.tariff());
        form.edit(|input| {
            input.previous = "1".into();
            input.current = "2".into();
            input.months = "6".into();
            input.institution_mode = true;
            input.category = "premium".into();
            input.exchange_rate = "100".into();
        });
        form.submit(&calc);
        assert!(form.result().is_some());

        form.reset(calc.tariff());
        let input = form.input();
        assert_eq!(input.months, "2");
        assert!(!input.institution_mode);
        assert_eq!(input.category, "standard");
        assert!(input.previous.is_empty());
        assert!(input.current.is_empty());
        assert!(input.exchange_rate.is_empty());
        assert_eq!(form.state(), &FormState::Idle);
    }
}
