use crate::constants::CURRENCY_TO_RUB;
use crate::error::{AppError, Result};
use std::collections::HashMap;

/// Fixed conversion table from salary currencies to rubles.
///
/// Built once at startup and passed by reference to everything that
/// normalizes salaries; the table itself never changes.
#[derive(Debug, Clone)]
pub struct CurrencyTable {
    rates: HashMap<&'static str, f64>,
}

impl CurrencyTable {
    pub fn new() -> Self {
        Self {
            rates: CURRENCY_TO_RUB.iter().copied().collect(),
        }
    }

    /// Conversion rate to rubles for a currency code.
    pub fn rub_rate(&self, code: &str) -> Result<f64> {
        self.rates
            .get(code)
            .copied()
            .ok_or_else(|| AppError::UnknownCurrency(code.to_string()))
    }

    /// Midpoint of a salary range converted to rubles and rounded.
    pub fn normalize(&self, salary_from: i64, salary_to: i64, code: &str) -> Result<i64> {
        let rate = self.rub_rate(code)?;
        Ok(((salary_from + salary_to) as f64 / 2.0 * rate).round() as i64)
    }
}

impl Default for CurrencyTable {
    fn default() -> Self {
        Self::new()
    }
}
