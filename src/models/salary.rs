use crate::error::Result;
use crate::services::CurrencyTable;

/// A vacancy salary range together with its averaged ruble value
#[derive(Debug, Clone, PartialEq)]
pub struct Salary {
    /// Lower bound of the advertised range
    pub salary_from: i64,

    /// Upper bound of the advertised range
    pub salary_to: i64,

    /// Original currency code (e.g. "RUR", "USD")
    pub currency: String,

    /// Midpoint of the range converted to rubles, rounded
    pub rub_midpoint: i64,
}

impl Salary {
    /// Create a salary, converting the range midpoint to rubles.
    ///
    /// Fails with `UnknownCurrency` when the code is absent from the
    /// conversion table; there is no silent 1.0 fallback.
    pub fn new(
        salary_from: i64,
        salary_to: i64,
        currency: String,
        rates: &CurrencyTable,
    ) -> Result<Self> {
        let rub_midpoint = rates.normalize(salary_from, salary_to, &currency)?;

        Ok(Self {
            salary_from,
            salary_to,
            currency,
            rub_midpoint,
        })
    }
}
