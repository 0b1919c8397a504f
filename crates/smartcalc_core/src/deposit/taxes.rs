//! Deposit interest tax
//!
//! Interest earned in a tax period (a calendar year, cut short by the finish
//! date) is exempt up to `key_rate`% of one million. A non-taxable remainder
//! carried in from earlier periods extends the exemption until it is used up.

/// Principal whose key-rate interest is tax-free
pub const EXEMPT_PRINCIPAL: f64 = 1_000_000.0;

/// Base yearly exemption for a key rate given in percent
pub fn base_exemption(key_rate: f64) -> f64 {
    key_rate * EXEMPT_PRINCIPAL / 100.0
}

/// Running tax state across consecutive tax periods
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaxAllowance {
    base: f64,
    remainder: f64,
    tax_rate: f64,
}

impl TaxAllowance {
    pub fn new(key_rate: f64, remainder: f64, tax_rate: f64) -> Self {
        Self {
            base: base_exemption(key_rate),
            remainder: remainder.max(0.0),
            tax_rate,
        }
    }

    /// Carried allowance not yet consumed
    pub fn remainder(&self) -> f64 {
        self.remainder
    }

    /// Close a tax period that earned `interest` and return the tax due,
    /// rounded to cents. Zero means nothing is owed.
    pub fn close_period(&mut self, interest: f64) -> f64 {
        let excess = interest - self.base;
        if excess <= 0.0 {
            return 0.0;
        }
        let covered = excess.min(self.remainder);
        self.remainder -= covered;
        let taxable = excess - covered;
        if taxable <= 0.0 {
            return 0.0;
        }
        (taxable * self.tax_rate).round() / 100.0
    }
}
