//! Day-by-day deposit simulation

use crate::date_math::{AVG_DAYS_IN_YEAR, add_days, days_between, is_last_day_of_year};
use crate::error::{EngineError, try_push};
use crate::model::{DepositConditions, DepositResult, Payout, round_cents};

use super::schedule::{expand_transactions, finish_date, payout_dates};
use super::taxes::TaxAllowance;

/// Balance bookkeeping while walking the term
#[derive(Debug, Default)]
struct Balance {
    /// Principal plus applied transactions
    contributed: f64,
    /// Interest folded back in
    capitalized: f64,
}

impl Balance {
    fn current(&self) -> f64 {
        self.contributed + self.capitalized
    }

    fn apply(&mut self, tx: &Payout) {
        self.contributed += tx.amount;
        if self.current() < 0.0 {
            tracing::warn!(
                date = %tx.date,
                amount = tx.amount,
                balance = self.current(),
                "Withdrawal exceeds the available balance"
            );
        }
    }
}

/// Simulate a validated deposit from its start date to maturity.
///
/// Interest accrues daily on the current balance at `rate / 100 / 365`. The
/// accrued amount is rounded to cents on each payout date and either folded
/// into the balance or paid out. Transactions dated on the start date are in
/// effect from the first accrual day; later ones from the day after their date.
///
/// Allocation failure is the only runtime error; see
/// [`DepositConditions::validate`] for the preconditions.
pub fn calculate(conditions: &DepositConditions) -> Result<DepositResult, EngineError> {
    let start = conditions.start_date;
    let finish = finish_date(start, conditions.term, conditions.term_unit);
    tracing::debug!(
        sum = conditions.sum,
        rate = conditions.rate,
        start = %start,
        finish = %finish,
        capitalization = conditions.capitalization,
        "Simulating deposit"
    );

    let pay_dates = payout_dates(start, finish, conditions.payout_frequency)?;
    let transactions =
        expand_transactions(start, finish, &conditions.funds, &conditions.withdrawals)?;

    let mut payouts = Vec::new();
    let mut payments = Vec::new();
    let mut taxes = Vec::new();
    payouts.try_reserve_exact(pay_dates.len())?;
    payments.try_reserve_exact(pay_dates.len())?;

    let daily_rate = conditions.rate / 100.0 / AVG_DAYS_IN_YEAR as f64;
    let mut allowance = TaxAllowance::new(
        conditions.key_rate,
        conditions.non_taxable_remainder,
        conditions.tax_rate,
    );
    let mut balance = Balance {
        contributed: conditions.sum,
        capitalized: 0.0,
    };

    let mut pending_tx = transactions.iter().peekable();
    while let Some(tx) = pending_tx.next_if(|tx| tx.date <= start) {
        balance.apply(tx);
    }
    let mut pending_pay = pay_dates.iter().peekable();

    let days = days_between(start, finish);
    let mut accrued = 0.0;
    let mut period_interest = 0.0;
    let mut interest_total = 0.0;
    let mut tax_total = 0.0;
    // Sum over days of the contributed balance, for the average
    let mut balance_days = 0.0;
    let mut date = start;

    for _ in 0..days {
        date = add_days(date, 1);
        accrued += balance.current() * daily_rate;
        balance_days += balance.contributed;

        if pending_pay.next_if(|&&pay| pay == date).is_some() {
            let amount = round_cents(accrued);
            accrued = 0.0;
            try_push(&mut payouts, Payout { date, amount })?;
            try_push(&mut payments, amount)?;
            interest_total += amount;
            period_interest += amount;
            if conditions.capitalization {
                balance.capitalized += amount;
            }
        }

        while let Some(tx) = pending_tx.next_if(|tx| tx.date == date) {
            balance.apply(tx);
        }

        if is_last_day_of_year(date) || date == finish {
            let tax = allowance.close_period(period_interest);
            period_interest = 0.0;
            if tax > 0.0 {
                try_push(&mut taxes, tax)?;
                tax_total += tax;
            }
        }
    }

    let effective_rate = if days > 0 && balance_days > 0.0 {
        interest_total * AVG_DAYS_IN_YEAR as f64 * 100.0 / balance_days
    } else {
        0.0
    };
    let total = balance.contributed + interest_total - tax_total;

    tracing::debug!(
        payouts = payouts.len(),
        interest = interest_total,
        tax = tax_total,
        total = total,
        "Deposit simulation complete"
    );

    Ok(DepositResult {
        payouts,
        pay_dates,
        payments,
        taxes,
        transactions,
        start_date: start,
        finish_date: finish,
        effective_rate,
        interest_total,
        tax_total,
        total,
    })
}
