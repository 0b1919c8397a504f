//! Calendars driving the deposit simulation: the finish date, interest payout
//! dates and the expanded fund/withdrawal schedule.

use jiff::civil::Date;

use crate::date_math::{add_days, add_months, add_years};
use crate::error::{EngineError, try_push};
use crate::model::{DepositTermUnit, Payout, PayoutFrequency, PayoutStep, Transaction};

/// Maturity date of a deposit opened on `start`.
pub fn finish_date(start: Date, term: u32, unit: DepositTermUnit) -> Date {
    let term = i32::try_from(term).unwrap_or(i32::MAX);
    match unit {
        DepositTermUnit::Day => add_days(start, term),
        DepositTermUnit::Month => add_months(start, term),
        DepositTermUnit::Year => add_years(start, term),
    }
}

/// The `k`-th payout date after `start`, always measured from `start`.
fn nth_payout(start: Date, step: PayoutStep, k: i32) -> Date {
    match step {
        PayoutStep::Days(days) => add_days(start, days.saturating_mul(k)),
        PayoutStep::Months(months) => add_months(start, months.saturating_mul(k)),
    }
}

/// Payout dates in `(start, finish]`. The finish date always closes the list,
/// ending a partial final period if the frequency does not divide the term.
pub fn payout_dates(
    start: Date,
    finish: Date,
    frequency: PayoutFrequency,
) -> Result<Vec<Date>, EngineError> {
    let step = frequency.step();
    let mut dates = Vec::new();
    let mut k = 1;
    loop {
        let date = nth_payout(start, step, k);
        if date >= finish {
            try_push(&mut dates, finish)?;
            return Ok(dates);
        }
        try_push(&mut dates, date)?;
        k += 1;
    }
}

/// Append every occurrence of `tx` within `[start, finish]`, signed by `sign`.
fn expand_one(
    out: &mut Vec<Payout>,
    tx: &Transaction,
    sign: f64,
    start: Date,
    finish: Date,
) -> Result<(), EngineError> {
    let amount = sign * tx.payout.amount;
    let months = tx.frequency.months();
    if months == 0 {
        let date = tx.payout.date;
        if start <= date && date <= finish {
            try_push(out, Payout { date, amount })?;
        }
        return Ok(());
    }

    let mut previous = None;
    for k in 0.. {
        let date = add_months(tx.payout.date, months.saturating_mul(k));
        if date > finish || previous == Some(date) {
            break;
        }
        if date >= start {
            try_push(out, Payout { date, amount })?;
        }
        previous = Some(date);
    }
    Ok(())
}

/// Expand recurring transactions into dated occurrences and merge funds
/// (positive) with withdrawals (negative), sorted by date.
///
/// The sort is stable: on a shared date funds keep their input order and come
/// before withdrawals.
pub fn expand_transactions(
    start: Date,
    finish: Date,
    funds: &[Transaction],
    withdrawals: &[Transaction],
) -> Result<Vec<Payout>, EngineError> {
    let mut out = Vec::new();
    for tx in funds {
        expand_one(&mut out, tx, 1.0, start, finish)?;
    }
    for tx in withdrawals {
        expand_one(&mut out, tx, -1.0, start, finish)?;
    }
    out.sort_by_key(|p| p.date);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TransactionFrequency;
    use jiff::civil::date;

    #[test]
    fn test_finish_date_by_unit() {
        let start = date(2024, 1, 31);
        assert_eq!(finish_date(start, 30, DepositTermUnit::Day), date(2024, 3, 1));
        assert_eq!(finish_date(start, 1, DepositTermUnit::Month), date(2024, 2, 29));
        assert_eq!(finish_date(date(2024, 2, 29), 1, DepositTermUnit::Year), date(2025, 2, 28));
    }

    #[test]
    fn test_oversized_terms_saturate() {
        let start = date(2024, 1, 1);
        for unit in [DepositTermUnit::Day, DepositTermUnit::Month, DepositTermUnit::Year] {
            assert_eq!(finish_date(start, u32::MAX, unit), Date::MAX, "{unit:?}");
        }
    }

    #[test]
    fn test_monthly_payouts_do_not_drift() {
        let dates = payout_dates(date(2024, 1, 31), date(2024, 5, 31), PayoutFrequency::Monthly)
            .unwrap();
        assert_eq!(
            dates,
            vec![
                date(2024, 2, 29),
                date(2024, 3, 31),
                date(2024, 4, 30),
                date(2024, 5, 31),
            ]
        );
    }

    #[test]
    fn test_partial_final_period_ends_on_finish() {
        let dates =
            payout_dates(date(2024, 1, 1), date(2024, 1, 10), PayoutFrequency::Weekly).unwrap();
        assert_eq!(dates, vec![date(2024, 1, 8), date(2024, 1, 10)]);
    }

    #[test]
    fn test_daily_payouts_cover_every_day() {
        let dates =
            payout_dates(date(2024, 2, 27), date(2024, 3, 2), PayoutFrequency::Daily).unwrap();
        assert_eq!(dates.len(), 4);
        assert_eq!(dates[1], date(2024, 2, 29));
    }

    #[test]
    fn test_recurring_transaction_expansion() {
        let funds = [Transaction::recurring(
            date(2023, 11, 15),
            100.0,
            TransactionFrequency::Quarterly,
        )];
        let out =
            expand_transactions(date(2024, 1, 1), date(2024, 12, 31), &funds, &[]).unwrap();
        let dates: Vec<Date> = out.iter().map(|p| p.date).collect();
        assert_eq!(
            dates,
            vec![date(2024, 2, 15), date(2024, 5, 15), date(2024, 8, 15), date(2024, 11, 15)]
        );
    }

    #[test]
    fn test_once_transactions_outside_term_are_dropped() {
        let funds = [
            Transaction::once(date(2023, 12, 31), 1.0),
            Transaction::once(date(2024, 1, 1), 2.0),
            Transaction::once(date(2025, 1, 1), 3.0),
        ];
        let out =
            expand_transactions(date(2024, 1, 1), date(2024, 12, 31), &funds, &[]).unwrap();
        assert_eq!(out, vec![Payout { date: date(2024, 1, 1), amount: 2.0 }]);
    }

    #[test]
    fn test_withdrawals_are_negated_and_merged() {
        let funds = [Transaction::once(date(2024, 3, 1), 500.0)];
        let withdrawals = [
            Transaction::once(date(2024, 2, 1), 100.0),
            Transaction::once(date(2024, 3, 1), 50.0),
        ];
        let out = expand_transactions(date(2024, 1, 1), date(2024, 12, 31), &funds, &withdrawals)
            .unwrap();
        assert_eq!(
            out,
            vec![
                Payout { date: date(2024, 2, 1), amount: -100.0 },
                Payout { date: date(2024, 3, 1), amount: 500.0 },
                Payout { date: date(2024, 3, 1), amount: -50.0 },
            ]
        );
    }
}
