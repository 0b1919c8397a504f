//! Loan repayment schedules
//!
//! Both policies walk the term month by month, period 1 first, and record the
//! payment together with its principal/interest split. Nothing is accumulated
//! in reverse, so the schedule is returned in the order it is built.

use crate::error::{EngineError, try_push};
use crate::model::{AmortizationKind, CreditConditions, CreditPeriod, CreditSchedule, round_cents};

/// Build the repayment schedule for validated conditions.
///
/// Allocation failure is the only runtime error; see
/// [`CreditConditions::validate`] for the preconditions.
pub fn calculate(conditions: &CreditConditions) -> Result<CreditSchedule, EngineError> {
    let months = conditions.months() as usize;
    tracing::debug!(
        sum = conditions.sum,
        rate = conditions.rate,
        months = months,
        kind = ?conditions.kind,
        "Calculating credit schedule"
    );

    let mut schedule = CreditSchedule::default();
    schedule.payments.try_reserve_exact(months)?;
    schedule.periods.try_reserve_exact(months)?;

    match conditions.kind {
        AmortizationKind::Annuity => annuity(conditions, months, &mut schedule)?,
        AmortizationKind::Differentiated => differentiated(conditions, months, &mut schedule)?,
    }
    schedule.overpay = schedule.total - conditions.sum;

    tracing::debug!(
        total = schedule.total,
        overpay = schedule.overpay,
        periods = schedule.payments.len(),
        "Credit schedule ready"
    );
    Ok(schedule)
}

/// Fixed monthly payment, rounded to cents
pub fn annuity_payment(sum: f64, monthly_rate: f64, months: usize) -> f64 {
    if months == 0 {
        return 0.0;
    }
    if monthly_rate == 0.0 {
        return sum / months as f64;
    }
    let growth = (1.0 + monthly_rate).powf(months as f64);
    let factor = monthly_rate * growth / (growth - 1.0);
    round_cents(sum * factor)
}

fn annuity(
    conditions: &CreditConditions,
    months: usize,
    schedule: &mut CreditSchedule,
) -> Result<(), EngineError> {
    let r = conditions.monthly_rate();
    let payment = annuity_payment(conditions.sum, r, months);
    let mut remaining = conditions.sum;

    for number in 1..=months {
        let interest = remaining * r;
        let principal = payment - interest;
        remaining -= principal;
        try_push(&mut schedule.payments, payment)?;
        try_push(
            &mut schedule.periods,
            CreditPeriod {
                number: number as u32,
                payment,
                principal,
                interest,
                remaining,
            },
        )?;
    }
    schedule.total = payment * months as f64;
    Ok(())
}

fn differentiated(
    conditions: &CreditConditions,
    months: usize,
    schedule: &mut CreditSchedule,
) -> Result<(), EngineError> {
    let r = conditions.monthly_rate();
    let principal = conditions.sum / months as f64;
    let mut remaining = conditions.sum;

    for number in 1..=months {
        let interest = remaining * r;
        let payment = principal + interest;
        remaining -= principal;
        schedule.total += payment;
        try_push(&mut schedule.payments, payment)?;
        try_push(
            &mut schedule.periods,
            CreditPeriod {
                number: number as u32,
                payment,
                principal,
                interest,
                remaining,
            },
        )?;
    }
    Ok(())
}
