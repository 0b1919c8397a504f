//! Calendar arithmetic shared by the deposit simulator.
//!
//! Dates are plain `jiff::civil::Date` values (no timezone, no time of day).
//! Day offsets and day distances go through Rata Die day-numbering, which keeps
//! the daily simulation loop free of `jiff::Span` normalisation. Month and year
//! offsets are direct calendar arithmetic with end-of-month clamping.

use jiff::civil::Date;

/// Average calendar constants used for interest accrual and term limits.
pub const MONTHS_IN_YEAR: i32 = 12;
pub const AVG_DAYS_IN_MONTH: i32 = 30;
pub const AVG_DAYS_IN_YEAR: i32 = 365;

/// Gregorian leap year rule
pub fn is_leap_year(year: i16) -> bool {
    year % 400 == 0 || (year % 100 != 0 && year % 4 == 0)
}

/// Length of `month` (1-based) in `year`.
pub fn days_in_month(year: i16, month: i8) -> i8 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

pub fn days_in_year(year: i16) -> i32 {
    if is_leap_year(year) { 366 } else { 365 }
}

/// True on December 31st, the close of a calendar tax period.
pub fn is_last_day_of_year(d: Date) -> bool {
    d.month() == 12 && d.day() == 31
}

/// Build a date from a boundary `(year, month, day)` triple.
///
/// Returns `None` for triples that do not name a real calendar day.
pub fn from_ymd(year: i32, month: i32, day: i32) -> Option<Date> {
    let year = i16::try_from(year).ok()?;
    let month = i8::try_from(month).ok()?;
    let day = i8::try_from(day).ok()?;
    Date::new(year, month, day).ok()
}

/// Split a date back into its `(year, month, day)` triple.
pub fn to_ymd(d: Date) -> (i32, i32, i32) {
    (i32::from(d.year()), i32::from(d.month()), i32::from(d.day()))
}

/// Day number counted from 0001-01-01 (Rata Die).
///
/// Years are taken to start in March so the leap day falls at the end of
/// the computational year.
fn day_number(d: Date) -> i64 {
    let (year, month, day) = to_ymd(d);
    let shift = i64::from(month <= 2);
    let y = i64::from(year) - shift;
    let m = i64::from(month) + 12 * shift - 3;
    let leap_days = y / 4 - y / 100 + y / 400;
    i64::from(day) + (153 * m + 2) / 5 + 365 * y + leap_days - 306
}

/// Signed number of days from `from` to `to`.
#[inline]
pub fn days_between(from: Date, to: Date) -> i32 {
    // jiff's whole range spans fewer than i32::MAX days
    (day_number(to) - day_number(from)) as i32
}

/// Move a date by `n` days in either direction, saturating to
/// `Date::MIN` / `Date::MAX`.
#[inline]
pub fn add_days(d: Date, n: i32) -> Date {
    from_day_number(day_number(d) + i64::from(n))
}

/// Add `n` calendar months, clamping the day to the end of the target month.
///
/// `2024-01-31 + 1 month == 2024-02-29`. Results outside jiff's supported
/// range saturate to `Date::MIN` / `Date::MAX`.
pub fn add_months(d: Date, n: i32) -> Date {
    let saturated = if n < 0 { Date::MIN } else { Date::MAX };
    let months_in_year = i64::from(MONTHS_IN_YEAR);
    let index = i64::from(d.year()) * months_in_year + i64::from(d.month()) - 1 + i64::from(n);
    let Ok(year) = i16::try_from(index.div_euclid(months_in_year)) else {
        return saturated;
    };
    let month = (index.rem_euclid(months_in_year) + 1) as i8;
    let day = d.day().min(days_in_month(year, month));
    Date::new(year, month, day).unwrap_or(saturated)
}

/// Add `n` calendar years; Feb 29 becomes Feb 28 in non-leap target years.
pub fn add_years(d: Date, n: i32) -> Date {
    add_months(d, n.saturating_mul(MONTHS_IN_YEAR))
}

/// Inverse of [`day_number`], saturating outside jiff's range.
fn from_day_number(n: i64) -> Date {
    if n < day_number(Date::MIN) {
        return Date::MIN;
    }
    if n > day_number(Date::MAX) {
        return Date::MAX;
    }
    // Days since 0000-03-01
    let z = n + 306;
    let h = 100 * z - 25;
    let centuries = h / 3_652_425;
    let b = centuries - centuries / 4;
    let y = (100 * b + h) / 36_525;
    let day_of_year = b + z - 365 * y - y / 4;
    let m = (5 * day_of_year + 456) / 153;
    let day = day_of_year - (153 * m - 457) / 5;
    let (year, month) = if m > 12 { (y + 1, m - 12) } else { (y, m) };

    let saturated = if n < 0 { Date::MIN } else { Date::MAX };
    match i16::try_from(year) {
        Ok(year) => Date::new(year, month as i8, day as i8).unwrap_or(saturated),
        Err(_) => saturated,
    }
}
