//! Calendar helpers for the monthly projection.
//!
//! Every date in a run is derived from the explicit simulation start date:
//! month `m` falls on `start + m months` and elapsed time is `m / 12` years.
//! Ages are fractional years of 365.25 days. The helpers use Rata Die day
//! numbering so the hot loop never builds a `jiff::Span`.

use jiff::civil::Date;

/// Average days per year used for fractional ages.
pub const DAYS_PER_YEAR: f64 = 365.25;

#[inline]
pub fn is_leap_year(year: i16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

#[inline]
pub fn days_in_month(year: i16, month: i8) -> i8 {
    const DAYS: [i8; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
    if month == 2 && is_leap_year(year) {
        29
    } else {
        DAYS[(month - 1) as usize]
    }
}

/// Convert a civil date to a Rata Die day number (days since 0001-01-01).
#[inline]
fn rata_die(d: Date) -> i32 {
    let y = d.year() as i32;
    let m = d.month() as i32;
    let day = d.day() as i32;

    // March = month 1 so the leap day ends the shifted year
    let a = (14 - m) / 12;
    let y2 = y - a;
    let m2 = m + 12 * a - 3;

    day + (153 * m2 + 2) / 5 + 365 * y2 + y2 / 4 - y2 / 100 + y2 / 400 - 306
}

/// Number of days from `d1` to `d2` (positive when `d2 > d1`).
#[inline]
pub fn fast_days_between(d1: Date, d2: Date) -> i32 {
    rata_die(d2) - rata_die(d1)
}

/// Add whole months, clamping the day to the length of the target month
/// (Jan 31 + 1 month = Feb 28/29).
pub fn add_months(d: Date, months: i32) -> Date {
    let total = d.year() as i32 * 12 + (d.month() as i32 - 1) + months;
    let year = total.div_euclid(12) as i16;
    let month = (total.rem_euclid(12) + 1) as i8;
    let day = d.day().min(days_in_month(year, month));
    jiff::civil::date(year, month, day)
}

/// Calendar date reached after `years` of elapsed simulation time.
///
/// Elapsed time is truncated to whole months, so 1.99 years lands on
/// month 23. `m / 12` always maps back to month `m`.
#[inline]
pub fn date_at(start: Date, years: f64) -> Date {
    add_months(start, (years * 12.0 + 1e-9).floor() as i32)
}

/// Fractional age in years on `on` for someone born on `birth`.
///
/// Negative before birth.
#[inline]
pub fn age_on(birth: Date, on: Date) -> f64 {
    fast_days_between(birth, on) as f64 / DAYS_PER_YEAR
}

/// Fractional age after `years` of simulation time starting at `start`.
#[inline]
pub fn age_at(birth: Date, start: Date, years: f64) -> f64 {
    age_on(birth, start) + years
}
