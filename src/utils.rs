use chrono::{Days, Duration, NaiveDate};

/// Fixed month length used for amortization and run-rate math.
/// Every duration-to-months conversion in the engine goes through this
/// constant so horizon buckets and weekly windows agree on the unit.
pub const DAYS_PER_MONTH: f64 = 30.0;

/// Weeks in an average month, used to derive the weekly outflow rate
/// from a monthly expense run-rate.
pub const WEEKS_PER_MONTH: f64 = 4.33;

pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    date + Duration::days(days)
}

pub fn days_between(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days()
}

/// Converts a day span to fractional 30-day months. Negative spans come
/// out negative; callers clamp where their domain requires it.
pub fn span_in_months(start: NaiveDate, end: NaiveDate) -> f64 {
    days_between(start, end) as f64 / DAYS_PER_MONTH
}

/// Rounds to 2 decimal places. Applied only at the point a figure is
/// emitted into the report; intermediate math keeps full precision.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Resolves an optional monetary field to a usable amount: missing,
/// non-finite, or negative inputs all become 0 so a malformed record can
/// never poison a sum with NaN or flip its sign.
pub fn non_negative(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => v,
        _ => 0.0,
    }
}

pub fn clamp01(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

pub fn first_day_of_month(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).unwrap()
}

pub fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };

    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap()
        .checked_sub_days(Days::new(1))
        .unwrap()
}

/// Shifts a (year, month) pair by a signed number of calendar months.
pub fn shift_month(year: i32, month: u32, offset: i32) -> (i32, u32) {
    let zero_based = year * 12 + month as i32 - 1 + offset;
    (zero_based.div_euclid(12), (zero_based.rem_euclid(12) + 1) as u32)
}

pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

pub fn month_label(date: NaiveDate) -> String {
    date.format("%b %Y").to_string()
}
