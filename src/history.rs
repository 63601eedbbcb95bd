use crate::records::{ExpenseRecord, PaymentRecord};
use crate::utils::{
    first_day_of_month, last_day_of_month, month_key, month_label, non_negative, round2,
    shift_month,
};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

pub const TREND_MONTHS: i32 = 6;

/// Realized revenue and spend for one trailing calendar month. Historical
/// fact, so no probability weighting applies.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySnapshot {
    pub month: String,
    pub month_key: String,
    pub revenue: f64,
    pub expenses: f64,
}

/// Groups completed payments and non-rejected expenses into the trailing
/// 6 calendar months, oldest first, current month last.
pub fn build_monthly_trend(
    payments: &[PaymentRecord],
    expenses: &[ExpenseRecord],
    today: NaiveDate,
) -> Vec<MonthlySnapshot> {
    (1 - TREND_MONTHS..=0)
        .map(|offset| {
            let (year, month) = shift_month(today.year(), today.month(), offset);
            let start = first_day_of_month(year, month);
            let end = last_day_of_month(year, month);

            let revenue: f64 = payments
                .iter()
                .filter(|payment| payment.status.as_deref().map_or(true, |s| s == "completed"))
                .filter(|payment| {
                    payment
                        .payment_date
                        .map_or(false, |date| date >= start && date <= end)
                })
                .map(|payment| non_negative(payment.amount))
                .sum();

            let spent: f64 = expenses
                .iter()
                .filter(|expense| expense.status.as_deref() != Some("rejected"))
                .filter(|expense| {
                    expense
                        .expense_date
                        .map_or(false, |date| date >= start && date <= end)
                })
                .map(|expense| non_negative(expense.amount))
                .sum();

            MonthlySnapshot {
                month: month_label(start),
                month_key: month_key(start),
                revenue: round2(revenue),
                expenses: round2(spent),
            }
        })
        .collect()
}
