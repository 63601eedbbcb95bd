use crate::records::ExpenseRecord;
use crate::utils::{non_negative, span_in_months, WEEKS_PER_MONTH};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Average monthly expense run-rate derived from historical records,
/// used as the outflow side of every projection.
#[derive(Debug, Clone, Default)]
pub struct ExpenseProfile {
    pub avg_monthly_total: f64,
    pub by_category_monthly: BTreeMap<String, f64>,
    pub months_of_history: f64,
}

impl ExpenseProfile {
    pub fn from_records(expenses: &[ExpenseRecord], today: NaiveDate) -> Self {
        let considered: Vec<&ExpenseRecord> = expenses
            .iter()
            .filter(|expense| expense.status.as_deref() != Some("rejected"))
            .collect();

        // History depth is measured from the oldest dated expense; undated
        // records still contribute to the totals.
        let months_of_history = considered
            .iter()
            .filter_map(|expense| expense.expense_date)
            .min()
            .map(|oldest| span_in_months(oldest, today).max(1.0))
            .unwrap_or(1.0);

        let mut total = 0.0;
        let mut by_category: BTreeMap<String, f64> = BTreeMap::new();

        for expense in &considered {
            let amount = non_negative(expense.amount);
            total += amount;

            let category = expense
                .category
                .clone()
                .unwrap_or_else(|| "uncategorized".to_string());
            *by_category.entry(category).or_insert(0.0) += amount;
        }

        for amount in by_category.values_mut() {
            *amount /= months_of_history;
        }

        Self {
            avg_monthly_total: total / months_of_history,
            by_category_monthly: by_category,
            months_of_history,
        }
    }

    /// Weekly outflow rate, a month being 4.33 weeks.
    pub fn weekly_outflow(&self) -> f64 {
        self.avg_monthly_total / WEEKS_PER_MONTH
    }
}
