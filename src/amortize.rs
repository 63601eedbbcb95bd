use crate::records::ContractRecord;
use crate::utils::{add_days, non_negative, span_in_months};
use chrono::NaiveDate;

/// Straight-line spread of a lump-sum contract value across its active
/// period. Revenue already in the past is not re-projected: the window
/// math runs from `max(start, today)`, while the monthly rate is always
/// derived from the full contract duration.
#[derive(Debug, Clone)]
pub struct ContractAmortization {
    pub total_value: f64,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub monthly_rate: f64,
    effective_start: NaiveDate,
}

impl ContractAmortization {
    pub fn from_record(contract: &ContractRecord, today: NaiveDate) -> Self {
        let total_value = non_negative(contract.value);
        let start = contract.start_date.unwrap_or(today);
        let end = contract.end_date.unwrap_or_else(|| add_days(today, 90));

        // Fractional 30-day months, floored at 1 so a same-day or
        // inverted period cannot divide by zero.
        let duration_months = span_in_months(start, end).max(1.0);
        let monthly_rate = total_value / duration_months;

        Self {
            total_value,
            start,
            end,
            monthly_rate,
            effective_start: start.max(today),
        }
    }

    /// Amortized amount falling inside `[win_start, win_end]`, re-derived
    /// from the rate on every call so adjacent windows never accumulate
    /// double-counting drift.
    pub fn amount_in_window(&self, win_start: NaiveDate, win_end: NaiveDate) -> f64 {
        let overlap_start = self.effective_start.max(win_start);
        let overlap_end = self.end.min(win_end);

        if overlap_end <= overlap_start {
            return 0.0;
        }

        self.monthly_rate * span_in_months(overlap_start, overlap_end)
    }
}
