use crate::amortize::ContractAmortization;
use crate::normalize::CashEvent;
use crate::utils::{add_days, days_between, round2};
use chrono::NaiveDate;
use serde::Serialize;

/// One source's expected inflow partitioned into the 30/60/90-day
/// windows. Each field holds that window's own (non-cumulative)
/// contribution, so `total == d30 + d60 + d90`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct HorizonBucket {
    pub d30: f64,
    pub d60: f64,
    pub d90: f64,
    pub total: f64,
}

impl HorizonBucket {
    /// Buckets events by expected date. `d30` has no lower bound, so an
    /// overdue invoice lands there; events beyond day 90 stay out of the
    /// buckets entirely (they remain visible in the report's item list).
    pub fn from_events(events: &[CashEvent], today: NaiveDate) -> Self {
        let mut bucket = Self::default();

        for event in events {
            let days_out = days_between(today, event.expected_date);
            if days_out <= 30 {
                bucket.d30 += event.weighted_amount;
            } else if days_out <= 60 {
                bucket.d60 += event.weighted_amount;
            } else if days_out <= 90 {
                bucket.d90 += event.weighted_amount;
            }
        }

        bucket.total = bucket.d30 + bucket.d60 + bucket.d90;
        bucket
    }

    /// Contracts are continuous rather than event-dated, so their bucket
    /// is computed directly from the amortizer over the three disjoint
    /// windows.
    pub fn from_amortizations(contracts: &[ContractAmortization], today: NaiveDate) -> Self {
        let windows = [
            (today, add_days(today, 30)),
            (add_days(today, 30), add_days(today, 60)),
            (add_days(today, 60), add_days(today, 90)),
        ];

        let mut amounts = [0.0; 3];
        for contract in contracts {
            for (slot, (win_start, win_end)) in amounts.iter_mut().zip(windows) {
                *slot += contract.amount_in_window(win_start, win_end);
            }
        }

        Self {
            d30: amounts[0],
            d60: amounts[1],
            d90: amounts[2],
            total: amounts.iter().sum(),
        }
    }

    /// The outflow bucket: a flat monthly run-rate repeated per window.
    pub fn flat_monthly(avg_monthly: f64) -> Self {
        Self {
            d30: avg_monthly,
            d60: avg_monthly,
            d90: avg_monthly,
            total: avg_monthly * 3.0,
        }
    }

    pub fn rounded(self) -> Self {
        Self {
            d30: round2(self.d30),
            d60: round2(self.d60),
            d90: round2(self.d90),
            total: round2(self.total),
        }
    }
}

/// Combined horizon totals as published in `projections`. Unlike the
/// per-source buckets these are CUMULATIVE: `d60` is money expected in
/// the first 60 days, `d90` in the first 90. The asymmetry against the
/// non-cumulative source breakdowns is the published convention and is
/// kept intact for output compatibility.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct HorizonFigures {
    pub d30: f64,
    pub d60: f64,
    pub d90: f64,
}

impl HorizonFigures {
    /// Sums the per-window contributions of several buckets, then folds
    /// the result cumulative in place: d60 += d30, then d90 += d60.
    pub fn cumulative_from(buckets: &[HorizonBucket]) -> Self {
        let mut figures = Self {
            d30: buckets.iter().map(|b| b.d30).sum(),
            d60: buckets.iter().map(|b| b.d60).sum(),
            d90: buckets.iter().map(|b| b.d90).sum(),
        };

        figures.d60 += figures.d30;
        figures.d90 += figures.d60;
        figures
    }

    pub fn less(&self, other: &Self) -> Self {
        Self {
            d30: self.d30 - other.d30,
            d60: self.d60 - other.d60,
            d90: self.d90 - other.d90,
        }
    }

    pub fn rounded(self) -> Self {
        Self {
            d30: round2(self.d30),
            d60: round2(self.d60),
            d90: round2(self.d90),
        }
    }
}
