use crate::expense::ExpenseProfile;
use crate::history::MonthlySnapshot;
use crate::horizon::{HorizonBucket, HorizonFigures};
use crate::normalize::CashEvent;
use crate::timeline::WeeklyBucket;
use crate::utils::round2;
use serde::Serialize;
use std::collections::BTreeMap;

/// How many items each source lists in the report. Counts stay exact;
/// only the displayed list is capped.
pub const MAX_DISPLAY_ITEMS: usize = 10;

/// The complete forecast document, serialized as the dashboard-facing
/// JSON payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastReport {
    pub projections: Projections,
    pub sources: SourceReports,
    pub weekly_timeline: Vec<WeeklyBucket>,
    pub monthly_revenue: Vec<MonthlySnapshot>,
}

/// Combined cumulative horizon totals across all sources.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Projections {
    pub inflow: HorizonFigures,
    pub outflow: HorizonFigures,
    pub net: HorizonFigures,
}

impl Projections {
    /// Derives the published cumulative figures from the per-source
    /// inflow buckets and the flat monthly expense rate. Net is the
    /// difference at each matching cumulative horizon.
    pub fn derive(inflow_buckets: &[HorizonBucket], avg_monthly_expense: f64) -> Self {
        let inflow = HorizonFigures::cumulative_from(inflow_buckets);
        let outflow =
            HorizonFigures::cumulative_from(&[HorizonBucket::flat_monthly(avg_monthly_expense)]);
        let net = inflow.less(&outflow);

        Self {
            inflow: inflow.rounded(),
            outflow: outflow.rounded(),
            net: net.rounded(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceReports {
    pub invoices: SourceBreakdown,
    pub pipeline: SourceBreakdown,
    pub proposals: SourceBreakdown,
    pub contracts: SourceBreakdown,
    pub expenses: ExpenseBreakdown,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceBreakdown {
    /// Non-cumulative window sums, unlike the combined projections.
    pub forecast: HorizonBucket,
    pub count: usize,
    pub items: Vec<CashEvent>,
}

impl SourceBreakdown {
    pub fn new(forecast: HorizonBucket, mut items: Vec<CashEvent>) -> Self {
        let count = items.len();

        items.sort_by(|a, b| {
            b.weighted_amount
                .partial_cmp(&a.weighted_amount)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        items.truncate(MAX_DISPLAY_ITEMS);

        Self {
            forecast: forecast.rounded(),
            count,
            items: items.iter().map(CashEvent::rounded).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseBreakdown {
    pub forecast: HorizonBucket,
    pub avg_monthly: f64,
    pub by_category: BTreeMap<String, f64>,
}

impl ExpenseBreakdown {
    pub fn from_profile(profile: &ExpenseProfile) -> Self {
        Self {
            forecast: HorizonBucket::flat_monthly(profile.avg_monthly_total).rounded(),
            avg_monthly: round2(profile.avg_monthly_total),
            by_category: profile
                .by_category_monthly
                .iter()
                .map(|(category, amount)| (category.clone(), round2(*amount)))
                .collect(),
        }
    }
}
