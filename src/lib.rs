//! # Cashflow Forecast
//!
//! A library for turning one tenant's heterogeneous financial records
//! (open invoices, pipeline leads, pending proposals, active contracts,
//! historical expenses and payments) into a single coherent
//! forward-looking picture: 30/60/90-day inflow projections, a 12-week
//! rolling cash-flow ledger, and a 6-month realized trend.
//!
//! ## Core Concepts
//!
//! - **Cash Event**: the canonical unit every source record normalizes
//!   into - a dated, probability-weighted expected inflow
//! - **Probability Table**: status -> collection/close probability lookup;
//!   signed contracts skip it entirely (committed revenue)
//! - **Amortization**: a contract's lump sum spread evenly over its
//!   active period in 30-day months
//! - **Run-rate**: average monthly expenses projected forward as the
//!   outflow side of every projection
//! - **Horizons vs weeks**: the combined 30/60/90 projections are
//!   cumulative totals, the per-source breakdowns are per-window sums,
//!   and the weekly ledger carries a running balance
//!
//! ## Example
//!
//! ```rust,ignore
//! use cashflow_forecast::*;
//! use chrono::NaiveDate;
//!
//! let snapshot = ForecastSnapshot {
//!     invoices: vec![InvoiceRecord {
//!         id: "inv-1042".to_string(),
//!         label: "INV-1042 Acme retainer".to_string(),
//!         total: Some(1000.0),
//!         amount_paid: Some(200.0),
//!         due_date: NaiveDate::from_ymd_opt(2026, 8, 7),
//!         status: InvoiceStatus::Overdue,
//!         currency: Some("USD".to_string()),
//!     }],
//!     ..ForecastSnapshot::default()
//! };
//!
//! let today = NaiveDate::from_ymd_opt(2026, 8, 8).unwrap();
//! let report = build_cash_flow_forecast(&snapshot, today).unwrap();
//! println!("{}", serde_json::to_string_pretty(&report).unwrap());
//! ```

pub mod amortize;
pub mod error;
pub mod expense;
pub mod history;
pub mod horizon;
pub mod normalize;
pub mod probability;
pub mod records;
pub mod report;
pub mod timeline;
pub mod utils;

pub use amortize::ContractAmortization;
pub use error::{ForecastError, Result};
pub use expense::ExpenseProfile;
pub use history::{build_monthly_trend, MonthlySnapshot, TREND_MONTHS};
pub use horizon::{HorizonBucket, HorizonFigures};
pub use normalize::{
    contract_display_event, normalize_invoice, normalize_lead, normalize_proposal, CashEvent,
    SourceKind,
};
pub use probability::{lead_probability, ProbabilityTable};
pub use records::*;
pub use report::{
    ExpenseBreakdown, ForecastReport, Projections, SourceBreakdown, SourceReports,
    MAX_DISPLAY_ITEMS,
};
pub use timeline::{build_weekly_timeline, WeeklyBucket, TIMELINE_WEEKS};
pub use utils::*;

use chrono::NaiveDate;
use log::{debug, info};

/// The forecast engine. A pure, synchronous computation: `today` is
/// injected so the same snapshot always produces the same report, and
/// nothing is cached across invocations.
pub struct CashFlowForecaster {
    today: NaiveDate,
    probabilities: ProbabilityTable,
}

impl CashFlowForecaster {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            probabilities: ProbabilityTable::default(),
        }
    }

    /// Overrides the default probability table, e.g. with per-tenant
    /// tuned rates. The table is validated on `process`.
    pub fn with_probabilities(today: NaiveDate, probabilities: ProbabilityTable) -> Self {
        Self {
            today,
            probabilities,
        }
    }

    pub fn process(&self, snapshot: &ForecastSnapshot) -> Result<ForecastReport> {
        self.probabilities.validate()?;

        info!(
            "Projecting cash flow: {} invoices, {} leads, {} proposals, {} contracts, {} expenses, {} payments",
            snapshot.invoices.len(),
            snapshot.pipeline.len(),
            snapshot.proposals.len(),
            snapshot.contracts.len(),
            snapshot.expenses.len(),
            snapshot.payments.len()
        );

        let invoice_events: Vec<CashEvent> = snapshot
            .invoices
            .iter()
            .map(|invoice| normalize_invoice(invoice, &self.probabilities, self.today))
            .collect();

        let lead_events: Vec<CashEvent> = snapshot
            .pipeline
            .iter()
            .map(|lead| normalize_lead(lead, self.today))
            .collect();

        let proposal_events: Vec<CashEvent> = snapshot
            .proposals
            .iter()
            .map(|proposal| normalize_proposal(proposal, &self.probabilities, self.today))
            .collect();

        let amortizations: Vec<ContractAmortization> = snapshot
            .contracts
            .iter()
            .map(|contract| ContractAmortization::from_record(contract, self.today))
            .collect();

        let expense_profile = ExpenseProfile::from_records(&snapshot.expenses, self.today);
        debug!(
            "Expense run-rate {:.2}/month over {:.1} months of history",
            expense_profile.avg_monthly_total, expense_profile.months_of_history
        );

        let invoice_forecast = HorizonBucket::from_events(&invoice_events, self.today);
        let pipeline_forecast = HorizonBucket::from_events(&lead_events, self.today);
        let proposal_forecast = HorizonBucket::from_events(&proposal_events, self.today);
        let contract_forecast = HorizonBucket::from_amortizations(&amortizations, self.today);
        debug!(
            "90-day weighted inflow by source: invoices {:.2}, pipeline {:.2}, proposals {:.2}, contracts {:.2}",
            invoice_forecast.total,
            pipeline_forecast.total,
            proposal_forecast.total,
            contract_forecast.total
        );

        let projections = Projections::derive(
            &[
                invoice_forecast,
                pipeline_forecast,
                proposal_forecast,
                contract_forecast,
            ],
            expense_profile.avg_monthly_total,
        );

        // The weekly ledger sees every dated event; contracts flow in
        // through their amortizations instead.
        let mut dated_events = Vec::with_capacity(
            invoice_events.len() + lead_events.len() + proposal_events.len(),
        );
        dated_events.extend(invoice_events.iter().cloned());
        dated_events.extend(lead_events.iter().cloned());
        dated_events.extend(proposal_events.iter().cloned());

        let weekly_timeline = build_weekly_timeline(
            &dated_events,
            &amortizations,
            &expense_profile,
            self.today,
        );

        let monthly_revenue =
            build_monthly_trend(&snapshot.payments, &snapshot.expenses, self.today);

        let contract_items: Vec<CashEvent> = snapshot
            .contracts
            .iter()
            .map(|contract| contract_display_event(contract, self.today))
            .collect();

        Ok(ForecastReport {
            projections,
            sources: SourceReports {
                invoices: SourceBreakdown::new(invoice_forecast, invoice_events),
                pipeline: SourceBreakdown::new(pipeline_forecast, lead_events),
                proposals: SourceBreakdown::new(proposal_forecast, proposal_events),
                contracts: SourceBreakdown::new(contract_forecast, contract_items),
                expenses: ExpenseBreakdown::from_profile(&expense_profile),
            },
            weekly_timeline,
            monthly_revenue,
        })
    }
}

/// One-shot forecast with the default probability table.
pub fn build_cash_flow_forecast(
    snapshot: &ForecastSnapshot,
    today: NaiveDate,
) -> Result<ForecastReport> {
    CashFlowForecaster::new(today).process(snapshot)
}
