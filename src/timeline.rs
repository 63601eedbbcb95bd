use crate::amortize::ContractAmortization;
use crate::expense::ExpenseProfile;
use crate::normalize::CashEvent;
use crate::utils::{add_days, round2};
use chrono::NaiveDate;
use serde::Serialize;

pub const TIMELINE_WEEKS: usize = 12;
const DAYS_PER_WEEK: i64 = 7;

/// One entry of the 12-week rolling ledger. `cumulative` carries across
/// the whole horizon: `cumulative[i] = cumulative[i-1] + net[i]`.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyBucket {
    pub week: u32,
    pub week_start: NaiveDate,
    pub inflow: f64,
    pub outflow: f64,
    pub net: f64,
    pub cumulative: f64,
}

/// Builds the 12-week ledger from today. Event inflow uses half-open
/// `[week_start, week_end)` windows; contract inflow is amortized per
/// week. All figures are rounded at emission only, so the running
/// balance accumulates at full precision.
pub fn build_weekly_timeline(
    events: &[CashEvent],
    contracts: &[ContractAmortization],
    expenses: &ExpenseProfile,
    today: NaiveDate,
) -> Vec<WeeklyBucket> {
    let weekly_outflow = expenses.weekly_outflow();
    let mut cumulative = 0.0;

    (0..TIMELINE_WEEKS)
        .map(|week| {
            let week_start = add_days(today, week as i64 * DAYS_PER_WEEK);
            let week_end = add_days(week_start, DAYS_PER_WEEK);

            let event_inflow: f64 = events
                .iter()
                .filter(|event| {
                    event.expected_date >= week_start && event.expected_date < week_end
                })
                .map(|event| event.weighted_amount)
                .sum();

            let contract_inflow: f64 = contracts
                .iter()
                .map(|contract| contract.amount_in_window(week_start, week_end))
                .sum();

            let inflow = event_inflow + contract_inflow;
            let net = inflow - weekly_outflow;
            cumulative += net;

            WeeklyBucket {
                week: week as u32,
                week_start,
                inflow: round2(inflow),
                outflow: round2(weekly_outflow),
                net: round2(net),
                cumulative: round2(cumulative),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::SourceKind;
    use crate::records::{ContractRecord, ExpenseRecord};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 8).unwrap()
    }

    fn event(weighted: f64, days_out: i64) -> CashEvent {
        CashEvent::new(
            "e".to_string(),
            "e".to_string(),
            SourceKind::Invoice,
            weighted,
            1.0,
            add_days(today(), days_out),
        )
    }

    fn monthly_expenses(avg: f64) -> ExpenseProfile {
        let record = ExpenseRecord {
            amount: Some(avg),
            expense_date: Some(add_days(today(), -30)),
            category: None,
            status: None,
        };
        ExpenseProfile::from_records(&[record], today())
    }

    #[test]
    fn test_twelve_entries_with_running_balance() {
        let events = vec![event(700.0, 3), event(300.0, 10)];
        let timeline = build_weekly_timeline(&events, &[], &monthly_expenses(433.0), today());

        assert_eq!(timeline.len(), TIMELINE_WEEKS);
        assert_eq!(timeline[0].week, 0);
        assert_eq!(timeline[0].week_start, today());
        assert_eq!(timeline[0].inflow, 700.0);
        assert_eq!(timeline[1].inflow, 300.0);

        // outflow 433 / 4.33 = 100 per week
        assert_eq!(timeline[0].outflow, 100.0);
        assert_eq!(timeline[0].net, 600.0);
        assert_eq!(timeline[0].cumulative, 600.0);
        assert_eq!(timeline[1].cumulative, 800.0);
        assert_eq!(timeline[2].cumulative, 700.0);
        assert_eq!(timeline[11].cumulative, 800.0 - 100.0 * 10.0);
    }

    #[test]
    fn test_cumulative_recurrence() {
        let events = vec![event(250.0, 0), event(90.0, 20), event(40.0, 80)];
        let timeline = build_weekly_timeline(&events, &[], &monthly_expenses(1300.0), today());

        let mut previous = 0.0;
        for bucket in &timeline {
            assert!((bucket.cumulative - (previous + bucket.net)).abs() < 0.011);
            assert!((bucket.net - (bucket.inflow - bucket.outflow)).abs() < 0.011);
            previous = bucket.cumulative;
        }
    }

    #[test]
    fn test_week_windows_are_half_open() {
        // A date exactly 7 days out belongs to week 1, not week 0; a date
        // before today belongs to no week at all.
        let events = vec![event(100.0, 7), event(500.0, -2)];
        let timeline = build_weekly_timeline(&events, &[], &ExpenseProfile::default(), today());

        assert_eq!(timeline[0].inflow, 0.0);
        assert_eq!(timeline[1].inflow, 100.0);
        let total: f64 = timeline.iter().map(|b| b.inflow).sum();
        assert_eq!(total, 100.0);
    }

    #[test]
    fn test_contract_inflow_per_week() {
        let record = ContractRecord {
            id: "c".to_string(),
            label: "c".to_string(),
            value: Some(12000.0),
            start_date: Some(today()),
            end_date: Some(add_days(today(), 360)),
            currency: None,
        };
        let amortization = ContractAmortization::from_record(&record, today());

        let timeline =
            build_weekly_timeline(&[], &[amortization], &ExpenseProfile::default(), today());

        // monthly rate 1000 -> 7/30 of that per week
        let weekly = 1000.0 * 7.0 / 30.0;
        for bucket in &timeline {
            assert!((bucket.inflow - round2(weekly)).abs() < 0.01);
        }
    }

    #[test]
    fn test_empty_inputs_emit_zeroed_ledger() {
        let timeline =
            build_weekly_timeline(&[], &[], &ExpenseProfile::default(), today());
        assert_eq!(timeline.len(), 12);
        for bucket in &timeline {
            assert_eq!(bucket.inflow, 0.0);
            assert_eq!(bucket.outflow, 0.0);
            assert_eq!(bucket.net, 0.0);
            assert_eq!(bucket.cumulative, 0.0);
        }
    }
}
