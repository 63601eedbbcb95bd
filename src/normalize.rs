use crate::probability::{lead_probability, ProbabilityTable};
use crate::records::{ContractRecord, InvoiceRecord, PipelineLead, PricingItem, ProposalRecord};
use crate::utils::{add_days, non_negative, round2};
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Invoice,
    Pipeline,
    Proposal,
    Contract,
}

/// The canonical unit every source record normalizes into: a dated,
/// probability-weighted expected inflow.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CashEvent {
    pub id: String,
    pub label: String,
    pub source_type: SourceKind,
    pub amount: f64,
    pub probability: f64,
    pub weighted_amount: f64,
    pub expected_date: NaiveDate,
}

impl CashEvent {
    /// The weighted amount is always derived here, never supplied, so
    /// `weighted_amount == amount * probability` holds for every event.
    pub fn new(
        id: String,
        label: String,
        source_type: SourceKind,
        amount: f64,
        probability: f64,
        expected_date: NaiveDate,
    ) -> Self {
        Self {
            id,
            label,
            source_type,
            weighted_amount: amount * probability,
            amount,
            probability,
            expected_date,
        }
    }

    /// Copy with monetary fields rounded for emission into the report.
    pub fn rounded(&self) -> Self {
        Self {
            amount: round2(self.amount),
            weighted_amount: round2(self.weighted_amount),
            ..self.clone()
        }
    }
}

/// An invoice's expected inflow is its outstanding balance, due on its
/// due date (today when the record carries none).
pub fn normalize_invoice(
    invoice: &InvoiceRecord,
    table: &ProbabilityTable,
    today: NaiveDate,
) -> CashEvent {
    let outstanding =
        (non_negative(invoice.total) - non_negative(invoice.amount_paid)).max(0.0);

    CashEvent::new(
        invoice.id.clone(),
        invoice.label.clone(),
        SourceKind::Invoice,
        outstanding,
        table.invoice(&invoice.status),
        invoice.due_date.unwrap_or(today),
    )
}

/// A lead with no expected close date is placed on the 60-day horizon
/// boundary rather than dropped.
pub fn normalize_lead(lead: &PipelineLead, today: NaiveDate) -> CashEvent {
    CashEvent::new(
        lead.id.clone(),
        lead.label.clone(),
        SourceKind::Pipeline,
        non_negative(lead.estimated_value),
        lead_probability(lead.probability),
        lead.expected_close_date.unwrap_or_else(|| add_days(today, 60)),
    )
}

/// A proposal's value is the sum of its priced items; its validity
/// deadline stands in for a close date (day 30 when absent).
pub fn normalize_proposal(
    proposal: &ProposalRecord,
    table: &ProbabilityTable,
    today: NaiveDate,
) -> CashEvent {
    let amount: f64 = proposal.pricing_items.iter().map(item_amount).sum();

    CashEvent::new(
        proposal.id.clone(),
        proposal.label.clone(),
        SourceKind::Proposal,
        amount,
        table.proposal(&proposal.status),
        proposal.valid_until.unwrap_or_else(|| add_days(today, 30)),
    )
}

/// Contracts do not land on a single date; their cash impact goes through
/// the amortizer instead. This event exists only so contracts appear in
/// the report's item list: committed revenue (probability 1.0) at full
/// value, dated at the effective start of recognition.
pub fn contract_display_event(contract: &ContractRecord, today: NaiveDate) -> CashEvent {
    let start = contract.start_date.unwrap_or(today).max(today);

    CashEvent::new(
        contract.id.clone(),
        contract.label.clone(),
        SourceKind::Contract,
        non_negative(contract.value),
        1.0,
        start,
    )
}

fn item_amount(item: &PricingItem) -> f64 {
    match item.amount {
        Some(amount) if amount.is_finite() => amount.max(0.0),
        _ => {
            let quantity = match item.quantity {
                Some(q) if q.is_finite() && q > 0.0 => q,
                _ => 1.0,
            };
            quantity * non_negative(item.unit_price)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{InvoiceStatus, ProposalStatus};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 8).unwrap()
    }

    fn invoice(total: Option<f64>, paid: Option<f64>, status: InvoiceStatus) -> InvoiceRecord {
        InvoiceRecord {
            id: "inv-1".to_string(),
            label: "INV-1".to_string(),
            total,
            amount_paid: paid,
            due_date: None,
            status,
            currency: None,
        }
    }

    #[test]
    fn test_overdue_invoice_outstanding_balance() {
        let mut record = invoice(Some(1000.0), Some(200.0), InvoiceStatus::Overdue);
        record.due_date = Some(add_days(today(), -1));

        let event = normalize_invoice(&record, &ProbabilityTable::default(), today());
        assert_eq!(event.amount, 800.0);
        assert_eq!(event.probability, 0.70);
        assert!((event.weighted_amount - 560.0).abs() < 1e-10);
        assert_eq!(event.expected_date, add_days(today(), -1));
    }

    #[test]
    fn test_overpaid_invoice_clamps_to_zero() {
        let record = invoice(Some(500.0), Some(700.0), InvoiceStatus::PartiallyPaid);
        let event = normalize_invoice(&record, &ProbabilityTable::default(), today());
        assert_eq!(event.amount, 0.0);
        assert_eq!(event.weighted_amount, 0.0);
    }

    #[test]
    fn test_invoice_missing_due_date_defaults_to_today() {
        let record = invoice(Some(100.0), None, InvoiceStatus::Sent);
        let event = normalize_invoice(&record, &ProbabilityTable::default(), today());
        assert_eq!(event.expected_date, today());
    }

    #[test]
    fn test_invoice_missing_total_contributes_zero() {
        let record = invoice(None, None, InvoiceStatus::Sent);
        let event = normalize_invoice(&record, &ProbabilityTable::default(), today());
        assert_eq!(event.amount, 0.0);
        assert_eq!(event.probability, 0.85);
    }

    #[test]
    fn test_lead_weighting_and_date_default() {
        let lead = PipelineLead {
            id: "lead-1".to_string(),
            label: "Initech redesign".to_string(),
            estimated_value: Some(5000.0),
            probability: Some(40.0),
            expected_close_date: None,
            status: None,
        };

        let event = normalize_lead(&lead, today());
        assert_eq!(event.amount, 5000.0);
        assert!((event.weighted_amount - 2000.0).abs() < 1e-10);
        assert_eq!(event.expected_date, add_days(today(), 60));
    }

    #[test]
    fn test_lead_missing_probability_is_zero() {
        let lead = PipelineLead {
            id: "lead-2".to_string(),
            label: "Cold lead".to_string(),
            estimated_value: Some(9000.0),
            probability: None,
            expected_close_date: None,
            status: None,
        };

        let event = normalize_lead(&lead, today());
        assert_eq!(event.probability, 0.0);
        assert_eq!(event.weighted_amount, 0.0);
        assert_eq!(event.amount, 9000.0); // still visible in item lists
    }

    #[test]
    fn test_proposal_pricing_items() {
        let proposal = ProposalRecord {
            id: "prop-1".to_string(),
            label: "Brand campaign".to_string(),
            pricing_items: vec![
                PricingItem {
                    amount: Some(1200.0),
                    quantity: Some(3.0),
                    unit_price: Some(999.0), // ignored: explicit amount wins
                },
                PricingItem {
                    amount: None,
                    quantity: Some(4.0),
                    unit_price: Some(250.0),
                },
                PricingItem {
                    amount: None,
                    quantity: None, // defaults to 1
                    unit_price: Some(300.0),
                },
            ],
            valid_until: None,
            status: ProposalStatus::Viewed,
            currency: None,
        };

        let event = normalize_proposal(&proposal, &ProbabilityTable::default(), today());
        assert_eq!(event.amount, 1200.0 + 1000.0 + 300.0);
        assert_eq!(event.probability, 0.55);
        assert_eq!(event.expected_date, add_days(today(), 30));
    }

    #[test]
    fn test_contract_display_event_clamps_past_start() {
        let contract = ContractRecord {
            id: "con-1".to_string(),
            label: "Globex retainer".to_string(),
            value: Some(12000.0),
            start_date: Some(add_days(today(), -120)),
            end_date: Some(add_days(today(), 240)),
            currency: None,
        };

        let event = contract_display_event(&contract, today());
        assert_eq!(event.source_type, SourceKind::Contract);
        assert_eq!(event.probability, 1.0);
        assert_eq!(event.weighted_amount, 12000.0);
        assert_eq!(event.expected_date, today());
    }

    #[test]
    fn test_rounded_copy() {
        let event = CashEvent::new(
            "x".to_string(),
            "x".to_string(),
            SourceKind::Invoice,
            100.004,
            0.85,
            today(),
        );
        let rounded = event.rounded();
        assert_eq!(rounded.amount, 100.0);
        assert_eq!(rounded.weighted_amount, 85.0);
        // the original keeps full precision
        assert_eq!(event.amount, 100.004);
    }
}
