use crate::error::{ForecastError, Result};
use crate::records::{InvoiceStatus, ProposalStatus};
use crate::utils::{clamp01, non_negative};

/// Collection/close probabilities by record status. A pure lookup, not a
/// trained model: invoices and proposals carry uncertainty about whether
/// the money lands at all, while signed contracts are committed revenue
/// and never consult this table (their uncertainty is timing, handled by
/// amortization).
#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilityTable {
    pub invoice_overdue: f64,
    pub invoice_partially_paid: f64,
    /// Applied to any open invoice status other than overdue/partially
    /// paid (sent, viewed, unknown).
    pub invoice_open: f64,
    pub proposal_viewed: f64,
    pub proposal_sent: f64,
}

impl Default for ProbabilityTable {
    fn default() -> Self {
        Self {
            invoice_overdue: 0.70,
            invoice_partially_paid: 0.90,
            invoice_open: 0.85,
            proposal_viewed: 0.55,
            proposal_sent: 0.40,
        }
    }
}

impl ProbabilityTable {
    /// Rejects any entry outside [0, 1]. Called once per forecast run
    /// before the table is consulted.
    pub fn validate(&self) -> Result<()> {
        let entries = [
            ("invoice_overdue", self.invoice_overdue),
            ("invoice_partially_paid", self.invoice_partially_paid),
            ("invoice_open", self.invoice_open),
            ("proposal_viewed", self.proposal_viewed),
            ("proposal_sent", self.proposal_sent),
        ];

        for (entry, value) in entries {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ForecastError::InvalidProbability { entry, value });
            }
        }

        Ok(())
    }

    pub fn invoice(&self, status: &InvoiceStatus) -> f64 {
        match status {
            InvoiceStatus::Overdue => self.invoice_overdue,
            InvoiceStatus::PartiallyPaid => self.invoice_partially_paid,
            InvoiceStatus::Sent | InvoiceStatus::Viewed | InvoiceStatus::Other => {
                self.invoice_open
            }
        }
    }

    /// Statuses outside sent/viewed are not expected in a filtered
    /// snapshot; if one slips through it takes the lower sent rate.
    pub fn proposal(&self, status: &ProposalStatus) -> f64 {
        match status {
            ProposalStatus::Viewed => self.proposal_viewed,
            ProposalStatus::Sent | ProposalStatus::Other => self.proposal_sent,
        }
    }
}

/// Converts a CRM lead's explicit percentage (0-100) to a probability.
/// Missing means 0, not some optimistic default.
pub fn lead_probability(percent: Option<f64>) -> f64 {
    clamp01(non_negative(percent) / 100.0)
}
