use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Lifecycle status of an open invoice. Unknown statuses deserialize to
/// `Other` rather than failing, so a snapshot with a new billing status
/// still produces a forecast.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    #[schemars(description = "Issued to the client, payment not yet received")]
    Sent,

    #[schemars(description = "Opened by the client at least once")]
    Viewed,

    #[schemars(description = "Past its due date with an outstanding balance")]
    Overdue,

    #[schemars(description = "Some payment received, balance still outstanding")]
    PartiallyPaid,

    #[serde(other)]
    #[schemars(description = "Any other open status carried by the billing system")]
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ProposalStatus {
    #[schemars(description = "Delivered to the client, no engagement recorded yet")]
    Sent,

    #[schemars(description = "Opened by the client, signalling active interest")]
    Viewed,

    #[serde(other)]
    #[schemars(description = "Any status outside sent/viewed (not expected in a filtered snapshot)")]
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct InvoiceRecord {
    #[schemars(description = "Stable identifier from the billing system")]
    pub id: String,

    #[schemars(description = "Human-readable description shown in forecast item lists, e.g. 'INV-1042 Acme retainer'")]
    pub label: String,

    #[serde(alias = "amount")]
    #[schemars(description = "Invoice total in the reporting currency. Also accepted under the legacy key 'amount'.")]
    pub total: Option<f64>,

    #[serde(default)]
    #[schemars(description = "Portion of the total already received")]
    pub amount_paid: Option<f64>,

    #[schemars(description = "Date payment is expected; today is assumed when absent")]
    pub due_date: Option<NaiveDate>,

    #[schemars(description = "Current lifecycle status, used for the collection-probability lookup")]
    pub status: InvoiceStatus,

    #[serde(default)]
    #[schemars(description = "ISO currency code, informational only (no conversion is performed)")]
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PipelineLead {
    #[schemars(description = "Stable identifier from the CRM")]
    pub id: String,

    #[schemars(description = "Human-readable description, e.g. 'Website redesign - Initech'")]
    pub label: String,

    #[schemars(description = "Expected deal value if the lead closes")]
    pub estimated_value: Option<f64>,

    #[schemars(description = "Close probability as a percentage (0-100) maintained on the CRM record. Missing is treated as 0, not defaulted.")]
    pub probability: Option<f64>,

    #[schemars(description = "Expected close date; the 60-day horizon boundary is assumed when absent")]
    pub expected_close_date: Option<NaiveDate>,

    #[serde(default)]
    #[schemars(description = "Pipeline stage, informational only (filtering to open stages happens upstream)")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PricingItem {
    #[serde(default)]
    #[schemars(description = "Pre-computed line total. Takes precedence over quantity x unit_price when present.")]
    pub amount: Option<f64>,

    #[serde(default)]
    #[schemars(description = "Line quantity; 1 is assumed when absent")]
    pub quantity: Option<f64>,

    #[serde(default)]
    #[schemars(description = "Price per unit in the reporting currency")]
    pub unit_price: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ProposalRecord {
    #[schemars(description = "Stable identifier from the proposal system")]
    pub id: String,

    #[schemars(description = "Human-readable description, e.g. 'Q3 brand campaign proposal'")]
    pub label: String,

    #[serde(default)]
    #[schemars(description = "Priced line items; the proposal value is their sum")]
    pub pricing_items: Vec<PricingItem>,

    #[schemars(description = "Validity deadline, treated as the expected close date; the 30-day horizon boundary is assumed when absent")]
    pub valid_until: Option<NaiveDate>,

    #[schemars(description = "Current lifecycle status, used for the close-probability lookup")]
    pub status: ProposalStatus,

    #[serde(default)]
    #[schemars(description = "ISO currency code, informational only")]
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ContractRecord {
    #[schemars(description = "Stable identifier from the contract system")]
    pub id: String,

    #[schemars(description = "Human-readable description, e.g. 'Annual retainer - Globex'")]
    pub label: String,

    #[schemars(description = "Total committed contract value, amortized evenly across the contract period")]
    pub value: Option<f64>,

    #[schemars(description = "Start of the contract period; today is assumed when absent")]
    pub start_date: Option<NaiveDate>,

    #[schemars(description = "End of the contract period; the 90-day horizon boundary is assumed when absent")]
    pub end_date: Option<NaiveDate>,

    #[serde(default)]
    #[schemars(description = "ISO currency code, informational only")]
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExpenseRecord {
    #[schemars(description = "Expense amount in the reporting currency")]
    pub amount: Option<f64>,

    #[schemars(description = "Date the expense was incurred")]
    pub expense_date: Option<NaiveDate>,

    #[serde(default)]
    #[schemars(description = "Expense category for the per-category run-rate breakdown")]
    pub category: Option<String>,

    #[serde(default)]
    #[schemars(description = "Approval status; 'rejected' expenses are ignored")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PaymentRecord {
    #[schemars(description = "Amount received in the reporting currency")]
    pub amount: Option<f64>,

    #[schemars(description = "Date the payment cleared")]
    pub payment_date: Option<NaiveDate>,

    #[serde(default)]
    #[schemars(description = "Settlement status; only 'completed' payments count toward realized revenue")]
    pub status: Option<String>,
}

/// A point-in-time, read-only snapshot of one tenant's financial records,
/// already filtered and flattened by the data layer. The engine never
/// mutates it and derives everything else fresh on each invocation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ForecastSnapshot {
    #[serde(default)]
    #[schemars(description = "Open and overdue invoices")]
    pub invoices: Vec<InvoiceRecord>,

    #[serde(default)]
    #[schemars(description = "Leads in open pipeline stages")]
    pub pipeline: Vec<PipelineLead>,

    #[serde(default)]
    #[schemars(description = "Proposals in sent or viewed status")]
    pub proposals: Vec<ProposalRecord>,

    #[serde(default)]
    #[schemars(description = "Active contracts")]
    pub contracts: Vec<ContractRecord>,

    #[serde(default)]
    #[schemars(description = "Historical expenses over the trailing 6 months, excluding rejected ones")]
    pub expenses: Vec<ExpenseRecord>,

    #[serde(default)]
    #[schemars(description = "Completed payments over the trailing 6 months")]
    pub payments: Vec<PaymentRecord>,
}

impl ForecastSnapshot {
    pub fn generate_json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(ForecastSnapshot)
    }

    pub fn schema_as_json() -> Result<String, serde_json::Error> {
        let schema = Self::generate_json_schema();
        serde_json::to_string_pretty(&schema)
    }
}
