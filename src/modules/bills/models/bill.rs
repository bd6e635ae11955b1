// Bill model (draft or persisted)
//
// A bill carries client details, ordered line items, ordered payment terms,
// terms & conditions and a bill-wide discount. Grand total, resolved discount
// and final amount are derived fields kept current by the editor; the
// persisted copy is owned by the billing backend.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::line_item::LineItem;
use super::payment_term::PaymentTerm;
use crate::core::numeric::lenient_decimal;

/// Kind of document rendered for the bill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DocumentType {
    #[default]
    Invoice,
    Quotation,
    Estimate,
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentType::Invoice => write!(f, "Invoice"),
            DocumentType::Quotation => write!(f, "Quotation"),
            DocumentType::Estimate => write!(f, "Estimate"),
        }
    }
}

/// Client salutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Title {
    #[default]
    #[serde(rename = "None")]
    Unspecified,
    Mr,
    Ms,
}

/// How the bill-wide discount value is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    /// Fixed currency amount, clamped to [0, grand total]
    #[default]
    Amount,
    /// Percentage of the grand total, clamped to [0, 100]
    Percentage,
}

impl std::fmt::Display for DiscountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiscountType::Amount => write!(f, "amount"),
            DiscountType::Percentage => write!(f, "percentage"),
        }
    }
}

/// Client block printed on the document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientDetails {
    #[serde(default)]
    pub title: Title,
    #[serde(default)]
    pub client_name: String,
    #[serde(default)]
    pub client_email: String,
    #[serde(default)]
    pub client_phone: String,
    #[serde(default)]
    pub client_address: String,
}

/// Issuing company block, carried through unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyDetails {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phones: Vec<String>,
}

/// Bill draft as held by the editor and sent to the billing backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    /// Backend identifier; `None` until the bill has been stored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Assigned by the backend, read-only in the editor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bill_number: Option<String>,

    #[serde(default)]
    pub document_type: DocumentType,

    pub bill_date: NaiveDate,

    #[serde(flatten)]
    pub client: ClientDetails,

    #[serde(default)]
    pub items: Vec<LineItem>,

    #[serde(default)]
    pub company_details: CompanyDetails,

    #[serde(default)]
    pub payment_terms: Vec<PaymentTerm>,

    #[serde(default)]
    pub terms_and_conditions: Vec<String>,

    #[serde(default)]
    pub discount_type: DiscountType,

    #[serde(default, deserialize_with = "lenient_decimal")]
    pub discount_value: Decimal,

    /// Sum of item totals
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub grand_total: Decimal,

    /// Resolved discount in currency
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub discount: Decimal,

    /// grand_total - discount
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub final_amount: Decimal,
}

impl Bill {
    /// Empty draft: one blank line item and one default payment term
    pub fn blank(company_details: CompanyDetails, bill_date: NaiveDate) -> Self {
        Self {
            id: None,
            bill_number: None,
            document_type: DocumentType::default(),
            bill_date,
            client: ClientDetails::default(),
            items: vec![LineItem::default()],
            company_details,
            payment_terms: vec![PaymentTerm::default()],
            terms_and_conditions: Vec::new(),
            discount_type: DiscountType::default(),
            discount_value: Decimal::ZERO,
            grand_total: Decimal::ZERO,
            discount: Decimal::ZERO,
            final_amount: Decimal::ZERO,
        }
    }

    /// Whether the backend already holds a copy of this bill
    pub fn is_stored(&self) -> bool {
        self.id.is_some()
    }
}

/// Record returned by the billing backend after create/update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredBill {
    #[serde(alias = "_id")]
    pub id: String,
    pub bill_number: String,
}

/// Display-only per-item figures after the equal discount split
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemBreakdown {
    pub total: Decimal,
    pub per_item_discount: Decimal,
    pub net_total: Decimal,
}

/// Fully resolved bill plus display-only breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputedBill {
    pub bill: Bill,
    pub per_item_discount: Decimal,
    pub item_breakdown: Vec<ItemBreakdown>,
}
