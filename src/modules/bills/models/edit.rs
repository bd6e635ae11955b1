// Field-level edits applied to a bill draft
//
// Numeric values arrive as raw form text and are parsed leniently by the
// editor. The enums are serde-tagged so a browser client can replay a batch
// of edits against a draft through the HTTP layer.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::bill::{DiscountType, DocumentType, Title};
use super::line_item::Unit;

/// Which editor the draft belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Workflow {
    /// New bill; quantity fixed at 1, no reordering
    #[default]
    Create,
    /// Existing bill; quantity, reordering and per-item discount display
    Edit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum ClientField {
    Title(Title),
    ClientName(String),
    ClientEmail(String),
    ClientPhone(String),
    ClientAddress(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum ItemField {
    Particular(String),
    Description(String),
    Unit(Unit),
    Width(String),
    Height(String),
    Depth(String),
    Quantity(String),
    PricePerUnit(String),
}

impl ItemField {
    /// Edits that change the item's own total
    pub fn affects_total(&self) -> bool {
        !matches!(self, ItemField::Particular(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum TermField {
    Stage(String),
    Percentage(String),
    Amount(String),
    Note(String),
}

/// One user edit on the draft
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum BillEdit {
    Client { edit: ClientField },
    DocumentType { value: DocumentType },
    BillDate { value: NaiveDate },
    AddItem,
    RemoveItem { index: usize },
    MoveItem { from: usize, to: usize },
    Item { index: usize, edit: ItemField },
    AddTerm,
    RemoveTerm { index: usize },
    Term { index: usize, edit: TermField },
    DiscountType { value: DiscountType },
    DiscountValue { value: String },
    AddClause { text: String },
    UpdateClause { index: usize, text: String },
    RemoveClause { index: usize },
}
