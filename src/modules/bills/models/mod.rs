mod bill;
mod edit;
mod line_item;
mod payment_term;

pub use bill::{
    Bill, ClientDetails, CompanyDetails, ComputedBill, DiscountType, DocumentType,
    ItemBreakdown, StoredBill, Title,
};
pub use edit::{BillEdit, ClientField, ItemField, TermField, Workflow};
pub use line_item::{LineItem, Unit};
pub use payment_term::{PaymentTerm, TOKEN_NOTE};
