pub mod bill_calculator;
pub mod bill_editor;
pub mod submission_service;

pub use bill_calculator::BillCalculator;
pub use bill_editor::{BillEditor, SubmissionPhase};
pub use submission_service::{SubmissionReceipt, SubmissionService};
