// Bills module

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{Bill, BillEdit, ComputedBill, LineItem, PaymentTerm, StoredBill, Workflow};
pub use repositories::{BillStore, HttpBillStore};
pub use services::{BillCalculator, BillEditor, SubmissionPhase, SubmissionService};
