pub mod bill_repository;

pub use bill_repository::{BillStore, HttpBillStore};
