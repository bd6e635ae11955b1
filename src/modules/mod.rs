pub mod bills;
pub mod documents;
pub mod health;
