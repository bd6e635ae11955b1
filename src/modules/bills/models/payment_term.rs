use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::numeric::lenient_decimal;

/// Note value marking a term whose amount is fixed by the user
pub const TOKEN_NOTE: &str = "Token";

/// Milestone payment stage of a bill
///
/// Amount is derived as a percentage of the grand total unless the note is
/// exactly [`TOKEN_NOTE`], in which case the amount is authoritative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentTerm {
    #[serde(default)]
    pub stage: String,

    /// 0 to 100; ignored for Token terms
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub percentage: Decimal,

    #[serde(default, deserialize_with = "lenient_decimal")]
    pub amount: Decimal,

    #[serde(default)]
    pub note: String,
}

impl Default for PaymentTerm {
    fn default() -> Self {
        Self {
            stage: "Confirmation advance".to_string(),
            percentage: Decimal::ZERO,
            amount: Decimal::ZERO,
            note: String::new(),
        }
    }
}

impl PaymentTerm {
    pub fn percentage(stage: impl Into<String>, percentage: Decimal) -> Self {
        Self {
            stage: stage.into(),
            percentage,
            amount: Decimal::ZERO,
            note: String::new(),
        }
    }

    pub fn token(stage: impl Into<String>, amount: Decimal) -> Self {
        Self {
            stage: stage.into(),
            percentage: Decimal::ZERO,
            amount,
            note: TOKEN_NOTE.to_string(),
        }
    }

    pub fn is_token(&self) -> bool {
        self.note == TOKEN_NOTE
    }
}
