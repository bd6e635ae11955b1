// LineItem model with per-item total calculation
//
// A line item is one row of an interior-design bill. Area-priced rows
// (`Sft`) are billed on width × height, metal fabrication rows (description
// mentions MS or SS) additionally multiply by depth. Flat-priced rows
// (`Lump` / `Ls`) ignore dimensions entirely.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::numeric::{
    default_quantity, lenient_decimal, lenient_optional_decimal, lenient_quantity,
};

/// Pricing mode of a line item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Unit {
    /// Square feet, priced on area (or volume for MS/SS fabrication)
    #[default]
    Sft,
    /// Lump sum, flat price
    Lump,
    /// Lump sum, alternate label used on older bills
    Ls,
}

impl Unit {
    /// Area-priced units consider width, height and depth
    pub fn is_area_priced(&self) -> bool {
        matches!(self, Unit::Sft)
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Unit::Sft => write!(f, "Sft"),
            Unit::Lump => write!(f, "Lump"),
            Unit::Ls => write!(f, "Ls"),
        }
    }
}

impl std::str::FromStr for Unit {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sft" => Ok(Unit::Sft),
            "lump" => Ok(Unit::Lump),
            "ls" => Ok(Unit::Ls),
            _ => Err(format!("Invalid unit: {}", s)),
        }
    }
}

/// Represents a single line item of a bill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Short label, e.g. "Wardrobe"
    #[serde(default)]
    pub particular: String,

    /// Free text or one of the predefined finish descriptions
    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub unit: Unit,

    #[serde(default, deserialize_with = "lenient_decimal")]
    pub width: Decimal,

    #[serde(default, deserialize_with = "lenient_decimal")]
    pub height: Decimal,

    /// Only used for MS/SS fabrication rows
    #[serde(
        default,
        deserialize_with = "lenient_optional_decimal",
        skip_serializing_if = "Option::is_none"
    )]
    pub depth: Option<Decimal>,

    #[serde(default = "default_quantity", deserialize_with = "lenient_quantity")]
    pub quantity: u32,

    #[serde(default, deserialize_with = "lenient_decimal")]
    pub price_per_unit: Decimal,

    /// Derived area (or volume); never authoritative
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub sft: Decimal,

    /// Derived currency amount; never authoritative
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub total: Decimal,
}

impl Default for LineItem {
    fn default() -> Self {
        Self {
            particular: String::new(),
            description: String::new(),
            unit: Unit::Sft,
            width: Decimal::ZERO,
            height: Decimal::ZERO,
            depth: None,
            quantity: 1,
            price_per_unit: Decimal::ZERO,
            sft: Decimal::ZERO,
            total: Decimal::ZERO,
        }
    }
}

impl LineItem {
    /// Area-priced line item
    pub fn area(
        particular: impl Into<String>,
        description: impl Into<String>,
        width: Decimal,
        height: Decimal,
        price_per_unit: Decimal,
    ) -> Self {
        Self {
            particular: particular.into(),
            description: description.into(),
            unit: Unit::Sft,
            width,
            height,
            price_per_unit,
            ..Self::default()
        }
    }

    /// Flat-priced line item
    pub fn lump(
        particular: impl Into<String>,
        description: impl Into<String>,
        price_per_unit: Decimal,
        quantity: u32,
    ) -> Self {
        Self {
            particular: particular.into(),
            description: description.into(),
            unit: Unit::Lump,
            price_per_unit,
            quantity,
            ..Self::default()
        }
    }

    pub fn with_depth(mut self, depth: Decimal) -> Self {
        self.depth = Some(depth);
        self
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Metal fabrication rows (mild steel / stainless steel) are priced by
    /// volume. Detected by a case-insensitive "ms" or "ss" anywhere in the
    /// description.
    pub fn is_metal_fabrication(&self) -> bool {
        let description = self.description.to_lowercase();
        description.contains("ms") || description.contains("ss")
    }
}
