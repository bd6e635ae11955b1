// Lenient numeric input: cleared or garbled fields fall back to 0 (or 1 for
// quantity) and can never poison a total.

use billwise::core::numeric::{decimal_or_zero, parse_decimal, quantity_or_one};
use proptest::prelude::*;
use rust_decimal::Decimal;

proptest! {
    /// Property: any text parses to a non-negative amount without panicking
    #[test]
    fn test_amount_parse_never_panics(text in ".*") {
        prop_assert!(decimal_or_zero(&text) >= Decimal::ZERO);
    }

    /// Property: any text yields a quantity of at least 1
    #[test]
    fn test_quantity_parse_at_least_one(text in ".*") {
        prop_assert!(quantity_or_one(&text) >= 1);
    }

    /// Property: well-formed non-negative integers round-trip exactly
    #[test]
    fn test_integers_parse_exactly(value in 0u32..1_000_000) {
        prop_assert_eq!(decimal_or_zero(&value.to_string()), Decimal::from(value));
        prop_assert_eq!(parse_decimal(&value.to_string()), Some(Decimal::from(value)));
    }
}
