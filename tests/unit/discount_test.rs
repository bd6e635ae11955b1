// Discount resolution tests
//
// Percentage discounts are clamped to [0, 100], amount discounts to
// [0, grand total]; the final amount is grand total minus the resolved
// discount and therefore never negative.

use billwise::bills::models::DiscountType;
use billwise::bills::BillCalculator;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[test]
fn test_percentage_discount() {
    let discount =
        BillCalculator::resolve_discount(DiscountType::Percentage, dec!(10), dec!(10000));
    assert_eq!(discount, dec!(1000));
    assert_eq!(BillCalculator::final_amount(dec!(10000), discount), dec!(9000));
}

#[test]
fn test_amount_discount_equal_to_grand_total() {
    let discount =
        BillCalculator::resolve_discount(DiscountType::Amount, dec!(10000), dec!(10000));
    assert_eq!(discount, dec!(10000));
    assert_eq!(BillCalculator::final_amount(dec!(10000), discount), Decimal::ZERO);
}

#[test]
fn test_amount_discount_clamped_to_grand_total() {
    assert_eq!(
        BillCalculator::clamp_discount_value(DiscountType::Amount, dec!(10001), dec!(10000)),
        dec!(10000)
    );
    assert_eq!(
        BillCalculator::clamp_discount_value(DiscountType::Amount, dec!(-5), dec!(10000)),
        Decimal::ZERO
    );
}

#[test]
fn test_percentage_clamped_to_hundred() {
    assert_eq!(
        BillCalculator::clamp_discount_value(DiscountType::Percentage, dec!(120), dec!(500)),
        dec!(100)
    );
}

#[test]
fn test_amount_discount_on_empty_bill() {
    assert_eq!(
        BillCalculator::resolve_discount(DiscountType::Amount, dec!(500), Decimal::ZERO),
        Decimal::ZERO
    );
}

#[test]
fn test_per_item_discount_rounds_for_display() {
    assert_eq!(BillCalculator::per_item_discount(dec!(1000), 3), dec!(333.33));
}

proptest! {
    /// Property: final amount stays within [0, grand total]
    #[test]
    fn test_final_amount_bounds(
        grand_total in 0u64..10_000_000,
        value in 0u64..20_000_000,
        percentage in any::<bool>(),
    ) {
        let grand_total = Decimal::from(grand_total);
        let discount_type = if percentage {
            DiscountType::Percentage
        } else {
            DiscountType::Amount
        };

        let discount =
            BillCalculator::resolve_discount(discount_type, Decimal::from(value), grand_total);
        let final_amount = BillCalculator::final_amount(grand_total, discount);

        prop_assert!(final_amount >= Decimal::ZERO);
        prop_assert!(final_amount <= grand_total);
    }
}
