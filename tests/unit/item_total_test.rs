// Property-based tests for line-item totals and grand total aggregation
//
// Properties tested:
// 1. Sft items: total = width × height × price × quantity
// 2. MS/SS items additionally multiply by depth (missing depth counts as 1)
// 3. Flat-rate items ignore dimensions
// 4. Grand total is the sum of item totals and does not depend on order

use billwise::bills::models::{Bill, LineItem, Unit};
use billwise::core::AppError;
use billwise::bills::BillCalculator;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn recomputed(mut item: LineItem) -> LineItem {
    BillCalculator::recompute_item(&mut item).unwrap();
    item
}

#[test]
fn test_area_item_total() {
    let item = recomputed(LineItem::area("Wardrobe", "Laminate", dec!(10), dec!(5), dec!(100)));
    assert_eq!(item.sft, dec!(50));
    assert_eq!(item.total, dec!(5000));
}

#[test]
fn test_ms_railing_uses_depth() {
    let item = recomputed(
        LineItem::area("Balcony", "MS railing", dec!(2), dec!(3), dec!(50)).with_depth(dec!(4)),
    );
    assert_eq!(item.sft, dec!(24));
    assert_eq!(item.total, dec!(1200));
}

#[test]
fn test_lump_item_ignores_dimensions() {
    let mut item = LineItem::lump("False ceiling", "Gypsum", dec!(7500), 2);
    item.width = dec!(40);
    item.height = dec!(12);
    let item = recomputed(item);
    assert_eq!(item.total, dec!(15000));
    assert_eq!(item.sft, Decimal::ZERO);
}

#[test]
fn test_fractional_dimensions() {
    let item = recomputed(LineItem::area("Shelf", "Veneer", dec!(2.5), dec!(1.5), dec!(80)));
    assert_eq!(item.sft, dec!(3.75));
    assert_eq!(item.total, dec!(300));
}

#[test]
fn test_glass_counts_as_metal_by_substring() {
    // "glass" contains "ss"; the substring rule applies as-is
    let item = recomputed(
        LineItem::area("Partition", "Toughened glass", dec!(4), dec!(7), dec!(10))
            .with_depth(dec!(2)),
    );
    assert_eq!(item.sft, dec!(56));
}

#[test]
fn test_quantity_multiplies_area_items() {
    let item = recomputed(
        LineItem::area("Shutter", "Acrylic", dec!(2), dec!(3), dec!(100)).with_quantity(4),
    );
    assert_eq!(item.total, dec!(2400));
}

#[test]
fn test_oversized_input_is_rejected_not_panicking() {
    let bill: Bill = serde_json::from_str(
        r#"{"billDate": "2026-04-01", "items": [{"particular": "Facade", "unit": "Sft",
            "width": "1000000000000000", "height": "1000000000000000", "pricePerUnit": "1"}]}"#,
    )
    .unwrap();

    match BillCalculator::compute(&bill) {
        Err(AppError::Validation(message)) => assert!(message.contains("too large")),
        other => panic!("expected a validation error, got {:?}", other),
    }
}

#[test]
fn test_large_but_representable_total() {
    let item = recomputed(LineItem::area(
        "Facade",
        "Cladding",
        dec!(1000000),
        dec!(1000000),
        dec!(1000000),
    ));
    assert_eq!(item.total, dec!(1000000000000000000));
}

fn arb_item() -> impl Strategy<Value = LineItem> {
    (
        prop_oneof![Just(Unit::Sft), Just(Unit::Lump), Just(Unit::Ls)],
        prop_oneof![Just(""), Just("MS frame"), Just("ss sink"), Just("Laminate")],
        0u32..500,
        0u32..500,
        proptest::option::of(0u32..20),
        1u32..10,
        0u32..100_000,
    )
        .prop_map(|(unit, description, width, height, depth, quantity, price)| LineItem {
            particular: "Item".to_string(),
            description: description.to_string(),
            unit,
            width: Decimal::from(width),
            height: Decimal::from(height),
            depth: depth.map(Decimal::from),
            quantity,
            price_per_unit: Decimal::from(price),
            ..LineItem::default()
        })
}

proptest! {
    /// Property: flat-rate totals never depend on width/height/depth
    #[test]
    fn test_flat_rate_independent_of_dimensions(
        price in 0u32..1_000_000,
        quantity in 1u32..50,
        width in 0u32..1000,
        height in 0u32..1000,
    ) {
        let mut item = LineItem::lump("Work", "MS", Decimal::from(price), quantity);
        item.width = Decimal::from(width);
        item.height = Decimal::from(height);
        item.depth = Some(Decimal::from(width));

        prop_assert_eq!(
            BillCalculator::item_total(&item).unwrap(),
            Decimal::from(price) * Decimal::from(quantity)
        );
    }

    /// Property: totals are never negative
    #[test]
    fn test_item_total_non_negative(item in arb_item()) {
        prop_assert!(BillCalculator::item_total(&item).unwrap() >= Decimal::ZERO);
    }

    /// Property: grand total = Σ item totals, for any order of items
    #[test]
    fn test_grand_total_is_order_independent(
        items in proptest::collection::vec(arb_item(), 0..12),
        rotation in 0usize..12,
    ) {
        let items: Vec<LineItem> = items.into_iter().map(recomputed).collect();
        let expected: Decimal = items.iter().map(|item| item.total).sum();
        prop_assert_eq!(BillCalculator::grand_total(&items).unwrap(), expected);

        let mut reordered = items.clone();
        reordered.reverse();
        if !reordered.is_empty() {
            let shift = rotation % reordered.len();
            reordered.rotate_left(shift);
        }
        prop_assert_eq!(BillCalculator::grand_total(&reordered).unwrap(), expected);
    }
}
