use rust_decimal::Decimal;
use tracing::debug;

use crate::core::numeric::{clamp, non_negative, normalize_quantity, MONEY_SCALE};
use crate::core::{AppError, Result};
use crate::modules::bills::models::{
    Bill, ComputedBill, DiscountType, ItemBreakdown, LineItem, PaymentTerm,
};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Stateless bill arithmetic shared by the create and edit workflows
///
/// Every function takes plain values and returns plain values; nothing here
/// reads session state. The editor calls these in cascade order: item total,
/// grand total, discount, final amount, payment terms.
///
/// Products and sums that can exceed the `Decimal` range return
/// `AppError::Validation` instead of panicking.
pub struct BillCalculator;

fn checked_mul(lhs: Decimal, rhs: Decimal) -> Result<Decimal> {
    lhs.checked_mul(rhs)
        .ok_or_else(|| AppError::validation("Line item amount is too large"))
}

impl BillCalculator {
    /// Area (or volume) of an item
    ///
    /// `Sft`: width × height, times depth for MS/SS fabrication (missing depth
    /// counts as 1). Flat-rate units have no area.
    pub fn item_area(item: &LineItem) -> Result<Decimal> {
        if !item.unit.is_area_priced() {
            return Ok(Decimal::ZERO);
        }

        let area = checked_mul(non_negative(item.width), non_negative(item.height))?;
        if item.is_metal_fabrication() {
            let depth = item
                .depth
                .map(non_negative)
                .filter(|depth| !depth.is_zero())
                .unwrap_or(Decimal::ONE);
            checked_mul(area, depth)
        } else {
            Ok(area)
        }
    }

    /// Currency total of an item
    ///
    /// `Sft`: area × price × quantity. Flat-rate: price × quantity.
    pub fn item_total(item: &LineItem) -> Result<Decimal> {
        let quantity = Decimal::from(normalize_quantity(item.quantity));
        let price = non_negative(item.price_per_unit);

        if item.unit.is_area_priced() {
            checked_mul(checked_mul(Self::item_area(item)?, price)?, quantity)
        } else {
            checked_mul(price, quantity)
        }
    }

    /// Refresh an item's derived `sft` and `total` in place
    ///
    /// On overflow the item is left as it was.
    pub fn recompute_item(item: &mut LineItem) -> Result<()> {
        let sft = Self::item_area(item)?;
        let total = Self::item_total(item)?;
        item.sft = sft;
        item.total = total;
        Ok(())
    }

    /// Sum of item totals
    pub fn grand_total(items: &[LineItem]) -> Result<Decimal> {
        items.iter().try_fold(Decimal::ZERO, |sum, item| {
            sum.checked_add(item.total)
                .ok_or_else(|| AppError::validation("Grand total is too large"))
        })
    }

    /// Clamp a discount value to what the discount type allows
    ///
    /// Percentage: [0, 100]. Amount: [0, grand total].
    pub fn clamp_discount_value(
        discount_type: DiscountType,
        value: Decimal,
        grand_total: Decimal,
    ) -> Decimal {
        match discount_type {
            DiscountType::Percentage => clamp(value, Decimal::ZERO, HUNDRED),
            DiscountType::Amount => clamp(value, Decimal::ZERO, non_negative(grand_total)),
        }
    }

    /// Resolved discount in currency
    pub fn resolve_discount(
        discount_type: DiscountType,
        value: Decimal,
        grand_total: Decimal,
    ) -> Decimal {
        let value = Self::clamp_discount_value(discount_type, value, grand_total);
        match discount_type {
            // fraction first so the product never exceeds the grand total
            DiscountType::Percentage => grand_total * (value / HUNDRED),
            DiscountType::Amount => value,
        }
    }

    pub fn final_amount(grand_total: Decimal, discount: Decimal) -> Decimal {
        grand_total - discount
    }

    /// Equal share of the discount per item, for display only
    ///
    /// Split evenly across items regardless of each item's value.
    pub fn per_item_discount(total_discount: Decimal, item_count: usize) -> Decimal {
        if item_count == 0 {
            return Decimal::ZERO;
        }
        (total_discount / Decimal::from(item_count)).round_dp(MONEY_SCALE)
    }

    /// Per-item total, discount share and net total, for display only
    pub fn item_breakdown(items: &[LineItem], total_discount: Decimal) -> Vec<ItemBreakdown> {
        let share = Self::per_item_discount(total_discount, items.len());
        items
            .iter()
            .map(|item| ItemBreakdown {
                total: item.total,
                per_item_discount: share,
                net_total: (item.total - share).round_dp(MONEY_SCALE),
            })
            .collect()
    }

    /// Resolved amount of one payment term
    ///
    /// Token terms keep their user-entered amount.
    pub fn resolve_term_amount(term: &PaymentTerm, grand_total: Decimal) -> Decimal {
        if term.is_token() {
            term.amount
        } else {
            grand_total * (clamp(term.percentage, Decimal::ZERO, HUNDRED) / HUNDRED)
        }
    }

    /// Refresh every non-Token term's amount in place
    pub fn resolve_terms(terms: &mut [PaymentTerm], grand_total: Decimal) {
        for term in terms.iter_mut() {
            term.amount = Self::resolve_term_amount(term, grand_total);
        }
    }

    /// Apply the whole cascade to a bill in place
    pub fn recompute(bill: &mut Bill) -> Result<()> {
        for item in bill.items.iter_mut() {
            Self::recompute_item(item)?;
        }
        Self::recompute_totals(bill)
    }

    /// Cascade from grand total onward; item totals must already be current
    ///
    /// The entered `discount_value` is kept as is; only the resolved
    /// `discount` is clamped to the current grand total.
    pub fn recompute_totals(bill: &mut Bill) -> Result<()> {
        bill.grand_total = Self::grand_total(&bill.items)?;
        bill.discount =
            Self::resolve_discount(bill.discount_type, bill.discount_value, bill.grand_total);
        bill.final_amount = Self::final_amount(bill.grand_total, bill.discount);
        Self::resolve_terms(&mut bill.payment_terms, bill.grand_total);

        debug!(
            grand_total = %bill.grand_total,
            discount = %bill.discount,
            final_amount = %bill.final_amount,
            "Recomputed bill totals"
        );
        Ok(())
    }

    /// Fully resolved copy of a bill with the display breakdown
    pub fn compute(bill: &Bill) -> Result<ComputedBill> {
        let mut resolved = bill.clone();
        Self::recompute(&mut resolved)?;
        Ok(Self::summarize(resolved))
    }

    /// Display breakdown of a bill whose derived fields are already current
    pub fn summarize(resolved: Bill) -> ComputedBill {
        let per_item_discount = Self::per_item_discount(resolved.discount, resolved.items.len());
        let item_breakdown = Self::item_breakdown(&resolved.items, resolved.discount);

        ComputedBill {
            bill: resolved,
            per_item_discount,
            item_breakdown,
        }
    }
}
