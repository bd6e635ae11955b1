// Editor recomputation cascade
//
// Each field edit must refresh the item, then grand total, discount, final
// amount and payment terms before the next edit is processed.

#[path = "../helpers/mod.rs"]
mod helpers;

use billwise::bills::models::{
    BillEdit, ClientField, DiscountType, ItemField, TermField, Unit, Workflow,
};
use billwise::bills::BillEditor;
use billwise::core::AppError;
use helpers::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn item(index: usize, edit: ItemField) -> BillEdit {
    BillEdit::Item { index, edit }
}

fn term(index: usize, edit: TermField) -> BillEdit {
    BillEdit::Term { index, edit }
}

#[test]
fn test_new_editor_starts_blank() {
    let editor = BillEditor::new(company(), bill_date());
    assert_eq!(editor.workflow(), Workflow::Create);
    assert_eq!(editor.bill().items.len(), 1);
    assert_eq!(editor.bill().payment_terms.len(), 1);
    assert_eq!(editor.bill().grand_total, Decimal::ZERO);
    assert_eq!(editor.bill().company_details, company());
}

#[test]
fn test_percentage_terms_follow_item_edits() {
    let mut editor = BillEditor::from_bill(sample_bill(), Workflow::Edit).unwrap();
    assert_eq!(editor.bill().grand_total, dec!(15000));
    assert_eq!(editor.bill().payment_terms[1].amount, dec!(7500));

    editor
        .apply(item(1, ItemField::PricePerUnit("15000".into())))
        .unwrap();
    assert_eq!(editor.bill().grand_total, dec!(25000));
    assert_eq!(editor.bill().payment_terms[0].amount, dec!(2000));
    assert_eq!(editor.bill().payment_terms[1].amount, dec!(12500));
}

#[test]
fn test_token_amount_editable_and_fixed() {
    let mut editor = BillEditor::from_bill(sample_bill(), Workflow::Edit).unwrap();
    editor.apply(term(0, TermField::Amount("3000".into()))).unwrap();
    assert_eq!(editor.bill().payment_terms[0].amount, dec!(3000));

    editor.apply(item(0, ItemField::Width("20".into()))).unwrap();
    assert_eq!(editor.bill().grand_total, dec!(25000));
    assert_eq!(editor.bill().payment_terms[0].amount, dec!(3000));
}

#[test]
fn test_note_change_from_token_recomputes_amount() {
    let mut editor = BillEditor::from_bill(sample_bill(), Workflow::Edit).unwrap();
    editor.apply(term(0, TermField::Percentage("10".into()))).unwrap();
    assert_eq!(editor.bill().payment_terms[0].amount, dec!(2000));

    editor.apply(term(0, TermField::Note(String::new()))).unwrap();
    assert_eq!(editor.bill().payment_terms[0].amount, dec!(1500));
}

#[test]
fn test_term_percentage_clamped() {
    let mut editor = BillEditor::from_bill(sample_bill(), Workflow::Edit).unwrap();
    editor.apply(term(1, TermField::Percentage("250".into()))).unwrap();
    assert_eq!(editor.bill().payment_terms[1].percentage, dec!(100));
    assert_eq!(editor.bill().payment_terms[1].amount, dec!(15000));
}

#[test]
fn test_amount_discount_resolves_against_smaller_grand_total() {
    let mut editor = BillEditor::from_bill(sample_bill(), Workflow::Edit).unwrap();
    editor
        .apply(BillEdit::DiscountValue { value: "12000".into() })
        .unwrap();
    assert_eq!(editor.bill().discount, dec!(12000));

    editor.apply(BillEdit::RemoveItem { index: 0 }).unwrap();
    assert_eq!(editor.bill().grand_total, dec!(5000));
    assert_eq!(editor.bill().discount_value, dec!(12000));
    assert_eq!(editor.bill().discount, dec!(5000));
    assert_eq!(editor.bill().final_amount, Decimal::ZERO);
}

#[test]
fn test_retyping_a_price_keeps_the_entered_discount() {
    let mut editor = BillEditor::from_bill(sample_bill(), Workflow::Edit).unwrap();
    editor
        .apply(BillEdit::DiscountValue { value: "8000".into() })
        .unwrap();

    editor
        .apply(item(0, ItemField::PricePerUnit("".into())))
        .unwrap();
    assert_eq!(editor.bill().grand_total, dec!(5000));
    assert_eq!(editor.bill().discount, dec!(5000));

    editor
        .apply(item(0, ItemField::PricePerUnit("100".into())))
        .unwrap();
    assert_eq!(editor.bill().grand_total, dec!(15000));
    assert_eq!(editor.bill().discount_value, dec!(8000));
    assert_eq!(editor.bill().discount, dec!(8000));
    assert_eq!(editor.bill().final_amount, dec!(7000));
}

#[test]
fn test_oversized_dimension_is_rejected_and_draft_kept() {
    let mut editor = BillEditor::from_bill(sample_bill(), Workflow::Edit).unwrap();
    editor
        .apply(item(0, ItemField::Width("1000000000000000".into())))
        .unwrap();
    let before = editor.bill().clone();

    let err = editor
        .apply(item(0, ItemField::Height("1000000000000000".into())))
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(editor.bill(), &before);
}

#[test]
fn test_oversized_loaded_bill_is_rejected() {
    let mut bill = sample_bill();
    bill.items[0].width = Decimal::from(1_000_000_000_000_000u64);
    bill.items[0].height = Decimal::from(1_000_000_000_000_000u64);
    assert!(matches!(
        BillEditor::from_bill(bill, Workflow::Edit),
        Err(AppError::Validation(_))
    ));
}

#[test]
fn test_discount_value_above_grand_total_is_clamped_on_entry() {
    let mut editor = BillEditor::from_bill(sample_bill(), Workflow::Edit).unwrap();
    editor
        .apply(BillEdit::DiscountValue { value: "99999".into() })
        .unwrap();
    assert_eq!(editor.bill().discount_value, dec!(15000));
    assert_eq!(editor.bill().final_amount, Decimal::ZERO);
}

#[test]
fn test_switching_percentage_to_amount_resets_value() {
    let mut editor = BillEditor::from_bill(sample_bill(), Workflow::Edit).unwrap();
    editor
        .apply(BillEdit::DiscountType { value: DiscountType::Percentage })
        .unwrap();
    editor
        .apply(BillEdit::DiscountValue { value: "20".into() })
        .unwrap();
    assert_eq!(editor.bill().discount, dec!(3000));

    editor
        .apply(BillEdit::DiscountType { value: DiscountType::Amount })
        .unwrap();
    assert_eq!(editor.bill().discount_value, Decimal::ZERO);
    assert_eq!(editor.bill().discount, Decimal::ZERO);
    assert_eq!(editor.bill().final_amount, dec!(15000));
}

#[test]
fn test_reordering_keeps_grand_total() {
    let mut editor = BillEditor::from_bill(sample_bill(), Workflow::Edit).unwrap();
    editor.apply(BillEdit::AddItem).unwrap();
    editor.apply(item(2, ItemField::Unit(Unit::Ls))).unwrap();
    editor
        .apply(item(2, ItemField::PricePerUnit("1250".into())))
        .unwrap();
    let before = editor.bill().grand_total;

    editor.apply(BillEdit::MoveItem { from: 2, to: 0 }).unwrap();
    assert_eq!(editor.bill().items[0].price_per_unit, dec!(1250));
    assert_eq!(editor.bill().grand_total, before);
    assert_eq!(before, dec!(16250));
}

#[test]
fn test_quantity_edit_in_edit_workflow() {
    let mut editor = BillEditor::from_bill(sample_bill(), Workflow::Edit).unwrap();
    editor.apply(item(1, ItemField::Quantity("3".into()))).unwrap();
    assert_eq!(editor.bill().items[1].total, dec!(15000));

    editor.apply(item(1, ItemField::Quantity("".into()))).unwrap();
    assert_eq!(editor.bill().items[1].quantity, 1);
    assert_eq!(editor.bill().items[1].total, dec!(5000));
}

#[test]
fn test_create_workflow_resets_loaded_quantities() {
    let mut bill = sample_bill();
    bill.items[1].quantity = 4;
    let editor = BillEditor::from_bill(bill, Workflow::Create).unwrap();
    assert_eq!(editor.bill().items[1].quantity, 1);
    assert_eq!(editor.bill().grand_total, dec!(15000));
}

#[test]
fn test_garbage_numeric_input_never_poisons_totals() {
    let mut editor = BillEditor::from_bill(sample_bill(), Workflow::Edit).unwrap();
    editor.apply(item(0, ItemField::Height("ten".into()))).unwrap();
    editor.apply(item(0, ItemField::Depth("??".into()))).unwrap();
    editor
        .apply(item(1, ItemField::PricePerUnit("".into())))
        .unwrap();

    assert_eq!(editor.bill().items[0].total, Decimal::ZERO);
    assert_eq!(editor.bill().items[1].total, Decimal::ZERO);
    assert_eq!(editor.bill().grand_total, Decimal::ZERO);
    assert_eq!(editor.bill().payment_terms[1].amount, Decimal::ZERO);
}

#[test]
fn test_clause_editing() {
    let mut editor = BillEditor::from_bill(sample_bill(), Workflow::Edit).unwrap();
    editor
        .apply(BillEdit::AddClause { text: "Prices valid for 30 days".into() })
        .unwrap();
    editor
        .apply(BillEdit::AddClause { text: "GST extra".into() })
        .unwrap();
    editor
        .apply(BillEdit::UpdateClause { index: 1, text: "GST extra as applicable".into() })
        .unwrap();
    editor.apply(BillEdit::RemoveClause { index: 0 }).unwrap();

    assert_eq!(
        editor.bill().terms_and_conditions,
        vec!["GST extra as applicable".to_string()]
    );
    assert!(editor.apply(BillEdit::RemoveClause { index: 5 }).is_err());
}

#[test]
fn test_client_edits_do_not_touch_totals() {
    let mut editor = BillEditor::from_bill(sample_bill(), Workflow::Edit).unwrap();
    editor
        .apply(BillEdit::Client { edit: ClientField::ClientName("Meera Iyer".into()) })
        .unwrap();
    assert_eq!(editor.bill().client.client_name, "Meera Iyer");
    assert_eq!(editor.bill().grand_total, dec!(15000));
}

#[test]
fn test_out_of_range_index_is_rejected_without_side_effects() {
    let mut editor = BillEditor::from_bill(sample_bill(), Workflow::Edit).unwrap();
    let before = editor.bill().clone();
    assert!(editor.apply(item(9, ItemField::Width("1".into()))).is_err());
    assert!(editor.apply(term(9, TermField::Stage("x".into()))).is_err());
    assert_eq!(editor.bill(), &before);
}
