use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::core::numeric::{clamp, decimal_or_zero, non_negative, parse_decimal, quantity_or_one};
use crate::core::{AppError, FieldError, Result};
use crate::modules::bills::models::{
    Bill, BillEdit, ClientField, CompanyDetails, ComputedBill, ItemField, LineItem, PaymentTerm,
    StoredBill, TermField, Workflow,
};
use crate::modules::bills::services::BillCalculator;

/// Where the draft is in the submit lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionPhase {
    /// Default; edits are accepted and recomputed live
    Editing,
    /// A submission is in flight; edits and new submissions are refused
    Submitting,
    /// Stored and rendered; waiting for the UI to leave the editor
    Succeeded,
    /// Editor closed, draft discarded from the editor's point of view
    Navigated,
}

/// Owner of one bill draft
///
/// Every edit runs the recomputation cascade synchronously before returning:
/// the edited item's `sft`/`total`, then grand total, discount clamp and
/// resolution, final amount and payment-term amounts.
#[derive(Debug, Clone)]
pub struct BillEditor {
    bill: Bill,
    workflow: Workflow,
    phase: SubmissionPhase,
    last_error: Option<String>,
}

impl BillEditor {
    /// Fresh draft for the create workflow
    pub fn new(company_details: CompanyDetails, bill_date: chrono::NaiveDate) -> Self {
        // a blank draft has nothing to resolve
        Self::with_resolved(Bill::blank(company_details, bill_date), Workflow::Create)
    }

    /// Load an existing or client-supplied bill; all derived fields are recomputed
    pub fn from_bill(mut bill: Bill, workflow: Workflow) -> Result<Self> {
        if workflow == Workflow::Create {
            for item in bill.items.iter_mut() {
                item.quantity = 1;
            }
        }
        BillCalculator::recompute(&mut bill)?;

        Ok(Self::with_resolved(bill, workflow))
    }

    fn with_resolved(bill: Bill, workflow: Workflow) -> Self {
        Self {
            bill,
            workflow,
            phase: SubmissionPhase::Editing,
            last_error: None,
        }
    }

    pub fn bill(&self) -> &Bill {
        &self.bill
    }

    pub fn into_bill(self) -> Bill {
        self.bill
    }

    pub fn workflow(&self) -> Workflow {
        self.workflow
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    /// Message for the error banner after a failed submission
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Fully resolved copy of the draft with the per-item display breakdown
    pub fn snapshot(&self) -> ComputedBill {
        BillCalculator::summarize(self.bill.clone())
    }

    /// Apply a batch of edits, stopping at the first rejected one
    pub fn apply_all<I>(&mut self, edits: I) -> Result<()>
    where
        I: IntoIterator<Item = BillEdit>,
    {
        for edit in edits {
            self.apply(edit)?;
        }
        Ok(())
    }

    /// Apply one field edit and run the cascade it triggers
    ///
    /// A rejected edit leaves the draft exactly as it was.
    pub fn apply(&mut self, edit: BillEdit) -> Result<()> {
        self.ensure_editable()?;

        let before = self.bill.clone();
        if let Err(err) = self.apply_edit(edit) {
            self.bill = before;
            return Err(err);
        }
        Ok(())
    }

    fn apply_edit(&mut self, edit: BillEdit) -> Result<()> {
        match edit {
            BillEdit::Client { edit } => self.apply_client(edit),
            BillEdit::DocumentType { value } => self.bill.document_type = value,
            BillEdit::BillDate { value } => self.bill.bill_date = value,
            BillEdit::AddItem => {
                self.bill.items.push(LineItem::default());
                self.recompute_totals()?;
            }
            BillEdit::RemoveItem { index } => {
                self.check_item(index)?;
                if self.bill.items.len() == 1 {
                    return Err(AppError::validation(
                        "A bill needs at least one line item",
                    ));
                }
                self.bill.items.remove(index);
                self.recompute_totals()?;
            }
            BillEdit::MoveItem { from, to } => {
                if self.workflow == Workflow::Create {
                    return Err(AppError::validation(
                        "Line items can only be reordered when editing a saved bill",
                    ));
                }
                self.check_item(from)?;
                self.check_item(to)?;
                let item = self.bill.items.remove(from);
                self.bill.items.insert(to, item);
                self.recompute_totals()?;
            }
            BillEdit::Item { index, edit } => self.apply_item(index, edit)?,
            BillEdit::AddTerm => {
                self.bill.payment_terms.push(PaymentTerm::percentage("", Decimal::ZERO));
            }
            BillEdit::RemoveTerm { index } => {
                self.check_term(index)?;
                self.bill.payment_terms.remove(index);
            }
            BillEdit::Term { index, edit } => self.apply_term(index, edit)?,
            BillEdit::DiscountType { value } => {
                if value != self.bill.discount_type {
                    // a percentage must never be read back as a currency amount
                    self.bill.discount_type = value;
                    self.bill.discount_value = Decimal::ZERO;
                }
                self.recompute_totals()?;
            }
            BillEdit::DiscountValue { value } => {
                self.bill.discount_value = BillCalculator::clamp_discount_value(
                    self.bill.discount_type,
                    decimal_or_zero(&value),
                    self.bill.grand_total,
                );
                self.recompute_totals()?;
            }
            BillEdit::AddClause { text } => self.bill.terms_and_conditions.push(text),
            BillEdit::UpdateClause { index, text } => {
                let clause = self
                    .bill
                    .terms_and_conditions
                    .get_mut(index)
                    .ok_or_else(|| AppError::validation(format!("No clause at index {}", index)))?;
                *clause = text;
            }
            BillEdit::RemoveClause { index } => {
                if index >= self.bill.terms_and_conditions.len() {
                    return Err(AppError::validation(format!(
                        "No clause at index {}",
                        index
                    )));
                }
                self.bill.terms_and_conditions.remove(index);
            }
        }

        Ok(())
    }

    fn apply_client(&mut self, edit: ClientField) {
        let client = &mut self.bill.client;
        match edit {
            ClientField::Title(title) => client.title = title,
            ClientField::ClientName(value) => client.client_name = value,
            ClientField::ClientEmail(value) => client.client_email = value,
            ClientField::ClientPhone(value) => client.client_phone = value,
            ClientField::ClientAddress(value) => client.client_address = value,
        }
    }

    fn apply_item(&mut self, index: usize, edit: ItemField) -> Result<()> {
        self.check_item(index)?;
        if self.workflow == Workflow::Create && matches!(edit, ItemField::Quantity(_)) {
            return Err(AppError::validation(
                "Quantity is fixed at 1 when creating a bill",
            ));
        }

        let recompute = edit.affects_total();
        let item = &mut self.bill.items[index];
        match edit {
            ItemField::Particular(value) => item.particular = value,
            ItemField::Description(value) => item.description = value,
            ItemField::Unit(unit) => item.unit = unit,
            ItemField::Width(raw) => item.width = decimal_or_zero(&raw),
            ItemField::Height(raw) => item.height = decimal_or_zero(&raw),
            ItemField::Depth(raw) => item.depth = parse_decimal(&raw).map(non_negative),
            ItemField::Quantity(raw) => item.quantity = quantity_or_one(&raw),
            ItemField::PricePerUnit(raw) => item.price_per_unit = decimal_or_zero(&raw),
        }

        if recompute {
            BillCalculator::recompute_item(item)?;
            debug!(index, sft = %item.sft, total = %item.total, "Recomputed line item");
            self.recompute_totals()?;
        }

        Ok(())
    }

    fn apply_term(&mut self, index: usize, edit: TermField) -> Result<()> {
        self.check_term(index)?;

        let term = &mut self.bill.payment_terms[index];
        match edit {
            TermField::Stage(value) => term.stage = value,
            TermField::Percentage(raw) => {
                term.percentage = clamp(decimal_or_zero(&raw), Decimal::ZERO, Decimal::ONE_HUNDRED)
            }
            TermField::Amount(raw) => {
                if term.is_token() {
                    term.amount = decimal_or_zero(&raw);
                } else {
                    debug!(index, "Ignoring amount edit on percentage-based term");
                }
            }
            TermField::Note(value) => term.note = value,
        }

        term.amount = BillCalculator::resolve_term_amount(term, self.bill.grand_total);
        Ok(())
    }

    fn recompute_totals(&mut self) -> Result<()> {
        BillCalculator::recompute_totals(&mut self.bill)
    }

    fn check_item(&self, index: usize) -> Result<()> {
        if index >= self.bill.items.len() {
            return Err(AppError::validation(format!(
                "No line item at index {}",
                index
            )));
        }
        Ok(())
    }

    fn check_term(&self, index: usize) -> Result<()> {
        if index >= self.bill.payment_terms.len() {
            return Err(AppError::validation(format!(
                "No payment term at index {}",
                index
            )));
        }
        Ok(())
    }

    fn ensure_editable(&self) -> Result<()> {
        match self.phase {
            SubmissionPhase::Editing => Ok(()),
            SubmissionPhase::Submitting => Err(AppError::SubmissionInProgress),
            SubmissionPhase::Succeeded | SubmissionPhase::Navigated => Err(
                AppError::validation("Bill has already been submitted"),
            ),
        }
    }

    /// Inline validation of required fields
    ///
    /// Collects every problem rather than stopping at the first one.
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();
        let client = &self.bill.client;

        let required = [
            ("clientName", &client.client_name, "Client name is required"),
            ("clientEmail", &client.client_email, "Client email is required"),
            ("clientPhone", &client.client_phone, "Client phone is required"),
            ("clientAddress", &client.client_address, "Client address is required"),
        ];
        for (field, value, message) in required {
            if value.trim().is_empty() {
                errors.push(FieldError::new(field, message));
            }
        }

        if self.bill.items.is_empty() {
            errors.push(FieldError::new("items", "At least one line item is required"));
        }
        for (idx, item) in self.bill.items.iter().enumerate() {
            if item.particular.trim().is_empty() {
                errors.push(FieldError::new(
                    format!("items[{}].particular", idx),
                    "Particular is required",
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::InvalidFields(errors))
        }
    }

    /// Editing -> Submitting
    ///
    /// Validates first; returns the resolved snapshot to send to the backend.
    pub fn begin_submission(&mut self) -> Result<ComputedBill> {
        self.ensure_editable()?;
        self.validate()?;

        self.phase = SubmissionPhase::Submitting;
        self.last_error = None;
        info!(
            bill_number = ?self.bill.bill_number,
            workflow = ?self.workflow,
            "Submitting bill"
        );

        Ok(self.snapshot())
    }

    /// Adopt the identifiers assigned by the backend
    pub fn record_stored(&mut self, stored: &StoredBill) {
        self.bill.id = Some(stored.id.clone());
        self.bill.bill_number = Some(stored.bill_number.clone());
    }

    /// Submitting -> Editing, keeping every field value
    pub fn fail_submission(&mut self, error: &AppError) {
        warn!(error = %error, "Bill submission failed");
        self.phase = SubmissionPhase::Editing;
        self.last_error = Some(error.user_message());
    }

    /// Submitting -> Succeeded
    pub fn complete_submission(&mut self) {
        info!(bill_number = ?self.bill.bill_number, "Bill submitted");
        self.phase = SubmissionPhase::Succeeded;
        self.last_error = None;
    }

    /// Succeeded -> Navigated
    pub fn navigate_away(&mut self) -> Result<()> {
        if self.phase != SubmissionPhase::Succeeded {
            return Err(AppError::validation(
                "Only a successfully submitted bill can leave the editor",
            ));
        }
        self.phase = SubmissionPhase::Navigated;
        Ok(())
    }
}
