use std::sync::Arc;

use tracing::info;

use crate::core::{AppError, Result};
use crate::modules::bills::models::{ComputedBill, StoredBill};
use crate::modules::bills::repositories::BillStore;
use crate::modules::bills::services::BillEditor;
use crate::modules::documents::{DocumentRenderer, RenderedDocument};

/// Result of a successful submission
#[derive(Debug, Clone)]
pub struct SubmissionReceipt {
    pub stored: StoredBill,
    pub computed: ComputedBill,
    pub document: RenderedDocument,
}

/// Drives a draft through save and document generation
///
/// The two collaborator calls run strictly in sequence and are never retried.
/// Any failure puts the editor back into editing with the draft untouched.
pub struct SubmissionService {
    store: Arc<dyn BillStore>,
    renderer: Arc<dyn DocumentRenderer>,
}

impl SubmissionService {
    pub fn new(store: Arc<dyn BillStore>, renderer: Arc<dyn DocumentRenderer>) -> Self {
        Self { store, renderer }
    }

    /// Submit the editor's draft
    ///
    /// A draft that already has a backend id is updated, otherwise created.
    /// When the save succeeds but rendering fails, the editor keeps the new
    /// id so that resubmitting updates the same bill.
    pub async fn submit(&self, editor: &mut BillEditor) -> Result<SubmissionReceipt> {
        let mut computed = editor.begin_submission()?;

        let stored = match self.persist(&computed).await {
            Ok(stored) => stored,
            Err(err) => {
                let err = match err {
                    AppError::Persistence(_) => err,
                    other => AppError::persistence(other.to_string()),
                };
                editor.fail_submission(&err);
                return Err(err);
            }
        };
        editor.record_stored(&stored);
        computed.bill.id = Some(stored.id.clone());
        computed.bill.bill_number = Some(stored.bill_number.clone());
        info!(bill_id = %stored.id, bill_number = %stored.bill_number, "Bill stored");

        let document = match self.renderer.render(&stored.id).await {
            Ok(document) => document,
            Err(err) => {
                let err = match err {
                    AppError::DocumentGeneration { .. } => err,
                    other => AppError::document(stored.id.clone(), other.to_string()),
                };
                editor.fail_submission(&err);
                return Err(err);
            }
        };

        editor.complete_submission();
        Ok(SubmissionReceipt {
            stored,
            computed,
            document,
        })
    }

    async fn persist(&self, computed: &ComputedBill) -> Result<StoredBill> {
        match computed.bill.id.as_deref() {
            Some(id) => self.store.update(id, &computed.bill).await,
            None => self.store.create(&computed.bill).await,
        }
    }
}
