use std::sync::Arc;

use actix_web::{http::header, web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::core::error::AppError;
use crate::modules::bills::models::{Bill, BillEdit, CompanyDetails, ComputedBill, Workflow};
use crate::modules::bills::services::{BillEditor, SubmissionService};

/// Draft plus a batch of edits to replay against it
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyEditsRequest {
    pub draft: Bill,
    #[serde(default)]
    pub workflow: Workflow,
    #[serde(default)]
    pub edits: Vec<BillEdit>,
}

/// Workflow whose quantity rule `/bills/compute` applies; defaults to create
#[derive(Debug, Deserialize)]
pub struct ComputeQuery {
    #[serde(default)]
    pub workflow: Workflow,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyEditsResponse {
    pub draft: Bill,
    pub computed: ComputedBill,
}

/// Blank draft for the create workflow, dated today
/// GET /bills/new
pub async fn new_bill(company: web::Data<CompanyDetails>) -> Result<HttpResponse, AppError> {
    let today = chrono::Local::now().date_naive();
    let editor = BillEditor::new(company.get_ref().clone(), today);
    Ok(HttpResponse::Ok().json(editor.into_bill()))
}

/// Resolve every derived field of a draft
/// POST /bills/compute?workflow=create|edit
///
/// Totals match what submitting the draft in the same workflow would store.
pub async fn compute_bill(
    query: web::Query<ComputeQuery>,
    request: web::Json<Bill>,
) -> Result<HttpResponse, AppError> {
    let editor = BillEditor::from_bill(request.into_inner(), query.workflow)?;
    Ok(HttpResponse::Ok().json(editor.snapshot()))
}

/// Replay field edits against a draft
/// POST /bills/edits
pub async fn apply_edits(request: web::Json<ApplyEditsRequest>) -> Result<HttpResponse, AppError> {
    let ApplyEditsRequest {
        draft,
        workflow,
        edits,
    } = request.into_inner();

    let mut editor = BillEditor::from_bill(draft, workflow)?;
    editor.apply_all(edits)?;

    let computed = editor.snapshot();
    Ok(HttpResponse::Ok().json(ApplyEditsResponse {
        draft: editor.into_bill(),
        computed,
    }))
}

/// Save a new bill and return its document
/// POST /bills
pub async fn create_bill(
    service: web::Data<Arc<SubmissionService>>,
    request: web::Json<Bill>,
) -> Result<HttpResponse, AppError> {
    let mut draft = request.into_inner();
    draft.id = None;
    draft.bill_number = None;

    submit(&service, BillEditor::from_bill(draft, Workflow::Create)?).await
}

/// Update an existing bill and return its document
/// PUT /bills/{id}
pub async fn update_bill(
    service: web::Data<Arc<SubmissionService>>,
    path: web::Path<String>,
    request: web::Json<Bill>,
) -> Result<HttpResponse, AppError> {
    let mut draft = request.into_inner();
    draft.id = Some(path.into_inner());

    submit(&service, BillEditor::from_bill(draft, Workflow::Edit)?).await
}

async fn submit(
    service: &SubmissionService,
    mut editor: BillEditor,
) -> Result<HttpResponse, AppError> {
    let receipt = service.submit(&mut editor).await?;

    let disposition = format!("attachment; filename=\"{}\"", receipt.document.file_name);
    Ok(HttpResponse::Created()
        .insert_header((header::CONTENT_TYPE, receipt.document.content_type.clone()))
        .insert_header((header::CONTENT_DISPOSITION, disposition))
        .insert_header(("X-Bill-Id", receipt.stored.id.clone()))
        .insert_header(("X-Bill-Number", receipt.stored.bill_number.clone()))
        .body(receipt.document.bytes))
}

/// Configure bill routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/bills")
            .route("", web::post().to(create_bill))
            .route("/new", web::get().to(new_bill))
            .route("/compute", web::post().to(compute_bill))
            .route("/edits", web::post().to(apply_edits))
            .route("/{id}", web::put().to(update_bill)),
    );
}
