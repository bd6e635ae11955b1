//! Billwise bill computation service
//!
//! Line-item totals, discounts and payment-term schedules for interior-design
//! invoices, quotations and estimates, plus the submission flow that hands a
//! resolved bill to the billing backend and the document service.

pub mod config;
pub mod core;
pub mod middleware;
pub mod modules;

use actix_web::web;

// Re-export commonly used types
pub use modules::bills;
pub use modules::documents;

/// Register every route and the JSON error envelope
///
/// Expects `web::Data<Arc<SubmissionService>>` to be registered by the caller.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(middleware::json_error_handler))
        .configure(modules::health::controllers::configure)
        .service(web::scope("/api").configure(modules::bills::controllers::configure));
}
