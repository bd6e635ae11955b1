use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use billwise::config::{Config, LogFormat};
use billwise::bills::{HttpBillStore, SubmissionService};
use billwise::documents::HttpDocumentRenderer;
use billwise::middleware::RequestId;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("billwise={},actix_web=info", config.app.log_level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    match config.app.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env()?;
    config.validate()?;

    init_tracing(&config);

    tracing::info!("Starting Billwise bill service");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Server binding to: {}", config.server.bind_address());
    tracing::info!(
        billing_api = %config.collaborators.billing_api_url,
        document_api = %config.collaborators.document_api_url,
        "Collaborators configured"
    );

    let timeout = config.collaborators.timeout();
    let store = HttpBillStore::new(config.collaborators.billing_api_url.clone(), timeout)?;
    let renderer =
        HttpDocumentRenderer::new(config.collaborators.document_api_url.clone(), timeout)?;
    let service = Arc::new(SubmissionService::new(Arc::new(store), Arc::new(renderer)));
    let company = config.company.clone();
    let production = config.is_production();

    let bind_address = config.server.bind_address();
    let server = HttpServer::new(move || {
        let cors = if production {
            Cors::default()
                .allow_any_origin()
                .allow_any_header()
                .allowed_methods(vec!["GET", "POST", "PUT"])
                .expose_headers(vec!["X-Bill-Id", "X-Bill-Number", "X-Request-ID"])
        } else {
            Cors::permissive()
        };

        App::new()
            .wrap(cors)
            .wrap(RequestId)
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(service.clone()))
            .app_data(web::Data::new(company.clone()))
            .configure(billwise::configure_api)
    })
    .workers(config.server.workers)
    .bind(&bind_address)?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await?;
    Ok(())
}
