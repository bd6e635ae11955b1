use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client};
use tracing::{debug, warn};

use super::renderer_trait::{DocumentRenderer, RenderedDocument};
use crate::core::{AppError, Result};

/// `DocumentRenderer` backed by the PDF service (`GET {base}/bills/{id}/pdf`)
pub struct HttpDocumentRenderer {
    client: Client,
    base_url: String,
}

impl HttpDocumentRenderer {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn pdf_url(&self, bill_id: &str) -> String {
        format!("{}/bills/{}/pdf", self.base_url, bill_id)
    }
}

#[async_trait]
impl DocumentRenderer for HttpDocumentRenderer {
    async fn render(&self, bill_id: &str) -> Result<RenderedDocument> {
        let url = self.pdf_url(bill_id);
        debug!(url = %url, "Requesting bill document");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| {
                AppError::document(bill_id, format!("document service unreachable: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(bill_id, status = %status, "Document service failed");
            return Err(AppError::document(
                bill_id,
                format!("document service returned {}: {}", status, body),
            ));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("application/pdf")
            .to_string();

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::document(bill_id, format!("incomplete document: {}", e)))?;

        let mut document = RenderedDocument::pdf(bill_id, bytes.to_vec());
        if document.is_empty() {
            return Err(AppError::document(
                bill_id,
                "document service returned an empty file",
            ));
        }

        document.content_type = content_type;
        Ok(document)
    }
}
