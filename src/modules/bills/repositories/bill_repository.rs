// Billing backend client
//
// Bills are stored by an external REST service. The engine only needs two
// calls from it: create a new bill and update an existing one. Both take the
// fully resolved bill (derived totals and term amounts included) and return
// the backend's identifiers.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use tracing::{debug, warn};

use crate::core::{AppError, Result};
use crate::modules::bills::models::{Bill, StoredBill};

/// Persistence collaborator for bills
#[async_trait]
pub trait BillStore: Send + Sync {
    /// Store a new bill; the backend assigns id and bill number
    async fn create(&self, bill: &Bill) -> Result<StoredBill>;

    /// Replace an existing bill
    async fn update(&self, id: &str, bill: &Bill) -> Result<StoredBill>;
}

/// `BillStore` backed by the billing REST API
pub struct HttpBillStore {
    client: Client,
    base_url: String,
}

impl HttpBillStore {
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

    fn bills_url(&self) -> String {
        format!("{}/bills", self.base_url)
    }

    async fn read_stored(response: Response) -> Result<StoredBill> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, "Billing backend rejected bill");
            return Err(AppError::persistence(format!(
                "billing backend returned {}: {}",
                status, body
            )));
        }

        response
            .json::<StoredBill>()
            .await
            .map_err(|e| AppError::persistence(format!("unreadable billing response: {}", e)))
    }
}

#[async_trait]
impl BillStore for HttpBillStore {
    async fn create(&self, bill: &Bill) -> Result<StoredBill> {
        debug!(url = %self.bills_url(), "Creating bill");
        let response = self
            .client
            .post(self.bills_url())
            .json(bill)
            .send()
            .await
            .map_err(|e| AppError::persistence(format!("billing backend unreachable: {}", e)))?;

        Self::read_stored(response).await
    }

    async fn update(&self, id: &str, bill: &Bill) -> Result<StoredBill> {
        let url = format!("{}/{}", self.bills_url(), id);
        debug!(url = %url, "Updating bill");
        let response = self
            .client
            .put(url)
            .json(bill)
            .send()
            .await
            .map_err(|e| AppError::persistence(format!("billing backend unreachable: {}", e)))?;

        Self::read_stored(response).await
    }
}
