use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::Result;

/// Document generation collaborator
///
/// Renders an already stored bill into a downloadable document.
#[async_trait]
pub trait DocumentRenderer: Send + Sync {
    async fn render(&self, bill_id: &str) -> Result<RenderedDocument>;
}

/// Binary document returned by the renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedDocument {
    pub file_name: String,
    pub content_type: String,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

impl RenderedDocument {
    pub fn pdf(bill_id: &str, bytes: Vec<u8>) -> Self {
        Self {
            file_name: format!("bill-{}.pdf", bill_id),
            content_type: "application/pdf".to_string(),
            bytes,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
