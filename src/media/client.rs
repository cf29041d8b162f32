use super::draft::Draft;
use super::error::{StoreError, StoreResult};
use super::kind::Kind;
use super::transport::{HttpRequest, HttpResponse, Method, Transport};
use super::types::MediaItem;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Deserialize)]
struct ListEnvelope {
    items: Vec<Value>,
}

/// Stateless client for the polymorphic media endpoint. Each call is exactly
/// one HTTP request; nothing is cached between calls.
#[derive(Clone)]
pub struct MediaStoreClient {
    transport: Arc<dyn Transport>,
}

impl MediaStoreClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub async fn list(&self, kind: Kind) -> StoreResult<Vec<MediaItem>> {
        let response = self
            .send(HttpRequest {
                method: Method::Get,
                query: vec![("type", kind.list_name().to_string())],
                body: None,
            })
            .await?;

        let envelope: ListEnvelope = serde_json::from_slice(&response.body)
            .map_err(|e| StoreError::Malformed(e.to_string()))?;

        let total = envelope.items.len();
        let items: Vec<MediaItem> = envelope
            .items
            .into_iter()
            .enumerate()
            .filter_map(|(index, record)| match MediaItem::from_record(kind, record) {
                Ok(item) => Some(item),
                Err(e) => {
                    warn!("Skipping {} record #{}: {}", kind, index, e);
                    None
                }
            })
            .collect();

        debug!("Listed {} of {} {} records", items.len(), total, kind);
        Ok(items)
    }

    /// Sends the draft's payload. The created record is not read back; the
    /// next `list` is the source of truth.
    pub async fn create(&self, draft: &Draft) -> StoreResult<()> {
        let kind = draft.kind();
        self.send(HttpRequest {
            method: Method::Post,
            query: Vec::new(),
            body: Some(Value::Object(draft.to_payload())),
        })
        .await?;

        info!("Created {}", kind);
        Ok(())
    }

    pub async fn remove(&self, kind: Kind, id: i64) -> StoreResult<()> {
        self.send(HttpRequest {
            method: Method::Delete,
            query: vec![
                ("type", kind.write_name().to_string()),
                ("id", id.to_string()),
            ],
            body: None,
        })
        .await?;

        info!("Removed {} {}", kind, id);
        Ok(())
    }

    async fn send(&self, request: HttpRequest) -> StoreResult<HttpResponse> {
        debug!(
            "Sending {:?} via {}",
            request.method,
            self.transport.name()
        );
        let response = self
            .transport
            .send(request)
            .await
            .map_err(|e| StoreError::Network(format!("{e:#}")))?;

        if !response.is_success() {
            return Err(StoreError::Rejected {
                status: response.status,
            });
        }
        Ok(response)
    }
}
