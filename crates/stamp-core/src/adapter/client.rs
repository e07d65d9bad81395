use std::sync::Mutex;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use stamp_model::{Labels, METADATA_LABELS_KEY};

use crate::adapter::AdapterError;

/// Outgoing request handed to a [`RemoteClient`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteRequest {
    /// Statement or job body.
    pub payload: String,
    /// Request metadata; labels live under [`METADATA_LABELS_KEY`].
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl RemoteRequest {
    pub fn new(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
            metadata: Map::new(),
        }
    }

    /// Attach `labels` under [`METADATA_LABELS_KEY`], replacing previous ones.
    pub fn with_labels(mut self, labels: &Labels) -> Self {
        let obj: Map<String, Value> = labels
            .iter()
            .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
            .collect();
        self.metadata
            .insert(METADATA_LABELS_KEY.to_string(), Value::Object(obj));
        self
    }

    /// Labels attached to this request, if any.
    pub fn labels(&self) -> Option<Labels> {
        let obj = self.metadata.get(METADATA_LABELS_KEY)?.as_object()?;
        Some(
            obj.iter()
                .filter_map(|(k, v)| v.as_str().map(|v| (k.as_str(), v)))
                .collect(),
        )
    }
}

/// Acknowledgement returned by the remote service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteResponse {
    pub job_id: String,
}

/// Client that issues the actual remote call.
#[async_trait]
pub trait RemoteClient: Send + Sync {
    /// Client name used in logs and diagnostics.
    fn name(&self) -> &'static str;

    /// Submit one request.
    async fn submit(&self, request: RemoteRequest) -> Result<RemoteResponse, AdapterError>;
}

/// In-memory client that keeps every request it receives.
///
/// Useful for tests and dry runs.
#[derive(Debug, Default)]
pub struct RecordingClient {
    requests: Mutex<Vec<RemoteRequest>>,
    fail_with: Option<String>,
}

impl RecordingClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Client that records requests and rejects each of them with `reason`.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            fail_with: Some(reason.into()),
        }
    }

    /// Snapshot of recorded requests, in submission order.
    pub fn requests(&self) -> Vec<RemoteRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl RemoteClient for RecordingClient {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn submit(&self, request: RemoteRequest) -> Result<RemoteResponse, AdapterError> {
        let seq = {
            let mut requests = self
                .requests
                .lock()
                .map_err(|_| AdapterError::Internal("request log poisoned".into()))?;
            requests.push(request);
            requests.len()
        };
        match &self.fail_with {
            Some(reason) => Err(AdapterError::Remote(reason.clone())),
            None => Ok(RemoteResponse {
                job_id: format!("job-{seq}"),
            }),
        }
    }
}
