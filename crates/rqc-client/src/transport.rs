//! HTTP transport for the RAG backend

use std::path::Path;

use async_trait::async_trait;
use reqwest::multipart;
use reqwest::{Client, Response};
use serde_json::Value;

use rqc_core::{
    Error, IngestBackend, QueryBackend, QueryRequest, QueryResult, Result, StatusReport,
    UploadResponse,
};

use crate::config::BackendConfig;

/// Client for the backend's ingestion and query endpoints.
///
/// Stateless between calls; every method performs exactly one HTTP request
/// and classifies the outcome into the shared error taxonomy.
pub struct RagClient {
    config: BackendConfig,
    http: Client,
}

impl RagClient {
    /// Create a new client from configuration
    pub fn new(config: BackendConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;

        Ok(Self { config, http })
    }

    /// Create a new client from environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(BackendConfig::from_env()?)
    }

    /// Base address this client talks to
    pub fn base_url(&self) -> &url::Url {
        &self.config.base_url
    }

    /// Join path segments onto the base address. Segments are inserted as
    /// encoded path components, so opaque job ids are safe to pass through.
    fn endpoint(&self, segments: &[&str]) -> Result<url::Url> {
        let mut url = self.config.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| Error::Configuration("backend URL cannot be a base".to_string()))?;
            path.pop_if_empty();
            for segment in segments {
                path.push(segment);
            }
        }
        Ok(url)
    }

    /// Decode a response body and classify non-success statuses.
    ///
    /// JSON bodies (per `Content-Type`) are decoded as-is, with a malformed
    /// body decoding to `{}`; anything else is wrapped as `{"message": text}`.
    async fn decode_response(response: Response) -> Result<Value> {
        let status = response.status();
        let is_json = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.contains("application/json"))
            .unwrap_or(false);

        let body = if is_json {
            response
                .json::<Value>()
                .await
                .unwrap_or_else(|_| Value::Object(Default::default()))
        } else {
            let text = response.text().await.unwrap_or_default();
            serde_json::json!({ "message": text })
        };

        if !status.is_success() {
            let message = extract_error_message(&body).unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_string()
            });
            return Err(Error::Api {
                status: status.as_u16(),
                message,
                body,
            });
        }

        Ok(body)
    }
}

/// Best-effort message from a decoded error body: `message`, then `error`,
/// skipping empty strings like the reference client does.
fn extract_error_message(body: &Value) -> Option<String> {
    body.get("message")
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
        .or_else(|| {
            body.get("error")
                .and_then(Value::as_str)
                .filter(|text| !text.is_empty())
        })
        .map(str::to_string)
}

#[async_trait]
impl IngestBackend for RagClient {
    async fn upload(&self, path: &Path, metadata: Option<&Value>) -> Result<UploadResponse> {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| Error::InvalidInput(format!("not a file path: {}", path.display())))?
            .to_string();

        let bytes = tokio::fs::read(path).await?;
        let file_part = multipart::Part::bytes(bytes).file_name(file_name);
        let mut form = multipart::Form::new().part("file", file_part);
        if let Some(metadata) = metadata {
            form = form.text("metadata", metadata.to_string());
        }

        let url = self.endpoint(&["ingest", "upload"])?;
        let response = self
            .http
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let body = Self::decode_response(response).await?;
        serde_json::from_value(body).map_err(|e| Error::Serialization(e.to_string()))
    }

    async fn status(&self, job_id: &str) -> Result<StatusReport> {
        let url = self.endpoint(&["ingest", "status", job_id])?;
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let body = Self::decode_response(response).await?;
        serde_json::from_value(body).map_err(|e| Error::Serialization(e.to_string()))
    }
}

#[async_trait]
impl QueryBackend for RagClient {
    async fn query(&self, request: &QueryRequest) -> Result<QueryResult> {
        let url = self.endpoint(&["query"])?;
        let response = self
            .http
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let body = Self::decode_response(response).await?;
        serde_json::from_value(body).map_err(|e| Error::Serialization(e.to_string()))
    }
}
