//! Remote model metadata client.
//!
//! Pretrained models are hosted at a base URL exposing `model.json` and
//! `metadata.json`. Inference itself stays with the external runtime; this
//! client fetches the metadata so the agent knows the model's label set
//! before a session starts. A metadata fetch failure is a session-start
//! failure.

use crate::classify::ClassifyError;
use serde::{Deserialize, Serialize};

/// Reference to a remotely hosted model.
#[derive(Debug, Clone)]
pub struct ModelRef {
    base_url: String,
}

impl ModelRef {
    /// Create a model reference from its base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self { base_url }
    }

    /// URL of the model topology file.
    pub fn model_url(&self) -> String {
        format!("{}model.json", self.base_url)
    }

    /// URL of the model metadata file.
    pub fn metadata_url(&self) -> String {
        format!("{}metadata.json", self.base_url)
    }
}

/// Model metadata as published next to the model file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Model name, where the publisher provides one
    #[serde(rename = "modelName", skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
    /// The model's label set, in model order
    pub labels: Vec<String>,
}

/// Async client for fetching model metadata.
pub struct ModelClient {
    model: ModelRef,
    client: reqwest::Client,
}

impl ModelClient {
    /// Create a client for the given model reference.
    pub fn new(model: ModelRef) -> Result<Self, ClassifyError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .map_err(|e| ClassifyError::Backend(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { model, client })
    }

    /// Fetch the model's metadata.
    pub async fn fetch_metadata(&self) -> Result<ModelMetadata, ClassifyError> {
        let response = self
            .client
            .get(self.model.metadata_url())
            .send()
            .await
            .map_err(|e| ClassifyError::ModelUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClassifyError::ModelUnavailable(format!(
                "metadata fetch returned HTTP {}",
                status.as_u16()
            )));
        }

        let metadata: ModelMetadata = response
            .json()
            .await
            .map_err(|e| ClassifyError::ModelUnavailable(format!("invalid metadata: {e}")))?;

        if metadata.labels.is_empty() {
            return Err(ClassifyError::ModelUnavailable(
                "model metadata declares no labels".to_string(),
            ));
        }

        Ok(metadata)
    }

    /// The model reference this client reads from.
    pub fn model(&self) -> &ModelRef {
        &self.model
    }
}

/// Blocking metadata client for use in synchronous contexts.
pub struct BlockingModelClient {
    inner: ModelClient,
    runtime: tokio::runtime::Runtime,
}

impl BlockingModelClient {
    /// Create a blocking client for the given model reference.
    pub fn new(model: ModelRef) -> Result<Self, ClassifyError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| ClassifyError::Backend(format!("Failed to create runtime: {e}")))?;

        Ok(Self {
            inner: ModelClient::new(model)?,
            runtime,
        })
    }

    /// Fetch the model's metadata.
    pub fn fetch_metadata(&self) -> Result<ModelMetadata, ClassifyError> {
        self.runtime.block_on(self.inner.fetch_metadata())
    }

    /// The model reference this client reads from.
    pub fn model(&self) -> &ModelRef {
        self.inner.model()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_ref_urls() {
        let model = ModelRef::new("https://example.com/models/abc");
        assert_eq!(model.model_url(), "https://example.com/models/abc/model.json");
        assert_eq!(
            model.metadata_url(),
            "https://example.com/models/abc/metadata.json"
        );

        // A trailing slash is not doubled.
        let model = ModelRef::new("https://example.com/models/abc/");
        assert_eq!(
            model.metadata_url(),
            "https://example.com/models/abc/metadata.json"
        );
    }

    #[test]
    fn test_metadata_parsing() {
        let json = r#"{"modelName": "attention", "labels": ["Focus", "Looking Away", "Distracted"]}"#;
        let metadata: ModelMetadata = serde_json::from_str(json).unwrap();
        assert_eq!(metadata.model_name.as_deref(), Some("attention"));
        assert_eq!(metadata.labels.len(), 3);
    }

    #[test]
    fn test_metadata_parsing_without_name() {
        let json = r#"{"labels": ["Focus"]}"#;
        let metadata: ModelMetadata = serde_json::from_str(json).unwrap();
        assert!(metadata.model_name.is_none());
    }
}
