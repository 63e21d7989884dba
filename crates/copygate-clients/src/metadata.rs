//! Metadata service client.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use uuid::Uuid;

use copygate_core::config::upstream::MetadataConfig;
use copygate_core::error::{AppError, ErrorKind};
use copygate_core::result::AppResult;
use copygate_core::traits::metadata::MetadataClient;
use copygate_core::types::node::Node;

/// Standard response envelope of the metadata service.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    result: T,
}

/// reqwest-backed client for the metadata (item lookup) service.
#[derive(Debug, Clone)]
pub struct MetadataService {
    client: reqwest::Client,
    base_url: String,
}

impl MetadataService {
    /// Create a new metadata client from configuration.
    pub fn new(config: &MetadataConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    "Failed to build metadata HTTP client",
                    e,
                )
            })?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl MetadataClient for MetadataService {
    async fn fetch_by_id(&self, id: Uuid) -> AppResult<Node> {
        let url = format!("{}/item/{id}/", self.base_url);
        let response = self.client.get(&url).send().await.map_err(|e| {
            AppError::with_source(ErrorKind::Upstream, "Metadata service unreachable", e)
        })?;

        if !response.status().is_success() {
            return Err(AppError::upstream(format!(
                "Metadata service returned {} for item {id}",
                response.status()
            )));
        }

        let envelope: Envelope<Option<Node>> = response.json().await.map_err(|e| {
            AppError::with_source(ErrorKind::Upstream, "Invalid metadata item response", e)
        })?;
        envelope
            .result
            .ok_or_else(|| AppError::not_found(format!("Item {id} not found")))
    }

    async fn fetch_batch(&self, ids: &[Uuid]) -> AppResult<Vec<Node>> {
        let url = format!("{}/items/batch/", self.base_url);
        let params: Vec<(&str, String)> = ids.iter().map(|id| ("ids", id.to_string())).collect();
        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Upstream, "Metadata service unreachable", e)
            })?;

        if !response.status().is_success() {
            return Err(AppError::upstream(format!(
                "Metadata service returned {} for batch fetch",
                response.status()
            )));
        }

        let envelope: Envelope<Vec<Node>> = response.json().await.map_err(|e| {
            AppError::with_source(ErrorKind::Upstream, "Invalid metadata batch response", e)
        })?;
        Ok(envelope.result)
    }

    async fn search_children(
        &self,
        container_code: &str,
        zone: i32,
        parent_path: &str,
        auth_token: Option<&str>,
    ) -> AppResult<Vec<Node>> {
        let url = format!("{}/items/search/", self.base_url);
        let mut request = self.client.get(&url).query(&[
            ("container_code", container_code),
            ("zone", &zone.to_string()),
            ("recursive", "true"),
            ("parent_path", parent_path),
        ]);
        if let Some(token) = auth_token {
            request = request.header("Authorization", token);
        }

        let response = request.send().await.map_err(|e| {
            AppError::with_source(ErrorKind::Upstream, "Metadata service unreachable", e)
        })?;

        if !response.status().is_success() {
            return Err(AppError::upstream(format!(
                "Metadata service returned {} for subtree search under '{parent_path}'",
                response.status()
            )));
        }

        let envelope: Envelope<Vec<Node>> = response.json().await.map_err(|e| {
            AppError::with_source(ErrorKind::Upstream, "Invalid metadata search response", e)
        })?;
        Ok(envelope.result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use copygate_core::types::node::{NodeKind, NodeStatus};

    #[test]
    fn test_node_envelope_deserializes_wire_format() {
        let body = serde_json::json!({
            "result": {
                "id": "5b6b6cbd-9b8e-4a5a-b5a5-0d8b3f4a2e11",
                "parent": null,
                "parent_path": "admin",
                "name": "data.csv",
                "type": "file",
                "size": 1024,
                "owner": "erik",
                "zone": 0,
                "container_code": "indoctest",
                "status": "ACTIVE",
                "created_time": "2024-03-01T10:00:00Z"
            }
        });
        let envelope: Envelope<Option<Node>> = serde_json::from_value(body).unwrap();
        let node = envelope.result.unwrap();
        assert_eq!(node.kind, NodeKind::File);
        assert_eq!(node.status, NodeStatus::Active);
        assert_eq!(node.display_path(), "admin/data.csv");
    }
}
