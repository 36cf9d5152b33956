//! HTTP blob store client.
//!
//! Uploads bytes under a key with a `PUT` to the store's public path and
//! returns the URL the store reports back. The store is write-once from
//! this service's perspective; keys are time-suffixed so collisions do
//! not occur in practice.

use async_trait::async_trait;
use serde::Deserialize;

use crate::stores::{BlobStore, StoreError};

/// Client for an HTTP object store with token auth.
pub struct HttpBlobStore {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

#[derive(Debug, Deserialize)]
struct PutResponse {
    url: String,
}

impl HttpBlobStore {
    pub fn new(base_url: String, token: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }
}

#[async_trait]
impl BlobStore for HttpBlobStore {
    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<String, StoreError> {
        let response = self
            .client
            .put(format!("{}/{}", self.base_url, key))
            .bearer_auth(&self.token)
            .header("x-content-type", "image/png")
            .header("x-access", "public")
            .body(bytes)
            .send()
            .await
            .map_err(|e| StoreError(format!("blob upload failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(StoreError(format!("blob store error ({status}): {body}")));
        }

        let parsed: PutResponse = response
            .json()
            .await
            .map_err(|e| StoreError(format!("malformed blob store response: {e}")))?;
        Ok(parsed.url)
    }
}
