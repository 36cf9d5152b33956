//! HTTP wrappers for the job service's REST endpoints.

use serde::de::DeserializeOwned;

use crate::prediction::{Prediction, PredictionInput};

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.replicate.com/v1";

/// HTTP client for the image job service.
///
/// The model name is part of the submission target
/// (`/models/{name}/predictions`), not a body parameter — callers pass a
/// typed model whose name is validated upstream.
pub struct ReplicateApi {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

/// Errors from the job service REST layer.
#[derive(Debug, thiserror::Error)]
pub enum ReplicateApiError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service returned a non-2xx status code.
    #[error("Job service error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

impl ReplicateApi {
    /// Create a new API client authenticated with the given token.
    pub fn new(token: String) -> Self {
        Self::with_base_url(token, DEFAULT_BASE_URL.to_string())
    }

    /// Create a client against a non-default base URL (tests, proxies).
    pub fn with_base_url(token: String, base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            token,
        }
    }

    /// Submit a generation job to a specific model.
    ///
    /// Sends `POST /models/{model_name}/predictions` with the input body.
    /// Returns the created job, typically still in the `starting` state.
    pub async fn submit(
        &self,
        model_name: &str,
        input: &PredictionInput,
    ) -> Result<Prediction, ReplicateApiError> {
        let body = serde_json::json!({ "input": input });

        let response = self
            .client
            .post(format!("{}/models/{}/predictions", self.base_url, model_name))
            .header("Authorization", format!("Token {}", self.token))
            .json(&body)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Poll a job's current state.
    ///
    /// Sends `GET /predictions/{id}`.
    pub async fn get_prediction(&self, id: &str) -> Result<Prediction, ReplicateApiError> {
        let response = self
            .client
            .get(format!("{}/predictions/{}", self.base_url, id))
            .header("Authorization", format!("Token {}", self.token))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Download the bytes behind a job's output URL.
    ///
    /// Output URLs are short-lived; callers re-upload the bytes to the
    /// blob store and never persist the service URL.
    pub async fn fetch_output(&self, url: &str) -> Result<Vec<u8>, ReplicateApiError> {
        let response = self.client.get(url).send().await?;
        let response = Self::ensure_success(response).await?;
        Ok(response.bytes().await?.to_vec())
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or an [`ReplicateApiError::ApiError`]
    /// containing the status and body text on failure.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, ReplicateApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ReplicateApiError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ReplicateApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}
