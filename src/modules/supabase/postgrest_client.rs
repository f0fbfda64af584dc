//! Thin PostgREST client
//!
//! Every request carries the project key twice, as `apikey` and as a bearer
//! token. Writes ask for `return=representation` so the created or updated
//! rows come back in the response body.

use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::error::{AppError, Result};

/// Error body returned by PostgREST on non-2xx responses
#[derive(Debug, Deserialize)]
struct PostgrestErrorBody {
    message: String,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    hint: Option<String>,
}

pub struct PostgrestClient {
    http_client: Client,
    rest_url: String,
    api_key: String,
}

impl PostgrestClient {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        let http_client = Client::builder()
            .user_agent("MonitorinBts/0.1 (bts-checklist)")
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self::from_reqwest(base_url, api_key, http_client))
    }

    pub fn from_reqwest(base_url: &str, api_key: &str, http_client: Client) -> Self {
        Self {
            http_client,
            rest_url: format!("{}/rest/v1", base_url.trim_end_matches('/')),
            api_key: api_key.to_string(),
        }
    }

    fn request(&self, method: Method, table: &str) -> RequestBuilder {
        self.http_client
            .request(method, format!("{}/{}", self.rest_url, table))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    /// `GET /{table}?{query}`
    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>> {
        tracing::debug!("PostgREST select from {} {:?}", table, query);

        let request = self.request(Method::GET, table).query(query);
        self.send_json(request, table).await
    }

    /// `POST /{table}` with a JSON array body, returning the inserted rows
    pub async fn insert<B, T>(&self, table: &str, rows: &[B]) -> Result<Vec<T>>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        tracing::debug!("PostgREST insert into {} ({} rows)", table, rows.len());

        let request = self
            .request(Method::POST, table)
            .header("Prefer", "return=representation")
            .json(rows);
        self.send_json(request, table).await
    }

    /// `PATCH /{table}?id=eq.{id}`, returning the updated rows (empty if none matched)
    pub async fn update<B, T>(&self, table: &str, id: Uuid, patch: &B) -> Result<Vec<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        tracing::debug!("PostgREST update {} id={}", table, id);

        let request = self
            .request(Method::PATCH, table)
            .query(&[("id", format!("eq.{}", id))])
            .header("Prefer", "return=representation")
            .json(patch);
        self.send_json(request, table).await
    }

    /// `DELETE /{table}?id=eq.{id}`
    pub async fn delete(&self, table: &str, id: Uuid) -> Result<()> {
        tracing::debug!("PostgREST delete {} id={}", table, id);

        let request = self
            .request(Method::DELETE, table)
            .query(&[("id", format!("eq.{}", id))]);
        self.send(request, table).await.map(|_| ())
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder, table: &str) -> Result<T> {
        let response = self.send(request, table).await?;

        response.json::<T>().await.map_err(|e| {
            tracing::error!("Failed to parse PostgREST response for {}: {:?}", table, e);
            AppError::ExternalServiceError(format!("Invalid response from data service: {}", e))
        })
    }

    async fn send(&self, request: RequestBuilder, table: &str) -> Result<reqwest::Response> {
        let response = request.send().await.map_err(|e| {
            tracing::error!("PostgREST request to {} failed: {:?}", table, e);
            AppError::ExternalServiceError(format!("Data service request failed: {}", e))
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<PostgrestErrorBody>(&body) {
            Ok(err) => {
                tracing::error!(
                    "PostgREST returned {} for {}: {} (code={:?}, hint={:?})",
                    status,
                    table,
                    err.message,
                    err.code,
                    err.hint
                );
                err.message
            }
            Err(_) => {
                tracing::error!("PostgREST returned {} for {}: {}", status, table, body);
                format!("Data service returned status {}", status)
            }
        };

        Err(AppError::ExternalServiceError(message))
    }
}
