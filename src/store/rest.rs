//! Hosted table store reached over a PostgREST-style HTTP API.

use super::{RecordStore, StoreError};
use crate::config::RestConfig;
use crate::models::{NewSavedTime, SavedTimeRecord};
use async_trait::async_trait;
use reqwest::{RequestBuilder, Response};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

pub struct RestStore {
    client: reqwest::Client,
    base_url: String,
    table: String,
    api_key: String,
}

/// Error body returned by the service on a rejected request.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
    error: Option<String>,
}

impl RestStore {
    pub fn new(
        base_url: &str,
        table: &str,
        api_key: &str,
        timeout: Duration,
    ) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            table: table.to_string(),
            api_key: api_key.to_string(),
        })
    }

    pub fn from_config(cfg: &RestConfig) -> Result<Self, StoreError> {
        let url = cfg
            .url
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| StoreError::Config("rest.url is not set".to_string()))?;
        let key = cfg
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| StoreError::Config("rest.api_key is not set".to_string()))?;

        Self::new(url, &cfg.table, key, Duration::from_secs(cfg.timeout_secs))
    }

    fn endpoint(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }

    fn authorized(&self, req: RequestBuilder) -> RequestBuilder {
        req.header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("accept", "application/json")
    }

    /// Turn a non-success response into `StoreError::Api`, preferring the
    /// service's own message over the raw body.
    async fn check(resp: Response) -> Result<Response, StoreError> {
        if resp.status().is_success() {
            return Ok(resp);
        }

        let status = resp.status().as_u16();
        let text = resp.text().await.unwrap_or_default();
        warn!(status, body = %text, "table store rejected request");

        let message = serde_json::from_str::<ApiErrorBody>(&text)
            .ok()
            .and_then(|b| b.message.or(b.error))
            .unwrap_or_else(|| {
                if text.trim().is_empty() {
                    format!("request failed with status {status}")
                } else {
                    text
                }
            });

        Err(StoreError::Api { status, message })
    }
}

#[async_trait]
impl RecordStore for RestStore {
    fn name(&self) -> &str {
        "rest"
    }

    async fn insert(&self, row: &NewSavedTime) -> Result<SavedTimeRecord, StoreError> {
        debug!(table = %self.table, time_record = %row.time_record, "inserting row");

        let resp = self
            .authorized(self.client.post(self.endpoint()))
            .header("prefer", "return=representation")
            .json(&[row])
            .send()
            .await?;

        let mut rows: Vec<SavedTimeRecord> = Self::check(resp)
            .await?
            .json()
            .await
            .map_err(|e| StoreError::Parse(e.to_string()))?;

        if rows.is_empty() {
            return Err(StoreError::EmptyResponse);
        }
        Ok(rows.swap_remove(0))
    }

    async fn select_newest_first(&self) -> Result<Vec<SavedTimeRecord>, StoreError> {
        let url = format!("{}?select=*&order=created_at.desc", self.endpoint());
        debug!(%url, "fetching rows");

        let resp = self.authorized(self.client.get(&url)).send().await?;

        let rows: Vec<SavedTimeRecord> = Self::check(resp)
            .await?
            .json()
            .await
            .map_err(|e| StoreError::Parse(e.to_string()))?;

        debug!(count = rows.len(), "rows fetched");
        Ok(rows)
    }
}
