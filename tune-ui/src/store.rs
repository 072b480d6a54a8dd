//! Remote catalog store
//!
//! The catalog REST API is the only persistence layer; this module defines
//! the client-side seam (`RemoteStore`) and the `reqwest` implementation
//! against a configured base URL. No retries, no authentication, no
//! pagination: every failure is surfaced once and the user retries.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use tune_common::model::EntityKind;
use tune_common::{Error, Result};

const USER_AGENT: &str = concat!("TuneTracker/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// REST surface consumed per entity kind
///
/// Bodies are JSON values rather than typed entities so one store instance
/// can serve all three kinds; the controller owns the typed boundary.
#[async_trait]
pub trait RemoteStore: Send + Sync + 'static {
    /// `GET /artists` etc.; returns the full list, reference fields
    /// hydrated where the server chooses to
    async fn list(&self, kind: EntityKind) -> Result<Vec<Value>>;

    /// `POST /artist` etc.; body is the entity without `id`, response
    /// includes the assigned id
    async fn create(&self, kind: EntityKind, body: Value) -> Result<Value>;

    /// `PUT /artist/{id}` etc.; body is the full entity
    async fn update(&self, kind: EntityKind, id: i64, body: Value) -> Result<()>;

    /// `DELETE /artist/{id}` etc.
    async fn delete(&self, kind: EntityKind, id: i64) -> Result<()>;
}

/// `RemoteStore` backed by the catalog REST API
pub struct RestStore {
    http_client: reqwest::Client,
    base_url: String,
}

impl RestStore {
    /// Build a client against the given base URL (no trailing slash)
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;

        Ok(RestStore {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn collection_url(&self, kind: EntityKind) -> String {
        format!("{}{}", self.base_url, kind.collection_path())
    }

    fn item_url(&self, kind: EntityKind) -> String {
        format!("{}{}", self.base_url, kind.item_path())
    }

    /// Map a non-success response to a uniform `Error::Api`
    async fn check(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(Error::Api(status.as_u16(), body))
    }
}

#[async_trait]
impl RemoteStore for RestStore {
    async fn list(&self, kind: EntityKind) -> Result<Vec<Value>> {
        let url = self.collection_url(kind);
        tracing::debug!(url = %url, "Fetching full list");

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let items: Vec<Value> = Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| Error::Parse(e.to_string()))?;

        tracing::debug!(kind = kind.label(), count = items.len(), "List fetched");
        Ok(items)
    }

    async fn create(&self, kind: EntityKind, body: Value) -> Result<Value> {
        let url = self.item_url(kind);
        tracing::debug!(url = %url, "Creating {}", kind.label());

        let response = self
            .http_client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        Self::check(response)
            .await?
            .json()
            .await
            .map_err(|e| Error::Parse(e.to_string()))
    }

    async fn update(&self, kind: EntityKind, id: i64, body: Value) -> Result<()> {
        let url = format!("{}/{}", self.item_url(kind), id);
        tracing::debug!(url = %url, "Updating {} {}", kind.label(), id);

        let response = self
            .http_client
            .put(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        Self::check(response).await?;
        Ok(())
    }

    async fn delete(&self, kind: EntityKind, id: i64) -> Result<()> {
        let url = format!("{}/{}", self.item_url(kind), id);
        tracing::debug!(url = %url, "Deleting {} {}", kind.label(), id);

        let response = self
            .http_client
            .delete(&url)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        Self::check(response).await?;
        Ok(())
    }
}
