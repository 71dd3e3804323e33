//! Search Engine Client
//!
//! HTTP access to the search engine. The search layer only sees the
//! [`SearchStore`] trait; [`StoreClient`] is the real implementation, and the
//! ingestion binary uses its administrative calls directly.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::debug;

use super::types::{
    BulkReply, ClusterHealth, PluginRow, SearchReply, StoredHit, SuggestReply, ENDPOINT_HEALTH,
    ENDPOINT_PLUGINS,
};

/// Page size used while draining a full result set.
const SCAN_PAGE_SIZE: usize = 500;

/// Poll interval while waiting for the cluster to come up.
const HEALTH_POLL_INTERVAL: Duration = Duration::from_secs(3);

/// Errors raised while talking to the search engine.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("search engine unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("search engine rejected the request ({status}): {body}")]
    Rejected { status: StatusCode, body: String },
    #[error("could not decode search engine response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("search engine not ready within {0:?}")]
    NotReady(Duration),
    #[error("bulk upload reported failures: {0}")]
    BulkRejected(String),
}

/// Query execution seam between the search layer and the engine.
///
/// Production routes through [`StoreClient`]; tests substitute an in-memory
/// engine so query construction and result compilation can be checked without
/// a running cluster.
#[async_trait]
pub trait SearchStore: Send + Sync {
    /// Execute a query and return a single page of hits.
    async fn search(&self, body: Value) -> Result<Vec<StoredHit>, StoreError>;

    /// Execute a query and drain every matching hit, preserving engine order.
    async fn scan(&self, body: Value) -> Result<Vec<StoredHit>, StoreError>;

    /// Execute a suggester-only query and return the suggest section.
    async fn suggest(&self, body: Value) -> Result<SuggestReply, StoreError>;
}

/// Client for one index of one search engine.
pub struct StoreClient {
    base_url: String,
    index: String,
    http: reqwest::Client,
}

impl StoreClient {
    pub fn new(base_url: &str, index: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            index: index.to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn index(&self) -> &str {
        &self.index
    }

    fn index_url(&self) -> String {
        format!("{}/{}", self.base_url, self.index)
    }

    /// Maps non-2xx responses onto [`StoreError::Rejected`] with the body kept
    /// for diagnostics.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(StoreError::Rejected { status, body })
    }

    async fn post_search(&self, body: &Value) -> Result<String, StoreError> {
        let url = format!("{}/_search", self.index_url());
        let response = self.http.post(url).json(body).send().await?;
        let response = Self::check(response).await?;
        Ok(response.text().await?)
    }

    async fn run_search(&self, body: &Value) -> Result<SearchReply, StoreError> {
        let text = self.post_search(body).await?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn cluster_status(&self) -> Result<String, StoreError> {
        let url = format!("{}{}", self.base_url, ENDPOINT_HEALTH);
        let response = self.http.get(url).send().await?;
        let response = Self::check(response).await?;
        let health: ClusterHealth = serde_json::from_str(&response.text().await?)?;
        Ok(health.status)
    }

    /// Creates the index with the given settings and mappings payload.
    pub async fn create_index(&self, settings: &Value) -> Result<(), StoreError> {
        let response = self.http.put(self.index_url()).json(settings).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    /// Deletes the index. A missing index is not an error; recreation from
    /// scratch is the normal ingestion path.
    pub async fn delete_index(&self) -> Result<(), StoreError> {
        let response = self.http.delete(self.index_url()).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            debug!("index {} absent before delete", self.index);
            return Ok(());
        }
        Self::check(response).await?;
        Ok(())
    }

    /// Polls cluster health until it reports green or yellow.
    ///
    /// Connection failures during the wait are expected (the engine may still
    /// be starting) and only end the wait once the deadline passes.
    pub async fn wait_for_health(&self, deadline: Duration) -> Result<(), StoreError> {
        let started = Instant::now();
        loop {
            match self.cluster_status().await {
                Ok(status) if status == "green" || status == "yellow" => {
                    debug!("cluster health is {status}");
                    return Ok(());
                }
                Ok(status) => debug!("cluster health still {status}"),
                Err(StoreError::Transport(error)) => {
                    debug!("cluster not reachable yet: {error}");
                }
                Err(error) => return Err(error),
            }
            if started.elapsed() >= deadline {
                return Err(StoreError::NotReady(deadline));
            }
            tokio::time::sleep(HEALTH_POLL_INTERVAL).await;
        }
    }

    /// Reports whether the named plugin is installed on any node.
    pub async fn has_plugin(&self, name: &str) -> Result<bool, StoreError> {
        let url = format!("{}{}", self.base_url, ENDPOINT_PLUGINS);
        let response = self.http.get(url).send().await?;
        let response = Self::check(response).await?;
        let rows: Vec<PluginRow> = serde_json::from_str(&response.text().await?)?;
        Ok(rows.iter().any(|row| row.component == name))
    }

    /// Uploads a pre-rendered bulk body and returns the number of indexed
    /// documents. Any per-item failure rejects the whole upload.
    pub async fn bulk(&self, body: String) -> Result<usize, StoreError> {
        let url = format!("{}/_bulk", self.index_url());
        let response = self
            .http
            .post(url)
            .header("content-type", "application/x-ndjson")
            .body(body)
            .send()
            .await?;
        let response = Self::check(response).await?;
        let reply: BulkReply = serde_json::from_str(&response.text().await?)?;
        if reply.errors {
            let detail = reply
                .items
                .iter()
                .find_map(|item| item.pointer("/index/error"))
                .map(Value::to_string)
                .unwrap_or_else(|| "unreported item failure".to_string());
            return Err(StoreError::BulkRejected(detail));
        }
        Ok(reply.items.len())
    }
}

#[async_trait]
impl SearchStore for StoreClient {
    async fn search(&self, body: Value) -> Result<Vec<StoredHit>, StoreError> {
        let reply = self.run_search(&body).await?;
        Ok(reply.hits.hits)
    }

    async fn scan(&self, mut body: Value) -> Result<Vec<StoredHit>, StoreError> {
        // search_after resumes strictly after the boundary key, so the sort
        // must be a total order: a page boundary inside a run of equal keys
        // would drop the rest of the run. Appending the document position
        // breaks ties; the extra key component is internal and trimmed from
        // the hits handed back.
        let mut caller_components = None;
        if let Some(request) = body.as_object_mut() {
            if let Value::Array(clauses) = request.entry("sort").or_insert_with(|| json!([])) {
                caller_components = Some(clauses.len());
                clauses.push(json!("_doc"));
            }
            request.insert("size".to_string(), json!(SCAN_PAGE_SIZE));
        }

        let mut collected = Vec::new();
        loop {
            let reply = self.run_search(&body).await?;
            let mut page = reply.hits.hits;
            let page_len = page.len();
            let cursor = page.last().and_then(|hit| hit.sort.clone());
            if let Some(count) = caller_components {
                for hit in &mut page {
                    if count == 0 {
                        hit.sort = None;
                    } else if let Some(key) = &mut hit.sort {
                        key.truncate(count);
                    }
                }
            }
            collected.extend(page);
            debug!("scan page of {page_len} hits, {} total", collected.len());

            if page_len < SCAN_PAGE_SIZE {
                break;
            }
            match (cursor, body.as_object_mut()) {
                (Some(key), Some(request)) => {
                    request.insert("search_after".to_string(), Value::Array(key));
                }
                _ => break,
            }
        }
        Ok(collected)
    }

    async fn suggest(&self, body: Value) -> Result<SuggestReply, StoreError> {
        let text = self.post_search(&body).await?;
        Ok(serde_json::from_str(&text)?)
    }
}
