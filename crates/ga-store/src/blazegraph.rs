//! Blazegraph backend
//!
//! Loads go through the namespace's SPARQL endpoint using Blazegraph's REST
//! insert: the N-Triples body is POSTed with `context-uri` naming the target
//! graph, which the quads-mode `kb` namespace requires for triple formats.

use crate::error::StoreResult;
use crate::http::{check_status, request_error, READY_CHECK_TIMEOUT};
use crate::traits::TripleStore;
use async_trait::async_trait;
use ga_core::GraphBackend;
use reqwest::header::CONTENT_TYPE;

/// Blazegraph REST client
pub struct BlazegraphStore {
    client: reqwest::Client,
    base_url: String,
    namespace: String,
}

impl BlazegraphStore {
    /// Create a client for `namespace` on the server at `base_url`
    pub fn new(base_url: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            namespace: namespace.into(),
        }
    }

    /// SPARQL endpoint of the namespace
    pub fn sparql_url(&self) -> String {
        format!("{}/bigdata/namespace/{}/sparql", self.base_url, self.namespace)
    }
}

#[async_trait]
impl TripleStore for BlazegraphStore {
    async fn is_ready(&self) -> bool {
        let url = format!("{}{}", self.base_url, GraphBackend::Blazegraph.status_path());
        match self.client.get(&url).timeout(READY_CHECK_TIMEOUT).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                log::debug!("Blazegraph not ready at {}: {}", url, e);
                false
            }
        }
    }

    async fn prepare(&self) -> StoreResult<()> {
        // The default namespace exists in a fresh container
        Ok(())
    }

    async fn bulk_load(&self, graph: &str, ntriples: String) -> StoreResult<()> {
        let url = self.sparql_url();
        let response = self
            .client
            .post(&url)
            .query(&[("context-uri", graph)])
            .header(CONTENT_TYPE, "text/plain")
            .body(ntriples)
            .send()
            .await
            .map_err(|e| request_error(&url, e))?;

        check_status(self.store_type(), response).await?;
        Ok(())
    }

    fn store_type(&self) -> &'static str {
        "Blazegraph"
    }
}

#[cfg(test)]
#[path = "blazegraph_test.rs"]
mod tests;
