//! AllegroGraph backend

use crate::error::StoreResult;
use crate::http::{check_status, request_error, READY_CHECK_TIMEOUT};
use crate::traits::TripleStore;
use async_trait::async_trait;
use ga_core::GraphBackend;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;

/// AllegroGraph REST client for one repository in the root catalog
pub struct AgraphStore {
    client: reqwest::Client,
    base_url: String,
    repository: String,
    user: String,
    password: String,
}

impl AgraphStore {
    /// Create a client for `repository` on the server at `base_url`
    pub fn new(
        base_url: impl Into<String>,
        repository: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            repository: repository.into(),
            user: user.into(),
            password: password.into(),
        }
    }

    fn repository_url(&self) -> String {
        format!("{}/repositories/{}", self.base_url, self.repository)
    }
}

#[async_trait]
impl TripleStore for AgraphStore {
    async fn is_ready(&self) -> bool {
        let url = format!("{}{}", self.base_url, GraphBackend::AGraph.status_path());
        let request = self
            .client
            .get(&url)
            .basic_auth(&self.user, Some(&self.password))
            .timeout(READY_CHECK_TIMEOUT);
        match request.send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                log::debug!("AllegroGraph not ready at {}: {}", url, e);
                false
            }
        }
    }

    /// Create the repository unless it already exists
    async fn prepare(&self) -> StoreResult<()> {
        let size_url = format!("{}/size", self.repository_url());
        let response = self
            .client
            .get(&size_url)
            .basic_auth(&self.user, Some(&self.password))
            .send()
            .await
            .map_err(|e| request_error(&size_url, e))?;

        if response.status() != StatusCode::NOT_FOUND {
            check_status(self.store_type(), response).await?;
            return Ok(());
        }

        let url = self.repository_url();
        log::info!("Creating AllegroGraph repository {}", self.repository);
        let response = self
            .client
            .put(&url)
            .basic_auth(&self.user, Some(&self.password))
            .send()
            .await
            .map_err(|e| request_error(&url, e))?;
        check_status(self.store_type(), response).await?;
        Ok(())
    }

    async fn bulk_load(&self, graph: &str, ntriples: String) -> StoreResult<()> {
        let url = format!("{}/statements", self.repository_url());
        let context = format!("<{}>", graph);
        let response = self
            .client
            .post(&url)
            .basic_auth(&self.user, Some(&self.password))
            .query(&[("context", context.as_str())])
            .header(CONTENT_TYPE, "text/plain")
            .body(ntriples)
            .send()
            .await
            .map_err(|e| request_error(&url, e))?;

        check_status(self.store_type(), response).await?;
        Ok(())
    }

    fn store_type(&self) -> &'static str {
        "AllegroGraph"
    }
}

#[cfg(test)]
#[path = "agraph_test.rs"]
mod tests;
