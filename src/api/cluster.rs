//! Cluster-level calls: availability, node info, text analysis.

use serde_json::Value;

use crate::api::Params;
use crate::client::SearchClient;
use crate::error::ClientResult;
use crate::transport::{Body, Request};

impl SearchClient {
    /// True if the current server answers its root endpoint with HTTP 200.
    pub async fn available(&self) -> ClientResult<bool> {
        Ok(self.execute(&Request::get("/")).await?.status == 200)
    }

    /// Node and version information from the root endpoint.
    pub async fn info(&self) -> ClientResult<Value> {
        Ok(self.execute(&Request::get("/")).await?.body)
    }

    /// Run text through an analyzer, e.g. `&[("tokenizer", "standard")]`.
    pub async fn analyze(&self, text: &str, params: Params<'_>) -> ClientResult<Value> {
        let request = Request::get("/_analyze")
            .query_pairs(params.iter().copied())
            .body(Body::Text(text.to_string()));
        Ok(self.execute(&request).await?.body)
    }
}
