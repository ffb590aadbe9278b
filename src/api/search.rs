//! Search and count.

use serde::Serialize;
use serde_json::Value;

use crate::api::path;
use crate::client::SearchClient;
use crate::error::ClientResult;
use crate::transport::Request;

impl SearchClient {
    /// Search `types` (comma separated) of an index using a request body.
    pub async fn search<T: Serialize + ?Sized>(&self, index: &str, types: &str, options: &T) -> ClientResult<Value> {
        let request = Request::get(path(&[index, types, "_search"])).json(options)?;
        Ok(self.execute(&request).await?.body)
    }

    /// Search using a query string, with an optional request body.
    pub async fn query(&self, index: &str, types: &str, q: &str, options: Option<&Value>) -> ClientResult<Value> {
        self.query_string(index, types, "_search", q, options).await
    }

    /// Count the documents matching a query string.
    pub async fn count(&self, index: &str, types: &str, q: &str, options: Option<&Value>) -> ClientResult<Value> {
        self.query_string(index, types, "_count", q, options).await
    }

    async fn query_string(
        &self,
        index: &str,
        types: &str,
        endpoint: &str,
        q: &str,
        options: Option<&Value>,
    ) -> ClientResult<Value> {
        let mut request = Request::get(path(&[index, types, endpoint])).query("q", q);
        if let Some(options) = options {
            request = request.json(options)?;
        }
        Ok(self.execute(&request).await?.body)
    }
}
