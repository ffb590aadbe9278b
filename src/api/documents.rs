//! Document operations: add, remove, multi-get, delete-by-query.

use serde::Serialize;
use serde_json::{json, Value};

use crate::api::{path, Params};
use crate::client::SearchClient;
use crate::error::ClientResult;
use crate::transport::Request;

impl SearchClient {
    /// Index a document under an explicit id.
    ///
    /// Dates should already be serialized in ISO-8601 form (chrono's
    /// `Serialize` does this) so they index consistently.
    pub async fn add<T: Serialize + ?Sized>(
        &self,
        index: &str,
        doc_type: &str,
        id: &str,
        doc: &T,
        params: Params<'_>,
    ) -> ClientResult<Value> {
        let request = Request::put(path(&[index, doc_type, id]))
            .query_pairs(params.iter().copied())
            .json(doc)?;
        Ok(self.execute(&request).await?.body)
    }

    /// Remove one document.
    pub async fn remove(&self, index: &str, doc_type: &str, id: &str) -> ClientResult<Value> {
        Ok(self.execute(&Request::delete(path(&[index, doc_type, id]))).await?.body)
    }

    /// Remove every document of a type.
    pub async fn remove_all(&self, index: &str, doc_type: &str) -> ClientResult<Value> {
        let request = Request::delete(path(&[index, doc_type, "_query"])).query("q", "*");
        Ok(self.execute(&request).await?.body)
    }

    /// Remove the documents matched by a query body.
    pub async fn remove_by_query<T: Serialize + ?Sized>(&self, index: &str, types: &str, options: &T) -> ClientResult<Value> {
        let request = Request::delete(path(&[index, types, "_query"])).json(options)?;
        Ok(self.execute(&request).await?.body)
    }

    /// Fetch several documents by id.
    pub async fn mget<I: Serialize>(&self, index: &str, doc_type: &str, ids: &[I]) -> ClientResult<Value> {
        let request = Request::get(path(&[index, doc_type, "_mget"])).json(&json!({ "ids": ids }))?;
        Ok(self.execute(&request).await?.body)
    }
}
