//! Cursor-based scrolling over large result sets.
//!
//! # Protocol
//! ```text
//! no cursor:  GET /{index}/{types}/_search?scroll=..&search_type=scan&size=N
//!                 → `_scroll_id` only, no hits
//! cursor:     GET /_search/scroll?scroll=..&scroll_id=..
//!                 → one page of hits + the next `_scroll_id`
//! ```
//!
//! `size` is per shard-holding server: with 5 servers and a size of 10,
//! each page carries up to 50 hits.

use serde_json::Value;

use crate::api::path;
use crate::client::SearchClient;
use crate::error::{ClientError, ClientResult};
use crate::transport::Request;

/// Options for [`SearchClient::scroll`].
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollOptions {
    /// Query body for the initial scan.
    pub body: Option<Value>,
    /// Cursor returned by a previous page. `None` starts a new scan.
    pub cursor: Option<String>,
    /// How long the service keeps the scan alive; refreshed by every call.
    pub keep_alive: String,
    /// Results per server for each page.
    pub results_per_server: u32,
}

impl Default for ScrollOptions {
    fn default() -> Self {
        Self {
            body: None,
            cursor: None,
            keep_alive: "1m".to_string(),
            results_per_server: 1000,
        }
    }
}

impl ScrollOptions {
    /// Continue from a cursor, keeping the other options.
    pub fn with_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }
}

/// The cursor carried by a scroll response.
pub fn scroll_id(page: &Value) -> Option<&str> {
    page.get("_scroll_id").and_then(Value::as_str)
}

impl SearchClient {
    /// Fetch the next page of a scan.
    ///
    /// Without a cursor this opens the scan first and then fetches its first
    /// page, so every call returns hits. Pass the returned `_scroll_id` back in
    /// `options.cursor` to continue.
    pub async fn scroll(&self, index: &str, types: &str, options: &ScrollOptions) -> ClientResult<Value> {
        let cursor = match &options.cursor {
            Some(cursor) => cursor.clone(),
            None => self.open_scan(index, types, options).await?,
        };

        let request = Request::get("/_search/scroll")
            .query("scroll", &options.keep_alive)
            .query("scroll_id", &cursor);
        Ok(self.execute(&request).await?.body)
    }

    async fn open_scan(&self, index: &str, types: &str, options: &ScrollOptions) -> ClientResult<String> {
        let mut request = Request::get(path(&[index, types, "_search"]))
            .query("scroll", &options.keep_alive)
            .query("search_type", "scan")
            .query("size", options.results_per_server);
        if let Some(body) = &options.body {
            request = request.json(body)?;
        }

        let response = self.execute(&request).await?;
        scroll_id(&response.body)
            .map(str::to_string)
            .ok_or_else(|| ClientError::UnexpectedResponse("scan response carried no _scroll_id".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::client;
    use crate::transport::Body;
    use serde_json::json;

    #[tokio::test]
    async fn test_scan_then_page() {
        let (client, rec) = client();
        rec.respond(200, json!({"_scroll_id": "c2Nhbjs1", "hits": {"total": 7, "hits": []}}))
            .respond(200, json!({"_scroll_id": "c2Nhbjs2", "hits": {"hits": [{"_id": "1"}]}}));

        let options = ScrollOptions {
            body: Some(json!({"query": {"match_all": {}}})),
            results_per_server: 10,
            ..ScrollOptions::default()
        };
        let page = client.scroll("tweets", "tweet", &options).await.unwrap();
        assert_eq!(scroll_id(&page), Some("c2Nhbjs2"));

        let seen = rec.seen();
        assert_eq!(seen.len(), 2);
        assert_eq!(
            seen[0].target,
            "http://es:9200/tweets/tweet/_search?scroll=1m&search_type=scan&size=10"
        );
        assert_eq!(seen[0].body, Some(Body::Json(json!({"query": {"match_all": {}}}))));
        assert_eq!(seen[1].target, "http://es:9200/_search/scroll?scroll=1m&scroll_id=c2Nhbjs1");
        assert!(seen[1].body.is_none());
    }

    #[tokio::test]
    async fn test_cursor_skips_scan() {
        let (client, rec) = client();
        rec.respond(200, json!({"_scroll_id": "next", "hits": {"hits": []}}));

        let options = ScrollOptions::default().with_cursor("abc");
        client.scroll("tweets", "tweet", &options).await.unwrap();

        let seen = rec.seen();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].target, "http://es:9200/_search/scroll?scroll=1m&scroll_id=abc");
    }

    #[tokio::test]
    async fn test_scan_without_cursor_is_unexpected() {
        let (client, rec) = client();
        rec.respond(200, json!({"hits": {}}));

        let err = client.scroll("tweets", "tweet", &ScrollOptions::default()).await.unwrap_err();
        assert!(matches!(err, ClientError::UnexpectedResponse(_)));
        assert_eq!(rec.seen().len(), 1);
    }
}
