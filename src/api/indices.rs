//! Index management: create, remove, open/close, refresh, existence, mappings.

use serde::Serialize;
use serde_json::Value;

use crate::api::{join_names, path};
use crate::client::SearchClient;
use crate::error::ClientResult;
use crate::transport::Request;

impl SearchClient {
    /// Create an index with the given creation options (settings, mappings).
    pub async fn create_index<T: Serialize + ?Sized>(&self, index: &str, options: &T) -> ClientResult<Value> {
        let request = Request::post(path(&[index])).json(options)?;
        Ok(self.execute(&request).await?.body)
    }

    /// Delete an index.
    pub async fn remove_index(&self, index: &str) -> ClientResult<Value> {
        Ok(self.execute(&Request::delete(path(&[index]))).await?.body)
    }

    pub async fn close_index(&self, index: &str) -> ClientResult<Value> {
        Ok(self.execute(&Request::post(path(&[index, "_close"]))).await?.body)
    }

    pub async fn open_index(&self, index: &str) -> ClientResult<Value> {
        Ok(self.execute(&Request::post(path(&[index, "_open"]))).await?.body)
    }

    /// Ask the service to make recent writes searchable.
    ///
    /// This flushes buffers without clearing caches; commits are managed by
    /// the service itself.
    pub async fn refresh(&self, indices: &[&str]) -> ClientResult<Value> {
        let request = Request::post(path(&[&join_names(indices), "_refresh"]));
        Ok(self.execute(&request).await?.body)
    }

    /// True if every named index exists.
    pub async fn indices_exists(&self, indices: &[&str]) -> ClientResult<bool> {
        let response = self.execute(&Request::head(path(&[&join_names(indices)]))).await?;
        Ok(response.status == 200)
    }

    /// Fetch the mappings defined for the given types of an index.
    pub async fn get_mapping(&self, index: &str, types: &str) -> ClientResult<Value> {
        Ok(self.execute(&Request::get(path(&[index, types, "_mapping"]))).await?.body)
    }

    /// Merge a mapping into an index type.
    pub async fn put_mapping<T: Serialize + ?Sized>(&self, index: &str, doc_type: &str, mapping: &T) -> ClientResult<Value> {
        let request = Request::put(path(&[index, doc_type, "_mapping"])).json(mapping)?;
        Ok(self.execute(&request).await?.body)
    }
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::client;
    use crate::error::ClientError;
    use crate::transport::Body;
    use serde_json::json;

    #[tokio::test]
    async fn test_create_index_posts_options() {
        let (client, rec) = client();
        rec.respond(200, json!({"acknowledged": true}));

        let out = client
            .create_index("tweets", &json!({"settings": {"number_of_shards": 1}}))
            .await
            .unwrap();

        assert_eq!(out, json!({"acknowledged": true}));
        let seen = rec.seen();
        assert_eq!(seen[0].verb, "POST");
        assert_eq!(seen[0].target, "http://es:9200/tweets");
        assert_eq!(seen[0].body, Some(Body::Json(json!({"settings": {"number_of_shards": 1}}))));
    }

    #[tokio::test]
    async fn test_index_lifecycle_paths() {
        let (client, rec) = client();
        client.close_index("tweets").await.unwrap();
        client.open_index("tweets").await.unwrap();
        client.refresh(&["tweets", "users"]).await.unwrap();
        client.remove_index("tweets").await.unwrap();

        let seen: Vec<(&str, String)> = rec.seen().into_iter().map(|s| (s.verb, s.target)).collect();
        assert_eq!(
            seen,
            vec![
                ("POST", "http://es:9200/tweets/_close".to_string()),
                ("POST", "http://es:9200/tweets/_open".to_string()),
                ("POST", "http://es:9200/tweets,users/_refresh".to_string()),
                ("DELETE", "http://es:9200/tweets".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_indices_exists_uses_status() {
        let (client, rec) = client();
        rec.respond(200, serde_json::Value::Null).respond(404, serde_json::Value::Null);

        assert!(client.indices_exists(&["tweets"]).await.unwrap());
        assert!(!client.indices_exists(&["tweets", "gone"]).await.unwrap());
        assert_eq!(rec.seen()[1].verb, "HEAD");
        assert_eq!(rec.seen()[1].target, "http://es:9200/tweets,gone");
    }

    #[tokio::test]
    async fn test_mapping_roundtrip_paths() {
        let (client, rec) = client();
        let mapping = json!({"foo": {"properties": {"bar": {"type": "string", "store": true}}}});
        rec.respond(200, json!({"acknowledged": true}));

        client.put_mapping("idx", "foo", &mapping).await.unwrap();
        client.get_mapping("idx", "foo").await.unwrap();

        let seen = rec.seen();
        assert_eq!((seen[0].verb, seen[0].target.as_str()), ("PUT", "http://es:9200/idx/foo/_mapping"));
        assert_eq!((seen[1].verb, seen[1].target.as_str()), ("GET", "http://es:9200/idx/foo/_mapping"));
    }

    #[tokio::test]
    async fn test_remove_missing_index_reports_application_error() {
        let (client, rec) = client();
        rec.respond(404, json!({"error": "IndexMissingException[[nope] missing]", "status": 404}));

        let err = client.remove_index("nope").await.unwrap_err();
        assert!(matches!(err, ClientError::Application { status: 404, .. }));
    }
}
