//! Bulk ingestion.
//!
//! A bulk body is newline-delimited JSON: one action line, followed by a
//! source line for actions that carry a document.

use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::api::Params;
use crate::client::SearchClient;
use crate::error::{ClientError, ClientResult};
use crate::transport::{Body, Request};

/// One operation of a bulk batch.
#[derive(Debug, Clone, PartialEq)]
pub enum BulkAction {
    /// Index (create or replace) a document.
    Index {
        index: String,
        doc_type: String,
        id: Option<String>,
        doc: Value,
    },
    /// Create a document, failing that item if the id exists.
    Create {
        index: String,
        doc_type: String,
        id: Option<String>,
        doc: Value,
    },
    Delete {
        index: String,
        doc_type: String,
        id: String,
    },
}

impl BulkAction {
    pub fn index<T: Serialize + ?Sized>(
        index: impl Into<String>,
        doc_type: impl Into<String>,
        id: Option<String>,
        doc: &T,
    ) -> Result<Self, serde_json::Error> {
        Ok(BulkAction::Index {
            index: index.into(),
            doc_type: doc_type.into(),
            id,
            doc: serde_json::to_value(doc)?,
        })
    }

    pub fn delete(index: impl Into<String>, doc_type: impl Into<String>, id: impl Into<String>) -> Self {
        BulkAction::Delete {
            index: index.into(),
            doc_type: doc_type.into(),
            id: id.into(),
        }
    }

    fn metadata(index: &str, doc_type: &str, id: Option<&str>) -> Value {
        let mut meta = Map::new();
        meta.insert("_index".into(), json!(index));
        meta.insert("_type".into(), json!(doc_type));
        if let Some(id) = id {
            meta.insert("_id".into(), json!(id));
        }
        Value::Object(meta)
    }

    /// Append this action's line(s) to an NDJSON body.
    pub fn write_ndjson(&self, out: &mut String) {
        let (action, doc) = match self {
            BulkAction::Index { index, doc_type, id, doc } => (
                json!({ "index": Self::metadata(index, doc_type, id.as_deref()) }),
                Some(doc),
            ),
            BulkAction::Create { index, doc_type, id, doc } => (
                json!({ "create": Self::metadata(index, doc_type, id.as_deref()) }),
                Some(doc),
            ),
            BulkAction::Delete { index, doc_type, id } => (
                json!({ "delete": Self::metadata(index, doc_type, Some(id)) }),
                None,
            ),
        };
        out.push_str(&action.to_string());
        out.push('\n');
        if let Some(doc) = doc {
            out.push_str(&doc.to_string());
            out.push('\n');
        }
    }
}

/// Render a batch as an NDJSON body.
pub fn to_ndjson(actions: &[BulkAction]) -> String {
    let mut body = String::new();
    for action in actions {
        action.write_ndjson(&mut body);
    }
    body
}

impl SearchClient {
    /// Submit a batch of actions.
    ///
    /// An empty batch performs no request and returns `Ok(None)`. The whole
    /// batch fails with [`ClientError::BulkRejected`] unless the service
    /// answers with HTTP 200; per-item failures are reported in the body.
    pub async fn bulk(&self, actions: &[BulkAction], params: Params<'_>) -> ClientResult<Option<Value>> {
        if actions.is_empty() {
            return Ok(None);
        }
        self.bulk_ndjson(to_ndjson(actions), params).await
    }

    /// Submit a pre-rendered NDJSON bulk body.
    pub async fn bulk_ndjson(&self, data: String, params: Params<'_>) -> ClientResult<Option<Value>> {
        if data.trim().is_empty() {
            return Ok(None);
        }
        let request = Request::post("/_bulk")
            .query_pairs(params.iter().copied())
            .body(Body::NdJson(data));
        let response = self.execute(&request).await?;
        if response.status != 200 {
            return Err(ClientError::BulkRejected {
                status: response.status,
            });
        }
        Ok(Some(response.body))
    }
}
