//! Alias management.

use serde::Serialize;
use serde_json::{json, Value};

use crate::client::SearchClient;
use crate::error::ClientResult;
use crate::transport::Request;

/// One entry of an `_aliases` actions list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AliasAction {
    Add { index: String, alias: String },
    Remove { index: String, alias: String },
}

impl AliasAction {
    pub fn add(index: impl Into<String>, alias: impl Into<String>) -> Self {
        AliasAction::Add {
            index: index.into(),
            alias: alias.into(),
        }
    }

    pub fn remove(index: impl Into<String>, alias: impl Into<String>) -> Self {
        AliasAction::Remove {
            index: index.into(),
            alias: alias.into(),
        }
    }
}

impl SearchClient {
    /// All indices and their aliases.
    pub async fn get_aliases(&self) -> ClientResult<Value> {
        Ok(self.execute(&Request::get("/_aliases")).await?.body)
    }

    pub async fn add_alias(&self, index: &str, alias: &str) -> ClientResult<Value> {
        self.post_aliases(&[AliasAction::add(index, alias)]).await
    }

    pub async fn remove_alias(&self, index: &str, alias: &str) -> ClientResult<Value> {
        self.post_aliases(&[AliasAction::remove(index, alias)]).await
    }

    /// Apply several alias actions atomically.
    pub async fn post_aliases(&self, actions: &[AliasAction]) -> ClientResult<Value> {
        let request = Request::post("/_aliases").json(&json!({ "actions": actions }))?;
        Ok(self.execute(&request).await?.body)
    }
}
