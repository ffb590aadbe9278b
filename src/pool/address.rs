//! Backend server address.

use std::fmt;

use serde::{Deserialize, Serialize};
use url::Url;

/// An opaque identifier for one backend endpoint (scheme + host + port).
///
/// The pool never looks inside it; only the transport turns it into a URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServerAddress(String);

impl ServerAddress {
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Join a request path and query onto this address.
    pub fn target(&self, path: &str, query: &[(String, String)]) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(&self.0)?;
        let path = path.trim_start_matches('/');
        {
            let base = url.path().trim_end_matches('/').to_string();
            url.set_path(&format!("{}/{}", base, path));
        }
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query.iter());
        }
        Ok(url)
    }
}

impl fmt::Display for ServerAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ServerAddress {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ServerAddress {
    fn from(s: String) -> Self {
        Self(s)
    }
}
