//! Response handed back to callers.

use serde::de::DeserializeOwned;
use serde_json::Value;

/// A response obtained from a server.
///
/// Status 0 means the transport returned without a real response.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,
    pub body: Value,
}

impl Response {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// Parse raw response bytes. Empty bodies become `null`, non-JSON bodies a
    /// JSON string.
    pub fn from_bytes(status: u16, bytes: &[u8]) -> Self {
        let body = if bytes.iter().all(u8::is_ascii_whitespace) {
            Value::Null
        } else {
            serde_json::from_slice(bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
        };
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The service-reported error embedded in the body, if any.
    ///
    /// `null` and `false` both mean no error.
    pub fn error(&self) -> Option<&Value> {
        self.body
            .get("error")
            .filter(|e| !e.is_null() && **e != Value::Bool(false))
    }

    /// Deserialize the body into a typed value.
    pub fn json<T: DeserializeOwned>(self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.body)
    }
}
