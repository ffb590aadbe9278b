//! reqwest-backed transport.

use std::time::Duration;

use dashmap::DashMap;
use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use reqwest::header::CONTENT_TYPE;
use url::Url;
use uuid::Uuid;

use crate::pool::ServerAddress;
use crate::transport::{Request, Response, Transport, TransportError};

/// Header carrying a per-request correlation id, echoed in server-side logs.
pub const X_OPAQUE_ID: &str = "x-opaque-id";

/// HTTP transport holding one client per server address.
#[derive(Debug)]
pub struct HttpTransport {
    clients: DashMap<ServerAddress, reqwest::Client>,
    connect_timeout: Duration,
}

impl HttpTransport {
    pub fn new(connect_timeout: Duration) -> Self {
        Self {
            clients: DashMap::new(),
            connect_timeout,
        }
    }

    fn client_for(&self, address: &ServerAddress) -> Result<reqwest::Client, TransportError> {
        if let Some(client) = self.clients.get(address) {
            return Ok(client.clone());
        }
        let client = reqwest::Client::builder()
            .connect_timeout(self.connect_timeout)
            .build()
            .map_err(|e| TransportError::Build(e.into()))?;
        Ok(self
            .clients
            .entry(address.clone())
            .or_insert(client)
            .clone())
    }

    /// Number of addresses with a cached client.
    pub fn cached_clients(&self) -> usize {
        self.clients.len()
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

fn classify(err: reqwest::Error) -> TransportError {
    if err.is_builder() {
        TransportError::Build(err.into())
    } else if err.is_timeout() && !err.is_connect() {
        TransportError::Timeout(err.into())
    } else {
        TransportError::Connect(err.into())
    }
}

impl Transport for HttpTransport {
    fn send<'a>(
        &'a self,
        address: &'a ServerAddress,
        target: Url,
        request: &'a Request,
    ) -> BoxFuture<'a, Result<Response, TransportError>> {
        async move {
            let client = self.client_for(address)?;
            let request_id = Uuid::new_v4().to_string();

            let mut builder = client
                .request(request.verb.into(), target)
                .header(X_OPAQUE_ID, request_id.as_str());
            if let Some(body) = &request.body {
                let bytes = body.to_bytes().map_err(|e| TransportError::Build(e.into()))?;
                builder = builder.header(CONTENT_TYPE, body.content_type()).body(bytes);
            }

            tracing::trace!(request_id = %request_id, server = %address, verb = %request.verb, path = %request.path, "Sending request");

            let response = builder.send().await.map_err(classify)?;
            let status = response.status().as_u16();
            let bytes = response.bytes().await.map_err(classify)?;
            Ok(Response::from_bytes(status, &bytes))
        }
        .boxed()
    }

    fn invalidate(&self, address: &ServerAddress) {
        if self.clients.remove(address).is_some() {
            tracing::debug!(server = %address, "Dropped cached client");
        }
    }
}
