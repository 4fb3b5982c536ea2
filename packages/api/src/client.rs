//! # ApiClient: typed façade over a [`Transport`]
//!
//! [`ApiClient`] is stateless: no caching, no retry, no interpretation of the payload
//! beyond decoding it into the expected type. The accessor methods live next to the
//! resource they serve ([`crate::content`], [`crate::auth`], [`crate::admin`]); this
//! module only holds the shared plumbing.

use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::transport::{ApiRequest, HttpTransport, Transport};

/// Resource accessors over a shared transport.
#[derive(Clone, Debug)]
pub struct ApiClient<T> {
    transport: T,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send `request` and decode the response body as `R`.
    pub async fn call<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R, ApiError> {
        let target = request.target();
        let value = self.transport.send(request).await?;
        serde_json::from_value(value).map_err(|e| {
            tracing::error!("Unexpected response shape from {}: {}", target, e);
            ApiError::Decode(format!("{target}: {e}"))
        })
    }
}

impl ApiClient<HttpTransport> {
    /// Client over HTTP using the given configuration.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        Ok(Self::new(HttpTransport::new(config)?))
    }
}
