use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::request::{Endpoint, EndpointOptions, Request, SourceOptions};
use crate::response::Response;

/// The interface an underlying JSON/HTTP adapter must expose.
///
/// The transport owns URL templating, HTTP execution and JSON
/// (de)serialization. The CouchDB adapter layer wraps a transport and
/// intercepts only the revision and identifier-field logic, delegating
/// everything else.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Turn endpoint configuration into a ready-to-use endpoint.
    fn prepare_endpoint(
        &self,
        options: &EndpointOptions,
        source_options: Option<&SourceOptions>,
    ) -> Endpoint;

    /// Execute a request against the store.
    ///
    /// Store-level failures are reported through `Response::status`, not as
    /// an `Err`; `Err` is reserved for hard transport failures.
    async fn send(&self, request: Request) -> Result<Response>;

    /// Serialize outgoing data into the store's wire format.
    async fn serialize(&self, data: Option<Value>, request: &Request) -> Result<Option<Value>>;

    /// Normalize incoming data out of the store's wire format.
    async fn normalize(&self, data: Option<Value>, request: &Request) -> Result<Option<Value>>;
}
