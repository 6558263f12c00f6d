//! CouchDB adapter layer for CouchGate.
//!
//! Wraps a generic JSON/HTTP transport and bridges CouchDB's dialect: before
//! any mutating write the current `_rev` of every affected document is
//! discovered through one bulk `_all_docs` lookup, outgoing payloads are
//! rewritten from the generic `id` convention to `_id`/`_rev`/`_deleted`,
//! and incoming payloads are translated back. Everything else is delegated
//! to the wrapped transport untouched.

use async_trait::async_trait;
use serde_json::Value;

use couchgate_core::{
    Endpoint, EndpointOptions, Method, Request, Response, Result, SourceOptions, Transport,
};

pub mod endpoint;
pub mod normalize;
pub mod rev;
pub mod serialize;

pub use rev::{RevRow, RevValue};

/// The CouchDB adapter: a transport wrapping another transport.
///
/// Intercepts endpoint preparation, outgoing serialization, incoming
/// normalization and body-less deletes; delegates actual HTTP execution and
/// JSON handling to the wrapped transport.
pub struct CouchAdapter<T> {
    transport: T,
}

impl<T: Transport> CouchAdapter<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// The wrapped transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }
}

#[async_trait]
impl<T: Transport> Transport for CouchAdapter<T> {
    fn prepare_endpoint(
        &self,
        options: &EndpointOptions,
        source_options: Option<&SourceOptions>,
    ) -> Endpoint {
        let prepared = self.transport.prepare_endpoint(options, source_options);
        endpoint::prepare_endpoint(prepared, source_options)
    }

    async fn send(&self, mut request: Request) -> Result<Response> {
        // A body-less DELETE carries its revision as a precondition header
        // instead of a `_rev` field. No revision found means no header; the
        // store decides what to do with the unconditional delete.
        if request.data.is_none() && request.endpoint.method == Some(Method::Delete) {
            let revs = rev::fetch_revs(None, &request, &self.transport).await;
            let found = revs
                .first()
                .and_then(Option::as_ref)
                .and_then(|row| row.value.as_ref());
            if let Some(value) = found {
                request
                    .headers
                    .insert("If-Match".into(), value.rev.clone());
            }
        }

        self.transport.send(request).await
    }

    async fn serialize(&self, data: Option<Value>, request: &Request) -> Result<Option<Value>> {
        let serialized = serialize::serialize_data(data, request, &self.transport).await;
        self.transport.serialize(serialized, request).await
    }

    async fn normalize(&self, data: Option<Value>, request: &Request) -> Result<Option<Value>> {
        let normalized = self.transport.normalize(data, request).await?;
        Ok(normalize::normalize_data(normalized))
    }
}
