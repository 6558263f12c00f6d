//! # CouchGate
//!
//! An adapter layer that lets a generic document-store client speak
//! CouchDB's dialect. CouchDB addresses documents with `_id`/`_rev` fields
//! and optimistic-concurrency revisions; generic callers use a plain `id`.
//! CouchGate sits between the two: before any mutating write it discovers
//! the current revision of every affected document through one bulk
//! `_all_docs` lookup, rewrites the outgoing payload into CouchDB wire form,
//! and translates responses back.
//!
//! ## Quick start
//!
//! ```no_run
//! use couchgate::{CouchAdapter, EndpointOptions, SourceOptions, Transport};
//!
//! # async fn example(json_transport: impl Transport) -> couchgate::Result<()> {
//! // Wrap the generic JSON/HTTP transport.
//! let adapter = CouchAdapter::new(json_transport);
//!
//! // Prepared endpoints gain a `rev_uri` pointing at `_all_docs`.
//! let endpoint = adapter.prepare_endpoint(
//!     &EndpointOptions { uri: "/entry:ent1".into(), method: None },
//!     Some(&SourceOptions { base_uri: Some("http://localhost:5984/db".into()) }),
//! );
//! assert!(endpoint.rev_uri.is_some());
//! # Ok(())
//! # }
//! ```

pub use couchgate_core::{
    Action, CouchGateError, Endpoint, EndpointOptions, Ident, Method, Params, Request, Response,
    ResponseStatus, Result, SourceOptions, Transport,
};

pub use couchgate_adapter::{CouchAdapter, RevRow, RevValue};

pub use couchgate_auth::{AuthObject, CouchAuth, Session};
