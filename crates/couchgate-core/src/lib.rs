//! Core types for CouchGate.
//!
//! Defines the transport interface every underlying JSON/HTTP adapter must
//! implement, plus the request/response model the adapter layer operates on.
//! Documents travel as `serde_json::Value` so the adapter can rewrite fields
//! without committing callers to a fixed schema.

pub mod error;
pub mod request;
pub mod response;
pub mod transport;

pub use error::{CouchGateError, Result};
pub use request::{Action, Endpoint, EndpointOptions, Ident, Method, Params, Request, SourceOptions};
pub use response::{Response, ResponseStatus};
pub use transport::Transport;
