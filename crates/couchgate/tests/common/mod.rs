//! Shared test helpers: a scriptable mock transport.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use couchgate::{
    Endpoint, EndpointOptions, Request, Response, Result, SourceOptions, Transport,
};

/// A transport that records every call and replays queued responses.
///
/// `send` pops responses front-to-back and answers an empty ok response once
/// the queue runs dry. `serialize` and `normalize` are identity functions
/// that record their input.
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<Vec<Response>>,
    sent: Mutex<Vec<Request>>,
    serialized: Mutex<Vec<Option<Value>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_responses(responses: Vec<Response>) -> Self {
        Self {
            responses: Mutex::new(responses),
            ..Default::default()
        }
    }

    /// Requests passed to `send`, in call order.
    pub fn sent(&self) -> Vec<Request> {
        self.sent.lock().unwrap().clone()
    }

    /// Payloads passed to `serialize`, in call order.
    pub fn serialized(&self) -> Vec<Option<Value>> {
        self.serialized.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    fn prepare_endpoint(
        &self,
        options: &EndpointOptions,
        _source_options: Option<&SourceOptions>,
    ) -> Endpoint {
        Endpoint {
            uri: options.uri.clone(),
            method: options.method,
            rev_uri: None,
        }
    }

    async fn send(&self, request: Request) -> Result<Response> {
        self.sent.lock().unwrap().push(request);
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok(Response::ok(None))
        } else {
            Ok(responses.remove(0))
        }
    }

    async fn serialize(&self, data: Option<Value>, _request: &Request) -> Result<Option<Value>> {
        self.serialized.lock().unwrap().push(data.clone());
        Ok(data)
    }

    async fn normalize(&self, data: Option<Value>, _request: &Request) -> Result<Option<Value>> {
        Ok(data)
    }
}
