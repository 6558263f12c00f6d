use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome status of a transport call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Ok,
    Error,
}

/// A response from a transport.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: ResponseStatus,
    pub data: Option<Value>,
    pub error: Option<String>,
}

impl Response {
    pub fn ok(data: Option<Value>) -> Self {
        Self {
            status: ResponseStatus::Ok,
            data,
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Error,
            data: None,
            error: Some(message.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == ResponseStatus::Ok
    }
}
