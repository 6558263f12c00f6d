use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Action / Method
// ---------------------------------------------------------------------------

/// What a request intends to do with the addressed documents.
///
/// Only `Set` and `Delete` mutate; `Delete` additionally drives the
/// `_deleted` marker on outgoing documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Action {
    #[default]
    Get,
    Set,
    Delete,
}

/// HTTP method for an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

// ---------------------------------------------------------------------------
// Endpoint configuration
// ---------------------------------------------------------------------------

/// Endpoint configuration before preparation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EndpointOptions {
    pub uri: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<Method>,
}

/// A prepared endpoint.
///
/// `rev_uri` points at the store's bulk key-lookup endpoint. When it is
/// absent, revision lookup is disabled and writes pass through without
/// revision information.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Endpoint {
    pub uri: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<Method>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rev_uri: Option<String>,
}

/// Per-source configuration handed to endpoint preparation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_uri: Option<String>,
}

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// Request parameters addressing a document when no payload is given.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Params {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<String>,
}

/// Identity a request is sent under. `root` marks privileged internal
/// requests that bypass record-level access policies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ident {
    pub root: bool,
}

impl Ident {
    pub fn root() -> Self {
        Self { root: true }
    }
}

/// A request handed to a transport.
///
/// `data` is a JSON object for a single document, a JSON array for a batch,
/// or absent for body-less requests (plain delete-by-id). Documents carry a
/// generic `id`, a `type` discriminator, and an optional `attributes` object.
#[derive(Debug, Clone, Default)]
pub struct Request {
    pub action: Action,
    pub endpoint: Endpoint,
    pub data: Option<Value>,
    pub params: Option<Params>,
    pub headers: BTreeMap<String, String>,
    pub auth: Option<Value>,
    pub ident: Option<Ident>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_defaults_to_get() {
        assert_eq!(Action::default(), Action::Get);
    }

    #[test]
    fn action_serializes_uppercase() {
        assert_eq!(serde_json::to_value(Action::Delete).unwrap(), "DELETE");
        let action: Action = serde_json::from_value(serde_json::json!("SET")).unwrap();
        assert_eq!(action, Action::Set);
    }

    #[test]
    fn endpoint_omits_absent_fields() {
        let endpoint = Endpoint {
            uri: "/entry:ent1".into(),
            method: None,
            rev_uri: None,
        };
        let json = serde_json::to_value(&endpoint).unwrap();
        assert_eq!(json, serde_json::json!({"uri": "/entry:ent1"}));
    }

    #[test]
    fn params_type_field_name() {
        let params = Params {
            id: Some("ent1".into()),
            doc_type: Some("entry".into()),
        };
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json, serde_json::json!({"id": "ent1", "type": "entry"}));
    }

    #[test]
    fn root_ident() {
        assert!(Ident::root().root);
        assert!(!Ident::default().root);
    }
}
