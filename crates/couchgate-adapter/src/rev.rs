use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use couchgate_core::{Endpoint, Ident, Method, Request, Transport};

// ---------------------------------------------------------------------------
// Bulk key-lookup row shapes
// ---------------------------------------------------------------------------

/// The revision part of a lookup row.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RevValue {
    pub rev: String,
}

/// One row of a bulk key-lookup response.
///
/// Found rows carry `id` and `value`; not-found rows carry `key` and `error`
/// instead. `doc` is present only when the lookup requested full bodies
/// (`include_docs=true`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RevRow {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub value: Option<RevValue>,
    #[serde(default)]
    pub doc: Option<Value>,
    #[serde(default)]
    pub error: Option<String>,
}

impl RevRow {
    fn matches(&self, key: &str) -> bool {
        self.id.as_deref() == Some(key) || self.key.as_deref() == Some(key)
    }
}

// ---------------------------------------------------------------------------
// Document batch helpers
// ---------------------------------------------------------------------------

/// View a data payload as a sequence of documents. A single object counts
/// as a one-element batch.
pub(crate) fn doc_items(data: Option<&Value>) -> Vec<&Value> {
    match data {
        Some(Value::Array(items)) => items.iter().collect(),
        Some(item) => vec![item],
        None => Vec::new(),
    }
}

pub(crate) fn is_meta(item: &Value) -> bool {
    item.get("type").and_then(Value::as_str) == Some("meta")
}

fn doc_id(item: &Value) -> String {
    item.get("id")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

// ---------------------------------------------------------------------------
// Revision resolution
// ---------------------------------------------------------------------------

/// Look up the current revision of every document affected by a request.
///
/// Issues exactly one bulk request (`POST <rev_uri>` with `{"keys": [...]}`)
/// regardless of batch size, carrying the enclosing request's auth under a
/// root identity. Returns one slot per key, in key order; a `None` slot
/// means no known revision.
///
/// Never fails: no `rev_uri`, no keys, a transport error, an error status
/// or missing rows all degrade to revision-less slots. The store's own
/// write-time conflict check is the final authority.
pub async fn fetch_revs<T>(data: Option<&Value>, request: &Request, transport: &T) -> Vec<Option<RevRow>>
where
    T: Transport + ?Sized,
{
    let Some(rev_uri) = request.endpoint.rev_uri.clone() else {
        return Vec::new();
    };

    let items = doc_items(data);
    let keys: Vec<String> = if !items.is_empty() {
        items.iter().map(|item| doc_id(item)).collect()
    } else if let Some(id) = request.params.as_ref().and_then(|p| p.id.clone()) {
        vec![id]
    } else {
        return Vec::new();
    };

    // Meta documents need their stored body, not just the revision, so
    // server-authoritative attributes survive partial overwrites.
    let uri = if items.iter().any(|item| is_meta(item)) {
        format!("{rev_uri}?include_docs=true")
    } else {
        rev_uri
    };

    let lookup = Request {
        endpoint: Endpoint {
            uri,
            method: Some(Method::Post),
            rev_uri: None,
        },
        data: Some(json!({ "keys": keys })),
        auth: request.auth.clone(),
        ident: Some(Ident::root()),
        ..Default::default()
    };

    let response = match transport.send(lookup).await {
        Ok(response) => response,
        Err(err) => {
            debug!("revision lookup failed: {err}");
            return vec![None; keys.len()];
        }
    };

    if !response.is_ok() {
        debug!(
            "revision lookup returned error status: {}",
            response.error.as_deref().unwrap_or("unknown")
        );
        return vec![None; keys.len()];
    }

    let rows: Vec<RevRow> = response
        .data
        .as_ref()
        .and_then(|data| data.get("rows"))
        .cloned()
        .and_then(|rows| serde_json::from_value(rows).ok())
        .unwrap_or_default();

    align_rows(&keys, rows)
}

/// Re-align lookup rows against the requested key list.
///
/// The store preserves key order in practice, but the contract here is
/// index alignment with the input keys, so rows are matched by identifier
/// before anything downstream consumes them positionally.
fn align_rows(keys: &[String], rows: Vec<RevRow>) -> Vec<Option<RevRow>> {
    let mut slots: Vec<Option<RevRow>> = rows.into_iter().map(Some).collect();

    keys.iter()
        .map(|key| {
            slots
                .iter_mut()
                .find(|slot| slot.as_ref().is_some_and(|row| row.matches(key)))
                .and_then(Option::take)
        })
        .collect()
}
