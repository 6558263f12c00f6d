use serde_json::Value;

use couchgate_core::{Action, Request, Transport};

use crate::rev::{fetch_revs, is_meta, RevRow};

/// Rewrite one document into CouchDB wire form.
///
/// Renames `id` to `_id`, attaches `_rev` from the aligned lookup row when
/// one was found, merges previously stored attributes for meta documents
/// (new values win on collision), and sets `_deleted` under a delete action.
///
/// The deletion marker is driven solely by the request action; a per-item
/// `delete` field has no effect here.
pub(crate) fn serialize_item(item: &Value, action: Action, rev_row: Option<&RevRow>) -> Value {
    let Some(obj) = item.as_object() else {
        return item.clone();
    };

    let mut out = obj.clone();
    if let Some(id) = out.remove("id") {
        out.insert("_id".into(), id);
    }

    if let Some(row) = rev_row {
        if let Some(value) = &row.value {
            out.insert("_rev".into(), Value::String(value.rev.clone()));
        }

        if is_meta(item) {
            let stored_attrs = row
                .doc
                .as_ref()
                .and_then(|doc| doc.get("attributes"))
                .and_then(Value::as_object);
            if let Some(stored) = stored_attrs {
                let mut merged = stored.clone();
                if let Some(new_attrs) = out.get("attributes").and_then(Value::as_object) {
                    for (key, value) in new_attrs {
                        merged.insert(key.clone(), value.clone());
                    }
                }
                out.insert("attributes".into(), Value::Object(merged));
            }
        }
    }

    if action == Action::Delete {
        out.insert("_deleted".into(), Value::Bool(true));
    }

    Value::Object(out)
}

/// Transform an outgoing payload into CouchDB wire form.
///
/// Absent data passes through without triggering revision lookup. Single
/// documents and batches share the per-item path; lookup rows are consumed
/// by position, matching each item's index in the batch.
pub async fn serialize_data<T>(data: Option<Value>, request: &Request, transport: &T) -> Option<Value>
where
    T: Transport + ?Sized,
{
    let data = data?;
    let revs = fetch_revs(Some(&data), request, transport).await;
    let rev_at = |index: usize| revs.get(index).and_then(Option::as_ref);

    match data {
        Value::Array(items) => Some(Value::Array(
            items
                .iter()
                .enumerate()
                .map(|(index, item)| serialize_item(item, request.action, rev_at(index)))
                .collect(),
        )),
        item => Some(serialize_item(&item, request.action, rev_at(0))),
    }
}
