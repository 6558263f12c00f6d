use serde_json::Value;

/// Rename `_id` back to the generic `id` on one document.
///
/// Idempotent: a document that already carries `id` is left alone, so data
/// can be normalized more than once safely. Non-object values (including
/// nulls inside arrays) pass through unchanged.
fn normalize_item(item: &Value) -> Value {
    let Some(obj) = item.as_object() else {
        return item.clone();
    };

    if obj.contains_key("id") {
        return item.clone();
    }

    let mut out = obj.clone();
    match out.remove("_id") {
        Some(id) => {
            out.insert("id".into(), id);
            Value::Object(out)
        }
        None => item.clone(),
    }
}

/// Transform incoming data back into the generic `id` convention, for a
/// single document, an array of documents (per element), or absent data.
pub fn normalize_data(data: Option<Value>) -> Option<Value> {
    match data {
        None => None,
        Some(Value::Array(items)) => Some(Value::Array(items.iter().map(normalize_item).collect())),
        Some(item) => Some(normalize_item(&item)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn renames_store_id_for_one_item() {
        let data = Some(json!({"_id": "entry:ent1", "type": "entry"}));
        let out = normalize_data(data);
        assert_eq!(out, Some(json!({"id": "entry:ent1", "type": "entry"})));
    }

    #[test]
    fn renames_store_id_for_more_items() {
        let data = Some(json!([
            {"_id": "entry:ent1", "type": "entry"},
            {"_id": "entry:ent2", "type": "entry"}
        ]));
        let out = normalize_data(data);
        assert_eq!(
            out,
            Some(json!([
                {"id": "entry:ent1", "type": "entry"},
                {"id": "entry:ent2", "type": "entry"}
            ]))
        );
    }

    #[test]
    fn noop_when_id_already_set() {
        let data = Some(json!({"id": "entry:ent1", "type": "entry"}));
        let out = normalize_data(data.clone());
        assert_eq!(out, data);
    }

    #[test]
    fn double_normalization_is_safe() {
        let data = Some(json!({"_id": "entry:ent1", "type": "entry"}));
        let once = normalize_data(data);
        let twice = normalize_data(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn absent_data_passes_through() {
        assert_eq!(normalize_data(None), None);
    }

    #[test]
    fn null_passes_through() {
        assert_eq!(normalize_data(Some(Value::Null)), Some(Value::Null));
    }

    #[test]
    fn null_elements_pass_through() {
        let out = normalize_data(Some(json!([null])));
        assert_eq!(out, Some(json!([null])));
    }

    #[test]
    fn object_without_store_id_is_unchanged() {
        let data = Some(json!({"type": "entry"}));
        let out = normalize_data(data.clone());
        assert_eq!(out, data);
    }
}
