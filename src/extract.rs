//! Pull object identifiers out of a GraphQL `Get` response.
//!
//! The expected shape is
//!
//! ```json
//! {"data": {"Get": {"Document": [{"_additional": {"id": "..."}}, ...]}}}
//! ```
//!
//! Any deviation is reported with the path where it was found. Nothing is
//! skipped: a response that is wrong for one element is wrong as a whole.

use crate::error::{ClientError, Result};
use serde_json::Value;

/// Parse `body` and return the identifiers under `data.Get.<class>`, in
/// server order.
pub fn extract_ids(body: &str, class: &str) -> Result<Vec<String>> {
    let root: Value = serde_json::from_str(body)
        .map_err(|e| ClientError::malformed("$", format!("invalid JSON: {}", e)))?;
    extract_ids_from_value(&root, class)
}

/// Same as [`extract_ids`] for an already parsed document.
fn extract_ids_from_value(root: &Value, class: &str) -> Result<Vec<String>> {
    if let Some(errors) = root.get("errors") {
        let messages = graphql_error_messages(errors);
        if !messages.is_empty() {
            return Err(ClientError::GraphQl { messages });
        }
    }

    let data = member(root, "data", "data")?;
    let get = member(data, "Get", "data.Get")?;

    let list_path = format!("data.Get.{}", class);
    let entries = member(get, class, &list_path)?
        .as_array()
        .ok_or_else(|| {
            ClientError::malformed(
                list_path.as_str(),
                format!("expected an array, found {}", kind(&get[class])),
            )
        })?;

    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let entry_path = format!("{}[{}]", list_path, i);
            let additional_path = format!("{}._additional", entry_path);
            let additional = member(entry, "_additional", &additional_path)?;
            if !additional.is_object() {
                return Err(ClientError::malformed(
                    additional_path,
                    format!("expected an object, found {}", kind(additional)),
                ));
            }

            let id_path = format!("{}.id", additional_path);
            match member(additional, "id", &id_path)? {
                Value::String(id) => Ok(id.clone()),
                other => Err(ClientError::malformed(
                    id_path,
                    format!("expected a string, found {}", kind(other)),
                )),
            }
        })
        .collect()
}

fn member<'a>(value: &'a Value, key: &str, path: &str) -> Result<&'a Value> {
    match value {
        Value::Object(map) => map
            .get(key)
            .ok_or_else(|| ClientError::malformed(path, "missing key")),
        other => Err(ClientError::malformed(
            path,
            format!("parent is {}, not an object", kind(other)),
        )),
    }
}

fn graphql_error_messages(errors: &Value) -> Vec<String> {
    match errors {
        Value::Array(items) => items
            .iter()
            .map(|item| {
                item.get("message")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| item.to_string())
            })
            .collect(),
        Value::Null => Vec::new(),
        other => vec![other.to_string()],
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
