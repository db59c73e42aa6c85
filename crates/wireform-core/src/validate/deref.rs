//! JSON Schema `$ref` dereferencing
//!
//! Pure transformation: resolves every same-document reference into a
//! self-contained schema tree before the schema is compiled. Unresolvable
//! or external references are a fatal configuration error, not a soft
//! validation failure. A depth cap bounds pathological reference chains.

use serde_json::Value;
use thiserror::Error;

const MAX_DEPTH: usize = 64;

/// Errors raised while dereferencing a schema
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DerefError {
    #[error("unresolvable schema reference '{0}'")]
    Unresolvable(String),

    #[error("external schema reference '{0}' is not supported")]
    External(String),

    #[error("schema reference nesting exceeds {MAX_DEPTH} levels")]
    TooDeep,
}

/// Resolve every `$ref` in `schema` into a self-contained tree
///
/// Only same-document JSON Pointer references (`#/...`) are supported.
///
/// # Errors
///
/// Returns `DerefError` for external references, pointers that do not
/// resolve, or reference chains deeper than the cap (cyclic schemas).
pub fn dereference(schema: &Value) -> Result<Value, DerefError> {
    resolve(schema, schema, 0)
}

fn resolve(root: &Value, node: &Value, depth: usize) -> Result<Value, DerefError> {
    if depth > MAX_DEPTH {
        return Err(DerefError::TooDeep);
    }

    match node {
        Value::Object(map) => {
            if let Some(Value::String(reference)) = map.get("$ref") {
                let target = lookup(root, reference)?;
                return resolve(root, target, depth + 1);
            }

            let mut resolved = serde_json::Map::with_capacity(map.len());
            for (key, child) in map {
                resolved.insert(key.clone(), resolve(root, child, depth + 1)?);
            }
            Ok(Value::Object(resolved))
        }
        Value::Array(items) => {
            let resolved: Result<Vec<Value>, DerefError> = items
                .iter()
                .map(|item| resolve(root, item, depth + 1))
                .collect();
            Ok(Value::Array(resolved?))
        }
        other => Ok(other.clone()),
    }
}

fn lookup<'a>(root: &'a Value, reference: &str) -> Result<&'a Value, DerefError> {
    let Some(pointer) = reference.strip_prefix('#') else {
        return Err(DerefError::External(reference.to_string()));
    };

    if pointer.is_empty() {
        // "#" is the document itself; the depth cap catches the cycle.
        return Ok(root);
    }

    root.pointer(pointer)
        .ok_or_else(|| DerefError::Unresolvable(reference.to_string()))
}
