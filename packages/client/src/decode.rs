//! Decoding of the store's JSON node/error schema into typed responses.
//!
//! A response body is one of two shapes: an error object (recognized by the
//! presence of `errorCode`) or a success object with a recursive node tree
//! under `node` and, for mutating operations, an optional `prevNode`
//! sibling. Anything else is a [`DecodeError`], fatal for that call and
//! distinct from both transport failures and store-reported errors.

use serde_json::{Map, Value};

use crate::types::{GetResponse, Node, PutResponse, PutSuccess, ResponseError};

/// The response body did not match the expected schema.
#[derive(thiserror::Error, Debug)]
pub enum DecodeError {
    #[error("response body is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a JSON object for {context}")]
    NotAnObject { context: &'static str },

    #[error("missing required field '{field}'")]
    MissingField { field: &'static str },

    #[error("field '{field}' is not a {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },
}

/// Decode a GET-shaped response body (get, wait, queue listing).
pub(crate) fn decode_get(body: &str) -> Result<GetResponse, DecodeError> {
    let root: Value = serde_json::from_str(body)?;
    let object = require_object(&root, "the response")?;

    if let Some(error) = check_for_error(object)? {
        return Ok(Err(error));
    }

    let node = object
        .get("node")
        .ok_or(DecodeError::MissingField { field: "node" })?;
    Ok(Ok(decode_node(node)?))
}

/// Decode a PUT-shaped response body (put, post, delete), capturing the
/// node's prior state when the server reports one.
pub(crate) fn decode_put(body: &str) -> Result<PutResponse, DecodeError> {
    let root: Value = serde_json::from_str(body)?;
    let object = require_object(&root, "the response")?;

    if let Some(error) = check_for_error(object)? {
        return Ok(Err(error));
    }

    let node = object
        .get("node")
        .ok_or(DecodeError::MissingField { field: "node" })?;
    let node = decode_node(node)?;

    let prev_node = match object.get("prevNode") {
        Some(prev) => Some(decode_node(prev)?),
        None => None,
    };

    Ok(Ok(PutSuccess { node, prev_node }))
}

/// Check the response for an error object.
///
/// `errorCode` alone decides: if present, the response is an error and no
/// node is read, whatever other fields exist. Only the code is required;
/// message, cause, and index default when absent.
fn check_for_error(object: &Map<String, Value>) -> Result<Option<ResponseError>, DecodeError> {
    if !object.contains_key("errorCode") {
        return Ok(None);
    }
    let error: ResponseError = serde_json::from_value(Value::Object(object.clone()))?;
    Ok(Some(error))
}

/// Recursively decode a node object into a [`Node`] tree.
///
/// `dir == true` marks a directory; its `nodes` array (absent means empty)
/// decodes in array order. A non-directory is a leaf; its `value` defaults
/// to empty when absent (DELETE responses return the removed node without
/// one). The index fields are required; `expiration` and `ttl` are
/// optional, where both absence and the `-1` sentinel mean no expiration.
fn decode_node(value: &Value) -> Result<Node, DecodeError> {
    let object = require_object(value, "a node")?;

    let key = require_str(object, "key")?.to_string();
    let modified_index = require_u64(object, "modifiedIndex")?;
    let created_index = require_u64(object, "createdIndex")?;
    let expiration = opt_str(object, "expiration")?;
    let ttl = opt_i64(object, "ttl")?.filter(|ttl| *ttl >= 0);

    let is_directory = object.get("dir").and_then(Value::as_bool).unwrap_or(false);

    if is_directory {
        let nodes = match object.get("nodes") {
            Some(Value::Array(children)) => children
                .iter()
                .map(decode_node)
                .collect::<Result<Vec<_>, _>>()?,
            Some(_) => {
                return Err(DecodeError::WrongType {
                    field: "nodes",
                    expected: "array",
                })
            }
            None => Vec::new(),
        };

        Ok(Node::Directory {
            key,
            nodes,
            expiration,
            ttl,
            modified_index,
            created_index,
        })
    } else {
        let value = opt_str(object, "value")?.unwrap_or_default();

        Ok(Node::Leaf {
            key,
            value,
            expiration,
            ttl,
            modified_index,
            created_index,
        })
    }
}

fn require_object<'a>(
    value: &'a Value,
    context: &'static str,
) -> Result<&'a Map<String, Value>, DecodeError> {
    value
        .as_object()
        .ok_or(DecodeError::NotAnObject { context })
}

fn require_str<'a>(object: &'a Map<String, Value>, field: &'static str) -> Result<&'a str, DecodeError> {
    match object.get(field) {
        Some(value) => value.as_str().ok_or(DecodeError::WrongType {
            field,
            expected: "string",
        }),
        None => Err(DecodeError::MissingField { field }),
    }
}

fn require_u64(object: &Map<String, Value>, field: &'static str) -> Result<u64, DecodeError> {
    match object.get(field) {
        Some(value) => value.as_u64().ok_or(DecodeError::WrongType {
            field,
            expected: "non-negative integer",
        }),
        None => Err(DecodeError::MissingField { field }),
    }
}

fn opt_str(object: &Map<String, Value>, field: &'static str) -> Result<Option<String>, DecodeError> {
    match object.get(field) {
        Some(value) => value
            .as_str()
            .map(|s| Some(s.to_string()))
            .ok_or(DecodeError::WrongType {
                field,
                expected: "string",
            }),
        None => Ok(None),
    }
}

fn opt_i64(object: &Map<String, Value>, field: &'static str) -> Result<Option<i64>, DecodeError> {
    match object.get(field) {
        Some(value) => value.as_i64().map(Some).ok_or(DecodeError::WrongType {
            field,
            expected: "integer",
        }),
        None => Ok(None),
    }
}
