//! Typed accessors over the JSON body of a session tree node.
//!
//! A node body is the object keyed under the classname in the archived
//! tree. Scalars live at its top level; `read_*` accessors fail with
//! [`SessionError::MissingField`] when a required key is absent and
//! with [`SessionError::MalformedNode`] when a present value has the
//! wrong shape. `read_*_or` variants default on absence but still
//! reject wrongly-shaped values.

use serde_json::{Map, Value};

use crate::error::{Result, SessionError};

/// One node body, insertion-ordered.
pub type Node = Map<String, Value>;

/// Key of the per-type version stamp.
pub fn version_key(classname: &str) -> String {
    format!("{classname}.Version")
}

/// Stamps the node with the serializer's format version.
pub fn write_version(node: &mut Node, classname: &str, version: i64) {
    node.insert(version_key(classname), Value::from(version));
}

/// Reads the version stamp and gates it against `[min, max]`.
///
/// A node without a stamp reads as version −1, the value pre-versioning
/// archives effectively carry; whether −1 is acceptable is the range's
/// decision.
pub fn read_version(node: &Node, classname: &'static str, min: i64, max: i64) -> Result<i64> {
    let key = version_key(classname);
    let version = match node.get(&key) {
        None => -1,
        Some(value) => value
            .as_i64()
            .ok_or_else(|| SessionError::malformed(format!("'{key}' is not an integer")))?,
    };
    if version < min || version > max {
        return Err(SessionError::unsupported_version(classname, version, min, max));
    }
    Ok(version)
}

/// The `uuid` every node body carries first.
pub fn node_uuid(node: &Node) -> Result<&str> {
    node.get("uuid")
        .and_then(Value::as_str)
        .ok_or_else(|| SessionError::malformed("node without a uuid"))
}

pub fn write_string(node: &mut Node, key: &str, value: &str) {
    node.insert(key.to_owned(), Value::from(value));
}

pub fn read_string(node: &Node, key: &str) -> Result<String> {
    match node.get(key) {
        None => Err(SessionError::missing_field(key)),
        Some(value) => as_string(key, value),
    }
}

pub fn read_string_or(node: &Node, key: &str, default: &str) -> Result<String> {
    match node.get(key) {
        None => Ok(default.to_owned()),
        Some(value) => as_string(key, value),
    }
}

pub fn write_i64(node: &mut Node, key: &str, value: i64) {
    node.insert(key.to_owned(), Value::from(value));
}

pub fn read_i64(node: &Node, key: &str) -> Result<i64> {
    match node.get(key) {
        None => Err(SessionError::missing_field(key)),
        Some(value) => as_i64(key, value),
    }
}

pub fn read_i64_or(node: &Node, key: &str, default: i64) -> Result<i64> {
    match node.get(key) {
        None => Ok(default),
        Some(value) => as_i64(key, value),
    }
}

pub fn write_u64(node: &mut Node, key: &str, value: u64) {
    node.insert(key.to_owned(), Value::from(value));
}

pub fn read_usize(node: &Node, key: &str) -> Result<usize> {
    match node.get(key) {
        None => Err(SessionError::missing_field(key)),
        Some(value) => as_usize(key, value),
    }
}

pub fn read_usize_or(node: &Node, key: &str, default: usize) -> Result<usize> {
    match node.get(key) {
        None => Ok(default),
        Some(value) => as_usize(key, value),
    }
}

/// Non-finite values are not representable in JSON and are stored as
/// `null`; reading one back is a malformed-node error.
pub fn write_f64(node: &mut Node, key: &str, value: f64) {
    node.insert(key.to_owned(), Value::from(value));
}

pub fn read_f64(node: &Node, key: &str) -> Result<f64> {
    match node.get(key) {
        None => Err(SessionError::missing_field(key)),
        Some(value) => as_f64(key, value),
    }
}

pub fn read_f64_or(node: &Node, key: &str, default: f64) -> Result<f64> {
    match node.get(key) {
        None => Ok(default),
        Some(value) => as_f64(key, value),
    }
}

pub fn write_bool(node: &mut Node, key: &str, value: bool) {
    node.insert(key.to_owned(), Value::from(value));
}

pub fn read_bool(node: &Node, key: &str) -> Result<bool> {
    match node.get(key) {
        None => Err(SessionError::missing_field(key)),
        Some(value) => as_bool(key, value),
    }
}

pub fn read_bool_or(node: &Node, key: &str, default: bool) -> Result<bool> {
    match node.get(key) {
        None => Ok(default),
        Some(value) => as_bool(key, value),
    }
}

pub fn write_f64s(node: &mut Node, key: &str, values: &[f64]) {
    let items = values.iter().map(|&v| Value::from(v)).collect();
    node.insert(key.to_owned(), Value::Array(items));
}

pub fn read_f64_vec(node: &Node, key: &str) -> Result<Vec<f64>> {
    match node.get(key) {
        None => Err(SessionError::missing_field(key)),
        Some(value) => as_f64_vec(key, value),
    }
}

/// Missing key reads as an empty sequence.
pub fn read_f64_vec_or(node: &Node, key: &str) -> Result<Vec<f64>> {
    match node.get(key) {
        None => Ok(Vec::new()),
        Some(value) => as_f64_vec(key, value),
    }
}

pub fn read_f64_array<const N: usize>(node: &Node, key: &str) -> Result<[f64; N]> {
    let values = read_f64_vec(node, key)?;
    let len = values.len();
    values
        .try_into()
        .map_err(|_| SessionError::malformed(format!("'{key}' has {len} elements, expected {N}")))
}

pub fn write_i64s(node: &mut Node, key: &str, values: &[i64]) {
    let items = values.iter().map(|&v| Value::from(v)).collect();
    node.insert(key.to_owned(), Value::Array(items));
}

pub fn read_i64_vec(node: &Node, key: &str) -> Result<Vec<i64>> {
    match node.get(key) {
        None => Err(SessionError::missing_field(key)),
        Some(value) => {
            let items = value
                .as_array()
                .ok_or_else(|| SessionError::malformed(format!("'{key}' is not an array")))?;
            items.iter().map(|item| as_i64(key, item)).collect()
        }
    }
}

pub fn read_i64_array<const N: usize>(node: &Node, key: &str) -> Result<[i64; N]> {
    let values = read_i64_vec(node, key)?;
    let len = values.len();
    values
        .try_into()
        .map_err(|_| SessionError::malformed(format!("'{key}' has {len} elements, expected {N}")))
}

pub fn write_usizes(node: &mut Node, key: &str, values: &[usize]) {
    let items = values.iter().map(|&v| Value::from(v as u64)).collect();
    node.insert(key.to_owned(), Value::Array(items));
}

pub fn read_usize_vec(node: &Node, key: &str) -> Result<Vec<usize>> {
    match node.get(key) {
        None => Err(SessionError::missing_field(key)),
        Some(value) => {
            let items = value
                .as_array()
                .ok_or_else(|| SessionError::malformed(format!("'{key}' is not an array")))?;
            items.iter().map(|item| as_usize(key, item)).collect()
        }
    }
}

pub fn read_usize_array<const N: usize>(node: &Node, key: &str) -> Result<[usize; N]> {
    let values = read_usize_vec(node, key)?;
    let len = values.len();
    values
        .try_into()
        .map_err(|_| SessionError::malformed(format!("'{key}' has {len} elements, expected {N}")))
}

fn as_string(key: &str, value: &Value) -> Result<String> {
    value
        .as_str()
        .map(str::to_owned)
        .ok_or_else(|| SessionError::malformed(format!("'{key}' is not a string")))
}

fn as_i64(key: &str, value: &Value) -> Result<i64> {
    value
        .as_i64()
        .ok_or_else(|| SessionError::malformed(format!("'{key}' is not an integer")))
}

fn as_usize(key: &str, value: &Value) -> Result<usize> {
    let raw = value
        .as_u64()
        .ok_or_else(|| SessionError::malformed(format!("'{key}' is not an unsigned integer")))?;
    usize::try_from(raw)
        .map_err(|_| SessionError::malformed(format!("'{key}' does not fit in usize")))
}

fn as_f64(key: &str, value: &Value) -> Result<f64> {
    value
        .as_f64()
        .ok_or_else(|| SessionError::malformed(format!("'{key}' is not a number")))
}

fn as_bool(key: &str, value: &Value) -> Result<bool> {
    value
        .as_bool()
        .ok_or_else(|| SessionError::malformed(format!("'{key}' is not a boolean")))
}

fn as_f64_vec(key: &str, value: &Value) -> Result<Vec<f64>> {
    let items = value
        .as_array()
        .ok_or_else(|| SessionError::malformed(format!("'{key}' is not an array")))?;
    items.iter().map(|item| as_f64(key, item)).collect()
}
