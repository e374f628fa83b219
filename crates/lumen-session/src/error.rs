//! Error types for session persistence.

use thiserror::Error;

/// Errors that can occur while writing or reading a session archive.
#[derive(Debug, Error)]
pub enum SessionError {
    /// No serializer pair is registered for a classname.
    #[error("no serializer registered for '{classname}'")]
    UnregisteredType { classname: String },

    /// A serializer received an object of a different concrete type.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },

    /// A required child object is absent from a node.
    #[error("missing child '{key}'")]
    MissingChild { key: String },

    /// A required scalar field is absent from a node.
    #[error("missing field '{key}'")]
    MissingField { key: String },

    /// A node does not follow the tree schema.
    #[error("malformed node: {reason}")]
    MalformedNode { reason: String },

    /// A node's version lies outside the range a deserializer accepts.
    #[error("unsupported {classname} version {found}, supported range is [{min}, {max}]")]
    UnsupportedVersion {
        classname: &'static str,
        found: i64,
        min: i64,
        max: i64,
    },

    /// The archive was written by a newer library.
    #[error("unsupported session format version {found}, newest supported is {max_supported}")]
    UnsupportedFormat { found: u64, max_supported: u64 },

    /// The object graph contains a reference cycle.
    #[error("circular reference through object {uuid}")]
    CircularReference { uuid: String },

    /// An enum field carries an integer with no mapping.
    #[error("unknown value {value} for '{field}'")]
    UnknownEnumValue { field: &'static str, value: i64 },

    /// Archive layer error.
    #[error("archive error: {0}")]
    Archive(#[from] lumen_zip::ArchiveError),

    /// Payload codec error.
    #[error("codec error: {0}")]
    Codec(#[from] lumen_codec::CodecError),

    /// Structured tree (de)serialization error.
    #[error("tree error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;

impl SessionError {
    /// Create an UnregisteredType error.
    pub fn unregistered(classname: impl Into<String>) -> Self {
        Self::UnregisteredType {
            classname: classname.into(),
        }
    }

    /// Create a TypeMismatch error.
    pub fn type_mismatch(expected: &'static str, actual: &'static str) -> Self {
        Self::TypeMismatch { expected, actual }
    }

    /// Create a MissingChild error.
    pub fn missing_child(key: impl Into<String>) -> Self {
        Self::MissingChild { key: key.into() }
    }

    /// Create a MissingField error.
    pub fn missing_field(key: impl Into<String>) -> Self {
        Self::MissingField { key: key.into() }
    }

    /// Create a MalformedNode error.
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedNode {
            reason: reason.into(),
        }
    }

    /// Create an UnsupportedVersion error.
    pub fn unsupported_version(classname: &'static str, found: i64, min: i64, max: i64) -> Self {
        Self::UnsupportedVersion {
            classname,
            found,
            min,
            max,
        }
    }

    /// Create an UnknownEnumValue error.
    pub fn unknown_enum(field: &'static str, value: i64) -> Self {
        Self::UnknownEnumValue { field, value }
    }

    /// Create a CircularReference error.
    pub fn circular_reference(uuid: impl Into<String>) -> Self {
        Self::CircularReference { uuid: uuid.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_errors_name_the_range() {
        let error = SessionError::unsupported_version("activity", 7, 1, 2);
        assert_eq!(
            error.to_string(),
            "unsupported activity version 7, supported range is [1, 2]"
        );
    }

    #[test]
    fn missing_child_names_the_key() {
        assert_eq!(
            SessionError::missing_child("Material").to_string(),
            "missing child 'Material'"
        );
    }
}
