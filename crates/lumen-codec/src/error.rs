//! Error types for payload codec operations.

use thiserror::Error;

/// Errors that can occur when encoding or decoding binary payloads.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Payload bytes do not form a valid document of the expected format.
    #[error("invalid {format} payload: {reason}")]
    InvalidPayload {
        format: &'static str,
        reason: String,
    },

    /// Payload geometry disagrees with the pre-sized destination object.
    #[error("payload geometry mismatch: {reason}")]
    GeometryMismatch { reason: String },

    /// XML parsing error.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// I/O error while emitting a document.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// XML attribute parsing error.
    #[error("XML attribute error: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),

    /// Base64 decoding error.
    #[error("base64 error: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// Result type alias for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;

impl CodecError {
    /// Create an InvalidPayload error.
    pub fn invalid_payload(format: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidPayload {
            format,
            reason: reason.into(),
        }
    }

    /// Create a GeometryMismatch error.
    pub fn geometry_mismatch(reason: impl Into<String>) -> Self {
        Self::GeometryMismatch {
            reason: reason.into(),
        }
    }
}
