//! Base64 payload block shared by the VTK XML codecs.
//!
//! A binary `DataArray` body is a single base64 string wrapping a `u64`
//! little-endian byte count followed by the raw array bytes.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::error::{CodecError, Result};

/// Wrap raw bytes in a length-prefixed base64 block.
pub(crate) fn encode_block(bytes: &[u8]) -> String {
    let mut block = Vec::with_capacity(8 + bytes.len());
    block.extend_from_slice(&(bytes.len() as u64).to_le_bytes());
    block.extend_from_slice(bytes);
    STANDARD.encode(block)
}

/// Decode a base64 block and strip its length header.
pub(crate) fn decode_block(format: &'static str, text: &str) -> Result<Vec<u8>> {
    let mut bytes = STANDARD.decode(text.trim())?;
    if bytes.len() < 8 {
        return Err(CodecError::invalid_payload(
            format,
            "data block shorter than its 8 byte length header",
        ));
    }
    let mut header = [0u8; 8];
    header.copy_from_slice(&bytes[..8]);
    let declared = u64::from_le_bytes(header);
    bytes.drain(..8);
    if declared != bytes.len() as u64 {
        return Err(CodecError::invalid_payload(
            format,
            format!(
                "length header declares {declared} bytes but block carries {}",
                bytes.len()
            ),
        ));
    }
    Ok(bytes)
}
