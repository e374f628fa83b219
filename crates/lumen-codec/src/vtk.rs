//! Helpers shared by the VTK XML codecs.

use lumen_data::ElementType;
use quick_xml::events::BytesStart;

use crate::error::{CodecError, Result};

/// VTK `DataArray` type name for an element type.
pub(crate) fn vtk_type_name(element_type: ElementType) -> &'static str {
    match element_type {
        ElementType::Int8 => "Int8",
        ElementType::Uint8 => "UInt8",
        ElementType::Int16 => "Int16",
        ElementType::Uint16 => "UInt16",
        ElementType::Int32 => "Int32",
        ElementType::Uint32 => "UInt32",
        ElementType::Int64 => "Int64",
        ElementType::Uint64 => "UInt64",
        ElementType::Float => "Float32",
        ElementType::Double => "Float64",
    }
}

pub(crate) fn element_type_from_vtk(name: &str) -> Option<ElementType> {
    match name {
        "Int8" => Some(ElementType::Int8),
        "UInt8" => Some(ElementType::Uint8),
        "Int16" => Some(ElementType::Int16),
        "UInt16" => Some(ElementType::Uint16),
        "Int32" => Some(ElementType::Int32),
        "UInt32" => Some(ElementType::Uint32),
        "Int64" => Some(ElementType::Int64),
        "UInt64" => Some(ElementType::Uint64),
        "Float32" => Some(ElementType::Float),
        "Float64" => Some(ElementType::Double),
        _ => None,
    }
}

/// Space-separated rendering used for extent, origin and direction
/// attributes.
pub(crate) fn join_numbers<T: ToString>(values: &[T]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

pub(crate) fn parse_integers(format: &'static str, text: &str) -> Result<Vec<i64>> {
    text.split_whitespace()
        .map(|token| {
            token
                .parse()
                .map_err(|_| CodecError::invalid_payload(format, format!("bad integer '{token}'")))
        })
        .collect()
}

/// Looks up one attribute of an element start tag by name.
pub(crate) fn attribute(
    format: &'static str,
    tag: &BytesStart<'_>,
    name: &str,
) -> Result<Option<String>> {
    for attribute in tag.attributes() {
        let attribute = attribute?;
        if attribute.key.as_ref() == name.as_bytes() {
            return decode_text(format, &attribute.value).map(Some);
        }
    }
    Ok(None)
}

pub(crate) fn decode_text(format: &'static str, raw: &[u8]) -> Result<String> {
    std::str::from_utf8(raw)
        .map(str::to_owned)
        .map_err(|_| CodecError::invalid_payload(format, "non-UTF-8 text"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_names_round_trip() {
        for element_type in [
            ElementType::Int8,
            ElementType::Uint8,
            ElementType::Int16,
            ElementType::Uint16,
            ElementType::Int32,
            ElementType::Uint32,
            ElementType::Int64,
            ElementType::Uint64,
            ElementType::Float,
            ElementType::Double,
        ] {
            assert_eq!(
                element_type_from_vtk(vtk_type_name(element_type)),
                Some(element_type)
            );
        }
        assert_eq!(element_type_from_vtk("Float16"), None);
    }

    #[test]
    fn parses_whitespace_separated_integers() {
        assert_eq!(
            parse_integers("vti", "0 15 0 7 0 0").unwrap(),
            [0, 15, 0, 7, 0, 0]
        );
        assert!(parse_integers("vti", "0 x").is_err());
    }
}
