//! Bare DICOM dataset codec, explicit VR little endian.
//!
//! Encodes a [`Dataset`] as a plain element stream with no preamble,
//! no `DICM` magic and no file meta group. Each element is
//! `group u16 | element u16 | VR code | length | value`, where long
//! VRs carry two reserved bytes and a 32-bit length and short VRs a
//! 16-bit length. Odd-length values are padded to even length with the
//! VR's padding byte; the padding is stripped again on decode for text
//! VRs, so values that deliberately end in a pad character do not
//! survive unchanged.

use lumen_data::dicom::{Dataset, Element, Tag, Vr};

use crate::error::{CodecError, Result};

const FORMAT: &str = "dcm";

/// Encode a dataset as an explicit VR little endian element stream.
pub fn encode(dataset: &Dataset) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    for (tag, element) in dataset.iter() {
        let padded_len = element.value.len() + (element.value.len() & 1);
        out.extend_from_slice(&tag.group.to_le_bytes());
        out.extend_from_slice(&tag.element.to_le_bytes());
        out.extend_from_slice(&element.vr.code());
        if element.vr.is_long() {
            let len = u32::try_from(padded_len).map_err(|_| {
                CodecError::invalid_payload(FORMAT, format!("value of {tag} exceeds 32-bit length"))
            })?;
            out.extend_from_slice(&[0, 0]);
            out.extend_from_slice(&len.to_le_bytes());
        } else {
            let len = u16::try_from(padded_len).map_err(|_| {
                CodecError::invalid_payload(
                    FORMAT,
                    format!("value of {tag} exceeds the 16-bit short form length"),
                )
            })?;
            out.extend_from_slice(&len.to_le_bytes());
        }
        out.extend_from_slice(&element.value);
        if element.value.len() % 2 == 1 {
            out.push(element.vr.padding());
        }
    }
    Ok(out)
}

/// Decode an explicit VR little endian element stream.
pub fn decode(bytes: &[u8]) -> Result<Dataset> {
    let mut dataset = Dataset::default();
    let mut offset = 0usize;
    while offset < bytes.len() {
        let (tag, vr, rest) = decode_header(bytes, offset)?;
        let len = if vr.is_long() {
            let reserved = read_exact(bytes, rest, 2, tag)?;
            if reserved != [0, 0] {
                return Err(CodecError::invalid_payload(
                    FORMAT,
                    format!("nonzero reserved bytes after VR of {tag}"),
                ));
            }
            let raw = read_exact(bytes, rest + 2, 4, tag)?;
            offset = rest + 6;
            u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]) as usize
        } else {
            let raw = read_exact(bytes, rest, 2, tag)?;
            offset = rest + 2;
            u16::from_le_bytes([raw[0], raw[1]]) as usize
        };
        let value = read_exact(bytes, offset, len, tag)?;
        offset += len;
        let mut value = value.to_vec();
        if is_text(vr) && value.last() == Some(&vr.padding()) {
            value.pop();
        }
        dataset.set(tag, Element::new(vr, value));
    }
    Ok(dataset)
}

fn decode_header(bytes: &[u8], offset: usize) -> Result<(Tag, Vr, usize)> {
    if bytes.len() - offset < 6 {
        return Err(CodecError::invalid_payload(
            FORMAT,
            format!("truncated element header at offset {offset}"),
        ));
    }
    let group = u16::from_le_bytes([bytes[offset], bytes[offset + 1]]);
    let element = u16::from_le_bytes([bytes[offset + 2], bytes[offset + 3]]);
    let tag = Tag::new(group, element);
    let code = [bytes[offset + 4], bytes[offset + 5]];
    let vr = Vr::from_code(code).ok_or_else(|| {
        CodecError::invalid_payload(
            FORMAT,
            format!(
                "unknown VR {:?} for {tag}",
                String::from_utf8_lossy(&code)
            ),
        )
    })?;
    Ok((tag, vr, offset + 6))
}

fn read_exact(bytes: &[u8], offset: usize, len: usize, tag: Tag) -> Result<&[u8]> {
    bytes.get(offset..offset + len).ok_or_else(|| {
        CodecError::invalid_payload(FORMAT, format!("truncated value of {tag} at offset {offset}"))
    })
}

/// VRs whose trailing padding byte is insignificant.
fn is_text(vr: Vr) -> bool {
    vr == Vr::Ui || vr.padding() == b' '
}

#[cfg(test)]
mod tests {
    use lumen_data::dicom::tags;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn round_trips_text_elements() {
        let mut dataset = Dataset::default();
        dataset.set_string(tags::PATIENT_NAME, Vr::Pn, "Doe^John");
        dataset.set_string(tags::MODALITY, Vr::Cs, "CT");
        dataset.set_string(tags::SERIES_INSTANCE_UID, Vr::Ui, "1.2.840.1");
        let encoded = encode(&dataset).unwrap();
        assert_eq!(decode(&encoded).unwrap(), dataset);
    }

    #[test]
    fn pads_odd_values_to_even_length() {
        let mut dataset = Dataset::default();
        dataset.set_string(tags::PATIENT_SEX, Vr::Cs, "F");
        let encoded = encode(&dataset).unwrap();
        // 4 tag + 2 VR + 2 length + 2 padded value bytes.
        assert_eq!(encoded.len(), 10);
        assert_eq!(&encoded[8..], b"F ");
        assert_eq!(decode(&encoded).unwrap().string(tags::PATIENT_SEX).unwrap(), "F");
    }

    #[test]
    fn long_form_carries_reserved_bytes_and_u32_length() {
        let mut dataset = Dataset::default();
        dataset.set(Tag::new(0x7FE0, 0x0010), Element::new(Vr::Ob, vec![1, 2, 3, 4]));
        let encoded = encode(&dataset).unwrap();
        assert_eq!(encoded.len(), 4 + 2 + 2 + 4 + 4);
        assert_eq!(&encoded[6..8], &[0, 0]);
        assert_eq!(&encoded[8..12], &4u32.to_le_bytes());
        assert_eq!(decode(&encoded).unwrap(), dataset);
    }

    #[test]
    fn rejects_unknown_vr() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&0x0008u16.to_le_bytes());
        bytes.extend_from_slice(&0x0060u16.to_le_bytes());
        bytes.extend_from_slice(b"ZZ");
        bytes.extend_from_slice(&0u16.to_le_bytes());
        assert!(matches!(
            decode(&bytes),
            Err(CodecError::InvalidPayload { .. })
        ));
    }

    #[test]
    fn rejects_truncated_value() {
        let mut dataset = Dataset::default();
        dataset.set_string(tags::PATIENT_ID, Vr::Lo, "ABCD");
        let encoded = encode(&dataset).unwrap();
        assert!(decode(&encoded[..encoded.len() - 1]).is_err());
    }

    proptest! {
        #[test]
        fn round_trips_arbitrary_text_datasets(
            values in proptest::collection::btree_map(
                (0x0008u16..0x0030, 0x0001u16..0x0100),
                "[A-Za-z0-9^.]{0,24}",
                0..8,
            )
        ) {
            let mut dataset = Dataset::default();
            for ((group, element), text) in &values {
                dataset.set_string(Tag::new(*group, *element), Vr::Lo, text);
            }
            let encoded = encode(&dataset).unwrap();
            prop_assert_eq!(decode(&encoded).unwrap(), dataset);
        }

        #[test]
        fn round_trips_arbitrary_binary_elements(
            payload in proptest::collection::vec(any::<u8>(), 0..256)
        ) {
            let mut even = payload;
            even.truncate(even.len() & !1);
            let mut dataset = Dataset::default();
            dataset.set(Tag::new(0x7FE0, 0x0010), Element::new(Vr::Ob, even));
            let encoded = encode(&dataset).unwrap();
            prop_assert_eq!(decode(&encoded).unwrap(), dataset);
        }
    }
}
