//! VTK XML `ImageData` codec for image voxel buffers.
//!
//! Encodes an image as a single-piece `.vti` document whose scalar
//! array is one length-prefixed base64 block. Extent, origin, spacing
//! and direction are written for interoperability with VTK viewers; on
//! decode the destination image must already carry the final geometry,
//! and a document that disagrees with it is rejected.

use lumen_data::{ElementType, Image};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::error::{CodecError, Result};
use crate::{payload, vtk};

const FORMAT: &str = "vti";
const SCALARS_NAME: &str = "ImageScalars";

/// Encode the voxel buffer of `image` as a `.vti` document.
pub fn encode(image: &Image) -> Result<Vec<u8>> {
    let mut xml = Writer::new_with_indent(Vec::new(), b' ', 2);
    xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut root = BytesStart::new("VTKFile");
    root.push_attribute(("type", "ImageData"));
    root.push_attribute(("version", "1.0"));
    root.push_attribute(("byte_order", "LittleEndian"));
    root.push_attribute(("header_type", "UInt64"));
    xml.write_event(Event::Start(root))?;

    let extent = extent_string(image.size());
    let origin = vtk::join_numbers(&image.origin);
    let spacing = vtk::join_numbers(&image.spacing);
    let direction = vtk::join_numbers(&image.orientation);
    let mut grid = BytesStart::new("ImageData");
    grid.push_attribute(("WholeExtent", extent.as_str()));
    grid.push_attribute(("Origin", origin.as_str()));
    grid.push_attribute(("Spacing", spacing.as_str()));
    grid.push_attribute(("Direction", direction.as_str()));
    xml.write_event(Event::Start(grid))?;

    let mut piece = BytesStart::new("Piece");
    piece.push_attribute(("Extent", extent.as_str()));
    xml.write_event(Event::Start(piece))?;

    let mut point_data = BytesStart::new("PointData");
    point_data.push_attribute(("Scalars", SCALARS_NAME));
    xml.write_event(Event::Start(point_data))?;

    let components = image.pixel_format().num_components().to_string();
    let mut scalars = BytesStart::new("DataArray");
    scalars.push_attribute(("type", vtk::vtk_type_name(image.pixel_type())));
    scalars.push_attribute(("Name", SCALARS_NAME));
    scalars.push_attribute(("NumberOfComponents", components.as_str()));
    scalars.push_attribute(("format", "binary"));
    xml.write_event(Event::Start(scalars))?;
    let block = payload::encode_block(image.buffer());
    xml.write_event(Event::Text(BytesText::new(&block)))?;
    xml.write_event(Event::End(BytesEnd::new("DataArray")))?;

    xml.write_event(Event::End(BytesEnd::new("PointData")))?;
    xml.write_event(Event::Empty(BytesStart::new("CellData")))?;
    xml.write_event(Event::End(BytesEnd::new("Piece")))?;
    xml.write_event(Event::End(BytesEnd::new("ImageData")))?;
    xml.write_event(Event::End(BytesEnd::new("VTKFile")))?;
    Ok(xml.into_inner())
}

struct Scalars {
    element_type: ElementType,
    components: usize,
    block: String,
}

/// Decode a `.vti` document into a pre-sized image.
///
/// `image` must already have the size, pixel type and pixel format the
/// document was written with; the call fails with
/// [`CodecError::GeometryMismatch`] otherwise and the buffer is only
/// touched on success.
pub fn decode(bytes: &[u8], image: &mut Image) -> Result<()> {
    let mut reader = Reader::from_reader(bytes);
    let mut buf = Vec::new();
    let mut whole_extent = None;
    let mut scalars: Option<Scalars> = None;
    let mut in_scalars = false;
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(tag) | Event::Empty(tag) => match tag.name().as_ref() {
                b"ImageData" => {
                    whole_extent = vtk::attribute(FORMAT, &tag, "WholeExtent")?;
                }
                b"DataArray" => {
                    if vtk::attribute(FORMAT, &tag, "Name")?.as_deref() == Some(SCALARS_NAME) {
                        scalars = Some(scalar_header(&tag)?);
                        in_scalars = true;
                    }
                }
                _ => {}
            },
            Event::Text(text) if in_scalars => {
                if let Some(scalars) = scalars.as_mut() {
                    scalars.block.push_str(vtk::decode_text(FORMAT, &text)?.trim());
                }
            }
            Event::End(tag) if tag.name().as_ref() == b"DataArray" => in_scalars = false,
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    let extent = whole_extent
        .ok_or_else(|| CodecError::invalid_payload(FORMAT, "missing WholeExtent"))?;
    check_extent(&extent, image.size())?;
    let scalars =
        scalars.ok_or_else(|| CodecError::invalid_payload(FORMAT, "missing ImageScalars array"))?;
    if scalars.element_type != image.pixel_type() {
        return Err(CodecError::geometry_mismatch(format!(
            "scalar type {} where the destination holds {}",
            vtk::vtk_type_name(scalars.element_type),
            vtk::vtk_type_name(image.pixel_type()),
        )));
    }
    if scalars.components != image.pixel_format().num_components() {
        return Err(CodecError::geometry_mismatch(format!(
            "{} components per voxel where the destination holds {}",
            scalars.components,
            image.pixel_format().num_components(),
        )));
    }
    let voxels = payload::decode_block(FORMAT, &scalars.block)?;
    if voxels.len() != image.byte_len() {
        return Err(CodecError::geometry_mismatch(format!(
            "{} payload bytes for a {} byte image",
            voxels.len(),
            image.byte_len(),
        )));
    }
    image.buffer_mut().copy_from_slice(&voxels);
    Ok(())
}

fn scalar_header(tag: &BytesStart<'_>) -> Result<Scalars> {
    let type_name = vtk::attribute(FORMAT, tag, "type")?
        .ok_or_else(|| CodecError::invalid_payload(FORMAT, "scalar array without a type"))?;
    let element_type = vtk::element_type_from_vtk(&type_name).ok_or_else(|| {
        CodecError::invalid_payload(FORMAT, format!("unsupported scalar type {type_name}"))
    })?;
    let components = vtk::attribute(FORMAT, tag, "NumberOfComponents")?
        .map(|raw| {
            raw.parse::<usize>()
                .map_err(|_| CodecError::invalid_payload(FORMAT, "bad NumberOfComponents"))
        })
        .transpose()?
        .unwrap_or(1);
    Ok(Scalars {
        element_type,
        components,
        block: String::new(),
    })
}

/// Inclusive VTK extent for a grid size, `0 nx-1 0 ny-1 0 nz-1`.
fn extent_string(size: [usize; 3]) -> String {
    let bounds: Vec<i64> = size.iter().flat_map(|&n| [0, n as i64 - 1]).collect();
    vtk::join_numbers(&bounds)
}

fn check_extent(extent: &str, size: [usize; 3]) -> Result<()> {
    let bounds = vtk::parse_integers(FORMAT, extent)?;
    if bounds.len() != 6 {
        return Err(CodecError::invalid_payload(
            FORMAT,
            format!("extent '{extent}' must have six bounds"),
        ));
    }
    let dims = [
        bounds[1] - bounds[0] + 1,
        bounds[3] - bounds[2] + 1,
        bounds[5] - bounds[4] + 1,
    ];
    if dims != [size[0] as i64, size[1] as i64, size[2] as i64] {
        return Err(CodecError::geometry_mismatch(format!(
            "extent '{extent}' does not match destination size {size:?}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use lumen_data::PixelFormat;

    use super::*;

    fn sample_image() -> Image {
        let mut image = Image::default();
        image.resize([4, 4, 2], ElementType::Uint8, PixelFormat::GrayScale);
        for (i, voxel) in image.buffer_mut().iter_mut().enumerate() {
            *voxel = i as u8;
        }
        image.origin = [1.0, 2.0, 3.0];
        image.spacing = [0.5, 0.5, 2.0];
        image
    }

    #[test]
    fn round_trips_voxels() {
        let image = sample_image();
        let doc = encode(&image).unwrap();
        let mut restored = Image::default();
        restored.resize([4, 4, 2], ElementType::Uint8, PixelFormat::GrayScale);
        decode(&doc, &mut restored).unwrap();
        assert_eq!(restored.buffer(), image.buffer());
    }

    #[test]
    fn document_declares_grid_metadata() {
        let doc = encode(&sample_image()).unwrap();
        let text = String::from_utf8(doc).unwrap();
        assert!(text.contains("WholeExtent=\"0 3 0 3 0 1\""));
        assert!(text.contains("Origin=\"1 2 3\""));
        assert!(text.contains("Spacing=\"0.5 0.5 2\""));
        assert!(text.contains("type=\"UInt8\""));
    }

    #[test]
    fn rejects_size_mismatch() {
        let doc = encode(&sample_image()).unwrap();
        let mut restored = Image::default();
        restored.resize([2, 2, 2], ElementType::Uint8, PixelFormat::GrayScale);
        assert!(matches!(
            decode(&doc, &mut restored),
            Err(CodecError::GeometryMismatch { .. })
        ));
    }

    #[test]
    fn rejects_pixel_type_mismatch() {
        let doc = encode(&sample_image()).unwrap();
        let mut restored = Image::default();
        restored.resize([4, 4, 2], ElementType::Uint16, PixelFormat::GrayScale);
        assert!(matches!(
            decode(&doc, &mut restored),
            Err(CodecError::GeometryMismatch { .. })
        ));
    }

    #[test]
    fn rejects_garbage() {
        let mut image = sample_image();
        assert!(decode(b"not xml at all", &mut image).is_err());
    }
}
