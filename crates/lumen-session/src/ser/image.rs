//! Serializer for voxel images.
//!
//! Grid geometry and windowing are tree scalars; the voxel payload is a
//! VTI document stored next to them. An image whose pixel format is
//! `Undefined` is empty and carries no payload at all. The body is split
//! out so the image-series serializer can embed an image under its own
//! UUID.

use lumen_codec::vti;
use lumen_data::{Concrete, ElementType, Image, Object, PixelFormat};

use crate::context::{ReadCtx, WriteCtx};
use crate::error::{Result, SessionError};
use crate::helper::{cast_or_create, enum_from_int, safe_cast};
use crate::registry::{Children, SerializerRegistry};
use crate::tree::{self, Node};

pub(super) fn register(registry: &mut SerializerRegistry) {
    registry.register(Image::CLASSNAME, write_image, read_image);
}

pub(super) fn write_image_body(
    ctx: &mut WriteCtx<'_>,
    node: &mut Node,
    uuid: &str,
    image: &Image,
) -> Result<()> {
    tree::write_usizes(node, "Size", &image.size());
    tree::write_f64s(node, "Spacing", &image.spacing);
    tree::write_f64s(node, "Origin", &image.origin);
    tree::write_f64s(node, "Direction", &image.orientation);
    tree::write_string(node, "PixelType", image.pixel_type().name());
    tree::write_i64(node, "PixelFormat", image.pixel_format().as_int());
    tree::write_f64s(node, "WindowCenters", &image.window_centers);
    tree::write_f64s(node, "WindowWidths", &image.window_widths);
    if image.pixel_format() != PixelFormat::Undefined {
        let document = vti::encode(image)?;
        ctx.write_blob(&format!("{uuid}/image.vti"), &document)?;
    }
    Ok(())
}

pub(super) fn read_image_body(
    ctx: &mut ReadCtx<'_>,
    node: &Node,
    uuid: &str,
    image: &mut Image,
) -> Result<()> {
    let size = tree::read_usize_array::<3>(node, "Size")?;
    let type_name = tree::read_string(node, "PixelType")?;
    let pixel_type = ElementType::from_name(&type_name)
        .ok_or_else(|| SessionError::malformed(format!("unknown element type '{type_name}'")))?;
    let pixel_format = enum_from_int(
        "PixelFormat",
        tree::read_i64(node, "PixelFormat")?,
        PixelFormat::from_int,
    )?;
    // The declared grid must be satisfiable by the stored payload before
    // the voxel buffer is allocated from it. Base64 text can only shrink
    // when decoded, so a document shorter than the geometry requires
    // cannot carry it.
    let expected = Image::checked_byte_len(size, pixel_type, pixel_format)
        .ok_or_else(|| SessionError::malformed("image geometry overflows usize"))?;
    let document = if pixel_format == PixelFormat::Undefined {
        None
    } else {
        let document = ctx.read_blob(&format!("{uuid}/image.vti"))?;
        if document.len() < expected {
            return Err(SessionError::malformed(format!(
                "image payload is {} bytes, its geometry requires {expected}",
                document.len()
            )));
        }
        Some(document)
    };
    image.resize(size, pixel_type, pixel_format);
    image.spacing = tree::read_f64_array::<3>(node, "Spacing")?;
    image.origin = tree::read_f64_array::<3>(node, "Origin")?;
    image.orientation = tree::read_f64_array::<9>(node, "Direction")?;
    image.window_centers = tree::read_f64_vec_or(node, "WindowCenters")?;
    image.window_widths = tree::read_f64_vec_or(node, "WindowWidths")?;
    if let Some(document) = document {
        vti::decode(&document, image)?;
    }
    Ok(())
}

fn write_image(
    ctx: &mut WriteCtx<'_>,
    node: &mut Node,
    object: &Object,
    _children: &mut Children,
) -> Result<()> {
    let handle = safe_cast::<Image>(object)?;
    tree::write_version(node, Image::CLASSNAME, 1);
    let uuid = tree::node_uuid(node)?.to_owned();
    write_image_body(ctx, node, &uuid, &handle.read())
}

fn read_image(
    ctx: &mut ReadCtx<'_>,
    node: &Node,
    _children: &Children,
    destination: Option<&Object>,
) -> Result<Object> {
    tree::read_version(node, Image::CLASSNAME, 1, 1)?;
    let handle = cast_or_create::<Image>(destination)?;
    let uuid = tree::node_uuid(node)?.to_owned();
    read_image_body(ctx, node, &uuid, &mut handle.write())?;
    Ok(handle.into())
}
