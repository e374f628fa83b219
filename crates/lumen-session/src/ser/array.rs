//! Serializer for raw typed arrays.
//!
//! Scalar geometry lives in the tree; the buffer itself is a raw blob
//! stored under the object's UUID. On read the payload must match the
//! declared geometry byte for byte before the buffer is adopted.

use lumen_data::{Array, Concrete, ElementType, Object};

use crate::context::{ReadCtx, WriteCtx};
use crate::error::{Result, SessionError};
use crate::helper::{cast_or_create, safe_cast};
use crate::registry::{Children, SerializerRegistry};
use crate::tree::{self, Node};

pub(super) fn register(registry: &mut SerializerRegistry) {
    registry.register(Array::CLASSNAME, write_array, read_array);
}

fn blob_name(node: &Node) -> Result<String> {
    Ok(format!("{}/array.raw", tree::node_uuid(node)?))
}

fn write_array(
    ctx: &mut WriteCtx<'_>,
    node: &mut Node,
    object: &Object,
    _children: &mut Children,
) -> Result<()> {
    let handle = safe_cast::<Array>(object)?;
    tree::write_version(node, Array::CLASSNAME, 1);
    let array = handle.read();
    tree::write_usizes(node, "Sizes", array.sizes());
    tree::write_string(node, "Type", array.element_type().name());
    tree::write_bool(node, "IsBufferOwner", array.is_buffer_owner);
    ctx.write_blob(&blob_name(node)?, array.buffer())?;
    Ok(())
}

fn read_array(
    ctx: &mut ReadCtx<'_>,
    node: &Node,
    _children: &Children,
    destination: Option<&Object>,
) -> Result<Object> {
    tree::read_version(node, Array::CLASSNAME, 1, 1)?;
    let handle = cast_or_create::<Array>(destination)?;
    let sizes = tree::read_usize_vec(node, "Sizes")?;
    let type_name = tree::read_string(node, "Type")?;
    let element_type = ElementType::from_name(&type_name)
        .ok_or_else(|| SessionError::malformed(format!("unknown element type '{type_name}'")))?;
    let is_buffer_owner = tree::read_bool_or(node, "IsBufferOwner", true)?;
    // The payload must satisfy the geometry before anything is allocated
    // from it; a hand-edited shape must not drive the buffer size.
    let expected = Array::checked_byte_len(&sizes, element_type)
        .ok_or_else(|| SessionError::malformed("array geometry overflows usize"))?;
    let bytes = ctx.read_blob(&blob_name(node)?)?;
    if bytes.len() != expected {
        return Err(SessionError::malformed(format!(
            "array payload is {} bytes, its geometry requires {expected}",
            bytes.len()
        )));
    }
    {
        let mut array = handle.write();
        array.resize(&sizes, element_type);
        array.buffer_mut().copy_from_slice(&bytes);
        array.is_buffer_owner = is_buffer_owner;
    }
    Ok(handle.into())
}
