//! Serializer for triangle meshes.
//!
//! Counts and the attribute mask are tree scalars; geometry and layers
//! travel as a VTP document. On read the mesh is resized to the declared
//! counts and attributes before the document is decoded into it, so a
//! payload that disagrees with the node is rejected by the codec.

use lumen_codec::vtp;
use lumen_data::{Concrete, Mesh, MeshAttributes, Object};

use crate::context::{ReadCtx, WriteCtx};
use crate::error::{Result, SessionError};
use crate::helper::{cast_or_create, safe_cast};
use crate::registry::{Children, SerializerRegistry};
use crate::tree::{self, Node};

pub(super) fn register(registry: &mut SerializerRegistry) {
    registry.register(Mesh::CLASSNAME, write_mesh, read_mesh);
}

fn blob_name(node: &Node) -> Result<String> {
    Ok(format!("{}/mesh.vtp", tree::node_uuid(node)?))
}

fn write_mesh(
    ctx: &mut WriteCtx<'_>,
    node: &mut Node,
    object: &Object,
    _children: &mut Children,
) -> Result<()> {
    let handle = safe_cast::<Mesh>(object)?;
    tree::write_version(node, Mesh::CLASSNAME, 1);
    let mesh = handle.read();
    tree::write_u64(node, "NumPoints", mesh.num_points() as u64);
    tree::write_u64(node, "NumCells", mesh.num_cells() as u64);
    tree::write_i64(node, "Attributes", i64::from(mesh.attributes().bits()));
    let document = vtp::encode(&mesh)?;
    ctx.write_blob(&blob_name(node)?, &document)?;
    Ok(())
}

fn read_mesh(
    ctx: &mut ReadCtx<'_>,
    node: &Node,
    _children: &Children,
    destination: Option<&Object>,
) -> Result<Object> {
    tree::read_version(node, Mesh::CLASSNAME, 1, 1)?;
    let handle = cast_or_create::<Mesh>(destination)?;
    let num_points = tree::read_usize(node, "NumPoints")?;
    let num_cells = tree::read_usize(node, "NumCells")?;
    let bits = tree::read_i64(node, "Attributes")?;
    let attributes = u8::try_from(bits)
        .ok()
        .and_then(MeshAttributes::from_bits)
        .ok_or_else(|| SessionError::unknown_enum("Attributes", bits))?;
    let document = ctx.read_blob(&blob_name(node)?)?;
    // Every point and cell occupies several document bytes, so counts
    // beyond the document length cannot be genuine; they must not drive
    // the layer allocations.
    if num_points > document.len() || num_cells > document.len() {
        return Err(SessionError::malformed(format!(
            "mesh payload is {} bytes for {num_points} points and {num_cells} cells",
            document.len()
        )));
    }
    {
        let mut mesh = handle.write();
        mesh.resize(num_points, num_cells, attributes);
        vtp::decode(&document, &mut mesh)?;
    }
    Ok(handle.into())
}
