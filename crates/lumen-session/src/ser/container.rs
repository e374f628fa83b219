//! Serializers for the generic object containers.

use lumen_data::{Concrete, Map, Object, Set, Vector};

use crate::context::{ReadCtx, WriteCtx};
use crate::error::Result;
use crate::helper::{cast_or_create, indexed_children, insert_indexed, safe_cast};
use crate::registry::{Children, SerializerRegistry};
use crate::tree::{self, Node};

pub(super) fn register(registry: &mut SerializerRegistry) {
    registry
        .register(Vector::CLASSNAME, write_vector, read_vector)
        .register(Set::CLASSNAME, write_set, read_set)
        .register(Map::CLASSNAME, write_map, read_map);
}

fn write_vector(
    _ctx: &mut WriteCtx<'_>,
    node: &mut Node,
    object: &Object,
    children: &mut Children,
) -> Result<()> {
    let handle = safe_cast::<Vector>(object)?;
    tree::write_version(node, Vector::CLASSNAME, 1);
    for (index, member) in handle.read().objects.iter().enumerate() {
        insert_indexed(children, "object", index, member.clone());
    }
    Ok(())
}

fn read_vector(
    _ctx: &mut ReadCtx<'_>,
    node: &Node,
    children: &Children,
    destination: Option<&Object>,
) -> Result<Object> {
    tree::read_version(node, Vector::CLASSNAME, 1, 1)?;
    let handle = cast_or_create::<Vector>(destination)?;
    let objects: Vec<Object> = indexed_children(children, "object")
        .into_iter()
        .cloned()
        .collect();
    handle.write().objects = objects;
    Ok(handle.into())
}

fn write_set(
    _ctx: &mut WriteCtx<'_>,
    node: &mut Node,
    object: &Object,
    children: &mut Children,
) -> Result<()> {
    let handle = safe_cast::<Set>(object)?;
    tree::write_version(node, Set::CLASSNAME, 1);
    for (index, member) in handle.read().iter().enumerate() {
        insert_indexed(children, "object", index, member.clone());
    }
    Ok(())
}

fn read_set(
    _ctx: &mut ReadCtx<'_>,
    node: &Node,
    children: &Children,
    destination: Option<&Object>,
) -> Result<Object> {
    tree::read_version(node, Set::CLASSNAME, 1, 1)?;
    let handle = cast_or_create::<Set>(destination)?;
    {
        let mut set = handle.write();
        set.clear();
        // Re-inserting restores identity-based uniqueness: members that
        // deserialized to the same instance collapse again.
        for member in indexed_children(children, "object") {
            set.insert(member.clone());
        }
    }
    Ok(handle.into())
}

fn write_map(
    _ctx: &mut WriteCtx<'_>,
    node: &mut Node,
    object: &Object,
    children: &mut Children,
) -> Result<()> {
    let handle = safe_cast::<Map>(object)?;
    tree::write_version(node, Map::CLASSNAME, 1);
    for (key, member) in &handle.read().objects {
        children.insert(key.clone(), member.clone());
    }
    Ok(())
}

fn read_map(
    _ctx: &mut ReadCtx<'_>,
    node: &Node,
    children: &Children,
    destination: Option<&Object>,
) -> Result<Object> {
    tree::read_version(node, Map::CLASSNAME, 1, 1)?;
    let handle = cast_or_create::<Map>(destination)?;
    let objects = children.clone();
    handle.write().objects = objects;
    Ok(handle.into())
}
