//! Serializers for the scalar wrapper types.
//!
//! The value is stored under `Value` with its native tree type, so a
//! boolean is a JSON boolean and not a stringified flag.

use lumen_data::{Boolean, Concrete, Integer, Object, Real, Text};

use crate::context::{ReadCtx, WriteCtx};
use crate::error::Result;
use crate::helper::{cast_or_create, safe_cast};
use crate::registry::{Children, SerializerRegistry};
use crate::tree::{self, Node};

pub(super) fn register(registry: &mut SerializerRegistry) {
    registry
        .register(Boolean::CLASSNAME, write_boolean, read_boolean)
        .register(Integer::CLASSNAME, write_integer, read_integer)
        .register(Real::CLASSNAME, write_real, read_real)
        .register(Text::CLASSNAME, write_text, read_text);
}

fn write_boolean(
    _ctx: &mut WriteCtx<'_>,
    node: &mut Node,
    object: &Object,
    _children: &mut Children,
) -> Result<()> {
    let boolean = safe_cast::<Boolean>(object)?;
    tree::write_version(node, Boolean::CLASSNAME, 1);
    tree::write_bool(node, "Value", boolean.read().value);
    Ok(())
}

fn read_boolean(
    _ctx: &mut ReadCtx<'_>,
    node: &Node,
    _children: &Children,
    destination: Option<&Object>,
) -> Result<Object> {
    tree::read_version(node, Boolean::CLASSNAME, 1, 1)?;
    let handle = cast_or_create::<Boolean>(destination)?;
    handle.write().value = tree::read_bool(node, "Value")?;
    Ok(handle.into())
}

fn write_integer(
    _ctx: &mut WriteCtx<'_>,
    node: &mut Node,
    object: &Object,
    _children: &mut Children,
) -> Result<()> {
    let integer = safe_cast::<Integer>(object)?;
    tree::write_version(node, Integer::CLASSNAME, 1);
    tree::write_i64(node, "Value", integer.read().value);
    Ok(())
}

fn read_integer(
    _ctx: &mut ReadCtx<'_>,
    node: &Node,
    _children: &Children,
    destination: Option<&Object>,
) -> Result<Object> {
    tree::read_version(node, Integer::CLASSNAME, 1, 1)?;
    let handle = cast_or_create::<Integer>(destination)?;
    handle.write().value = tree::read_i64(node, "Value")?;
    Ok(handle.into())
}

fn write_real(
    _ctx: &mut WriteCtx<'_>,
    node: &mut Node,
    object: &Object,
    _children: &mut Children,
) -> Result<()> {
    let real = safe_cast::<Real>(object)?;
    tree::write_version(node, Real::CLASSNAME, 1);
    tree::write_f64(node, "Value", real.read().value);
    Ok(())
}

fn read_real(
    _ctx: &mut ReadCtx<'_>,
    node: &Node,
    _children: &Children,
    destination: Option<&Object>,
) -> Result<Object> {
    tree::read_version(node, Real::CLASSNAME, 1, 1)?;
    let handle = cast_or_create::<Real>(destination)?;
    handle.write().value = tree::read_f64(node, "Value")?;
    Ok(handle.into())
}

fn write_text(
    _ctx: &mut WriteCtx<'_>,
    node: &mut Node,
    object: &Object,
    _children: &mut Children,
) -> Result<()> {
    let text = safe_cast::<Text>(object)?;
    tree::write_version(node, Text::CLASSNAME, 1);
    tree::write_string(node, "Value", &text.read().value);
    Ok(())
}

fn read_text(
    _ctx: &mut ReadCtx<'_>,
    node: &Node,
    _children: &Children,
    destination: Option<&Object>,
) -> Result<Object> {
    tree::read_version(node, Text::CLASSNAME, 1, 1)?;
    let handle = cast_or_create::<Text>(destination)?;
    handle.write().value = tree::read_string(node, "Value")?;
    Ok(handle.into())
}
