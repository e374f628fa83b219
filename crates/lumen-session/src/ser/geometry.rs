//! Serializers for the geometric primitives.

use lumen_data::{Color, Concrete, Line, Matrix4, Object, Plane, PlaneList, Point, PointList};

use crate::context::{ReadCtx, WriteCtx};
use crate::error::Result;
use crate::helper::{
    cast_or_create, child_cast, indexed_children_cast, insert_indexed, safe_cast,
};
use crate::registry::{Children, SerializerRegistry};
use crate::tree::{self, Node};

pub(super) fn register(registry: &mut SerializerRegistry) {
    registry
        .register(Color::CLASSNAME, write_color, read_color)
        .register(Point::CLASSNAME, write_point, read_point)
        .register(PointList::CLASSNAME, write_point_list, read_point_list)
        .register(Matrix4::CLASSNAME, write_matrix4, read_matrix4)
        .register(Line::CLASSNAME, write_line, read_line)
        .register(Plane::CLASSNAME, write_plane, read_plane)
        .register(PlaneList::CLASSNAME, write_plane_list, read_plane_list);
}

fn write_color(
    _ctx: &mut WriteCtx<'_>,
    node: &mut Node,
    object: &Object,
    _children: &mut Children,
) -> Result<()> {
    let handle = safe_cast::<Color>(object)?;
    tree::write_version(node, Color::CLASSNAME, 1);
    let [red, green, blue, alpha] = handle.read().rgba;
    tree::write_f64(node, "Red", red);
    tree::write_f64(node, "Green", green);
    tree::write_f64(node, "Blue", blue);
    tree::write_f64(node, "Alpha", alpha);
    Ok(())
}

fn read_color(
    _ctx: &mut ReadCtx<'_>,
    node: &Node,
    _children: &Children,
    destination: Option<&Object>,
) -> Result<Object> {
    tree::read_version(node, Color::CLASSNAME, 1, 1)?;
    let handle = cast_or_create::<Color>(destination)?;
    let rgba = [
        tree::read_f64(node, "Red")?,
        tree::read_f64(node, "Green")?,
        tree::read_f64(node, "Blue")?,
        tree::read_f64(node, "Alpha")?,
    ];
    handle.write().rgba = rgba;
    Ok(handle.into())
}

fn write_point(
    _ctx: &mut WriteCtx<'_>,
    node: &mut Node,
    object: &Object,
    _children: &mut Children,
) -> Result<()> {
    let handle = safe_cast::<Point>(object)?;
    tree::write_version(node, Point::CLASSNAME, 1);
    let [x, y, z] = handle.read().coord;
    tree::write_f64(node, "X", x);
    tree::write_f64(node, "Y", y);
    tree::write_f64(node, "Z", z);
    Ok(())
}

fn read_point(
    _ctx: &mut ReadCtx<'_>,
    node: &Node,
    _children: &Children,
    destination: Option<&Object>,
) -> Result<Object> {
    tree::read_version(node, Point::CLASSNAME, 1, 1)?;
    let handle = cast_or_create::<Point>(destination)?;
    let coord = [
        tree::read_f64(node, "X")?,
        tree::read_f64(node, "Y")?,
        tree::read_f64(node, "Z")?,
    ];
    handle.write().coord = coord;
    Ok(handle.into())
}

fn write_point_list(
    _ctx: &mut WriteCtx<'_>,
    node: &mut Node,
    object: &Object,
    children: &mut Children,
) -> Result<()> {
    let handle = safe_cast::<PointList>(object)?;
    tree::write_version(node, PointList::CLASSNAME, 1);
    for (index, point) in handle.read().points.iter().enumerate() {
        insert_indexed(children, "point", index, point.clone().into());
    }
    Ok(())
}

fn read_point_list(
    _ctx: &mut ReadCtx<'_>,
    node: &Node,
    children: &Children,
    destination: Option<&Object>,
) -> Result<Object> {
    tree::read_version(node, PointList::CLASSNAME, 1, 1)?;
    let handle = cast_or_create::<PointList>(destination)?;
    let points = indexed_children_cast::<Point>(children, "point")?;
    handle.write().points = points;
    Ok(handle.into())
}

fn write_matrix4(
    _ctx: &mut WriteCtx<'_>,
    node: &mut Node,
    object: &Object,
    _children: &mut Children,
) -> Result<()> {
    let handle = safe_cast::<Matrix4>(object)?;
    tree::write_version(node, Matrix4::CLASSNAME, 1);
    tree::write_f64s(node, "Coefficients", &handle.read().coefficients);
    Ok(())
}

fn read_matrix4(
    _ctx: &mut ReadCtx<'_>,
    node: &Node,
    _children: &Children,
    destination: Option<&Object>,
) -> Result<Object> {
    tree::read_version(node, Matrix4::CLASSNAME, 1, 1)?;
    let handle = cast_or_create::<Matrix4>(destination)?;
    let coefficients = tree::read_f64_array::<16>(node, "Coefficients")?;
    handle.write().coefficients = coefficients;
    Ok(handle.into())
}

fn write_line(
    _ctx: &mut WriteCtx<'_>,
    node: &mut Node,
    object: &Object,
    children: &mut Children,
) -> Result<()> {
    let handle = safe_cast::<Line>(object)?;
    tree::write_version(node, Line::CLASSNAME, 1);
    let line = handle.read();
    children.insert("Position".to_owned(), line.position.clone().into());
    children.insert("Direction".to_owned(), line.direction.clone().into());
    Ok(())
}

fn read_line(
    _ctx: &mut ReadCtx<'_>,
    node: &Node,
    children: &Children,
    destination: Option<&Object>,
) -> Result<Object> {
    tree::read_version(node, Line::CLASSNAME, 1, 1)?;
    let handle = cast_or_create::<Line>(destination)?;
    let position = child_cast::<Point>(children, "Position")?;
    let direction = child_cast::<Point>(children, "Direction")?;
    {
        let mut line = handle.write();
        line.position = position;
        line.direction = direction;
    }
    Ok(handle.into())
}

fn write_plane(
    _ctx: &mut WriteCtx<'_>,
    node: &mut Node,
    object: &Object,
    children: &mut Children,
) -> Result<()> {
    let handle = safe_cast::<Plane>(object)?;
    tree::write_version(node, Plane::CLASSNAME, 1);
    for (index, point) in handle.read().points.iter().enumerate() {
        insert_indexed(children, "point", index, point.clone().into());
    }
    Ok(())
}

fn read_plane(
    _ctx: &mut ReadCtx<'_>,
    node: &Node,
    children: &Children,
    destination: Option<&Object>,
) -> Result<Object> {
    tree::read_version(node, Plane::CLASSNAME, 1, 1)?;
    let handle = cast_or_create::<Plane>(destination)?;
    let points = [
        child_cast::<Point>(children, "point0")?,
        child_cast::<Point>(children, "point1")?,
        child_cast::<Point>(children, "point2")?,
    ];
    handle.write().points = points;
    Ok(handle.into())
}

fn write_plane_list(
    _ctx: &mut WriteCtx<'_>,
    node: &mut Node,
    object: &Object,
    children: &mut Children,
) -> Result<()> {
    let handle = safe_cast::<PlaneList>(object)?;
    tree::write_version(node, PlaneList::CLASSNAME, 1);
    for (index, plane) in handle.read().planes.iter().enumerate() {
        insert_indexed(children, "plane", index, plane.clone().into());
    }
    Ok(())
}

fn read_plane_list(
    _ctx: &mut ReadCtx<'_>,
    node: &Node,
    children: &Children,
    destination: Option<&Object>,
) -> Result<Object> {
    tree::read_version(node, PlaneList::CLASSNAME, 1, 1)?;
    let handle = cast_or_create::<PlaneList>(destination)?;
    let planes = indexed_children_cast::<Plane>(children, "plane")?;
    handle.write().planes = planes;
    Ok(handle.into())
}
