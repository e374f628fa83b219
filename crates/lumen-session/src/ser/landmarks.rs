//! Serializer for landmark groups.
//!
//! Groups are an inline object keyed by group name; each point is an
//! `x;y;z` string, the historical wire form.

use indexmap::IndexMap;
use lumen_data::{Concrete, LandmarkShape, Landmarks, LandmarksGroup, Object};
use serde_json::Value;

use crate::context::{ReadCtx, WriteCtx};
use crate::error::{Result, SessionError};
use crate::helper::{cast_or_create, enum_from_int, safe_cast};
use crate::registry::{Children, SerializerRegistry};
use crate::tree::{self, Node};

pub(super) fn register(registry: &mut SerializerRegistry) {
    registry.register(Landmarks::CLASSNAME, write_landmarks, read_landmarks);
}

fn format_point(point: [f64; 3]) -> String {
    let [x, y, z] = point;
    format!("{x};{y};{z}")
}

fn parse_point(text: &str) -> Result<[f64; 3]> {
    let invalid = || SessionError::malformed(format!("landmark point '{text}' is not 'x;y;z'"));
    let mut parts = text.split(';');
    let mut coord = [0.0; 3];
    for slot in &mut coord {
        let part = parts.next().ok_or_else(invalid)?;
        *slot = part.trim().parse().map_err(|_| invalid())?;
    }
    if parts.next().is_some() {
        return Err(invalid());
    }
    Ok(coord)
}

fn write_landmarks(
    _ctx: &mut WriteCtx<'_>,
    node: &mut Node,
    object: &Object,
    _children: &mut Children,
) -> Result<()> {
    let handle = safe_cast::<Landmarks>(object)?;
    tree::write_version(node, Landmarks::CLASSNAME, 1);
    let landmarks = handle.read();
    let mut groups = Node::new();
    for (name, group) in &landmarks.groups {
        let mut body = Node::new();
        tree::write_f64s(&mut body, "Color", &group.color);
        tree::write_f64(&mut body, "Size", group.size);
        tree::write_i64(&mut body, "Shape", group.shape.as_int());
        tree::write_bool(&mut body, "Visibility", group.visibility);
        let points: Vec<Value> = group
            .points
            .iter()
            .map(|&point| Value::from(format_point(point)))
            .collect();
        body.insert("Points".to_owned(), Value::Array(points));
        groups.insert(name.clone(), Value::Object(body));
    }
    node.insert("Groups".to_owned(), Value::Object(groups));
    Ok(())
}

fn read_landmarks(
    _ctx: &mut ReadCtx<'_>,
    node: &Node,
    _children: &Children,
    destination: Option<&Object>,
) -> Result<Object> {
    tree::read_version(node, Landmarks::CLASSNAME, 1, 1)?;
    let handle = cast_or_create::<Landmarks>(destination)?;
    let entries = node
        .get("Groups")
        .ok_or_else(|| SessionError::missing_field("Groups"))?
        .as_object()
        .ok_or_else(|| SessionError::malformed("'Groups' is not an object"))?;
    let mut groups = IndexMap::new();
    for (name, value) in entries {
        let body = value
            .as_object()
            .ok_or_else(|| SessionError::malformed(format!("group '{name}' is not an object")))?;
        let mut group = LandmarksGroup {
            color: tree::read_f64_array::<4>(body, "Color")?,
            size: tree::read_f64_or(body, "Size", 1.0)?,
            shape: enum_from_int("Shape", tree::read_i64(body, "Shape")?, LandmarkShape::from_int)?,
            visibility: tree::read_bool_or(body, "Visibility", true)?,
            points: Vec::new(),
        };
        if let Some(points) = body.get("Points") {
            let points = points
                .as_array()
                .ok_or_else(|| SessionError::malformed("'Points' is not an array"))?;
            for entry in points {
                let text = entry
                    .as_str()
                    .ok_or_else(|| SessionError::malformed("'Points' holds a non-string entry"))?;
                group.points.push(parse_point(text)?);
            }
        }
        groups.insert(name.clone(), group);
    }
    handle.write().groups = groups;
    Ok(handle.into())
}
