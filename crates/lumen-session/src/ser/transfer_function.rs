//! Serializer for transfer functions.
//!
//! Two historical layouts exist. Pre-versioning archives carry no
//! version stamp (read as −1) and store a single implicit piece flat in
//! the function node; stamped nodes store an explicit `Pieces` list.
//! The layout is resolved once from the version, then each branch reads
//! its own shape, sharing the piece parser because the flat layout is
//! exactly one piece body.

use lumen_data::{Concrete, Interpolation, Object, TransferFunction, TransferFunctionPiece};
use serde_json::Value;

use crate::context::{ReadCtx, WriteCtx};
use crate::error::{Result, SessionError};
use crate::helper::{cast_or_create, enum_from_int, safe_cast};
use crate::registry::{Children, SerializerRegistry};
use crate::tree::{self, Node};

pub(super) fn register(registry: &mut SerializerRegistry) {
    registry.register(
        TransferFunction::CLASSNAME,
        write_transfer_function,
        read_transfer_function,
    );
}

/// The two on-disk layouts of a transfer-function node.
enum PieceLayout {
    /// Pre-versioning: the node body is itself one piece.
    SinglePiece,
    /// Stamped nodes: an explicit `Pieces` list.
    PieceList,
}

fn piece_to_node(piece: &TransferFunctionPiece) -> Node {
    let mut node = Node::new();
    tree::write_f64(&mut node, "Level", piece.level);
    tree::write_f64(&mut node, "Window", piece.window);
    tree::write_i64(&mut node, "Interpolation", piece.interpolation.as_int());
    tree::write_bool(&mut node, "Clamped", piece.clamped);
    let points: Vec<Value> = piece
        .points
        .iter()
        .map(|&(value, color)| {
            let mut point = Node::new();
            tree::write_f64(&mut point, "Value", value);
            tree::write_f64s(&mut point, "Color", &color);
            Value::Object(point)
        })
        .collect();
    node.insert("Points".to_owned(), Value::Array(points));
    node
}

fn piece_from_node(node: &Node) -> Result<TransferFunctionPiece> {
    let mut piece = TransferFunctionPiece {
        level: tree::read_f64(node, "Level")?,
        window: tree::read_f64(node, "Window")?,
        interpolation: enum_from_int(
            "Interpolation",
            tree::read_i64_or(node, "Interpolation", Interpolation::default().as_int())?,
            Interpolation::from_int,
        )?,
        clamped: tree::read_bool_or(node, "Clamped", true)?,
        points: Vec::new(),
    };
    if let Some(value) = node.get("Points") {
        let points = value
            .as_array()
            .ok_or_else(|| SessionError::malformed("'Points' is not an array"))?;
        for (index, entry) in points.iter().enumerate() {
            let point = entry
                .as_object()
                .ok_or_else(|| SessionError::malformed(format!("point {index} is not an object")))?;
            let value = tree::read_f64(point, "Value")?;
            let color = tree::read_f64_array::<4>(point, "Color")?;
            piece.insert(value, color);
        }
    }
    Ok(piece)
}

fn background_color(node: &Node) -> Result<[f64; 4]> {
    let values = tree::read_f64_vec_or(node, "BackgroundColor")?;
    if values.is_empty() {
        return Ok([0.0; 4]);
    }
    let len = values.len();
    values.try_into().map_err(|_| {
        SessionError::malformed(format!("'BackgroundColor' has {len} elements, expected 4"))
    })
}

fn write_transfer_function(
    _ctx: &mut WriteCtx<'_>,
    node: &mut Node,
    object: &Object,
    _children: &mut Children,
) -> Result<()> {
    let handle = safe_cast::<TransferFunction>(object)?;
    tree::write_version(node, TransferFunction::CLASSNAME, 1);
    let function = handle.read();
    tree::write_string(node, "Name", &function.name);
    tree::write_f64(node, "Level", function.level);
    tree::write_f64(node, "Window", function.window);
    tree::write_f64s(node, "BackgroundColor", &function.background_color);
    let pieces: Vec<Value> = function
        .pieces
        .iter()
        .map(piece_to_node)
        .map(Value::Object)
        .collect();
    node.insert("Pieces".to_owned(), Value::Array(pieces));
    Ok(())
}

fn read_transfer_function(
    _ctx: &mut ReadCtx<'_>,
    node: &Node,
    _children: &Children,
    destination: Option<&Object>,
) -> Result<Object> {
    let version = tree::read_version(node, TransferFunction::CLASSNAME, -1, 1)?;
    let layout = if version == -1 {
        PieceLayout::SinglePiece
    } else {
        PieceLayout::PieceList
    };
    let handle = cast_or_create::<TransferFunction>(destination)?;
    let name = tree::read_string_or(node, "Name", "")?;
    let level = tree::read_f64(node, "Level")?;
    let window = tree::read_f64(node, "Window")?;
    let background = background_color(node)?;
    let pieces = match layout {
        PieceLayout::SinglePiece => vec![piece_from_node(node)?],
        PieceLayout::PieceList => {
            let entries = match node.get("Pieces") {
                None => return Err(SessionError::missing_field("Pieces")),
                Some(value) => value
                    .as_array()
                    .ok_or_else(|| SessionError::malformed("'Pieces' is not an array"))?,
            };
            let mut pieces = Vec::with_capacity(entries.len());
            for (index, entry) in entries.iter().enumerate() {
                let body = entry.as_object().ok_or_else(|| {
                    SessionError::malformed(format!("piece {index} is not an object"))
                })?;
                pieces.push(piece_from_node(body)?);
            }
            pieces
        }
    };
    {
        let mut function = handle.write();
        function.name = name;
        function.level = level;
        function.window = window;
        function.background_color = background;
        function.pieces = pieces;
    }
    Ok(handle.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn piece_bodies_round_trip() {
        let mut piece = TransferFunctionPiece {
            level: 50.0,
            window: 400.0,
            interpolation: Interpolation::Nearest,
            clamped: false,
            points: Vec::new(),
        };
        piece.insert(0.0, [0.0, 0.0, 0.0, 0.0]);
        piece.insert(100.0, [1.0, 0.5, 0.25, 1.0]);
        let restored = piece_from_node(&piece_to_node(&piece)).unwrap();
        assert_eq!(restored, piece);
    }

    #[test]
    fn a_flat_body_is_one_piece() {
        let mut node = Node::new();
        tree::write_f64(&mut node, "Level", 10.0);
        tree::write_f64(&mut node, "Window", 20.0);
        let piece = piece_from_node(&node).unwrap();
        assert_eq!(piece.level, 10.0);
        assert_eq!(piece.window, 20.0);
        assert_eq!(piece.interpolation, Interpolation::Linear);
        assert!(piece.clamped);
        assert!(piece.points.is_empty());
    }
}
