//! VTK XML `PolyData` codec for triangle meshes.
//!
//! Encodes a mesh as a single-piece `.vtp` document: point coordinates,
//! optional normal and color layers in `PointData`/`CellData`, and
//! triangle connectivity plus offsets under `Polys`. Each array is one
//! length-prefixed base64 block. On decode the destination mesh must
//! already carry the final point count, cell count and attribute
//! layers; a document that disagrees is rejected.

use lumen_data::Mesh;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::error::{CodecError, Result};
use crate::{payload, vtk};

const FORMAT: &str = "vtp";

/// Encode `mesh` as a `.vtp` document.
pub fn encode(mesh: &Mesh) -> Result<Vec<u8>> {
    let mut xml = Writer::new_with_indent(Vec::new(), b' ', 2);
    xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut root = BytesStart::new("VTKFile");
    root.push_attribute(("type", "PolyData"));
    root.push_attribute(("version", "1.0"));
    root.push_attribute(("byte_order", "LittleEndian"));
    root.push_attribute(("header_type", "UInt64"));
    xml.write_event(Event::Start(root))?;
    xml.write_event(Event::Start(BytesStart::new("PolyData")))?;

    let num_points = mesh.num_points().to_string();
    let num_polys = mesh.num_cells().to_string();
    let mut piece = BytesStart::new("Piece");
    piece.push_attribute(("NumberOfPoints", num_points.as_str()));
    piece.push_attribute(("NumberOfVerts", "0"));
    piece.push_attribute(("NumberOfLines", "0"));
    piece.push_attribute(("NumberOfStrips", "0"));
    piece.push_attribute(("NumberOfPolys", num_polys.as_str()));
    xml.write_event(Event::Start(piece))?;

    xml.write_event(Event::Start(BytesStart::new("Points")))?;
    write_array(&mut xml, "Float32", "Points", Some(3), &pack_f32(&mesh.points))?;
    xml.write_event(Event::End(BytesEnd::new("Points")))?;

    write_layers(
        &mut xml,
        "PointData",
        mesh.point_normals.as_deref(),
        mesh.point_colors.as_deref(),
    )?;
    write_layers(
        &mut xml,
        "CellData",
        mesh.cell_normals.as_deref(),
        mesh.cell_colors.as_deref(),
    )?;

    xml.write_event(Event::Start(BytesStart::new("Polys")))?;
    write_array(&mut xml, "UInt32", "connectivity", None, &pack_cells(&mesh.cells))?;
    write_array(&mut xml, "UInt64", "offsets", None, &pack_offsets(mesh.num_cells()))?;
    xml.write_event(Event::End(BytesEnd::new("Polys")))?;

    xml.write_event(Event::End(BytesEnd::new("Piece")))?;
    xml.write_event(Event::End(BytesEnd::new("PolyData")))?;
    xml.write_event(Event::End(BytesEnd::new("VTKFile")))?;
    Ok(xml.into_inner())
}

/// Decode a `.vtp` document into a pre-sized mesh.
///
/// `mesh` must already have the point count, cell count and attribute
/// layers the document was written with; the call fails with
/// [`CodecError::GeometryMismatch`] otherwise.
pub fn decode(bytes: &[u8], mesh: &mut Mesh) -> Result<()> {
    let blocks = collect_blocks(bytes)?;

    let num_points = blocks
        .num_points
        .ok_or_else(|| CodecError::invalid_payload(FORMAT, "missing NumberOfPoints"))?;
    if num_points != mesh.num_points() {
        return Err(CodecError::geometry_mismatch(format!(
            "{num_points} points where the destination holds {}",
            mesh.num_points()
        )));
    }
    let num_cells = blocks
        .num_cells
        .ok_or_else(|| CodecError::invalid_payload(FORMAT, "missing NumberOfPolys"))?;
    if num_cells != mesh.num_cells() {
        return Err(CodecError::geometry_mismatch(format!(
            "{num_cells} cells where the destination holds {}",
            mesh.num_cells()
        )));
    }

    let points = blocks
        .points
        .ok_or_else(|| CodecError::invalid_payload(FORMAT, "missing Points array"))?;
    mesh.points = unpack_f32(&payload::decode_block(FORMAT, &points)?, num_points, "points")?;

    fill_f32_layer(
        &mut mesh.point_normals,
        blocks.point_normals,
        num_points,
        "point normals",
    )?;
    fill_rgba_layer(
        &mut mesh.point_colors,
        blocks.point_colors,
        num_points,
        "point colors",
    )?;
    fill_f32_layer(
        &mut mesh.cell_normals,
        blocks.cell_normals,
        num_cells,
        "cell normals",
    )?;
    fill_rgba_layer(
        &mut mesh.cell_colors,
        blocks.cell_colors,
        num_cells,
        "cell colors",
    )?;

    let connectivity = match blocks.connectivity {
        Some(block) => payload::decode_block(FORMAT, &block)?,
        None if num_cells == 0 => Vec::new(),
        None => return Err(CodecError::invalid_payload(FORMAT, "missing connectivity array")),
    };
    mesh.cells = unpack_cells(&connectivity, num_cells)?;
    if let Some(block) = blocks.offsets {
        check_offsets(&payload::decode_block(FORMAT, &block)?, num_cells)?;
    }
    Ok(())
}

#[derive(Clone, Copy, PartialEq)]
enum Section {
    Points,
    PointData,
    CellData,
    Polys,
}

#[derive(Clone, Copy)]
enum Target {
    Points,
    PointNormals,
    PointColors,
    CellNormals,
    CellColors,
    Connectivity,
    Offsets,
}

impl Target {
    fn expected_type(self) -> &'static str {
        match self {
            Self::Points | Self::PointNormals | Self::CellNormals => "Float32",
            Self::PointColors | Self::CellColors => "UInt8",
            Self::Connectivity => "UInt32",
            Self::Offsets => "UInt64",
        }
    }
}

#[derive(Default)]
struct Blocks {
    num_points: Option<usize>,
    num_cells: Option<usize>,
    points: Option<String>,
    point_normals: Option<String>,
    point_colors: Option<String>,
    cell_normals: Option<String>,
    cell_colors: Option<String>,
    connectivity: Option<String>,
    offsets: Option<String>,
}

fn collect_blocks(bytes: &[u8]) -> Result<Blocks> {
    let mut reader = Reader::from_reader(bytes);
    let mut buf = Vec::new();
    let mut blocks = Blocks::default();
    let mut section = None;
    let mut current: Option<(Target, String)> = None;
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(tag) => match tag.name().as_ref() {
                b"Piece" => {
                    blocks.num_points = parse_count(&tag, "NumberOfPoints")?;
                    blocks.num_cells = parse_count(&tag, "NumberOfPolys")?;
                }
                b"Points" => section = Some(Section::Points),
                b"PointData" => section = Some(Section::PointData),
                b"CellData" => section = Some(Section::CellData),
                b"Polys" => section = Some(Section::Polys),
                b"DataArray" => {
                    if let Some(target) = array_target(section, &tag)? {
                        current = Some((target, String::new()));
                    }
                }
                _ => {}
            },
            Event::Text(text) => {
                if let Some((_, block)) = current.as_mut() {
                    block.push_str(vtk::decode_text(FORMAT, &text)?.trim());
                }
            }
            Event::End(tag) => match tag.name().as_ref() {
                b"DataArray" => {
                    if let Some((target, block)) = current.take() {
                        store_block(&mut blocks, target, block);
                    }
                }
                b"Points" | b"PointData" | b"CellData" | b"Polys" => section = None,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }
    Ok(blocks)
}

fn parse_count(tag: &BytesStart<'_>, name: &str) -> Result<Option<usize>> {
    vtk::attribute(FORMAT, tag, name)?
        .map(|raw| {
            raw.parse().map_err(|_| {
                CodecError::invalid_payload(FORMAT, format!("bad count '{raw}' in {name}"))
            })
        })
        .transpose()
}

fn array_target(section: Option<Section>, tag: &BytesStart<'_>) -> Result<Option<Target>> {
    let name = vtk::attribute(FORMAT, tag, "Name")?.unwrap_or_default();
    let target = match (section, name.as_str()) {
        (Some(Section::Points), "Points") => Target::Points,
        (Some(Section::PointData), "Normals") => Target::PointNormals,
        (Some(Section::PointData), "Colors") => Target::PointColors,
        (Some(Section::CellData), "Normals") => Target::CellNormals,
        (Some(Section::CellData), "Colors") => Target::CellColors,
        (Some(Section::Polys), "connectivity") => Target::Connectivity,
        (Some(Section::Polys), "offsets") => Target::Offsets,
        _ => return Ok(None),
    };
    if let Some(type_name) = vtk::attribute(FORMAT, tag, "type")? {
        if type_name != target.expected_type() {
            return Err(CodecError::invalid_payload(
                FORMAT,
                format!("array '{name}' has type {type_name}"),
            ));
        }
    }
    Ok(Some(target))
}

fn store_block(blocks: &mut Blocks, target: Target, block: String) {
    let slot = match target {
        Target::Points => &mut blocks.points,
        Target::PointNormals => &mut blocks.point_normals,
        Target::PointColors => &mut blocks.point_colors,
        Target::CellNormals => &mut blocks.cell_normals,
        Target::CellColors => &mut blocks.cell_colors,
        Target::Connectivity => &mut blocks.connectivity,
        Target::Offsets => &mut blocks.offsets,
    };
    *slot = Some(block);
}

fn write_array<W: std::io::Write>(
    xml: &mut Writer<W>,
    type_name: &str,
    name: &str,
    components: Option<usize>,
    bytes: &[u8],
) -> Result<()> {
    let mut array = BytesStart::new("DataArray");
    array.push_attribute(("type", type_name));
    array.push_attribute(("Name", name));
    let components_text;
    if let Some(components) = components {
        components_text = components.to_string();
        array.push_attribute(("NumberOfComponents", components_text.as_str()));
    }
    array.push_attribute(("format", "binary"));
    xml.write_event(Event::Start(array))?;
    let block = payload::encode_block(bytes);
    xml.write_event(Event::Text(BytesText::new(&block)))?;
    xml.write_event(Event::End(BytesEnd::new("DataArray")))?;
    Ok(())
}

fn write_layers<W: std::io::Write>(
    xml: &mut Writer<W>,
    name: &str,
    normals: Option<&[[f32; 3]]>,
    colors: Option<&[[u8; 4]]>,
) -> Result<()> {
    if normals.is_none() && colors.is_none() {
        xml.write_event(Event::Empty(BytesStart::new(name)))?;
        return Ok(());
    }
    xml.write_event(Event::Start(BytesStart::new(name)))?;
    if let Some(normals) = normals {
        write_array(xml, "Float32", "Normals", Some(3), &pack_f32(normals))?;
    }
    if let Some(colors) = colors {
        write_array(xml, "UInt8", "Colors", Some(4), &pack_rgba(colors))?;
    }
    xml.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn fill_f32_layer(
    layer: &mut Option<Vec<[f32; 3]>>,
    block: Option<String>,
    expected: usize,
    what: &'static str,
) -> Result<()> {
    match (layer.as_mut(), block) {
        (Some(layer), Some(block)) => {
            *layer = unpack_f32(&payload::decode_block(FORMAT, &block)?, expected, what)?;
            Ok(())
        }
        (None, None) => Ok(()),
        (Some(_), None) => Err(CodecError::geometry_mismatch(format!(
            "document lacks the {what} layer"
        ))),
        (None, Some(_)) => Err(CodecError::geometry_mismatch(format!(
            "unexpected {what} layer"
        ))),
    }
}

fn fill_rgba_layer(
    layer: &mut Option<Vec<[u8; 4]>>,
    block: Option<String>,
    expected: usize,
    what: &'static str,
) -> Result<()> {
    match (layer.as_mut(), block) {
        (Some(layer), Some(block)) => {
            *layer = unpack_rgba(&payload::decode_block(FORMAT, &block)?, expected, what)?;
            Ok(())
        }
        (None, None) => Ok(()),
        (Some(_), None) => Err(CodecError::geometry_mismatch(format!(
            "document lacks the {what} layer"
        ))),
        (None, Some(_)) => Err(CodecError::geometry_mismatch(format!(
            "unexpected {what} layer"
        ))),
    }
}

fn pack_f32(values: &[[f32; 3]]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(values.len() * 12);
    for triple in values {
        for component in triple {
            bytes.extend_from_slice(&component.to_le_bytes());
        }
    }
    bytes
}

fn pack_rgba(values: &[[u8; 4]]) -> Vec<u8> {
    values.iter().flatten().copied().collect()
}

fn pack_cells(cells: &[[u32; 3]]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(cells.len() * 12);
    for cell in cells {
        for index in cell {
            bytes.extend_from_slice(&index.to_le_bytes());
        }
    }
    bytes
}

/// Triangle offsets: the end index of each cell in the connectivity
/// array.
fn pack_offsets(num_cells: usize) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(num_cells * 8);
    for i in 1..=num_cells {
        bytes.extend_from_slice(&((i * 3) as u64).to_le_bytes());
    }
    bytes
}

fn unpack_f32(bytes: &[u8], expected: usize, what: &str) -> Result<Vec<[f32; 3]>> {
    if bytes.len() != expected * 12 {
        return Err(CodecError::geometry_mismatch(format!(
            "{} bytes in the {what} array, expected {}",
            bytes.len(),
            expected * 12
        )));
    }
    Ok(bytes
        .chunks_exact(12)
        .map(|chunk| {
            [
                f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]),
                f32::from_le_bytes([chunk[4], chunk[5], chunk[6], chunk[7]]),
                f32::from_le_bytes([chunk[8], chunk[9], chunk[10], chunk[11]]),
            ]
        })
        .collect())
}

fn unpack_rgba(bytes: &[u8], expected: usize, what: &str) -> Result<Vec<[u8; 4]>> {
    if bytes.len() != expected * 4 {
        return Err(CodecError::geometry_mismatch(format!(
            "{} bytes in the {what} array, expected {}",
            bytes.len(),
            expected * 4
        )));
    }
    Ok(bytes
        .chunks_exact(4)
        .map(|chunk| [chunk[0], chunk[1], chunk[2], chunk[3]])
        .collect())
}

fn unpack_cells(bytes: &[u8], expected: usize) -> Result<Vec<[u32; 3]>> {
    if bytes.len() != expected * 12 {
        return Err(CodecError::geometry_mismatch(format!(
            "{} bytes in the connectivity array, expected {}",
            bytes.len(),
            expected * 12
        )));
    }
    Ok(bytes
        .chunks_exact(12)
        .map(|chunk| {
            [
                u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]),
                u32::from_le_bytes([chunk[4], chunk[5], chunk[6], chunk[7]]),
                u32::from_le_bytes([chunk[8], chunk[9], chunk[10], chunk[11]]),
            ]
        })
        .collect())
}

fn check_offsets(bytes: &[u8], num_cells: usize) -> Result<()> {
    if bytes.len() != num_cells * 8 {
        return Err(CodecError::invalid_payload(
            FORMAT,
            format!("{} bytes in the offsets array for {num_cells} cells", bytes.len()),
        ));
    }
    for (i, chunk) in bytes.chunks_exact(8).enumerate() {
        let mut raw = [0u8; 8];
        raw.copy_from_slice(chunk);
        if u64::from_le_bytes(raw) != ((i + 1) * 3) as u64 {
            return Err(CodecError::invalid_payload(FORMAT, "cells are not all triangles"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use lumen_data::MeshAttributes;

    use super::*;

    fn sample_mesh(attributes: MeshAttributes) -> Mesh {
        let mut mesh = Mesh::default();
        mesh.resize(4, 2, attributes);
        mesh.points = vec![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
        ];
        mesh.cells = vec![[0, 1, 2], [1, 2, 3]];
        if let Some(normals) = mesh.point_normals.as_mut() {
            for (i, normal) in normals.iter_mut().enumerate() {
                *normal = [i as f32, 0.0, 1.0];
            }
        }
        if let Some(colors) = mesh.point_colors.as_mut() {
            for (i, color) in colors.iter_mut().enumerate() {
                *color = [i as u8, 10, 20, 255];
            }
        }
        if let Some(normals) = mesh.cell_normals.as_mut() {
            for (i, normal) in normals.iter_mut().enumerate() {
                *normal = [0.0, i as f32, -1.0];
            }
        }
        if let Some(colors) = mesh.cell_colors.as_mut() {
            for (i, color) in colors.iter_mut().enumerate() {
                *color = [200, i as u8, 0, 128];
            }
        }
        mesh
    }

    fn all_attributes() -> MeshAttributes {
        MeshAttributes::POINT_NORMALS
            .with(MeshAttributes::POINT_COLORS)
            .with(MeshAttributes::CELL_NORMALS)
            .with(MeshAttributes::CELL_COLORS)
    }

    #[test]
    fn round_trips_all_layers() {
        let mesh = sample_mesh(all_attributes());
        let doc = encode(&mesh).unwrap();
        let mut restored = Mesh::default();
        restored.resize(4, 2, all_attributes());
        decode(&doc, &mut restored).unwrap();
        assert_eq!(restored, mesh);
    }

    #[test]
    fn round_trips_bare_geometry() {
        let mesh = sample_mesh(MeshAttributes::NONE);
        let doc = encode(&mesh).unwrap();
        let mut restored = Mesh::default();
        restored.resize(4, 2, MeshAttributes::NONE);
        decode(&doc, &mut restored).unwrap();
        assert_eq!(restored, mesh);
    }

    #[test]
    fn rejects_missing_layer() {
        let doc = encode(&sample_mesh(MeshAttributes::NONE)).unwrap();
        let mut restored = Mesh::default();
        restored.resize(4, 2, MeshAttributes::POINT_NORMALS);
        assert!(matches!(
            decode(&doc, &mut restored),
            Err(CodecError::GeometryMismatch { .. })
        ));
    }

    #[test]
    fn rejects_point_count_mismatch() {
        let doc = encode(&sample_mesh(MeshAttributes::NONE)).unwrap();
        let mut restored = Mesh::default();
        restored.resize(3, 2, MeshAttributes::NONE);
        assert!(matches!(
            decode(&doc, &mut restored),
            Err(CodecError::GeometryMismatch { .. })
        ));
    }

    #[test]
    fn rejects_non_triangle_offsets() {
        let mesh = sample_mesh(MeshAttributes::NONE);
        let doc = String::from_utf8(encode(&mesh).unwrap()).unwrap();
        let good = payload::encode_block(&pack_offsets(2));
        let mut tampered = pack_offsets(2);
        tampered[0] = 4;
        let bad = payload::encode_block(&tampered);
        let doc = doc.replace(&good, &bad);
        let mut restored = Mesh::default();
        restored.resize(4, 2, MeshAttributes::NONE);
        assert!(matches!(
            decode(doc.as_bytes(), &mut restored),
            Err(CodecError::InvalidPayload { .. })
        ));
    }
}
