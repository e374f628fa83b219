//! Serializers for reconstructions, resections and the resection
//! database.

use lumen_data::{
    Concrete, Image, Material, Mesh, Object, PlaneList, Reconstruction, Resection, ResectionDb,
};

use crate::context::{ReadCtx, WriteCtx};
use crate::error::Result;
use crate::helper::{
    cast_or_create, child_cast, indexed_children_cast, insert_indexed, optional_child_cast,
    safe_cast,
};
use crate::registry::{Children, SerializerRegistry};
use crate::tree::{self, Node};

pub(super) fn register(registry: &mut SerializerRegistry) {
    registry
        .register(
            Reconstruction::CLASSNAME,
            write_reconstruction,
            read_reconstruction,
        )
        .register(Resection::CLASSNAME, write_resection, read_resection)
        .register(ResectionDb::CLASSNAME, write_resection_db, read_resection_db);
}

fn write_reconstruction(
    _ctx: &mut WriteCtx<'_>,
    node: &mut Node,
    object: &Object,
    children: &mut Children,
) -> Result<()> {
    let handle = safe_cast::<Reconstruction>(object)?;
    tree::write_version(node, Reconstruction::CLASSNAME, 1);
    let reconstruction = handle.read();
    tree::write_bool(node, "IsVisible", reconstruction.is_visible);
    tree::write_string(node, "OrganName", &reconstruction.organ_name);
    tree::write_string(node, "StructureType", &reconstruction.structure_type);
    tree::write_f64(node, "ComputedMaskVolume", reconstruction.computed_mask_volume);
    children.insert("Material".to_owned(), reconstruction.material.clone().into());
    if let Some(image) = &reconstruction.image {
        children.insert("Image".to_owned(), image.clone().into());
    }
    if let Some(mesh) = &reconstruction.mesh {
        children.insert("Mesh".to_owned(), mesh.clone().into());
    }
    Ok(())
}

fn read_reconstruction(
    _ctx: &mut ReadCtx<'_>,
    node: &Node,
    children: &Children,
    destination: Option<&Object>,
) -> Result<Object> {
    tree::read_version(node, Reconstruction::CLASSNAME, 1, 1)?;
    let handle = cast_or_create::<Reconstruction>(destination)?;
    let material = child_cast::<Material>(children, "Material")?;
    let image = optional_child_cast::<Image>(children, "Image")?;
    let mesh = optional_child_cast::<Mesh>(children, "Mesh")?;
    {
        let mut reconstruction = handle.write();
        reconstruction.is_visible = tree::read_bool_or(node, "IsVisible", true)?;
        reconstruction.organ_name = tree::read_string_or(node, "OrganName", "")?;
        reconstruction.structure_type = tree::read_string_or(node, "StructureType", "")?;
        reconstruction.computed_mask_volume = tree::read_f64_or(
            node,
            "ComputedMaskVolume",
            Reconstruction::NO_COMPUTED_MASK_VOLUME,
        )?;
        reconstruction.material = material;
        reconstruction.image = image;
        reconstruction.mesh = mesh;
    }
    Ok(handle.into())
}

fn write_resection(
    _ctx: &mut WriteCtx<'_>,
    node: &mut Node,
    object: &Object,
    children: &mut Children,
) -> Result<()> {
    let handle = safe_cast::<Resection>(object)?;
    tree::write_version(node, Resection::CLASSNAME, 1);
    let resection = handle.read();
    tree::write_string(node, "Name", &resection.name);
    tree::write_bool(node, "IsSafePart", resection.is_safe_part);
    tree::write_bool(node, "IsValid", resection.is_valid);
    tree::write_bool(node, "IsVisible", resection.is_visible);
    children.insert("PlaneList".to_owned(), resection.plane_list.clone().into());
    for (index, input) in resection.inputs.iter().enumerate() {
        insert_indexed(children, "input", index, input.clone().into());
    }
    for (index, output) in resection.outputs.iter().enumerate() {
        insert_indexed(children, "output", index, output.clone().into());
    }
    Ok(())
}

fn read_resection(
    _ctx: &mut ReadCtx<'_>,
    node: &Node,
    children: &Children,
    destination: Option<&Object>,
) -> Result<Object> {
    tree::read_version(node, Resection::CLASSNAME, 1, 1)?;
    let handle = cast_or_create::<Resection>(destination)?;
    let plane_list = child_cast::<PlaneList>(children, "PlaneList")?;
    let inputs = indexed_children_cast::<Reconstruction>(children, "input")?;
    let outputs = indexed_children_cast::<Reconstruction>(children, "output")?;
    {
        let mut resection = handle.write();
        resection.name = tree::read_string_or(node, "Name", "")?;
        resection.is_safe_part = tree::read_bool_or(node, "IsSafePart", true)?;
        resection.is_valid = tree::read_bool_or(node, "IsValid", false)?;
        resection.is_visible = tree::read_bool_or(node, "IsVisible", true)?;
        resection.plane_list = plane_list;
        resection.inputs = inputs;
        resection.outputs = outputs;
    }
    Ok(handle.into())
}

fn write_resection_db(
    _ctx: &mut WriteCtx<'_>,
    node: &mut Node,
    object: &Object,
    children: &mut Children,
) -> Result<()> {
    let handle = safe_cast::<ResectionDb>(object)?;
    tree::write_version(node, ResectionDb::CLASSNAME, 1);
    let db = handle.read();
    if let Some(safe) = &db.safe_resection {
        children.insert("SafeResection".to_owned(), safe.clone().into());
    }
    for (index, resection) in db.resections.iter().enumerate() {
        insert_indexed(children, "resection", index, resection.clone().into());
    }
    Ok(())
}

fn read_resection_db(
    _ctx: &mut ReadCtx<'_>,
    node: &Node,
    children: &Children,
    destination: Option<&Object>,
) -> Result<Object> {
    tree::read_version(node, ResectionDb::CLASSNAME, 1, 1)?;
    let handle = cast_or_create::<ResectionDb>(destination)?;
    let safe_resection = optional_child_cast::<Resection>(children, "SafeResection")?;
    let resections = indexed_children_cast::<Resection>(children, "resection")?;
    {
        let mut db = handle.write();
        db.safe_resection = safe_resection;
        db.resections = resections;
    }
    Ok(handle.into())
}
