//! Serializer for display materials.

use lumen_data::{
    Color, Concrete, Filtering, Image, Material, Object, OptionsMode, Representation, Shading,
    Wrapping,
};

use crate::context::{ReadCtx, WriteCtx};
use crate::error::Result;
use crate::helper::{cast_or_create, child_cast, enum_from_int, optional_child_cast, safe_cast};
use crate::registry::{Children, SerializerRegistry};
use crate::tree::{self, Node};

pub(super) fn register(registry: &mut SerializerRegistry) {
    registry.register(Material::CLASSNAME, write_material, read_material);
}

fn write_material(
    _ctx: &mut WriteCtx<'_>,
    node: &mut Node,
    object: &Object,
    children: &mut Children,
) -> Result<()> {
    let handle = safe_cast::<Material>(object)?;
    tree::write_version(node, Material::CLASSNAME, 1);
    let material = handle.read();
    tree::write_i64(node, "Shading", material.shading.as_int());
    tree::write_i64(node, "Representation", material.representation.as_int());
    tree::write_i64(node, "Options", material.options.as_int());
    tree::write_i64(
        node,
        "DiffuseTextureFiltering",
        material.diffuse_texture_filtering.as_int(),
    );
    tree::write_i64(
        node,
        "DiffuseTextureWrapping",
        material.diffuse_texture_wrapping.as_int(),
    );
    children.insert("Ambient".to_owned(), material.ambient.clone().into());
    children.insert("Diffuse".to_owned(), material.diffuse.clone().into());
    if let Some(texture) = &material.diffuse_texture {
        children.insert("DiffuseTexture".to_owned(), texture.clone().into());
    }
    Ok(())
}

fn read_material(
    _ctx: &mut ReadCtx<'_>,
    node: &Node,
    children: &Children,
    destination: Option<&Object>,
) -> Result<Object> {
    tree::read_version(node, Material::CLASSNAME, 1, 1)?;
    let handle = cast_or_create::<Material>(destination)?;
    let shading = enum_from_int(
        "Shading",
        tree::read_i64_or(node, "Shading", Shading::default().as_int())?,
        Shading::from_int,
    )?;
    let representation = enum_from_int(
        "Representation",
        tree::read_i64_or(node, "Representation", Representation::default().as_int())?,
        Representation::from_int,
    )?;
    let options = enum_from_int(
        "Options",
        tree::read_i64_or(node, "Options", OptionsMode::default().as_int())?,
        OptionsMode::from_int,
    )?;
    let filtering = enum_from_int(
        "DiffuseTextureFiltering",
        tree::read_i64_or(node, "DiffuseTextureFiltering", Filtering::default().as_int())?,
        Filtering::from_int,
    )?;
    let wrapping = enum_from_int(
        "DiffuseTextureWrapping",
        tree::read_i64_or(node, "DiffuseTextureWrapping", Wrapping::default().as_int())?,
        Wrapping::from_int,
    )?;
    let ambient = child_cast::<Color>(children, "Ambient")?;
    let diffuse = child_cast::<Color>(children, "Diffuse")?;
    let diffuse_texture = optional_child_cast::<Image>(children, "DiffuseTexture")?;
    {
        let mut material = handle.write();
        material.shading = shading;
        material.representation = representation;
        material.options = options;
        material.diffuse_texture_filtering = filtering;
        material.diffuse_texture_wrapping = wrapping;
        material.ambient = ambient;
        material.diffuse = diffuse;
        material.diffuse_texture = diffuse_texture;
    }
    Ok(handle.into())
}
