//! Serializers for anatomical structure traits and their dictionary.

use lumen_data::{
    Color, Concrete, Object, StructureCategory, StructureClass, StructureTraits,
    StructureTraitsDictionary,
};

use crate::context::{ReadCtx, WriteCtx};
use crate::error::Result;
use crate::helper::{cast_or_create, child_cast, enum_from_int, safe_cast};
use crate::registry::{Children, SerializerRegistry};
use crate::tree::{self, Node};

pub(super) fn register(registry: &mut SerializerRegistry) {
    registry
        .register(
            StructureTraits::CLASSNAME,
            write_structure_traits,
            read_structure_traits,
        )
        .register(
            StructureTraitsDictionary::CLASSNAME,
            write_dictionary,
            read_dictionary,
        );
}

fn write_structure_traits(
    _ctx: &mut WriteCtx<'_>,
    node: &mut Node,
    object: &Object,
    children: &mut Children,
) -> Result<()> {
    let handle = safe_cast::<StructureTraits>(object)?;
    tree::write_version(node, StructureTraits::CLASSNAME, 1);
    let traits = handle.read();
    tree::write_string(node, "Type", &traits.type_name);
    tree::write_i64(node, "Class", traits.class.as_int());
    let categories: Vec<i64> = traits
        .categories
        .iter()
        .copied()
        .map(StructureCategory::as_int)
        .collect();
    tree::write_i64s(node, "Categories", &categories);
    tree::write_string(node, "NativeExp", &traits.native_exp);
    tree::write_string(node, "NativeGeometricExp", &traits.native_geometric_exp);
    tree::write_string(node, "AttachmentType", &traits.attachment_type);
    tree::write_string(node, "AnatomicRegion", &traits.anatomic_region);
    tree::write_string(node, "PropertyCategory", &traits.property_category);
    tree::write_string(node, "PropertyType", &traits.property_type);
    children.insert("Color".to_owned(), traits.color.clone().into());
    Ok(())
}

fn read_structure_traits(
    _ctx: &mut ReadCtx<'_>,
    node: &Node,
    children: &Children,
    destination: Option<&Object>,
) -> Result<Object> {
    tree::read_version(node, StructureTraits::CLASSNAME, 1, 1)?;
    let handle = cast_or_create::<StructureTraits>(destination)?;
    let type_name = tree::read_string(node, "Type")?;
    let class = enum_from_int("Class", tree::read_i64(node, "Class")?, StructureClass::from_int)?;
    let mut categories = Vec::new();
    for value in tree::read_i64_vec(node, "Categories")? {
        categories.push(enum_from_int(
            "Categories",
            value,
            StructureCategory::from_int,
        )?);
    }
    let color = child_cast::<Color>(children, "Color")?;
    {
        let mut traits = handle.write();
        traits.type_name = type_name;
        traits.class = class;
        traits.categories = categories;
        traits.native_exp = tree::read_string_or(node, "NativeExp", "")?;
        traits.native_geometric_exp = tree::read_string_or(node, "NativeGeometricExp", "")?;
        traits.attachment_type = tree::read_string_or(node, "AttachmentType", "")?;
        traits.anatomic_region = tree::read_string_or(node, "AnatomicRegion", "")?;
        traits.property_category = tree::read_string_or(node, "PropertyCategory", "")?;
        traits.property_type = tree::read_string_or(node, "PropertyType", "")?;
        traits.color = color;
    }
    Ok(handle.into())
}

fn write_dictionary(
    _ctx: &mut WriteCtx<'_>,
    node: &mut Node,
    object: &Object,
    children: &mut Children,
) -> Result<()> {
    let handle = safe_cast::<StructureTraitsDictionary>(object)?;
    tree::write_version(node, StructureTraitsDictionary::CLASSNAME, 1);
    for (name, traits) in &handle.read().traits {
        children.insert(name.clone(), traits.clone().into());
    }
    Ok(())
}

fn read_dictionary(
    _ctx: &mut ReadCtx<'_>,
    node: &Node,
    children: &Children,
    destination: Option<&Object>,
) -> Result<Object> {
    tree::read_version(node, StructureTraitsDictionary::CLASSNAME, 1, 1)?;
    let handle = cast_or_create::<StructureTraitsDictionary>(destination)?;
    let mut entries = Vec::with_capacity(children.len());
    for member in children.values() {
        entries.push(safe_cast::<StructureTraits>(member)?);
    }
    {
        let mut dictionary = handle.write();
        dictionary.traits.clear();
        // Insert re-keys each entry by its own type name.
        for traits in entries {
            dictionary.insert(traits);
        }
    }
    Ok(handle.into())
}
