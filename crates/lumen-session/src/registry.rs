//! The classname-keyed serializer table.
//!
//! The stock catalog is assembled once by [`default_registry`] at a
//! composition root; sessions copy it and may override individual
//! entries without touching the process default.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use lumen_data::Object;

use crate::context::{ReadCtx, WriteCtx};
use crate::error::{Result, SessionError};
use crate::ser;
use crate::tree::Node;

/// Ordered map of the child objects a node names.
pub type Children = indexmap::IndexMap<String, Object>;

/// Serializes one object's scalars into `node` and announces its child
/// objects in `children`.
pub type WriteFn = fn(&mut WriteCtx<'_>, &mut Node, &Object, &mut Children) -> Result<()>;

/// Rebuilds one object from `node` and its already-deserialized
/// children, repopulating `destination` when one is supplied.
pub type ReadFn = fn(&mut ReadCtx<'_>, &Node, &Children, Option<&Object>) -> Result<Object>;

#[derive(Clone, Copy, Default)]
struct SerializerPair {
    write: Option<WriteFn>,
    read: Option<ReadFn>,
}

/// Classname → serializer pair table.
#[derive(Clone, Default)]
pub struct SerializerRegistry {
    entries: BTreeMap<String, SerializerPair>,
}

impl SerializerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a full pair.
    ///
    /// # Panics
    ///
    /// Panics on a duplicate classname: the catalog is assembled once
    /// at startup and a duplicate is a programming error, not a
    /// runtime condition.
    pub fn register(&mut self, classname: &str, write: WriteFn, read: ReadFn) -> &mut Self {
        let previous = self.entries.insert(
            classname.to_owned(),
            SerializerPair {
                write: Some(write),
                read: Some(read),
            },
        );
        assert!(
            previous.is_none(),
            "duplicate serializer registration for '{classname}'"
        );
        self
    }

    /// Replaces the write half for one classname, leaving any read
    /// half in place.
    pub fn set_serializer(&mut self, classname: &str, write: WriteFn) {
        self.entries.entry(classname.to_owned()).or_default().write = Some(write);
    }

    /// Replaces the read half for one classname, leaving any write
    /// half in place.
    pub fn set_deserializer(&mut self, classname: &str, read: ReadFn) {
        self.entries.entry(classname.to_owned()).or_default().read = Some(read);
    }

    pub fn serializer(&self, classname: &str) -> Option<WriteFn> {
        self.entries.get(classname).and_then(|pair| pair.write)
    }

    pub fn deserializer(&self, classname: &str) -> Option<ReadFn> {
        self.entries.get(classname).and_then(|pair| pair.read)
    }

    pub(crate) fn dispatch_write(
        &self,
        ctx: &mut WriteCtx<'_>,
        node: &mut Node,
        object: &Object,
        children: &mut Children,
    ) -> Result<()> {
        let classname = object.classname();
        let write = self
            .serializer(classname)
            .ok_or_else(|| SessionError::unregistered(classname))?;
        write(ctx, node, object, children)
    }

    pub(crate) fn dispatch_read(
        &self,
        classname: &str,
        ctx: &mut ReadCtx<'_>,
        node: &Node,
        children: &Children,
        destination: Option<&Object>,
    ) -> Result<Object> {
        let read = self
            .deserializer(classname)
            .ok_or_else(|| SessionError::unregistered(classname))?;
        read(ctx, node, children, destination)
    }
}

/// The stock catalog covering every concrete type of the data model.
pub fn default_registry() -> &'static SerializerRegistry {
    static REGISTRY: OnceLock<SerializerRegistry> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let mut registry = SerializerRegistry::new();
        ser::register_all(&mut registry);
        registry
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stub_write(
        _: &mut WriteCtx<'_>,
        _: &mut Node,
        _: &Object,
        _: &mut Children,
    ) -> Result<()> {
        Ok(())
    }

    fn stub_read(
        _: &mut ReadCtx<'_>,
        _: &Node,
        _: &Children,
        _: Option<&Object>,
    ) -> Result<Object> {
        Ok(lumen_data::object_of(lumen_data::Boolean::new(true)))
    }

    #[test]
    #[should_panic(expected = "duplicate serializer registration")]
    fn duplicate_registration_panics() {
        let mut registry = SerializerRegistry::new();
        registry.register("boolean", stub_write, stub_read);
        registry.register("boolean", stub_write, stub_read);
    }

    #[test]
    fn half_registered_types_lack_the_other_half() {
        let mut registry = SerializerRegistry::new();
        registry.set_serializer("custom", stub_write);
        assert!(registry.serializer("custom").is_some());
        assert!(registry.deserializer("custom").is_none());
    }

    #[test]
    fn default_registry_covers_the_catalog() {
        let registry = default_registry();
        for classname in [
            "boolean",
            "integer",
            "real",
            "string",
            "dvec2",
            "dvec3",
            "dvec4",
            "ivec2",
            "ivec3",
            "ivec4",
            "color",
            "point",
            "point_list",
            "matrix4",
            "line",
            "plane",
            "plane_list",
            "vector",
            "set",
            "map",
            "array",
            "image",
            "mesh",
            "material",
            "transfer_function",
            "structure_traits",
            "structure_traits_dictionary",
            "reconstruction",
            "resection",
            "resection_db",
            "series",
            "dicom_series",
            "image_series",
            "model_series",
            "series_set",
            "activity",
            "activity_set",
            "camera",
            "camera_set",
            "calibration_info",
            "landmarks",
        ] {
            assert!(registry.serializer(classname).is_some(), "{classname}");
            assert!(registry.deserializer(classname).is_some(), "{classname}");
        }
    }
}
