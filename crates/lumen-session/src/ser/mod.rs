//! The built-in serializer catalog.
//!
//! One write/read pair per concrete type. Serializers never recurse:
//! nested objects are handed to the orchestrator through the `children`
//! map, which serializes each instance exactly once and rebuilds shared
//! handles on load. A serializer only translates its own scalar state
//! into the tree node and, for bulk payloads, into named archive blobs.

mod activity;
mod array;
mod calibration;
mod camera;
mod container;
mod geometry;
mod image;
mod landmarks;
mod material;
mod medical;
mod mesh;
mod primitive;
mod reconstruction;
mod structure;
mod transfer_function;
mod vec;

use crate::registry::SerializerRegistry;

/// Registers the built-in pair for every concrete type.
pub(crate) fn register_all(registry: &mut SerializerRegistry) {
    primitive::register(registry);
    vec::register(registry);
    geometry::register(registry);
    container::register(registry);
    array::register(registry);
    image::register(registry);
    mesh::register(registry);
    material::register(registry);
    transfer_function::register(registry);
    structure::register(registry);
    reconstruction::register(registry);
    medical::register(registry);
    activity::register(registry);
    camera::register(registry);
    landmarks::register(registry);
    calibration::register(registry);
}
