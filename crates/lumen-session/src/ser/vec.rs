//! Serializers for the fixed-size numeric vectors.
//!
//! The components are stored as one JSON array under `Value`, mirroring
//! the scalar wrappers.

use lumen_data::{Concrete, DVec2, DVec3, DVec4, IVec2, IVec3, IVec4, Object};

use crate::context::{ReadCtx, WriteCtx};
use crate::error::Result;
use crate::helper::{cast_or_create, safe_cast};
use crate::registry::{Children, SerializerRegistry};
use crate::tree::{self, Node};

pub(super) fn register(registry: &mut SerializerRegistry) {
    registry
        .register(DVec2::CLASSNAME, write_dvec2, read_dvec2)
        .register(DVec3::CLASSNAME, write_dvec3, read_dvec3)
        .register(DVec4::CLASSNAME, write_dvec4, read_dvec4)
        .register(IVec2::CLASSNAME, write_ivec2, read_ivec2)
        .register(IVec3::CLASSNAME, write_ivec3, read_ivec3)
        .register(IVec4::CLASSNAME, write_ivec4, read_ivec4);
}

macro_rules! vec_serializer {
    ($ty:ident, $write_fn:ident, $read_fn:ident, $write:expr, $read:expr) => {
        fn $write_fn(
            _ctx: &mut WriteCtx<'_>,
            node: &mut Node,
            object: &Object,
            _children: &mut Children,
        ) -> Result<()> {
            let handle = safe_cast::<$ty>(object)?;
            tree::write_version(node, $ty::CLASSNAME, 1);
            ($write)(node, "Value", &handle.read().values);
            Ok(())
        }

        fn $read_fn(
            _ctx: &mut ReadCtx<'_>,
            node: &Node,
            _children: &Children,
            destination: Option<&Object>,
        ) -> Result<Object> {
            tree::read_version(node, $ty::CLASSNAME, 1, 1)?;
            let handle = cast_or_create::<$ty>(destination)?;
            handle.write().values = ($read)(node, "Value")?;
            Ok(handle.into())
        }
    };
}

vec_serializer!(DVec2, write_dvec2, read_dvec2, tree::write_f64s, tree::read_f64_array::<2>);
vec_serializer!(DVec3, write_dvec3, read_dvec3, tree::write_f64s, tree::read_f64_array::<3>);
vec_serializer!(DVec4, write_dvec4, read_dvec4, tree::write_f64s, tree::read_f64_array::<4>);
vec_serializer!(IVec2, write_ivec2, read_ivec2, tree::write_i64s, tree::read_i64_array::<2>);
vec_serializer!(IVec3, write_ivec3, read_ivec3, tree::write_i64s, tree::read_i64_array::<3>);
vec_serializer!(IVec4, write_ivec4, read_ivec4, tree::write_i64s, tree::read_i64_array::<4>);
