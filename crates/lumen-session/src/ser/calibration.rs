//! Serializer for camera calibration input.

use lumen_data::{CalibrationInfo, Concrete, Image, Object, PointList};

use crate::context::{ReadCtx, WriteCtx};
use crate::error::Result;
use crate::helper::{cast_or_create, insert_indexed, safe_cast};
use crate::registry::{Children, SerializerRegistry};
use crate::tree::{self, Node};

pub(super) fn register(registry: &mut SerializerRegistry) {
    registry.register(
        CalibrationInfo::CLASSNAME,
        write_calibration_info,
        read_calibration_info,
    );
}

fn write_calibration_info(
    _ctx: &mut WriteCtx<'_>,
    node: &mut Node,
    object: &Object,
    children: &mut Children,
) -> Result<()> {
    let handle = safe_cast::<CalibrationInfo>(object)?;
    tree::write_version(node, CalibrationInfo::CLASSNAME, 1);
    for (index, (image, points)) in handle.read().records().enumerate() {
        insert_indexed(children, "image", index, image.clone().into());
        insert_indexed(children, "point_list", index, points.clone().into());
    }
    Ok(())
}

fn read_calibration_info(
    _ctx: &mut ReadCtx<'_>,
    node: &Node,
    children: &Children,
    destination: Option<&Object>,
) -> Result<Object> {
    tree::read_version(node, CalibrationInfo::CLASSNAME, 1, 1)?;
    let handle = cast_or_create::<CalibrationInfo>(destination)?;
    {
        let mut info = handle.write();
        info.clear();
        // Records only exist as pairs; the scan stops when either key of
        // an index is gone.
        for index in 0.. {
            let (Some(image), Some(points)) = (
                children.get(&format!("image{index}")),
                children.get(&format!("point_list{index}")),
            ) else {
                break;
            };
            info.add_record(safe_cast::<Image>(image)?, safe_cast::<PointList>(points)?);
        }
    }
    Ok(handle.into())
}
