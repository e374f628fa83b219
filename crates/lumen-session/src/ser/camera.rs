//! Serializers for cameras and calibrated camera rigs.

use lumen_data::{Camera, CameraPixelFormat, CameraSet, CameraSource, Concrete, Matrix4, Object};

use crate::context::{ReadCtx, WriteCtx};
use crate::error::Result;
use crate::helper::{
    cast_or_create, enum_from_int, insert_indexed, optional_child_cast, safe_cast,
};
use crate::registry::{Children, SerializerRegistry};
use crate::tree::{self, Node};

pub(super) fn register(registry: &mut SerializerRegistry) {
    registry
        .register(Camera::CLASSNAME, write_camera, read_camera)
        .register(CameraSet::CLASSNAME, write_camera_set, read_camera_set);
}

fn write_camera(
    _ctx: &mut WriteCtx<'_>,
    node: &mut Node,
    object: &Object,
    _children: &mut Children,
) -> Result<()> {
    let handle = safe_cast::<Camera>(object)?;
    tree::write_version(node, Camera::CLASSNAME, 1);
    let camera = handle.read();
    tree::write_u64(node, "Width", camera.width as u64);
    tree::write_u64(node, "Height", camera.height as u64);
    tree::write_f64(node, "Fx", camera.fx);
    tree::write_f64(node, "Fy", camera.fy);
    tree::write_f64(node, "Cx", camera.cx);
    tree::write_f64(node, "Cy", camera.cy);
    tree::write_f64s(node, "Distortion", &camera.distortion);
    tree::write_f64(node, "Skew", camera.skew);
    tree::write_bool(node, "IsCalibrated", camera.is_calibrated);
    tree::write_string(node, "CameraId", &camera.camera_id);
    tree::write_f64(node, "MaxFrameRate", camera.max_frame_rate);
    tree::write_i64(node, "PixelFormat", camera.pixel_format.as_int());
    tree::write_string(node, "VideoFile", &camera.video_file);
    tree::write_string(node, "StreamUrl", &camera.stream_url);
    tree::write_i64(node, "CameraSource", camera.source.as_int());
    tree::write_f64(node, "Scale", camera.scale);
    Ok(())
}

fn read_camera(
    _ctx: &mut ReadCtx<'_>,
    node: &Node,
    _children: &Children,
    destination: Option<&Object>,
) -> Result<Object> {
    tree::read_version(node, Camera::CLASSNAME, 1, 1)?;
    let handle = cast_or_create::<Camera>(destination)?;
    let defaults = Camera::default();
    let pixel_format = enum_from_int(
        "PixelFormat",
        tree::read_i64_or(node, "PixelFormat", defaults.pixel_format.as_int())?,
        CameraPixelFormat::from_int,
    )?;
    let source = enum_from_int(
        "CameraSource",
        tree::read_i64_or(node, "CameraSource", defaults.source.as_int())?,
        CameraSource::from_int,
    )?;
    {
        let mut camera = handle.write();
        camera.width = tree::read_usize_or(node, "Width", defaults.width)?;
        camera.height = tree::read_usize_or(node, "Height", defaults.height)?;
        camera.fx = tree::read_f64_or(node, "Fx", defaults.fx)?;
        camera.fy = tree::read_f64_or(node, "Fy", defaults.fy)?;
        camera.cx = tree::read_f64_or(node, "Cx", defaults.cx)?;
        camera.cy = tree::read_f64_or(node, "Cy", defaults.cy)?;
        camera.distortion = tree::read_f64_array::<5>(node, "Distortion")?;
        camera.skew = tree::read_f64_or(node, "Skew", defaults.skew)?;
        camera.is_calibrated = tree::read_bool_or(node, "IsCalibrated", defaults.is_calibrated)?;
        camera.camera_id = tree::read_string_or(node, "CameraId", &defaults.camera_id)?;
        camera.max_frame_rate = tree::read_f64_or(node, "MaxFrameRate", defaults.max_frame_rate)?;
        camera.pixel_format = pixel_format;
        camera.video_file = tree::read_string_or(node, "VideoFile", &defaults.video_file)?;
        camera.stream_url = tree::read_string_or(node, "StreamUrl", &defaults.stream_url)?;
        camera.source = source;
        camera.scale = tree::read_f64_or(node, "Scale", defaults.scale)?;
    }
    Ok(handle.into())
}

fn write_camera_set(
    _ctx: &mut WriteCtx<'_>,
    node: &mut Node,
    object: &Object,
    children: &mut Children,
) -> Result<()> {
    let handle = safe_cast::<CameraSet>(object)?;
    tree::write_version(node, CameraSet::CLASSNAME, 1);
    for (index, (camera, extrinsic)) in handle.read().cameras.iter().enumerate() {
        insert_indexed(children, "camera", index, camera.clone().into());
        if let Some(matrix) = extrinsic {
            insert_indexed(children, "extrinsic", index, matrix.clone().into());
        }
    }
    Ok(())
}

fn read_camera_set(
    _ctx: &mut ReadCtx<'_>,
    node: &Node,
    children: &Children,
    destination: Option<&Object>,
) -> Result<Object> {
    tree::read_version(node, CameraSet::CLASSNAME, 1, 1)?;
    let handle = cast_or_create::<CameraSet>(destination)?;
    let mut cameras = Vec::new();
    // The camera keys drive the scan; an extrinsic never appears alone.
    for index in 0.. {
        let Some(member) = children.get(&format!("camera{index}")) else {
            break;
        };
        let camera = safe_cast::<Camera>(member)?;
        let extrinsic = optional_child_cast::<Matrix4>(children, &format!("extrinsic{index}"))?;
        cameras.push((camera, extrinsic));
    }
    handle.write().cameras = cameras;
    Ok(handle.into())
}
