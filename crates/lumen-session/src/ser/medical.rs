//! Serializers for the series family.
//!
//! Every series stores one explicit-VR little-endian dataset per
//! instance under `<uuid>/<n>_instance_dataset.dcm`; the instance count
//! lives in the tree so read knows how many entries to open. The body is
//! shared by the concrete kinds, which layer their own state on top.
//!
//! A `dicom_series` additionally keeps the filtered raw payloads of its
//! source instances under `<uuid>/<n>.dcm`. Those blobs are not
//! reconstructible DICOM files; the representation is knowingly lossy
//! and round-trips as opaque bytes.

use std::collections::{BTreeMap, BTreeSet};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use lumen_codec::dcm;
use lumen_data::{
    Concrete, DicomSeries, ImageSeries, ModelSeries, Object, Reconstruction, Series, SeriesSet,
};
use serde_json::Value;

use super::image::{read_image_body, write_image_body};
use crate::context::{ReadCtx, WriteCtx};
use crate::error::{Result, SessionError};
use crate::helper::{
    cast_or_create, indexed_children, indexed_children_cast, insert_indexed, optional_child_cast,
    safe_cast,
};
use crate::registry::{Children, SerializerRegistry};
use crate::tree::{self, Node};

pub(super) fn register(registry: &mut SerializerRegistry) {
    registry
        .register(Series::CLASSNAME, write_series, read_series)
        .register(DicomSeries::CLASSNAME, write_dicom_series, read_dicom_series)
        .register(ImageSeries::CLASSNAME, write_image_series, read_image_series)
        .register(ModelSeries::CLASSNAME, write_model_series, read_model_series)
        .register(SeriesSet::CLASSNAME, write_series_set, read_series_set);
}

fn write_series_body(
    ctx: &mut WriteCtx<'_>,
    node: &mut Node,
    uuid: &str,
    series: &Series,
) -> Result<()> {
    tree::write_u64(node, "NumInstances", series.num_instances() as u64);
    for (index, dataset) in series.datasets.iter().enumerate() {
        let bytes = dcm::encode(dataset)?;
        ctx.write_blob(&format!("{uuid}/{index}_instance_dataset.dcm"), &bytes)?;
    }
    Ok(())
}

fn read_series_body(
    ctx: &mut ReadCtx<'_>,
    node: &Node,
    uuid: &str,
    series: &mut Series,
) -> Result<()> {
    let count = tree::read_usize(node, "NumInstances")?;
    series.datasets.clear();
    for index in 0..count {
        let bytes = ctx.read_blob(&format!("{uuid}/{index}_instance_dataset.dcm"))?;
        series.datasets.push(dcm::decode(&bytes)?);
    }
    Ok(())
}

fn decode_base64_string(key: &str, encoded: &str) -> Result<String> {
    let bytes = STANDARD
        .decode(encoded)
        .map_err(|error| SessionError::malformed(format!("invalid base64 in '{key}': {error}")))?;
    String::from_utf8(bytes)
        .map_err(|_| SessionError::malformed(format!("'{key}' holds non-UTF-8 text")))
}

fn write_series(
    ctx: &mut WriteCtx<'_>,
    node: &mut Node,
    object: &Object,
    _children: &mut Children,
) -> Result<()> {
    let handle = safe_cast::<Series>(object)?;
    tree::write_version(node, Series::CLASSNAME, 1);
    let uuid = tree::node_uuid(node)?.to_owned();
    write_series_body(ctx, node, &uuid, &handle.read())
}

fn read_series(
    ctx: &mut ReadCtx<'_>,
    node: &Node,
    _children: &Children,
    destination: Option<&Object>,
) -> Result<Object> {
    tree::read_version(node, Series::CLASSNAME, 1, 1)?;
    let handle = cast_or_create::<Series>(destination)?;
    let uuid = tree::node_uuid(node)?.to_owned();
    read_series_body(ctx, node, &uuid, &mut handle.write())?;
    Ok(handle.into())
}

fn write_dicom_series(
    ctx: &mut WriteCtx<'_>,
    node: &mut Node,
    object: &Object,
    _children: &mut Children,
) -> Result<()> {
    let handle = safe_cast::<DicomSeries>(object)?;
    tree::write_version(node, DicomSeries::CLASSNAME, 1);
    let uuid = tree::node_uuid(node)?.to_owned();
    let dicom = handle.read();
    write_series_body(ctx, node, &uuid, &dicom.series)?;
    let uids: Vec<Value> = dicom
        .sop_class_uids
        .iter()
        .map(|uid| Value::from(STANDARD.encode(uid)))
        .collect();
    node.insert("SopClassUids".to_owned(), Value::Array(uids));
    let mut computed = Node::new();
    for (key, value) in &dicom.computed_tag_values {
        computed.insert(key.clone(), Value::from(STANDARD.encode(value)));
    }
    node.insert("ComputedTagValues".to_owned(), Value::Object(computed));
    let numbers: Vec<Value> = dicom.instances.keys().map(|&n| Value::from(n)).collect();
    node.insert("Instances".to_owned(), Value::Array(numbers));
    for (&number, bytes) in &dicom.instances {
        ctx.write_blob(&format!("{uuid}/{number}.dcm"), bytes)?;
    }
    Ok(())
}

fn read_dicom_series(
    ctx: &mut ReadCtx<'_>,
    node: &Node,
    _children: &Children,
    destination: Option<&Object>,
) -> Result<Object> {
    tree::read_version(node, DicomSeries::CLASSNAME, 1, 1)?;
    let handle = cast_or_create::<DicomSeries>(destination)?;
    let uuid = tree::node_uuid(node)?.to_owned();

    let uid_entries = node
        .get("SopClassUids")
        .ok_or_else(|| SessionError::missing_field("SopClassUids"))?
        .as_array()
        .ok_or_else(|| SessionError::malformed("'SopClassUids' is not an array"))?;
    let mut sop_class_uids = BTreeSet::new();
    for entry in uid_entries {
        let encoded = entry
            .as_str()
            .ok_or_else(|| SessionError::malformed("'SopClassUids' holds a non-string entry"))?;
        sop_class_uids.insert(decode_base64_string("SopClassUids", encoded)?);
    }

    let computed_entries = node
        .get("ComputedTagValues")
        .ok_or_else(|| SessionError::missing_field("ComputedTagValues"))?
        .as_object()
        .ok_or_else(|| SessionError::malformed("'ComputedTagValues' is not an object"))?;
    let mut computed_tag_values = BTreeMap::new();
    for (key, value) in computed_entries {
        let encoded = value.as_str().ok_or_else(|| {
            SessionError::malformed(format!("'ComputedTagValues.{key}' is not a string"))
        })?;
        computed_tag_values.insert(key.clone(), decode_base64_string(key, encoded)?);
    }

    let number_entries = node
        .get("Instances")
        .ok_or_else(|| SessionError::missing_field("Instances"))?
        .as_array()
        .ok_or_else(|| SessionError::malformed("'Instances' is not an array"))?;
    let mut instances = BTreeMap::new();
    for entry in number_entries {
        let number = entry
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| SessionError::malformed("'Instances' holds an invalid number"))?;
        let bytes = ctx.read_blob(&format!("{uuid}/{number}.dcm"))?;
        instances.insert(number, bytes);
    }

    {
        let mut dicom = handle.write();
        read_series_body(ctx, node, &uuid, &mut dicom.series)?;
        dicom.sop_class_uids = sop_class_uids;
        dicom.computed_tag_values = computed_tag_values;
        dicom.instances = instances;
    }
    Ok(handle.into())
}

fn write_image_series(
    ctx: &mut WriteCtx<'_>,
    node: &mut Node,
    object: &Object,
    children: &mut Children,
) -> Result<()> {
    let handle = safe_cast::<ImageSeries>(object)?;
    tree::write_version(node, ImageSeries::CLASSNAME, 1);
    let uuid = tree::node_uuid(node)?.to_owned();
    let image_series = handle.read();
    write_image_body(ctx, node, &uuid, &image_series.image)?;
    write_series_body(ctx, node, &uuid, &image_series.series)?;
    if let Some(reference) = &image_series.dicom_reference {
        children.insert("DicomReference".to_owned(), reference.clone().into());
    }
    Ok(())
}

fn read_image_series(
    ctx: &mut ReadCtx<'_>,
    node: &Node,
    children: &Children,
    destination: Option<&Object>,
) -> Result<Object> {
    tree::read_version(node, ImageSeries::CLASSNAME, 1, 1)?;
    let handle = cast_or_create::<ImageSeries>(destination)?;
    let uuid = tree::node_uuid(node)?.to_owned();
    let reference = optional_child_cast::<DicomSeries>(children, "DicomReference")?;
    {
        let mut image_series = handle.write();
        read_image_body(ctx, node, &uuid, &mut image_series.image)?;
        read_series_body(ctx, node, &uuid, &mut image_series.series)?;
        image_series.dicom_reference = reference;
    }
    Ok(handle.into())
}

fn write_model_series(
    ctx: &mut WriteCtx<'_>,
    node: &mut Node,
    object: &Object,
    children: &mut Children,
) -> Result<()> {
    let handle = safe_cast::<ModelSeries>(object)?;
    tree::write_version(node, ModelSeries::CLASSNAME, 1);
    let uuid = tree::node_uuid(node)?.to_owned();
    let model_series = handle.read();
    write_series_body(ctx, node, &uuid, &model_series.series)?;
    for (index, reconstruction) in model_series.reconstruction_db.iter().enumerate() {
        insert_indexed(children, "reconstruction", index, reconstruction.clone().into());
    }
    if let Some(reference) = &model_series.dicom_reference {
        children.insert("DicomReference".to_owned(), reference.clone().into());
    }
    Ok(())
}

fn read_model_series(
    ctx: &mut ReadCtx<'_>,
    node: &Node,
    children: &Children,
    destination: Option<&Object>,
) -> Result<Object> {
    tree::read_version(node, ModelSeries::CLASSNAME, 1, 1)?;
    let handle = cast_or_create::<ModelSeries>(destination)?;
    let uuid = tree::node_uuid(node)?.to_owned();
    let reconstruction_db = indexed_children_cast::<Reconstruction>(children, "reconstruction")?;
    let reference = optional_child_cast::<DicomSeries>(children, "DicomReference")?;
    {
        let mut model_series = handle.write();
        read_series_body(ctx, node, &uuid, &mut model_series.series)?;
        model_series.reconstruction_db = reconstruction_db;
        model_series.dicom_reference = reference;
    }
    Ok(handle.into())
}

/// The classnames a `series_set` may hold.
fn ensure_series_like(object: &Object) -> Result<()> {
    let classname = object.classname();
    let accepted = classname == Series::CLASSNAME
        || classname == DicomSeries::CLASSNAME
        || classname == ImageSeries::CLASSNAME
        || classname == ModelSeries::CLASSNAME;
    if accepted {
        Ok(())
    } else {
        Err(SessionError::type_mismatch(Series::CLASSNAME, classname))
    }
}

fn write_series_set(
    _ctx: &mut WriteCtx<'_>,
    node: &mut Node,
    object: &Object,
    children: &mut Children,
) -> Result<()> {
    let handle = safe_cast::<SeriesSet>(object)?;
    tree::write_version(node, SeriesSet::CLASSNAME, 1);
    for (index, member) in handle.read().series.iter().enumerate() {
        ensure_series_like(member)?;
        insert_indexed(children, "series", index, member.clone());
    }
    Ok(())
}

fn read_series_set(
    _ctx: &mut ReadCtx<'_>,
    node: &Node,
    children: &Children,
    destination: Option<&Object>,
) -> Result<Object> {
    tree::read_version(node, SeriesSet::CLASSNAME, 1, 1)?;
    let handle = cast_or_create::<SeriesSet>(destination)?;
    let mut members = Vec::new();
    for member in indexed_children(children, "series") {
        ensure_series_like(member)?;
        members.push(member.clone());
    }
    handle.write().series = members;
    Ok(handle.into())
}
