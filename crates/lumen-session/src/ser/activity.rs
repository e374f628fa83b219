//! Serializers for activities and activity sets.
//!
//! Activity content objects are keyed by their workflow role, so the
//! child map carries user keys directly. Version 1 nodes wrapped the
//! content in a single `Data` child holding a keyed map; the layout is
//! resolved once from the version and each branch unwraps its own
//! shape. After reading, every content object receives a synthetic
//! `<key>_<n>` id from the reader's counter so key-based lookups stay
//! unambiguous across repeated loads.

use lumen_data::{Activity, ActivitySet, Concrete, Map, Object};

use crate::context::{ReadCtx, WriteCtx};
use crate::error::Result;
use crate::helper::{cast_or_create, child_cast, indexed_children_cast, insert_indexed, safe_cast};
use crate::registry::{Children, SerializerRegistry};
use crate::tree::{self, Node};

pub(super) fn register(registry: &mut SerializerRegistry) {
    registry
        .register(Activity::CLASSNAME, write_activity, read_activity)
        .register(ActivitySet::CLASSNAME, write_activity_set, read_activity_set);
}

/// Where an activity node keeps its content objects.
enum ContentLayout {
    /// Version <2: one `Data` child, itself a keyed map to unwrap.
    WrappedMap,
    /// Version ≥2: the children are the content, keyed directly.
    Direct,
}

fn write_activity(
    _ctx: &mut WriteCtx<'_>,
    node: &mut Node,
    object: &Object,
    children: &mut Children,
) -> Result<()> {
    let handle = safe_cast::<Activity>(object)?;
    tree::write_version(node, Activity::CLASSNAME, 2);
    let activity = handle.read();
    tree::write_string(node, "ActivityConfigId", &activity.activity_config_id);
    for (key, member) in &activity.data {
        children.insert(key.clone(), member.clone());
    }
    Ok(())
}

fn read_activity(
    ctx: &mut ReadCtx<'_>,
    node: &Node,
    children: &Children,
    destination: Option<&Object>,
) -> Result<Object> {
    let version = tree::read_version(node, Activity::CLASSNAME, 1, 2)?;
    let layout = if version < 2 {
        ContentLayout::WrappedMap
    } else {
        ContentLayout::Direct
    };
    let handle = cast_or_create::<Activity>(destination)?;
    let content: Vec<(String, Object)> = match layout {
        ContentLayout::WrappedMap => {
            let wrapper = child_cast::<Map>(children, "Data")?;
            let entries = wrapper
                .read()
                .objects
                .iter()
                .map(|(key, member)| (key.clone(), member.clone()))
                .collect();
            entries
        }
        ContentLayout::Direct => children
            .iter()
            .map(|(key, member)| (key.clone(), member.clone()))
            .collect(),
    };
    let activity_config_id = tree::read_string(node, "ActivityConfigId")?;
    {
        let mut activity = handle.write();
        activity.activity_config_id = activity_config_id;
        activity.data.clear();
        for (key, member) in content {
            member.set_id(&ctx.next_id(&key));
            activity.data.insert(key, member);
        }
    }
    Ok(handle.into())
}

fn write_activity_set(
    _ctx: &mut WriteCtx<'_>,
    node: &mut Node,
    object: &Object,
    children: &mut Children,
) -> Result<()> {
    let handle = safe_cast::<ActivitySet>(object)?;
    tree::write_version(node, ActivitySet::CLASSNAME, 1);
    for (index, activity) in handle.read().activities.iter().enumerate() {
        insert_indexed(children, "activity", index, activity.clone().into());
    }
    Ok(())
}

fn read_activity_set(
    _ctx: &mut ReadCtx<'_>,
    node: &Node,
    children: &Children,
    destination: Option<&Object>,
) -> Result<Object> {
    tree::read_version(node, ActivitySet::CLASSNAME, 1, 1)?;
    let handle = cast_or_create::<ActivitySet>(destination)?;
    let activities = indexed_children_cast::<Activity>(children, "activity")?;
    handle.write().activities = activities;
    Ok(handle.into())
}
