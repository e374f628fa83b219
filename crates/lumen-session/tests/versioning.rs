//! Version gating: the envelope format version, per-type version
//! stamps, the legacy unstamped layouts and user serializer overrides.

use std::fs;
use std::path::{Path, PathBuf};

use lumen_data::{Activity, Concrete, Object, Text, TransferFunction, object_of};
use lumen_session::tree::{self, Node};
use lumen_session::{
    Children, IdGenerator, ReadCtx, SessionError, SessionReader, SessionWriter, WriteCtx,
    default_registry, read_session,
};
use serde_json::{Value, json};

/// Lays a hand-built tree out as a filesystem-format session.
fn write_tree(dir: &Path, tree: &Value) -> PathBuf {
    let path = dir.join("session");
    fs::create_dir_all(&path).unwrap();
    fs::write(
        path.join("root.json"),
        serde_json::to_vec_pretty(tree).unwrap(),
    )
    .unwrap();
    path
}

fn envelope(root: Value) -> Value {
    json!({
        "version": 1,
        "saved": "2024-05-14T09:30:00+00:00",
        "root": root,
    })
}

#[test]
fn newer_format_versions_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let tree = json!({
        "version": 999,
        "saved": "2024-05-14T09:30:00+00:00",
        "root": {
            "integer": {"uuid": "i-1", "integer.Version": 1, "Value": 4},
        },
    });
    let path = write_tree(dir.path(), &tree);

    let err = read_session(&path).unwrap_err();
    assert!(matches!(
        err,
        SessionError::UnsupportedFormat { found: 999, .. }
    ));
}

#[test]
fn stamps_above_the_supported_range_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let root = json!({
        "integer": {"uuid": "i-1", "integer.Version": 3, "Value": 4},
    });
    let path = write_tree(dir.path(), &envelope(root));

    let err = read_session(&path).unwrap_err();
    assert!(matches!(
        err,
        SessionError::UnsupportedVersion {
            classname: "integer",
            found: 3,
            ..
        }
    ));
}

#[test]
fn stamps_below_a_nonzero_minimum_are_rejected() {
    // Activities accept [1, 2]; a node stamped 0 predates even the
    // legacy wrapped layout and must be refused outright.
    let dir = tempfile::tempdir().unwrap();
    let root = json!({
        "activity": {"uuid": "a-1", "activity.Version": 0, "ActivityConfigId": "legacy"},
    });
    let path = write_tree(dir.path(), &envelope(root));

    let err = read_session(&path).unwrap_err();
    assert!(matches!(
        err,
        SessionError::UnsupportedVersion {
            classname: "activity",
            found: 0,
            min: 1,
            ..
        }
    ));
}

#[test]
fn unstamped_transfer_functions_read_as_a_single_piece() {
    // Archives written before version stamps store the one implicit
    // piece flat in the function node.
    let dir = tempfile::tempdir().unwrap();
    let root = json!({
        "transfer_function": {
            "uuid": "tf-legacy",
            "Name": "grayscale",
            "Level": 0.5,
            "Window": 1.0,
            "Points": [
                {"Value": 0.0, "Color": [0.0, 0.0, 0.0, 1.0]},
                {"Value": 1.0, "Color": [1.0, 1.0, 1.0, 1.0]},
            ],
        },
    });
    let path = write_tree(dir.path(), &envelope(root));

    let restored = read_session(&path).unwrap();
    let function = TransferFunction::from_object(&restored).expect("a transfer function");
    let function = function.read();
    assert_eq!(function.name, "grayscale");
    assert_eq!(function.level, 0.5);
    assert_eq!(function.window, 1.0);
    assert_eq!(function.background_color, [0.0; 4]);
    assert_eq!(function.pieces.len(), 1);
    let piece = &function.pieces[0];
    assert!(piece.clamped);
    assert_eq!(
        piece.points,
        vec![(0.0, [0.0, 0.0, 0.0, 1.0]), (1.0, [1.0, 1.0, 1.0, 1.0])]
    );
}

#[test]
fn stamped_transfer_functions_require_the_piece_list() {
    // Version 0 nodes are stamped, so the flat layout no longer applies.
    let dir = tempfile::tempdir().unwrap();
    let root = json!({
        "transfer_function": {
            "uuid": "tf-0",
            "transfer_function.Version": 0,
            "Name": "flat",
            "Level": 1.0,
            "Window": 2.0,
            "BackgroundColor": [0.1, 0.2, 0.3, 1.0],
            "Pieces": [],
        },
    });
    let path = write_tree(dir.path(), &envelope(root));

    let restored = read_session(&path).unwrap();
    let function = TransferFunction::from_object(&restored).expect("a transfer function");
    let function = function.read();
    assert_eq!(function.background_color, [0.1, 0.2, 0.3, 1.0]);
    assert!(function.pieces.is_empty());
}

#[test]
fn wrapped_activity_content_is_unwrapped_and_given_ids() {
    // Version 1 activities wrapped their content in an inner map child
    // named `Data`; content objects receive synthetic ids on load.
    let dir = tempfile::tempdir().unwrap();
    let root = json!({
        "activity": {
            "uuid": "act-1",
            "activity.Version": 1,
            "ActivityConfigId": "legacy.workflow",
            "children": {
                "Data": {
                    "map": {
                        "uuid": "map-1",
                        "map.Version": 1,
                        "children": {
                            "subject": {
                                "string": {
                                    "uuid": "str-1",
                                    "string.Version": 1,
                                    "Value": "phantom-7",
                                },
                            },
                            "stage": {
                                "string": {
                                    "uuid": "str-2",
                                    "string.Version": 1,
                                    "Value": "planning",
                                },
                            },
                        },
                    },
                },
            },
        },
    });
    let path = write_tree(dir.path(), &envelope(root));

    let mut reader = SessionReader::new();
    reader.set_id_generator(IdGenerator::local(0));
    let restored = reader.read(&path).unwrap();
    let activity = Activity::from_object(&restored).expect("an activity");
    let activity = activity.read();
    assert_eq!(activity.activity_config_id, "legacy.workflow");
    assert_eq!(activity.data.len(), 2);

    let subject = activity.data.get("subject").expect("subject entry");
    assert_eq!(subject, &object_of(Text::new("phantom-7")));
    assert_eq!(subject.id(), Some("subject_0".to_owned()));
    let stage = activity.data.get("stage").expect("stage entry");
    assert_eq!(stage.id(), Some("stage_1".to_owned()));
}

fn write_marked(
    ctx: &mut WriteCtx<'_>,
    node: &mut Node,
    object: &Object,
    children: &mut Children,
) -> lumen_session::Result<()> {
    let default = default_registry()
        .serializer("string")
        .expect("catalog serializer");
    default(ctx, node, object, children)?;
    tree::write_version(node, "string", 666);
    tree::write_string(node, "Studio", "marked");
    Ok(())
}

fn read_marked(
    _ctx: &mut ReadCtx<'_>,
    node: &Node,
    _children: &Children,
    _destination: Option<&Object>,
) -> lumen_session::Result<Object> {
    tree::read_version(node, "string", 666, 666)?;
    assert_eq!(tree::read_string(node, "Studio")?, "marked");
    Ok(object_of(Text::new(tree::read_string(node, "Value")?)))
}

#[test]
fn serializer_overrides_replace_one_classname() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.lis");

    let mut writer = SessionWriter::new();
    writer.set_serializer("string", write_marked);
    writer.write(&path, &object_of(Text::new("custom"))).unwrap();

    // The stock reader refuses the foreign stamp.
    let err = read_session(&path).unwrap_err();
    assert!(matches!(
        err,
        SessionError::UnsupportedVersion { found: 666, .. }
    ));

    // The paired override accepts it.
    let mut reader = SessionReader::new();
    reader.set_deserializer("string", read_marked);
    let restored = reader.read(&path).unwrap();
    assert_eq!(restored, object_of(Text::new("custom")));
}
