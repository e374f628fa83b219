//! Save/load round trips for scalars, geometry and containers, plus the
//! shape of the stored tree itself.

use std::fs;

use lumen_data::{
    Boolean, Color, DVec2, DVec3, DVec4, IVec2, IVec3, IVec4, Integer, Line, Map, Matrix4, Plane,
    PlaneList, Point, PointList, Real, Set, Shared, Text, Vector, object_of,
};
use lumen_session::{SessionWriter, read_session, write_session};
use lumen_zip::ArchiveFormat;
use serde_json::Value;

/// Writes the object to a fresh archive and reads it back.
fn save_load(object: &lumen_data::Object) -> lumen_data::Object {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("session.lis");
    write_session(&path, object).expect("write session");
    read_session(&path).expect("read session")
}

#[test]
fn primitives_round_trip() {
    assert_eq!(
        save_load(&object_of(Boolean::new(true))),
        object_of(Boolean::new(true))
    );
    assert_eq!(
        save_load(&object_of(Integer::new(-7))),
        object_of(Integer::new(-7))
    );
    assert_eq!(
        save_load(&object_of(Real::new(2.5))),
        object_of(Real::new(2.5))
    );
    assert_eq!(
        save_load(&object_of(Text::new("hello"))),
        object_of(Text::new("hello"))
    );
}

#[test]
fn fixed_size_vectors_round_trip() {
    assert_eq!(
        save_load(&object_of(DVec2::new([0.5, -1.5]))),
        object_of(DVec2::new([0.5, -1.5]))
    );
    assert_eq!(
        save_load(&object_of(DVec3::new([0.0, 1.0, 2.0]))),
        object_of(DVec3::new([0.0, 1.0, 2.0]))
    );
    assert_eq!(
        save_load(&object_of(DVec4::new([0.25, 0.5, 0.75, 1.0]))),
        object_of(DVec4::new([0.25, 0.5, 0.75, 1.0]))
    );
    assert_eq!(
        save_load(&object_of(IVec2::new([-3, 4]))),
        object_of(IVec2::new([-3, 4]))
    );
    assert_eq!(
        save_load(&object_of(IVec3::new([0, 1, 2]))),
        object_of(IVec3::new([0, 1, 2]))
    );
    assert_eq!(
        save_load(&object_of(IVec4::new([i64::MIN, -1, 1, i64::MAX]))),
        object_of(IVec4::new([i64::MIN, -1, 1, i64::MAX]))
    );
}

#[test]
fn written_tree_follows_the_node_schema() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session");
    let mut writer = SessionWriter::new();
    writer.set_archive_format(ArchiveFormat::Filesystem);
    writer
        .write(&path, &object_of(Point::new(1.5, -2.0, 3.25)))
        .unwrap();

    let tree: Value = serde_json::from_slice(&fs::read(path.join("root.json")).unwrap()).unwrap();
    assert_eq!(tree["version"], 1);
    assert!(tree["saved"].is_string());

    let node = &tree["root"]["point"];
    assert!(node["uuid"].is_string());
    assert_eq!(node["point.Version"], 1);
    assert_eq!(node["X"], 1.5);
    assert_eq!(node["Y"], -2.0);
    assert_eq!(node["Z"], 3.25);
    // Empty sections are omitted, not written as empty objects.
    assert!(node.get("children").is_none());
    assert!(node.get("fields").is_none());
    assert!(node.get("description").is_none());
}

#[test]
fn geometry_types_round_trip() {
    assert_eq!(
        save_load(&object_of(Color {
            rgba: [0.25, 0.5, 0.75, 1.0]
        })),
        object_of(Color {
            rgba: [0.25, 0.5, 0.75, 1.0]
        })
    );

    let mut matrix = Matrix4::default();
    matrix.coefficients[3] = 10.0;
    matrix.coefficients[7] = -20.0;
    matrix.coefficients[11] = 30.5;
    assert_eq!(save_load(&object_of(matrix.clone())), object_of(matrix));

    let mut list = PointList::default();
    list.points.push(Shared::new(Point::new(1.0, 2.0, 3.0)));
    list.points.push(Shared::new(Point::new(-4.0, 0.5, 9.0)));
    assert_eq!(save_load(&object_of(list.clone())), object_of(list));

    let line = Line {
        position: Shared::new(Point::new(0.0, 0.0, 1.0)),
        direction: Shared::new(Point::new(0.0, 1.0, 0.0)),
    };
    assert_eq!(save_load(&object_of(line.clone())), object_of(line));
}

#[test]
fn planes_round_trip() {
    let plane = Plane {
        points: [
            Shared::new(Point::new(0.0, 0.0, 0.0)),
            Shared::new(Point::new(1.0, 0.0, 0.0)),
            Shared::new(Point::new(0.0, 1.0, 0.0)),
        ],
    };
    let mut plane_list = PlaneList::default();
    plane_list.planes.push(Shared::new(plane.clone()));
    plane_list.planes.push(Shared::default());

    assert_eq!(save_load(&object_of(plane.clone())), object_of(plane));
    assert_eq!(
        save_load(&object_of(plane_list.clone())),
        object_of(plane_list)
    );
}

#[test]
fn vector_round_trip_preserves_order() {
    let mut vector = Vector::default();
    vector.objects.push(object_of(Integer::new(1)));
    vector.objects.push(object_of(Text::new("two")));
    vector.objects.push(object_of(Real::new(3.0)));

    let restored = save_load(&object_of(vector.clone()));
    assert_eq!(restored, object_of(vector));
}

#[test]
fn map_round_trip_preserves_keys() {
    let mut map = Map::default();
    map.insert("first", object_of(Integer::new(10)));
    map.insert("second", object_of(Text::new("payload")));

    let restored = save_load(&object_of(map.clone()));
    assert_eq!(restored, object_of(map));
}

#[test]
fn set_round_trip_keeps_members() {
    let mut set = Set::default();
    assert!(set.insert(object_of(Integer::new(1))));
    assert!(set.insert(object_of(Integer::new(2))));

    let restored = save_load(&object_of(set.clone()));
    assert_eq!(restored, object_of(set));
}

#[test]
fn description_and_fields_round_trip() {
    let point = Shared::new(Point::new(7.0, 8.0, 9.0));
    point.set_description("apex of the target");
    point.set_field("weight", object_of(Real::new(0.75)));
    point.set_field("label", object_of(Text::new("A")));
    let object: lumen_data::Object = point.into();

    let restored = save_load(&object);
    assert_eq!(restored.description(), "apex of the target");
    assert_eq!(
        restored.field("weight"),
        Some(object_of(Real::new(0.75)))
    );
    assert_eq!(restored.field("label"), Some(object_of(Text::new("A"))));
    assert_eq!(restored, object);
}

#[test]
fn nested_containers_round_trip() {
    let mut inner = Vector::default();
    inner.objects.push(object_of(Boolean::new(false)));

    let mut outer = Map::default();
    outer.insert("list", object_of(inner));
    outer.insert("scalar", object_of(Integer::new(42)));

    let restored = save_load(&object_of(outer.clone()));
    assert_eq!(restored, object_of(outer));
}
