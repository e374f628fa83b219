//! Round trips for types whose bulk data lives in binary side-files:
//! arrays, images, meshes and the objects that embed them.

use lumen_data::{
    Array, Color, ElementType, Filtering, Image, Interpolation, Material, Mesh, MeshAttributes,
    OptionsMode, PixelFormat, Representation, Shading, Shared, TransferFunction,
    TransferFunctionPiece, Wrapping, object_of,
};
use lumen_session::{read_session, write_session};

fn save_load(object: &lumen_data::Object) -> lumen_data::Object {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("session.lis");
    write_session(&path, object).expect("write session");
    read_session(&path).expect("read session")
}

fn sample_array() -> Array {
    let mut array = Array::new(&[2, 3], ElementType::Int16);
    for (index, byte) in array.buffer_mut().iter_mut().enumerate() {
        *byte = index as u8;
    }
    array
}

fn sample_image() -> Image {
    let mut image = Image::default();
    image.resize([4, 4, 2], ElementType::Uint8, PixelFormat::GrayScale);
    image.spacing = [0.5, 0.5, 1.5];
    image.origin = [-10.0, 2.0, 0.0];
    image.orientation = [0.0, 1.0, 0.0, -1.0, 0.0, 0.0, 0.0, 0.0, 1.0];
    image.window_centers = vec![40.0, 400.0];
    image.window_widths = vec![80.0, 2000.0];
    for (index, voxel) in image.buffer_mut().iter_mut().enumerate() {
        *voxel = (index % 251) as u8;
    }
    image
}

fn sample_mesh() -> Mesh {
    let mut mesh = Mesh::default();
    mesh.resize(3, 1, MeshAttributes::POINT_NORMALS);
    mesh.points = vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
    mesh.cells = vec![[0, 1, 2]];
    mesh.point_normals = Some(vec![[0.0, 0.0, 1.0]; 3]);
    mesh
}

#[test]
fn array_round_trip() {
    let array = sample_array();
    let restored = save_load(&object_of(array.clone()));
    assert_eq!(restored, object_of(array));
}

#[test]
fn unowned_array_buffers_stay_unowned() {
    let mut array = sample_array();
    array.is_buffer_owner = false;
    let restored = save_load(&object_of(array.clone()));
    assert_eq!(restored, object_of(array));
}

#[test]
fn image_round_trip() {
    let image = sample_image();
    let restored = save_load(&object_of(image.clone()));
    assert_eq!(restored, object_of(image));
}

#[test]
fn empty_image_round_trip_carries_no_payload() {
    // An undefined pixel format means no voxel payload at all; the
    // metadata still survives.
    let mut image = Image::default();
    image.resize([8, 8, 8], ElementType::Uint8, PixelFormat::Undefined);
    image.spacing = [2.0, 2.0, 2.0];

    let restored = save_load(&object_of(image.clone()));
    assert_eq!(restored, object_of(image));
}

#[test]
fn mesh_round_trip() {
    let mesh = sample_mesh();
    let restored = save_load(&object_of(mesh.clone()));
    assert_eq!(restored, object_of(mesh));
}

#[test]
fn mesh_with_all_attribute_layers_round_trips() {
    let mut mesh = sample_mesh();
    mesh.point_colors = Some(vec![[255, 0, 0, 255], [0, 255, 0, 255], [0, 0, 255, 255]]);
    mesh.cell_normals = Some(vec![[0.0, 0.0, 1.0]]);
    mesh.cell_colors = Some(vec![[10, 20, 30, 40]]);

    let restored = save_load(&object_of(mesh.clone()));
    assert_eq!(restored, object_of(mesh));
}

#[test]
fn material_round_trip() {
    let material = Material {
        shading: Shading::Flat,
        representation: Representation::Wireframe,
        options: OptionsMode::Normals,
        ambient: Shared::new(Color {
            rgba: [0.1, 0.1, 0.1, 1.0],
        }),
        diffuse: Shared::new(Color {
            rgba: [0.9, 0.2, 0.2, 1.0],
        }),
        diffuse_texture: None,
        diffuse_texture_filtering: Filtering::Linear,
        diffuse_texture_wrapping: Wrapping::Clamp,
    };

    let restored = save_load(&object_of(material.clone()));
    assert_eq!(restored, object_of(material));
}

#[test]
fn material_with_texture_round_trips() {
    let material = Material {
        diffuse_texture: Some(Shared::new(sample_image())),
        ..Material::default()
    };

    let restored = save_load(&object_of(material.clone()));
    assert_eq!(restored, object_of(material));
}

#[test]
fn transfer_function_round_trip() {
    let mut ramp = TransferFunctionPiece {
        level: 50.0,
        window: 400.0,
        interpolation: Interpolation::Nearest,
        clamped: false,
        points: Vec::new(),
    };
    ramp.insert(0.0, [0.0, 0.0, 0.0, 0.0]);
    ramp.insert(100.0, [1.0, 0.5, 0.25, 1.0]);

    let function = TransferFunction {
        name: "CT-Bone".to_owned(),
        level: 50.0,
        window: 400.0,
        background_color: [0.0, 0.0, 0.0, 1.0],
        pieces: vec![ramp, TransferFunctionPiece::default()],
    };

    let restored = save_load(&object_of(function.clone()));
    assert_eq!(restored, object_of(function));
}
