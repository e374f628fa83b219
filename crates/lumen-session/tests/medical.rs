//! Round trips for the medical domain types: series, reconstructions,
//! activities, cameras, landmarks and structure traits.

use std::collections::{BTreeMap, BTreeSet};

use lumen_data::{
    Activity, ActivitySet, Boolean, CalibrationInfo, Camera, CameraPixelFormat, CameraSet,
    CameraSource, Color, DicomSeries, ElementType, Image, ImageSeries, Integer, Landmarks,
    LandmarksGroup, Material, Matrix4, Mesh, MeshAttributes, ModelSeries, PixelFormat, Point,
    PointList, Reconstruction, Resection, ResectionDb, Series, SeriesSet, Shared, StructureCategory,
    StructureClass, StructureTraits, StructureTraitsDictionary, Text, object_of,
};
use lumen_session::{SessionError, read_session, write_session};

fn save_load(object: &lumen_data::Object) -> lumen_data::Object {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("session.lis");
    write_session(&path, object).expect("write session");
    read_session(&path).expect("read session")
}

fn sample_series() -> Series {
    let mut series = Series::default();
    series.set_patient_name("Doe^Jane");
    series.set_patient_id("PAT-0042");
    series.set_modality("CT");
    series.set_series_instance_uid("1.2.840.113619.2.55.3.1");
    series.set_series_description("Abdomen helical");
    series
}

fn sample_image() -> Image {
    let mut image = Image::default();
    image.resize([2, 2, 2], ElementType::Int16, PixelFormat::GrayScale);
    image.spacing = [0.7, 0.7, 2.5];
    for (index, byte) in image.buffer_mut().iter_mut().enumerate() {
        *byte = index as u8;
    }
    image
}

fn sample_mesh() -> Mesh {
    let mut mesh = Mesh::default();
    mesh.resize(3, 1, MeshAttributes::NONE);
    mesh.points = vec![[0.0, 0.0, 0.0], [10.0, 0.0, 0.0], [0.0, 10.0, 0.0]];
    mesh.cells = vec![[0, 1, 2]];
    mesh
}

fn sample_reconstruction(organ: &str) -> Reconstruction {
    Reconstruction {
        is_visible: true,
        organ_name: organ.to_owned(),
        structure_type: "Organ".to_owned(),
        computed_mask_volume: 1250.5,
        material: Shared::new(Material::default()),
        image: Some(Shared::new(sample_image())),
        mesh: Some(Shared::new(sample_mesh())),
    }
}

#[test]
fn series_round_trip() {
    let series = sample_series();
    let restored = save_load(&object_of(series.clone()));
    assert_eq!(restored, object_of(series));
}

#[test]
fn multi_instance_series_round_trip() {
    let mut series = sample_series();
    let mut second = series.datasets[0].clone();
    second.set_string(
        lumen_data::tags::SERIES_DESCRIPTION,
        lumen_data::Vr::Lo,
        "Second instance",
    );
    series.datasets.push(second);

    let restored = save_load(&object_of(series.clone()));
    assert_eq!(restored, object_of(series));
}

#[test]
fn dicom_series_round_trip() {
    let dicom = DicomSeries {
        series: sample_series(),
        sop_class_uids: BTreeSet::from([
            "1.2.840.10008.5.1.4.1.1.2".to_owned(),
            "1.2.840.10008.5.1.4.1.1.4".to_owned(),
        ]),
        computed_tag_values: BTreeMap::from([
            ("SliceThickness".to_owned(), "2.5".to_owned()),
            ("Rows".to_owned(), "512".to_owned()),
        ]),
        instances: BTreeMap::from([
            (1, vec![0x10, 0x20, 0x30]),
            (7, vec![0xFF, 0x00]),
        ]),
    };

    let restored = save_load(&object_of(dicom.clone()));
    assert_eq!(restored, object_of(dicom));
}

#[test]
fn image_series_round_trip() {
    let image_series = ImageSeries {
        series: sample_series(),
        image: sample_image(),
        dicom_reference: Some(Shared::new(DicomSeries {
            series: sample_series(),
            ..DicomSeries::default()
        })),
    };

    let restored = save_load(&object_of(image_series.clone()));
    assert_eq!(restored, object_of(image_series));
}

#[test]
fn model_series_round_trip() {
    let model_series = ModelSeries {
        series: sample_series(),
        reconstruction_db: vec![
            Shared::new(sample_reconstruction("liver")),
            Shared::new(sample_reconstruction("spleen")),
        ],
        dicom_reference: None,
    };

    let restored = save_load(&object_of(model_series.clone()));
    assert_eq!(restored, object_of(model_series));
}

#[test]
fn series_set_round_trip() {
    let mut set = SeriesSet::default();
    set.push(object_of(sample_series()));
    set.push(object_of(ImageSeries {
        series: sample_series(),
        image: sample_image(),
        dicom_reference: None,
    }));

    let restored = save_load(&object_of(set.clone()));
    assert_eq!(restored, object_of(set));
}

#[test]
fn series_set_rejects_non_series_members() {
    let mut set = SeriesSet::default();
    set.push(object_of(Integer::new(3)));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.lis");
    let err = write_session(&path, &object_of(set)).unwrap_err();
    assert!(matches!(err, SessionError::TypeMismatch { .. }));
}

#[test]
fn reconstruction_round_trip() {
    let reconstruction = sample_reconstruction("liver");
    let restored = save_load(&object_of(reconstruction.clone()));
    assert_eq!(restored, object_of(reconstruction));
}

#[test]
fn resection_db_round_trip() {
    let mut plane_list = lumen_data::PlaneList::default();
    plane_list.planes.push(Shared::default());
    let resection = Resection {
        name: "left lobe".to_owned(),
        plane_list: Shared::new(plane_list),
        inputs: vec![Shared::new(sample_reconstruction("liver"))],
        outputs: vec![
            Shared::new(sample_reconstruction("remnant")),
            Shared::new(sample_reconstruction("resected")),
        ],
        is_safe_part: false,
        is_valid: true,
        is_visible: true,
    };
    let db = ResectionDb {
        safe_resection: Some(Shared::new(resection.clone())),
        resections: vec![Shared::new(resection)],
    };

    let restored = save_load(&object_of(db.clone()));
    assert_eq!(restored, object_of(db));
}

#[test]
fn activity_round_trip() {
    let mut activity = Activity {
        activity_config_id: "org.lumen.activity.volumeRendering".to_owned(),
        ..Activity::default()
    };
    activity.insert("image", object_of(sample_image()));
    activity.insert("enabled", object_of(Boolean::new(true)));

    let restored = save_load(&object_of(activity.clone()));
    assert_eq!(restored, object_of(activity));
}

#[test]
fn activity_set_round_trip() {
    let mut first = Activity {
        activity_config_id: "org.lumen.activity.registration".to_owned(),
        ..Activity::default()
    };
    first.insert("label", object_of(Text::new("pre-op")));
    let second = Activity {
        activity_config_id: "org.lumen.activity.measurement".to_owned(),
        ..Activity::default()
    };

    let set = ActivitySet {
        activities: vec![Shared::new(first), Shared::new(second)],
    };

    let restored = save_load(&object_of(set.clone()));
    assert_eq!(restored, object_of(set));
}

#[test]
fn camera_round_trip() {
    let camera = Camera {
        width: 1920,
        height: 1080,
        fx: 1200.0,
        fy: 1201.5,
        cx: 960.0,
        cy: 540.0,
        distortion: [0.1, -0.05, 0.001, 0.0, 0.02],
        skew: 0.002,
        is_calibrated: true,
        camera_id: "endoscope-left".to_owned(),
        max_frame_rate: 60.0,
        pixel_format: CameraPixelFormat::Rgb32,
        video_file: String::new(),
        stream_url: "rtsp://10.0.0.4/stream1".to_owned(),
        source: CameraSource::Stream,
        scale: 1.0,
    };

    let restored = save_load(&object_of(camera.clone()));
    assert_eq!(restored, object_of(camera));
}

#[test]
fn camera_set_round_trip() {
    let mut set = CameraSet::default();
    set.add_camera(Shared::new(Camera {
        camera_id: "left".to_owned(),
        ..Camera::default()
    }));
    set.add_camera(Shared::new(Camera {
        camera_id: "right".to_owned(),
        ..Camera::default()
    }));
    let mut extrinsic = Matrix4::default();
    extrinsic.coefficients[3] = 64.5;
    set.set_extrinsic(1, Shared::new(extrinsic));

    let restored = save_load(&object_of(set.clone()));
    assert_eq!(restored, object_of(set));
}

#[test]
fn landmarks_round_trip() {
    let mut landmarks = Landmarks::default();
    landmarks.add_group(
        "tumor",
        LandmarksGroup {
            color: [1.0, 0.0, 0.0, 1.0],
            size: 2.5,
            shape: lumen_data::LandmarkShape::Sphere,
            visibility: true,
            points: Vec::new(),
        },
    );
    landmarks.add_point("tumor", [12.0, -3.5, 40.25]);
    landmarks.add_point("tumor", [0.5, 0.25, -8.0]);
    landmarks.add_group("entry", LandmarksGroup::default());

    let restored = save_load(&object_of(landmarks.clone()));
    assert_eq!(restored, object_of(landmarks));
}

#[test]
fn calibration_info_round_trip() {
    let mut points = PointList::default();
    points.points.push(Shared::new(Point::new(4.0, 5.0, 6.0)));

    let mut info = CalibrationInfo::default();
    info.add_record(Shared::new(sample_image()), Shared::new(points));
    info.add_record(Shared::new(Image::default()), Shared::default());

    let restored = save_load(&object_of(info.clone()));
    assert_eq!(restored, object_of(info));
}

#[test]
fn structure_traits_dictionary_round_trip() {
    let traits = StructureTraits {
        type_name: "Liver".to_owned(),
        class: StructureClass::Organ,
        categories: vec![StructureCategory::Abdomen, StructureCategory::LiverSegments],
        native_exp: "select texture".to_owned(),
        native_geometric_exp: String::new(),
        attachment_type: String::new(),
        anatomic_region: "abdomen".to_owned(),
        property_category: String::new(),
        property_type: String::new(),
        color: Shared::new(Color {
            rgba: [0.8, 0.4, 0.2, 1.0],
        }),
    };
    let mut dictionary = StructureTraitsDictionary::default();
    dictionary.insert(Shared::new(traits));

    let restored = save_load(&object_of(dictionary.clone()));
    assert_eq!(restored, object_of(dictionary));
}
