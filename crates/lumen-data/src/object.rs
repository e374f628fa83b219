//! The closed polymorphic object variant and conversions to concrete handles.

use crate::activity::{Activity, ActivitySet};
use crate::array::Array;
use crate::calibration::CalibrationInfo;
use crate::camera::{Camera, CameraSet};
use crate::containers::{Map, Set, Vector};
use crate::geometry::{Color, Line, Matrix4, Plane, PlaneList, Point, PointList};
use crate::image::Image;
use crate::landmarks::Landmarks;
use crate::material::Material;
use crate::mesh::Mesh;
use crate::primitives::{Boolean, Integer, Real, Text};
use crate::reconstruction::{Reconstruction, Resection, ResectionDb};
use crate::series::{DicomSeries, ImageSeries, ModelSeries, Series, SeriesSet};
use crate::shared::{Fields, Shared};
use crate::structure::{StructureTraits, StructureTraitsDictionary};
use crate::transfer_function::TransferFunction;
use crate::vec::{DVec2, DVec3, DVec4, IVec2, IVec3, IVec4};

/// Implemented by every concrete data type so generic code can move
/// between `Shared<T>` handles and the type-erased [`Object`].
pub trait Concrete: Sized {
    /// The runtime type tag, used as the key of every serialized node.
    const CLASSNAME: &'static str;

    fn into_object(handle: Shared<Self>) -> Object;

    /// Recovers the typed handle, or `None` if the dynamic type differs.
    fn from_object(object: &Object) -> Option<Shared<Self>>;
}

macro_rules! objects {
    ($($variant:ident($ty:ty) = $name:literal,)+) => {
        /// A type-erased handle to any object of the data model.
        ///
        /// The set of types is closed: serialization dispatches on the
        /// variant, so adding a type here and registering its serializer
        /// pair are the two halves of one change.
        #[derive(Clone, Debug)]
        pub enum Object {
            $($variant(Shared<$ty>),)+
        }

        $(
            impl Concrete for $ty {
                const CLASSNAME: &'static str = $name;

                fn into_object(handle: Shared<Self>) -> Object {
                    Object::$variant(handle)
                }

                fn from_object(object: &Object) -> Option<Shared<Self>> {
                    match object {
                        Object::$variant(handle) => Some(handle.clone()),
                        _ => None,
                    }
                }
            }

            impl From<Shared<$ty>> for Object {
                fn from(handle: Shared<$ty>) -> Self {
                    Object::$variant(handle)
                }
            }
        )+

        impl Object {
            /// The runtime type tag of the held instance.
            pub fn classname(&self) -> &'static str {
                match self {
                    $(Object::$variant(_) => $name,)+
                }
            }

            /// The instance's UUID, generating and pinning one on first use.
            pub fn uuid(&self) -> String {
                match self {
                    $(Object::$variant(handle) => handle.uuid(),)+
                }
            }

            pub fn existing_uuid(&self) -> Option<&str> {
                match self {
                    $(Object::$variant(handle) => handle.existing_uuid(),)+
                }
            }

            pub fn set_uuid(&self, uuid: &str) {
                match self {
                    $(Object::$variant(handle) => handle.set_uuid(uuid),)+
                }
            }

            pub fn description(&self) -> String {
                match self {
                    $(Object::$variant(handle) => handle.description(),)+
                }
            }

            pub fn set_description(&self, description: &str) {
                match self {
                    $(Object::$variant(handle) => handle.set_description(description),)+
                }
            }

            pub fn id(&self) -> Option<String> {
                match self {
                    $(Object::$variant(handle) => handle.id(),)+
                }
            }

            pub fn set_id(&self, id: &str) {
                match self {
                    $(Object::$variant(handle) => handle.set_id(id),)+
                }
            }

            pub fn fields(&self) -> Fields {
                match self {
                    $(Object::$variant(handle) => handle.fields(),)+
                }
            }

            pub fn field(&self, name: &str) -> Option<Object> {
                match self {
                    $(Object::$variant(handle) => handle.field(name),)+
                }
            }

            pub fn set_field(&self, name: &str, object: Object) {
                match self {
                    $(Object::$variant(handle) => handle.set_field(name, object),)+
                }
            }

            pub fn set_fields(&self, fields: Fields) {
                match self {
                    $(Object::$variant(handle) => handle.set_fields(fields),)+
                }
            }

            /// Whether two objects are the same underlying instance.
            pub fn ptr_eq(&self, other: &Object) -> bool {
                match (self, other) {
                    $((Object::$variant(a), Object::$variant(b)) => a.ptr_eq(b),)+
                    _ => false,
                }
            }
        }

        impl PartialEq for Object {
            fn eq(&self, other: &Self) -> bool {
                match (self, other) {
                    $((Object::$variant(a), Object::$variant(b)) => a == b,)+
                    _ => false,
                }
            }
        }
    };
}

objects! {
    Boolean(Boolean) = "boolean",
    Integer(Integer) = "integer",
    Real(Real) = "real",
    String(Text) = "string",
    DVec2(DVec2) = "dvec2",
    DVec3(DVec3) = "dvec3",
    DVec4(DVec4) = "dvec4",
    IVec2(IVec2) = "ivec2",
    IVec3(IVec3) = "ivec3",
    IVec4(IVec4) = "ivec4",
    Color(Color) = "color",
    Point(Point) = "point",
    PointList(PointList) = "point_list",
    Matrix4(Matrix4) = "matrix4",
    Line(Line) = "line",
    Plane(Plane) = "plane",
    PlaneList(PlaneList) = "plane_list",
    Vector(Vector) = "vector",
    Set(Set) = "set",
    Map(Map) = "map",
    Array(Array) = "array",
    Image(Image) = "image",
    Mesh(Mesh) = "mesh",
    Material(Material) = "material",
    TransferFunction(TransferFunction) = "transfer_function",
    StructureTraits(StructureTraits) = "structure_traits",
    StructureTraitsDictionary(StructureTraitsDictionary) = "structure_traits_dictionary",
    Reconstruction(Reconstruction) = "reconstruction",
    Resection(Resection) = "resection",
    ResectionDb(ResectionDb) = "resection_db",
    Series(Series) = "series",
    DicomSeries(DicomSeries) = "dicom_series",
    ImageSeries(ImageSeries) = "image_series",
    ModelSeries(ModelSeries) = "model_series",
    SeriesSet(SeriesSet) = "series_set",
    Activity(Activity) = "activity",
    ActivitySet(ActivitySet) = "activity_set",
    Camera(Camera) = "camera",
    CameraSet(CameraSet) = "camera_set",
    CalibrationInfo(CalibrationInfo) = "calibration_info",
    Landmarks(Landmarks) = "landmarks",
}

/// Wraps a plain value in a fresh shared handle and erases its type.
pub fn object_of<T: Concrete>(value: T) -> Object {
    T::into_object(Shared::new(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classname_matches_the_concrete_type() {
        assert_eq!(object_of(Text::new("a")).classname(), "string");
        assert_eq!(object_of(Point::default()).classname(), "point");
        assert_eq!(Text::CLASSNAME, "string");
    }

    #[test]
    fn from_object_rejects_other_types() {
        let object = object_of(Boolean::new(true));
        assert!(Boolean::from_object(&object).is_some());
        assert!(Integer::from_object(&object).is_none());
    }

    #[test]
    fn ptr_eq_distinguishes_instances_of_equal_value() {
        let a = object_of(Integer::new(4));
        let b = object_of(Integer::new(4));
        assert_eq!(a, b);
        assert!(!a.ptr_eq(&b));
        assert!(a.ptr_eq(&a.clone()));
    }
}
