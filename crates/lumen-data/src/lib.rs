//! Polymorphic medical-imaging data model.
//!
//! Objects are held through cheaply clonable [`Shared`] handles and form
//! a directed graph: the same instance may be referenced from several
//! parents. Every object carries a lazily-established UUID, a free-text
//! description and a map of named auxiliary fields. The type-erased
//! [`Object`] variant closes the catalog; serialization dispatches on it.
//!
//! # Example
//!
//! ```
//! use lumen_data::{Concrete, Object, Point, Shared, object_of};
//!
//! let point = Shared::new(Point::new(1.5, -2.0, 3.25));
//! let object: Object = point.clone().into();
//! assert_eq!(object.classname(), "point");
//! assert!(Point::from_object(&object).unwrap().ptr_eq(&point));
//!
//! // Equal values in distinct instances compare equal but do not alias.
//! assert_eq!(object, object_of(Point::new(1.5, -2.0, 3.25)));
//! ```

pub mod activity;
pub mod array;
pub mod calibration;
pub mod camera;
pub mod containers;
pub mod dicom;
pub mod geometry;
pub mod image;
pub mod landmarks;
pub mod material;
pub mod mesh;
pub mod object;
pub mod primitives;
pub mod reconstruction;
pub mod series;
pub mod shared;
pub mod structure;
pub mod transfer_function;
pub mod vec;

pub use activity::{Activity, ActivitySet};
pub use array::{Array, ElementType};
pub use calibration::CalibrationInfo;
pub use camera::{Camera, CameraPixelFormat, CameraSet, CameraSource};
pub use containers::{Map, Set, Vector};
pub use dicom::{Dataset, Element, Tag, Vr, tags};
pub use geometry::{Color, Line, Matrix4, Plane, PlaneList, Point, PointList};
pub use image::{Image, PixelFormat};
pub use landmarks::{LandmarkShape, Landmarks, LandmarksGroup};
pub use material::{Filtering, Material, OptionsMode, Representation, Shading, Wrapping};
pub use mesh::{Mesh, MeshAttributes};
pub use object::{Concrete, Object, object_of};
pub use primitives::{Boolean, Integer, Real, Text};
pub use reconstruction::{Reconstruction, Resection, ResectionDb};
pub use series::{DicomSeries, ImageSeries, ModelSeries, Series, SeriesSet};
pub use shared::{Fields, Shared};
pub use structure::{StructureCategory, StructureClass, StructureTraits, StructureTraitsDictionary};
pub use transfer_function::{Interpolation, TransferFunction, TransferFunctionPiece};
pub use vec::{DVec2, DVec3, DVec4, IVec2, IVec3, IVec4};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
