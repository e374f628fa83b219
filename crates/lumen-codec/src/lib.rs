//! Payload codecs for session archives.
//!
//! Large binary payloads are stored beside the session tree as
//! self-describing files: images as VTK XML `ImageData` (`.vti`),
//! meshes as VTK XML `PolyData` (`.vtp`) and DICOM attribute sets as
//! bare explicit VR little endian element streams (`.dcm`). This crate
//! converts between those formats and the in-memory types of
//! [`lumen_data`].
//!
//! Decoders never size their destination: images and meshes must be
//! resized to the recorded geometry first, and the payload is checked
//! against it.
//!
//! ```
//! use lumen_codec::dcm;
//! use lumen_data::dicom::{Dataset, Vr, tags};
//!
//! let mut dataset = Dataset::default();
//! dataset.set_string(tags::PATIENT_NAME, Vr::Pn, "Doe^Jane");
//! let bytes = dcm::encode(&dataset)?;
//! assert_eq!(dcm::decode(&bytes)?, dataset);
//! # Ok::<(), lumen_codec::CodecError>(())
//! ```

pub mod dcm;
mod error;
mod payload;
pub mod vti;
mod vtk;
pub mod vtp;

pub use error::{CodecError, Result};

/// Crate version, for diagnostics.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
