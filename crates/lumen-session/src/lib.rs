//! Object-graph persistence for session archives.
//!
//! A session stores one object and everything reachable from it: a
//! structured JSON tree (`root.json`) describing every object as a node
//! with a UUID, a version stamp and its scalar values, plus binary
//! side-files for large payloads such as image voxels and mesh
//! geometry. Shared instances are written once and referenced by UUID
//! afterwards, so reading restores the exact graph shape, aliasing
//! included.
//!
//! [`SessionWriter`] and [`SessionReader`] expose the knobs: archive
//! format, encryption password, compression, and per-classname
//! serializer overrides. The free functions cover the common case:
//!
//! ```
//! use lumen_data::{Point, object_of};
//! use lumen_session::{read_session, write_session};
//!
//! let dir = tempfile::tempdir()?;
//! let path = dir.path().join("scene.lis");
//! write_session(&path, &object_of(Point::new(1.5, -2.0, 3.25)))?;
//!
//! let restored = read_session(&path)?;
//! assert_eq!(restored, object_of(Point::new(1.5, -2.0, 3.25)));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod context;
mod error;
pub mod helper;
mod registry;
mod ser;
mod session;
pub mod tree;

pub use context::{IdGenerator, ReadCtx, WriteCtx};
pub use error::{Result, SessionError};
pub use registry::{Children, ReadFn, SerializerRegistry, WriteFn, default_registry};
pub use session::{
    FORMAT_VERSION, SessionReader, SessionWriter, TREE_ENTRY, read_session, write_session,
};

/// Crate version, for diagnostics.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
