//! Session archive container: named byte entries in a zip file or a
//! plain directory, with optional per-entry AES-256 password protection.
//!
//! The writer enforces the container's usage contract: entry names are
//! validated, every path is written at most once, and the zip backend
//! becomes visible at its final path only after a successful
//! [`ArchiveWriter::finish`].
//!
//! # Example
//!
//! ```no_run
//! use lumen_zip::{ArchiveFormat, ArchiveReader, ArchiveWriter, Compression};
//!
//! # fn main() -> lumen_zip::Result<()> {
//! let path = std::path::Path::new("session.lis");
//! let mut writer = ArchiveWriter::create(path, ArchiveFormat::Zip)?;
//! writer.write_entry("root.json", b"{}", Some("secret"), Compression::Deflated, Some(6))?;
//! writer.finish()?;
//!
//! let mut reader = ArchiveReader::open(path)?;
//! let tree = reader.read_entry("root.json", Some("secret"))?;
//! # assert_eq!(tree, b"{}");
//! # Ok(())
//! # }
//! ```

mod entry_name;
mod error;
mod format;
mod reader;
mod writer;

pub use error::{ArchiveError, Result};
pub use format::{ArchiveFormat, Compression};
pub use reader::ArchiveReader;
pub use writer::{ArchiveWriter, EntryWriter};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
