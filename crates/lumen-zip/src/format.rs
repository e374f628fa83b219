//! Archive container formats and per-entry compression settings.

/// On-disk layout of a session archive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ArchiveFormat {
    /// A single zip container. Supports per-entry AES-256 encryption.
    #[default]
    Zip,
    /// The same entries laid out as plain files under a directory.
    /// Human-inspectable; no encryption.
    Filesystem,
}

impl ArchiveFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Zip => "zip",
            Self::Filesystem => "filesystem",
        }
    }
}

/// Compression method for one archive entry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Compression {
    Stored,
    #[default]
    Deflated,
}

impl Compression {
    pub(crate) fn to_zip(self) -> zip::CompressionMethod {
        match self {
            Self::Stored => zip::CompressionMethod::Stored,
            Self::Deflated => zip::CompressionMethod::Deflated,
        }
    }
}
