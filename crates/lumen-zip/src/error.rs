//! Archive error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the archive container layer.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// The named entry does not exist in the archive.
    #[error("archive entry '{name}' was not found")]
    EntryNotFound { name: String },

    /// The same entry path was opened for writing twice. Entries are
    /// written exactly once; a second open is a usage error, not a
    /// last-write-wins overwrite.
    #[error("archive entry '{name}' was already written")]
    DuplicateEntry { name: String },

    /// The entry name is empty, absolute, backslashed or traverses
    /// upward out of the archive.
    #[error("invalid archive entry name '{name}': {reason}")]
    InvalidEntryName { name: String, reason: &'static str },

    /// The entry is encrypted and the supplied password does not match.
    #[error("wrong password for archive entry '{name}'")]
    WrongPassword { name: String },

    /// The directory-backed format stores plain files and cannot honor a
    /// password.
    #[error("the filesystem archive format does not support encryption")]
    EncryptionUnsupported,

    /// An underlying filesystem operation failed.
    #[error("failed to {operation} '{path}': {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An error from the zip container itself.
    #[error(transparent)]
    Zip(#[from] zip::result::ZipError),
}

impl ArchiveError {
    pub fn entry_not_found(name: impl Into<String>) -> Self {
        Self::EntryNotFound { name: name.into() }
    }

    pub fn duplicate_entry(name: impl Into<String>) -> Self {
        Self::DuplicateEntry { name: name.into() }
    }

    pub fn invalid_entry_name(name: impl Into<String>, reason: &'static str) -> Self {
        Self::InvalidEntryName {
            name: name.into(),
            reason,
        }
    }

    pub fn wrong_password(name: impl Into<String>) -> Self {
        Self::WrongPassword { name: name.into() }
    }

    pub fn io(operation: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }
}

/// Convenience alias for archive results.
pub type Result<T> = std::result::Result<T, ArchiveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_entry() {
        let err = ArchiveError::entry_not_found("a/b.raw");
        assert_eq!(err.to_string(), "archive entry 'a/b.raw' was not found");

        let err = ArchiveError::invalid_entry_name("/abs", "entry names must be relative");
        assert!(err.to_string().contains("/abs"));
        assert!(err.to_string().contains("relative"));
    }
}
