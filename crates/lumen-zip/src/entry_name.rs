//! Entry name validation shared by the writer and reader.

use std::path::{Component, Path};

use crate::error::{ArchiveError, Result};

/// Rejects entry names that could escape the archive root or that depend
/// on platform path separators.
pub(crate) fn validate_entry_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(ArchiveError::invalid_entry_name(
            name,
            "entry names must not be empty",
        ));
    }
    if name.contains('\\') {
        return Err(ArchiveError::invalid_entry_name(
            name,
            "entry names must use forward slashes",
        ));
    }
    let path = Path::new(name);
    if path.is_absolute() {
        return Err(ArchiveError::invalid_entry_name(
            name,
            "entry names must be relative",
        ));
    }
    if path
        .components()
        .any(|component| matches!(component, Component::ParentDir))
    {
        return Err(ArchiveError::invalid_entry_name(
            name,
            "entry names must not traverse upward",
        ));
    }
    Ok(())
}
