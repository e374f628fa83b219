//! Archive reading with format auto-detection.

use std::fs::{self, File};
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use zip::ZipArchive;
use zip::result::ZipError;

use crate::entry_name::validate_entry_name;
use crate::error::{ArchiveError, Result};

enum ReadBackend {
    Zip(Box<ZipArchive<BufReader<File>>>),
    Dir(PathBuf),
}

/// Reads named entries from a session archive, accepting both the zip
/// container and the plain-directory layout.
pub struct ArchiveReader {
    backend: ReadBackend,
}

impl ArchiveReader {
    /// Opens `path`, detecting the format from what is on disk: a
    /// directory is the filesystem layout, anything else a zip file.
    pub fn open(path: &Path) -> Result<Self> {
        let metadata =
            fs::metadata(path).map_err(|e| ArchiveError::io("open archive", path, e))?;
        let backend = if metadata.is_dir() {
            tracing::debug!("Opening {} as a directory archive", path.display());
            ReadBackend::Dir(path.to_path_buf())
        } else {
            tracing::debug!("Opening {} as a zip archive", path.display());
            let file = File::open(path).map_err(|e| ArchiveError::io("open archive", path, e))?;
            ReadBackend::Zip(Box::new(ZipArchive::new(BufReader::new(file))?))
        };
        Ok(Self { backend })
    }

    /// Whether the archive contains the named entry.
    pub fn has_entry(&self, name: &str) -> bool {
        match &self.backend {
            ReadBackend::Zip(archive) => archive.index_for_name(name).is_some(),
            ReadBackend::Dir(root) => root.join(name).is_file(),
        }
    }

    /// Reads a complete entry into memory. A password is required only
    /// for encrypted zip entries; the directory layout ignores it.
    pub fn read_entry(&mut self, name: &str, password: Option<&str>) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.open_entry(name, password)?
            .read_to_end(&mut bytes)
            .map_err(|e| ArchiveError::io("read entry", name, e))?;
        Ok(bytes)
    }

    /// Opens a streaming reader over the named entry.
    pub fn open_entry(&mut self, name: &str, password: Option<&str>) -> Result<Box<dyn Read + '_>> {
        validate_entry_name(name)?;
        match &mut self.backend {
            ReadBackend::Zip(archive) => {
                let entry = match password {
                    Some(password) => archive.by_name_decrypt(name, password.as_bytes()),
                    None => archive.by_name(name),
                }
                .map_err(|e| map_zip_error(name, e))?;
                Ok(Box::new(entry))
            }
            ReadBackend::Dir(root) => {
                let file_path = root.join(name);
                let file = File::open(&file_path).map_err(|e| {
                    if e.kind() == std::io::ErrorKind::NotFound {
                        ArchiveError::entry_not_found(name)
                    } else {
                        ArchiveError::io("open entry", &file_path, e)
                    }
                })?;
                Ok(Box::new(BufReader::new(file)))
            }
        }
    }

    /// All entry names, sorted. Directory layouts are walked recursively.
    pub fn entry_names(&self) -> Vec<String> {
        let mut names = match &self.backend {
            ReadBackend::Zip(archive) => archive.file_names().map(str::to_string).collect(),
            ReadBackend::Dir(root) => {
                let mut collected = Vec::new();
                collect_files(root, root, &mut collected);
                collected
            }
        };
        names.sort();
        names
    }
}

fn map_zip_error(name: &str, error: ZipError) -> ArchiveError {
    match error {
        ZipError::FileNotFound => ArchiveError::entry_not_found(name),
        ZipError::InvalidPassword => ArchiveError::wrong_password(name),
        other => ArchiveError::Zip(other),
    }
}

fn collect_files(root: &Path, dir: &Path, out: &mut Vec<String>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_files(root, &path, out);
        } else if let Ok(relative) = path.strip_prefix(root) {
            out.push(relative.to_string_lossy().replace('\\', "/"));
        }
    }
}
