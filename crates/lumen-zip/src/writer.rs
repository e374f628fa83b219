//! Archive writing: sequential named entries into a zip container or a
//! plain directory.

use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use zip::AesMode;
use zip::write::{SimpleFileOptions, ZipWriter};

use crate::entry_name::validate_entry_name;
use crate::error::{ArchiveError, Result};
use crate::format::{ArchiveFormat, Compression};

enum WriteBackend {
    Zip {
        writer: Option<ZipWriter<BufWriter<File>>>,
        temp_path: PathBuf,
        final_path: PathBuf,
    },
    Dir {
        root: PathBuf,
    },
}

/// Writes named entries into a session archive.
///
/// Entries are written strictly sequentially: at most one
/// [`EntryWriter`] may be open at a time, and a path may be opened for
/// writing only once. The zip backend streams into a temporary sibling
/// file and atomically renames it into place on [`ArchiveWriter::finish`],
/// so an interrupted write never leaves a truncated archive at the final
/// path.
pub struct ArchiveWriter {
    backend: WriteBackend,
    written: BTreeSet<String>,
}

impl ArchiveWriter {
    /// Creates the archive at `path` in the requested format, creating
    /// parent directories as needed.
    pub fn create(path: &Path, format: ArchiveFormat) -> Result<Self> {
        let backend = match format {
            ArchiveFormat::Zip => {
                if let Some(parent) = path.parent()
                    && !parent.as_os_str().is_empty()
                {
                    fs::create_dir_all(parent)
                        .map_err(|e| ArchiveError::io("create directory", parent, e))?;
                }
                let mut temp_name = path.as_os_str().to_owned();
                temp_name.push(".tmp");
                let temp_path = PathBuf::from(temp_name);
                let file = File::create(&temp_path)
                    .map_err(|e| ArchiveError::io("create archive", &temp_path, e))?;
                WriteBackend::Zip {
                    writer: Some(ZipWriter::new(BufWriter::new(file))),
                    temp_path,
                    final_path: path.to_path_buf(),
                }
            }
            ArchiveFormat::Filesystem => {
                fs::create_dir_all(path)
                    .map_err(|e| ArchiveError::io("create directory", path, e))?;
                WriteBackend::Dir {
                    root: path.to_path_buf(),
                }
            }
        };
        Ok(Self {
            backend,
            written: BTreeSet::new(),
        })
    }

    /// Opens the named entry for writing. The entry is sealed when the
    /// returned writer is finished or dropped.
    pub fn open_entry(
        &mut self,
        name: &str,
        password: Option<&str>,
        method: Compression,
        level: Option<i64>,
    ) -> Result<EntryWriter<'_>> {
        validate_entry_name(name)?;
        if !self.written.insert(name.to_string()) {
            return Err(ArchiveError::duplicate_entry(name));
        }
        match &mut self.backend {
            WriteBackend::Zip { writer, .. } => {
                let writer = writer
                    .as_mut()
                    .expect("archive writer used after finish");
                let mut options = SimpleFileOptions::default().compression_method(method.to_zip());
                if method == Compression::Deflated {
                    options = options.compression_level(level);
                }
                let options = match password {
                    Some(password) => options.with_aes_encryption(AesMode::Aes256, password),
                    None => options,
                };
                writer.start_file(name, options)?;
                Ok(EntryWriter {
                    sink: Sink::Zip(writer),
                    name: name.to_string(),
                })
            }
            WriteBackend::Dir { root } => {
                if password.is_some() {
                    return Err(ArchiveError::EncryptionUnsupported);
                }
                let file_path = root.join(name);
                if let Some(parent) = file_path.parent() {
                    fs::create_dir_all(parent)
                        .map_err(|e| ArchiveError::io("create directory", parent, e))?;
                }
                let file = File::create(&file_path)
                    .map_err(|e| ArchiveError::io("create entry", &file_path, e))?;
                Ok(EntryWriter {
                    sink: Sink::File(BufWriter::new(file)),
                    name: name.to_string(),
                })
            }
        }
    }

    /// Writes a complete entry in one call.
    pub fn write_entry(
        &mut self,
        name: &str,
        bytes: &[u8],
        password: Option<&str>,
        method: Compression,
        level: Option<i64>,
    ) -> Result<()> {
        let mut entry = self.open_entry(name, password, method, level)?;
        entry
            .write_all(bytes)
            .map_err(|e| ArchiveError::io("write entry", name, e))?;
        entry.finish()
    }

    /// Whether an entry with this name has been written.
    pub fn contains(&self, name: &str) -> bool {
        self.written.contains(name)
    }

    /// Seals the archive. For the zip backend this writes the central
    /// directory, syncs the temporary file and renames it into place.
    pub fn finish(mut self) -> Result<()> {
        match &mut self.backend {
            WriteBackend::Zip {
                writer,
                temp_path,
                final_path,
            } => {
                let writer = writer.take().expect("archive writer finished twice");
                let buffered = writer.finish()?;
                let file = buffered
                    .into_inner()
                    .map_err(|e| ArchiveError::io("flush archive", &*temp_path, e.into_error()))?;
                file.sync_all()
                    .map_err(|e| ArchiveError::io("sync archive", &*temp_path, e))?;
                drop(file);
                fs::rename(&*temp_path, &*final_path)
                    .map_err(|e| ArchiveError::io("rename archive", &*final_path, e))?;
                tracing::debug!(
                    "Sealed {} with {} entries",
                    final_path.display(),
                    self.written.len()
                );
            }
            WriteBackend::Dir { .. } => {}
        }
        Ok(())
    }
}

impl Drop for ArchiveWriter {
    fn drop(&mut self) {
        // An unfinished zip archive must not survive as a stray temp file.
        if let WriteBackend::Zip {
            writer, temp_path, ..
        } = &mut self.backend
            && writer.take().is_some()
        {
            let _ = fs::remove_file(&*temp_path);
        }
    }
}

#[derive(Debug)]
enum Sink<'a> {
    Zip(&'a mut ZipWriter<BufWriter<File>>),
    File(BufWriter<File>),
}

/// An open archive entry. Bytes written here append to that entry.
#[derive(Debug)]
pub struct EntryWriter<'a> {
    sink: Sink<'a>,
    name: String,
}

impl EntryWriter<'_> {
    /// Flushes and seals the entry, surfacing errors that a plain drop
    /// would swallow.
    pub fn finish(mut self) -> Result<()> {
        let name = std::mem::take(&mut self.name);
        self.flush()
            .map_err(|e| ArchiveError::io("flush entry", name, e))
    }
}

impl Write for EntryWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &mut self.sink {
            Sink::Zip(writer) => writer.write(buf),
            Sink::File(writer) => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.sink {
            Sink::Zip(writer) => writer.flush(),
            Sink::File(writer) => writer.flush(),
        }
    }
}
