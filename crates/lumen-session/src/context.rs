//! Shared state threaded through every type serializer call.

use std::sync::atomic::{AtomicU64, Ordering};

use lumen_zip::{ArchiveReader, ArchiveWriter, Compression};

use crate::error::Result;

static GLOBAL_IDS: AtomicU64 = AtomicU64::new(0);

/// Counter behind the synthetic ids the activity deserializer assigns
/// to contained objects.
///
/// The default draws from one process-global sequence so ids stay
/// unique across readers; tests install a local counter for
/// deterministic ids.
#[derive(Debug)]
pub enum IdGenerator {
    Global,
    Local(u64),
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::Global
    }
}

impl IdGenerator {
    /// A counter starting at `first`, independent of the global
    /// sequence.
    pub fn local(first: u64) -> Self {
        Self::Local(first)
    }

    fn next(&mut self) -> u64 {
        match self {
            Self::Global => GLOBAL_IDS.fetch_add(1, Ordering::Relaxed),
            Self::Local(next) => {
                let value = *next;
                *next += 1;
                value
            }
        }
    }
}

/// Write-side serializer context: the open archive plus the entry
/// options the session writer was configured with.
pub struct WriteCtx<'a> {
    archive: &'a mut ArchiveWriter,
    password: Option<&'a str>,
    compression: Compression,
    level: Option<i64>,
}

impl<'a> WriteCtx<'a> {
    pub(crate) fn new(
        archive: &'a mut ArchiveWriter,
        password: Option<&'a str>,
        compression: Compression,
        level: Option<i64>,
    ) -> Self {
        Self {
            archive,
            password,
            compression,
            level,
        }
    }

    /// Stores one binary side-file under `name`.
    pub fn write_blob(&mut self, name: &str, bytes: &[u8]) -> Result<()> {
        self.archive
            .write_entry(name, bytes, self.password, self.compression, self.level)?;
        Ok(())
    }
}

/// Read-side serializer context: the open archive, the password and
/// the synthetic-id counter.
pub struct ReadCtx<'a> {
    archive: &'a mut ArchiveReader,
    password: Option<&'a str>,
    ids: &'a mut IdGenerator,
}

impl<'a> ReadCtx<'a> {
    pub(crate) fn new(
        archive: &'a mut ArchiveReader,
        password: Option<&'a str>,
        ids: &'a mut IdGenerator,
    ) -> Self {
        Self {
            archive,
            password,
            ids,
        }
    }

    /// Reads one binary side-file into memory.
    pub fn read_blob(&mut self, name: &str) -> Result<Vec<u8>> {
        Ok(self.archive.read_entry(name, self.password)?)
    }

    pub fn has_blob(&self, name: &str) -> bool {
        self.archive.has_entry(name)
    }

    /// Next synthetic id for an object stored under `key` in its
    /// parent.
    pub fn next_id(&mut self, key: &str) -> String {
        format!("{key}_{}", self.ids.next())
    }
}
