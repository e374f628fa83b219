//! Write and read orchestration over a whole object graph.
//!
//! The writer walks the graph depth-first, serializing every instance
//! exactly once: the first visit emits a full node and recurses into the
//! children its serializer reported; later visits emit a reference node
//! naming the UUID only. The reader walks the archived tree children
//! first, resolving references through a UUID cache so two parents
//! naming the same UUID share one reconstructed instance, and turning a
//! reference to a node still under construction into a
//! [`SessionError::CircularReference`].

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use chrono::Utc;
use lumen_data::{Fields, Object};
use lumen_zip::{ArchiveFormat, ArchiveReader, ArchiveWriter, Compression};
use serde_json::Value;

use crate::context::{IdGenerator, ReadCtx, WriteCtx};
use crate::error::{Result, SessionError};
use crate::registry::{Children, ReadFn, SerializerRegistry, WriteFn, default_registry};
use crate::tree::{self, Node};

/// Envelope format version; readers refuse anything newer.
pub const FORMAT_VERSION: u64 = 1;

/// Name of the structured-tree entry inside the archive.
pub const TREE_ENTRY: &str = "root.json";

/// Serializes an object graph into a session archive.
#[derive(Clone)]
pub struct SessionWriter {
    registry: SerializerRegistry,
    password: Option<String>,
    format: ArchiveFormat,
    compression: Compression,
    level: Option<i64>,
}

impl Default for SessionWriter {
    fn default() -> Self {
        Self {
            registry: default_registry().clone(),
            password: None,
            format: ArchiveFormat::default(),
            compression: Compression::default(),
            level: None,
        }
    }
}

impl SessionWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Encrypts every archive entry, including the tree itself.
    pub fn set_password(&mut self, password: impl Into<String>) -> &mut Self {
        self.password = Some(password.into());
        self
    }

    pub fn set_archive_format(&mut self, format: ArchiveFormat) -> &mut Self {
        self.format = format;
        self
    }

    pub fn set_compression(&mut self, method: Compression, level: Option<i64>) -> &mut Self {
        self.compression = method;
        self.level = level;
        self
    }

    /// Replaces the write half for one classname.
    pub fn set_serializer(&mut self, classname: &str, write: WriteFn) -> &mut Self {
        self.registry.set_serializer(classname, write);
        self
    }

    pub fn serializer(&self, classname: &str) -> Option<WriteFn> {
        self.registry.serializer(classname)
    }

    /// Writes `object` and everything reachable from it to a fresh
    /// archive at `path`.
    pub fn write(&self, path: &Path, object: &Object) -> Result<()> {
        let mut archive = ArchiveWriter::create(path, self.format)?;
        let mut ctx = WriteCtx::new(
            &mut archive,
            self.password.as_deref(),
            self.compression,
            self.level,
        );
        let mut visited = BTreeSet::new();
        let root = write_node(&mut ctx, &self.registry, &mut visited, object)?;

        let mut envelope = Node::new();
        envelope.insert("version".to_owned(), Value::from(FORMAT_VERSION));
        envelope.insert("saved".to_owned(), Value::from(Utc::now().to_rfc3339()));
        envelope.insert("root".to_owned(), root);
        let bytes = serde_json::to_vec_pretty(&envelope)?;
        ctx.write_blob(TREE_ENTRY, &bytes)?;

        archive.finish()?;
        tracing::info!(path = %path.display(), objects = visited.len(), "session saved");
        Ok(())
    }
}

/// Writes `object` to `path` with default options.
pub fn write_session(path: &Path, object: &Object) -> Result<()> {
    SessionWriter::new().write(path, object)
}

fn write_node(
    ctx: &mut WriteCtx<'_>,
    registry: &SerializerRegistry,
    visited: &mut BTreeSet<String>,
    object: &Object,
) -> Result<Value> {
    let uuid = object.uuid();
    let classname = object.classname();
    let mut body = Node::new();
    body.insert("uuid".to_owned(), Value::from(uuid.clone()));

    // A later visit emits only the reference.
    if !visited.insert(uuid) {
        let mut reference = Node::new();
        reference.insert(classname.to_owned(), Value::Object(body));
        return Ok(Value::Object(reference));
    }

    let mut children = Children::new();
    registry.dispatch_write(ctx, &mut body, object, &mut children)?;
    if !children.is_empty() {
        let mut entries = Node::new();
        for (key, child) in &children {
            entries.insert(key.clone(), write_node(ctx, registry, visited, child)?);
        }
        body.insert("children".to_owned(), Value::Object(entries));
    }

    let fields = object.fields();
    if !fields.is_empty() {
        let mut entries = Node::new();
        for (key, field) in &fields {
            entries.insert(key.clone(), write_node(ctx, registry, visited, field)?);
        }
        body.insert("fields".to_owned(), Value::Object(entries));
    }

    let description = object.description();
    if !description.is_empty() {
        body.insert("description".to_owned(), Value::from(description));
    }

    let mut node = Node::new();
    node.insert(classname.to_owned(), Value::Object(body));
    Ok(Value::Object(node))
}

/// Reconstructs an object graph from a session archive.
pub struct SessionReader {
    registry: SerializerRegistry,
    password: Option<String>,
    ids: IdGenerator,
}

impl Default for SessionReader {
    fn default() -> Self {
        Self {
            registry: default_registry().clone(),
            password: None,
            ids: IdGenerator::default(),
        }
    }
}

impl SessionReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_password(&mut self, password: impl Into<String>) -> &mut Self {
        self.password = Some(password.into());
        self
    }

    /// Replaces the synthetic-id counter, which is process-global by
    /// default.
    pub fn set_id_generator(&mut self, ids: IdGenerator) -> &mut Self {
        self.ids = ids;
        self
    }

    /// Replaces the read half for one classname.
    pub fn set_deserializer(&mut self, classname: &str, read: ReadFn) -> &mut Self {
        self.registry.set_deserializer(classname, read);
        self
    }

    pub fn deserializer(&self, classname: &str) -> Option<ReadFn> {
        self.registry.deserializer(classname)
    }

    /// Reads the root object of the archive at `path`.
    pub fn read(&mut self, path: &Path) -> Result<Object> {
        self.read_with(path, None)
    }

    /// Reads the archive at `path` into an existing destination object,
    /// which must be of the root's concrete type.
    pub fn read_into(&mut self, path: &Path, destination: &Object) -> Result<()> {
        self.read_with(path, Some(destination))?;
        Ok(())
    }

    fn read_with(&mut self, path: &Path, destination: Option<&Object>) -> Result<Object> {
        let mut archive = ArchiveReader::open(path)?;
        let mut ctx = ReadCtx::new(&mut archive, self.password.as_deref(), &mut self.ids);
        let bytes = ctx.read_blob(TREE_ENTRY)?;
        let envelope: Value = serde_json::from_slice(&bytes)?;
        let envelope = envelope
            .as_object()
            .ok_or_else(|| SessionError::malformed("envelope is not an object"))?;
        let version = envelope
            .get("version")
            .and_then(Value::as_u64)
            .ok_or_else(|| SessionError::malformed("envelope without a format version"))?;
        if version > FORMAT_VERSION {
            return Err(SessionError::UnsupportedFormat {
                found: version,
                max_supported: FORMAT_VERSION,
            });
        }
        let root = envelope
            .get("root")
            .ok_or_else(|| SessionError::malformed("envelope without a root node"))?;

        let mut cache = BTreeMap::new();
        let mut in_progress = BTreeSet::new();
        let object = read_node(
            &mut ctx,
            &self.registry,
            &mut cache,
            &mut in_progress,
            root,
            destination,
        )?;
        tracing::info!(path = %path.display(), objects = cache.len(), "session loaded");
        Ok(object)
    }
}

/// Reads the root object from `path` with default options.
pub fn read_session(path: &Path) -> Result<Object> {
    SessionReader::new().read(path)
}

fn read_node(
    ctx: &mut ReadCtx<'_>,
    registry: &SerializerRegistry,
    cache: &mut BTreeMap<String, Object>,
    in_progress: &mut BTreeSet<String>,
    value: &Value,
    destination: Option<&Object>,
) -> Result<Object> {
    let wrapper = value
        .as_object()
        .ok_or_else(|| SessionError::malformed("node is not an object"))?;
    let (classname, body) = match wrapper.iter().next() {
        Some((classname, body)) if wrapper.len() == 1 => (classname.as_str(), body),
        _ => {
            return Err(SessionError::malformed(
                "node must hold exactly one classname key",
            ));
        }
    };
    let body = body
        .as_object()
        .ok_or_else(|| SessionError::malformed(format!("'{classname}' body is not an object")))?;
    let uuid = tree::node_uuid(body)?.to_owned();

    // Whatever the node's shape, a UUID already realized resolves to the
    // shared instance.
    if let Some(existing) = cache.get(&uuid) {
        return Ok(existing.clone());
    }

    // A body holding nothing but the UUID is a reference node. Its
    // target not being in the cache means it is either still being
    // built (a genuine dependency cycle) or absent from the tree.
    if body.len() == 1 {
        return Err(if in_progress.contains(&uuid) {
            SessionError::circular_reference(&uuid)
        } else {
            SessionError::malformed(format!("reference to unknown object '{uuid}'"))
        });
    }

    in_progress.insert(uuid.clone());

    // Children first, so the serializer sees fully built instances.
    let mut children = Children::new();
    if let Some(value) = body.get("children") {
        let entries = value
            .as_object()
            .ok_or_else(|| SessionError::malformed("'children' is not an object"))?;
        for (key, child) in entries {
            children.insert(
                key.clone(),
                read_node(ctx, registry, cache, in_progress, child, None)?,
            );
        }
    }

    let object = registry.dispatch_read(classname, ctx, body, &children, destination)?;
    object.set_uuid(&uuid);

    let mut fields = Fields::new();
    if let Some(value) = body.get("fields") {
        let entries = value
            .as_object()
            .ok_or_else(|| SessionError::malformed("'fields' is not an object"))?;
        for (key, field) in entries {
            fields.insert(
                key.clone(),
                read_node(ctx, registry, cache, in_progress, field, None)?,
            );
        }
    }
    object.set_fields(fields);

    let description = match body.get("description") {
        None => "",
        Some(value) => value
            .as_str()
            .ok_or_else(|| SessionError::malformed("'description' is not a string"))?,
    };
    object.set_description(description);

    in_progress.remove(&uuid);
    cache.insert(uuid, object.clone());
    Ok(object)
}
