//! Shared object handles and the metadata every data object carries.

use std::fmt;
use std::sync::{Arc, OnceLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use indexmap::IndexMap;
use uuid::Uuid;

use crate::object::Object;

/// Named auxiliary objects attached to a data object, in insertion order.
pub type Fields = IndexMap<String, Object>;

#[derive(Debug, Default, Clone)]
struct Meta {
    description: String,
    id: Option<String>,
    fields: Fields,
}

struct Inner<T> {
    uuid: OnceLock<String>,
    meta: RwLock<Meta>,
    value: RwLock<T>,
}

/// A shared, mutable handle to a concrete data object.
///
/// Handles are cheap to clone; every clone refers to the same value,
/// metadata and identity. Objects form a directed graph through handles:
/// the same instance may be held by several parents, and its lifetime is
/// the union of all holders' lifetimes.
///
/// The UUID is established lazily: an object that is never serialized
/// never pays for one. Once assigned (either lazily or through
/// [`Shared::set_uuid`]) the identity is immutable.
pub struct Shared<T>(Arc<Inner<T>>);

impl<T> Shared<T> {
    pub fn new(value: T) -> Self {
        Self(Arc::new(Inner {
            uuid: OnceLock::new(),
            meta: RwLock::new(Meta::default()),
            value: RwLock::new(value),
        }))
    }

    /// Locks the value for reading. A poisoned lock is recovered rather
    /// than propagated; the serializer never leaves values half-written.
    pub fn read(&self) -> RwLockReadGuard<'_, T> {
        self.0.value.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Locks the value for writing.
    pub fn write(&self) -> RwLockWriteGuard<'_, T> {
        self.0.value.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Whether two handles refer to the same underlying instance.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Returns the object's UUID, generating and pinning one on first use.
    pub fn uuid(&self) -> String {
        self.0
            .uuid
            .get_or_init(|| Uuid::new_v4().to_string())
            .clone()
    }

    /// The UUID if one has been established, without generating one.
    pub fn existing_uuid(&self) -> Option<&str> {
        self.0.uuid.get().map(String::as_str)
    }

    /// Pins a specific UUID. The first assignment wins; later calls on an
    /// object that already has an identity are ignored.
    pub fn set_uuid(&self, uuid: impl Into<String>) {
        let _ = self.0.uuid.set(uuid.into());
    }

    fn meta(&self) -> RwLockReadGuard<'_, Meta> {
        self.0.meta.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn meta_mut(&self) -> RwLockWriteGuard<'_, Meta> {
        self.0.meta.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn description(&self) -> String {
        self.meta().description.clone()
    }

    pub fn set_description(&self, description: impl Into<String>) {
        self.meta_mut().description = description.into();
    }

    /// User-facing identifier, distinct from the UUID. Not persisted; the
    /// session reader assigns synthetic ones to activity content.
    pub fn id(&self) -> Option<String> {
        self.meta().id.clone()
    }

    pub fn set_id(&self, id: impl Into<String>) {
        self.meta_mut().id = Some(id.into());
    }

    pub fn field(&self, name: &str) -> Option<Object> {
        self.meta().fields.get(name).cloned()
    }

    pub fn set_field(&self, name: impl Into<String>, object: Object) {
        self.meta_mut().fields.insert(name.into(), object);
    }

    pub fn fields(&self) -> Fields {
        self.meta().fields.clone()
    }

    pub fn set_fields(&self, fields: Fields) {
        self.meta_mut().fields = fields;
    }
}

impl<T> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T: Default> Default for Shared<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Shared<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shared")
            .field("uuid", &self.0.uuid.get())
            .field("value", &*self.read())
            .finish()
    }
}

/// Aliasing-or-deep equality: two handles to the same instance are always
/// equal; otherwise the values, descriptions and fields must match. The
/// user-facing id is deliberately excluded, since the reader synthesizes
/// fresh ones on every load.
impl<T: PartialEq> PartialEq for Shared<T> {
    fn eq(&self, other: &Self) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        let (lhs, rhs) = (self.meta(), other.meta());
        if lhs.description != rhs.description || lhs.fields != rhs.fields {
            return false;
        }
        drop((lhs, rhs));
        *self.read() == *other.read()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::Integer;

    #[test]
    fn uuid_is_lazy_and_stable() {
        let handle = Shared::new(Integer::new(3));
        assert!(handle.existing_uuid().is_none());
        let first = handle.uuid();
        assert_eq!(handle.uuid(), first);
        assert_eq!(handle.existing_uuid(), Some(first.as_str()));
    }

    #[test]
    fn set_uuid_first_assignment_wins() {
        let handle = Shared::new(Integer::new(3));
        handle.set_uuid("fixed");
        handle.set_uuid("ignored");
        assert_eq!(handle.uuid(), "fixed");
    }

    #[test]
    fn clones_alias_the_same_value() {
        let handle = Shared::new(Integer::new(1));
        let alias = handle.clone();
        alias.write().value = 7;
        assert_eq!(handle.read().value, 7);
        assert!(handle.ptr_eq(&alias));
    }

    #[test]
    fn equality_ignores_the_synthetic_id() {
        let a = Shared::new(Integer::new(5));
        let b = Shared::new(Integer::new(5));
        a.set_id("loaded_0");
        assert_eq!(a, b);
        b.set_description("annotated");
        assert_ne!(a, b);
    }
}
