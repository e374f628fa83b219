//! Casting and child-lookup helpers shared by the type serializers.

use lumen_data::{Concrete, Object, Shared};

use crate::error::{Result, SessionError};
use crate::registry::Children;

/// Extracts the typed handle a serializer expects.
pub fn safe_cast<T: Concrete>(object: &Object) -> Result<Shared<T>> {
    T::from_object(object)
        .ok_or_else(|| SessionError::type_mismatch(T::CLASSNAME, object.classname()))
}

/// The handle a deserializer populates: the supplied destination when
/// its type matches, a fresh default when none was given.
pub fn cast_or_create<T: Concrete + Default>(destination: Option<&Object>) -> Result<Shared<T>> {
    match destination {
        None => Ok(Shared::new(T::default())),
        Some(object) => safe_cast(object),
    }
}

/// A required child.
pub fn child<'a>(children: &'a Children, key: &str) -> Result<&'a Object> {
    children
        .get(key)
        .ok_or_else(|| SessionError::missing_child(key))
}

/// A required child with its concrete type checked.
pub fn child_cast<T: Concrete>(children: &Children, key: &str) -> Result<Shared<T>> {
    safe_cast(child(children, key)?)
}

/// An optional child with its concrete type checked when present.
pub fn optional_child_cast<T: Concrete>(
    children: &Children,
    key: &str,
) -> Result<Option<Shared<T>>> {
    children.get(key).map(safe_cast).transpose()
}

/// Collects `prefix0, prefix1, …` in index order, stopping at the
/// first missing index. A gap truncates the sequence.
pub fn indexed_children<'a>(children: &'a Children, prefix: &str) -> Vec<&'a Object> {
    let mut found = Vec::new();
    for index in 0.. {
        match children.get(&format!("{prefix}{index}")) {
            Some(object) => found.push(object),
            None => break,
        }
    }
    found
}

/// Indexed lookup with every element's concrete type checked.
pub fn indexed_children_cast<T: Concrete>(
    children: &Children,
    prefix: &str,
) -> Result<Vec<Shared<T>>> {
    indexed_children(children, prefix)
        .into_iter()
        .map(safe_cast)
        .collect()
}

/// Announces a child under `prefixN`.
pub fn insert_indexed(children: &mut Children, prefix: &str, index: usize, object: Object) {
    children.insert(format!("{prefix}{index}"), object);
}

/// Maps a persisted integer through a type's enum table.
pub fn enum_from_int<T>(field: &'static str, value: i64, table: fn(i64) -> Option<T>) -> Result<T> {
    table(value).ok_or_else(|| SessionError::unknown_enum(field, value))
}
