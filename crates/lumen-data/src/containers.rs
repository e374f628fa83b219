//! Generic object containers: vector, set and map.

use indexmap::IndexMap;

use crate::object::Object;

/// An ordered, index-addressed collection of objects.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Vector {
    pub objects: Vec<Object>,
}

impl Vector {
    pub fn push(&mut self, object: Object) {
        self.objects.push(object);
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

/// An ordered collection with at most one occurrence of each instance.
/// Uniqueness is by handle identity, not by value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Set {
    objects: Vec<Object>,
}

impl Set {
    /// Inserts at the back unless the same instance is already present.
    /// Returns whether the object was inserted.
    pub fn insert(&mut self, object: Object) -> bool {
        if self.contains(&object) {
            return false;
        }
        self.objects.push(object);
        true
    }

    pub fn contains(&self, object: &Object) -> bool {
        self.objects.iter().any(|held| held.ptr_eq(object))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Object> {
        self.objects.iter()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn clear(&mut self) {
        self.objects.clear();
    }
}

/// A string-keyed collection of objects, in insertion order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Map {
    pub objects: IndexMap<String, Object>,
}

impl Map {
    pub fn insert(&mut self, key: impl Into<String>, object: Object) {
        self.objects.insert(key.into(), object);
    }

    pub fn get(&self, key: &str) -> Option<&Object> {
        self.objects.get(key)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
