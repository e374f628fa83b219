//! Activities: named bundles of objects driving an application workflow.

use indexmap::IndexMap;

use crate::object::Object;
use crate::shared::Shared;

/// A keyed set of objects plus the identifier of the workflow
/// configuration that consumes them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Activity {
    pub activity_config_id: String,
    pub data: IndexMap<String, Object>,
}

impl Activity {
    pub fn insert(&mut self, key: impl Into<String>, object: Object) {
        self.data.insert(key.into(), object);
    }

    pub fn get(&self, key: &str) -> Option<&Object> {
        self.data.get(key)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// An ordered collection of activities.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ActivitySet {
    pub activities: Vec<Shared<Activity>>,
}
