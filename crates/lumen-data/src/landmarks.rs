//! Named groups of annotated 3-D landmarks.

use indexmap::IndexMap;

/// Glyph drawn for every point of a group. Integer values are part of
/// the on-disk format; anything outside the table is rejected on read.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LandmarkShape {
    Cube,
    #[default]
    Sphere,
}

impl LandmarkShape {
    pub fn as_int(self) -> i64 {
        match self {
            Self::Cube => 0,
            Self::Sphere => 1,
        }
    }

    pub fn from_int(value: i64) -> Option<Self> {
        match value {
            0 => Some(Self::Cube),
            1 => Some(Self::Sphere),
            _ => None,
        }
    }
}

/// One group: display style plus its ordered points.
#[derive(Clone, Debug, PartialEq)]
pub struct LandmarksGroup {
    pub color: [f64; 4],
    pub size: f64,
    pub shape: LandmarkShape,
    pub visibility: bool,
    pub points: Vec<[f64; 3]>,
}

impl Default for LandmarksGroup {
    fn default() -> Self {
        Self {
            color: [1.0; 4],
            size: 1.0,
            shape: LandmarkShape::Sphere,
            visibility: true,
            points: Vec::new(),
        }
    }
}

/// All landmark groups of a scene, keyed by group name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Landmarks {
    pub groups: IndexMap<String, LandmarksGroup>,
}

impl Landmarks {
    pub fn add_group(&mut self, name: impl Into<String>, group: LandmarksGroup) {
        self.groups.insert(name.into(), group);
    }

    pub fn group(&self, name: &str) -> Option<&LandmarksGroup> {
        self.groups.get(name)
    }

    /// Appends a point to an existing group. Returns whether the group
    /// exists.
    pub fn add_point(&mut self, name: &str, point: [f64; 3]) -> bool {
        match self.groups.get_mut(name) {
            Some(group) => {
                group.points.push(point);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_land_in_their_group() {
        let mut landmarks = Landmarks::default();
        landmarks.add_group("tumor", LandmarksGroup::default());
        assert!(landmarks.add_point("tumor", [1.0, 2.0, 3.0]));
        assert!(!landmarks.add_point("missing", [0.0, 0.0, 0.0]));
        assert_eq!(landmarks.group("tumor").unwrap().points.len(), 1);
    }
}
