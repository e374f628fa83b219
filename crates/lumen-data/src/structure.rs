//! Anatomical structure traits and their dictionary.

use indexmap::IndexMap;

use crate::geometry::Color;
use crate::shared::Shared;

/// Broad class of a structure. Integer values are part of the on-disk
/// format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StructureClass {
    Tool,
    Environment,
    Vessel,
    Lesion,
    Organ,
    Functional,
    #[default]
    NoConstraint,
}

impl StructureClass {
    pub fn as_int(self) -> i64 {
        match self {
            Self::Tool => 0,
            Self::Environment => 1,
            Self::Vessel => 2,
            Self::Lesion => 3,
            Self::Organ => 4,
            Self::Functional => 5,
            Self::NoConstraint => 6,
        }
    }

    pub fn from_int(value: i64) -> Option<Self> {
        match value {
            0 => Some(Self::Tool),
            1 => Some(Self::Environment),
            2 => Some(Self::Vessel),
            3 => Some(Self::Lesion),
            4 => Some(Self::Organ),
            5 => Some(Self::Functional),
            6 => Some(Self::NoConstraint),
            _ => None,
        }
    }
}

/// Body region a structure belongs to. Integer values are part of the
/// on-disk format.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StructureCategory {
    Body,
    Head,
    Neck,
    Thorax,
    Abdomen,
    Pelvis,
    Arm,
    Leg,
    LiverSegments,
    Other,
}

impl StructureCategory {
    pub fn as_int(self) -> i64 {
        match self {
            Self::Body => 0,
            Self::Head => 1,
            Self::Neck => 2,
            Self::Thorax => 3,
            Self::Abdomen => 4,
            Self::Pelvis => 5,
            Self::Arm => 6,
            Self::Leg => 7,
            Self::LiverSegments => 8,
            Self::Other => 9,
        }
    }

    pub fn from_int(value: i64) -> Option<Self> {
        match value {
            0 => Some(Self::Body),
            1 => Some(Self::Head),
            2 => Some(Self::Neck),
            3 => Some(Self::Thorax),
            4 => Some(Self::Abdomen),
            5 => Some(Self::Pelvis),
            6 => Some(Self::Arm),
            7 => Some(Self::Leg),
            8 => Some(Self::LiverSegments),
            9 => Some(Self::Other),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct StructureTraits {
    pub type_name: String,
    pub class: StructureClass,
    pub categories: Vec<StructureCategory>,
    pub native_exp: String,
    pub native_geometric_exp: String,
    pub attachment_type: String,
    pub anatomic_region: String,
    pub property_category: String,
    pub property_type: String,
    pub color: Shared<Color>,
}

/// Structure traits indexed by type name, in insertion order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StructureTraitsDictionary {
    pub traits: IndexMap<String, Shared<StructureTraits>>,
}

impl StructureTraitsDictionary {
    pub fn insert(&mut self, traits: Shared<StructureTraits>) {
        let name = traits.read().type_name.clone();
        self.traits.insert(name, traits);
    }

    pub fn get(&self, type_name: &str) -> Option<&Shared<StructureTraits>> {
        self.traits.get(type_name)
    }
}
