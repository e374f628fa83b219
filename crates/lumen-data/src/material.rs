//! Rendering material attached to reconstructions.

use crate::geometry::Color;
use crate::image::Image;
use crate::shared::Shared;

/// Shading model. Integer values are part of the on-disk format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Shading {
    Ambient,
    Flat,
    #[default]
    Phong,
}

impl Shading {
    pub fn as_int(self) -> i64 {
        match self {
            Self::Ambient => 0,
            Self::Flat => 1,
            Self::Phong => 2,
        }
    }

    pub fn from_int(value: i64) -> Option<Self> {
        match value {
            0 => Some(Self::Ambient),
            1 => Some(Self::Flat),
            2 => Some(Self::Phong),
            _ => None,
        }
    }
}

/// Geometry representation mode. The integer values mirror the rendering
/// backend's flags and are part of the on-disk format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Representation {
    #[default]
    Surface,
    Point,
    Wireframe,
    Edge,
}

impl Representation {
    pub fn as_int(self) -> i64 {
        match self {
            Self::Surface => 1,
            Self::Point => 2,
            Self::Wireframe => 4,
            Self::Edge => 5,
        }
    }

    pub fn from_int(value: i64) -> Option<Self> {
        match value {
            1 => Some(Self::Surface),
            2 => Some(Self::Point),
            4 => Some(Self::Wireframe),
            5 => Some(Self::Edge),
            _ => None,
        }
    }
}

/// Normal-display option. Integer values are part of the on-disk format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OptionsMode {
    #[default]
    Standard,
    Normals,
    CellsNormals,
}

impl OptionsMode {
    pub fn as_int(self) -> i64 {
        match self {
            Self::Standard => 1,
            Self::Normals => 2,
            Self::CellsNormals => 3,
        }
    }

    pub fn from_int(value: i64) -> Option<Self> {
        match value {
            1 => Some(Self::Standard),
            2 => Some(Self::Normals),
            3 => Some(Self::CellsNormals),
            _ => None,
        }
    }
}

/// Diffuse-texture minification/magnification filter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Filtering {
    #[default]
    Nearest,
    Linear,
}

impl Filtering {
    pub fn as_int(self) -> i64 {
        match self {
            Self::Nearest => 0,
            Self::Linear => 1,
        }
    }

    pub fn from_int(value: i64) -> Option<Self> {
        match value {
            0 => Some(Self::Nearest),
            1 => Some(Self::Linear),
            _ => None,
        }
    }
}

/// Diffuse-texture coordinate wrapping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Wrapping {
    Clamp,
    #[default]
    Repeat,
}

impl Wrapping {
    pub fn as_int(self) -> i64 {
        match self {
            Self::Clamp => 1,
            Self::Repeat => 2,
        }
    }

    pub fn from_int(value: i64) -> Option<Self> {
        match value {
            1 => Some(Self::Clamp),
            2 => Some(Self::Repeat),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Material {
    pub shading: Shading,
    pub representation: Representation,
    pub options: OptionsMode,
    pub ambient: Shared<Color>,
    pub diffuse: Shared<Color>,
    pub diffuse_texture: Option<Shared<Image>>,
    pub diffuse_texture_filtering: Filtering,
    pub diffuse_texture_wrapping: Wrapping,
}
