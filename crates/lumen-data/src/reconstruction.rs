//! Organ reconstructions and resection planning.

use crate::geometry::PlaneList;
use crate::image::Image;
use crate::material::Material;
use crate::mesh::Mesh;
use crate::shared::Shared;

/// A segmented organ: its mesh and/or mask image plus display material.
#[derive(Clone, Debug, PartialEq)]
pub struct Reconstruction {
    pub is_visible: bool,
    pub organ_name: String,
    pub structure_type: String,
    /// Cubic millimeters, or [`Reconstruction::NO_COMPUTED_MASK_VOLUME`]
    /// when never computed.
    pub computed_mask_volume: f64,
    pub material: Shared<Material>,
    pub image: Option<Shared<Image>>,
    pub mesh: Option<Shared<Mesh>>,
}

impl Reconstruction {
    pub const NO_COMPUTED_MASK_VOLUME: f64 = -1.0;
}

impl Default for Reconstruction {
    fn default() -> Self {
        Self {
            is_visible: true,
            organ_name: String::new(),
            structure_type: String::new(),
            computed_mask_volume: Self::NO_COMPUTED_MASK_VOLUME,
            material: Shared::default(),
            image: None,
            mesh: None,
        }
    }
}

/// A planned resection: the planes that cut it and the reconstructions it
/// consumes and produces.
#[derive(Clone, Debug, PartialEq)]
pub struct Resection {
    pub name: String,
    pub plane_list: Shared<PlaneList>,
    pub inputs: Vec<Shared<Reconstruction>>,
    pub outputs: Vec<Shared<Reconstruction>>,
    pub is_safe_part: bool,
    pub is_valid: bool,
    pub is_visible: bool,
}

impl Default for Resection {
    fn default() -> Self {
        Self {
            name: String::new(),
            plane_list: Shared::default(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            is_safe_part: true,
            is_valid: false,
            is_visible: true,
        }
    }
}

/// All resections of a planning session, plus the designated safe part.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResectionDb {
    pub safe_resection: Option<Shared<Resection>>,
    pub resections: Vec<Shared<Resection>>,
}
