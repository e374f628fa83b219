//! Triangle meshes with optional per-point and per-cell attributes.

/// Bit mask of the optional attribute layers a mesh carries.
///
/// The bit values are part of the on-disk format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MeshAttributes(u8);

impl MeshAttributes {
    pub const NONE: Self = Self(0);
    pub const POINT_NORMALS: Self = Self(1);
    pub const POINT_COLORS: Self = Self(1 << 1);
    pub const CELL_NORMALS: Self = Self(1 << 2);
    pub const CELL_COLORS: Self = Self(1 << 3);

    pub fn with(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn from_bits(bits: u8) -> Option<Self> {
        if bits & !0b1111 == 0 {
            Some(Self(bits))
        } else {
            None
        }
    }
}

/// A triangle mesh. Geometry is `f32`, connectivity `u32`, colors RGBA
/// bytes, matching the binary payload layout.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    pub points: Vec<[f32; 3]>,
    pub cells: Vec<[u32; 3]>,
    pub point_normals: Option<Vec<[f32; 3]>>,
    pub point_colors: Option<Vec<[u8; 4]>>,
    pub cell_normals: Option<Vec<[f32; 3]>>,
    pub cell_colors: Option<Vec<[u8; 4]>>,
}

impl Mesh {
    /// Allocates zeroed geometry and the attribute layers named by the
    /// mask, dropping layers the mask omits. Must run before a payload
    /// is decoded into the mesh.
    pub fn resize(&mut self, num_points: usize, num_cells: usize, attributes: MeshAttributes) {
        self.points = vec![[0.0; 3]; num_points];
        self.cells = vec![[0; 3]; num_cells];
        self.point_normals = attributes
            .contains(MeshAttributes::POINT_NORMALS)
            .then(|| vec![[0.0; 3]; num_points]);
        self.point_colors = attributes
            .contains(MeshAttributes::POINT_COLORS)
            .then(|| vec![[0; 4]; num_points]);
        self.cell_normals = attributes
            .contains(MeshAttributes::CELL_NORMALS)
            .then(|| vec![[0.0; 3]; num_cells]);
        self.cell_colors = attributes
            .contains(MeshAttributes::CELL_COLORS)
            .then(|| vec![[0; 4]; num_cells]);
    }

    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The attribute mask implied by which layers are present.
    pub fn attributes(&self) -> MeshAttributes {
        let mut mask = MeshAttributes::NONE;
        if self.point_normals.is_some() {
            mask = mask.with(MeshAttributes::POINT_NORMALS);
        }
        if self.point_colors.is_some() {
            mask = mask.with(MeshAttributes::POINT_COLORS);
        }
        if self.cell_normals.is_some() {
            mask = mask.with(MeshAttributes::CELL_NORMALS);
        }
        if self.cell_colors.is_some() {
            mask = mask.with(MeshAttributes::CELL_COLORS);
        }
        mask
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resize_allocates_only_the_requested_layers() {
        let mut mesh = Mesh::default();
        let mask = MeshAttributes::POINT_NORMALS.with(MeshAttributes::CELL_COLORS);
        mesh.resize(4, 2, mask);
        assert_eq!(mesh.num_points(), 4);
        assert_eq!(mesh.num_cells(), 2);
        assert!(mesh.point_normals.is_some());
        assert!(mesh.point_colors.is_none());
        assert!(mesh.cell_normals.is_none());
        assert_eq!(mesh.cell_colors.as_ref().map(Vec::len), Some(2));
        assert_eq!(mesh.attributes(), mask);
    }

    #[test]
    fn attribute_bits_round_trip() {
        let mask = MeshAttributes::POINT_COLORS.with(MeshAttributes::CELL_NORMALS);
        assert_eq!(MeshAttributes::from_bits(mask.bits()), Some(mask));
        assert_eq!(MeshAttributes::from_bits(0xF0), None);
    }
}
