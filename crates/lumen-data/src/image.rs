//! 3-D images with spacing, origin, orientation and windowing metadata.

use crate::array::ElementType;

/// Pixel layout of an image buffer.
///
/// The integer values are part of the on-disk format. `Undefined` is the
/// sentinel for an empty image and suppresses the pixel payload entirely.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PixelFormat {
    #[default]
    Undefined,
    Rgb,
    Rgba,
    Bgr,
    Bgra,
    GrayScale,
    Rg,
}

impl PixelFormat {
    pub fn as_int(self) -> i64 {
        match self {
            Self::Undefined => 0,
            Self::Rgb => 1,
            Self::Rgba => 2,
            Self::Bgr => 3,
            Self::Bgra => 4,
            Self::GrayScale => 5,
            Self::Rg => 6,
        }
    }

    pub fn from_int(value: i64) -> Option<Self> {
        match value {
            0 => Some(Self::Undefined),
            1 => Some(Self::Rgb),
            2 => Some(Self::Rgba),
            3 => Some(Self::Bgr),
            4 => Some(Self::Bgra),
            5 => Some(Self::GrayScale),
            6 => Some(Self::Rg),
            _ => None,
        }
    }

    pub fn num_components(self) -> usize {
        match self {
            Self::Undefined => 0,
            Self::GrayScale => 1,
            Self::Rg => 2,
            Self::Rgb | Self::Bgr => 3,
            Self::Rgba | Self::Bgra => 4,
        }
    }
}

/// A regular 3-D voxel grid.
#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    size: [usize; 3],
    pixel_type: ElementType,
    pixel_format: PixelFormat,
    pub spacing: [f64; 3],
    pub origin: [f64; 3],
    /// Row-major 3x3 direction cosines.
    pub orientation: [f64; 9],
    pub window_centers: Vec<f64>,
    pub window_widths: Vec<f64>,
    buffer: Vec<u8>,
}

impl Default for Image {
    fn default() -> Self {
        Self {
            size: [0; 3],
            pixel_type: ElementType::default(),
            pixel_format: PixelFormat::Undefined,
            spacing: [1.0; 3],
            origin: [0.0; 3],
            orientation: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
            window_centers: Vec::new(),
            window_widths: Vec::new(),
            buffer: Vec::new(),
        }
    }
}

impl Image {
    /// Re-shapes the grid and reallocates a zeroed voxel buffer. Must run
    /// before any payload is copied in.
    pub fn resize(&mut self, size: [usize; 3], pixel_type: ElementType, format: PixelFormat) {
        self.size = size;
        self.pixel_type = pixel_type;
        self.pixel_format = format;
        self.buffer = vec![0; self.byte_len()];
    }

    pub fn size(&self) -> [usize; 3] {
        self.size
    }

    pub fn pixel_type(&self) -> ElementType {
        self.pixel_type
    }

    pub fn pixel_format(&self) -> PixelFormat {
        self.pixel_format
    }

    /// The byte length this geometry calls for, or `None` when the
    /// product overflows `usize`. Untrusted geometry must pass through
    /// here before it is allowed anywhere near an allocation.
    pub fn checked_byte_len(
        size: [usize; 3],
        pixel_type: ElementType,
        format: PixelFormat,
    ) -> Option<usize> {
        size.iter()
            .try_fold(1usize, |product, &extent| product.checked_mul(extent))?
            .checked_mul(format.num_components())?
            .checked_mul(pixel_type.size())
    }

    pub fn num_voxels(&self) -> usize {
        self.size
            .iter()
            .try_fold(1usize, |product, &extent| product.checked_mul(extent))
            .expect("image voxel count overflows usize")
    }

    pub fn byte_len(&self) -> usize {
        Self::checked_byte_len(self.size, self.pixel_type, self.pixel_format)
            .expect("image byte length overflows usize")
    }

    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut [u8] {
        &mut self.buffer
    }

    /// Adopts `bytes` as the voxel buffer; the length must match the
    /// current geometry exactly.
    pub fn set_buffer(&mut self, bytes: Vec<u8>) {
        assert_eq!(
            bytes.len(),
            self.byte_len(),
            "buffer length must match the image geometry"
        );
        self.buffer = bytes;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_len_accounts_for_components_and_element_size() {
        let mut image = Image::default();
        image.resize([4, 2, 1], ElementType::Uint16, PixelFormat::Rgb);
        assert_eq!(image.byte_len(), 4 * 2 * 3 * 2);
        assert_eq!(image.buffer().len(), image.byte_len());
    }

    #[test]
    fn undefined_format_has_no_payload() {
        let mut image = Image::default();
        image.resize([16, 16, 16], ElementType::Uint8, PixelFormat::Undefined);
        assert_eq!(image.byte_len(), 0);
        assert!(image.buffer().is_empty());
    }

    #[test]
    fn oversized_geometry_has_no_byte_length() {
        assert_eq!(
            Image::checked_byte_len([usize::MAX, 4, 1], ElementType::Uint8, PixelFormat::GrayScale),
            None
        );
        assert_eq!(
            Image::checked_byte_len(
                [usize::MAX / 2, 1, 1],
                ElementType::Uint16,
                PixelFormat::Rgba
            ),
            None
        );
        assert_eq!(
            Image::checked_byte_len([4, 2, 1], ElementType::Uint16, PixelFormat::Rgb),
            Some(48)
        );
    }

    #[test]
    fn pixel_format_integers_round_trip() {
        for format in [
            PixelFormat::Undefined,
            PixelFormat::Rgb,
            PixelFormat::Rgba,
            PixelFormat::Bgr,
            PixelFormat::Bgra,
            PixelFormat::GrayScale,
            PixelFormat::Rg,
        ] {
            assert_eq!(PixelFormat::from_int(format.as_int()), Some(format));
        }
        assert_eq!(PixelFormat::from_int(7), None);
    }
}
