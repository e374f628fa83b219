//! Typed n-dimensional raw buffers.

/// Element types storable in arrays and image voxel buffers.
///
/// The string names are part of the on-disk format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ElementType {
    Int8,
    #[default]
    Uint8,
    Int16,
    Uint16,
    Int32,
    Uint32,
    Int64,
    Uint64,
    Float,
    Double,
}

impl ElementType {
    pub fn name(self) -> &'static str {
        match self {
            Self::Int8 => "int8",
            Self::Uint8 => "uint8",
            Self::Int16 => "int16",
            Self::Uint16 => "uint16",
            Self::Int32 => "int32",
            Self::Uint32 => "uint32",
            Self::Int64 => "int64",
            Self::Uint64 => "uint64",
            Self::Float => "float",
            Self::Double => "double",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "int8" => Some(Self::Int8),
            "uint8" => Some(Self::Uint8),
            "int16" => Some(Self::Int16),
            "uint16" => Some(Self::Uint16),
            "int32" => Some(Self::Int32),
            "uint32" => Some(Self::Uint32),
            "int64" => Some(Self::Int64),
            "uint64" => Some(Self::Uint64),
            "float" => Some(Self::Float),
            "double" => Some(Self::Double),
            _ => None,
        }
    }

    /// Size of one element in bytes.
    pub fn size(self) -> usize {
        match self {
            Self::Int8 | Self::Uint8 => 1,
            Self::Int16 | Self::Uint16 => 2,
            Self::Int32 | Self::Uint32 | Self::Float => 4,
            Self::Int64 | Self::Uint64 | Self::Double => 8,
        }
    }
}

/// An n-dimensional buffer of uniformly typed elements.
///
/// The shape must be established with [`Array::resize`] before the buffer
/// is filled; filling an array whose geometry does not match the incoming
/// byte count is an error at the call site.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Array {
    sizes: Vec<usize>,
    element_type: ElementType,
    pub is_buffer_owner: bool,
    buffer: Vec<u8>,
}

impl Array {
    pub fn new(sizes: &[usize], element_type: ElementType) -> Self {
        let mut array = Self {
            is_buffer_owner: true,
            ..Self::default()
        };
        array.resize(sizes, element_type);
        array
    }

    /// Re-shapes the array and reallocates a zeroed buffer of the exact
    /// byte length the new geometry requires.
    pub fn resize(&mut self, sizes: &[usize], element_type: ElementType) {
        self.sizes = sizes.to_vec();
        self.element_type = element_type;
        self.buffer = vec![0; self.byte_len()];
    }

    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    pub fn element_type(&self) -> ElementType {
        self.element_type
    }

    /// The byte length `sizes` and `element_type` call for, or `None`
    /// when the product overflows `usize`. Untrusted geometry must pass
    /// through here before it is allowed anywhere near an allocation.
    pub fn checked_byte_len(sizes: &[usize], element_type: ElementType) -> Option<usize> {
        if sizes.is_empty() {
            return Some(0);
        }
        sizes
            .iter()
            .try_fold(1usize, |product, &size| product.checked_mul(size))?
            .checked_mul(element_type.size())
    }

    pub fn num_elements(&self) -> usize {
        if self.sizes.is_empty() {
            0
        } else {
            self.sizes
                .iter()
                .try_fold(1usize, |product, &size| product.checked_mul(size))
                .expect("array element count overflows usize")
        }
    }

    pub fn byte_len(&self) -> usize {
        self.num_elements()
            .checked_mul(self.element_type.size())
            .expect("array byte length overflows usize")
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut [u8] {
        &mut self.buffer
    }

    /// Re-shapes the array and adopts `bytes` as its buffer. The byte
    /// count must match the geometry exactly.
    pub fn assign(&mut self, sizes: &[usize], element_type: ElementType, bytes: Vec<u8>) {
        self.sizes = sizes.to_vec();
        self.element_type = element_type;
        assert_eq!(
            bytes.len(),
            self.byte_len(),
            "buffer length must match the array geometry"
        );
        self.buffer = bytes;
    }
}
