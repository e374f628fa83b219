//! Fixed-size numeric vectors, double and integer flavored.

use std::ops::{Index, IndexMut};

macro_rules! vec_type {
    ($(#[$doc:meta])* $name:ident, $elem:ty, $len:literal) => {
        $(#[$doc])*
        #[derive(Clone, Copy, Debug, Default, PartialEq)]
        pub struct $name {
            pub values: [$elem; $len],
        }

        impl $name {
            pub fn new(values: [$elem; $len]) -> Self {
                Self { values }
            }
        }

        impl Index<usize> for $name {
            type Output = $elem;

            fn index(&self, index: usize) -> &$elem {
                &self.values[index]
            }
        }

        impl IndexMut<usize> for $name {
            fn index_mut(&mut self, index: usize) -> &mut $elem {
                &mut self.values[index]
            }
        }
    };
}

vec_type!(
    /// Classname `dvec2`.
    DVec2, f64, 2
);
vec_type!(
    /// Classname `dvec3`.
    DVec3, f64, 3
);
vec_type!(
    /// Classname `dvec4`.
    DVec4, f64, 4
);
vec_type!(
    /// Classname `ivec2`.
    IVec2, i64, 2
);
vec_type!(
    /// Classname `ivec3`.
    IVec3, i64, 3
);
vec_type!(
    /// Classname `ivec4`.
    IVec4, i64, 4
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn components_are_indexable() {
        let mut vec = DVec3::default();
        vec[0] = 1.5;
        vec[2] = -2.0;
        assert_eq!(vec, DVec3::new([1.5, 0.0, -2.0]));

        let vec = IVec2::new([3, -4]);
        assert_eq!((vec[0], vec[1]), (3, -4));
    }
}
