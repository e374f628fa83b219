//! Geometric primitives: colors, points, matrices, lines and planes.

use crate::shared::Shared;

/// An RGBA color with components in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Color {
    pub rgba: [f64; 4],
}

impl Color {
    pub fn new(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            rgba: [red, green, blue, alpha],
        }
    }
}

/// A 3-D point.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub coord: [f64; 3],
}

impl Point {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { coord: [x, y, z] }
    }

    pub fn x(&self) -> f64 {
        self.coord[0]
    }

    pub fn y(&self) -> f64 {
        self.coord[1]
    }

    pub fn z(&self) -> f64 {
        self.coord[2]
    }
}

/// An ordered list of shared points.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointList {
    pub points: Vec<Shared<Point>>,
}

impl PointList {
    pub fn push(&mut self, point: Shared<Point>) {
        self.points.push(point);
    }
}

/// A 4x4 transform, row-major coefficients.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Matrix4 {
    pub coefficients: [f64; 16],
}

impl Matrix4 {
    pub const IDENTITY: Self = Self {
        coefficients: [
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ],
    };

    pub fn new(coefficients: [f64; 16]) -> Self {
        Self { coefficients }
    }
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// A line given by a position and a direction point.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Line {
    pub position: Shared<Point>,
    pub direction: Shared<Point>,
}

/// A plane spanned by three points.
#[derive(Clone, Debug, PartialEq)]
pub struct Plane {
    pub points: [Shared<Point>; 3],
}

impl Default for Plane {
    fn default() -> Self {
        Self {
            points: std::array::from_fn(|_| Shared::default()),
        }
    }
}

/// An ordered list of shared planes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlaneList {
    pub planes: Vec<Shared<Plane>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matrix_defaults_to_identity() {
        let m = Matrix4::default();
        assert_eq!(m.coefficients[0], 1.0);
        assert_eq!(m.coefficients[1], 0.0);
        assert_eq!(m.coefficients[15], 1.0);
    }

    #[test]
    fn point_accessors() {
        let p = Point::new(1.5, -2.0, 3.25);
        assert_eq!((p.x(), p.y(), p.z()), (1.5, -2.0, 3.25));
    }
}
