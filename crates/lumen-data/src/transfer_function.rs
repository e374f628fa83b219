//! Transfer functions mapping scalar values to colors.

/// Interpolation between the value points of a piece.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Interpolation {
    #[default]
    Linear,
    Nearest,
}

impl Interpolation {
    pub fn as_int(self) -> i64 {
        match self {
            Self::Linear => 0,
            Self::Nearest => 1,
        }
    }

    pub fn from_int(value: i64) -> Option<Self> {
        match value {
            0 => Some(Self::Linear),
            1 => Some(Self::Nearest),
            _ => None,
        }
    }
}

/// One segment of a transfer function: a value-to-RGBA ramp with its own
/// windowing. Points are kept sorted by value.
#[derive(Clone, Debug, PartialEq)]
pub struct TransferFunctionPiece {
    pub level: f64,
    pub window: f64,
    pub interpolation: Interpolation,
    pub clamped: bool,
    pub points: Vec<(f64, [f64; 4])>,
}

impl Default for TransferFunctionPiece {
    fn default() -> Self {
        Self {
            level: 0.0,
            window: 1.0,
            interpolation: Interpolation::Linear,
            clamped: true,
            points: Vec::new(),
        }
    }
}

impl TransferFunctionPiece {
    /// Inserts a value point, keeping the ramp ordered by value.
    pub fn insert(&mut self, value: f64, color: [f64; 4]) {
        let index = self
            .points
            .partition_point(|(existing, _)| *existing < value);
        self.points.insert(index, (value, color));
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransferFunction {
    pub name: String,
    pub level: f64,
    pub window: f64,
    pub background_color: [f64; 4],
    pub pieces: Vec<TransferFunctionPiece>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_keeps_points_ordered() {
        let mut piece = TransferFunctionPiece::default();
        piece.insert(10.0, [1.0, 0.0, 0.0, 1.0]);
        piece.insert(-5.0, [0.0, 1.0, 0.0, 1.0]);
        piece.insert(2.5, [0.0, 0.0, 1.0, 1.0]);
        let values: Vec<f64> = piece.points.iter().map(|(v, _)| *v).collect();
        assert_eq!(values, [-5.0, 2.5, 10.0]);
    }
}
