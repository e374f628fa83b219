//! Scalar wrapper types: boolean, integer, real and string.

/// Classname `boolean`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Boolean {
    pub value: bool,
}

impl Boolean {
    pub fn new(value: bool) -> Self {
        Self { value }
    }
}

/// Classname `integer`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Integer {
    pub value: i64,
}

impl Integer {
    pub fn new(value: i64) -> Self {
        Self { value }
    }
}

/// Classname `real`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Real {
    pub value: f64,
}

impl Real {
    pub fn new(value: f64) -> Self {
        Self { value }
    }
}

/// Classname `string`. Named `Text` to stay clear of the std type.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Text {
    pub value: String,
}

impl Text {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}
