//! Camera calibration input: paired calibration images and detected
//! point lists.

use crate::geometry::PointList;
use crate::image::Image;
use crate::shared::Shared;

/// Pairs of calibration image and the points detected in it. The two
/// lists always have the same length; records are only added and removed
/// together.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CalibrationInfo {
    images: Vec<Shared<Image>>,
    point_lists: Vec<Shared<PointList>>,
}

impl CalibrationInfo {
    pub fn add_record(&mut self, image: Shared<Image>, points: Shared<PointList>) {
        self.images.push(image);
        self.point_lists.push(points);
    }

    pub fn images(&self) -> &[Shared<Image>] {
        &self.images
    }

    pub fn point_lists(&self) -> &[Shared<PointList>] {
        &self.point_lists
    }

    pub fn records(&self) -> impl Iterator<Item = (&Shared<Image>, &Shared<PointList>)> {
        self.images.iter().zip(self.point_lists.iter())
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn clear(&mut self) {
        self.images.clear();
        self.point_lists.clear();
    }
}
