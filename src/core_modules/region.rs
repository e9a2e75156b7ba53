// THEORY:
// The `region` module holds the geometric outputs of the detector. Both types are
// "dumb", immutable data containers:
// 1.  **Region**: the axis-aligned box enclosing one 4-connected component. It is
//     the summary of a flood fill; the pixel list itself is never kept.
// 2.  **ClassifiedPoint**: a payload component reduced to its box center, tagged
//     with its color and the index of the marker it was found in.
//
// Both derive `Serialize` so a detection result can be reported as JSON directly.

use crate::core_modules::pixel::pixel::ColorClass;
use serde::Serialize;

/// A simple struct to represent a pixel coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

impl Point {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned bounding box in image coordinates, `width`/`height` are inclusive spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Builds the box spanning two inclusive corners.
    pub fn from_corners(min: Point, max: Point) -> Self {
        Self {
            x: min.x,
            y: min.y,
            width: max.x - min.x + 1,
            height: max.y - min.y + 1,
        }
    }

    pub fn min_x(&self) -> u32 {
        self.x
    }

    pub fn min_y(&self) -> u32 {
        self.y
    }

    /// Inclusive. A zero-width region reports `min_x`.
    pub fn max_x(&self) -> u32 {
        self.x + self.width.saturating_sub(1)
    }

    /// Inclusive. A zero-height region reports `min_y`.
    pub fn max_y(&self) -> u32 {
        self.y + self.height.saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.y >= self.y
            && point.x - self.x < self.width
            && point.y - self.y < self.height
    }

    /// Center of the box, truncated toward the top-left.
    pub fn centroid(&self) -> Point {
        Point {
            x: (self.min_x() + self.max_x()) / 2,
            y: (self.min_y() + self.max_y()) / 2,
        }
    }

    /// Both spans strictly exceed `min_extent`.
    pub fn exceeds(&self, min_extent: u32) -> bool {
        self.width > min_extent && self.height > min_extent
    }
}

/// The two colors a payload blob can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadClass {
    PayloadA,
    PayloadB,
}

impl PayloadClass {
    pub fn from_color(class: ColorClass) -> Option<Self> {
        match class {
            ColorClass::PayloadA => Some(PayloadClass::PayloadA),
            ColorClass::PayloadB => Some(PayloadClass::PayloadB),
            ColorClass::None | ColorClass::Marker => None,
        }
    }

    pub fn color_class(self) -> ColorClass {
        match self {
            PayloadClass::PayloadA => ColorClass::PayloadA,
            PayloadClass::PayloadB => ColorClass::PayloadB,
        }
    }
}

/// A payload blob reduced to a point inside its parent marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ClassifiedPoint {
    pub x: u32,
    pub y: u32,
    /// Index into `DetectionResult::markers`.
    pub parent_marker_index: usize,
    pub class: PayloadClass,
}

impl ClassifiedPoint {
    pub fn from_region(region: &Region, parent_marker_index: usize, class: PayloadClass) -> Self {
        let Point { x, y } = region.centroid();
        Self {
            x,
            y,
            parent_marker_index,
            class,
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centroid_uses_inclusive_bounds() {
        let region = Region::from_corners(Point::new(2, 4), Point::new(8, 10));
        assert_eq!(region.width, 7);
        assert_eq!(region.height, 7);
        assert_eq!(region.centroid(), Point::new(5, 7));
    }

    #[test]
    fn centroid_truncates() {
        let region = Region::from_corners(Point::new(0, 0), Point::new(11, 12));
        assert_eq!(region.centroid(), Point::new(5, 6));
    }

    #[test]
    fn single_pixel_region() {
        let region = Region::from_corners(Point::new(3, 3), Point::new(3, 3));
        assert_eq!(region, Region::new(3, 3, 1, 1));
        assert_eq!(region.max_x(), 3);
        assert!(region.contains(Point::new(3, 3)));
        assert!(!region.contains(Point::new(4, 3)));
    }

    #[test]
    fn zero_sized_region_does_not_underflow() {
        let region = Region::new(0, 0, 0, 0);
        assert!(region.is_empty());
        assert_eq!((region.max_x(), region.max_y()), (0, 0));
        assert_eq!(region.centroid(), Point::new(0, 0));
        assert!(!region.contains(Point::new(0, 0)));
        assert!(!region.exceeds(0));

        let flat = Region::new(7, 3, 4, 0);
        assert_eq!((flat.max_x(), flat.max_y()), (10, 3));
        assert!(!flat.contains(Point::new(8, 3)));
    }

    #[test]
    fn size_threshold_is_strict() {
        assert!(Region::new(0, 0, 6, 6).exceeds(5));
        assert!(!Region::new(0, 0, 5, 30).exceeds(5));
        assert!(!Region::new(0, 0, 30, 5).exceeds(5));
    }

    #[test]
    fn point_carries_parent_and_class() {
        let region = Region::from_corners(Point::new(2, 4), Point::new(8, 10));
        let point = ClassifiedPoint::from_region(&region, 3, PayloadClass::PayloadB);
        assert_eq!(point.position(), Point::new(5, 7));
        assert_eq!(point.parent_marker_index, 3);
        assert_eq!(point.class.color_class(), ColorClass::PayloadB);
    }

    #[test]
    fn only_payload_colors_map_to_payload_class() {
        assert_eq!(PayloadClass::from_color(ColorClass::Marker), None);
        assert_eq!(PayloadClass::from_color(ColorClass::None), None);
        assert_eq!(
            PayloadClass::from_color(ColorClass::PayloadA),
            Some(PayloadClass::PayloadA)
        );
    }
}
