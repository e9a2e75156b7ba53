// THEORY:
// A `VisitedMask` is the scratch memory of one scan phase. It covers exactly the
// area being scanned (the whole image for the marker phase, one marker's box for
// a payload phase) and doubles as the bounds check for the flood fill: a
// coordinate outside the mask is outside the scan.
//
// Masks are allocated by the scanner that owns the phase and dropped when it
// returns. Nothing else holds one, so there is no hidden state between phases or
// between markers.

use crate::core_modules::region::{Point, Region};

#[derive(Debug, Clone)]
pub struct VisitedMask {
    origin: Point,
    width: u32,
    height: u32,
    cells: Vec<bool>,
}

impl VisitedMask {
    /// A cleared mask over `[origin.x, origin.x + width) x [origin.y, origin.y + height)`.
    pub fn new(origin: Point, width: u32, height: u32) -> Self {
        Self {
            origin,
            width,
            height,
            cells: vec![false; width as usize * height as usize],
        }
    }

    /// A cleared mask over the inclusive bounds of `region`.
    pub fn covering(region: &Region) -> Self {
        Self::new(Point::new(region.x, region.y), region.width, region.height)
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.origin.x
            && y >= self.origin.y
            && x - self.origin.x < self.width
            && y - self.origin.y < self.height
    }

    /// Absolute coordinates in column-major order: x outer, y inner.
    pub fn scan_order(&self) -> impl Iterator<Item = Point> + use<> {
        let Point { x: x0, y: y0 } = self.origin;
        let (x1, y1) = (x0 + self.width, y0 + self.height);
        (x0..x1).flat_map(move |x| (y0..y1).map(move |y| Point::new(x, y)))
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        debug_assert!(self.contains(x, y));
        (y - self.origin.y) as usize * self.width as usize + (x - self.origin.x) as usize
    }

    #[inline]
    pub fn is_visited(&self, x: u32, y: u32) -> bool {
        self.cells[self.index(x, y)]
    }

    #[inline]
    pub fn mark(&mut self, x: u32, y: u32) {
        let index = self.index(x, y);
        self.cells[index] = true;
    }

    pub fn visited_count(&self) -> usize {
        self.cells.iter().filter(|visited| **visited).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_mask_translates_coordinates() {
        let mut mask = VisitedMask::covering(&Region::new(10, 20, 3, 2));
        assert!(mask.contains(10, 20));
        assert!(mask.contains(12, 21));
        assert!(!mask.contains(13, 21));
        assert!(!mask.contains(9, 20));
        assert!(!mask.contains(10, 22));

        mask.mark(12, 21);
        assert!(mask.is_visited(12, 21));
        assert!(!mask.is_visited(10, 20));
        assert_eq!(mask.visited_count(), 1);
    }

    #[test]
    fn scan_order_is_column_major() {
        let mask = VisitedMask::new(Point::new(1, 1), 2, 2);
        let order: Vec<_> = mask.scan_order().collect();
        assert_eq!(
            order,
            vec![
                Point::new(1, 1),
                Point::new(1, 2),
                Point::new(2, 1),
                Point::new(2, 2)
            ]
        );
    }

    #[test]
    fn empty_mask_scans_nothing() {
        let mask = VisitedMask::new(Point::new(0, 0), 0, 7);
        assert_eq!(mask.scan_order().count(), 0);
        assert!(!mask.contains(0, 0));
    }
}
