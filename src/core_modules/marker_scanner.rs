// THEORY:
// The `MarkerScanner` is the first scan phase. It walks the whole raster once,
// column by column, and flood-fills every green component it meets. Components
// that are too thin in either direction are dropped as noise, but their pixels
// stay marked so they are never seeded again.

pub mod marker_scanner {
    use crate::core_modules::pixel::pixel::ColorClass;
    use crate::core_modules::raster::raster::Raster;
    use crate::core_modules::region::{Point, Region};
    use crate::core_modules::region_extractor::region_extractor::flood_fill;
    use crate::core_modules::visited_mask::VisitedMask;

    /// A marker must be strictly wider and taller than this.
    pub const MIN_MARKER_EXTENT: u32 = 5;

    /// Finds every marker component larger than `min_extent` in both directions,
    /// in discovery order (x outer, y inner).
    pub fn scan_markers(raster: &Raster, min_extent: u32) -> Vec<Region> {
        let mut visited = VisitedMask::new(Point::new(0, 0), raster.width(), raster.height());
        let mut markers = Vec::new();
        let mut rejected = 0usize;

        for seed in visited.scan_order() {
            if visited.is_visited(seed.x, seed.y)
                || raster.classify(seed.x, seed.y) != ColorClass::Marker
            {
                continue;
            }

            let region = flood_fill(raster, seed, &mut visited, ColorClass::Marker);
            if region.exceeds(min_extent) {
                markers.push(region);
            } else {
                log::trace!("marker candidate {region:?} rejected (min extent {min_extent})");
                rejected += 1;
            }
        }

        log::debug!(
            "marker scan over {}x{}: {} accepted, {} rejected",
            raster.width(),
            raster.height(),
            markers.len(),
            rejected
        );
        markers
    }
}
