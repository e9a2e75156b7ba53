// THEORY:
// The `PayloadScanner` is the second scan phase, run once per marker. It looks
// only inside the marker's bounding box, with a visited mask allocated for that
// box alone, and reduces every sufficiently large red or blue component to the
// center of its bounding box.
//
// The box is a hard boundary on every side: a blob that crosses any edge is
// measured by its part inside the box, including on the left and top where a fill
// bounded only by the image would keep growing.
//
// The payload threshold is stricter than the marker one: payload blobs are
// smaller targets and pick up more compression noise along their edges.

pub mod payload_scanner {
    use crate::core_modules::raster::raster::Raster;
    use crate::core_modules::region::{ClassifiedPoint, PayloadClass, Region};
    use crate::core_modules::region_extractor::region_extractor::flood_fill;
    use crate::core_modules::visited_mask::VisitedMask;

    /// A payload blob must be strictly wider and taller than this.
    pub const MIN_PAYLOAD_EXTENT: u32 = 10;

    /// Finds the payload blobs inside `marker` and tags each centroid with `marker_index`.
    pub fn scan_payloads(
        raster: &Raster,
        marker: &Region,
        marker_index: usize,
        min_extent: u32,
    ) -> Vec<ClassifiedPoint> {
        let mut visited = VisitedMask::covering(marker);
        let mut points = Vec::new();

        for seed in visited.scan_order() {
            if visited.is_visited(seed.x, seed.y) {
                continue;
            }
            let Some(class) = PayloadClass::from_color(raster.classify(seed.x, seed.y)) else {
                continue;
            };

            let region = flood_fill(raster, seed, &mut visited, class.color_class());
            if region.exceeds(min_extent) {
                points.push(ClassifiedPoint::from_region(&region, marker_index, class));
            } else {
                log::trace!("{class:?} candidate {region:?} in marker {marker_index} rejected");
            }
        }

        log::debug!("marker {marker_index} {marker:?}: {} payload points", points.len());
        points
    }
}
