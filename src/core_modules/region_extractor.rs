// THEORY:
// The `RegionExtractor` is the engine underneath both scanners. Given a seed pixel,
// a color class, and the visited mask of the current phase, it grows the
// 4-connected component the seed belongs to and reports its bounding box.
//
// Key architectural principles:
// 1.  **Breadth-first growth**: An explicit FIFO queue drives the traversal, so
//     component size is bounded only by memory, never by stack depth.
// 2.  **Mark on enqueue**: A pixel is marked visited the moment it is queued, not
//     when it is dequeued. No pixel can be queued twice.
// 3.  **Mask is the boundary**: A neighbor is eligible only if it lies inside the
//     mask's area. A payload fill started inside a marker box never leaves it.
// 4.  **Stateless utility**: Everything it mutates is passed in. The only output
//     is the `Region`; the component's pixel list is not retained.

pub mod region_extractor {
    use crate::core_modules::pixel::pixel::ColorClass;
    use crate::core_modules::raster::raster::Raster;
    use crate::core_modules::region::{Point, Region};
    use crate::core_modules::visited_mask::VisitedMask;
    use std::collections::VecDeque;

    /// Left, right, up, down. No diagonals.
    const NEIGHBOR_OFFSETS: [(i64, i64); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

    /// Grows the component of `match_class` containing `start` and returns its bounding box.
    ///
    /// `start` must lie inside `visited`, be unvisited, and classify to `match_class`.
    /// Every pixel of the component reachable inside the mask is marked visited on return.
    pub fn flood_fill(
        raster: &Raster,
        start: Point,
        visited: &mut VisitedMask,
        match_class: ColorClass,
    ) -> Region {
        debug_assert!(visited.contains(start.x, start.y), "seed outside scan area");
        debug_assert!(!visited.is_visited(start.x, start.y), "seed already visited");
        debug_assert_eq!(raster.classify(start.x, start.y), match_class);

        let mut queue: VecDeque<Point> = VecDeque::new();
        queue.push_back(start);
        visited.mark(start.x, start.y);

        let mut min = start;
        let mut max = start;

        while let Some(current) = queue.pop_front() {
            min.x = min.x.min(current.x);
            min.y = min.y.min(current.y);
            max.x = max.x.max(current.x);
            max.y = max.y.max(current.y);

            for (dx, dy) in NEIGHBOR_OFFSETS {
                let nx = current.x as i64 + dx;
                let ny = current.y as i64 + dy;
                if nx < 0 || ny < 0 {
                    continue;
                }
                let (nx, ny) = (nx as u32, ny as u32);

                if visited.contains(nx, ny)
                    && raster.contains(nx, ny)
                    && !visited.is_visited(nx, ny)
                    && raster.classify(nx, ny) == match_class
                {
                    visited.mark(nx, ny);
                    queue.push_back(Point::new(nx, ny));
                }
            }
        }

        let region = Region::from_corners(min, max);
        log::trace!("flood fill {match_class:?} from ({}, {}) -> {region:?}", start.x, start.y);
        region
    }
}
