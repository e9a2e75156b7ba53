pub mod marker_scanner;
pub mod payload_scanner;
pub mod pixel;
pub mod raster;
pub mod region;
pub mod region_extractor;
pub mod utils;
pub mod visited_mask;
