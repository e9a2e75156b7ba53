// THEORY:
// The annotator turns a `DetectionResult` back into something a person can check
// at a glance: a copy of the input with every marker outlined and every payload
// point stamped as a disc. Each disc is drawn in the *other* payload color so it
// stands out against the blob it marks.

use crate::core_modules::raster::raster::Raster;
use crate::core_modules::region::{ClassifiedPoint, PayloadClass, Region};
use crate::pipeline::DetectionResult;
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_hollow_rect_mut};
use imageproc::rect::Rect;

pub const MARKER_OUTLINE: Rgba<u8> = Rgba([0, 255, 0, 255]);
pub const MARKER_STROKE: u32 = 2;
pub const POINT_RADIUS: i32 = 5;

pub fn point_color(class: PayloadClass) -> Rgba<u8> {
    match class {
        PayloadClass::PayloadA => Rgba([0, 0, 255, 255]),
        PayloadClass::PayloadB => Rgba([255, 0, 0, 255]),
    }
}

/// Returns a copy of `raster` with `result` drawn on top.
pub fn annotate(raster: &Raster, result: &DetectionResult) -> RgbaImage {
    let mut canvas = raster.to_rgba_image();
    for marker in &result.markers {
        outline(&mut canvas, marker);
    }
    for point in &result.points {
        stamp(&mut canvas, point);
    }
    canvas
}

fn outline(canvas: &mut RgbaImage, marker: &Region) {
    // Inset strokes; imageproc only draws 1 px outlines.
    for inset in 0..MARKER_STROKE {
        let (width, height) = (
            marker.width.saturating_sub(2 * inset),
            marker.height.saturating_sub(2 * inset),
        );
        if width == 0 || height == 0 {
            break;
        }
        let rect = Rect::at((marker.x + inset) as i32, (marker.y + inset) as i32).of_size(width, height);
        draw_hollow_rect_mut(canvas, rect, MARKER_OUTLINE);
    }
}

fn stamp(canvas: &mut RgbaImage, point: &ClassifiedPoint) {
    draw_filled_circle_mut(
        canvas,
        (point.x as i32, point.y as i32),
        POINT_RADIUS,
        point_color(point.class),
    );
}
