use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;

fn stamp(image: &mut RgbImage, center: (f32, f32), radius: i32, color: Rgb<u8>) {
    draw_filled_circle_mut(image, (center.0.round() as i32, center.1.round() as i32), radius, color);
}

/// Stamp circles from `start` towards `end`. The circle on `start` itself is
/// left to the caller, the one on `end` is always drawn.
fn stamp_run(image: &mut RgbImage, start: (f32, f32), end: (f32, f32), radius: i32, color: Rgb<u8>) {
    let dx = end.0 - start.0;
    let dy = end.1 - start.1;
    let length = (dx * dx + dy * dy).sqrt();

    // Repeated points collapse to the joint stamp
    if length >= 0.001 {
        // Half-radius steps leave no gaps between stamps
        let step_size = (radius as f32 * 0.5).max(0.5);
        let num_steps = (length / step_size).ceil() as i32;
        for i in 1..num_steps {
            let t = i as f32 * step_size / length;
            stamp(image, (start.0 + t * dx, start.1 + t * dy), radius, color);
        }
    }
    stamp(image, end, radius, color);
}

/// Draw a thick line with round ends.
pub fn draw_thick_line_segment_mut(image: &mut RgbImage, start: (f32, f32), end: (f32, f32), color: Rgb<u8>, width: f32) {
    draw_polyline_mut(image, &[start, end], color, width);
}

/// Draw a connected path. Thick paths get one round cap per vertex.
pub fn draw_polyline_mut(image: &mut RgbImage, points: &[(f32, f32)], color: Rgb<u8>, width: f32) {
    if width <= 1.0 {
        for segment in points.windows(2) {
            draw_line_segment_mut(image, segment[0], segment[1], color);
        }
        return;
    }

    let Some(&first) = points.first() else {
        return;
    };
    let radius = (width / 2.0).max(1.0) as i32;
    stamp(image, first, radius, color);
    for segment in points.windows(2) {
        stamp_run(image, segment[0], segment[1], radius, color);
    }
}

/// Filled square of side `size` centered on `center`.
pub fn draw_marker_mut(image: &mut RgbImage, center: (f32, f32), size: f32, color: Rgb<u8>) {
    let side = size.round().max(1.0);
    let left = (center.0 - side / 2.0).round() as i32;
    let top = (center.1 - side / 2.0).round() as i32;
    draw_filled_rect_mut(image, Rect::at(left, top).of_size(side as u32, side as u32), color);
}

/// Blend `color` over a rectangle with the given opacity, clipped to the
/// image.
pub fn blend_rect_mut(image: &mut RgbImage, rect: Rect, color: Rgb<u8>, alpha: f32) {
    let alpha = alpha.clamp(0.0, 1.0);
    let x0 = rect.left().max(0) as u32;
    let y0 = rect.top().max(0) as u32;
    let x1 = (rect.right() + 1).clamp(0, image.width() as i32) as u32;
    let y1 = (rect.bottom() + 1).clamp(0, image.height() as i32) as u32;

    for y in y0..y1 {
        for x in x0..x1 {
            let pixel = image.get_pixel_mut(x, y);
            for channel in 0..3 {
                let under = pixel.0[channel] as f32;
                let over = color.0[channel] as f32;
                pixel.0[channel] = (under * (1.0 - alpha) + over * alpha).round() as u8;
            }
        }
    }
}

/// Convert 0–1 float channels to an 8-bit color.
pub fn to_rgb(color: [f64; 3]) -> Rgb<u8> {
    Rgb(color.map(channel_to_u8))
}

pub fn channel_to_u8(value: f64) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}
