use serde::Serialize;

use crate::bounds::BoundingBox;
use crate::model::Position;

/// A point in the unit square, `u` across and `v` down.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct UnitPoint {
    pub u: f64,
    pub v: f64,
}

/// Map a world coordinate onto the unit square spanned by `bounds`. A
/// zero-width axis places everything on its center line.
pub fn project(bounds: &BoundingBox, position: Position) -> UnitPoint {
    UnitPoint {
        u: normalize(position.x, bounds.min_corner.x, bounds.max_corner.x),
        v: normalize(position.z, bounds.min_corner.z, bounds.max_corner.z),
    }
}

fn normalize(value: f64, min: f64, max: f64) -> f64 {
    let range = max - min;
    // Degenerate axis
    if range == 0.0 {
        0.5
    } else {
        (value - min) / range
    }
}

/// The pixel rectangle the unit square is stretched over.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotRegion {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotRegion {
    /// Centered region covering `draw_area` of each image dimension.
    pub fn centered(output_size: (u32, u32), draw_area: f64) -> Self {
        let draw_area = draw_area.clamp(0.0, 1.0);
        let width = output_size.0 as f64 * draw_area;
        let height = output_size.1 as f64 * draw_area;

        Self {
            left: (output_size.0 as f64 - width) / 2.0,
            top: (output_size.1 as f64 - height) / 2.0,
            width,
            height,
        }
    }

    pub fn to_pixel(&self, point: UnitPoint) -> (f32, f32) {
        // v grows downwards like image rows
        let x = self.left + point.u * self.width;
        let y = self.top + point.v * self.height;
        (x as f32, y as f32)
    }
}
