use log::info;
use serde::Serialize;

use crate::model::Position;
use crate::resolve::ResolvedEdge;
use crate::table::LocationTable;
use crate::{RouteGraphError, StatusOr};

/// Axis-aligned world-space box around everything that gets drawn.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BoundingBox {
    pub min_corner: Position,
    pub max_corner: Position,
}

impl BoundingBox {
    /// Smallest box holding every point, `None` when there are no points.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Position>,
    {
        let mut points = points.into_iter();
        let first = points.next()?.to_array();
        let (mut min, mut max) = (first, first);

        for point in points {
            let point = point.to_array();
            for axis in 0..3 {
                min[axis] = min[axis].min(point[axis]);
                max[axis] = max[axis].max(point[axis]);
            }
        }

        Some(Self {
            min_corner: Position::from(min),
            max_corner: Position::from(max),
        })
    }

    pub fn contains(&self, point: Position) -> bool {
        let (min, max, point) = (self.min_corner.to_array(), self.max_corner.to_array(), point.to_array());
        (0..3).all(|axis| min[axis] <= point[axis] && point[axis] <= max[axis])
    }

    /// Extent along x.
    pub fn width(&self) -> f64 {
        self.max_corner.x - self.min_corner.x
    }

    /// Extent along z, the map's vertical axis.
    pub fn depth(&self) -> f64 {
        self.max_corner.z - self.min_corner.z
    }
}

/// Bounds over every location and every edge expanded end to end. Both
/// directions of a pair contribute, even though only one is drawn.
pub fn calculate_bounds(table: &LocationTable, edges: &[Vec<ResolvedEdge>]) -> StatusOr<BoundingBox> {
    let mut coords: Vec<Position> = table.iter().map(|location| location.position).collect();

    // Every listed edge, drawn or not
    for edge in edges.iter().flatten() {
        coords.extend(edge.hops(table)?);
    }

    let bounds = BoundingBox::from_points(coords).ok_or(RouteGraphError::EmptyBounds)?;
    info!("Bounds: {:?} to {:?}", bounds.min_corner, bounds.max_corner);
    Ok(bounds)
}
